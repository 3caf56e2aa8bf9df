//! Audited typed configuration registry.
//!
//! A `Registry` is declared up front with every key it will ever hold, each
//! tagged with a [`Kind`]. Keys are set exactly once through coercing
//! setters and read through kind-checked getters that mark the key as used.
//! Two closing audits mirror the wrapper discipline: `all_set` confirms that
//! configuration is complete, `properly_used` confirms that nothing was
//! configured and then ignored.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]
#![warn(rust_2018_idioms)]

use std::cell::Cell;
use std::collections::HashMap;
use std::fmt::{self, Display};
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

/// Declared payload kind of a registry key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Kind {
    Text,
    Number,
    Flag,
}

impl Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Kind::Text => "text",
            Kind::Number => "number",
            Kind::Flag => "flag",
        };
        f.write_str(label)
    }
}

// Invariant: a slot's value variant always matches its declared kind,
// because the setters refuse kind mismatches before storing.
#[derive(Debug)]
enum SlotValue {
    Text(String),
    Number(f64),
    Flag(bool),
}

#[derive(Debug)]
struct Slot {
    kind: Kind,
    value: Option<SlotValue>,
    read: Cell<bool>,
}

impl Slot {
    fn new(kind: Kind) -> Self {
        Self {
            kind,
            value: None,
            read: Cell::new(false),
        }
    }
}

/// Set-once, read-audited key/value store over a caller-supplied key type.
///
/// Use tracking lives in [`Cell`]s so the getters take `&self`; like the
/// scalar wrappers, a registry belongs to one thread.
#[derive(Debug)]
pub struct Registry<K> {
    name: String,
    slots: HashMap<K, Slot>,
}

impl<K: Copy + Eq + Hash + Display> Registry<K> {
    /// Declare a registry with its complete key set. Keys cannot be added
    /// later.
    pub fn new(name: impl Into<String>, keys: impl IntoIterator<Item = (K, Kind)>) -> Self {
        let slots = keys
            .into_iter()
            .map(|(key, kind)| (key, Slot::new(kind)))
            .collect();
        Self {
            name: name.into(),
            slots,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Store a text value. Numeric input is rendered to text.
    pub fn set_text(&mut self, key: K, raw: impl Into<Value>) -> Result<&mut Self, RegistryError> {
        let name = &self.name;
        let slot = open_slot(name, &mut self.slots, key, Kind::Text)?;
        slot.value = Some(SlotValue::Text(coerce_text(name, key, raw.into())?));
        Ok(self)
    }

    /// Store a numeric value. Numeric text is parsed; the result must be
    /// finite.
    pub fn set_number(
        &mut self,
        key: K,
        raw: impl Into<Value>,
    ) -> Result<&mut Self, RegistryError> {
        let name = &self.name;
        let slot = open_slot(name, &mut self.slots, key, Kind::Number)?;
        slot.value = Some(SlotValue::Number(coerce_number(name, key, raw.into())?));
        Ok(self)
    }

    /// Store a flag. The strings `"true"` and `"false"` are parsed.
    pub fn set_flag(&mut self, key: K, raw: impl Into<Value>) -> Result<&mut Self, RegistryError> {
        let name = &self.name;
        let slot = open_slot(name, &mut self.slots, key, Kind::Flag)?;
        slot.value = Some(SlotValue::Flag(coerce_flag(name, key, raw.into())?));
        Ok(self)
    }

    /// Read a text key, marking it used.
    pub fn text(&self, key: K) -> Result<&str, RegistryError> {
        let slot = self.checked_slot(key, Kind::Text)?;
        match &slot.value {
            Some(SlotValue::Text(text)) => {
                slot.read.set(true);
                Ok(text)
            }
            _ => Err(self.unset(key)),
        }
    }

    /// Read a numeric key, marking it used.
    pub fn number(&self, key: K) -> Result<f64, RegistryError> {
        let slot = self.checked_slot(key, Kind::Number)?;
        match slot.value {
            Some(SlotValue::Number(value)) => {
                slot.read.set(true);
                Ok(value)
            }
            _ => Err(self.unset(key)),
        }
    }

    /// Read a flag key, marking it used.
    pub fn flag(&self, key: K) -> Result<bool, RegistryError> {
        let slot = self.checked_slot(key, Kind::Flag)?;
        match slot.value {
            Some(SlotValue::Flag(value)) => {
                slot.read.set(true);
                Ok(value)
            }
            _ => Err(self.unset(key)),
        }
    }

    /// Audit: every declared key holds a value. Idempotent and
    /// mutation-free; the failure lists the unset keys in sorted order.
    pub fn all_set(&self) -> Result<(), RegistryError> {
        let mut missing: Vec<String> = self
            .slots
            .iter()
            .filter(|(_, slot)| slot.value.is_none())
            .map(|(key, _)| key.to_string())
            .collect();
        if missing.is_empty() {
            return Ok(());
        }
        missing.sort();
        let violation = RegistryError::MissingValues {
            registry: self.name.clone(),
            keys: missing,
        };
        warn!(%violation, "Registry audit failed");
        Err(violation)
    }

    /// Audit: every declared key has been read. Keys that were never set
    /// count as unread, since a failed read does not mark the key.
    pub fn properly_used(&self) -> Result<(), RegistryError> {
        let mut unread: Vec<String> = self
            .slots
            .iter()
            .filter(|(_, slot)| !slot.read.get())
            .map(|(key, _)| key.to_string())
            .collect();
        if unread.is_empty() {
            return Ok(());
        }
        unread.sort();
        let violation = RegistryError::UnusedValues {
            registry: self.name.clone(),
            keys: unread,
        };
        warn!(%violation, "Registry audit failed");
        Err(violation)
    }

    fn checked_slot(&self, key: K, requested: Kind) -> Result<&Slot, RegistryError> {
        let slot = self.slots.get(&key).ok_or_else(|| RegistryError::UnknownKey {
            registry: self.name.clone(),
            key: key.to_string(),
        })?;
        if slot.kind != requested {
            return Err(RegistryError::KindMismatch {
                registry: self.name.clone(),
                key: key.to_string(),
                declared: slot.kind,
                requested,
            });
        }
        Ok(slot)
    }

    fn unset(&self, key: K) -> RegistryError {
        RegistryError::Unset {
            registry: self.name.clone(),
            key: key.to_string(),
        }
    }
}

fn open_slot<'a, K: Copy + Eq + Hash + Display>(
    registry: &str,
    slots: &'a mut HashMap<K, Slot>,
    key: K,
    requested: Kind,
) -> Result<&'a mut Slot, RegistryError> {
    let slot = slots.get_mut(&key).ok_or_else(|| RegistryError::UnknownKey {
        registry: registry.to_owned(),
        key: key.to_string(),
    })?;
    if slot.kind != requested {
        return Err(RegistryError::KindMismatch {
            registry: registry.to_owned(),
            key: key.to_string(),
            declared: slot.kind,
            requested,
        });
    }
    if slot.value.is_some() {
        return Err(RegistryError::AlreadySet {
            registry: registry.to_owned(),
            key: key.to_string(),
        });
    }
    Ok(slot)
}

fn coerce_text<K: Copy + Display>(
    registry: &str,
    key: K,
    raw: Value,
) -> Result<String, RegistryError> {
    match raw {
        Value::String(text) => Ok(text),
        Value::Number(number) => {
            debug!(registry, key = %key, "Rendered numeric input as text");
            Ok(number.to_string())
        }
        _ => Err(not_coercible(registry, key, Kind::Text)),
    }
}

fn coerce_number<K: Copy + Display>(
    registry: &str,
    key: K,
    raw: Value,
) -> Result<f64, RegistryError> {
    match raw {
        Value::Number(number) => number
            .as_f64()
            .filter(|value| value.is_finite())
            .ok_or_else(|| not_coercible(registry, key, Kind::Number)),
        Value::String(text) => {
            let parsed = text
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| not_coercible(registry, key, Kind::Number))?;
            debug!(registry, key = %key, "Parsed text input as number");
            Ok(parsed)
        }
        _ => Err(not_coercible(registry, key, Kind::Number)),
    }
}

fn coerce_flag<K: Copy + Display>(
    registry: &str,
    key: K,
    raw: Value,
) -> Result<bool, RegistryError> {
    match raw {
        Value::Bool(flag) => Ok(flag),
        Value::String(text) => match text.trim() {
            "true" => {
                debug!(registry, key = %key, "Parsed text input as flag");
                Ok(true)
            }
            "false" => {
                debug!(registry, key = %key, "Parsed text input as flag");
                Ok(false)
            }
            _ => Err(not_coercible(registry, key, Kind::Flag)),
        },
        _ => Err(not_coercible(registry, key, Kind::Flag)),
    }
}

fn not_coercible<K: Copy + Display>(registry: &str, key: K, kind: Kind) -> RegistryError {
    RegistryError::NotCoercible {
        registry: registry.to_owned(),
        key: key.to_string(),
        kind,
    }
}

/// Registry misuse, with the registry and key names spelled out.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum RegistryError {
    #[error("registry '{registry}' has no key '{key}'")]
    UnknownKey { registry: String, key: String },

    #[error("key '{key}' in registry '{registry}' is already set")]
    AlreadySet { registry: String, key: String },

    #[error("key '{key}' in registry '{registry}' is declared {declared}, not {requested}")]
    KindMismatch {
        registry: String,
        key: String,
        declared: Kind,
        requested: Kind,
    },

    #[error("input for key '{key}' in registry '{registry}' cannot be coerced to {kind}")]
    NotCoercible {
        registry: String,
        key: String,
        kind: Kind,
    },

    #[error("key '{key}' in registry '{registry}' was read before being set")]
    Unset { registry: String, key: String },

    #[error("registry '{registry}' was closed with unset keys: {keys:?}")]
    MissingValues { registry: String, keys: Vec<String> },

    #[error("registry '{registry}' was closed with unread keys: {keys:?}")]
    UnusedValues { registry: String, keys: Vec<String> },
}
