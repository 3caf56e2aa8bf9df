//! Time family: bounded epoch-millisecond payloads with three views.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use tracing::debug;
use vouch_types::{Audited, Claim, Presence, Verdict, Violation, Vouched};

use crate::json_kind;

/// Largest accepted epoch-millisecond magnitude: one hundred million days
/// either side of the epoch.
const MAX_EPOCH_MS: i64 = 8_640_000_000_000_000;

const MS_PER_DAY: i64 = 86_400_000;

/// Proleptic Gregorian date for a day count relative to 1970-01-01.
///
/// Era-based conversion over 400-year cycles of 146,097 days; exact over
/// the whole accepted range.
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    // shift the origin to 0000-03-01 so leap days close each cycle
    let shifted = days + 719_468;
    let era = (if shifted >= 0 { shifted } else { shifted - 146_096 }) / 146_097;
    let day_of_era = shifted - era * 146_097;
    let year_of_era =
        (day_of_era - day_of_era / 1_460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let month_point = (5 * day_of_year + 2) / 153;
    let day = day_of_year - (153 * month_point + 2) / 5 + 1;
    let month = if month_point < 10 { month_point + 3 } else { month_point - 9 };
    let year = year_of_era + era * 400 + i64::from(month <= 2);
    (year, month as u32, day as u32)
}

/// An instant on the millisecond timeline.
///
/// Spans the full accepted range of one hundred million days either side
/// of the Unix epoch. The outer reaches of that range exceed what
/// [`DateTime`] can hold, so [`datetime`](Moment::datetime) conversion is
/// optional while [`unix_time`](Moment::unix_time) and
/// [`iso_string`](Moment::iso_string) cover every accepted instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Moment {
    millis: i64,
}

impl Moment {
    /// Epoch milliseconds.
    pub fn unix_time(self) -> i64 {
        self.millis
    }

    /// Convert to a [`chrono`] instant.
    ///
    /// `None` when the instant falls outside the `chrono` calendar range.
    pub fn datetime(self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.millis).single()
    }

    /// ISO-8601 UTC rendering with millisecond precision and `Z` suffix.
    ///
    /// Years outside `0000..=9999` render in expanded form, a sign plus
    /// six digits: `+275760-09-13T00:00:00.000Z` at the upper bound.
    pub fn iso_string(self) -> String {
        let (year, month, day) = civil_from_days(self.millis.div_euclid(MS_PER_DAY));
        let in_day = self.millis.rem_euclid(MS_PER_DAY);
        let hour = in_day / 3_600_000;
        let minute = in_day / 60_000 % 60;
        let second = in_day / 1_000 % 60;
        let milli = in_day % 1_000;
        let clock = format!("{hour:02}:{minute:02}:{second:02}.{milli:03}");
        if (0..=9_999).contains(&year) {
            format!("{year:04}-{month:02}-{day:02}T{clock}Z")
        } else {
            let sign = if year < 0 { '-' } else { '+' };
            format!("{sign}{:06}-{month:02}-{day:02}T{clock}Z", year.unsigned_abs())
        }
    }
}

fn vet_time(raw: Value) -> Verdict<Moment> {
    let reading = match raw {
        Value::Number(number) => match number.as_f64() {
            Some(value) if value.is_finite() => value,
            _ => {
                debug!("Time claim settling absent: no finite millisecond reading");
                return Verdict::Invalid;
            }
        },
        other => {
            debug!(
                kind = json_kind(&other),
                "Time claim settling absent: input is not a number"
            );
            return Verdict::Invalid;
        }
    };
    // the range gate sees the raw reading; truncation comes after
    if reading.abs() > MAX_EPOCH_MS as f64 {
        debug!(
            millis = reading,
            "Time claim settling absent: epoch milliseconds out of range"
        );
        return Verdict::Invalid;
    }
    // fractional milliseconds truncate toward zero
    Verdict::Valid(Moment {
        millis: reading.trunc() as i64,
    })
}

/// Consuming read surface of time wrappers.
///
/// [`date`](TimeValue::date), [`unix_time`](TimeValue::unix_time) and
/// [`iso_string`](TimeValue::iso_string) are three views of one consuming
/// read and share a single usage event.
pub trait TimeValue: Audited {
    /// Consume the payload as a structured instant.
    fn date(&self) -> Result<Moment, Violation>;

    /// Epoch milliseconds, truncated to integer.
    fn unix_time(&self) -> Result<i64, Violation> {
        Ok(self.date()?.unix_time())
    }

    /// ISO-8601 UTC rendering with millisecond precision and `Z` suffix.
    fn iso_string(&self) -> Result<String, Violation> {
        Ok(self.date()?.iso_string())
    }
}

/// Possibly-absent instant built from an untyped epoch-millisecond input.
///
/// Rejected inputs settle absent: non-numbers, non-finite readings, and
/// values beyond the fixed millisecond range. Every in-range instant is
/// kept, including those past the [`DateTime`] conversion window.
#[derive(Debug)]
pub struct NullableTime {
    claim: Claim<Moment>,
}

impl NullableTime {
    pub fn new(raw: impl Into<Value>) -> Self {
        Self {
            claim: Claim::from_verdict(vet_time(raw.into())),
        }
    }
}

impl Audited for NullableTime {
    fn finish(&self) -> Result<(), Violation> {
        self.claim.finish()
    }
}

impl Presence for NullableTime {
    fn is_null(&self) -> bool {
        self.claim.is_null()
    }

    fn is_not_null(&self) -> bool {
        self.claim.is_not_null()
    }
}

impl TimeValue for NullableTime {
    fn date(&self) -> Result<Moment, Violation> {
        self.claim.consume().copied()
    }
}

/// The current instant, captured at construction; always present, use
/// still audited.
#[derive(Debug)]
pub struct NowTime {
    vouched: Vouched<Moment>,
}

impl NowTime {
    pub fn new() -> Self {
        Self {
            vouched: Vouched::new(Moment {
                millis: Utc::now().timestamp_millis(),
            }),
        }
    }
}

impl Default for NowTime {
    fn default() -> Self {
        Self::new()
    }
}

impl Audited for NowTime {
    fn finish(&self) -> Result<(), Violation> {
        self.vouched.finish()
    }
}

impl TimeValue for NowTime {
    fn date(&self) -> Result<Moment, Violation> {
        Ok(*self.vouched.consume())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::SecondsFormat;
    use serde_json::json;

    #[test]
    fn epoch_zero_settles_present_with_canonical_views() {
        let wrapped = NullableTime::new(0);
        assert!(wrapped.is_not_null());
        assert_eq!(wrapped.unix_time(), Ok(0));
        assert_eq!(wrapped.iso_string(), Ok("1970-01-01T00:00:00.000Z".to_owned()));
        assert_eq!(wrapped.finish(), Ok(()));
    }

    #[test]
    fn negative_epochs_are_valid_instants() {
        let wrapped = NullableTime::new(-86_400_000);
        assert!(wrapped.is_not_null());
        assert_eq!(wrapped.unix_time(), Ok(-86_400_000));
        assert_eq!(wrapped.iso_string(), Ok("1969-12-31T00:00:00.000Z".to_owned()));
    }

    #[test]
    fn fractional_milliseconds_truncate_toward_zero() {
        let wrapped = NullableTime::new(123.9999999999);
        assert!(wrapped.is_not_null());
        assert_eq!(wrapped.unix_time(), Ok(123));

        let negative = NullableTime::new(-0.75);
        assert!(negative.is_not_null());
        assert_eq!(negative.unix_time(), Ok(0));
    }

    #[test]
    fn out_of_range_milliseconds_settle_absent() {
        for raw in [
            json!(8_640_000_000_000_001i64),
            json!(-8_640_000_000_000_001i64),
        ] {
            let wrapped = NullableTime::new(raw);
            assert!(wrapped.is_null());
        }
    }

    #[test]
    fn boundary_instants_settle_present_with_exact_readings() {
        let upper = NullableTime::new(8_640_000_000_000_000i64);
        assert!(upper.is_not_null());
        assert_eq!(upper.unix_time(), Ok(8_640_000_000_000_000));
        assert_eq!(upper.iso_string(), Ok("+275760-09-13T00:00:00.000Z".to_owned()));
        assert_eq!(upper.finish(), Ok(()));

        let lower = NullableTime::new(-8_640_000_000_000_000i64);
        assert!(lower.is_not_null());
        assert_eq!(lower.unix_time(), Ok(-8_640_000_000_000_000));
        assert_eq!(lower.iso_string(), Ok("-271821-04-20T00:00:00.000Z".to_owned()));
        assert_eq!(lower.finish(), Ok(()));
    }

    #[test]
    fn instants_past_the_datetime_window_still_read_in_full() {
        // in range for the millisecond gate, out of range for `DateTime`
        let late = NullableTime::new(8_300_000_000_000_000i64);
        assert!(late.is_not_null());
        assert_eq!(late.unix_time(), Ok(8_300_000_000_000_000));
        let instant = late.date().unwrap();
        assert_eq!(instant.datetime(), None);
        assert!(instant.iso_string().starts_with('+'));

        let early = NullableTime::new(-8_300_000_000_000_000i64);
        assert!(early.is_not_null());
        assert_eq!(early.unix_time(), Ok(-8_300_000_000_000_000));
        let instant = early.date().unwrap();
        assert_eq!(instant.datetime(), None);
        assert!(instant.iso_string().starts_with('-'));
    }

    #[test]
    fn iso_rendering_switches_to_expanded_years_outside_four_digits() {
        let last_four_digit = NullableTime::new(253_402_300_799_999i64);
        assert!(last_four_digit.is_not_null());
        assert_eq!(
            last_four_digit.iso_string(),
            Ok("9999-12-31T23:59:59.999Z".to_owned())
        );

        let first_five_digit = NullableTime::new(253_402_300_800_000i64);
        assert!(first_five_digit.is_not_null());
        assert_eq!(
            first_five_digit.iso_string(),
            Ok("+010000-01-01T00:00:00.000Z".to_owned())
        );

        let year_zero = NullableTime::new(-62_167_219_200_000i64);
        assert!(year_zero.is_not_null());
        assert_eq!(year_zero.iso_string(), Ok("0000-01-01T00:00:00.000Z".to_owned()));

        let before_year_zero = NullableTime::new(-62_167_219_200_001i64);
        assert!(before_year_zero.is_not_null());
        assert_eq!(
            before_year_zero.iso_string(),
            Ok("-000001-12-31T23:59:59.999Z".to_owned())
        );
    }

    #[test]
    fn datetime_conversion_agrees_inside_the_calendar_window() {
        let wrapped = NullableTime::new(1_700_000_000_000i64);
        assert!(wrapped.is_not_null());
        let instant = wrapped.date().unwrap();
        let converted = instant.datetime().unwrap();
        assert_eq!(converted.timestamp_millis(), instant.unix_time());
        assert_eq!(
            converted.to_rfc3339_opts(SecondsFormat::Millis, true),
            instant.iso_string()
        );
    }

    #[test]
    fn non_numeric_input_settles_absent() {
        for raw in [json!("0"), json!(null), json!(true)] {
            let wrapped = NullableTime::new(raw);
            assert!(wrapped.is_null());
        }
    }

    #[test]
    fn three_views_share_one_consumption() {
        let wrapped = NullableTime::new(1_700_000_000_000i64);
        assert!(wrapped.is_not_null());
        let instant = wrapped.date().unwrap();
        assert_eq!(wrapped.unix_time(), Ok(instant.unix_time()));
        assert!(wrapped.iso_string().unwrap().ends_with('Z'));
        assert_eq!(wrapped.finish(), Ok(()));
    }

    #[test]
    fn discipline_applies_before_and_after_verification() {
        let wrapped = NullableTime::new(5);
        assert_eq!(wrapped.unix_time(), Err(Violation::UnverifiedAccess));
        assert!(wrapped.is_not_null());
        assert_eq!(wrapped.unix_time(), Ok(5));

        let absent = NullableTime::new("not millis");
        assert!(absent.is_null());
        assert_eq!(absent.date().map(|_| ()), Err(Violation::NullValueAccess));
    }

    #[test]
    fn now_time_views_agree_and_audit() {
        let now = NowTime::new();
        let instant = now.date().unwrap();
        assert!(instant.datetime().is_some());
        assert_eq!(now.unix_time(), Ok(instant.unix_time()));
        let iso = now.iso_string().unwrap();
        assert!(iso.ends_with('Z') && iso.contains('T'));
        assert_eq!(now.finish(), Ok(()));
    }

    #[test]
    fn unused_now_time_fails_the_audit() {
        let now = NowTime::default();
        assert_eq!(now.finish(), Err(Violation::UnusedPresentValue));
    }
}
