//! Conversion between Excel's 1900-based serial date system and
//! [`chrono::NaiveDate`]/[`chrono::NaiveDateTime`].
//!
//! Excel treats 1900 as a leap year (it was not), a historical bug
//! preserved for compatibility with Lotus 1-2-3. Serial day 60 therefore
//! maps to the fictitious 1900-02-29; every serial from 61 onward is one
//! day ahead of what a proleptic Gregorian calendar would compute. The
//! epoch used here is 1899-12-30, which absorbs that offset so that
//! serial 1 lands on 1900-01-01 and serial 60 lands on the fictitious date.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::error::{Error, Result};

/// Day zero of the Excel serial date system.
fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 30).expect("valid constant date")
}

/// Convert an Excel serial date number to a [`NaiveDateTime`].
///
/// The integer part is the day count from the epoch; the fractional part
/// is the time of day.
pub fn serial_to_datetime(serial: f64) -> Result<NaiveDateTime> {
    if !serial.is_finite() {
        return Err(Error::InvalidFormat(format!("non-finite date serial: {serial}")));
    }

    let days = serial.trunc() as i64;
    let frac = serial.fract().abs();

    let date = epoch()
        .checked_add_signed(chrono::Duration::days(days))
        .ok_or_else(|| Error::InvalidFormat(format!("date serial out of range: {serial}")))?;

    let seconds_in_day = (frac * 86_400.0).round() as u32;
    let time = NaiveTime::from_num_seconds_from_midnight_opt(seconds_in_day.min(86_399), 0)
        .ok_or_else(|| Error::InvalidFormat(format!("invalid time fraction in serial: {serial}")))?;

    Ok(NaiveDateTime::new(date, time))
}

/// Convert a [`NaiveDateTime`] to an Excel serial date number.
pub fn datetime_to_serial(dt: NaiveDateTime) -> f64 {
    let days = (dt.date() - epoch()).num_days() as f64;
    let seconds = dt.time().num_seconds_from_midnight() as f64;
    days + seconds / 86_400.0
}

/// Convert an Excel serial date number to a [`NaiveDate`], truncating any
/// time-of-day component.
pub fn serial_to_date(serial: f64) -> Result<NaiveDate> {
    Ok(serial_to_datetime(serial)?.date())
}

/// Convert a [`NaiveDate`] to an Excel serial date number (whole days).
pub fn date_to_serial(date: NaiveDate) -> f64 {
    (date - epoch()).num_days() as f64
}
