// SPDX-License-Identifier: Apache-2.0

use chrono::{NaiveDate, NaiveDateTime};

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

pub(crate) fn parse_decimal(raw: &str) -> Result<Option<f64>, String> {
    if raw.is_empty() {
        return Ok(None);
    }
    let value: f64 = raw
        .parse()
        .map_err(|_| format!("invalid number `{raw}`"))?;
    if !value.is_finite() {
        return Err(format!("non-finite number `{raw}`"));
    }
    Ok(Some(value))
}

/// Integers, also accepting an integral decimal such as `15.0`.
pub(crate) fn parse_integer(raw: &str) -> Result<Option<i64>, String> {
    if raw.is_empty() {
        return Ok(None);
    }
    if let Ok(value) = raw.parse::<i64>() {
        return Ok(Some(value));
    }
    match parse_decimal(raw) {
        Ok(Some(value))
            if value.fract() == 0.0 && value >= i64::MIN as f64 && value <= i64::MAX as f64 =>
        {
            Ok(Some(value as i64))
        }
        _ => Err(format!("invalid integer `{raw}`")),
    }
}

pub(crate) fn parse_count(raw: &str) -> Result<Option<u64>, String> {
    match parse_integer(raw)? {
        Some(value) if value < 0 => Err(format!("count must not be negative: `{raw}`")),
        Some(value) => Ok(Some(value as u64)),
        None => Ok(None),
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<Option<NaiveDate>, String> {
    if raw.is_empty() {
        return Ok(None);
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Ok(Some(date));
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(at) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(Some(at.date()));
        }
    }
    Err(format!("invalid date `{raw}`"))
}

pub(crate) fn parse_flag(raw: &str) -> Result<bool, String> {
    match raw.to_lowercase().as_str() {
        "" | "false" | "0" | "no" | "n" | "não" | "nao" => Ok(false),
        "true" | "1" | "yes" | "y" | "sim" | "s" => Ok(true),
        _ => Err(format!("invalid flag `{raw}`")),
    }
}
