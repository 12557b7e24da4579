//! Duration strings in the `300ms` / `1h30m` format.
//!
//! A duration is a sequence of decimal numbers, each with an optional
//! fraction and a unit suffix. Valid units are `ns`, `us` (or `µs`), `ms`,
//! `s`, `m` and `h`. A bare `0` is also accepted. Negative durations are
//! rejected since nothing in this crate can use them.

use std::time::Duration;

use thiserror::Error;

/// Fraction digits beyond this are ignored.
const MAX_FRACTION_DIGITS: usize = 18;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("empty duration")]
    Empty,

    #[error("negative duration")]
    Negative,

    #[error("invalid number {0:?}")]
    InvalidNumber(String),

    #[error("missing unit after {0:?}")]
    MissingUnit(String),

    #[error("unknown unit {0:?}")]
    UnknownUnit(String),

    #[error("duration out of range")]
    Overflow,
}

/// Parses a duration string such as `"10s"`, `"1.5h"` or `"1h30m"`.
///
/// ```
/// use std::time::Duration;
/// use branch_sweep::config::parse_duration;
///
/// assert_eq!(parse_duration("30s"), Ok(Duration::from_secs(30)));
/// assert_eq!(parse_duration("1h30m"), Ok(Duration::from_secs(5400)));
/// assert_eq!(parse_duration("5ms"), Ok(Duration::from_millis(5)));
/// assert!(parse_duration("30").is_err());
/// ```
pub fn parse_duration(input: &str) -> Result<Duration, DurationError> {
    let mut rest = input.strip_prefix('+').unwrap_or(input);
    if rest.starts_with('-') {
        return Err(DurationError::Negative);
    }
    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(DurationError::Empty);
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(number_len);

        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_len);

        if number.is_empty() {
            return Err(DurationError::InvalidNumber(rest.to_string()));
        }
        let unit_nanos = unit_nanos(number, unit)?;

        total = total
            .checked_add(component_nanos(number, unit_nanos)?)
            .ok_or(DurationError::Overflow)?;
        rest = tail;
    }

    let nanos = u64::try_from(total).map_err(|_| DurationError::Overflow)?;
    Ok(Duration::from_nanos(nanos))
}

fn unit_nanos(number: &str, unit: &str) -> Result<u128, DurationError> {
    match unit {
        "ns" => Ok(1),
        "us" | "µs" | "μs" => Ok(1_000),
        "ms" => Ok(1_000_000),
        "s" => Ok(1_000_000_000),
        "m" => Ok(60_000_000_000),
        "h" => Ok(3_600_000_000_000),
        "" => Err(DurationError::MissingUnit(number.to_string())),
        other => Err(DurationError::UnknownUnit(other.to_string())),
    }
}

/// `number` (digits with at most one `.`) scaled by `unit_nanos`.
fn component_nanos(number: &str, unit_nanos: u128) -> Result<u128, DurationError> {
    let invalid = || DurationError::InvalidNumber(number.to_string());

    let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
    if (whole.is_empty() && fraction.is_empty()) || fraction.contains('.') {
        return Err(invalid());
    }

    let whole: u128 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| DurationError::Overflow)?
    };

    let fraction = &fraction[..fraction.len().min(MAX_FRACTION_DIGITS)];
    let fraction_nanos = if fraction.is_empty() {
        0
    } else {
        let digits: u128 = fraction.parse().map_err(|_| invalid())?;
        digits * unit_nanos / 10u128.pow(fraction.len() as u32)
    };

    whole
        .checked_mul(unit_nanos)
        .and_then(|n| n.checked_add(fraction_nanos))
        .ok_or(DurationError::Overflow)
}
