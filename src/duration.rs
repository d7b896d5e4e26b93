//! Textual durations: `300ms`, `1.5s`, `1h30m`.
//!
//! Whole-number groups are parsed by [`humantime`]. On top of that this
//! module accepts the bare literal `0`, the `µs` / `μs` spellings of
//! microseconds and decimal fractions within a group (`1.5s`, `.5ms`), and it
//! rejects negative durations as out of range.

use std::time::Duration;

use humantime::DurationError;

use crate::error::ValueError;

fn from_humantime(err: DurationError) -> ValueError {
    match err {
        DurationError::NumberOverflow => ValueError::Range,
        _ => ValueError::Syntax,
    }
}

pub fn parse(token: &str) -> Result<Duration, ValueError> {
    let (negative, rest) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token.strip_prefix('+').unwrap_or(token)),
    };
    if rest == "0" {
        return Ok(Duration::ZERO);
    }

    let rest = rest.replace(['µ', 'μ'], "u");
    let total = if rest.contains('.') {
        parse_fractional(&rest)?
    } else {
        humantime::parse_duration(&rest).map_err(from_humantime)?
    };

    if negative && !total.is_zero() {
        return Err(ValueError::Range);
    }
    Ok(total)
}

fn digits_end(s: &str) -> usize {
    s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len())
}

/// `<whole>[.<fraction>]<unit>` groups, with the unit's length taken from
/// humantime.
fn parse_fractional(mut rest: &str) -> Result<Duration, ValueError> {
    let mut nanos: u128 = 0;
    while !rest.is_empty() {
        let (whole, tail) = rest.split_at(digits_end(rest));
        let (fraction, tail) = match tail.strip_prefix('.') {
            Some(after_dot) => after_dot.split_at(digits_end(after_dot)),
            None => ("", tail),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(ValueError::Syntax);
        }
        let unit_end = tail
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_end);
        if unit.is_empty() || !unit.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValueError::Syntax);
        }
        let scale = humantime::parse_duration(&format!("1{unit}"))
            .map_err(from_humantime)?
            .as_nanos();

        let whole: u128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| ValueError::Range)?
        };
        let mut group = whole.checked_mul(scale).ok_or(ValueError::Range)?;
        // digits past 18 are below nanosecond resolution for every unit
        let fraction = &fraction[..fraction.len().min(18)];
        if !fraction.is_empty() {
            let numerator: u128 = fraction.parse().map_err(|_| ValueError::Syntax)?;
            group += numerator * scale / 10u128.pow(fraction.len() as u32);
        }
        nanos = nanos.checked_add(group).ok_or(ValueError::Range)?;
        rest = tail;
    }

    let secs = u64::try_from(nanos / 1_000_000_000).map_err(|_| ValueError::Range)?;
    Ok(Duration::new(secs, (nanos % 1_000_000_000) as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_units() {
        assert_eq!(parse("10ms").unwrap(), Duration::from_millis(10));
        assert_eq!(parse("3s").unwrap(), Duration::from_secs(3));
        assert_eq!(parse("2m").unwrap(), Duration::from_secs(120));
        assert_eq!(parse("1h").unwrap(), Duration::from_secs(3600));
        assert_eq!(parse("7us").unwrap(), Duration::from_micros(7));
        assert_eq!(parse("7µs").unwrap(), Duration::from_micros(7));
        assert_eq!(parse("15ns").unwrap(), Duration::from_nanos(15));
    }

    #[test]
    fn parses_compound_and_fractional() {
        assert_eq!(parse("1h30m").unwrap(), Duration::from_secs(5400));
        assert_eq!(parse("1.5s").unwrap(), Duration::from_millis(1500));
        assert_eq!(parse(".5ms").unwrap(), Duration::from_micros(500));
        assert_eq!(parse("1m0.25s").unwrap(), Duration::from_millis(60_250));
    }

    #[test]
    fn bare_zero_needs_no_unit() {
        assert_eq!(parse("0").unwrap(), Duration::ZERO);
        assert_eq!(parse("-0").unwrap(), Duration::ZERO);
    }

    #[test]
    fn rejects_malformed() {
        assert_eq!(parse(""), Err(ValueError::Syntax));
        assert_eq!(parse("10"), Err(ValueError::Syntax));
        assert_eq!(parse("ms"), Err(ValueError::Syntax));
        assert_eq!(parse("5parsecs"), Err(ValueError::Syntax));
        assert_eq!(parse("1.s.5"), Err(ValueError::Syntax));
        assert_eq!(parse("1.5 s"), Err(ValueError::Syntax));
    }

    #[test]
    fn negative_is_out_of_range() {
        assert_eq!(parse("-5s"), Err(ValueError::Range));
        assert_eq!(parse("-1.5s"), Err(ValueError::Range));
    }

    #[test]
    fn formatted_defaults_parse_back() {
        for d in [
            Duration::from_millis(50),
            Duration::from_millis(1500),
            Duration::from_secs(3723),
            Duration::from_micros(42),
        ] {
            let text = humantime::format_duration(d).to_string();
            assert_eq!(parse(&text).unwrap(), d, "{text}");
        }
    }
}
