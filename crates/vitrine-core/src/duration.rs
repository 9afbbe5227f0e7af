//! Duration strings as written in legacy configuration files.
//!
//! Accepts a signed sequence of decimal numbers, each with an optional fraction
//! and a unit suffix: `300ms`, `1.5h`, `2h45m`, `-1m`. A bare `0` is allowed.

use chrono::TimeDelta;

const UNITS: &[(&str, i128)] = &[
    ("ns", 1),
    ("us", 1_000),
    ("µs", 1_000),
    ("μs", 1_000),
    ("ms", 1_000_000),
    ("s", 1_000_000_000),
    ("m", 60 * 1_000_000_000),
    ("h", 3_600 * 1_000_000_000),
];

fn unit_nanos(unit: &str) -> Option<i128> {
    UNITS
        .iter()
        .find(|(name, _)| *name == unit)
        .map(|(_, nanos)| *nanos)
}

/// Parse a duration string into a signed `TimeDelta`.
///
/// The error is a short human-readable reason; callers attach the location context.
pub fn parse_duration(input: &str) -> Result<TimeDelta, String> {
    let (negative, mut rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    if rest == "0" {
        return Ok(TimeDelta::zero());
    }
    if rest.is_empty() {
        return Err("empty duration".to_string());
    }

    let mut total: i128 = 0;
    while !rest.is_empty() {
        let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let (int_part, after_int) = rest.split_at(int_len);

        let (frac_part, after_number) = match after_int.strip_prefix('.') {
            Some(after_dot) => {
                let frac_len = after_dot.bytes().take_while(u8::is_ascii_digit).count();
                after_dot.split_at(frac_len)
            }
            None => ("", after_int),
        };

        if int_part.is_empty() && frac_part.is_empty() {
            return Err(format!("invalid duration {:?}", input));
        }

        let unit_len = after_number
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(after_number.len());
        let (unit, remaining) = after_number.split_at(unit_len);
        if unit.is_empty() {
            return Err(format!("missing unit in duration {:?}", input));
        }
        let scale =
            unit_nanos(unit).ok_or_else(|| format!("unknown unit {:?} in duration {:?}", unit, input))?;

        let whole: i128 = if int_part.is_empty() {
            0
        } else {
            int_part
                .parse()
                .map_err(|_| format!("invalid duration {:?}", input))?
        };
        let mut value = whole
            .checked_mul(scale)
            .ok_or_else(|| format!("invalid duration {:?}", input))?;

        if !frac_part.is_empty() {
            // Digits past the unit's resolution cannot contribute.
            let mut place = scale;
            for digit in frac_part.bytes() {
                place /= 10;
                if place == 0 {
                    break;
                }
                value += i128::from(digit - b'0') * place;
            }
        }

        total = total
            .checked_add(value)
            .filter(|t| *t <= i128::from(i64::MAX))
            .ok_or_else(|| format!("invalid duration {:?}", input))?;
        rest = remaining;
    }

    let nanos = i64::try_from(total).map_err(|_| format!("invalid duration {:?}", input))?;
    let delta = TimeDelta::nanoseconds(nanos);
    Ok(if negative { -delta } else { delta })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_units() {
        assert_eq!(parse_duration("300ms").unwrap(), TimeDelta::milliseconds(300));
        assert_eq!(parse_duration("720h").unwrap(), TimeDelta::hours(720));
        assert_eq!(parse_duration("45s").unwrap(), TimeDelta::seconds(45));
        assert_eq!(parse_duration("10us").unwrap(), TimeDelta::microseconds(10));
        assert_eq!(parse_duration("10µs").unwrap(), TimeDelta::microseconds(10));
        assert_eq!(parse_duration("7ns").unwrap(), TimeDelta::nanoseconds(7));
    }

    #[test]
    fn parses_compound_and_fractional() {
        assert_eq!(
            parse_duration("2h45m").unwrap(),
            TimeDelta::hours(2) + TimeDelta::minutes(45)
        );
        assert_eq!(parse_duration("1.5h").unwrap(), TimeDelta::minutes(90));
        assert_eq!(parse_duration(".5s").unwrap(), TimeDelta::milliseconds(500));
        assert_eq!(parse_duration("1.s").unwrap(), TimeDelta::seconds(1));
    }

    #[test]
    fn parses_signs_and_zero() {
        assert_eq!(parse_duration("-1m").unwrap(), TimeDelta::minutes(-1));
        assert_eq!(parse_duration("+1m").unwrap(), TimeDelta::minutes(1));
        assert_eq!(parse_duration("0").unwrap(), TimeDelta::zero());
        assert_eq!(parse_duration("-0").unwrap(), TimeDelta::zero());
    }

    #[test]
    fn rejects_malformed_input() {
        for bad in ["", "-", "h", "12", "5x", "1h30", ".s", "1d", "abc"] {
            assert!(parse_duration(bad).is_err(), "{:?} should be rejected", bad);
        }
    }

    #[test]
    fn rejects_overflow() {
        assert!(parse_duration("9999999999999h").is_err());
    }
}
