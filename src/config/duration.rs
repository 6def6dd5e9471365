//! `--conn-max-lifetime` values.

use anyhow::Context;
use std::time::Duration;

/// Accepted unit suffixes and their length in seconds. A bare number is seconds.
const UNITS: &[(char, u64)] = &[('s', 1), ('m', 60), ('h', 3600)];

/// Parse `100`, `100s`, `30m` or `1h` into a [`Duration`].
pub fn parse_duration(s: &str) -> anyhow::Result<Duration> {
    let s = s.trim();
    if s.is_empty() {
        anyhow::bail!("empty duration");
    }

    let (number, unit) = match UNITS.iter().find(|(suffix, _)| s.ends_with(*suffix)) {
        Some((_, unit)) => (&s[..s.len() - 1], *unit),
        None => (s, 1),
    };
    let count: u64 = number
        .parse()
        .with_context(|| format!("invalid duration '{s}'"))?;
    let secs = count
        .checked_mul(unit)
        .with_context(|| format!("duration '{s}' is too large"))?;
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units() {
        let cases = [
            ("100", 100),
            ("100s", 100),
            ("30m", 1800),
            ("1h", 3600),
            (" 42 ", 42),
        ];
        for (input, secs) in cases {
            assert_eq!(
                parse_duration(input).unwrap(),
                Duration::from_secs(secs),
                "{input}"
            );
        }
    }

    #[test]
    fn test_malformed_durations() {
        for input in ["", "   ", "abc", "-5s", "1.5h", "h", "10d", "5 m"] {
            assert!(parse_duration(input).is_err(), "{input}");
        }
    }

    #[test]
    fn test_overflowing_duration() {
        let err = parse_duration(&format!("{}h", u64::MAX)).unwrap_err();
        assert!(err.to_string().contains("too large"), "{err}");
        assert_eq!(
            parse_duration(&format!("{}s", u64::MAX)).unwrap(),
            Duration::from_secs(u64::MAX)
        );
    }
}
