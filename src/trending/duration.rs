//! ISO-8601 durations as reported by `contentDetails.duration`.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ISO_DURATION: Regex = Regex::new(
        r"^P(?:(\d+(?:[.,]\d+)?)W)?(?:(\d+(?:[.,]\d+)?)D)?(?:T(?:(\d+(?:[.,]\d+)?)H)?(?:(\d+(?:[.,]\d+)?)M)?(?:(\d+(?:[.,]\d+)?)S)?)?$"
    )
    .expect("valid duration regex");
}

/// Total seconds in a duration token such as `PT15M33S`.
///
/// Returns 0 for anything that cannot be read: empty or garbage input,
/// a bare `P`/`PT`, or calendar units (years, months) with no fixed length.
/// Any component may carry a fraction (`PT1.5M` is 90); the total is
/// truncated to whole seconds.
pub fn parse_duration(token: &str) -> u64 {
    let token = token.trim();
    let Some(caps) = ISO_DURATION.captures(token) else {
        return 0;
    };

    // "P" and "PT" match the pattern but name no component
    if token == "P" || token.ends_with('T') {
        return 0;
    }

    const UNITS: [(usize, u64); 5] = [(1, 604_800), (2, 86_400), (3, 3_600), (4, 60), (5, 1)];

    let mut total_nanos: u128 = 0;
    for (group, unit) in UNITS {
        if let Some(m) = caps.get(group) {
            let Some(nanos) = component_nanos(m.as_str(), unit) else {
                return 0;
            };
            total_nanos = match total_nanos.checked_add(nanos) {
                Some(t) => t,
                None => return 0,
            };
        }
    }
    u64::try_from(total_nanos / NANOS_PER_SEC).unwrap_or(0)
}

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// `value` units of `unit_secs` each, in nanoseconds. Fraction digits past
/// the ninth are ignored.
fn component_nanos(value: &str, unit_secs: u64) -> Option<u128> {
    let (whole, fraction) = match value.split_once(['.', ',']) {
        Some((whole, fraction)) => (whole, fraction),
        None => (value, ""),
    };

    let whole: u64 = whole.parse().ok()?;
    let unit_nanos = u128::from(unit_secs) * NANOS_PER_SEC;
    let mut nanos = u128::from(whole).checked_mul(unit_nanos)?;

    let digits = &fraction[..fraction.len().min(9)];
    if !digits.is_empty() {
        let numerator: u128 = digits.parse().ok()?;
        let denominator = 10u128.pow(digits.len() as u32);
        nanos = nanos.checked_add(numerator * unit_nanos / denominator)?;
    }
    Some(nanos)
}

/// `H:MM:SS`, hours unbounded.
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{}:{:02}:{:02}", hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed_tokens() {
        assert_eq!(parse_duration("PT15M33S"), 933);
        assert_eq!(parse_duration("PT1H"), 3600);
        assert_eq!(parse_duration("PT45S"), 45);
        assert_eq!(parse_duration("PT1H2M3S"), 3723);
        assert_eq!(parse_duration("P1DT1S"), 86_401);
        assert_eq!(parse_duration("P1W"), 604_800);
        assert_eq!(parse_duration("P0D"), 0);
    }

    #[test]
    fn test_fractional_seconds_truncate() {
        assert_eq!(parse_duration("PT5M0.9S"), 300);
        assert_eq!(parse_duration("PT1,5S"), 1);
    }

    #[test]
    fn test_fractional_larger_units() {
        assert_eq!(parse_duration("PT1.5M"), 90);
        assert_eq!(parse_duration("PT0.5H"), 1800);
        assert_eq!(parse_duration("PT0,7M"), 42);
        assert_eq!(parse_duration("P1.5D"), 129_600);
        assert_eq!(parse_duration("PT4.99M"), 299);
        assert_eq!(parse_duration("PT1.M"), 0);
    }

    #[test]
    fn test_malformed_tokens_yield_zero() {
        for token in ["", "garbage", "P", "PT", "15M33S", "PT15X", "P1Y", "P2M", "PT-5S", "pt5m"] {
            assert_eq!(parse_duration(token), 0, "token {:?}", token);
        }
    }

    #[test]
    fn test_overflow_yields_zero() {
        assert_eq!(parse_duration("PT99999999999999999999S"), 0);
        assert_eq!(parse_duration("P99999999999999W"), 0);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0:00:00");
        assert_eq!(format_duration(933), "0:15:33");
        assert_eq!(format_duration(3600), "1:00:00");
        assert_eq!(format_duration(93_605), "26:00:05");
    }
}
