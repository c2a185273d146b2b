//! Priority score parsing and severity tiers.

/// Visual severity derived from a finding's priority score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PriorityTier {
    /// Score of 9 or more.
    Critical,
    /// Score of 7 or 8.
    Warning,
    /// Anything lower, including scores that do not parse.
    Normal,
}

impl PriorityTier {
    /// Classify a raw priority score string.
    pub fn from_score(score: &str) -> Self {
        match parse_priority_score(score) {
            Some(value) if value >= 9 => Self::Critical,
            Some(value) if value >= 7 => Self::Warning,
            _ => Self::Normal,
        }
    }

    /// Short name shown next to the card heading.
    pub fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::Warning => "Warning",
            Self::Normal => "Normal",
        }
    }
}

/// Parse the leading integer of a priority score.
///
/// Leading whitespace and a single sign are accepted. A `0x`/`0X` prefix
/// reads hex digits; otherwise decimal digits are read up to the first
/// non-digit (`"8/10"` is 8, `"9.5"` is 9). Returns `None` when no digit
/// follows. Out-of-range values saturate.
pub fn parse_priority_score(score: &str) -> Option<i64> {
    let trimmed = score.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let (radix, digits) = match unsigned.get(..2) {
        Some("0x" | "0X") => (16, &unsigned[2..]),
        _ => (10, unsigned),
    };
    let value = leading_digits_value(digits, radix)?;
    Some(if negative { -value } else { value })
}

fn leading_digits_value(digits: &str, radix: u32) -> Option<i64> {
    let mut value: i64 = 0;
    let mut seen_digit = false;
    for digit in digits.chars().map_while(|ch| ch.to_digit(radix)) {
        seen_digit = true;
        value = value
            .saturating_mul(i64::from(radix))
            .saturating_add(i64::from(digit));
    }
    seen_digit.then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_follow_thresholds() {
        assert_eq!(PriorityTier::from_score("9"), PriorityTier::Critical);
        assert_eq!(PriorityTier::from_score("10"), PriorityTier::Critical);
        assert_eq!(PriorityTier::from_score("7"), PriorityTier::Warning);
        assert_eq!(PriorityTier::from_score("8"), PriorityTier::Warning);
        assert_eq!(PriorityTier::from_score("6"), PriorityTier::Normal);
        assert_eq!(PriorityTier::from_score("5"), PriorityTier::Normal);
    }

    #[test]
    fn unparsed_scores_are_normal() {
        assert_eq!(PriorityTier::from_score("abc"), PriorityTier::Normal);
        assert_eq!(PriorityTier::from_score(""), PriorityTier::Normal);
        assert_eq!(PriorityTier::from_score("   "), PriorityTier::Normal);
        assert_eq!(PriorityTier::from_score("-"), PriorityTier::Normal);
        assert_eq!(PriorityTier::from_score("high 9"), PriorityTier::Normal);
    }

    #[test]
    fn parses_leading_numeric_prefix() {
        assert_eq!(parse_priority_score("  8/10"), Some(8));
        assert_eq!(parse_priority_score("9.5"), Some(9));
        assert_eq!(parse_priority_score("+7 (high)"), Some(7));
        assert_eq!(parse_priority_score("-3"), Some(-3));
        assert_eq!(parse_priority_score("007"), Some(7));
        assert_eq!(parse_priority_score("x9"), None);
    }

    #[test]
    fn hex_prefix_reads_hex_digits() {
        assert_eq!(parse_priority_score("0x9"), Some(9));
        assert_eq!(parse_priority_score(" 0XA "), Some(10));
        assert_eq!(parse_priority_score("-0x7"), Some(-7));
        assert_eq!(parse_priority_score("0x"), None);
        assert_eq!(parse_priority_score("0xg"), None);
        assert_eq!(PriorityTier::from_score("0x9"), PriorityTier::Critical);
        assert_eq!(PriorityTier::from_score("0x8"), PriorityTier::Warning);
    }

    #[test]
    fn huge_scores_saturate_instead_of_failing() {
        assert_eq!(
            parse_priority_score("99999999999999999999999"),
            Some(i64::MAX)
        );
        assert_eq!(
            PriorityTier::from_score("99999999999999999999999"),
            PriorityTier::Critical
        );
    }
}
