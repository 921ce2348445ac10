use rust_decimal::Decimal;
use std::str::FromStr;

/// Placeholder shown for missing text fields.
pub const NOT_AVAILABLE: &str = "N/A";

/// Coerce a numeric string from a hosted table. Tolerates surrounding
/// whitespace, thousands separators, a leading `$` and a trailing `%`.
/// Anything else unparseable, including "N/A", becomes `None`.
pub fn parse_decimal(raw: Option<&str>) -> Option<Decimal> {
    let cleaned: String = raw?
        .trim()
        .trim_start_matches('$')
        .trim_end_matches('%')
        .chars()
        .filter(|c| *c != ',')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
}

pub fn text_or_na(raw: Option<&str>) -> String {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal_variants() {
        assert_eq!(parse_decimal(Some(" 1.25 ")), Some(Decimal::new(125, 2)));
        assert_eq!(parse_decimal(Some("$1,200.50")), Some(Decimal::new(120050, 2)));
        assert_eq!(parse_decimal(Some("3.4%")), Some(Decimal::new(34, 1)));
        assert_eq!(parse_decimal(Some("1.5e3")), Some(Decimal::from(1500)));
        assert_eq!(parse_decimal(Some("N/A")), None);
        assert_eq!(parse_decimal(Some("")), None);
        assert_eq!(parse_decimal(None), None);
    }

    #[test]
    fn test_text_or_na() {
        assert_eq!(text_or_na(Some("Coca-Cola")), "Coca-Cola");
        assert_eq!(text_or_na(Some("   ")), NOT_AVAILABLE);
        assert_eq!(text_or_na(None), NOT_AVAILABLE);
    }
}
