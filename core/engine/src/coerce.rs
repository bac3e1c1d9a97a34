//! FILENAME: core/engine/src/coerce.rs
//! PURPOSE: Type inference for text cells (text -> boolean / number).
//! CONTEXT: Used by the convert-types stage on data rows only. Booleans are
//! checked before numbers, and only text whose trimmed form parses completely
//! as a finite number becomes a number ("12abc", "NaN" and "inf" stay text).

use crate::cell::CellValue;

/// Returns the coerced value, or None when the cell should stay as it is.
pub fn coerce(value: &CellValue) -> Option<CellValue> {
    let text = value.as_text()?;
    let trimmed = text.trim();

    if trimmed.eq_ignore_ascii_case("true") {
        return Some(CellValue::Boolean(true));
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Some(CellValue::Boolean(false));
    }

    parse_number(trimmed).map(CellValue::Number)
}

/// Parses a complete, finite number. Empty input is never a number.
pub fn parse_number(text: &str) -> Option<f64> {
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booleans_any_case() {
        assert_eq!(coerce(&"true".into()), Some(CellValue::Boolean(true)));
        assert_eq!(coerce(&"FALSE".into()), Some(CellValue::Boolean(false)));
        assert_eq!(coerce(&" True ".into()), Some(CellValue::Boolean(true)));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(coerce(&"42".into()), Some(CellValue::Number(42.0)));
        assert_eq!(coerce(&"4.5".into()), Some(CellValue::Number(4.5)));
        assert_eq!(coerce(&" -7 ".into()), Some(CellValue::Number(-7.0)));
        assert_eq!(coerce(&"1e3".into()), Some(CellValue::Number(1000.0)));
    }

    #[test]
    fn test_partial_and_non_finite_stay_text() {
        assert_eq!(coerce(&"12abc".into()), None);
        assert_eq!(coerce(&"NaN".into()), None);
        assert_eq!(coerce(&"inf".into()), None);
        assert_eq!(coerce(&"abc".into()), None);
    }

    #[test]
    fn test_blank_is_never_coerced() {
        assert_eq!(coerce(&"".into()), None);
        assert_eq!(coerce(&"   ".into()), None);
        assert_eq!(coerce(&CellValue::Empty), None);
    }

    #[test]
    fn test_non_text_untouched() {
        assert_eq!(coerce(&CellValue::Number(1.0)), None);
        assert_eq!(coerce(&CellValue::Boolean(true)), None);
    }
}
