//! Period code -> `YYYY-MM` key.
//!
//! e-Stat encodes monthly periods as `YYYY00MMDD`-style codes: year in
//! characters 1-4, a reserved two-digit field, month in characters 7-8.
//! Keys stored by earlier runs were produced by slicing those fixed offsets, so
//! valid codes must keep mapping to exactly the same key.

/// Normalize a period code such as `"2025000404"` into `"2025-04"`.
///
/// Returns `None` when the code is too short or the year/month slices are not
/// ASCII digits.
pub fn normalize_time_key(code: &str) -> Option<String> {
    let year = code.get(0..4)?;
    let month = code.get(6..8)?;
    let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !(digits(year) && digits(month)) {
        return None;
    }
    Some(format!("{year}-{month}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_year_and_month() {
        assert_eq!(normalize_time_key("2025000404").as_deref(), Some("2025-04"));
        assert_eq!(normalize_time_key("2020001201").as_deref(), Some("2020-12"));
    }

    #[test]
    fn ignores_reserved_field_and_trailing_digits() {
        assert_eq!(normalize_time_key("19991107").as_deref(), Some("1999-07"));
        assert_eq!(normalize_time_key("2024990199").as_deref(), Some("2024-01"));
    }

    #[test]
    fn rejects_short_or_non_numeric_codes() {
        assert_eq!(normalize_time_key(""), None);
        assert_eq!(normalize_time_key("2025004"), None);
        assert_eq!(normalize_time_key("abcd00ef00"), None);
        // Multibyte text must not panic on slicing.
        assert_eq!(normalize_time_key("２０２５年４月"), None);
    }
}
