//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Formats listing price text as yuan.
///
/// Usage in templates: `{{ card.price|yuan }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn yuan(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format_yuan(&value.to_string()))
}

fn format_yuan(price: &str) -> String {
    format!("¥{}", price.trim())
}

/// Returns the content hash for main.css.
///
/// The hash is computed at build time from the CSS file content.
///
/// Usage in templates: `{{ ""|css_hash }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn css_hash(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<&'static str> {
    Ok(env!("CSS_HASH"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_yuan() {
        assert_eq!(format_yuan("35"), "¥35");
        assert_eq!(format_yuan(" 12.50 "), "¥12.50");
    }
}
