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

/// Zero-padded two-digit step number from a zero-based index.
///
/// Usage in templates: `{{ loop.index0|step_number }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn step_number(index: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let number = index.to_string().parse::<usize>().map_or(0, |i| i + 1);
    Ok(format!("{number:02}"))
}
