//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// CSS class for a task priority badge.
///
/// Priority is free text; unknown values get the neutral badge.
///
/// Usage in templates: `{{ task.priority|priority_class }}`
#[askama::filter_fn]
pub fn priority_class(
    priority: impl Display,
    _env: &dyn askama::Values,
) -> askama::Result<&'static str> {
    Ok(priority_css(&priority.to_string()))
}

/// CSS class for a task status badge.
///
/// Usage in templates: `{{ task.status|status_class }}`
#[askama::filter_fn]
pub fn status_class(status: impl Display, _env: &dyn askama::Values) -> askama::Result<&'static str> {
    Ok(match status.to_string().as_str() {
        "assigned" => "badge badge-assigned",
        "in_progress" => "badge badge-progress",
        "review" => "badge badge-review",
        "completed" => "badge badge-completed",
        _ => "badge",
    })
}

fn priority_css(priority: &str) -> &'static str {
    match priority.trim().to_ascii_lowercase().as_str() {
        "high" | "urgent" => "badge badge-high",
        "medium" => "badge badge-medium",
        "low" => "badge badge-low",
        _ => "badge",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_css() {
        assert_eq!(priority_css("High"), "badge badge-high");
        assert_eq!(priority_css("low"), "badge badge-low");
        assert_eq!(priority_css("whenever"), "badge");
    }
}
