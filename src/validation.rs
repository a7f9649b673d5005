use crate::constants::*;
use crate::error::AppError;

/// Validate a tracking window in days. Out-of-range values are
/// rejected, never clamped.
pub fn validate_tracking_days(days: i64) -> Result<u32, AppError> {
    if !(MIN_TRACKING_DAYS..=MAX_TRACKING_DAYS).contains(&days) {
        return Err(AppError::OutOfRange {
            field: "tracking_days",
            min: MIN_TRACKING_DAYS,
            max: MAX_TRACKING_DAYS,
        });
    }
    u32::try_from(days).map_err(|_| AppError::OutOfRange {
        field: "tracking_days",
        min: MIN_TRACKING_DAYS,
        max: MAX_TRACKING_DAYS,
    })
}

/// Resolve the effective tracking window for a request: an explicit
/// value wins, otherwise the stored per-user default applies. Both go
/// through the same range check.
pub fn resolve_tracking_days(
    requested: Option<i64>,
    user_default: i64,
) -> Result<u32, AppError> {
    match requested {
        Some(days) => validate_tracking_days(days),
        None => validate_tracking_days(user_default),
    }
}

/// Parse a tracking window from query text. Non-numeric input is a
/// validation error distinct from the range error.
pub fn parse_tracking_days(raw: &str) -> Result<i64, AppError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| AppError::NotAnInteger { field: "tracking_days" })
}

/// Parse a comma-separated id list, e.g. "3,17,4".
pub fn parse_id_list(raw: &str) -> Result<Vec<i64>, AppError> {
    raw.split(',')
        .map(|part| {
            part.trim()
                .parse::<i64>()
                .map_err(|_| AppError::NotAnInteger { field: "tag_ids" })
        })
        .collect()
}

/// Validate a habit name.
pub fn validate_habit_name(name: &str) -> Result<&str, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::InvalidInput {
            field: "name",
            reason: "cannot be empty".into(),
        });
    }
    if name.len() > MAX_HABIT_NAME_LEN {
        return Err(AppError::InvalidInput {
            field: "name",
            reason: format!("cannot exceed {} characters", MAX_HABIT_NAME_LEN),
        });
    }
    Ok(name)
}

/// Validate a category name.
pub fn validate_category_name(name: &str) -> Result<&str, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::InvalidInput {
            field: "name",
            reason: "cannot be empty".into(),
        });
    }
    if name.len() > MAX_CATEGORY_NAME_LEN {
        return Err(AppError::InvalidInput {
            field: "name",
            reason: format!("cannot exceed {} characters", MAX_CATEGORY_NAME_LEN),
        });
    }
    Ok(name)
}

/// Validate a display color (hex RGB, "#rrggbb").
pub fn validate_color(color: &str) -> Result<&str, AppError> {
    let valid = color.len() == 7
        && color.starts_with('#')
        && color.chars().skip(1).all(|c| c.is_ascii_hexdigit());
    if !valid {
        return Err(AppError::InvalidInput {
            field: "color",
            reason: "must be a hex color like #6366f1".into(),
        });
    }
    Ok(color)
}

/// Normalize a tag name: trimmed, lowercased, length-checked. Tag
/// uniqueness is case-insensitive, so the lowercase form is what gets
/// stored and compared.
pub fn normalize_tag_name(name: &str) -> Result<String, AppError> {
    let name = name.trim().to_lowercase();
    if name.is_empty() {
        return Err(AppError::InvalidInput {
            field: "name",
            reason: "cannot be empty".into(),
        });
    }
    if name.len() > MAX_TAG_NAME_LEN {
        return Err(AppError::InvalidInput {
            field: "name",
            reason: format!("cannot exceed {} characters", MAX_TAG_NAME_LEN),
        });
    }
    Ok(name)
}

/// Validate comment text (1-500 characters).
pub fn validate_comment_text(text: &str) -> Result<&str, AppError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::InvalidInput {
            field: "text",
            reason: "cannot be empty".into(),
        });
    }
    if text.chars().count() > MAX_COMMENT_LEN {
        return Err(AppError::InvalidInput {
            field: "text",
            reason: format!("cannot exceed {} characters", MAX_COMMENT_LEN),
        });
    }
    Ok(text)
}

/// Reject a tag set larger than a habit may hold.
pub fn validate_tag_count(total: usize) -> Result<(), AppError> {
    if total > MAX_TAGS_PER_HABIT {
        return Err(AppError::InvalidInput {
            field: "tags",
            reason: format!("a habit can hold at most {} tags", MAX_TAGS_PER_HABIT),
        });
    }
    Ok(())
}
