// src/constants.rs

/// Smallest allowed tracking window in days
pub const MIN_TRACKING_DAYS: i64 = 1;

/// Largest allowed tracking window in days
pub const MAX_TRACKING_DAYS: i64 = 30;

/// Tracking window used when a user has not chosen one
pub const DEFAULT_TRACKING_DAYS: i64 = 7;

/// Maximum number of tags attached to a single habit
pub const MAX_TAGS_PER_HABIT: usize = 5;

/// Maximum habit name length
pub const MAX_HABIT_NAME_LEN: usize = 100;

/// Maximum category name length
pub const MAX_CATEGORY_NAME_LEN: usize = 50;

/// Maximum tag name length
pub const MAX_TAG_NAME_LEN: usize = 20;

/// Maximum comment text length
pub const MAX_COMMENT_LEN: usize = 500;

/// Color assigned to a category when none is given
pub const DEFAULT_CATEGORY_COLOR: &str = "#6366f1";
