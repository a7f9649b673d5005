use crate::models::Habit;
use std::collections::{HashMap, HashSet};

/// Predicates for narrowing a habit collection. All supplied axes must
/// hold for a habit to pass (AND semantics); an absent category or an
/// empty tag set leaves that axis unconstrained.
#[derive(Debug, Clone, Default)]
pub struct HabitFilter {
    pub category_id: Option<i64>,
    /// A habit passes only if it carries every one of these tags.
    pub tag_ids: HashSet<i64>,
    pub include_archived: bool,
}

impl HabitFilter {
    pub fn by_category(category_id: i64) -> Self {
        Self {
            category_id: Some(category_id),
            ..Self::default()
        }
    }

    pub fn by_tags<I: IntoIterator<Item = i64>>(tag_ids: I) -> Self {
        Self {
            tag_ids: tag_ids.into_iter().collect(),
            ..Self::default()
        }
    }
}

/// Narrow `habits` to the subset matching `filter`. Input order is
/// preserved; nothing is duplicated. `tag_sets` maps habit id to its
/// attached tag ids (habits without tags may be absent).
pub fn select(
    habits: Vec<Habit>,
    tag_sets: &HashMap<i64, HashSet<i64>>,
    filter: &HabitFilter,
) -> Vec<Habit> {
    habits
        .into_iter()
        .filter(|habit| matches(habit, tag_sets.get(&habit.id), filter))
        .collect()
}

fn matches(habit: &Habit, tags: Option<&HashSet<i64>>, filter: &HabitFilter) -> bool {
    if habit.archived && !filter.include_archived {
        return false;
    }
    if let Some(category_id) = filter.category_id {
        if habit.category_id != Some(category_id) {
            return false;
        }
    }
    if filter.tag_ids.is_empty() {
        return true;
    }
    // Superset test: the habit must carry every requested tag, not just one
    match tags {
        Some(attached) => filter.tag_ids.is_subset(attached),
        None => false,
    }
}
