//! Meal plan slots
//!
//! A plan is a run of days. Each day either cooks one selected recipe or is a
//! leftover night eaten from earlier cooking.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::ids::RecipeId;

const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// What happens on a plan day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "recipeId", rename_all = "camelCase")]
pub enum SlotAssignment {
    /// Cook this recipe
    Cook(RecipeId),
    /// No cooking; eat leftovers
    Leftover,
}

/// One day of a meal plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanSlot {
    /// Zero-based day index from the plan start
    pub day: u32,

    /// What is served that day
    pub assignment: SlotAssignment,
}

impl MealPlanSlot {
    /// The recipe cooked on this day, if any
    pub fn recipe_id(&self) -> Option<RecipeId> {
        match self.assignment {
            SlotAssignment::Cook(id) => Some(id),
            SlotAssignment::Leftover => None,
        }
    }

    /// Whether this is a leftover night
    pub fn is_leftover(&self) -> bool {
        matches!(self.assignment, SlotAssignment::Leftover)
    }

    /// Weekday name, treating day 0 as `start_weekday` (0 = Sunday)
    pub fn weekday_name(&self, start_weekday: u32) -> &'static str {
        DAY_NAMES[((self.day + start_weekday) % 7) as usize]
    }
}

/// Lay recipes onto days, skipping leftover nights
///
/// Day `d` is a leftover night when `d % 7` is in `leftover_days`. Days are
/// added until every recipe has a slot; a trailing run of leftover nights is
/// not appended. If every weekday is a leftover day the schedule falls back to
/// cooking every day.
pub fn schedule(recipes: &[RecipeId], leftover_days: &BTreeSet<u32>) -> Vec<MealPlanSlot> {
    let leftover_days = weekday_set(leftover_days);

    let mut slots = Vec::with_capacity(recipes.len());
    let mut remaining = recipes.iter();
    let mut day = 0u32;

    let mut next = remaining.next();
    while let Some(recipe_id) = next {
        if leftover_days.contains(&(day % 7)) {
            slots.push(MealPlanSlot {
                day,
                assignment: SlotAssignment::Leftover,
            });
        } else {
            slots.push(MealPlanSlot {
                day,
                assignment: SlotAssignment::Cook(*recipe_id),
            });
            next = remaining.next();
        }
        day += 1;
    }

    slots
}

/// Number of cooking days within the first `days` days
pub fn cooking_days(days: u32, leftover_days: &BTreeSet<u32>) -> usize {
    let leftover_days = weekday_set(leftover_days);
    (0..days).filter(|d| !leftover_days.contains(&(d % 7))).count()
}

fn weekday_set(days: &BTreeSet<u32>) -> BTreeSet<u32> {
    let mut set: BTreeSet<u32> = days.iter().map(|d| d % 7).collect();
    if set.len() == 7 {
        set.clear();
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_every_day() {
        let ids: Vec<RecipeId> = (0..3).map(|_| RecipeId::new()).collect();
        let slots = schedule(&ids, &BTreeSet::new());
        assert_eq!(slots.len(), 3);
        assert!(slots.iter().all(|s| !s.is_leftover()));
        assert_eq!(slots[2].recipe_id(), Some(ids[2]));
    }

    #[test]
    fn test_schedule_with_leftover_nights() {
        // Sunday/Wednesday/Friday leftovers, cooking Mon/Tue/Thu/Sat
        let ids: Vec<RecipeId> = (0..4).map(|_| RecipeId::new()).collect();
        let leftovers: BTreeSet<u32> = [0, 3, 5].into_iter().collect();
        let slots = schedule(&ids, &leftovers);

        assert_eq!(slots.len(), 7);
        assert!(slots[0].is_leftover());
        assert_eq!(slots[1].recipe_id(), Some(ids[0]));
        assert_eq!(slots[2].recipe_id(), Some(ids[1]));
        assert!(slots[3].is_leftover());
        assert_eq!(slots[4].recipe_id(), Some(ids[2]));
        assert!(slots[5].is_leftover());
        assert_eq!(slots[6].recipe_id(), Some(ids[3]));
        assert_eq!(slots[6].weekday_name(0), "Saturday");
    }

    #[test]
    fn test_schedule_all_leftover_days_ignored() {
        let ids = vec![RecipeId::new()];
        let all: BTreeSet<u32> = (0..7).collect();
        let slots = schedule(&ids, &all);
        assert_eq!(slots.len(), 1);
        assert!(!slots[0].is_leftover());
    }

    #[test]
    fn test_schedule_empty() {
        assert!(schedule(&[], &[1].into_iter().collect()).is_empty());
    }

    #[test]
    fn test_cooking_days() {
        let leftovers: BTreeSet<u32> = [0, 3, 5].into_iter().collect();
        assert_eq!(cooking_days(7, &leftovers), 4);
        assert_eq!(cooking_days(14, &leftovers), 8);
        assert_eq!(cooking_days(5, &BTreeSet::new()), 5);
        let every: BTreeSet<u32> = (0..7).collect();
        assert_eq!(cooking_days(3, &every), 3);
    }
}
