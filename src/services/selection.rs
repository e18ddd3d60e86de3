//! Meal selection
//!
//! Scores catalog recipes against the user's preferences, then fills plan
//! slots from the best-scoring candidates while honoring the budget and
//! protein rotation. When rotation alone prevents filling every slot, a
//! backfill pass relaxes rotation (and only rotation, unless configured
//! otherwise) and reports that it did so.

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::{Preferences, Recipe, RecipeId};

/// Slack for comparing dollar amounts against the remaining budget
const BUDGET_EPSILON: f64 = 1e-9;

/// A rating threshold and the bonus it earns
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingTier {
    pub min_rating: f64,
    pub bonus: f64,
}

/// Every constant the scorer uses, in one place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Checked highest first; the first tier the rating reaches applies
    pub rating_tiers: Vec<RatingTier>,
    /// Added when a tag or protein matches a like
    pub like_bonus: f64,
    /// Subtracted when a tag or protein matches a dislike or dietary exclusion
    pub dislike_penalty: f64,
    /// Candidates scoring at or below this are never selected
    pub disqualify_below: f64,
    /// Upper bound of the random tie-break added to every score
    pub jitter: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            rating_tiers: vec![
                RatingTier {
                    min_rating: 4.5,
                    bonus: 30.0,
                },
                RatingTier {
                    min_rating: 4.0,
                    bonus: 20.0,
                },
                RatingTier {
                    min_rating: 3.0,
                    bonus: 10.0,
                },
            ],
            like_bonus: 15.0,
            dislike_penalty: 1000.0,
            disqualify_below: -500.0,
            jitter: 10.0,
        }
    }
}

impl ScoringWeights {
    /// Bonus for a rating, using the highest tier reached
    pub fn rating_bonus(&self, rating: Option<f64>) -> f64 {
        let Some(rating) = rating.filter(|r| r.is_finite()) else {
            return 0.0;
        };
        self.rating_tiers
            .iter()
            .filter(|tier| rating >= tier.min_rating)
            .map(|tier| tier.bonus)
            .fold(None, |best: Option<f64>, bonus| {
                Some(best.map_or(bonus, |b| b.max(bonus)))
            })
            .unwrap_or(0.0)
    }
}

/// A recipe offered to the selector with its cost
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'r> {
    pub recipe: &'r Recipe,
    /// Independent recipe cost in dollars
    pub cost: f64,
}

/// What the caller asks the selector for
#[derive(Debug, Clone, Copy)]
pub struct SelectionRequest<'a> {
    /// Number of recipes wanted
    pub count: usize,
    /// Total spend allowed across all picks
    pub budget: Option<f64>,
    /// Recipes served recently
    pub excluded: &'a HashSet<RecipeId>,
    pub preferences: &'a Preferences,
}

/// One selected recipe
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pick {
    pub recipe_id: RecipeId,
    pub cost: f64,
    pub score: f64,
    /// Chosen during the rotation-relaxed backfill
    pub backfilled: bool,
}

/// Selector output
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    /// Picks in slot order
    pub picks: Vec<Pick>,
    /// True when backfill had to ignore rotation to add picks
    pub relaxed_rotation: bool,
    /// Slots left empty after backfill
    pub shortfall: usize,
}

impl Selection {
    /// Selected recipe ids in slot order
    pub fn recipe_ids(&self) -> Vec<RecipeId> {
        self.picks.iter().map(|p| p.recipe_id).collect()
    }

    /// Sum of pick costs
    pub fn total_cost(&self) -> f64 {
        self.picks.iter().map(|p| p.cost).sum()
    }
}

/// Scores and picks recipes for a plan
pub struct MealSelector<'a> {
    weights: &'a ScoringWeights,
    rotation_window: usize,
    relax_budget_on_backfill: bool,
}

impl<'a> MealSelector<'a> {
    /// Create a selector with the default rotation window of 2
    pub fn new(weights: &'a ScoringWeights) -> Self {
        Self {
            weights,
            rotation_window: 2,
            relax_budget_on_backfill: false,
        }
    }

    /// How many preceding picks a protein must not appear in
    pub fn with_rotation_window(mut self, window: usize) -> Self {
        self.rotation_window = window;
        self
    }

    /// Whether backfill may also ignore the budget
    pub fn with_budget_relaxed_on_backfill(mut self, relax: bool) -> Self {
        self.relax_budget_on_backfill = relax;
        self
    }

    /// Preference score without jitter
    pub fn base_score(&self, recipe: &Recipe, preferences: &Preferences) -> f64 {
        let mut score = self.weights.rating_bonus(recipe.rating);

        if recipe.matches_any(&preferences.likes) {
            score += self.weights.like_bonus;
        }
        if recipe.matches_any(&preferences.dislikes)
            || recipe.matches_any(&preferences.dietary_exclusions)
        {
            score -= self.weights.dislike_penalty;
        }

        score
    }

    /// Choose up to `request.count` recipes
    pub fn select<R: Rng + ?Sized>(
        &self,
        candidates: &[Candidate<'_>],
        request: &SelectionRequest<'_>,
        rng: &mut R,
    ) -> Selection {
        let mut ranked: Vec<(usize, f64)> = candidates
            .iter()
            .enumerate()
            .filter(|(_, c)| !request.excluded.contains(&c.recipe.id))
            .map(|(i, c)| {
                let jitter = if self.weights.jitter > 0.0 {
                    rng.gen_range(0.0..self.weights.jitter)
                } else {
                    0.0
                };
                (i, self.base_score(c.recipe, request.preferences) + jitter)
            })
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        let mut state = FillState {
            picks: Vec::with_capacity(request.count),
            rotation: Vec::with_capacity(request.count),
            chosen: HashSet::new(),
            remaining_budget: request.budget,
        };

        // Strict pass: every constraint applies
        while state.picks.len() < request.count {
            let Some((index, score)) = self.next_eligible(candidates, &ranked, &state, true, true)
            else {
                break;
            };
            state.take(&candidates[index], score, false);
        }

        // Backfill pass: rotation relaxed
        let mut relaxed_rotation = false;
        if state.picks.len() < request.count {
            tracing::warn!(
                selected = state.picks.len(),
                wanted = request.count,
                "protein rotation left slots empty; backfilling without rotation"
            );
            let check_budget = !self.relax_budget_on_backfill;
            while state.picks.len() < request.count {
                let Some((index, score)) =
                    self.next_eligible(candidates, &ranked, &state, false, check_budget)
                else {
                    break;
                };
                state.take(&candidates[index], score, true);
                relaxed_rotation = true;
            }
        }

        let shortfall = request.count - state.picks.len();
        if shortfall > 0 {
            tracing::warn!(shortfall, "not enough eligible recipes to fill the plan");
        }

        Selection {
            picks: state.picks,
            relaxed_rotation,
            shortfall,
        }
    }

    fn next_eligible(
        &self,
        candidates: &[Candidate<'_>],
        ranked: &[(usize, f64)],
        state: &FillState,
        check_rotation: bool,
        check_budget: bool,
    ) -> Option<(usize, f64)> {
        ranked.iter().copied().find(|&(index, score)| {
            let candidate = &candidates[index];

            if score <= self.weights.disqualify_below {
                return false;
            }
            if state.chosen.contains(&candidate.recipe.id) {
                return false;
            }
            if check_budget {
                if let Some(remaining) = state.remaining_budget {
                    if candidate.cost > remaining + BUDGET_EPSILON {
                        return false;
                    }
                }
            }
            if check_rotation && self.rotation_window > 0 {
                if let Some(key) = candidate.recipe.rotation_key() {
                    let recent = state
                        .rotation
                        .iter()
                        .rev()
                        .take(self.rotation_window)
                        .flatten();
                    if recent.into_iter().any(|k| *k == key) {
                        return false;
                    }
                }
            }
            true
        })
    }
}

struct FillState {
    picks: Vec<Pick>,
    rotation: Vec<Option<String>>,
    chosen: HashSet<RecipeId>,
    remaining_budget: Option<f64>,
}

impl FillState {
    fn take(&mut self, candidate: &Candidate<'_>, score: f64, backfilled: bool) {
        tracing::debug!(
            recipe = %candidate.recipe.name,
            score,
            cost = candidate.cost,
            backfilled,
            "selected recipe"
        );
        self.picks.push(Pick {
            recipe_id: candidate.recipe.id,
            cost: candidate.cost,
            score,
            backfilled,
        });
        self.rotation.push(candidate.recipe.rotation_key());
        self.chosen.insert(candidate.recipe.id);
        if let Some(remaining) = self.remaining_budget.as_mut() {
            *remaining -= candidate.cost;
        }
    }
}
