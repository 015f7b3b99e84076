//! Starter template recommendation.
//!
//! Scores every starter template against the user's schedule, goal and
//! experience and picks the best match. The day match dominates: a template
//! one day off loses more than the goal and level bonuses combined.

use serde::Serialize;

use super::catalog::{StarterTemplate, STARTER_TEMPLATES};
use super::types::{ExperienceLevel, Goal};

/// Score for a template whose day count equals the user's schedule.
pub const DAYS_MATCH_WEIGHT: i32 = 100;
/// Penalty per day of difference between template and schedule.
pub const DAY_DIFF_PENALTY: i32 = 90;
/// Bonus when the template is tagged with the user's goal category.
pub const GOAL_MATCH_BONUS: i32 = 50;
/// Bonus when the template is tagged with the user's experience level.
pub const LEVEL_MATCH_BONUS: i32 = 30;

/// Fewest training days a template covers.
pub const MIN_DAYS: u8 = 2;
/// Most training days a template covers.
pub const MAX_DAYS: u8 = 6;

/// Profile attributes the recommendation is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendationInput {
    /// Days per week the user can train
    pub days_available: u8,
    /// Training goal
    pub goal: Goal,
    /// Experience level
    pub level: ExperienceLevel,
}

impl RecommendationInput {
    pub fn new(days_available: u8, goal: Goal, level: ExperienceLevel) -> Self {
        Self {
            days_available,
            goal,
            level,
        }
    }

    /// Schedule clamped into the range the catalog covers.
    pub fn clamped_days(&self) -> u8 {
        self.days_available.clamp(MIN_DAYS, MAX_DAYS)
    }
}

/// A template together with its score for one input.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateScore {
    /// The scored template
    pub template: &'static StarterTemplate,
    /// Total score
    pub score: i32,
    /// Template day count equals the clamped schedule
    pub days_match: bool,
    /// Template is tagged with the goal category
    pub goal_match: bool,
    /// Template is tagged with the experience level
    pub level_match: bool,
}

/// Score one template.
pub fn score_template(template: &'static StarterTemplate, input: &RecommendationInput) -> TemplateScore {
    let days = input.clamped_days();
    let category = input.goal.category();

    let day_diff = (template.days_per_week as i32 - days as i32).abs();
    let goal_match = template.supports_goal(category);
    let level_match = template.supports_level(input.level);

    let mut score = DAYS_MATCH_WEIGHT - DAY_DIFF_PENALTY * day_diff;
    if goal_match {
        score += GOAL_MATCH_BONUS;
    }
    if level_match {
        score += LEVEL_MATCH_BONUS;
    }

    TemplateScore {
        template,
        score,
        days_match: day_diff == 0,
        goal_match,
        level_match,
    }
}

/// Score every starter template, in catalog order.
pub fn score_templates(input: &RecommendationInput) -> Vec<TemplateScore> {
    STARTER_TEMPLATES
        .iter()
        .map(|template| score_template(template, input))
        .collect()
}

/// Pick the best starter template for the input.
///
/// Ties go to the template listed first in the catalog.
pub fn recommend(input: &RecommendationInput) -> &'static StarterTemplate {
    let best = best_of(STARTER_TEMPLATES, input)
        .unwrap_or_else(|| score_template(&STARTER_TEMPLATES[0], input));

    tracing::debug!(
        template = best.template.id,
        score = best.score,
        days = input.clamped_days(),
        goal = input.goal.key(),
        level = input.level.key(),
        "Recommended starter template"
    );

    best.template
}

/// Highest-scoring template of a list; the earliest one wins a tie.
pub fn best_of(
    templates: &'static [StarterTemplate],
    input: &RecommendationInput,
) -> Option<TemplateScore> {
    templates
        .iter()
        .map(|template| score_template(template, input))
        .fold(None, |best: Option<TemplateScore>, candidate| match best {
            Some(best) if best.score >= candidate.score => Some(best),
            _ => Some(candidate),
        })
}
