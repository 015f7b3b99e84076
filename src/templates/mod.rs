//! Starter templates and the recommendation scorer.

pub mod catalog;
pub mod recommend;
pub mod types;

pub use catalog::{find_template, StarterTemplate, TemplateDay, TemplateExercise, STARTER_TEMPLATES};
pub use recommend::{best_of, recommend, score_template, score_templates, RecommendationInput, TemplateScore};
pub use types::{ExperienceLevel, Goal, GoalCategory, ParseProfileError};
