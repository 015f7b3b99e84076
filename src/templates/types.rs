//! Template and profile classification types.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// What the user wants to get out of training.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    /// Gain muscle size
    BuildMuscle,
    /// Lift heavier
    GetStronger,
    /// Lose body fat
    LoseWeight,
    /// Train work capacity
    ImproveEndurance,
    /// Stay active and healthy
    #[default]
    GeneralFitness,
}

impl Goal {
    /// Get all goals in display order.
    pub fn all() -> &'static [Goal] {
        &[
            Goal::BuildMuscle,
            Goal::GetStronger,
            Goal::LoseWeight,
            Goal::ImproveEndurance,
            Goal::GeneralFitness,
        ]
    }

    /// Stable key used in storage and on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            Goal::BuildMuscle => "build_muscle",
            Goal::GetStronger => "get_stronger",
            Goal::LoseWeight => "lose_weight",
            Goal::ImproveEndurance => "improve_endurance",
            Goal::GeneralFitness => "general_fitness",
        }
    }

    /// Collapse the goal into the coarser category templates are tagged with.
    pub fn category(&self) -> GoalCategory {
        match self {
            Goal::BuildMuscle => GoalCategory::Hypertrophy,
            Goal::GetStronger => GoalCategory::Strength,
            Goal::LoseWeight | Goal::ImproveEndurance | Goal::GeneralFitness => {
                GoalCategory::General
            }
        }
    }
}

impl std::fmt::Display for Goal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Goal::BuildMuscle => write!(f, "Build Muscle"),
            Goal::GetStronger => write!(f, "Get Stronger"),
            Goal::LoseWeight => write!(f, "Lose Weight"),
            Goal::ImproveEndurance => write!(f, "Improve Endurance"),
            Goal::GeneralFitness => write!(f, "General Fitness"),
        }
    }
}

impl FromStr for Goal {
    type Err = ParseProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "build_muscle" | "muscle" | "hypertrophy" => Ok(Goal::BuildMuscle),
            "get_stronger" | "strength" | "stronger" => Ok(Goal::GetStronger),
            "lose_weight" | "fat_loss" | "weight_loss" => Ok(Goal::LoseWeight),
            "improve_endurance" | "endurance" => Ok(Goal::ImproveEndurance),
            "general_fitness" | "general" | "fitness" => Ok(Goal::GeneralFitness),
            _ => Err(ParseProfileError::UnknownGoal(s.to_string())),
        }
    }
}

/// Coarse goal category used for template matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalCategory {
    Hypertrophy,
    Strength,
    General,
}

impl std::fmt::Display for GoalCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GoalCategory::Hypertrophy => write!(f, "Hypertrophy"),
            GoalCategory::Strength => write!(f, "Strength"),
            GoalCategory::General => write!(f, "General"),
        }
    }
}

/// Training experience of the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl ExperienceLevel {
    /// Get all levels in order.
    pub fn all() -> &'static [ExperienceLevel] {
        &[
            ExperienceLevel::Beginner,
            ExperienceLevel::Intermediate,
            ExperienceLevel::Advanced,
        ]
    }

    /// Stable key used in storage and on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            ExperienceLevel::Beginner => "beginner",
            ExperienceLevel::Intermediate => "intermediate",
            ExperienceLevel::Advanced => "advanced",
        }
    }
}

impl std::fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExperienceLevel::Beginner => write!(f, "Beginner"),
            ExperienceLevel::Intermediate => write!(f, "Intermediate"),
            ExperienceLevel::Advanced => write!(f, "Advanced"),
        }
    }
}

impl FromStr for ExperienceLevel {
    type Err = ParseProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" | "novice" => Ok(ExperienceLevel::Beginner),
            "intermediate" => Ok(ExperienceLevel::Intermediate),
            "advanced" | "expert" => Ok(ExperienceLevel::Advanced),
            _ => Err(ParseProfileError::UnknownLevel(s.to_string())),
        }
    }
}

/// Errors parsing profile attributes from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseProfileError {
    #[error("Unknown goal: {0}")]
    UnknownGoal(String),

    #[error("Unknown experience level: {0}")]
    UnknownLevel(String),
}
