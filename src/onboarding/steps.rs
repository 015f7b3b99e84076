//! Onboarding wizard steps.

use serde::{Deserialize, Serialize};

/// Steps in the onboarding wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OnboardingStep {
    /// Welcome screen with overview
    #[default]
    Welcome,
    /// Display name
    Profile,
    /// Training goal
    Goal,
    /// Training experience
    Experience,
    /// Days per week available for training
    Schedule,
    /// Recommended starter routine
    Recommendation,
    /// Completion screen
    Complete,
}

impl OnboardingStep {
    /// Get all steps in order.
    pub fn all() -> &'static [OnboardingStep] {
        &[
            OnboardingStep::Welcome,
            OnboardingStep::Profile,
            OnboardingStep::Goal,
            OnboardingStep::Experience,
            OnboardingStep::Schedule,
            OnboardingStep::Recommendation,
            OnboardingStep::Complete,
        ]
    }

    /// Get the step index (0-based).
    pub fn index(&self) -> usize {
        Self::all().iter().position(|s| s == self).unwrap_or(0)
    }

    /// Get the next step, if any.
    pub fn next(&self) -> Option<OnboardingStep> {
        Self::all().get(self.index() + 1).copied()
    }

    /// Get the previous step, if any.
    pub fn previous(&self) -> Option<OnboardingStep> {
        self.index().checked_sub(1).map(|idx| Self::all()[idx])
    }

    /// Get the title for this step.
    pub fn title(&self) -> &'static str {
        match self {
            OnboardingStep::Welcome => "Welcome to IronLog",
            OnboardingStep::Profile => "About You",
            OnboardingStep::Goal => "Your Goal",
            OnboardingStep::Experience => "Experience",
            OnboardingStep::Schedule => "Schedule",
            OnboardingStep::Recommendation => "Your Starter Routine",
            OnboardingStep::Complete => "All Set!",
        }
    }

    /// Get the description for this step.
    pub fn description(&self) -> &'static str {
        match self {
            OnboardingStep::Welcome => "A few questions and you'll have a routine to start with.",
            OnboardingStep::Profile => "What should we call you?",
            OnboardingStep::Goal => "What do you want to get out of training?",
            OnboardingStep::Experience => "How long have you been lifting?",
            OnboardingStep::Schedule => "How many days a week can you train?",
            OnboardingStep::Recommendation => {
                "Based on your answers, this routine is the best fit. You can pick another."
            }
            OnboardingStep::Complete => "You're ready for your first workout.",
        }
    }

    /// Check if this step asks the user for an answer.
    pub fn requires_answer(&self) -> bool {
        matches!(
            self,
            OnboardingStep::Profile
                | OnboardingStep::Goal
                | OnboardingStep::Experience
                | OnboardingStep::Schedule
        )
    }

    /// Check if this is the first step.
    pub fn is_first(&self) -> bool {
        *self == OnboardingStep::Welcome
    }

    /// Check if this is the last step.
    pub fn is_last(&self) -> bool {
        *self == OnboardingStep::Complete
    }
}

impl std::fmt::Display for OnboardingStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}
