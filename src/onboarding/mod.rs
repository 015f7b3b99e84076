//! Onboarding module for first-time user experience.
//!
//! Provides a guided wizard that collects the user's name, goal, experience
//! and weekly schedule, recommends a starter template and builds the first
//! routine from it.

pub mod steps;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::routines::Routine;
use crate::storage::{AppConfig, UserProfile};
use crate::templates::{
    find_template, recommend, ExperienceLevel, Goal, RecommendationInput, StarterTemplate,
};

pub use steps::OnboardingStep;

/// Answers collected by the wizard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OnboardingAnswers {
    pub name: Option<String>,
    pub goal: Option<Goal>,
    pub level: Option<ExperienceLevel>,
    pub days_per_week: Option<u8>,
}

impl OnboardingAnswers {
    /// Check whether the answer for a step has been given.
    pub fn has_answer(&self, step: OnboardingStep) -> bool {
        match step {
            OnboardingStep::Profile => self.name.is_some(),
            OnboardingStep::Goal => self.goal.is_some(),
            OnboardingStep::Experience => self.level.is_some(),
            OnboardingStep::Schedule => self.days_per_week.is_some(),
            _ => true,
        }
    }

    /// Recommendation input, once every question has been answered.
    pub fn recommendation_input(&self) -> Option<RecommendationInput> {
        Some(RecommendationInput::new(
            self.days_per_week?,
            self.goal?,
            self.level?,
        ))
    }
}

/// State of the onboarding wizard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnboardingState {
    /// Whether onboarding has been completed
    pub completed: bool,
    /// Current step in the wizard
    pub current_step: OnboardingStep,
    /// Whether the user chose to skip onboarding
    pub skipped: bool,
    /// Steps that have been completed
    pub completed_steps: Vec<OnboardingStep>,
    /// Answers given so far
    pub answers: OnboardingAnswers,
    /// Template id picked by the recommender
    pub recommended_template: Option<String>,
    /// Template id picked by the user instead of the recommendation
    pub chosen_template: Option<String>,
}

impl Default for OnboardingState {
    fn default() -> Self {
        Self {
            completed: false,
            current_step: OnboardingStep::Welcome,
            skipped: false,
            completed_steps: Vec::new(),
            answers: OnboardingAnswers::default(),
            recommended_template: None,
            chosen_template: None,
        }
    }
}

impl OnboardingState {
    /// Check if a specific step is complete.
    pub fn is_step_complete(&self, step: OnboardingStep) -> bool {
        self.completed_steps.contains(&step)
    }

    /// Mark the current step as complete and advance.
    fn complete_current_step(&mut self) {
        if !self.completed_steps.contains(&self.current_step) {
            self.completed_steps.push(self.current_step);
        }

        if let Some(next) = self.current_step.next() {
            self.current_step = next;
        } else {
            self.completed = true;
        }
    }

    /// Go back to the previous step.
    fn go_back(&mut self) {
        if let Some(prev) = self.current_step.previous() {
            self.current_step = prev;
        }
    }

    /// Get progress as a percentage (0-100).
    pub fn progress_percent(&self) -> u8 {
        let total = OnboardingStep::all().len();
        let completed = self.completed_steps.len();
        ((completed * 100) / total) as u8
    }
}

/// Profile and first routine produced by the wizard.
#[derive(Debug, Clone)]
pub struct OnboardingOutcome {
    pub profile: UserProfile,
    /// Absent when onboarding was skipped
    pub routine: Option<Routine>,
}

/// Onboarding wizard controller.
#[derive(Debug, Default)]
pub struct OnboardingWizard {
    state: OnboardingState,
}

impl OnboardingWizard {
    /// Create a new onboarding wizard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from existing state.
    pub fn from_state(state: OnboardingState) -> Self {
        Self { state }
    }

    /// Get the current state.
    pub fn state(&self) -> &OnboardingState {
        &self.state
    }

    /// Check if onboarding should be shown.
    pub fn should_show(&self) -> bool {
        !self.state.completed && !self.state.skipped
    }

    /// Get the current step.
    pub fn current_step(&self) -> OnboardingStep {
        self.state.current_step
    }

    /// Answers given so far.
    pub fn answers(&self) -> &OnboardingAnswers {
        &self.state.answers
    }

    pub fn set_name(&mut self, name: &str) -> Result<(), OnboardingError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(OnboardingError::InvalidAnswer("Name is empty".to_string()));
        }
        self.state.answers.name = Some(name.to_string());
        Ok(())
    }

    pub fn set_goal(&mut self, goal: Goal) {
        self.state.answers.goal = Some(goal);
    }

    pub fn set_level(&mut self, level: ExperienceLevel) {
        self.state.answers.level = Some(level);
    }

    pub fn set_days_per_week(&mut self, days: u8) -> Result<(), OnboardingError> {
        if !UserProfile::validate_days(days) {
            return Err(OnboardingError::InvalidAnswer(format!(
                "Days per week must be between 1 and 7, got {}",
                days
            )));
        }
        self.state.answers.days_per_week = Some(days);
        Ok(())
    }

    /// Advance to the next step.
    ///
    /// Fails without moving when the current step's answer is missing.
    /// Entering the recommendation step runs the recommender.
    pub fn next_step(&mut self) -> Result<OnboardingStep, OnboardingError> {
        let step = self.state.current_step;
        if !self.state.answers.has_answer(step) {
            return Err(OnboardingError::MissingAnswer(step));
        }

        self.state.complete_current_step();

        if self.state.current_step == OnboardingStep::Recommendation {
            let input = self
                .state
                .answers
                .recommendation_input()
                .ok_or(OnboardingError::MissingAnswer(OnboardingStep::Schedule))?;
            let template = recommend(&input);
            tracing::info!(template = template.id, "Recommended starter template");
            self.state.recommended_template = Some(template.id.to_string());
        }

        Ok(self.state.current_step)
    }

    /// Go back to the previous step.
    pub fn previous_step(&mut self) {
        self.state.go_back();
    }

    /// Template picked by the recommender.
    pub fn recommendation(&self) -> Option<&'static StarterTemplate> {
        self.state
            .recommended_template
            .as_deref()
            .and_then(find_template)
    }

    /// Override the recommendation with another starter template.
    pub fn choose_template(&mut self, template_id: &str) -> Result<(), OnboardingError> {
        let template = find_template(template_id)
            .ok_or_else(|| OnboardingError::UnknownTemplate(template_id.to_string()))?;
        self.state.chosen_template = Some(template.id.to_string());
        Ok(())
    }

    /// Template the first routine will be built from.
    pub fn selected_template(&self) -> Option<&'static StarterTemplate> {
        self.state
            .chosen_template
            .as_deref()
            .and_then(find_template)
            .or_else(|| self.recommendation())
    }

    /// Finish the wizard, producing the profile and the first routine.
    ///
    /// Only allowed once the recommendation step has been reached.
    pub fn finish(&mut self, config: &AppConfig) -> Result<OnboardingOutcome, OnboardingError> {
        if self.state.current_step.index() < OnboardingStep::Recommendation.index() {
            return Err(OnboardingError::NotReady(self.state.current_step));
        }

        let answers = &self.state.answers;
        let name = answers
            .name
            .clone()
            .ok_or(OnboardingError::MissingAnswer(OnboardingStep::Profile))?;
        let template = self
            .selected_template()
            .ok_or(OnboardingError::MissingAnswer(OnboardingStep::Recommendation))?;

        let mut profile = UserProfile::new(name);
        profile.goal = answers.goal.unwrap_or_default();
        profile.experience = answers.level.unwrap_or_default();
        profile.days_per_week = answers.days_per_week.unwrap_or(profile.days_per_week);
        profile.units = config.units;
        profile.onboarding_complete = true;

        let routine =
            Routine::from_template(profile.id, template, config.session.default_rest_seconds);

        while !self.state.completed {
            self.state.complete_current_step();
        }

        tracing::info!(user = %profile.id, template = template.id, "Onboarding complete");
        Ok(OnboardingOutcome {
            profile,
            routine: Some(routine),
        })
    }

    /// Skip the onboarding with a default profile and no routine.
    pub fn skip(&mut self, config: &AppConfig) -> OnboardingOutcome {
        self.state.skipped = true;
        self.state.completed = true;

        let mut profile = UserProfile::default();
        profile.units = config.units;
        profile.onboarding_complete = true;

        tracing::info!(user = %profile.id, "Onboarding skipped");
        OnboardingOutcome {
            profile,
            routine: None,
        }
    }

    /// Restart the onboarding.
    pub fn restart(&mut self) {
        self.state = OnboardingState::default();
    }
}

/// Trait for onboarding wizard functionality.
pub trait OnboardingWizardTrait {
    /// Get the current step.
    fn current_step(&self) -> OnboardingStep;

    /// Advance to the next step.
    fn next(&mut self) -> Result<OnboardingStep, OnboardingError>;

    /// Go back to the previous step.
    fn back(&mut self);

    /// Check if onboarding is complete.
    fn is_complete(&self) -> bool;

    /// Restart the onboarding.
    fn restart(&mut self);
}

impl OnboardingWizardTrait for OnboardingWizard {
    fn current_step(&self) -> OnboardingStep {
        self.state.current_step
    }

    fn next(&mut self) -> Result<OnboardingStep, OnboardingError> {
        self.next_step()
    }

    fn back(&mut self) {
        self.previous_step();
    }

    fn is_complete(&self) -> bool {
        self.state.completed
    }

    fn restart(&mut self) {
        OnboardingWizard::restart(self);
    }
}

/// Onboarding errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OnboardingError {
    #[error("Step '{0}' needs an answer before continuing")]
    MissingAnswer(OnboardingStep),

    #[error("Invalid answer: {0}")]
    InvalidAnswer(String),

    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    #[error("Onboarding cannot finish from step '{0}'")]
    NotReady(OnboardingStep),
}
