//! Unit tests for starter template recommendation.
//!
//! Covers every (days, goal, level) combination the onboarding flow can
//! produce, plus out-of-range schedules.

use ironlog::templates::{
    best_of, find_template, recommend, score_template, score_templates, ExperienceLevel, Goal,
    RecommendationInput, StarterTemplate, STARTER_TEMPLATES,
};

fn all_inputs() -> Vec<RecommendationInput> {
    let mut inputs = Vec::new();
    for days in 0..=8u8 {
        for goal in Goal::all() {
            for level in ExperienceLevel::all() {
                inputs.push(RecommendationInput::new(days, *goal, *level));
            }
        }
    }
    inputs
}

#[test]
fn test_recommendation_has_the_highest_score() {
    for input in all_inputs() {
        let best = recommend(&input);
        let scores = score_templates(&input);
        let best_score = scores
            .iter()
            .find(|s| s.template.id == best.id)
            .map(|s| s.score)
            .unwrap();

        assert!(
            scores.iter().all(|s| s.score <= best_score),
            "{:?} picked {} with score {}",
            input,
            best.id,
            best_score
        );
    }
}

#[test]
fn test_tie_goes_to_earlier_template() {
    let upper_lower = find_template("upper_lower_4").unwrap();
    let mut first = upper_lower.clone();
    first.id = "upper_lower_first";
    let mut second = upper_lower.clone();
    second.id = "upper_lower_second";
    let candidates: &'static [StarterTemplate] = Box::leak(vec![first, second].into_boxed_slice());

    let input = RecommendationInput::new(4, Goal::BuildMuscle, ExperienceLevel::Intermediate);
    let scores: Vec<i32> = candidates
        .iter()
        .map(|t| score_template(t, &input).score)
        .collect();
    assert_eq!(scores[0], scores[1]);

    assert_eq!(
        best_of(candidates, &input).unwrap().template.id,
        "upper_lower_first"
    );
}

#[test]
fn test_exact_day_match_always_wins() {
    for input in all_inputs() {
        let days = input.clamped_days();
        let best = recommend(&input);

        if STARTER_TEMPLATES.iter().any(|t| t.days_per_week == days) {
            assert_eq!(best.days_per_week, days, "{:?}", input);
        }
    }
}

#[test]
fn test_schedule_is_clamped() {
    let low = RecommendationInput::new(1, Goal::GeneralFitness, ExperienceLevel::Beginner);
    assert_eq!(recommend(&low).id, "full_body_2");

    let high = RecommendationInput::new(7, Goal::BuildMuscle, ExperienceLevel::Advanced);
    assert_eq!(recommend(&high).id, "push_pull_legs_6");
}

#[test]
fn test_goal_aliases_reach_the_scorer() {
    let goal: Goal = "strength".parse().unwrap();
    let level: ExperienceLevel = "beginner".parse().unwrap();
    let input = RecommendationInput::new(3, goal, level);

    assert_eq!(recommend(&input).id, "full_body_3");
}
