//! Training statistics over workout history.

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

use super::types::CompletedWorkout;

/// Heaviest completed set for one exercise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonalRecord {
    pub exercise_id: String,
    pub name: String,
    pub weight_kg: f32,
    pub reps: u32,
    pub achieved_on: NaiveDate,
}

impl PersonalRecord {
    fn beats(&self, weight_kg: f32, reps: u32, on: NaiveDate) -> bool {
        weight_kg > self.weight_kg
            || (weight_kg == self.weight_kg && reps > self.reps)
            || (weight_kg == self.weight_kg && reps == self.reps && on < self.achieved_on)
    }
}

/// Aggregate statistics for a user's history.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WorkoutStats {
    /// Finished workouts
    pub total_workouts: usize,
    /// Sets marked complete
    pub total_completed_sets: usize,
    /// Σ weight × reps over completed sets
    pub total_volume_kg: f64,
    /// Total training time
    pub total_duration_seconds: u64,
    /// Workouts finished in the 7 days ending today
    pub workouts_last_7_days: usize,
    /// Consecutive training days ending today or yesterday
    pub current_streak_days: u32,
    /// Best set per exercise, sorted by exercise name
    pub personal_records: Vec<PersonalRecord>,
}

impl WorkoutStats {
    /// Compute statistics from finished workouts.
    pub fn from_history(workouts: &[CompletedWorkout], today: NaiveDate) -> Self {
        let mut stats = WorkoutStats {
            total_workouts: workouts.len(),
            ..Default::default()
        };

        let week_start = today - Duration::days(6);
        let mut training_days = BTreeSet::new();
        let mut records: HashMap<&str, PersonalRecord> = HashMap::new();

        for workout in workouts {
            let day = workout.finished_at.date_naive();
            training_days.insert(day);

            stats.total_completed_sets += workout.completed_sets();
            stats.total_volume_kg += workout.volume_kg() as f64;
            stats.total_duration_seconds += workout.duration_seconds as u64;

            if day >= week_start && day <= today {
                stats.workouts_last_7_days += 1;
            }

            for exercise in &workout.exercises {
                for set in exercise.sets.iter().filter(|s| s.completed) {
                    match records.get_mut(exercise.exercise_id.as_str()) {
                        Some(record) => {
                            if record.beats(set.weight_kg, set.reps, day) {
                                record.weight_kg = set.weight_kg;
                                record.reps = set.reps;
                                record.achieved_on = day;
                                record.name = exercise.name.clone();
                            }
                        }
                        None => {
                            records.insert(
                                exercise.exercise_id.as_str(),
                                PersonalRecord {
                                    exercise_id: exercise.exercise_id.clone(),
                                    name: exercise.name.clone(),
                                    weight_kg: set.weight_kg,
                                    reps: set.reps,
                                    achieved_on: day,
                                },
                            );
                        }
                    }
                }
            }
        }

        stats.current_streak_days = streak_ending(&training_days, today);

        let mut personal_records: Vec<PersonalRecord> = records.into_values().collect();
        personal_records.sort_by(|a, b| a.name.cmp(&b.name).then(a.exercise_id.cmp(&b.exercise_id)));
        stats.personal_records = personal_records;

        stats
    }

    /// Average workout duration in seconds.
    pub fn average_duration_seconds(&self) -> u64 {
        if self.total_workouts == 0 {
            0
        } else {
            self.total_duration_seconds / self.total_workouts as u64
        }
    }
}

/// Count consecutive training days ending today, or yesterday when today
/// has no workout yet.
fn streak_ending(days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut cursor = if days.contains(&today) {
        today
    } else {
        let yesterday = today - Duration::days(1);
        if !days.contains(&yesterday) {
            return 0;
        }
        yesterday
    };

    let mut streak = 0;
    while days.contains(&cursor) {
        streak += 1;
        cursor = cursor - Duration::days(1);
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::types::{CompletedExercise, CompletedSet};
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn set(weight_kg: f32, reps: u32, completed: bool) -> CompletedSet {
        CompletedSet {
            weight_kg,
            reps,
            completed,
        }
    }

    fn workout_on(date: NaiveDate, sets: Vec<CompletedSet>) -> CompletedWorkout {
        let finished_at = Utc.from_utc_datetime(&date.and_hms_opt(18, 0, 0).unwrap());
        CompletedWorkout {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            routine_id: Uuid::nil(),
            routine_name: "Routine".to_string(),
            day_index: 0,
            day_label: "Day".to_string(),
            started_at: finished_at - Duration::minutes(50),
            finished_at,
            duration_seconds: 3000,
            exercises: vec![CompletedExercise {
                exercise_id: "barbell_squat".to_string(),
                name: "Barbell Squat".to_string(),
                sets,
            }],
        }
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    #[test]
    fn test_empty_history() {
        let stats = WorkoutStats::from_history(&[], date(10));
        assert_eq!(stats, WorkoutStats::default());
        assert_eq!(stats.average_duration_seconds(), 0);
    }

    #[test]
    fn test_totals_count_completed_sets_only() {
        let history = vec![workout_on(
            date(10),
            vec![set(100.0, 5, true), set(100.0, 5, true), set(100.0, 5, false)],
        )];
        let stats = WorkoutStats::from_history(&history, date(10));

        assert_eq!(stats.total_workouts, 1);
        assert_eq!(stats.total_completed_sets, 2);
        assert!((stats.total_volume_kg - 1000.0).abs() < 0.01);
        assert_eq!(stats.average_duration_seconds(), 3000);
    }

    #[test]
    fn test_last_seven_days_window() {
        let history = vec![
            workout_on(date(1), vec![]),
            workout_on(date(3), vec![]),
            workout_on(date(4), vec![]),
            workout_on(date(9), vec![]),
        ];
        let stats = WorkoutStats::from_history(&history, date(9));
        assert_eq!(stats.workouts_last_7_days, 3);
    }

    #[test]
    fn test_streak() {
        let history = vec![
            workout_on(date(5), vec![]),
            workout_on(date(7), vec![]),
            workout_on(date(8), vec![]),
            workout_on(date(8), vec![]),
            workout_on(date(9), vec![]),
        ];
        assert_eq!(WorkoutStats::from_history(&history, date(9)).current_streak_days, 3);
        // Today not trained yet: streak continues from yesterday
        assert_eq!(WorkoutStats::from_history(&history, date(10)).current_streak_days, 3);
        assert_eq!(WorkoutStats::from_history(&history, date(11)).current_streak_days, 0);
    }

    #[test]
    fn test_personal_record_prefers_weight_then_reps() {
        let history = vec![
            workout_on(date(1), vec![set(100.0, 5, true), set(120.0, 1, false)]),
            workout_on(date(2), vec![set(105.0, 3, true)]),
            workout_on(date(3), vec![set(105.0, 4, true), set(90.0, 10, true)]),
        ];
        let stats = WorkoutStats::from_history(&history, date(3));

        assert_eq!(stats.personal_records.len(), 1);
        let record = &stats.personal_records[0];
        assert_eq!(record.weight_kg, 105.0);
        assert_eq!(record.reps, 4);
        assert_eq!(record.achieved_on, date(3));
    }

    #[test]
    fn test_personal_record_keeps_earliest_tie() {
        let history = vec![
            workout_on(date(4), vec![set(80.0, 8, true)]),
            workout_on(date(2), vec![set(80.0, 8, true)]),
        ];
        let stats = WorkoutStats::from_history(&history, date(4));
        assert_eq!(stats.personal_records[0].achieved_on, date(2));
    }
}
