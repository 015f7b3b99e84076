//! Built-in exercise library.

use serde::{Deserialize, Serialize};

/// Primary muscle group trained by an exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    Chest,
    Back,
    Shoulders,
    Biceps,
    Triceps,
    Quads,
    Hamstrings,
    Calves,
    Core,
}

impl MuscleGroup {
    /// Get display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            MuscleGroup::Chest => "Chest",
            MuscleGroup::Back => "Back",
            MuscleGroup::Shoulders => "Shoulders",
            MuscleGroup::Biceps => "Biceps",
            MuscleGroup::Triceps => "Triceps",
            MuscleGroup::Quads => "Quads",
            MuscleGroup::Hamstrings => "Hamstrings",
            MuscleGroup::Calves => "Calves",
            MuscleGroup::Core => "Core",
        }
    }
}

impl std::fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Equipment needed for an exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Equipment {
    Barbell,
    Dumbbell,
    Cable,
    Machine,
    Bodyweight,
}

/// A catalog exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exercise {
    /// Stable identifier
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Primary muscle group
    pub muscle_group: MuscleGroup,
    /// Required equipment
    pub equipment: Equipment,
}

const fn exercise(
    id: &'static str,
    name: &'static str,
    muscle_group: MuscleGroup,
    equipment: Equipment,
) -> Exercise {
    Exercise {
        id,
        name,
        muscle_group,
        equipment,
    }
}

/// Every exercise the templates and the replacement picker know about.
pub const EXERCISES: &[Exercise] = &[
    // Legs
    exercise("barbell_squat", "Barbell Squat", MuscleGroup::Quads, Equipment::Barbell),
    exercise("leg_press", "Leg Press", MuscleGroup::Quads, Equipment::Machine),
    exercise("walking_lunge", "Walking Lunge", MuscleGroup::Quads, Equipment::Dumbbell),
    exercise("leg_extension", "Leg Extension", MuscleGroup::Quads, Equipment::Machine),
    exercise("deadlift", "Deadlift", MuscleGroup::Hamstrings, Equipment::Barbell),
    exercise("romanian_deadlift", "Romanian Deadlift", MuscleGroup::Hamstrings, Equipment::Barbell),
    exercise("leg_curl", "Leg Curl", MuscleGroup::Hamstrings, Equipment::Machine),
    exercise("standing_calf_raise", "Standing Calf Raise", MuscleGroup::Calves, Equipment::Machine),
    exercise("seated_calf_raise", "Seated Calf Raise", MuscleGroup::Calves, Equipment::Machine),
    // Push
    exercise("bench_press", "Bench Press", MuscleGroup::Chest, Equipment::Barbell),
    exercise("incline_dumbbell_press", "Incline Dumbbell Press", MuscleGroup::Chest, Equipment::Dumbbell),
    exercise("push_up", "Push-Up", MuscleGroup::Chest, Equipment::Bodyweight),
    exercise("cable_fly", "Cable Fly", MuscleGroup::Chest, Equipment::Cable),
    exercise("overhead_press", "Overhead Press", MuscleGroup::Shoulders, Equipment::Barbell),
    exercise("dumbbell_shoulder_press", "Dumbbell Shoulder Press", MuscleGroup::Shoulders, Equipment::Dumbbell),
    exercise("lateral_raise", "Lateral Raise", MuscleGroup::Shoulders, Equipment::Dumbbell),
    exercise("triceps_pushdown", "Triceps Pushdown", MuscleGroup::Triceps, Equipment::Cable),
    exercise("skull_crusher", "Skull Crusher", MuscleGroup::Triceps, Equipment::Barbell),
    exercise("dip", "Dip", MuscleGroup::Triceps, Equipment::Bodyweight),
    // Pull
    exercise("barbell_row", "Barbell Row", MuscleGroup::Back, Equipment::Barbell),
    exercise("lat_pulldown", "Lat Pulldown", MuscleGroup::Back, Equipment::Cable),
    exercise("pull_up", "Pull-Up", MuscleGroup::Back, Equipment::Bodyweight),
    exercise("seated_cable_row", "Seated Cable Row", MuscleGroup::Back, Equipment::Cable),
    exercise("face_pull", "Face Pull", MuscleGroup::Shoulders, Equipment::Cable),
    exercise("barbell_curl", "Barbell Curl", MuscleGroup::Biceps, Equipment::Barbell),
    exercise("hammer_curl", "Hammer Curl", MuscleGroup::Biceps, Equipment::Dumbbell),
    exercise("incline_dumbbell_curl", "Incline Dumbbell Curl", MuscleGroup::Biceps, Equipment::Dumbbell),
    // Core
    exercise("plank", "Plank", MuscleGroup::Core, Equipment::Bodyweight),
    exercise("hanging_leg_raise", "Hanging Leg Raise", MuscleGroup::Core, Equipment::Bodyweight),
    exercise("cable_crunch", "Cable Crunch", MuscleGroup::Core, Equipment::Cable),
];

/// Look up an exercise by id.
pub fn find_exercise(id: &str) -> Option<&'static Exercise> {
    EXERCISES.iter().find(|e| e.id == id)
}

/// Other exercises that train the same muscle group, in catalog order.
pub fn alternatives(id: &str) -> Vec<&'static Exercise> {
    let Some(base) = find_exercise(id) else {
        return Vec::new();
    };

    EXERCISES
        .iter()
        .filter(|e| e.muscle_group == base.muscle_group && e.id != base.id)
        .collect()
}
