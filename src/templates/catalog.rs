//! Starter routine templates.
//!
//! Statically defined skeletons used to bootstrap a new user's first routine.
//! Display names are i18n keys; the front end resolves them.

use serde::Serialize;

use super::types::{ExperienceLevel, GoalCategory};

/// One planned exercise in a template day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateExercise {
    /// Exercise catalog id
    pub exercise_id: &'static str,
    /// Number of working sets
    pub sets: u8,
    /// Target reps per set
    pub reps: u32,
}

/// One training day in a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateDay {
    /// Position of the day within the week (0-based)
    pub index: u8,
    /// i18n key of the day label
    pub label_key: &'static str,
    /// Planned exercises in order
    pub exercises: &'static [TemplateExercise],
}

/// A predefined routine skeleton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StarterTemplate {
    /// Stable identifier
    pub id: &'static str,
    /// i18n key of the display name
    pub name_key: &'static str,
    /// Training days per week
    pub days_per_week: u8,
    /// Experience levels this template suits
    pub levels: &'static [ExperienceLevel],
    /// Goal categories this template suits
    pub goals: &'static [GoalCategory],
    /// Day structure
    pub days: &'static [TemplateDay],
}

impl StarterTemplate {
    /// Check whether the template is tagged with a goal category.
    pub fn supports_goal(&self, goal: GoalCategory) -> bool {
        self.goals.contains(&goal)
    }

    /// Check whether the template is tagged with an experience level.
    pub fn supports_level(&self, level: ExperienceLevel) -> bool {
        self.levels.contains(&level)
    }
}

const fn ex(exercise_id: &'static str, sets: u8, reps: u32) -> TemplateExercise {
    TemplateExercise {
        exercise_id,
        sets,
        reps,
    }
}

const FULL_BODY_2: StarterTemplate = StarterTemplate {
    id: "full_body_2",
    name_key: "templates.full_body_2.name",
    days_per_week: 2,
    levels: &[ExperienceLevel::Beginner, ExperienceLevel::Intermediate],
    goals: &[GoalCategory::General],
    days: &[
        TemplateDay {
            index: 0,
            label_key: "templates.full_body_2.day_a",
            exercises: &[
                ex("barbell_squat", 3, 8),
                ex("bench_press", 3, 8),
                ex("barbell_row", 3, 10),
                ex("plank", 3, 30),
            ],
        },
        TemplateDay {
            index: 1,
            label_key: "templates.full_body_2.day_b",
            exercises: &[
                ex("deadlift", 3, 5),
                ex("overhead_press", 3, 8),
                ex("lat_pulldown", 3, 10),
                ex("walking_lunge", 2, 12),
            ],
        },
    ],
};

const FULL_BODY_3: StarterTemplate = StarterTemplate {
    id: "full_body_3",
    name_key: "templates.full_body_3.name",
    days_per_week: 3,
    levels: &[ExperienceLevel::Beginner],
    goals: &[GoalCategory::General, GoalCategory::Strength],
    days: &[
        TemplateDay {
            index: 0,
            label_key: "templates.full_body_3.day_a",
            exercises: &[
                ex("barbell_squat", 3, 5),
                ex("bench_press", 3, 5),
                ex("barbell_row", 3, 8),
            ],
        },
        TemplateDay {
            index: 1,
            label_key: "templates.full_body_3.day_b",
            exercises: &[
                ex("deadlift", 1, 5),
                ex("overhead_press", 3, 5),
                ex("pull_up", 3, 8),
            ],
        },
        TemplateDay {
            index: 2,
            label_key: "templates.full_body_3.day_c",
            exercises: &[
                ex("leg_press", 3, 10),
                ex("incline_dumbbell_press", 3, 10),
                ex("seated_cable_row", 3, 10),
                ex("hanging_leg_raise", 3, 12),
            ],
        },
    ],
};

const UPPER_LOWER_4: StarterTemplate = StarterTemplate {
    id: "upper_lower_4",
    name_key: "templates.upper_lower_4.name",
    days_per_week: 4,
    levels: &[ExperienceLevel::Beginner, ExperienceLevel::Intermediate],
    goals: &[GoalCategory::Strength, GoalCategory::Hypertrophy],
    days: &[
        TemplateDay {
            index: 0,
            label_key: "templates.upper_lower_4.upper_a",
            exercises: &[
                ex("bench_press", 4, 6),
                ex("barbell_row", 4, 6),
                ex("overhead_press", 3, 8),
                ex("barbell_curl", 3, 10),
            ],
        },
        TemplateDay {
            index: 1,
            label_key: "templates.upper_lower_4.lower_a",
            exercises: &[
                ex("barbell_squat", 4, 6),
                ex("romanian_deadlift", 3, 8),
                ex("standing_calf_raise", 3, 12),
            ],
        },
        TemplateDay {
            index: 2,
            label_key: "templates.upper_lower_4.upper_b",
            exercises: &[
                ex("incline_dumbbell_press", 3, 10),
                ex("lat_pulldown", 3, 10),
                ex("lateral_raise", 3, 15),
                ex("triceps_pushdown", 3, 12),
            ],
        },
        TemplateDay {
            index: 3,
            label_key: "templates.upper_lower_4.lower_b",
            exercises: &[
                ex("deadlift", 3, 5),
                ex("leg_press", 3, 10),
                ex("leg_curl", 3, 12),
                ex("cable_crunch", 3, 15),
            ],
        },
    ],
};

const BODY_PART_5: StarterTemplate = StarterTemplate {
    id: "body_part_5",
    name_key: "templates.body_part_5.name",
    days_per_week: 5,
    levels: &[ExperienceLevel::Intermediate, ExperienceLevel::Advanced],
    goals: &[GoalCategory::Hypertrophy],
    days: &[
        TemplateDay {
            index: 0,
            label_key: "templates.body_part_5.chest",
            exercises: &[
                ex("bench_press", 4, 8),
                ex("incline_dumbbell_press", 3, 10),
                ex("cable_fly", 3, 12),
            ],
        },
        TemplateDay {
            index: 1,
            label_key: "templates.body_part_5.back",
            exercises: &[
                ex("deadlift", 3, 5),
                ex("pull_up", 3, 8),
                ex("seated_cable_row", 3, 10),
            ],
        },
        TemplateDay {
            index: 2,
            label_key: "templates.body_part_5.legs",
            exercises: &[
                ex("barbell_squat", 4, 8),
                ex("leg_press", 3, 12),
                ex("leg_curl", 3, 12),
                ex("seated_calf_raise", 4, 15),
            ],
        },
        TemplateDay {
            index: 3,
            label_key: "templates.body_part_5.shoulders",
            exercises: &[
                ex("overhead_press", 4, 8),
                ex("lateral_raise", 4, 15),
                ex("face_pull", 3, 15),
            ],
        },
        TemplateDay {
            index: 4,
            label_key: "templates.body_part_5.arms",
            exercises: &[
                ex("barbell_curl", 3, 10),
                ex("skull_crusher", 3, 10),
                ex("hammer_curl", 3, 12),
                ex("triceps_pushdown", 3, 12),
            ],
        },
    ],
};

const PUSH_PULL_LEGS_6: StarterTemplate = StarterTemplate {
    id: "push_pull_legs_6",
    name_key: "templates.push_pull_legs_6.name",
    days_per_week: 6,
    levels: &[ExperienceLevel::Intermediate, ExperienceLevel::Advanced],
    goals: &[GoalCategory::Hypertrophy, GoalCategory::Strength],
    days: &[
        TemplateDay {
            index: 0,
            label_key: "templates.push_pull_legs_6.push_a",
            exercises: &[
                ex("bench_press", 4, 5),
                ex("overhead_press", 3, 8),
                ex("lateral_raise", 3, 15),
                ex("triceps_pushdown", 3, 12),
            ],
        },
        TemplateDay {
            index: 1,
            label_key: "templates.push_pull_legs_6.pull_a",
            exercises: &[
                ex("deadlift", 3, 5),
                ex("lat_pulldown", 3, 10),
                ex("face_pull", 3, 15),
                ex("barbell_curl", 3, 10),
            ],
        },
        TemplateDay {
            index: 2,
            label_key: "templates.push_pull_legs_6.legs_a",
            exercises: &[
                ex("barbell_squat", 4, 5),
                ex("romanian_deadlift", 3, 8),
                ex("standing_calf_raise", 4, 12),
            ],
        },
        TemplateDay {
            index: 3,
            label_key: "templates.push_pull_legs_6.push_b",
            exercises: &[
                ex("incline_dumbbell_press", 4, 10),
                ex("dumbbell_shoulder_press", 3, 10),
                ex("cable_fly", 3, 12),
                ex("dip", 3, 10),
            ],
        },
        TemplateDay {
            index: 4,
            label_key: "templates.push_pull_legs_6.pull_b",
            exercises: &[
                ex("barbell_row", 4, 8),
                ex("pull_up", 3, 8),
                ex("seated_cable_row", 3, 12),
                ex("hammer_curl", 3, 12),
            ],
        },
        TemplateDay {
            index: 5,
            label_key: "templates.push_pull_legs_6.legs_b",
            exercises: &[
                ex("leg_press", 4, 10),
                ex("walking_lunge", 3, 12),
                ex("leg_curl", 3, 12),
                ex("seated_calf_raise", 4, 15),
            ],
        },
    ],
};

/// All starter templates, in tie-break order.
pub const STARTER_TEMPLATES: &[StarterTemplate] = &[
    FULL_BODY_2,
    FULL_BODY_3,
    UPPER_LOWER_4,
    BODY_PART_5,
    PUSH_PULL_LEGS_6,
];

/// Look up a template by id.
pub fn find_template(id: &str) -> Option<&'static StarterTemplate> {
    STARTER_TEMPLATES.iter().find(|t| t.id == id)
}
