//! IronLog - Strength Training Tracker
//!
//! Command-line entry point.
//!
//! ```bash
//! # First run: answer the onboarding questions and get a starter routine
//! ironlog onboard --name Alex --days 4 --goal muscle --level intermediate
//!
//! # See why a template was picked
//! ironlog recommend --days 3 --goal strength --level beginner
//!
//! # Start day 0 of the first routine and log it set by set
//! ironlog start --day 0
//! ironlog log --exercise bench_press --set 1 --weight 60 --reps 8
//! ironlog done --exercise bench_press --set 1
//! ironlog rest --exercise bench_press
//! ironlog resume --finish
//! ```

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use ironlog::exercises::{alternatives, find_exercise};
use ironlog::onboarding::{OnboardingStep, OnboardingWizard};
use ironlog::session::{CachedSession, ClockEvent, ExerciseRef, SetField};
use ironlog::storage::{load_config, load_config_from, AppConfig, Database, UserProfile};
use ironlog::templates::{
    recommend, score_templates, ExperienceLevel, Goal, RecommendationInput, STARTER_TEMPLATES,
};
use ironlog::{RoutineManager, SessionClock, WorkoutStats};

#[derive(Parser)]
#[command(
    name = "ironlog",
    version,
    about = "IronLog strength training tracker",
    long_about = "Pick a starter routine, log workouts and review training stats"
)]
struct Cli {
    /// Use this directory for config.toml and the database instead of the default
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the starter templates
    Templates,

    /// Score every starter template for a profile
    Recommend {
        /// Days per week available for training
        #[arg(long)]
        days: u8,
        /// Training goal (e.g. muscle, strength, general)
        #[arg(long)]
        goal: Goal,
        /// Experience level (beginner, intermediate, advanced)
        #[arg(long)]
        level: ExperienceLevel,
    },

    /// Create the user profile and first routine
    Onboard {
        #[arg(long)]
        name: String,
        #[arg(long)]
        days: u8,
        #[arg(long)]
        goal: Goal,
        #[arg(long)]
        level: ExperienceLevel,
        /// Use this template instead of the recommended one
        #[arg(long)]
        template: Option<String>,
    },

    /// List routines
    Routines,

    /// Start a workout for one day of a routine
    Start {
        /// Day index within the routine
        #[arg(long, default_value_t = 0)]
        day: u8,
        /// Routine id (defaults to the first routine)
        #[arg(long)]
        routine: Option<Uuid>,
    },

    /// Log weight and reps for a set of the workout in progress
    Log {
        #[arg(long)]
        exercise: String,
        /// Set number, starting at 1
        #[arg(long)]
        set: usize,
        /// Weight in kg, rounded to the configured increment
        #[arg(long, conflicts_with = "bump")]
        weight: Option<f32>,
        /// Move the weight up or down by this many increments
        #[arg(long, allow_negative_numbers = true)]
        bump: Option<i32>,
        #[arg(long)]
        reps: Option<u32>,
    },

    /// Mark a set done, or not done if it already is
    Done {
        #[arg(long)]
        exercise: String,
        /// Set number, starting at 1
        #[arg(long)]
        set: usize,
    },

    /// Append a set to an exercise
    AddSet {
        #[arg(long)]
        exercise: String,
    },

    /// Remove a set from an exercise
    RemoveSet {
        #[arg(long)]
        exercise: String,
        /// Set number, starting at 1
        #[arg(long)]
        set: usize,
    },

    /// Swap an exercise for another one
    Swap {
        #[arg(long)]
        exercise: String,
        /// Replacement exercise id (defaults to the first alternative not in the workout)
        #[arg(long)]
        with: Option<String>,
    },

    /// Count down a rest period
    Rest {
        /// Use this exercise's rest period
        #[arg(long, conflicts_with = "seconds")]
        exercise: Option<String>,
        #[arg(long)]
        seconds: Option<u32>,
        /// Add seconds to the rest period
        #[arg(long)]
        extend: Option<u32>,
    },

    /// Show the workout in progress
    Resume {
        /// Finish the workout and record it in history
        #[arg(long, conflicts_with = "discard")]
        finish: bool,
        /// Discard the workout
        #[arg(long)]
        discard: bool,
    },

    /// List finished workouts, most recent first
    History {
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show training statistics
    Stats,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting IronLog v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let config = match &cli.data_dir {
        Some(dir) => load_config_from(&dir.join("config.toml"))?,
        None => load_config()?,
    };

    match cli.command {
        Command::Templates => list_templates(),
        Command::Recommend { days, goal, level } => {
            explain_recommendation(RecommendationInput::new(days, goal, level))
        }
        Command::Onboard {
            name,
            days,
            goal,
            level,
            template,
        } => onboard(&config, &name, days, goal, level, template.as_deref()),
        Command::Routines => list_routines(&config),
        Command::Start { day, routine } => start_workout(&config, routine, day),
        Command::Log {
            exercise,
            set,
            weight,
            bump,
            reps,
        } => log_set(&config, &exercise, set, weight, bump, reps),
        Command::Done { exercise, set } => mark_done(&config, &exercise, set),
        Command::AddSet { exercise } => add_set(&config, &exercise),
        Command::RemoveSet { exercise, set } => remove_set(&config, &exercise, set),
        Command::Swap { exercise, with } => swap_exercise(&config, &exercise, with.as_deref()),
        Command::Rest {
            exercise,
            seconds,
            extend,
        } => rest(&config, exercise.as_deref(), seconds, extend),
        Command::Resume { finish, discard } => resume_workout(&config, finish, discard),
        Command::History { limit } => show_history(&config, limit),
        Command::Stats => show_stats(&config),
    }
}

fn open_database(config: &AppConfig) -> Result<Database> {
    let path = config.database_path();
    Database::open(&path).with_context(|| format!("opening database at {}", path.display()))
}

fn list_templates() -> Result<()> {
    for template in STARTER_TEMPLATES {
        println!(
            "{:<18} {} days  levels: {:<30} days: {}",
            template.id,
            template.days_per_week,
            template
                .levels
                .iter()
                .map(|l| l.to_string())
                .collect::<Vec<_>>()
                .join(", "),
            template
                .days
                .iter()
                .map(|d| d.label_key)
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    Ok(())
}

fn explain_recommendation(input: RecommendationInput) -> Result<()> {
    let best = recommend(&input);

    println!(
        "Profile: {} days, {} ({:?}), {}",
        input.clamped_days(),
        input.goal,
        input.goal.category(),
        input.level
    );
    for score in score_templates(&input) {
        let marker = if score.template.id == best.id { "*" } else { " " };
        println!(
            "{} {:<18} {:>4}  days:{} goal:{} level:{}",
            marker,
            score.template.id,
            score.score,
            score.days_match,
            score.goal_match,
            score.level_match
        );
    }
    Ok(())
}

fn onboard(
    config: &AppConfig,
    name: &str,
    days: u8,
    goal: Goal,
    level: ExperienceLevel,
    template: Option<&str>,
) -> Result<()> {
    let mut wizard = OnboardingWizard::new();
    wizard.set_name(name)?;
    wizard.set_goal(goal);
    wizard.set_level(level);
    wizard.set_days_per_week(days)?;

    while wizard.current_step() != OnboardingStep::Recommendation {
        wizard.next_step()?;
    }
    if let Some(template) = template {
        wizard.choose_template(template)?;
    }

    let outcome = wizard.finish(config)?;
    let mut profile = outcome.profile;

    let db = open_database(config)?;
    match db.get_default_user()? {
        Some(existing) => {
            profile.id = existing.id;
            profile.created_at = existing.created_at;
            db.update_user(&profile)?;
        }
        None => db.insert_user(&profile)?,
    }

    let mut manager = RoutineManager::load(&db, profile.id)?;
    if let Some(routine) = outcome.routine {
        let routine = manager.create(routine)?;
        println!(
            "Welcome, {}! Created routine '{}' ({}) with {} days.",
            profile.name,
            routine.name,
            routine.id,
            routine.days.len()
        );
    }
    Ok(())
}

fn list_routines(config: &AppConfig) -> Result<()> {
    let db = open_database(config)?;
    let user = default_user(&db)?;
    let manager = RoutineManager::load(&db, user.id)?;

    if manager.list().is_empty() {
        println!("No routines yet. Run `ironlog onboard` to create one.");
    }
    for routine in manager.list() {
        println!("{} {}", routine.id, routine.name);
        for day in &routine.days {
            println!(
                "  [{}] {} - {} exercises, {} sets",
                day.index,
                day.label,
                day.exercises.len(),
                day.total_sets()
            );
        }
    }
    Ok(())
}

fn start_workout(config: &AppConfig, routine_id: Option<Uuid>, day: u8) -> Result<()> {
    let db = open_database(config)?;
    let user = default_user(&db)?;
    let manager = RoutineManager::load(&db, user.id)?;

    let routine = match routine_id {
        Some(id) => manager.get(id).with_context(|| format!("no routine {}", id))?,
        None => match manager.list().first() {
            Some(routine) => routine,
            None => bail!("no routines yet, run `ironlog onboard` first"),
        },
    };

    let session = CachedSession::start(&db, routine, day, config.session.autosave)?;
    let workout = session.workout()?;
    println!(
        "Started {} / {} with {} exercises",
        workout.routine_name,
        workout.day_label,
        workout.exercises.len()
    );
    if !config.session.autosave {
        println!("Autosave is off; this workout is not kept between commands.");
    }
    Ok(())
}

/// Set numbers on the command line start at 1.
fn set_index(set: usize) -> Result<usize> {
    match set.checked_sub(1) {
        Some(index) => Ok(index),
        None => bail!("set numbers start at 1"),
    }
}

fn log_set(
    config: &AppConfig,
    exercise: &str,
    set: usize,
    weight: Option<f32>,
    bump: Option<i32>,
    reps: Option<u32>,
) -> Result<()> {
    let index = set_index(set)?;
    if weight.is_none() && bump.is_none() && reps.is_none() {
        bail!("nothing to log, pass --weight, --bump or --reps");
    }

    let db = open_database(config)?;
    let mut session = CachedSession::resume(&db, config.session.autosave)?;
    let settings = &config.session;

    let current = session
        .workout()?
        .exercise(exercise)
        .and_then(|log| log.sets.get(index))
        .map(|s| s.weight_kg)
        .unwrap_or_default();
    let weight = match (weight, bump) {
        (Some(weight), _) => Some(settings.round_weight(weight)),
        (None, Some(steps)) => Some(settings.step_weight(current, steps)),
        (None, None) => None,
    };

    session.apply(|tracker| {
        if let Some(weight) = weight {
            tracker.log_set(exercise, index, SetField::Weight(weight))?;
        }
        if let Some(reps) = reps {
            tracker.log_set(exercise, index, SetField::Reps(reps))?;
        }
        Ok(())
    })?;

    if let Some(logged) = session
        .workout()?
        .exercise(exercise)
        .and_then(|log| log.sets.get(index))
    {
        println!("{} set {}: {} kg x {}", exercise, set, logged.weight_kg, logged.reps);
    }
    Ok(())
}

fn mark_done(config: &AppConfig, exercise: &str, set: usize) -> Result<()> {
    let index = set_index(set)?;
    let db = open_database(config)?;
    let mut session = CachedSession::resume(&db, config.session.autosave)?;

    let done = session.apply(|tracker| tracker.toggle_set_complete(exercise, index))?;
    println!(
        "{} set {} {}",
        exercise,
        set,
        if done { "done" } else { "not done" }
    );
    Ok(())
}

fn add_set(config: &AppConfig, exercise: &str) -> Result<()> {
    let db = open_database(config)?;
    let mut session = CachedSession::resume(&db, config.session.autosave)?;

    let index = session.apply(|tracker| tracker.add_set(exercise))?;
    println!("Added set {} to {}", index + 1, exercise);
    Ok(())
}

fn remove_set(config: &AppConfig, exercise: &str, set: usize) -> Result<()> {
    let index = set_index(set)?;
    let db = open_database(config)?;
    let mut session = CachedSession::resume(&db, config.session.autosave)?;

    let removed = session.apply(|tracker| tracker.remove_set(exercise, index))?;
    println!(
        "Removed set {} of {} ({} kg x {})",
        set, exercise, removed.weight_kg, removed.reps
    );
    Ok(())
}

fn swap_exercise(config: &AppConfig, exercise: &str, with: Option<&str>) -> Result<()> {
    let db = open_database(config)?;
    let mut session = CachedSession::resume(&db, config.session.autosave)?;

    let replacement = match with {
        Some(id) => find_exercise(id).with_context(|| format!("unknown exercise {}", id))?,
        None => {
            let workout = session.workout()?;
            match alternatives(exercise)
                .into_iter()
                .find(|e| workout.exercise(e.id).is_none())
            {
                Some(alternative) => alternative,
                None => bail!("no alternative for {} that is not already in the workout", exercise),
            }
        }
    };

    session.apply(|tracker| tracker.replace_exercise(exercise, ExerciseRef::from(replacement)))?;
    println!("Swapped {} for {}", exercise, replacement.name);
    Ok(())
}

fn rest(
    config: &AppConfig,
    exercise: Option<&str>,
    seconds: Option<u32>,
    extend: Option<u32>,
) -> Result<()> {
    let db = open_database(config)?;
    let mut tracker = CachedSession::resume(&db, config.session.autosave)?.into_tracker();

    match (exercise, seconds) {
        (Some(id), _) => {
            tracker.start_rest_after(id)?;
        }
        (None, Some(seconds)) => tracker.start_rest(seconds)?,
        (None, None) => tracker.start_rest(config.session.default_rest_seconds)?,
    }
    if let Some(extra) = extend {
        tracker.extend_rest(extra)?;
    }

    let Some(total) = tracker.rest_timer().remaining() else {
        println!("No rest to count down.");
        return Ok(());
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    runtime.block_on(async move {
        let tracker = Arc::new(Mutex::new(tracker));
        let mut clock = SessionClock::spawn(Arc::clone(&tracker));
        let mut events = clock.subscribe();

        println!("Resting {}s", total);
        loop {
            match events.recv().await {
                Ok(ClockEvent::Tick {
                    rest_remaining: Some(left),
                    ..
                }) if left % 10 == 0 => println!("  {}s left", left),
                Ok(ClockEvent::RestFinished) => {
                    println!("Rest over, next set!");
                    break;
                }
                Ok(ClockEvent::Stopped) | Err(RecvError::Closed) => break,
                Ok(_) | Err(RecvError::Lagged(_)) => {}
            }
        }
        clock.stop();
    });
    Ok(())
}

fn resume_workout(config: &AppConfig, finish: bool, discard: bool) -> Result<()> {
    let db = open_database(config)?;
    if !db.has_active_workout()? {
        println!("No workout in progress.");
        return Ok(());
    }
    let session = CachedSession::resume(&db, config.session.autosave)?;

    if discard {
        session.discard()?;
        println!("Workout discarded.");
        return Ok(());
    }

    if finish {
        let completed = session.finish(Utc::now())?;
        println!(
            "Finished {} in {} min: {} sets, {:.1} kg volume",
            completed.day_label,
            completed.duration_seconds / 60,
            completed.completed_sets(),
            completed.volume_kg()
        );
        return Ok(());
    }

    let workout = session.workout()?;
    let progress = workout.progress();
    println!(
        "{} / {}: {}/{} sets done, {} min elapsed",
        workout.routine_name,
        workout.day_label,
        progress.completed_sets,
        progress.total_sets,
        workout.elapsed_seconds(Utc::now()) / 60
    );
    for exercise in &workout.exercises {
        println!("  {} ({})", exercise.name, exercise.exercise_id);
        for (index, set) in exercise.sets.iter().enumerate() {
            let done = if workout.is_set_complete(&exercise.exercise_id, index) {
                "x"
            } else {
                " "
            };
            println!("     {}. [{}] {} kg x {}", index + 1, done, set.weight_kg, set.reps);
        }
    }
    Ok(())
}

fn show_history(config: &AppConfig, limit: Option<usize>) -> Result<()> {
    let db = open_database(config)?;
    let user = default_user(&db)?;

    for workout in db.list_workout_sessions(&user.id, limit)? {
        let (volume, unit) = user.display_weight(workout.volume_kg());
        println!(
            "{}  {:<24} {:<28} {:>3} min  {:>3} sets  {:.0} {}",
            workout.finished_at.format("%Y-%m-%d"),
            workout.routine_name,
            workout.day_label,
            workout.duration_seconds / 60,
            workout.completed_sets(),
            volume,
            unit
        );
    }
    Ok(())
}

fn show_stats(config: &AppConfig) -> Result<()> {
    let db = open_database(config)?;
    let user = default_user(&db)?;
    let history = db.list_workout_sessions(&user.id, None)?;
    let stats = WorkoutStats::from_history(&history, Utc::now().date_naive());

    let (volume, unit) = user.display_weight(stats.total_volume_kg as f32);
    println!("Workouts:        {}", stats.total_workouts);
    println!("Last 7 days:     {}", stats.workouts_last_7_days);
    println!("Current streak:  {} days", stats.current_streak_days);
    println!("Completed sets:  {}", stats.total_completed_sets);
    println!("Total volume:    {:.0} {}", volume, unit);
    println!("Average length:  {} min", stats.average_duration_seconds() / 60);

    if !stats.personal_records.is_empty() {
        println!("Personal records:");
        for record in &stats.personal_records {
            let (weight, unit) = user.display_weight(record.weight_kg);
            println!(
                "  {:<28} {:.1} {} x {} ({})",
                record.name, weight, unit, record.reps, record.achieved_on
            );
        }
    }
    Ok(())
}

fn default_user(db: &Database) -> Result<UserProfile> {
    Ok(db.get_or_create_default_user()?)
}
