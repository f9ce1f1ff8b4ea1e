use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "coachvital",
    version,
    about = "Agent-native client-insights CLI for fitness coaching"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as human-readable text instead of JSON
    #[arg(long = "human", short = 'H', global = true)]
    pub human: bool,

    /// Override date (YYYY-MM-DD)
    #[arg(long, global = true)]
    pub date: Option<NaiveDate>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize config and data directory
    Init {
        /// Skip interactive setup, use defaults
        #[arg(long)]
        skip: bool,
    },

    /// Log training or nutrition data
    Log {
        #[command(subcommand)]
        entry: LogCommand,
    },

    /// Show logged history
    Show {
        #[command(subcommand)]
        what: ShowCommand,
    },

    /// Compute insights and scores for a client
    Insights {
        /// Client id or alias
        client: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum LogCommand {
    /// Log a workout session
    Session {
        /// Client id or alias
        #[arg(long)]
        client: String,

        /// Routine id
        #[arg(long)]
        routine: Option<String>,

        /// Session length in minutes
        #[arg(long)]
        duration: Option<f64>,

        /// Session status (in_progress/completed/paused)
        #[arg(long, default_value = "completed")]
        status: String,

        /// Free-text note
        #[arg(long)]
        notes: Option<String>,
    },

    /// Log sets against a session
    Set {
        /// Session id
        #[arg(long)]
        session: String,

        /// Exercise id
        #[arg(long)]
        exercise: String,

        /// One or more WEIGHTxREPS[@RPE] specs, e.g. 100x5@8
        #[arg(required = true)]
        specs: Vec<String>,

        /// Velocity metrics as PEAK:DROP (m/s and percent)
        #[arg(long)]
        velocity: Option<String>,
    },

    /// Log a personal record
    Pr {
        /// Client id or alias
        #[arg(long)]
        client: String,

        /// Exercise id
        #[arg(long)]
        exercise: String,

        #[arg(long)]
        weight: f64,

        #[arg(long)]
        reps: u32,
    },

    /// Log a day's nutrition (appends a meal to the day's log)
    Nutrition {
        /// Client id or alias
        #[arg(long)]
        client: String,

        #[arg(long, default_value_t = 0.0)]
        calories: f64,

        #[arg(long, default_value_t = 0.0)]
        protein: f64,

        #[arg(long, default_value_t = 0.0)]
        carbs: f64,

        #[arg(long, default_value_t = 0.0)]
        fat: f64,

        /// Meal name
        #[arg(long)]
        meal: Option<String>,
    },

    /// Register exercise metadata
    Exercise {
        /// Exercise id (slug)
        id: String,

        /// Display name (defaults to the id)
        #[arg(long)]
        name: Option<String>,

        /// Primary muscle group
        #[arg(long)]
        muscle: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ShowCommand {
    /// Recent sessions for a client
    Sessions {
        #[arg(long)]
        client: String,

        /// Number of recent entries to show
        #[arg(long)]
        last: Option<u32>,
    },

    /// PR history for a client
    Prs {
        #[arg(long)]
        client: String,

        #[arg(long)]
        last: Option<u32>,
    },

    /// Nutrition logs for a client
    Nutrition {
        #[arg(long)]
        client: String,

        /// Days to look back (default 28)
        #[arg(long)]
        last: Option<u32>,
    },

    /// Registered exercises
    Exercises,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set a config value
    Set {
        /// Config key (e.g. coach.name, alias.jane)
        key: String,
        /// Config value
        value: String,
    },
}
