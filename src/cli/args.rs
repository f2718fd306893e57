use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::habits::Frequency;

#[derive(Parser)]
#[command(name = "habitual")]
#[command(about = "A personal habit tracker for the terminal")]
#[command(long_about = "habitual - A personal habit tracker for the terminal

Create habits with a schedule, check them off each day, and watch your
streaks and completion rates grow.

QUICK START:
  habitual auth login alice        Sign in
  habitual add \"Drink water\"       Create a daily habit
  habitual list                    Today's habits
  habitual complete <id>           Mark a habit done for today
  habitual dashboard               Interactive dashboard

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  habitual <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Defaults to the `general.default_output` config setting.
    #[arg(short, long, value_enum, global = true, env = "HABITUAL_OUTPUT")]
    pub output: Option<OutputFormat>,

    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in, sign out, or show the current user
    Auth(AuthArgs),

    /// Create a habit
    ///
    /// # Examples
    ///
    ///   habitual add "Drink water"
    ///   habitual add "Run" -c Fitness -f weekly -t 3 --icon 🏃
    ///   habitual add "Read" -d "20 pages" --color "#3366FF"
    #[command(alias = "a")]
    Add(AddArgs),

    /// Change a habit's fields
    ///
    /// Only the flags given are changed.
    Edit(EditArgs),

    /// List habits with their completion state for a date
    ///
    /// # Examples
    ///
    ///   habitual list                    Today's habits
    ///   habitual list --date yesterday   Yesterday's check marks
    ///   habitual list -c Fitness         One category
    ///   habitual list --completed        Only habits done on the date
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one habit in detail
    Show {
        /// Habit ID
        id: String,
    },

    /// Mark a habit completed for today
    ///
    /// Completions are only accepted for the current day. Completing a habit
    /// twice on the same day records nothing the second time.
    #[command(alias = "done")]
    Complete {
        /// Habit ID
        id: String,

        /// Date to complete for (must be today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Archive a habit, hiding it from lists and statistics
    Archive {
        /// Habit ID
        id: String,
    },

    /// Restore an archived habit
    Unarchive {
        /// Habit ID
        id: String,
    },

    /// Delete a habit and its completion history
    #[command(alias = "rm")]
    Delete {
        /// Habit ID
        id: String,

        /// Confirm the deletion
        #[arg(short, long)]
        yes: bool,
    },

    /// Per-habit completion statistics
    Stats,

    /// Share of habits completed today
    Progress {
        /// Only habits in this category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Suggested categories and the ones in use
    Categories,

    /// Interactive dashboard
    ///
    /// Keys: h/l or arrows change the date, j/k move, space completes,
    /// f cycles the category filter, t jumps to today, q quits.
    #[command(alias = "tui")]
    Dashboard,

    /// Generate shell completions
    ///
    /// # Examples
    ///
    ///   habitual completions bash > ~/.local/share/bash-completion/completions/habitual
    ///   habitual completions zsh > ~/.zsh/completions/_habitual
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommands,
}

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Sign in as a user
    Login {
        /// User ID
        user: String,

        /// Mark the email address as not yet verified
        #[arg(long)]
        unverified: bool,
    },

    /// Mark the signed-in user's email address as verified
    Verify,

    /// Sign out
    Logout,

    /// Show the signed-in user
    Whoami,
}

#[derive(Args)]
pub struct AddArgs {
    /// Habit name
    pub name: String,

    /// Longer description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Category (Health, Fitness, Productivity, Learning, Mindfulness, Social, Other, or your own)
    #[arg(short, long)]
    pub category: Option<String>,

    /// How often: daily, weekly or monthly
    #[arg(short, long)]
    pub frequency: Option<Frequency>,

    /// Target days per period (1-7 for daily and weekly, 1-31 for monthly)
    #[arg(short, long)]
    pub target_days: Option<u32>,

    /// Hex color, e.g. #E50046
    #[arg(long)]
    pub color: Option<String>,

    /// Icon shown next to the name
    #[arg(long)]
    pub icon: Option<String>,
}

#[derive(Args)]
pub struct EditArgs {
    /// Habit ID
    pub id: String,

    /// New name
    #[arg(short, long)]
    pub name: Option<String>,

    /// New description
    #[arg(short, long, conflicts_with = "clear_description")]
    pub description: Option<String>,

    /// Remove the description
    #[arg(long)]
    pub clear_description: bool,

    /// New category
    #[arg(short, long)]
    pub category: Option<String>,

    /// New frequency
    #[arg(short, long)]
    pub frequency: Option<Frequency>,

    /// New target days per period
    #[arg(short, long)]
    pub target_days: Option<u32>,

    /// New hex color
    #[arg(long)]
    pub color: Option<String>,

    /// New icon
    #[arg(long)]
    pub icon: Option<String>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Date to show completion state for (today, yesterday, 3 days ago, 2024-01-10)
    #[arg(long)]
    pub date: Option<String>,

    /// Only habits in this category
    #[arg(short, long)]
    pub category: Option<String>,

    /// Include archived habits
    #[arg(short, long)]
    pub archived: bool,

    /// Only habits completed on the date
    #[arg(long)]
    pub completed: bool,
}
