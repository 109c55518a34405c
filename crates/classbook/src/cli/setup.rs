use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use classbookapp::model::{AttendanceStatus, Category, GradeLevel, StudentStatus};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "classbook",
    bin_name = "classbook",
    version,
    disable_help_subcommand = true,
    after_help = "Every run starts from the seed snapshot; edits last for that run only.\nSet RUST_LOG=classbookapp=debug to trace store calls."
)]
#[command(about = "Classroom roster, gradebook and attendance from the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding config.json (defaults to the OS config dir)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub config_dir: Option<PathBuf>,

    /// JSON seed snapshot to start from (overrides the config)
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub seed: Option<PathBuf>,

    /// Skip the simulated store latency
    #[arg(long, global = true, help_heading = "Options")]
    pub no_latency: bool,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage the student roster
    #[command(subcommand, alias = "s", display_order = 1)]
    Students(StudentCommands),

    /// Manage assignments
    #[command(subcommand, alias = "a", display_order = 2)]
    Assignments(AssignmentCommands),

    /// View and enter grades for one assignment
    #[command(subcommand, alias = "g", display_order = 3)]
    Grades(GradeCommands),

    /// View the weekly grid and mark attendance
    #[command(subcommand, display_order = 4)]
    Attendance(AttendanceCommands),

    /// Per-student reports and class overview
    #[command(display_order = 5)]
    Report {
        /// Print CSV instead of a table
        #[arg(long)]
        csv: bool,

        /// Include the column header line in CSV output
        #[arg(long, requires = "csv")]
        header: bool,
    },

    /// Headline numbers, upcoming work and today's attendance
    #[command(display_order = 6)]
    Dashboard,

    /// Assignment due dates for one month
    #[command(display_order = 7)]
    Calendar {
        year: i32,

        /// Month number, 1-12
        month: u32,
    },

    /// Get or set configuration
    #[command(display_order = 8)]
    Config {
        /// Configuration key (e.g. latency, upcoming_limit)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum StudentCommands {
    /// List students with their average and attendance rate
    #[command(alias = "ls")]
    List {
        /// Match name or email, case-insensitive
        #[arg(short, long)]
        search: Option<String>,

        /// Only this grade level (K, 1-12)
        #[arg(short, long)]
        grade: Option<GradeLevel>,
    },

    /// Show one student
    Show { id: String },

    /// Enroll a student
    Add {
        first_name: String,
        last_name: String,

        /// Grade level (K, 1-12)
        #[arg(short, long)]
        grade: GradeLevel,

        #[arg(short, long)]
        email: String,

        /// Enrollment date (YYYY-MM-DD), today when omitted
        #[arg(long, value_parser = parse_date_time)]
        enrolled: Option<DateTime<Utc>>,

        #[arg(long, default_value = "active")]
        status: StudentStatus,
    },

    /// Change a student's details
    Edit {
        id: String,

        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        #[arg(short, long)]
        grade: Option<GradeLevel>,

        #[arg(short, long)]
        email: Option<String>,

        #[arg(long)]
        status: Option<StudentStatus>,
    },

    /// Remove a student (grades and attendance are kept)
    #[command(alias = "rm")]
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum AssignmentCommands {
    /// List assignments
    #[command(alias = "ls")]
    List,

    /// Create an assignment
    Add {
        title: String,

        /// homework, quiz, test, project, participation or extra-credit
        #[arg(short, long)]
        category: Category,

        /// Points available
        #[arg(short, long)]
        points: f64,

        /// Due date (YYYY-MM-DD or RFC 3339)
        #[arg(short, long, value_parser = parse_date_time)]
        due: DateTime<Utc>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Change an assignment
    Edit {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(short, long)]
        category: Option<Category>,

        #[arg(short, long)]
        points: Option<f64>,

        #[arg(short, long, value_parser = parse_date_time)]
        due: Option<DateTime<Utc>>,

        #[arg(long, conflicts_with = "clear_description")]
        description: Option<String>,

        /// Remove the description
        #[arg(long)]
        clear_description: bool,
    },

    /// Delete an assignment (its grades are kept)
    #[command(alias = "rm")]
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum GradeCommands {
    /// The grade matrix of one assignment
    Show { assignment: String },

    /// Record a score
    Set {
        assignment: String,
        student: String,
        score: f64,
    },
}

#[derive(Subcommand, Debug)]
pub enum AttendanceCommands {
    /// The Sunday-to-Saturday grid containing DATE (today when omitted)
    Week {
        #[arg(value_parser = parse_date)]
        date: Option<NaiveDate>,
    },

    /// Mark a student on a day
    Mark {
        student: String,

        #[arg(value_parser = parse_date)]
        date: NaiveDate,

        /// present, absent, late or excused
        status: AttendanceStatus,
    },
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| format!("expected a date like 2024-03-05, got '{raw}'"))
}

/// `YYYY-MM-DD` (midnight UTC) or a full RFC 3339 timestamp.
pub fn parse_date_time(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw.trim()) {
        return Ok(instant.with_timezone(&Utc));
    }
    parse_date(raw).map(classbookapp::commands::attendance::start_of_day)
}
