//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Uses `std::process::exit`
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: convert shell arguments into typed commands via clap
//! 2. **Logging**: install the `tracing` subscriber on stderr
//! 3. **Configuration**: load `config.json`, apply command-line overrides
//! 4. **Dispatch**: route each command to its handler

use super::handlers;
use super::render;
use super::setup::{AssignmentCommands, AttendanceCommands, Cli, Commands, GradeCommands, StudentCommands};
use anyhow::{anyhow, Result};
use clap::Parser;
use classbookapp::api::ClassbookApi;
use classbookapp::config::{ClassbookConfig, LatencyMode};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_dir = config_dir(&cli)?;
    let mut config = ClassbookConfig::load(&config_dir)?;

    if let Commands::Config { key, value } = &cli.command {
        return handle_config(&mut config, &config_dir, key.as_deref(), value.as_deref());
    }

    if let Some(seed) = &cli.seed {
        config.seed_path = Some(seed.clone());
    }
    if cli.no_latency {
        config.latency = LatencyMode::None;
    }

    let api = ClassbookApi::from_config(config)?;
    dispatch(&api, cli.command).await
}

/// Logs go to stderr so they never mix with table or CSV output.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "warn,classbookapp=debug,classbook=debug"
    } else {
        "warn,classbookapp=info"
    };
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

fn config_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.config_dir {
        return Ok(dir.clone());
    }
    ProjectDirs::from("com", "classbook", "classbook")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| anyhow!("Could not determine a config directory, pass --config-dir"))
}

fn handle_config(
    config: &mut ClassbookConfig,
    config_dir: &Path,
    key: Option<&str>,
    value: Option<&str>,
) -> Result<()> {
    match (key, value) {
        (None, _) => print!("{}", render::render_config(config)),
        (Some(key), None) => println!("{}", config.get(key)?),
        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save(config_dir)?;
            println!("{} = {}", key, config.get(key)?);
        }
    }
    Ok(())
}

async fn dispatch(api: &ClassbookApi, command: Commands) -> Result<()> {
    match command {
        Commands::Students(cmd) => match cmd {
            StudentCommands::List { search, grade } => handlers::list_students(api, search, grade).await,
            StudentCommands::Show { id } => handlers::show_student(api, &id).await,
            StudentCommands::Add {
                first_name,
                last_name,
                grade,
                email,
                enrolled,
                status,
            } => handlers::add_student(api, first_name, last_name, grade, email, enrolled, status).await,
            StudentCommands::Edit {
                id,
                first_name,
                last_name,
                grade,
                email,
                status,
            } => {
                let patch = classbookapp::model::StudentPatch {
                    first_name,
                    last_name,
                    grade,
                    email,
                    enrollment_date: None,
                    status,
                };
                handlers::edit_student(api, &id, patch).await
            }
            StudentCommands::Delete { id } => handlers::delete_student(api, &id).await,
        },
        Commands::Assignments(cmd) => match cmd {
            AssignmentCommands::List => handlers::list_assignments(api).await,
            AssignmentCommands::Add {
                title,
                category,
                points,
                due,
                description,
            } => {
                let draft = classbookapp::model::AssignmentDraft {
                    title,
                    category,
                    total_points: points,
                    due_date: due,
                    description,
                };
                handlers::add_assignment(api, draft).await
            }
            AssignmentCommands::Edit {
                id,
                title,
                category,
                points,
                due,
                description,
                clear_description,
            } => {
                let description = if clear_description {
                    Some(None)
                } else {
                    description.map(Some)
                };
                let patch = classbookapp::model::AssignmentPatch {
                    title,
                    category,
                    total_points: points,
                    due_date: due,
                    description,
                };
                handlers::edit_assignment(api, &id, patch).await
            }
            AssignmentCommands::Delete { id } => handlers::delete_assignment(api, &id).await,
        },
        Commands::Grades(cmd) => match cmd {
            GradeCommands::Show { assignment } => handlers::show_grades(api, &assignment).await,
            GradeCommands::Set {
                assignment,
                student,
                score,
            } => handlers::set_grade(api, &assignment, &student, score).await,
        },
        Commands::Attendance(cmd) => match cmd {
            AttendanceCommands::Week { date } => handlers::attendance_week(api, date).await,
            AttendanceCommands::Mark {
                student,
                date,
                status,
            } => handlers::mark_attendance(api, &student, date, status).await,
        },
        Commands::Report { csv, header } => handlers::report(api, csv, header).await,
        Commands::Dashboard => handlers::dashboard(api).await,
        Commands::Calendar { year, month } => handlers::calendar(api, year, month).await,
        // Handled before the classroom is built.
        Commands::Config { .. } => Ok(()),
    }
}
