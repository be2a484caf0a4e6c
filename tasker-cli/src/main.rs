use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tasker_core::{Task, TaskError, TaskOrganizer, TaskStatus};

mod state;

#[derive(Parser, Debug)]
#[command(name = "tasker", version, about = "File-backed task tracker")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List tasks, optionally only those in one status
    List {
        /// committed | in-progress | done | cancelled
        status: Option<String>,
    },

    /// Add a new task
    Add {
        title: String,
        #[arg(default_value = "")]
        notes: String,
    },

    /// Change the title, notes or status of a task
    Update {
        id: u32,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },

    /// Delete a task
    Delete { id: u32 },

    /// Set the status of a task to in_progress
    MarkInProgress { id: u32 },

    /// Set the status of a task to done
    MarkDone { id: u32 },

    /// Set the status of a task to cancelled
    MarkCancelled { id: u32 },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

// One invocation is load -> single action -> save; the store has no
// lifecycle beyond the persisted file.
fn run(cli: Cli) -> Result<()> {
    let path = state::tasks_path()?;
    let mut organizer = state::load_tasks(&path)?;

    dispatch(cli.command, &mut organizer)?;

    state::save_tasks(&path, &organizer)
}

fn dispatch(command: Command, organizer: &mut TaskOrganizer) -> Result<()> {
    let now = Utc::now();

    match command {
        Command::List { status: None } => {
            for (id, task) in organizer.iter() {
                print_task(id, task);
            }
        }

        Command::List {
            status: Some(name),
        } => {
            let status = parse_status_arg(&name)?;
            for (id, task) in organizer.tasks_in_status(status) {
                print_task(id, task);
            }
        }

        Command::Add { title, notes } => {
            let id = organizer.add(&title, &notes, now);
            println!("Task created with id {id}");
            if let Some(task) = organizer.get(id) {
                print_task(id, task);
            }
        }

        Command::Update {
            id,
            title,
            notes,
            status,
        } => {
            organizer.update(id, title.as_deref(), notes.as_deref(), status.as_deref(), now)?;
            println!("Updated task {id}");
        }

        Command::Delete { id } => {
            organizer.delete(id)?;
            println!("Deleted task {id}");
        }

        Command::MarkInProgress { id } => {
            organizer.update(id, None, None, Some("in_progress"), now)?;
            println!("Task {id} is now in_progress");
        }

        Command::MarkDone { id } => {
            organizer.update(id, None, None, Some("done"), now)?;
            println!("Task {id} is now done");
        }

        Command::MarkCancelled { id } => {
            organizer.update(id, None, None, Some("cancelled"), now)?;
            println!("Task {id} is now cancelled");
        }
    }

    Ok(())
}

// The command line spells in_progress with a dash.
fn parse_status_arg(name: &str) -> Result<TaskStatus> {
    let normalized = name.replace('-', "_");
    TaskStatus::parse(&normalized)
        .ok_or_else(|| TaskError::InvalidStatus(name.to_string()).into())
}

fn print_task(id: u32, task: &Task) {
    println!("## id: {id}");
    println!("### {} ###", task.title);
    println!("{}", task.notes);
    println!("status: {}", task.status.as_str());
    println!("creation: {}", task.creation_date.format("%d/%m/%Y"));
    println!("last updated: {}\n", task.update_date.format("%d/%m/%Y"));
}

fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<TaskError>() {
        Some(TaskError::InvalidId(_)) => 2,
        Some(TaskError::InvalidStatus(_)) => 3,
        Some(TaskError::CorruptData(_)) => 4,
        None => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_argument_accepts_dashed_spelling() {
        assert_eq!(parse_status_arg("in-progress").unwrap(), TaskStatus::InProgress);
        assert_eq!(parse_status_arg("done").unwrap(), TaskStatus::Done);
        assert!(parse_status_arg("finished").is_err());
    }

    #[test]
    fn error_kinds_map_to_distinct_exit_codes() {
        assert_eq!(exit_code(&TaskError::InvalidId(3).into()), 2);
        assert_eq!(exit_code(&TaskError::InvalidStatus("x".into()).into()), 3);
        assert_eq!(exit_code(&TaskError::CorruptData("bad".into()).into()), 4);
        assert_eq!(exit_code(&anyhow::anyhow!("io failure")), 1);
    }
}
