//! TaskOrganizer: in-memory id-keyed task store with a JSON persisted form.
//!
//! Design:
//! - Canonical tasks live in a BTreeMap (id -> Task), so listing is
//!   deterministic by id without extra sorting.
//! - Ids are recycled: allocation picks the smallest id not in use.
//!   This keeps the id space compact for a single-user list; it is only
//!   safe because nothing outside the store holds ids across deletes.
//! - The persisted form is one JSON object: decimal id ->
//!   [title, notes, status, created, updated]. No incremental log.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};
use thiserror::Error;

use crate::task::{Task, TaskStatus};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("no task with id {0}")]
    InvalidId(u32),
    #[error("not a recognized status: {0}")]
    InvalidStatus(String),
    #[error("persisted task data is corrupt: {0}")]
    CorruptData(String),
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct TaskOrganizer {
    tasks: BTreeMap<u32, Task>,
}

impl TaskOrganizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Task> {
        self.tasks.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &Task)> + '_ {
        self.tasks.iter().map(|(id, task)| (*id, task))
    }

    /// Create a task with status `committed` and both timestamps set to
    /// `now` (truncated to whole seconds), returning its id.
    pub fn add(&mut self, title: &str, notes: &str, now: DateTime<Utc>) -> u32 {
        let id = self.free_id();
        let now = now.trunc_subsecs(0);
        self.tasks.insert(
            id,
            Task {
                title: title.to_string(),
                notes: notes.to_string(),
                status: TaskStatus::Committed,
                creation_date: now,
                update_date: now,
            },
        );
        id
    }

    /// Replace selected fields of a task.
    ///
    /// An empty supplied string means "leave unchanged", same as not
    /// supplying the field at all; a field can therefore not be cleared
    /// to empty through update. `update_date` is refreshed when at
    /// least one non-empty field was supplied, even if the new value
    /// equals the old one. The id is stable across updates.
    pub fn update(
        &mut self,
        id: u32,
        title: Option<&str>,
        notes: Option<&str>,
        status: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<u32, TaskError> {
        let title = title.filter(|s| !s.is_empty());
        let notes = notes.filter(|s| !s.is_empty());
        let status = status.filter(|s| !s.is_empty());

        let Some(current) = self.tasks.get(&id) else {
            return Err(TaskError::InvalidId(id));
        };

        let status = match status {
            Some(name) => Some(
                TaskStatus::parse(name)
                    .ok_or_else(|| TaskError::InvalidStatus(name.to_string()))?,
            ),
            None => None,
        };

        let touched = title.is_some() || notes.is_some() || status.is_some();
        let updated = Task {
            title: title.map_or_else(|| current.title.clone(), str::to_string),
            notes: notes.map_or_else(|| current.notes.clone(), str::to_string),
            status: status.unwrap_or(current.status),
            creation_date: current.creation_date,
            update_date: if touched {
                now.trunc_subsecs(0)
            } else {
                current.update_date
            },
        };
        self.tasks.insert(id, updated);

        Ok(id)
    }

    /// Remove a task, returning its id.
    pub fn delete(&mut self, id: u32) -> Result<u32, TaskError> {
        self.tasks
            .remove(&id)
            .map(|_| id)
            .ok_or(TaskError::InvalidId(id))
    }

    /// All tasks currently in `status`, possibly none.
    pub fn tasks_in_status(&self, status: TaskStatus) -> BTreeMap<u32, &Task> {
        self.tasks
            .iter()
            .filter(|(_, task)| task.status == status)
            .map(|(id, task)| (*id, task))
            .collect()
    }

    /// Encode the whole store as its JSON persisted form.
    pub fn dumps(&self) -> String {
        let wire: BTreeMap<String, [String; 5]> = self
            .tasks
            .iter()
            .map(|(id, task)| (id.to_string(), task_to_fields(task)))
            .collect();
        serde_json::to_string(&wire).expect("string-keyed map of strings always encodes")
    }

    /// Parse a persisted blob and merge its entries into the store.
    ///
    /// Entries are inserted on top of whatever is already present, so
    /// callers load into an empty store unless they want a merge.
    pub fn loads(&mut self, data: &str) -> Result<(), TaskError> {
        let wire: BTreeMap<String, Vec<String>> = serde_json::from_str(data)
            .map_err(|e| TaskError::CorruptData(e.to_string()))?;

        for (key, fields) in wire {
            let id: u32 = key
                .parse()
                .map_err(|_| TaskError::CorruptData(format!("task id is not an integer: {key}")))?;
            self.tasks.insert(id, task_from_fields(&fields)?);
        }

        Ok(())
    }

    // Smallest free id: len()+1 candidates guarantee a hit.
    fn free_id(&self) -> u32 {
        (0..=self.tasks.len() as u32)
            .find(|id| !self.tasks.contains_key(id))
            .expect("a free id always exists in 0..=len")
    }
}

fn task_to_fields(task: &Task) -> [String; 5] {
    [
        task.title.clone(),
        task.notes.clone(),
        task.status.as_str().to_string(),
        task.creation_date.format(DATE_FORMAT).to_string(),
        task.update_date.format(DATE_FORMAT).to_string(),
    ]
}

fn task_from_fields(fields: &[String]) -> Result<Task, TaskError> {
    let [title, notes, status, created, updated] = fields else {
        return Err(TaskError::CorruptData(format!(
            "expected 5 fields per task, got {}",
            fields.len()
        )));
    };

    Ok(Task {
        title: title.clone(),
        notes: notes.clone(),
        // Unknown status names degrade instead of failing the whole load.
        status: TaskStatus::parse_or_default(status),
        creation_date: parse_date(created)?,
        update_date: parse_date(updated)?,
    })
}

fn parse_date(text: &str) -> Result<DateTime<Utc>, TaskError> {
    NaiveDateTime::parse_from_str(text, DATE_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| TaskError::CorruptData(format!("bad timestamp '{text}': {e}")))
}
