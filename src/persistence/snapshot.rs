use super::store::KeyValueStore;
use crate::domain::{FocusBucket, Task};
use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Store key holding the task queue
pub const TASKS_KEY: &str = "tasks";

/// Prefix of the per-day focus time keys
pub const FOCUS_KEY_PREFIX: &str = "focusTime-";

/// One task entry as stored under `tasks`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub label: String,
    /// Seconds
    pub duration: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_timestamp: Option<i64>,
}

impl From<&Task> for TaskRecord {
    fn from(task: &Task) -> Self {
        Self {
            label: task.label.clone(),
            duration: task.duration_secs as i64,
            start_timestamp: task.start_timestamp,
        }
    }
}

/// How the task list was obtained at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TasksSource {
    Stored,
    /// Nothing stored yet
    Seeded,
    /// Stored data could not be used
    Reseeded,
}

/// Default queue used when nothing usable is stored
pub fn seed_tasks(label: &str, duration_secs: u32) -> Vec<Task> {
    match Task::restore(label.to_string(), duration_secs.max(1), None) {
        Ok(task) => vec![task],
        Err(_) => Vec::new(),
    }
}

/// Decode the `tasks` value. Any entry with a non-positive or oversized
/// duration makes the whole snapshot unusable.
pub fn decode_tasks(json: &str) -> Result<Vec<Task>> {
    let records: Vec<TaskRecord> = serde_json::from_str(json)?;
    records
        .into_iter()
        .map(|r| {
            let secs = u32::try_from(r.duration)
                .map_err(|_| anyhow::anyhow!("invalid duration {} for {:?}", r.duration, r.label))?;
            Task::restore(r.label, secs, r.start_timestamp).map_err(anyhow::Error::from)
        })
        .collect()
}

pub fn encode_tasks<'a>(tasks: impl Iterator<Item = &'a Task>) -> Result<String> {
    let records: Vec<TaskRecord> = tasks.map(TaskRecord::from).collect();
    Ok(serde_json::to_string(&records)?)
}

/// Read the task list, falling back to the seed when absent or unusable
pub fn load_tasks(
    store: &dyn KeyValueStore,
    seed_label: &str,
    seed_secs: u32,
) -> (Vec<Task>, TasksSource) {
    let stored = match store.get(TASKS_KEY) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "could not read tasks, using seed");
            return (seed_tasks(seed_label, seed_secs), TasksSource::Reseeded);
        }
    };

    let Some(json) = stored else {
        debug!("no stored tasks, using seed");
        return (seed_tasks(seed_label, seed_secs), TasksSource::Seeded);
    };

    match decode_tasks(&json) {
        Ok(tasks) => (tasks, TasksSource::Stored),
        Err(e) => {
            warn!(error = %e, "stored tasks are corrupt, reseeding");
            (seed_tasks(seed_label, seed_secs), TasksSource::Reseeded)
        }
    }
}

pub fn save_tasks<'a>(
    store: &mut dyn KeyValueStore,
    tasks: impl Iterator<Item = &'a Task>,
) -> Result<()> {
    let json = encode_tasks(tasks)?;
    store.set(TASKS_KEY, &json)
}

/// `focusTime-YYYY-MM-DD`
pub fn focus_key(date: NaiveDate) -> String {
    format!("{}{}", FOCUS_KEY_PREFIX, date.format("%Y-%m-%d"))
}

pub fn parse_focus_key(key: &str) -> Option<NaiveDate> {
    let date = key.strip_prefix(FOCUS_KEY_PREFIX)?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// Load every stored focus bucket
pub fn load_focus_buckets(store: &dyn KeyValueStore) -> BTreeMap<NaiveDate, u64> {
    let mut buckets = BTreeMap::new();
    for key in store.keys() {
        let Some(date) = parse_focus_key(&key) else {
            continue;
        };
        let value = match store.get(&key) {
            Ok(Some(value)) => value,
            Ok(None) => continue,
            Err(e) => {
                warn!(key = %key, error = %e, "could not read focus bucket");
                continue;
            }
        };
        let seconds = value.trim().parse::<u64>().unwrap_or_else(|_| {
            warn!(key = %key, value = %value, "unparseable focus time, reading as 0");
            0
        });
        buckets.insert(date, seconds);
    }
    buckets
}

pub fn save_focus_bucket(store: &mut dyn KeyValueStore, bucket: FocusBucket) -> Result<()> {
    store.set(&focus_key(bucket.date), &bucket.seconds.to_string())
}
