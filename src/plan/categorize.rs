//! Temporal bucketing of tasks
//!
//! Every task lands in exactly one of four buckets. Completed status always
//! wins; otherwise the free-text `timeframe` is scanned for keywords.

use serde::Serialize;

use super::task::Task;

/// Temporal classification of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Overdue,
    Today,
    Upcoming,
    Completed,
}

impl Bucket {
    /// Heading used when listing the bucket
    pub fn label(self) -> &'static str {
        match self {
            Bucket::Overdue => "Overdue",
            Bucket::Today => "Due today",
            Bucket::Upcoming => "Upcoming",
            Bucket::Completed => "Completed",
        }
    }
}

const OVERDUE_KEYWORDS: &[&str] = &["overdue", "ago"];
const TODAY_KEYWORDS: &[&str] = &["today", "now", "immediately"];

/// Classify a single task
pub fn bucket_for(task: &Task) -> Bucket {
    if task.is_completed() {
        return Bucket::Completed;
    }

    let timeframe = task.timeframe.to_lowercase();
    if OVERDUE_KEYWORDS.iter().any(|k| timeframe.contains(k)) {
        Bucket::Overdue
    } else if TODAY_KEYWORDS.iter().any(|k| timeframe.contains(k)) {
        Bucket::Today
    } else {
        Bucket::Upcoming
    }
}

/// Tasks partitioned by bucket, borrowed from the store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskBuckets<'a> {
    pub overdue: Vec<&'a Task>,
    pub today: Vec<&'a Task>,
    pub upcoming: Vec<&'a Task>,
    pub completed: Vec<&'a Task>,
}

impl<'a> TaskBuckets<'a> {
    /// Total number of tasks across all buckets
    pub fn len(&self) -> usize {
        self.overdue.len() + self.today.len() + self.upcoming.len() + self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, bucket: Bucket) -> &[&'a Task] {
        match bucket {
            Bucket::Overdue => &self.overdue,
            Bucket::Today => &self.today,
            Bucket::Upcoming => &self.upcoming,
            Bucket::Completed => &self.completed,
        }
    }

    /// Buckets in display order
    pub fn iter(&self) -> impl Iterator<Item = (Bucket, &[&'a Task])> {
        [
            Bucket::Overdue,
            Bucket::Today,
            Bucket::Upcoming,
            Bucket::Completed,
        ]
        .into_iter()
        .map(move |b| (b, self.get(b)))
    }
}

/// Partition tasks into buckets and order each bucket by priority
///
/// Open buckets put critical first. The completed bucket is reversed (low
/// first) so the hardest-won items sit at the bottom of the list. Both sorts
/// are stable, so equal priorities keep their input order.
pub fn categorize<'a, I>(tasks: I) -> TaskBuckets<'a>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut buckets = TaskBuckets::default();
    for task in tasks {
        match bucket_for(task) {
            Bucket::Overdue => buckets.overdue.push(task),
            Bucket::Today => buckets.today.push(task),
            Bucket::Upcoming => buckets.upcoming.push(task),
            Bucket::Completed => buckets.completed.push(task),
        }
    }

    buckets.overdue.sort_by_key(|t| t.priority.rank());
    buckets.today.sort_by_key(|t| t.priority.rank());
    buckets.upcoming.sort_by_key(|t| t.priority.rank());
    buckets
        .completed
        .sort_by_key(|t| std::cmp::Reverse(t.priority.rank()));

    buckets
}
