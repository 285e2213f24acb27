// Bounded time series backing the speed chart
use chrono::{DateTime, Utc};
use std::collections::VecDeque;

pub const DEFAULT_CAPACITY: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesEntry {
    pub timestamp: DateTime<Utc>,
    pub actual: Option<f64>,
    pub target: Option<f64>,
}

impl SeriesEntry {
    pub fn new(timestamp: DateTime<Utc>, actual: Option<f64>, target: Option<f64>) -> Self {
        Self {
            timestamp,
            actual,
            target,
        }
    }
}

/// Ring buffer of `(timestamp, actual, target)` samples.
///
/// Never holds more than `capacity` entries; once full, every push evicts
/// the oldest entry first.
#[derive(Debug, Clone)]
pub struct TimeSeries {
    entries: VecDeque<SeriesEntry>,
    capacity: usize,
}

impl TimeSeries {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an entry, returning the evicted one if the series was full
    pub fn push(&mut self, entry: SeriesEntry) -> Option<SeriesEntry> {
        let evicted = if self.entries.len() >= self.capacity {
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back(entry);
        evicted
    }

    pub fn first(&self) -> Option<&SeriesEntry> {
        self.entries.front()
    }

    pub fn last(&self) -> Option<&SeriesEntry> {
        self.entries.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SeriesEntry> {
        self.entries.iter()
    }

    pub fn actual_values(&self) -> Vec<Option<f64>> {
        self.entries.iter().map(|e| e.actual).collect()
    }

    pub fn target_values(&self) -> Vec<Option<f64>> {
        self.entries.iter().map(|e| e.target).collect()
    }
}

impl Default for TimeSeries {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
