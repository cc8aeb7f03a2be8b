//! General-purpose counting capabilities.

use crate::clock::Clock;
use chrono::{DateTime, Datelike, Utc};
use counter::Counter;
use itertools::Itertools;
use std::fmt;
use std::iter;
use std::vec::IntoIter;

/// A calendar month, the bucket into which posts are grouped.
///
/// Months are derived from a post's creation timestamp, compare in
/// chronological order, and display as `YYYY-MM`, so their display strings
/// sort the same way the months themselves do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    /// The month in which `datetime` falls.
    pub fn of(datetime: &DateTime<Utc>) -> Self {
        Self {
            year: datetime.year(),
            month: datetime.month(),
        }
    }

    /// The month it is right now, according to `clock`.
    pub fn current<C: Clock>(clock: &C) -> Self {
        Self::of(&clock.now())
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// A pair of month and count.
pub type MonthCount = (Month, usize);

/// Groups posts by the calendar month they were created in and provides a
/// count of the number of posts in each month.
///
/// Counts only ever increase: observing the same sequence twice doubles
/// every bucket. The running total always equals the sum of the buckets.
#[derive(Debug, Default)]
pub struct MonthCounter {
    counts: Counter<Month>,
    total: usize,
}

impl MonthCounter {
    /// Creates an empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Groups and counts a sequence of months.
    pub fn from_iter(iter: impl Iterator<Item = Month>) -> Self {
        let mut counter = Self::new();
        counter.observe_all(iter);
        counter
    }

    /// Records a single post in `month`'s bucket.
    pub fn observe(&mut self, month: Month) {
        self.counts.update(iter::once(month));
        self.total += 1;
    }

    /// Records every month yielded by `iter`.
    pub fn observe_all(&mut self, iter: impl Iterator<Item = Month>) {
        for month in iter {
            self.observe(month);
        }
    }

    /// The total number of posts observed, across all buckets.
    pub fn total(&self) -> usize {
        self.total
    }

    /// True if no posts have been observed yet.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// The number of posts observed in `month`.
    ///
    /// A month with no observed posts has a count of zero; asking about it
    /// is not an error.
    pub fn count_for(&self, month: &Month) -> usize {
        self.counts.get(month).copied().unwrap_or(0)
    }

    /// The (month, count) pairs in chronological order.
    pub fn sorted(&self) -> IntoIter<MonthCount> {
        self.counts
            .keys()
            .sorted()
            .map(|month| {
                (
                    *month,
                    *self
                        .counts
                        .get(month)
                        .expect("somehow the month doesn't actually exist"),
                )
            })
            .collect::<Vec<_>>()
            .into_iter()
    }
}
