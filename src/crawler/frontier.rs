//! Breadth-first crawl frontier with a visited-set
//!
//! The frontier is a priority queue ordered by depth and then by insertion
//! order, so tasks come out breadth-first and FIFO within a depth no matter
//! the order they were pushed in. A URL is reserved in the visited-set the
//! moment it is first enqueued, which keeps a pending URL from being queued
//! twice.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use url::Url;

/// A pending unit of work: a normalized URL at a link depth
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTask {
    /// Normalized absolute URL
    pub url: Url,

    /// Link distance from the seed
    pub depth: u32,
}

impl CrawlTask {
    pub fn new(url: Url, depth: u32) -> Self {
        Self { url, depth }
    }
}

/// Heap entry carrying the insertion sequence used for FIFO tie-breaking
#[derive(Debug)]
struct QueuedTask {
    task: CrawlTask,
    seq: u64,
}

// BinaryHeap is a max-heap: reverse both keys so the shallowest, oldest task
// is popped first
impl Ord for QueuedTask {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .task
            .depth
            .cmp(&self.task.depth)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for QueuedTask {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueuedTask {
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq
    }
}

impl Eq for QueuedTask {}

/// Work queue of crawl tasks plus the set of URLs ever enqueued
#[derive(Debug)]
pub struct Frontier {
    queue: BinaryHeap<QueuedTask>,
    visited: HashSet<String>,
    max_depth: u32,
    next_seq: u64,
}

impl Frontier {
    /// Creates an empty frontier that refuses tasks deeper than `max_depth`
    pub fn new(max_depth: u32) -> Self {
        Self {
            queue: BinaryHeap::new(),
            visited: HashSet::new(),
            max_depth,
            next_seq: 0,
        }
    }

    /// Enqueues a task if its URL was never seen and its depth is allowed
    ///
    /// On success the URL is reserved in the visited-set immediately.
    ///
    /// # Returns
    ///
    /// * `true` - The task was enqueued
    /// * `false` - Duplicate URL or depth beyond the limit
    pub fn push(&mut self, task: CrawlTask) -> bool {
        if task.depth > self.max_depth {
            return false;
        }

        if !self.visited.insert(task.url.as_str().to_string()) {
            return false;
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(QueuedTask { task, seq });
        true
    }

    /// Removes the earliest-inserted task among the lowest depth present
    pub fn pop(&mut self) -> Option<CrawlTask> {
        self.queue.pop().map(|queued| queued.task)
    }

    /// Returns true if the URL has ever been enqueued
    pub fn is_visited(&self, url: &Url) -> bool {
        self.visited.contains(url.as_str())
    }

    /// Number of tasks waiting to be fetched
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns whether no tasks are waiting
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of distinct URLs ever enqueued
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Drops all pending tasks; the visited-set is kept
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
