//! Mutable state for one discovery run
//!
//! A session is created at the start of a crawl, owned by exactly one caller,
//! and consumed when the crawl finishes.

use crate::url::canonical_path;
use std::collections::{HashSet, VecDeque};

/// Hard upper bound on pages discovered by a single crawl
pub const MAX_CRAWL_PAGES: usize = 50;

/// Breadth-first crawl state: the frontier queue plus visited/discovered sets
#[derive(Debug, Clone)]
pub struct DiscoverySession {
    /// Paths already popped from the queue
    visited: HashSet<String>,

    /// Paths currently waiting in the queue
    queued: HashSet<String>,

    /// FIFO frontier
    queue: VecDeque<String>,

    /// Discovered paths in visit order
    discovered: Vec<String>,

    /// Effective page budget, always within `1..=MAX_CRAWL_PAGES`
    page_budget: usize,
}

impl DiscoverySession {
    /// Creates a session seeded with the given paths
    ///
    /// Seeds are canonicalized; duplicates and unusable entries are dropped.
    /// The budget is clamped to `1..=MAX_CRAWL_PAGES`.
    pub fn new<S: AsRef<str>>(seeds: &[S], page_budget: usize) -> Self {
        let mut session = Self {
            visited: HashSet::new(),
            queued: HashSet::new(),
            queue: VecDeque::new(),
            discovered: Vec::new(),
            page_budget: page_budget.clamp(1, MAX_CRAWL_PAGES),
        };

        for seed in seeds {
            if let Some(path) = canonical_path(seed.as_ref()) {
                session.enqueue(path);
            }
        }

        session
    }

    /// Adds a path to the frontier unless it was already visited or queued
    ///
    /// Returns true if the path was enqueued.
    pub fn enqueue(&mut self, path: String) -> bool {
        if self.visited.contains(&path) || self.queued.contains(&path) {
            return false;
        }

        self.queued.insert(path.clone());
        self.queue.push_back(path);
        true
    }

    /// Pops the next path and marks it visited
    ///
    /// Returns `None` once the queue is empty or the budget is spent.
    pub fn next_path(&mut self) -> Option<String> {
        if self.is_budget_spent() {
            return None;
        }

        let path = self.queue.pop_front()?;
        self.queued.remove(&path);
        self.visited.insert(path.clone());
        Some(path)
    }

    /// Records a visited path as discovered
    pub fn record_discovered(&mut self, path: String) {
        if self.discovered.len() < self.page_budget {
            self.discovered.push(path);
        }
    }

    /// Returns true if the discovered list has reached the page budget
    pub fn is_budget_spent(&self) -> bool {
        self.discovered.len() >= self.page_budget
    }

    /// Returns true if a path has already been popped
    pub fn is_visited(&self, path: &str) -> bool {
        self.visited.contains(path)
    }

    /// Number of paths waiting in the frontier
    pub fn frontier_size(&self) -> usize {
        self.queue.len()
    }

    /// Number of paths discovered so far
    pub fn discovered_count(&self) -> usize {
        self.discovered.len()
    }

    /// Effective page budget after clamping
    pub fn page_budget(&self) -> usize {
        self.page_budget
    }

    /// Consumes the session, returning discovered paths in visit order
    pub fn into_discovered(self) -> Vec<String> {
        self.discovered
    }
}
