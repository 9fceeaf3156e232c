//! BFS frontier
//!
//! Holds the current level's queue and the next level's candidates. A URL
//! enters the frontier at most once across the whole crawl; the visited
//! list doubles as the fetch-order record for the final report.

use std::collections::{HashSet, VecDeque};

/// Level-by-level URL frontier for one crawl
#[derive(Debug)]
pub struct Frontier {
    current: VecDeque<String>,
    next: Vec<String>,
    seen: HashSet<String>,
    visited_order: Vec<String>,
}

impl Frontier {
    /// Creates a frontier seeded with one URL at level zero
    pub fn new(seed: &str) -> Self {
        let mut seen = HashSet::new();
        seen.insert(seed.to_string());

        let mut current = VecDeque::new();
        current.push_back(seed.to_string());

        Self {
            current,
            next: Vec::new(),
            seen,
            visited_order: Vec::new(),
        }
    }

    /// Takes the next URL of the current level, recording it as visited
    pub fn next_url(&mut self) -> Option<String> {
        let url = self.current.pop_front()?;
        self.visited_order.push(url.clone());
        Some(url)
    }

    /// Queues a URL for the next level
    ///
    /// Duplicates of anything ever seen are dropped silently.
    pub fn enqueue(&mut self, url: &str) {
        if self.seen.insert(url.to_string()) {
            self.next.push(url.to_string());
        }
    }

    /// Promotes the next level to current; false when the crawl is out of
    /// work
    pub fn advance_level(&mut self) -> bool {
        self.current = self.next.drain(..).collect();
        !self.current.is_empty()
    }

    /// True when the current level still has URLs to fetch
    pub fn has_current(&self) -> bool {
        !self.current.is_empty()
    }

    /// Number of URLs queued for the next level
    pub fn pending_next(&self) -> usize {
        self.next.len()
    }

    /// URLs fetched so far, in fetch order
    pub fn visited(&self) -> &[String] {
        &self.visited_order
    }

    /// Consumes the frontier, returning the fetch-order list
    pub fn into_visited(self) -> Vec<String> {
        self.visited_order
    }
}
