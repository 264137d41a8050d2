//! Breadth-first frontier with a visited set
//!
//! URLs are marked visited when they are pushed, not when they are popped, so
//! the same URL discovered from two different pages is only queued once.

use crate::url::NormalizedUrl;
use std::collections::{HashSet, VecDeque};

/// FIFO queue of pending URLs plus the set of every URL ever queued
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<NormalizedUrl>,
    visited: HashSet<NormalizedUrl>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `url` to the tail unless it was seen before
    ///
    /// # Returns
    ///
    /// * `true` - The URL was queued and marked visited
    /// * `false` - The URL was already visited; nothing changed
    pub fn push(&mut self, url: NormalizedUrl) -> bool {
        if self.visited.contains(&url) {
            return false;
        }
        self.visited.insert(url.clone());
        self.queue.push_back(url);
        true
    }

    /// Removes and returns the head of the queue
    pub fn pop(&mut self) -> Option<NormalizedUrl> {
        self.queue.pop_front()
    }

    pub fn is_visited(&self, url: &NormalizedUrl) -> bool {
        self.visited.contains(url)
    }

    /// Number of URLs waiting to be processed
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of URLs ever queued; never decreases
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}
