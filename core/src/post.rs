use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use parking_lot::{const_mutex, Mutex};
use serde::Serialize;

use crate::config::DEFAULT_POST_LOG_CAPACITY;
use crate::user::UserId;

/// Last issued (timestamp, sequence) pair, process-wide.
static LAST_STAMP: Mutex<Option<(DateTime<Utc>, u64)>> = const_mutex(None);

/// Next stamp: timestamps never go backwards, sequences strictly increase.
///
/// Both halves are issued under one lock so sequence order and timestamp
/// order agree across threads. The critical section is a single clock read.
fn next_stamp() -> (DateTime<Utc>, u64) {
    let mut last = LAST_STAMP.lock();
    let now = Utc::now();
    let stamp = match *last {
        Some((prev, seq)) => (now.max(prev), seq + 1),
        None => (now, 0),
    };
    *last = Some(stamp);
    stamp
}

/// An authored post. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub author: UserId,
    pub published_at: DateTime<Utc>,
    /// Global append order; breaks ties between equal timestamps.
    pub sequence: u64,
    pub content: String,
}

impl Post {
    fn stamp(author: UserId, content: String) -> Self {
        let (published_at, sequence) = next_stamp();
        Self {
            author,
            published_at,
            sequence,
            content,
        }
    }

    /// Sort key for recency: timestamp first, append order second.
    pub fn recency_key(&self) -> (DateTime<Utc>, u64) {
        (self.published_at, self.sequence)
    }
}

/// Bounded, append-only post history. Evicts the oldest entry when full.
///
/// Entries are kept in append order, oldest first.
#[derive(Debug, Clone)]
pub struct UserPostLog {
    posts: VecDeque<Post>,
    capacity: usize,
}

impl UserPostLog {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_POST_LOG_CAPACITY)
    }

    /// A capacity of 0 is treated as 1.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            posts: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a post stamped with the current time.
    ///
    /// Returns the new post and whether an older post was evicted to make room.
    pub fn append(&mut self, author: UserId, content: impl Into<String>) -> (Post, bool) {
        let evicted = if self.posts.len() == self.capacity {
            self.posts.pop_front();
            true
        } else {
            false
        };
        let post = Post::stamp(author, content.into());
        self.posts.push_back(post.clone());
        (post, evicted)
    }

    /// Oldest-first iteration over the retained posts.
    pub fn iter(&self) -> impl Iterator<Item = &Post> + '_ {
        self.posts.iter()
    }

    pub fn latest(&self) -> Option<&Post> {
        self.posts.back()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Owned copy of the retained posts, oldest first.
    pub fn snapshot(&self) -> Vec<Post> {
        self.posts.iter().cloned().collect()
    }
}

impl Default for UserPostLog {
    fn default() -> Self {
        Self::new()
    }
}
