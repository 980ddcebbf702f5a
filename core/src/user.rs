use std::fmt;
use std::hash::{Hash, Hasher};

use parking_lot::{RwLock, RwLockReadGuard};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::post::{Post, UserPostLog};

/// Opaque user identifier, generated once at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for UserId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A user and their post history.
///
/// Shared as `Arc<User>` between the creator and the registry, so the post
/// log sits behind its own lock. Equality and hashing use the id only.
#[derive(Debug)]
pub struct User {
    id: UserId,
    full_name: String,
    posts: RwLock<UserPostLog>,
}

impl User {
    pub fn new(full_name: impl Into<String>) -> Self {
        Self::with_log_capacity(full_name, crate::config::DEFAULT_POST_LOG_CAPACITY)
    }

    pub fn with_log_capacity(full_name: impl Into<String>, capacity: usize) -> Self {
        Self {
            id: UserId::new(),
            full_name: full_name.into(),
            posts: RwLock::new(UserPostLog::with_capacity(capacity)),
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Append a post authored by this user, evicting the oldest when full.
    pub fn add_post(&self, content: impl Into<String>) -> Post {
        let (post, evicted) = self.posts.write().append(self.id, content);
        if evicted {
            tracing::debug!(user = %self.id, "post log full, evicted oldest post");
        }
        post
    }

    /// Read access to the post log. Iterate with `.iter()`, oldest first.
    ///
    /// Holding the guard blocks `add_post` on this user.
    pub fn posts(&self) -> RwLockReadGuard<'_, UserPostLog> {
        self.posts.read()
    }

    /// Owned copy of the log taken under a single read lock.
    pub fn snapshot_posts(&self) -> Vec<Post> {
        self.posts.read().snapshot()
    }

    pub fn latest_post(&self) -> Option<Post> {
        self.posts.read().latest().cloned()
    }

    pub fn post_count(&self) -> usize {
        self.posts.read().len()
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for User {}

impl Hash for User {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
