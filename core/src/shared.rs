//! Thread-safe handle for embedding one `SocialGraph` across callers.
//!
//! Shared-read / exclusive-write over the whole graph: queries take the read
//! lock, edge and user mutations the write lock. Posting only touches the
//! author's own log lock, so it runs under the graph read lock.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::SocialConfig;
use crate::error::Result;
use crate::follow::Degree;
use crate::post::Post;
use crate::queries::{Distance, LayeredDistances};
use crate::social::SocialGraph;
use crate::user::{User, UserId};

/// Cloneable, lock-guarded `SocialGraph`.
#[derive(Debug, Clone, Default)]
pub struct SharedSocialGraph {
    inner: Arc<RwLock<SocialGraph>>,
}

impl SharedSocialGraph {
    pub fn new(graph: SocialGraph) -> Self {
        Self {
            inner: Arc::new(RwLock::new(graph)),
        }
    }

    pub fn with_config(config: SocialConfig) -> Result<Self> {
        Ok(Self::new(SocialGraph::with_config(config)?))
    }

    /// Run `f` under the read lock.
    pub fn read<R>(&self, f: impl FnOnce(&SocialGraph) -> R) -> R {
        f(&self.inner.read())
    }

    /// Run `f` under the write lock. Several mutations inside one closure
    /// are applied atomically with respect to other callers.
    pub fn write<R>(&self, f: impl FnOnce(&mut SocialGraph) -> R) -> R {
        f(&mut self.inner.write())
    }

    pub fn add_user(&self, user: Arc<User>) -> Result<()> {
        self.write(|g| g.add_user(user))
    }

    pub fn create_user(&self, full_name: impl Into<String>) -> Result<Arc<User>> {
        self.write(|g| g.create_user(full_name))
    }

    pub fn get_user(&self, id: UserId) -> Result<Arc<User>> {
        self.read(|g| g.get_user(id))
    }

    pub fn delete_user(&self, id: UserId) -> Result<Arc<User>> {
        self.write(|g| g.delete_user(id))
    }

    /// Only the author's log is write-locked; the graph stays shared.
    pub fn add_post(&self, id: UserId, content: impl Into<String>) -> Result<Post> {
        self.read(|g| g.add_post(id, content))
    }

    pub fn follow(&self, follower: UserId, followee: UserId) -> Result<()> {
        self.write(|g| g.follow(follower, followee))
    }

    pub fn unfollow(&self, follower: UserId, followee: UserId) -> Result<()> {
        self.write(|g| g.unfollow(follower, followee))
    }

    pub fn is_following(&self, follower: UserId, followee: UserId) -> Result<bool> {
        self.read(|g| g.is_following(follower, followee))
    }

    pub fn followers(&self, id: UserId) -> Result<HashSet<UserId>> {
        self.read(|g| g.followers(id))
    }

    pub fn following(&self, id: UserId) -> Result<HashSet<UserId>> {
        self.read(|g| g.following(id))
    }

    pub fn friends(&self, id: UserId) -> Result<HashSet<UserId>> {
        self.read(|g| g.friends(id))
    }

    pub fn degree(&self, id: UserId) -> Result<Degree> {
        self.read(|g| g.degree(id))
    }

    pub fn layered_distances(&self, id: UserId) -> Result<LayeredDistances> {
        self.read(|g| g.layered_distances(id))
    }

    pub fn max_distance(&self, id: UserId) -> Result<Distance> {
        self.read(|g| g.max_distance(id))
    }

    pub fn min_distance(&self, from: UserId, to: UserId) -> Result<u32> {
        self.read(|g| g.min_distance(from, to))
    }

    pub fn nth_layer_followings(&self, id: UserId, n: u32) -> Result<HashSet<UserId>> {
        self.read(|g| g.nth_layer_followings(id, n))
    }

    pub fn generate_feed(&self, id: UserId, offset: usize, limit: usize) -> Result<Vec<Post>> {
        self.read(|g| g.generate_feed(id, offset, limit))
    }

    pub fn latest_feed(&self, id: UserId) -> Result<Vec<Post>> {
        self.read(|g| g.latest_feed(id))
    }

    pub fn user_count(&self) -> usize {
        self.read(SocialGraph::user_count)
    }

    pub fn follow_count(&self) -> usize {
        self.read(SocialGraph::follow_count)
    }
}

impl From<SocialGraph> for SharedSocialGraph {
    fn from(graph: SocialGraph) -> Self {
        Self::new(graph)
    }
}
