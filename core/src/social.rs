use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, instrument, trace};

use crate::config::SocialConfig;
use crate::error::{Result, SocialError};
use crate::feed;
use crate::follow::{Degree, FollowGraph};
use crate::post::Post;
use crate::queries::{self, Distance, LayeredDistances};
use crate::registry::UserRegistry;
use crate::user::{User, UserId};

/// The social graph: user directory, follow edges, distance queries and feeds.
///
/// Every operation taking ids resolves them through the registry first and
/// returns `UserDoesNotExist` before touching any other state.
#[derive(Debug, Default)]
pub struct SocialGraph {
    registry: UserRegistry,
    graph: FollowGraph,
    config: SocialConfig,
}

impl SocialGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SocialConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            registry: UserRegistry::new(),
            graph: FollowGraph::new(),
            config,
        })
    }

    /// Pre-allocate for a known user count.
    pub fn with_capacity(config: SocialConfig, user_count: usize) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            registry: UserRegistry::with_capacity(user_count),
            graph: FollowGraph::with_capacity(user_count),
            config,
        })
    }

    pub fn config(&self) -> &SocialConfig {
        &self.config
    }

    // ---------------------------------------------------------------------
    // Users
    // ---------------------------------------------------------------------

    /// Register an existing user. The graph shares the caller's handle.
    #[instrument(level = "debug", skip(self, user), fields(user = %user.id()))]
    pub fn add_user(&mut self, user: Arc<User>) -> Result<()> {
        self.registry.add(user)?;
        debug!(users = self.registry.len(), "user registered");
        Ok(())
    }

    /// Create and register a user whose post log uses the configured capacity.
    pub fn create_user(&mut self, full_name: impl Into<String>) -> Result<Arc<User>> {
        let user = Arc::new(User::with_log_capacity(
            full_name,
            self.config.post_log_capacity,
        ));
        self.add_user(user.clone())?;
        Ok(user)
    }

    pub fn get_user(&self, id: UserId) -> Result<Arc<User>> {
        self.registry.get(id).cloned()
    }

    /// Unregister a user and drop every follow edge touching it.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_user(&mut self, id: UserId) -> Result<Arc<User>> {
        let user = self.registry.remove(id)?;
        let purged = self.graph.remove_user(id);
        debug!(purged_edges = purged, "user deleted");
        Ok(user)
    }

    pub fn contains_user(&self, id: UserId) -> bool {
        self.registry.contains(id)
    }

    pub fn user_ids(&self) -> Vec<UserId> {
        self.registry.ids().collect()
    }

    pub fn user_count(&self) -> usize {
        self.registry.len()
    }

    /// Number of directed follow edges.
    pub fn follow_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Append a post to a registered user's log.
    #[instrument(level = "debug", skip(self, content))]
    pub fn add_post(&self, id: UserId, content: impl Into<String>) -> Result<Post> {
        let user = self.registry.get(id)?;
        let post = user.add_post(content);
        debug!(sequence = post.sequence, "post added");
        Ok(post)
    }

    // ---------------------------------------------------------------------
    // Follow edges
    // ---------------------------------------------------------------------

    #[instrument(level = "debug", skip(self))]
    pub fn follow(&mut self, follower: UserId, followee: UserId) -> Result<()> {
        self.registry.require(&[follower, followee])?;
        if follower == followee && !self.config.allow_self_follow {
            return Err(SocialError::SelfFollowRejected(follower));
        }
        if self.graph.follow(follower, followee) {
            debug!("follow edge added");
        }
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    pub fn unfollow(&mut self, follower: UserId, followee: UserId) -> Result<()> {
        self.registry.require(&[follower, followee])?;
        if self.graph.unfollow(follower, followee) {
            debug!("follow edge removed");
        }
        Ok(())
    }

    pub fn is_following(&self, follower: UserId, followee: UserId) -> Result<bool> {
        self.registry.require(&[follower, followee])?;
        Ok(self.graph.is_following(follower, followee))
    }

    pub fn followers(&self, id: UserId) -> Result<HashSet<UserId>> {
        self.registry.require(&[id])?;
        Ok(self.graph.followers(id))
    }

    pub fn following(&self, id: UserId) -> Result<HashSet<UserId>> {
        self.registry.require(&[id])?;
        Ok(self.graph.following(id))
    }

    /// Users that `id` follows and who follow `id` back.
    pub fn friends(&self, id: UserId) -> Result<HashSet<UserId>> {
        self.registry.require(&[id])?;
        Ok(self.graph.friends(id))
    }

    pub fn degree(&self, id: UserId) -> Result<Degree> {
        self.registry.require(&[id])?;
        Ok(self.graph.degree(id))
    }

    // ---------------------------------------------------------------------
    // Distance queries
    // ---------------------------------------------------------------------

    pub fn layered_distances(&self, id: UserId) -> Result<LayeredDistances> {
        self.registry.require(&[id])?;
        let layers = queries::layered_distances(&self.graph, id);
        trace!(user = %id, reached = layers.reached(), "layered distances");
        Ok(layers)
    }

    pub fn max_distance(&self, id: UserId) -> Result<Distance> {
        self.registry.require(&[id])?;
        Ok(queries::max_distance(&self.graph, id))
    }

    pub fn min_distance(&self, from: UserId, to: UserId) -> Result<u32> {
        self.registry.require(&[from, to])?;
        queries::min_distance(&self.graph, from, to)
    }

    pub fn nth_layer_followings(&self, id: UserId, n: u32) -> Result<HashSet<UserId>> {
        self.registry.require(&[id])?;
        let layer = queries::nth_layer_followings(&self.graph, id, n);
        trace!(user = %id, n, size = layer.len(), "nth layer followings");
        Ok(layer)
    }

    // ---------------------------------------------------------------------
    // Feed
    // ---------------------------------------------------------------------

    /// Posts by everyone `id` follows, newest first, paged as
    /// `[offset, offset + limit)`.
    pub fn generate_feed(&self, id: UserId, offset: usize, limit: usize) -> Result<Vec<Post>> {
        let page = feed::generate_feed(&self.registry, &self.graph, id, offset, limit)?;
        trace!(user = %id, offset, limit, returned = page.len(), "feed generated");
        Ok(page)
    }

    /// First page of the feed using the configured page size.
    pub fn latest_feed(&self, id: UserId) -> Result<Vec<Post>> {
        self.generate_feed(id, 0, self.config.default_feed_limit)
    }
}
