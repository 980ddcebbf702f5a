//! social-graph-core: In-memory social graph engine.
//!
//! Maintains a user directory, directed follow edges indexed in both
//! directions, BFS distance queries over those edges, and a recency-ordered
//! feed merged from bounded per-user post logs.
//! Library only: transport and persistence belong to the embedding application.

mod config;
mod error;
mod feed;
mod follow;
mod post;
mod queries;
mod registry;
mod shared;
mod social;
mod user;

pub use config::{SocialConfig, DEFAULT_FEED_LIMIT, DEFAULT_POST_LOG_CAPACITY};
pub use error::{Result, SocialError};
pub use feed::generate_feed;
pub use follow::{Degree, FollowGraph};
pub use post::{Post, UserPostLog};
pub use queries::{
    layered_distances, max_distance, min_distance, nth_layer_followings, Distance,
    LayeredDistances,
};
pub use registry::UserRegistry;
pub use shared::SharedSocialGraph;
pub use social::SocialGraph;
pub use user::{User, UserId};
