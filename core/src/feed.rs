//! Feed assembly: merges followee post logs into one recency-ordered page.

use std::cmp::Reverse;

use crate::error::Result;
use crate::follow::FollowGraph;
use crate::post::Post;
use crate::registry::UserRegistry;
use crate::user::UserId;

/// Page of the merged feed for `id`: the window `[offset, offset + limit)` of
/// all followee posts, most recent first.
///
/// Read guards on every followee log are held together while the posts are
/// copied, so the page reflects a single point in time across all logs no
/// matter which path appended to them. Guards are taken in ascending id order.
/// Ties on timestamp fall back to append order, which keeps pages stable
/// across calls on unchanged data. An offset past the end yields an empty page.
///
/// Fails with `UserDoesNotExist` if `id`, or any user it follows, is missing
/// from `registry`.
pub fn generate_feed(
    registry: &UserRegistry,
    graph: &FollowGraph,
    id: UserId,
    offset: usize,
    limit: usize,
) -> Result<Vec<Post>> {
    registry.require(&[id])?;

    let mut followees: Vec<UserId> = graph.following_iter(id).collect();
    followees.sort_unstable();
    let users = followees
        .into_iter()
        .map(|followee| registry.get(followee))
        .collect::<Result<Vec<_>>>()?;

    if limit == 0 {
        return Ok(Vec::new());
    }

    let logs: Vec<_> = users.iter().map(|user| user.posts()).collect();
    let mut merged: Vec<Post> = logs.iter().flat_map(|log| log.iter().cloned()).collect();
    drop(logs);

    if offset >= merged.len() {
        return Ok(Vec::new());
    }

    merged.sort_unstable_by_key(|post| Reverse(post.recency_key()));

    Ok(merged.into_iter().skip(offset).take(limit).collect())
}
