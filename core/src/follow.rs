use std::collections::{HashMap, HashSet};

use crate::user::UserId;

/// Follow counts for a single user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Degree {
    pub following: usize,
    pub followers: usize,
}

/// Directed follow edges over user ids.
///
/// Edges are indexed in both directions: `follows[a]` holds everyone a
/// follows, `followed_by[b]` everyone following b. The two maps are exact
/// inverses. A missing key means an empty set; empty sets are pruned.
#[derive(Debug, Default)]
pub struct FollowGraph {
    follows: HashMap<UserId, HashSet<UserId>>,
    followed_by: HashMap<UserId, HashSet<UserId>>,
}

impl FollowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate for a known user count.
    pub fn with_capacity(user_count: usize) -> Self {
        Self {
            follows: HashMap::with_capacity(user_count),
            followed_by: HashMap::with_capacity(user_count),
        }
    }

    /// Add `follower → followee`. Returns false if the edge already existed.
    pub fn follow(&mut self, follower: UserId, followee: UserId) -> bool {
        let inserted = self.follows.entry(follower).or_default().insert(followee);
        self.followed_by.entry(followee).or_default().insert(follower);
        inserted
    }

    /// Remove `follower → followee`. Returns false if there was no such edge.
    pub fn unfollow(&mut self, follower: UserId, followee: UserId) -> bool {
        let removed = remove_from(&mut self.follows, follower, followee);
        remove_from(&mut self.followed_by, followee, follower);
        removed
    }

    pub fn is_following(&self, follower: UserId, followee: UserId) -> bool {
        self.follows
            .get(&follower)
            .is_some_and(|set| set.contains(&followee))
    }

    /// Ids `id` follows, without copying.
    pub fn following_iter(&self, id: UserId) -> impl Iterator<Item = UserId> + '_ {
        self.follows.get(&id).into_iter().flatten().copied()
    }

    /// Ids following `id`, without copying.
    pub fn followers_iter(&self, id: UserId) -> impl Iterator<Item = UserId> + '_ {
        self.followed_by.get(&id).into_iter().flatten().copied()
    }

    pub fn following(&self, id: UserId) -> HashSet<UserId> {
        self.following_iter(id).collect()
    }

    pub fn followers(&self, id: UserId) -> HashSet<UserId> {
        self.followers_iter(id).collect()
    }

    /// Mutual follows: `following(id) ∩ followers(id)`.
    pub fn friends(&self, id: UserId) -> HashSet<UserId> {
        match (self.follows.get(&id), self.followed_by.get(&id)) {
            (Some(out), Some(inc)) => out.intersection(inc).copied().collect(),
            _ => HashSet::new(),
        }
    }

    pub fn follows_anyone(&self, id: UserId) -> bool {
        self.follows.get(&id).is_some_and(|set| !set.is_empty())
    }

    pub fn degree(&self, id: UserId) -> Degree {
        Degree {
            following: self.follows.get(&id).map_or(0, HashSet::len),
            followers: self.followed_by.get(&id).map_or(0, HashSet::len),
        }
    }

    /// Drop every edge touching `id`, in either direction.
    /// Returns the number of distinct edges removed.
    pub fn remove_user(&mut self, id: UserId) -> usize {
        let mut removed = 0;

        if let Some(followees) = self.follows.remove(&id) {
            for followee in &followees {
                remove_from(&mut self.followed_by, *followee, id);
            }
            removed += followees.len();
        }

        if let Some(followers) = self.followed_by.remove(&id) {
            for follower in &followers {
                // A self-follow was already counted above.
                if remove_from(&mut self.follows, *follower, id) {
                    removed += 1;
                }
            }
        }

        removed
    }

    /// Number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.follows.values().map(HashSet::len).sum()
    }
}

fn remove_from(index: &mut HashMap<UserId, HashSet<UserId>>, key: UserId, member: UserId) -> bool {
    let Some(set) = index.get_mut(&key) else {
        return false;
    };
    let removed = set.remove(&member);
    if set.is_empty() {
        index.remove(&key);
    }
    removed
}
