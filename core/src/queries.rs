//! BFS distance queries over follow edges.
//!
//! Every query here is a view over a single `layered_distances` pass, so
//! all of them agree on which level a user lands in: the first level at
//! which the BFS discovers it. Only `follows` edges are traversed.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::fmt;

use crate::error::{Result, SocialError};
use crate::follow::FollowGraph;
use crate::user::UserId;

/// Eccentricity of a user: the hop count to the farthest reachable followee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distance {
    Hops(u32),
    /// The user follows nobody, so there is no finite distance.
    Unbounded,
}

impl Distance {
    pub fn hops(self) -> Option<u32> {
        match self {
            Distance::Hops(h) => Some(h),
            Distance::Unbounded => None,
        }
    }

    pub fn is_unbounded(self) -> bool {
        matches!(self, Distance::Unbounded)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Hops(h) => write!(f, "{}", h),
            Distance::Unbounded => f.write_str("unbounded"),
        }
    }
}

/// Result of one BFS: users grouped by the hop count at which they were found.
///
/// The source is not seeded as visited, so it appears in its own layers only
/// when a follow cycle leads back to it.
#[derive(Debug, Clone, Default)]
pub struct LayeredDistances {
    levels: BTreeMap<u32, HashSet<UserId>>,
    level_of: HashMap<UserId, u32>,
}

impl LayeredDistances {
    /// Users at exactly `level` hops. Level 0 is always empty.
    pub fn layer(&self, level: u32) -> Option<&HashSet<UserId>> {
        self.levels.get(&level)
    }

    pub fn level_of(&self, id: UserId) -> Option<u32> {
        self.level_of.get(&id).copied()
    }

    /// Deepest non-empty level, or None if nothing was reached.
    pub fn max_level(&self) -> Option<u32> {
        self.levels.keys().next_back().copied()
    }

    pub fn reached(&self) -> usize {
        self.level_of.len()
    }

    pub fn is_empty(&self) -> bool {
        self.level_of.is_empty()
    }

    /// (level, users) pairs in ascending level order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &HashSet<UserId>)> + '_ {
        self.levels.iter().map(|(&level, ids)| (level, ids))
    }
}

/// Single BFS from `source` along follow edges.
///
/// One visited set is shared across all levels, so each user is enqueued at
/// most once and recorded at the level where it was first seen. O(V + E).
pub fn layered_distances(graph: &FollowGraph, source: UserId) -> LayeredDistances {
    let mut result = LayeredDistances::default();
    let mut queue: VecDeque<(UserId, u32)> = VecDeque::new();
    queue.push_back((source, 0));

    while let Some((current, level)) = queue.pop_front() {
        let next = level + 1;
        for followee in graph.following_iter(current) {
            if result.level_of.contains_key(&followee) {
                continue;
            }
            result.level_of.insert(followee, next);
            result.levels.entry(next).or_default().insert(followee);
            queue.push_back((followee, next));
        }
    }

    result
}

/// Greatest hop distance to any user reachable from `id`.
pub fn max_distance(graph: &FollowGraph, id: UserId) -> Distance {
    if !graph.follows_anyone(id) {
        return Distance::Unbounded;
    }
    match layered_distances(graph, id).max_level() {
        Some(level) => Distance::Hops(level),
        None => Distance::Unbounded,
    }
}

/// Shortest hop count from `from` to `to` along follow edges.
///
/// Fails with `UsersNotConnected` if `from` follows nobody or `to` is never
/// reached.
pub fn min_distance(graph: &FollowGraph, from: UserId, to: UserId) -> Result<u32> {
    if !graph.follows_anyone(from) {
        return Err(SocialError::users_not_connected(from, to));
    }
    layered_distances(graph, from)
        .level_of(to)
        .ok_or_else(|| SocialError::users_not_connected(from, to))
}

/// Users at exactly `n` hops from `id`. Empty when nothing lies at that level.
pub fn nth_layer_followings(graph: &FollowGraph, id: UserId, n: u32) -> HashSet<UserId> {
    if !graph.follows_anyone(id) {
        return HashSet::new();
    }
    layered_distances(graph, id)
        .levels
        .remove(&n)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<UserId> {
        (0..n).map(|_| UserId::new()).collect()
    }

    fn make_chain(u: &[UserId]) -> FollowGraph {
        let mut g = FollowGraph::new();
        for pair in u.windows(2) {
            g.follow(pair[0], pair[1]);
        }
        g
    }

    fn make_star(center: UserId, leaves: &[UserId]) -> FollowGraph {
        let mut g = FollowGraph::new();
        for &leaf in leaves {
            g.follow(center, leaf);
        }
        g
    }

    fn make_cycle(u: &[UserId]) -> FollowGraph {
        let mut g = make_chain(u);
        g.follow(u[u.len() - 1], u[0]);
        g
    }

    // --- layered BFS ---

    #[test]
    fn test_layers_chain() {
        let u = ids(6);
        let g = make_chain(&u);
        let layers = layered_distances(&g, u[0]);
        assert_eq!(layers.reached(), 5);
        assert_eq!(layers.level_of(u[5]), Some(5));
        assert_eq!(layers.max_level(), Some(5));
        for level in 1..=5u32 {
            assert_eq!(layers.layer(level).unwrap().len(), 1);
        }
    }

    #[test]
    fn test_layers_star() {
        let u = ids(101);
        let g = make_star(u[0], &u[1..]);
        let layers = layered_distances(&g, u[0]);
        assert_eq!(layers.layer(1).unwrap().len(), 100);
        assert_eq!(layers.max_level(), Some(1));
    }

    #[test]
    fn test_layers_directed_only() {
        let u = ids(3);
        let g = make_chain(&u);
        // Nothing is reachable against edge direction.
        let layers = layered_distances(&g, u[2]);
        assert!(layers.is_empty());
        assert_eq!(layers.max_level(), None);
    }

    #[test]
    fn test_layers_cycle_terminates() {
        let u = ids(5);
        let g = make_cycle(&u);
        let layers = layered_distances(&g, u[0]);
        // Source is rediscovered at the cycle length.
        assert_eq!(layers.reached(), 5);
        assert_eq!(layers.level_of(u[0]), Some(5));
    }

    #[test]
    fn test_layers_first_discovery_wins() {
        // a → b → c and a → c: c belongs to level 1 only.
        let u = ids(3);
        let mut g = FollowGraph::new();
        g.follow(u[0], u[1]);
        g.follow(u[1], u[2]);
        g.follow(u[0], u[2]);
        let layers = layered_distances(&g, u[0]);
        assert_eq!(layers.level_of(u[2]), Some(1));
        assert!(layers.layer(2).is_none());
        let total: usize = layers.iter().map(|(_, set)| set.len()).sum();
        assert_eq!(total, layers.reached());
    }

    #[test]
    fn test_layers_self_follow() {
        let u = ids(1);
        let mut g = FollowGraph::new();
        g.follow(u[0], u[0]);
        let layers = layered_distances(&g, u[0]);
        assert_eq!(layers.level_of(u[0]), Some(1));
    }

    #[test]
    fn test_layer_zero_empty() {
        let u = ids(3);
        let g = make_chain(&u);
        assert!(layered_distances(&g, u[0]).layer(0).is_none());
        assert!(nth_layer_followings(&g, u[0], 0).is_empty());
    }

    // --- derived queries ---

    /// T→E, T→G, E→M, E→J, J→G
    fn pythons() -> (FollowGraph, [UserId; 5]) {
        let [t, e, g, j, m]: [UserId; 5] = std::array::from_fn(|_| UserId::new());
        let mut graph = FollowGraph::new();
        graph.follow(t, e);
        graph.follow(t, g);
        graph.follow(e, m);
        graph.follow(e, j);
        graph.follow(j, g);
        (graph, [t, e, g, j, m])
    }

    #[test]
    fn test_max_distance() {
        let (graph, [t, e, g, _, m]) = pythons();
        assert_eq!(max_distance(&graph, t), Distance::Hops(2));
        assert_eq!(max_distance(&graph, e), Distance::Hops(2));
        assert_eq!(max_distance(&graph, m), Distance::Unbounded);
        assert_eq!(max_distance(&graph, g), Distance::Unbounded);
    }

    #[test]
    fn test_min_distance() {
        let (graph, [t, e, g, j, _]) = pythons();
        assert_eq!(min_distance(&graph, t, g), Ok(1));
        assert_eq!(min_distance(&graph, e, g), Ok(2));
        assert_eq!(min_distance(&graph, t, j), Ok(2));
    }

    #[test]
    fn test_min_distance_not_connected() {
        let (graph, [t, e, g, _, m]) = pythons();
        // m follows nobody.
        assert_eq!(
            min_distance(&graph, m, t),
            Err(SocialError::users_not_connected(m, t))
        );
        // e follows people but never reaches t.
        assert_eq!(
            min_distance(&graph, e, t),
            Err(SocialError::users_not_connected(e, t))
        );
        assert!(min_distance(&graph, g, e).is_err());
    }

    #[test]
    fn test_nth_layer() {
        let u = ids(3);
        let (e, t, j) = (u[0], u[1], u[2]);
        let mut g = FollowGraph::new();
        g.follow(e, t);
        g.follow(t, j);
        assert_eq!(nth_layer_followings(&g, e, 2), HashSet::from([j]));
        assert_eq!(nth_layer_followings(&g, e, 1), HashSet::from([t]));
        assert!(nth_layer_followings(&g, e, 3).is_empty());
        assert!(nth_layer_followings(&g, j, 1).is_empty());
    }

    #[test]
    fn test_distance_display() {
        assert_eq!(Distance::Hops(3).to_string(), "3");
        assert_eq!(Distance::Unbounded.to_string(), "unbounded");
        assert_eq!(Distance::Hops(2).hops(), Some(2));
        assert!(Distance::Unbounded.is_unbounded());
    }
}
