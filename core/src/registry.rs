use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Result, SocialError};
use crate::user::{User, UserId};

/// Id → user lookup. The sole source of truth for whether a user exists.
#[derive(Debug, Default)]
pub struct UserRegistry {
    users: HashMap<UserId, Arc<User>>,
}

impl UserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(user_count: usize) -> Self {
        Self {
            users: HashMap::with_capacity(user_count),
        }
    }

    /// Register a user. The registry keeps another handle to the same record.
    pub fn add(&mut self, user: Arc<User>) -> Result<()> {
        let id = user.id();
        if self.users.contains_key(&id) {
            return Err(SocialError::UserAlreadyExists(id));
        }
        self.users.insert(id, user);
        Ok(())
    }

    pub fn get(&self, id: UserId) -> Result<&Arc<User>> {
        self.users.get(&id).ok_or(SocialError::UserDoesNotExist(id))
    }

    pub fn remove(&mut self, id: UserId) -> Result<Arc<User>> {
        self.users.remove(&id).ok_or(SocialError::UserDoesNotExist(id))
    }

    /// Existence guard: fails on the first unknown id, in argument order.
    pub fn require(&self, ids: &[UserId]) -> Result<()> {
        match ids.iter().find(|id| !self.users.contains_key(id)) {
            Some(&missing) => Err(SocialError::UserDoesNotExist(missing)),
            None => Ok(()),
        }
    }

    pub fn contains(&self, id: UserId) -> bool {
        self.users.contains_key(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = UserId> + '_ {
        self.users.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
