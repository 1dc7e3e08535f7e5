use crate::domain::{User, UserId};
use crate::ports::user_directory::{Result, UserDirectory as UserDirectoryTrait};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Mock implementation of UserDirectory
///
/// Supports stateful testing by storing registered users.
pub struct UserDirectory {
    users: Mutex<HashMap<UserId, User>>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
        }
    }

    /// Add a user for testing purposes
    pub fn add_user(&self, user: User) {
        self.users.lock().unwrap().insert(user.id, user);
    }
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserDirectoryTrait for UserDirectory {
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>> {
        Ok(self.users.lock().unwrap().get(&user_id).cloned())
    }
}
