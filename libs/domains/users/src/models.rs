use uuid::Uuid;

use crate::value_objects::Username;

/// A registered account.
///
/// `password_hash` is an argon2 PHC string and is never compared directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub username: Username,
    pub password_hash: String,
}

impl User {
    /// New account with a fresh time-ordered id.
    pub fn new(username: Username, password_hash: String) -> Self {
        Self {
            id: Uuid::now_v7(),
            username,
            password_hash,
        }
    }
}

/// Registration input, before validation and hashing.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub password: String,
}
