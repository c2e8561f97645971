//! User ↔ protobuf conversions

use rpc::todo as pb;

use crate::models::{CreateUser, User};

impl From<User> for pb::User {
    fn from(user: User) -> Self {
        pb::User {
            id: user.id.to_string(),
            username: user.username.into_inner(),
            password_hash: user.password_hash,
        }
    }
}

impl From<pb::CreateUserRequest> for CreateUser {
    fn from(request: pb::CreateUserRequest) -> Self {
        CreateUser {
            username: request.username,
            password: request.password,
        }
    }
}
