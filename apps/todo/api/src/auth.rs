use domain_users::UserError;
use domain_users::password::{hash_password, verify_password};
use std::sync::LazyLock;
use tracing::debug;
use uuid::Uuid;

use crate::client::TodoClient;

const DUMMY_PASSWORD: &str = "no-such-user";

/// Verified against when the lookup fails so unknown usernames pay for one
/// argon2 run as well.
static DUMMY_HASH: LazyLock<Option<String>> = LazyLock::new(|| hash_password(DUMMY_PASSWORD).ok());

fn verify_against_dummy(password: &str) {
    if let Some(hash) = DUMMY_HASH.as_deref() {
        let _ = verify_password(password, hash);
    }
}

/// Resolve `username`/`password` to a user id.
///
/// Unknown user, unreadable stored hash and wrong password are
/// indistinguishable to the caller.
pub async fn authenticate(
    client: &dyn TodoClient,
    username: &str,
    password: &str,
) -> Result<Uuid, UserError> {
    let user = match client.get_user_by_username(username.to_string()).await {
        Ok(user) => user,
        Err(status) => {
            debug!(code = ?status.code(), "User lookup failed during login");
            verify_against_dummy(password);
            return Err(UserError::InvalidCredentials);
        }
    };

    if !verify_password(password, &user.password_hash) {
        return Err(UserError::InvalidCredentials);
    }

    Uuid::parse_str(&user.id).map_err(|_| UserError::InvalidCredentials)
}
