//! Caller identity propagation.
//!
//! The gateway authenticates the caller and forwards the id in request
//! metadata; the storage service trusts it. HTTP/2 requires lowercase keys,
//! so the key on the wire is `userid`.

use tonic::metadata::MetadataValue;
use tonic::{Request, Status};
use uuid::Uuid;

pub const USER_ID_KEY: &str = "userid";

/// Attach the caller id to an outgoing request.
pub fn insert_user_id<T>(request: &mut Request<T>, user_id: Uuid) {
    // A hyphenated UUID is always valid ASCII metadata
    if let Ok(value) = MetadataValue::try_from(user_id.to_string()) {
        request.metadata_mut().insert(USER_ID_KEY, value);
    }
}

/// Read the caller id from an incoming request.
///
/// Missing key → `UNAUTHENTICATED`, unparsable value → `INVALID_ARGUMENT`.
pub fn user_id<T>(request: &Request<T>) -> Result<Uuid, Status> {
    let value = request
        .metadata()
        .get(USER_ID_KEY)
        .ok_or_else(|| Status::unauthenticated("missing caller identity"))?;

    value
        .to_str()
        .ok()
        .and_then(|raw| Uuid::parse_str(raw).ok())
        .ok_or_else(|| Status::invalid_argument("malformed caller identity"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_metadata() {
        let id = Uuid::now_v7();
        let mut request = Request::new(());
        insert_user_id(&mut request, id);

        assert_eq!(
            request.metadata().get("userid").unwrap().to_str().unwrap(),
            id.to_string()
        );
        assert_eq!(user_id(&request).unwrap(), id);
    }

    #[test]
    fn test_missing_identity_is_unauthenticated() {
        let request = Request::new(());
        let status = user_id(&request).unwrap_err();
        assert_eq!(status.code(), tonic::Code::Unauthenticated);
    }

    #[test]
    fn test_malformed_identity_is_invalid_argument() {
        let mut request = Request::new(());
        request
            .metadata_mut()
            .insert(USER_ID_KEY, MetadataValue::from_static("not-a-uuid"));
        let status = user_id(&request).unwrap_err();
        assert_eq!(status.code(), tonic::Code::InvalidArgument);
    }
}
