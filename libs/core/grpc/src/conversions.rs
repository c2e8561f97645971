//! Wire ↔ domain helpers shared by every RPC handler.
//!
//! Identifiers travel as strings on the wire and are parsed here so that
//! malformed ids surface uniformly as `INVALID_ARGUMENT`.

use tonic::Status;
use uuid::Uuid;

/// Parse a UUID carried in a request field.
pub fn parse_uuid(field: &str, value: &str) -> Result<Uuid, Status> {
    Uuid::parse_str(value)
        .map_err(|_| Status::invalid_argument(format!("{field} is not a valid id: {value:?}")))
}

/// Parse every id of a repeated field, failing on the first malformed one.
pub fn parse_uuids(field: &str, values: &[String]) -> Result<Vec<Uuid>, Status> {
    values.iter().map(|value| parse_uuid(field, value)).collect()
}
