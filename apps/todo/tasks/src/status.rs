//! Domain error → gRPC status.

use domain_tasks::TaskError;
use domain_users::UserError;
use tonic::Status;
use tracing::error;

pub fn from_task_error(err: TaskError) -> Status {
    match err {
        TaskError::Validation(_) | TaskError::Query(_) => Status::invalid_argument(err.to_string()),
        TaskError::NotFound(_) => Status::not_found(err.to_string()),
        TaskError::Storage(details) => {
            error!(error = %details, "Task storage failure");
            Status::internal("storage failure")
        }
    }
}

pub fn from_user_error(err: UserError) -> Status {
    match err {
        UserError::Validation(_) => Status::invalid_argument(err.to_string()),
        UserError::NotFound(_) => Status::not_found(err.to_string()),
        UserError::DuplicateUsername(_) => Status::already_exists(err.to_string()),
        UserError::InvalidCredentials => Status::unauthenticated(err.to_string()),
        UserError::PasswordHash(details) | UserError::Storage(details) => {
            error!(error = %details, "User storage failure");
            Status::internal("storage failure")
        }
    }
}
