//! Users Domain
//!
//! Accounts of the todo service: registration, lookup by username and
//! deletion. Deleting a user removes every task it owns in the same
//! transaction.
//!
//! ```text
//! ┌─────────────┐
//! │   Service   │  ← username validation, password hashing
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← trait + PostgreSQL implementation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← User, CreateUser, value objects
//! └─────────────┘
//! ```
//!
//! ```rust,no_run
//! use domain_users::{PgUserRepository, UserService};
//!
//! # async fn example(db: sea_orm::DatabaseConnection) {
//! let service = UserService::new(PgUserRepository::new(db));
//! # }
//! ```

pub mod conversions;
pub mod error;
pub mod models;
pub mod password;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod value_objects;

pub use error::{UserError, UserResult};
pub use models::{CreateUser, User};
pub use postgres::PgUserRepository;
pub use repository::UserRepository;
#[cfg(any(test, feature = "mock"))]
pub use repository::MockUserRepository;
pub use service::UserService;
pub use value_objects::{Username, ValueError};
