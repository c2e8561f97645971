//! Todo storage service
//!
//! ```text
//! Gateway
//!   ↓ (gRPC, zstd, `userid` metadata)
//! TodoServiceImpl (service.rs)
//!   ↓ (proto ↔ domain conversions)
//! TaskService / UserService
//!   ↓
//! PgTaskRepository / PgUserRepository
//!   ↓
//! PostgreSQL
//! ```

pub mod server;
pub mod service;
pub mod status;

pub use server::run;
pub use service::TodoServiceImpl;
