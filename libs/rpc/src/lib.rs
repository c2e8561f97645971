//! Generated protobuf and gRPC code for `proto/todo/v1/todo.proto`.
//!
//! Regenerate with `buf generate` after editing the proto; the output is
//! checked in so the workspace builds without `protoc`.

mod gen;

pub use gen::todo;
