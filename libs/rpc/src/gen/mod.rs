// @generated
// The prost file include!()s the matching tonic file.

pub mod todo {
    include!("todo.rs");
}
