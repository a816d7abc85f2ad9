//! The note engine: owns notes and schemas and keeps the index consistent.
//!
//! [`Engine`] applies creates, renames and deletes to the in-memory
//! collections and patches the [`FuzzyIndex`](crate::index::FuzzyIndex)
//! entry by entry. Hierarchical lookup only depends on the
//! [`NoteQueryEngine`] trait.

pub mod store;
pub mod types;

pub use store::Engine;
pub use types::{
    ChangeStatus, EngineError, NoteChange, NoteQueryEngine, NoteQueryResp, QueryNotesOpts,
};
