//! Hierarchical lookup: query normalisation, root results, direct-children
//! filtering and pagination.

pub mod note_lookup;

pub use note_lookup::{LookupError, LookupOpts, NoteLookup, PAGINATE_LIMIT};
