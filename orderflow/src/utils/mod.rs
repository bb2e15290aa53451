//! Small, stateless algorithmic utilities.
//!
//! These are independent of the runner: version ordering, size-balanced
//! chunking, nearest-known-word correction, and tree pretty-printing.

mod chunking;
mod spelling;
mod tree;
mod version;

pub use chunking::chunk_by_size;
pub use spelling::correct_word;
pub use tree::{format_tree, TreeNode};
pub use version::Version;
