//! Domain layer: pure helpers
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod base;
pub mod error;
pub mod ids;
pub mod keyboard;
pub mod map;
pub mod text;
pub mod tree;
pub mod units;

pub use base::{convert, Alphabet, Base, CANONICAL_ALPHABET};
pub use error::{DomainError, DomainResult};
pub use tree::{Record, Records, TreeBuilder};
