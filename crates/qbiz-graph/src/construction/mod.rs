//! Construction Phase
//!
//! Declarations are appended in dependency order and checked as they
//! arrive. `GraphBuilder::validate` then re-checks the complete edge set
//! and produces a [`ValidatedGraph`](crate::ValidatedGraph).
//!
//! 1. **Declare** (builder module):
//!    - Validate the logical id
//!    - Reject duplicate ids
//!    - Resolve every token reference against earlier declarations
//!    - Record dependency edges
//!
//! 2. **Validate** (validator module):
//!    - Topological sort over the edge set
//!    - Check declaration order against the edges
//!    - Fingerprint the structure

pub mod builder;
pub mod validator;

pub use builder::{Declared, GraphBuilder};
pub use validator::{check_structure, StructureReport};
