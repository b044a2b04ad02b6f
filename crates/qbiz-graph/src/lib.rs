//! QBiz Graph - construction-time resource declaration graph
//!
//! Declarations are appended to a [`GraphBuilder`] in dependency order.
//! Every cross-reference is a [`Token`] naming an attribute that an earlier
//! declaration emits, so forward references are rejected when they are made.
//!
//! # Two-Phase Architecture
//!
//! 1. **Construction**: `GraphBuilder::declare` appends declarations and
//!    derives dependency edges from the tokens they embed.
//! 2. **Validation**: `GraphBuilder::validate` checks the edge set with a
//!    topological sort and seals the result into an immutable [`ValidatedGraph`].
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use qbiz_graph::prelude::*;
//!
//! let mut builder = GraphBuilder::new();
//! let key = builder.declare("Key", key_resource)?;
//! builder.declare("Secret", secret_resource_using(key.attr(Attribute::Arn)))?;
//!
//! let graph: ValidatedGraph<_> = builder.validate()?;
//! for wave in graph.realization_waves() {
//!     // every declaration in a wave only depends on earlier waves
//! }
//! ```

pub mod construction;
pub mod declaration;
pub mod error;
pub mod resource;
pub mod token;
pub mod types;
pub mod validated_graph;

pub use construction::{Declared, GraphBuilder};
pub use declaration::Declaration;
pub use error::GraphError;
pub use resource::Resource;
pub use token::Token;
pub use types::{Attribute, Environment, LogicalId, Pseudo};
pub use validated_graph::ValidatedGraph;

/// Common imports for building graphs
pub mod prelude {
    pub use crate::construction::{Declared, GraphBuilder};
    pub use crate::error::GraphError;
    pub use crate::resource::Resource;
    pub use crate::token::Token;
    pub use crate::types::{Attribute, Environment, LogicalId, Pseudo};
    pub use crate::validated_graph::ValidatedGraph;
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
pub(crate) mod test_support;
