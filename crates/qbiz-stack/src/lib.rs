//! # QBiz Stack
//!
//! A Q Business application fed by a Confluence (cloud) data source,
//! declared as a validated resource graph.
//!
//! ## Declarations
//!
//! 1. Encryption key, and the connector secret it protects
//! 2. Application policy and role, application, index, retriever
//! 3. Web experience policy and role, web experience
//! 4. Data source policy and role, data source
//!
//! Every role trusts exactly one service principal, scoped to the caller's
//! account and to a source ARN. The connector secret is created with
//! placeholder values that operators replace after deployment.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use qbiz_stack::prelude::*;
//!
//! let props = StackProps::from_path("stack.toml")?.with_env_overrides();
//! let graph = build_stack(&props, &Environment::deploy_time())?;
//! let template = Template::synthesize(&graph)?;
//! println!("{}", template.to_json_pretty()?);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod builder;
pub mod config;
pub mod confluence;
pub mod error;
pub mod ids;
pub mod logging;
pub mod policies;
pub mod resources;
pub mod template;

pub use builder::{build_stack, QBusinessStackBuilder};
pub use config::{ResolvedProps, StackProps, StackSettings};
pub use confluence::{
    ConfluenceConfiguration, ContentCategory, CrawlSettings, FieldMapping, FieldMappingTable,
    IndexFieldType, SyncMode,
};
pub use error::{ConfigError, MappingError, StackError};
pub use logging::{init_tracing, LogFormat};
pub use resources::StackResource;
pub use template::Template;

/// Prelude for common imports
pub mod prelude {
    pub use crate::builder::{build_stack, QBusinessStackBuilder};
    pub use crate::config::{StackProps, StackSettings};
    pub use crate::error::StackError;
    pub use crate::resources::StackResource;
    pub use crate::template::Template;
    pub use qbiz_graph::{Environment, ValidatedGraph};
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
