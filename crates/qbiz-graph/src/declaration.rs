//! A single entry of a resource graph

use crate::resource::Resource;
use crate::types::LogicalId;

/// A resource bound to its logical id and resolved dependencies
///
/// `dependencies` lists the ids this declaration references, in the order
/// the references were first seen; each one is declared earlier.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration<R> {
    pub(crate) id: LogicalId,
    pub(crate) resource: R,
    pub(crate) dependencies: Vec<LogicalId>,
}

impl<R: Resource> Declaration<R> {
    /// Logical id
    #[inline]
    #[must_use]
    pub fn id(&self) -> &LogicalId {
        &self.id
    }

    /// Declared resource
    #[inline]
    #[must_use]
    pub fn resource(&self) -> &R {
        &self.resource
    }

    /// Engine type name
    #[inline]
    #[must_use]
    pub fn resource_type(&self) -> &'static str {
        self.resource.resource_type()
    }

    /// Ids of the declarations this one depends on
    #[inline]
    #[must_use]
    pub fn dependencies(&self) -> &[LogicalId] {
        &self.dependencies
    }

    /// Whether this declaration depends on `id`
    #[must_use]
    pub fn depends_on(&self, id: &LogicalId) -> bool {
        self.dependencies.contains(id)
    }
}
