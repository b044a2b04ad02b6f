//! Minimal resource type for exercising the graph in unit tests

use crate::resource::Resource;
use crate::token::Token;
use crate::types::{Attribute, LogicalId};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct Node {
    pub(crate) inputs: Vec<Token>,
    #[serde(skip)]
    pub(crate) after: Vec<LogicalId>,
}

impl Node {
    pub(crate) fn leaf() -> Self {
        Self {
            inputs: Vec::new(),
            after: Vec::new(),
        }
    }

    pub(crate) fn using(inputs: impl IntoIterator<Item = Token>) -> Self {
        Self {
            inputs: inputs.into_iter().collect(),
            after: Vec::new(),
        }
    }
}

impl Resource for Node {
    fn resource_type(&self) -> &'static str {
        "Test::Node"
    }

    fn emits(&self) -> &'static [Attribute] {
        &[Attribute::Ref, Attribute::Arn]
    }

    fn tokens(&self) -> Vec<&Token> {
        self.inputs.iter().collect()
    }

    fn explicit_dependencies(&self) -> Vec<&LogicalId> {
        self.after.iter().collect()
    }
}

pub(crate) fn id(s: &str) -> LogicalId {
    LogicalId::new(s).unwrap()
}
