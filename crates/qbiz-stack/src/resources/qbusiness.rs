//! Q Business application, index, retriever, web experience and data source

use crate::confluence::ConfluenceConfiguration;
use qbiz_graph::{Attribute, Resource, Token};
use serde::{Deserialize, Serialize};

/// Index capacity tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IndexType {
    /// Entry tier
    #[default]
    Starter,
    /// Production tier
    Enterprise,
}

/// Application bound to an identity directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Application {
    display_name: String,
    identity_center_instance_arn: Token,
    role_arn: Token,
}

impl Application {
    /// Application running under `role_arn`
    #[must_use]
    pub fn new(
        display_name: impl Into<String>,
        identity_center_instance_arn: impl Into<Token>,
        role_arn: Token,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            identity_center_instance_arn: identity_center_instance_arn.into(),
            role_arn,
        }
    }

    /// Display name
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Identity directory instance
    #[must_use]
    pub fn identity_center_instance_arn(&self) -> &Token {
        &self.identity_center_instance_arn
    }

    /// Service role
    #[must_use]
    pub fn role_arn(&self) -> &Token {
        &self.role_arn
    }
}

impl Resource for Application {
    fn resource_type(&self) -> &'static str {
        "AWS::QBusiness::Application"
    }

    fn emits(&self) -> &'static [Attribute] {
        &[Attribute::ApplicationId, Attribute::ApplicationArn]
    }

    fn tokens(&self) -> Vec<&Token> {
        vec![&self.identity_center_instance_arn, &self.role_arn]
    }
}

/// Index capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CapacityConfiguration {
    /// Capacity units
    pub units: u32,
}

/// Document index of an application
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Index {
    application_id: Token,
    display_name: String,
    #[serde(rename = "Type")]
    index_type: IndexType,
    capacity_configuration: CapacityConfiguration,
}

impl Index {
    /// Index named `display_name` in the given tier
    #[must_use]
    pub fn new(
        application_id: Token,
        display_name: impl Into<String>,
        index_type: IndexType,
        units: u32,
    ) -> Self {
        Self {
            application_id,
            display_name: display_name.into(),
            index_type,
            capacity_configuration: CapacityConfiguration { units },
        }
    }

    /// Owning application
    #[must_use]
    pub fn application_id(&self) -> &Token {
        &self.application_id
    }

    /// Display name
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Tier
    #[must_use]
    pub fn index_type(&self) -> IndexType {
        self.index_type
    }

    /// Capacity units
    #[must_use]
    pub fn capacity_units(&self) -> u32 {
        self.capacity_configuration.units
    }
}

impl Resource for Index {
    fn resource_type(&self) -> &'static str {
        "AWS::QBusiness::Index"
    }

    fn emits(&self) -> &'static [Attribute] {
        &[Attribute::IndexId, Attribute::IndexArn]
    }

    fn tokens(&self) -> Vec<&Token> {
        vec![&self.application_id]
    }
}

/// Retrieval mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RetrieverType {
    /// Query the application's own index
    NativeIndex,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
struct NativeIndexConfiguration {
    index_id: Token,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
struct RetrieverConfiguration {
    native_index_configuration: NativeIndexConfiguration,
}

/// Query path from the application to its index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Retriever {
    application_id: Token,
    display_name: String,
    #[serde(rename = "Type")]
    retriever_type: RetrieverType,
    configuration: RetrieverConfiguration,
}

impl Retriever {
    /// Native-index retriever over `index_id`
    #[must_use]
    pub fn native_index(application_id: Token, display_name: impl Into<String>, index_id: Token) -> Self {
        Self {
            application_id,
            display_name: display_name.into(),
            retriever_type: RetrieverType::NativeIndex,
            configuration: RetrieverConfiguration {
                native_index_configuration: NativeIndexConfiguration { index_id },
            },
        }
    }

    /// Retrieval mode
    #[must_use]
    pub fn retriever_type(&self) -> RetrieverType {
        self.retriever_type
    }

    /// Index queried
    #[must_use]
    pub fn index_id(&self) -> &Token {
        &self.configuration.native_index_configuration.index_id
    }
}

impl Resource for Retriever {
    fn resource_type(&self) -> &'static str {
        "AWS::QBusiness::Retriever"
    }

    fn emits(&self) -> &'static [Attribute] {
        &[Attribute::RetrieverId]
    }

    fn tokens(&self) -> Vec<&Token> {
        vec![&self.application_id, self.index_id()]
    }
}

/// End-user chat front end
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct WebExperience {
    application_id: Token,
    role_arn: Token,
}

impl WebExperience {
    /// Web experience running under `role_arn`
    #[must_use]
    pub fn new(application_id: Token, role_arn: Token) -> Self {
        Self {
            application_id,
            role_arn,
        }
    }

    /// Service role
    #[must_use]
    pub fn role_arn(&self) -> &Token {
        &self.role_arn
    }
}

impl Resource for WebExperience {
    fn resource_type(&self) -> &'static str {
        "AWS::QBusiness::WebExperience"
    }

    fn emits(&self) -> &'static [Attribute] {
        &[Attribute::WebExperienceId]
    }

    fn tokens(&self) -> Vec<&Token> {
        vec![&self.application_id, &self.role_arn]
    }
}

/// Connector feeding the index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DataSource {
    application_id: Token,
    display_name: String,
    index_id: Token,
    role_arn: Token,
    configuration: ConfluenceConfiguration,
}

impl DataSource {
    /// Confluence data source writing into `index_id`
    #[must_use]
    pub fn confluence(
        application_id: Token,
        display_name: impl Into<String>,
        index_id: Token,
        role_arn: Token,
        configuration: ConfluenceConfiguration,
    ) -> Self {
        Self {
            application_id,
            display_name: display_name.into(),
            index_id,
            role_arn,
            configuration,
        }
    }

    /// Display name
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Index the connector writes into
    #[must_use]
    pub fn index_id(&self) -> &Token {
        &self.index_id
    }

    /// Connector configuration
    #[must_use]
    pub fn configuration(&self) -> &ConfluenceConfiguration {
        &self.configuration
    }
}

impl Resource for DataSource {
    fn resource_type(&self) -> &'static str {
        "AWS::QBusiness::DataSource"
    }

    fn emits(&self) -> &'static [Attribute] {
        &[Attribute::DataSourceId]
    }

    fn tokens(&self) -> Vec<&Token> {
        let mut tokens = vec![&self.application_id, &self.index_id, &self.role_arn];
        tokens.extend(self.configuration.tokens());
        tokens
    }
}
