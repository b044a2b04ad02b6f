//! Confluence (cloud) connector configuration
//!
//! The connector document is the `Configuration` property of the data
//! source: secret reference, sync mode, endpoint, per-category field
//! mappings and crawl settings.

pub mod crawl;
pub mod field_mapping;

pub use crawl::CrawlSettings;
pub use field_mapping::{
    ContentCategory, FieldMapping, FieldMappingTable, IndexFieldType, CONFLUENCE_DATE_FORMAT,
};

use crate::error::MappingError;
use qbiz_graph::Token;
use serde::{Deserialize, Serialize};

/// Connector type identifier
pub const CONNECTOR_TYPE: &str = "CONFLUENCEV2";

/// How each sync run treats previously indexed content
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SyncMode {
    /// Re-crawl everything and drop documents no longer present
    #[default]
    ForcedFullCrawl,
    /// Re-crawl everything
    FullCrawl,
    /// Crawl only changes since the last run
    ChangeLog,
}

/// Hosting of the Confluence site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HostingType {
    /// Atlassian cloud
    Saas,
}

/// Connector authentication scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AuthType {
    /// Account identifier plus API credential
    Basic,
}

/// Where and how the connector reaches the site
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryEndpointMetadata {
    #[serde(rename = "type")]
    hosting: HostingType,
    host_url: String,
    auth_type: AuthType,
}

impl RepositoryEndpointMetadata {
    /// Cloud site at `host_url` with basic authentication
    #[must_use]
    pub fn saas(host_url: impl Into<String>) -> Self {
        Self {
            hosting: HostingType::Saas,
            host_url: host_url.into(),
            auth_type: AuthType::Basic,
        }
    }

    /// Site URL
    #[must_use]
    pub fn host_url(&self) -> &str {
        &self.host_url
    }

    /// Hosting
    #[must_use]
    pub fn hosting(&self) -> HostingType {
        self.hosting
    }

    /// Authentication scheme
    #[must_use]
    pub fn auth_type(&self) -> AuthType {
        self.auth_type
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConnectionConfiguration {
    repository_endpoint_metadata: RepositoryEndpointMetadata,
}

/// Mapping tables keyed by content category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryConfigurations {
    space: FieldMappingTable,
    page: FieldMappingTable,
}

impl RepositoryConfigurations {
    /// Default tables for both categories
    ///
    /// # Errors
    /// Propagates table validation errors.
    pub fn defaults() -> Result<Self, MappingError> {
        Ok(Self {
            space: FieldMappingTable::defaults(ContentCategory::Space)?,
            page: FieldMappingTable::defaults(ContentCategory::Page)?,
        })
    }

    /// Table for `category`
    #[must_use]
    pub fn table(&self, category: ContentCategory) -> &FieldMappingTable {
        match category {
            ContentCategory::Space => &self.space,
            ContentCategory::Page => &self.page,
        }
    }
}

/// Full connector document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfluenceConfiguration {
    secret_arn: Token,
    sync_mode: SyncMode,
    enable_identity_crawler: bool,
    connection_configuration: ConnectionConfiguration,
    repository_configurations: RepositoryConfigurations,
    #[serde(rename = "type")]
    connector_type: &'static str,
    additional_properties: CrawlSettings,
}

impl ConfluenceConfiguration {
    /// Connector for the cloud site at `host_url` with default crawl scope
    ///
    /// # Errors
    /// Propagates field mapping validation errors.
    pub fn new(
        host_url: impl Into<String>,
        secret_arn: Token,
        sync_mode: SyncMode,
    ) -> Result<Self, MappingError> {
        Ok(Self {
            secret_arn,
            sync_mode,
            enable_identity_crawler: true,
            connection_configuration: ConnectionConfiguration {
                repository_endpoint_metadata: RepositoryEndpointMetadata::saas(host_url),
            },
            repository_configurations: RepositoryConfigurations::defaults()?,
            connector_type: CONNECTOR_TYPE,
            additional_properties: CrawlSettings::default(),
        })
    }

    /// Replace the crawl settings
    #[must_use]
    pub fn with_crawl_settings(mut self, settings: CrawlSettings) -> Self {
        self.additional_properties = settings;
        self
    }

    /// Credential secret
    #[must_use]
    pub fn secret_arn(&self) -> &Token {
        &self.secret_arn
    }

    /// Sync mode
    #[must_use]
    pub fn sync_mode(&self) -> SyncMode {
        self.sync_mode
    }

    /// Whether users and groups are crawled alongside content
    #[must_use]
    pub fn identity_crawler_enabled(&self) -> bool {
        self.enable_identity_crawler
    }

    /// Site endpoint
    #[must_use]
    pub fn endpoint(&self) -> &RepositoryEndpointMetadata {
        &self.connection_configuration.repository_endpoint_metadata
    }

    /// Field mapping table for `category`
    #[must_use]
    pub fn field_mappings(&self, category: ContentCategory) -> &FieldMappingTable {
        self.repository_configurations.table(category)
    }

    /// Crawl settings
    #[must_use]
    pub fn crawl_settings(&self) -> &CrawlSettings {
        &self.additional_properties
    }

    /// Tokens embedded in the document
    #[must_use]
    pub fn tokens(&self) -> Vec<&Token> {
        vec![&self.secret_arn]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use qbiz_graph::{Attribute, LogicalId};
    use serde_json::json;

    #[test]
    fn connector_document_shape() {
        let secret = Token::attr(LogicalId::new("Secret").unwrap(), Attribute::Ref);
        let configuration = ConfluenceConfiguration::new(
            "https://example.atlassian.net/",
            secret,
            SyncMode::ForcedFullCrawl,
        )
        .unwrap();

        let value = serde_json::to_value(&configuration).unwrap();
        assert_eq!(value["type"], "CONFLUENCEV2");
        assert_eq!(value["secretArn"], json!({"Ref": "Secret"}));
        assert_eq!(value["syncMode"], "FORCED_FULL_CRAWL");
        assert_eq!(value["enableIdentityCrawler"], true);
        assert_eq!(
            value["connectionConfiguration"]["repositoryEndpointMetadata"],
            json!({
                "type": "SAAS",
                "hostUrl": "https://example.atlassian.net/",
                "authType": "Basic"
            })
        );
        assert_eq!(
            value["repositoryConfigurations"]["space"]["fieldMappings"]
                .as_array()
                .unwrap()
                .len(),
            2
        );
        assert_eq!(
            value["repositoryConfigurations"]["page"]["fieldMappings"]
                .as_array()
                .unwrap()
                .len(),
            5
        );
        assert_eq!(configuration.tokens().len(), 1);
    }
}
