//! Stack configuration
//!
//! [`StackProps`] carries the two operator-supplied inputs plus tunable
//! [`StackSettings`]. Props can be loaded from TOML or YAML, and
//! environment overrides are applied only on explicit request through an
//! injected lookup, so the builder itself never reads process state.

use crate::confluence::{CrawlSettings, SyncMode};
use crate::error::ConfigError;
use crate::resources::{IndexType, RemovalPolicy};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable overriding the identity directory ARN
pub const IDENTITY_CENTER_ARN_VAR: &str = "QBIZ_IDENTITY_CENTER_INSTANCE_ARN";

/// Environment variable overriding the Confluence site URL
pub const CONFLUENCE_HOST_URL_VAR: &str = "QBIZ_CONFLUENCE_HOST_URL";

/// Shortest deletion waiting period the key service accepts
pub const MIN_KEY_PENDING_WINDOW_DAYS: u8 = 7;

/// Longest deletion waiting period the key service accepts
pub const MAX_KEY_PENDING_WINDOW_DAYS: u8 = 30;

/// Caller-supplied stack inputs
///
/// Both inputs are optional here so that partially specified files can be
/// merged with overrides; [`StackProps::resolve`] enforces presence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StackProps {
    /// ARN of the external identity directory instance
    #[serde(default)]
    pub identity_center_instance_arn: Option<String>,
    /// Base URL of the Confluence site
    #[serde(default)]
    pub confluence_host_url: Option<String>,
    /// Tunable settings
    #[serde(default)]
    pub settings: StackSettings,
}

impl StackProps {
    /// Props with both required inputs and default settings
    #[must_use]
    pub fn new(
        identity_center_instance_arn: impl Into<String>,
        confluence_host_url: impl Into<String>,
    ) -> Self {
        Self {
            identity_center_instance_arn: Some(identity_center_instance_arn.into()),
            confluence_host_url: Some(confluence_host_url.into()),
            settings: StackSettings::default(),
        }
    }

    /// Parse TOML props
    ///
    /// # Errors
    /// `ConfigError::Parse` on malformed input or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse {
            format: "toml",
            message: e.to_string(),
        })
    }

    /// Parse YAML props
    ///
    /// # Errors
    /// `ConfigError::Parse` on malformed input or unknown keys.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(text).map_err(|e| ConfigError::Parse {
            format: "yaml",
            message: e.to_string(),
        })
    }

    /// Load props from a `.toml`, `.yaml` or `.yml` file
    ///
    /// # Errors
    /// - `ConfigError::UnsupportedFormat` for other extensions
    /// - `ConfigError::Io` if the file cannot be read
    /// - `ConfigError::Parse` on malformed content
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let parse: fn(&str) -> Result<Self, ConfigError> = match extension.as_deref() {
            Some("toml") => Self::from_toml_str,
            Some("yaml" | "yml") => Self::from_yaml_str,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded stack configuration");
        parse(&text)
    }

    /// Replace required inputs with values found by `lookup`
    ///
    /// `lookup` receives [`IDENTITY_CENTER_ARN_VAR`] and
    /// [`CONFLUENCE_HOST_URL_VAR`]; blank results are ignored.
    #[must_use]
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        if let Some(arn) = present(IDENTITY_CENTER_ARN_VAR) {
            self.identity_center_instance_arn = Some(arn);
        }
        if let Some(url) = present(CONFLUENCE_HOST_URL_VAR) {
            self.confluence_host_url = Some(url);
        }
        self
    }

    /// Apply overrides from the process environment
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|name| std::env::var(name).ok())
    }

    /// Check presence of both inputs and validate settings
    ///
    /// # Errors
    /// - `ConfigError::MissingParameter` if an input is absent or blank
    /// - `ConfigError::InvalidValue` if a setting is out of range
    pub fn resolve(&self) -> Result<ResolvedProps, ConfigError> {
        let identity_center_instance_arn = required(
            self.identity_center_instance_arn.as_deref(),
            "identity_center_instance_arn",
        )?;
        let confluence_host_url =
            required(self.confluence_host_url.as_deref(), "confluence_host_url")?;
        self.settings.validate()?;

        Ok(ResolvedProps {
            identity_center_instance_arn,
            confluence_host_url,
            settings: self.settings.clone(),
        })
    }
}

fn required(value: Option<&str>, name: &'static str) -> Result<String, ConfigError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value.to_string()),
        _ => Err(ConfigError::MissingParameter(name)),
    }
}

/// Props after presence and range checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProps {
    /// ARN of the external identity directory instance
    pub identity_center_instance_arn: String,
    /// Base URL of the Confluence site
    pub confluence_host_url: String,
    /// Validated settings
    pub settings: StackSettings,
}

/// Tunable stack settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StackSettings {
    /// Application display name
    pub application_display_name: String,
    /// Alias of the encryption key
    pub key_alias: String,
    /// Days between key deletion request and destruction
    pub key_pending_window_days: u8,
    /// What happens to the key when the stack is torn down
    pub key_removal_policy: RemovalPolicy,
    /// Index capacity tier
    pub index_type: IndexType,
    /// Index capacity units
    pub index_capacity_units: u32,
    /// Data source sync mode
    pub sync_mode: SyncMode,
    /// Connector crawl filters and toggles
    pub crawl: CrawlSettings,
}

impl Default for StackSettings {
    fn default() -> Self {
        Self {
            application_display_name: "CDK_QBusiness".to_string(),
            key_alias: "QBusinessKey".to_string(),
            key_pending_window_days: MIN_KEY_PENDING_WINDOW_DAYS,
            key_removal_policy: RemovalPolicy::Destroy,
            index_type: IndexType::Starter,
            index_capacity_units: 1,
            sync_mode: SyncMode::ForcedFullCrawl,
            crawl: CrawlSettings::default(),
        }
    }
}

impl StackSettings {
    /// Range checks
    ///
    /// # Errors
    /// `ConfigError::InvalidValue` naming the first offending setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.application_display_name.trim().is_empty() {
            return Err(ConfigError::invalid("application_display_name", "must not be blank"));
        }
        if self.key_alias.trim().is_empty() || self.key_alias.contains(char::is_whitespace) {
            return Err(ConfigError::invalid(
                "key_alias",
                "must be non-empty and contain no whitespace",
            ));
        }
        if !(MIN_KEY_PENDING_WINDOW_DAYS..=MAX_KEY_PENDING_WINDOW_DAYS)
            .contains(&self.key_pending_window_days)
        {
            return Err(ConfigError::invalid(
                "key_pending_window_days",
                format!(
                    "{} is outside {MIN_KEY_PENDING_WINDOW_DAYS}..={MAX_KEY_PENDING_WINDOW_DAYS}",
                    self.key_pending_window_days
                ),
            ));
        }
        if self.index_capacity_units == 0 {
            return Err(ConfigError::invalid("index_capacity_units", "must be at least 1"));
        }
        if self.crawl.max_file_size_megabytes().is_none() {
            return Err(ConfigError::invalid(
                "crawl.maxFileSizeInMegaBytes",
                "must be a positive integer",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ARN: &str = "arn:aws:sso:::instance/ssoins-1234567890abcdef";
    const URL: &str = "https://example.atlassian.net/";

    #[test]
    fn resolve_requires_both_inputs() {
        let props = StackProps {
            confluence_host_url: Some(URL.to_string()),
            ..StackProps::default()
        };
        assert!(matches!(
            props.resolve(),
            Err(ConfigError::MissingParameter("identity_center_instance_arn"))
        ));

        let props = StackProps {
            identity_center_instance_arn: Some(ARN.to_string()),
            confluence_host_url: Some("   ".to_string()),
            ..StackProps::default()
        };
        assert!(matches!(
            props.resolve(),
            Err(ConfigError::MissingParameter("confluence_host_url"))
        ));
    }

    #[test]
    fn resolve_keeps_values() {
        let resolved = StackProps::new(ARN, URL).resolve().unwrap();
        assert_eq!(resolved.identity_center_instance_arn, ARN);
        assert_eq!(resolved.confluence_host_url, URL);
        assert_eq!(resolved.settings, StackSettings::default());
    }

    #[test]
    fn resolve_passes_inputs_through_unchanged() {
        let resolved = StackProps::new(" R1 ", "https://example.atlassian.net/ ")
            .resolve()
            .unwrap();
        assert_eq!(resolved.identity_center_instance_arn, " R1 ");
        assert_eq!(resolved.confluence_host_url, "https://example.atlassian.net/ ");
    }

    #[test]
    fn settings_range_checks() {
        let mut settings = StackSettings {
            key_pending_window_days: 6,
            ..StackSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidValue {
                field: "key_pending_window_days",
                ..
            })
        ));

        settings.key_pending_window_days = 30;
        assert!(settings.validate().is_ok());

        settings.index_capacity_units = 0;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidValue {
                field: "index_capacity_units",
                ..
            })
        ));
    }

    #[test]
    fn overrides_replace_only_present_values() {
        let props = StackProps::new(ARN, URL).with_overrides_from(|name| match name {
            CONFLUENCE_HOST_URL_VAR => Some("https://other.atlassian.net/".to_string()),
            IDENTITY_CENTER_ARN_VAR => Some(String::new()),
            _ => None,
        });
        assert_eq!(props.identity_center_instance_arn.as_deref(), Some(ARN));
        assert_eq!(
            props.confluence_host_url.as_deref(),
            Some("https://other.atlassian.net/")
        );
    }

    #[test]
    fn parses_toml_with_partial_settings() {
        let props = StackProps::from_toml_str(
            r#"
            identity_center_instance_arn = "arn:aws:sso:::instance/ssoins-1234567890abcdef"
            confluence_host_url = "https://example.atlassian.net/"

            [settings]
            key_pending_window_days = 14
            sync_mode = "FULL_CRAWL"
            "#,
        )
        .unwrap();

        assert_eq!(props.settings.key_pending_window_days, 14);
        assert_eq!(props.settings.sync_mode, SyncMode::FullCrawl);
        assert_eq!(props.settings.key_alias, "QBusinessKey");
    }

    #[test]
    fn crawl_settings_are_configurable() {
        let props = StackProps::from_yaml_str(
            "identity_center_instance_arn: arn:aws:sso:::instance/ssoins-1234567890abcdef\n\
             settings:\n  crawl:\n    isCrawlBlog: true\n    maxFileSizeInMegaBytes: \"10\"\n",
        )
        .unwrap();

        assert!(props.settings.crawl.is_crawl_blog);
        assert_eq!(props.settings.crawl.max_file_size_megabytes(), Some(10));
        assert!(props.settings.crawl.is_crawl_acl);

        let mut settings = props.settings;
        settings.crawl.max_file_size_in_megabytes = "0".to_string();
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidValue {
                field: "crawl.maxFileSizeInMegaBytes",
                ..
            })
        ));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = StackProps::from_yaml_str("confluence_url: https://example.atlassian.net/\n");
        assert!(matches!(result, Err(ConfigError::Parse { format: "yaml", .. })));
    }
}
