//! Connector credential secret

use qbiz_graph::{Attribute, Resource, Token};
use serde::{Serialize, Serializer};

/// Value stored in every credential field at creation
///
/// Operators must overwrite all three fields after deployment; the
/// connector cannot authenticate until they do.
pub const PLACEHOLDER_VALUE: &str = "dummy value - please change manually after deployment";

/// The three credential fields the connector reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretFields {
    /// Confluence account identifier
    pub username: String,
    /// Confluence site URL
    pub host_url: String,
    /// Confluence API credential
    pub password: String,
}

impl SecretFields {
    /// All fields set to [`PLACEHOLDER_VALUE`]
    #[must_use]
    pub fn placeholders() -> Self {
        Self {
            username: PLACEHOLDER_VALUE.to_string(),
            host_url: PLACEHOLDER_VALUE.to_string(),
            password: PLACEHOLDER_VALUE.to_string(),
        }
    }

    fn values(&self) -> [&str; 3] {
        [&self.username, &self.host_url, &self.password]
    }
}

/// Secret holding connector credentials, encrypted by the stack key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Secret {
    kms_key_id: Token,
    #[serde(rename = "SecretString", serialize_with = "secret_string")]
    fields: SecretFields,
}

fn secret_string<S: Serializer>(fields: &SecretFields, serializer: S) -> Result<S::Ok, S::Error> {
    let text = serde_json::to_string(fields).map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&text)
}

impl Secret {
    /// Secret with placeholder fields, encrypted under `kms_key_id`
    #[must_use]
    pub fn with_placeholders(kms_key_id: Token) -> Self {
        Self {
            kms_key_id,
            fields: SecretFields::placeholders(),
        }
    }

    /// Key encrypting the secret
    #[must_use]
    pub fn kms_key_id(&self) -> &Token {
        &self.kms_key_id
    }

    /// Credential fields
    #[must_use]
    pub fn fields(&self) -> &SecretFields {
        &self.fields
    }

    /// Whether any field still holds the placeholder
    #[must_use]
    pub fn requires_manual_replacement(&self) -> bool {
        self.fields.values().contains(&PLACEHOLDER_VALUE)
    }
}

impl Resource for Secret {
    fn resource_type(&self) -> &'static str {
        "AWS::SecretsManager::Secret"
    }

    fn emits(&self) -> &'static [Attribute] {
        &[Attribute::Ref]
    }

    fn tokens(&self) -> Vec<&Token> {
        vec![&self.kms_key_id]
    }
}
