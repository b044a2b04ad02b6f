//! Template synthesis
//!
//! Renders a validated stack graph as an engine template document.
//! Resources appear in declaration order. `DependsOn` lists only ordering
//! edges that no token already expresses; the engine derives the rest
//! from `Ref` and `Fn::GetAtt`.

use crate::error::StackError;
use crate::resources::{StackResource, PLACEHOLDER_VALUE};
use indexmap::IndexMap;
use qbiz_graph::{Attribute, Declaration, LogicalId, Resource, Token, ValidatedGraph};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashSet;

/// Template format version
pub const FORMAT_VERSION: &str = "2010-09-09";

/// Template description
pub const DESCRIPTION: &str = "Q Business application with a Confluence data source";

/// One resource entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TemplateResource {
    #[serde(rename = "Type")]
    resource_type: &'static str,
    properties: Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    depends_on: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    deletion_policy: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    update_replace_policy: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<Value>,
}

impl TemplateResource {
    fn new(resource_type: &'static str, properties: Value) -> Self {
        Self {
            resource_type,
            properties,
            depends_on: Vec::new(),
            deletion_policy: None,
            update_replace_policy: None,
            metadata: None,
        }
    }

    /// Engine type name
    #[must_use]
    pub fn resource_type(&self) -> &str {
        self.resource_type
    }

    /// Rendered properties
    #[must_use]
    pub fn properties(&self) -> &Value {
        &self.properties
    }

    /// Explicit ordering dependencies
    #[must_use]
    pub fn depends_on(&self) -> &[String] {
        &self.depends_on
    }

    /// Deletion policy, if set
    #[must_use]
    pub fn deletion_policy(&self) -> Option<&str> {
        self.deletion_policy
    }

    /// Resource metadata
    #[must_use]
    pub fn metadata(&self) -> Option<&Value> {
        self.metadata.as_ref()
    }
}

/// One stack output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TemplateOutput {
    description: &'static str,
    value: Token,
}

impl TemplateOutput {
    /// Output value
    #[must_use]
    pub fn value(&self) -> &Token {
        &self.value
    }
}

/// Engine template for a stack graph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Template {
    #[serde(rename = "AWSTemplateFormatVersion")]
    format_version: &'static str,
    #[serde(rename = "Description")]
    description: &'static str,
    #[serde(rename = "Resources")]
    resources: IndexMap<String, TemplateResource>,
    #[serde(rename = "Outputs", skip_serializing_if = "IndexMap::is_empty")]
    outputs: IndexMap<String, TemplateOutput>,
}

impl Template {
    /// Render `graph`
    ///
    /// # Errors
    /// `StackError::Template` if a resource fails to serialize.
    pub fn synthesize(graph: &ValidatedGraph<StackResource>) -> Result<Self, StackError> {
        let mut template = Self {
            format_version: FORMAT_VERSION,
            description: DESCRIPTION,
            resources: IndexMap::with_capacity(graph.len() + 1),
            outputs: IndexMap::new(),
        };

        for declaration in graph.declarations() {
            template.add_declaration(declaration)?;
        }

        tracing::debug!(
            resources = template.resources.len(),
            outputs = template.outputs.len(),
            "template synthesized"
        );
        Ok(template)
    }

    fn add_declaration(&mut self, declaration: &Declaration<StackResource>) -> Result<(), StackError> {
        let id = declaration.id();
        let resource = declaration.resource();
        let properties =
            serde_json::to_value(resource).map_err(|e| StackError::Template(format!("{id}: {e}")))?;

        let mut entry = TemplateResource::new(resource.resource_type(), properties);
        entry.depends_on = explicit_dependencies(declaration);

        match resource {
            StackResource::EncryptionKey(key) => {
                let policy = key.removal_policy().as_str();
                entry.deletion_policy = Some(policy);
                entry.update_replace_policy = Some(policy);
                self.resources.insert(id.to_string(), entry);

                let alias = TemplateResource::new(
                    "AWS::KMS::Alias",
                    json!({
                        "AliasName": key.alias_name(),
                        "TargetKeyId": Token::attr(id.clone(), Attribute::Arn),
                    }),
                );
                self.resources.insert(format!("{id}Alias"), alias);
                return Ok(());
            }
            StackResource::Secret(secret) if secret.requires_manual_replacement() => {
                entry.metadata = Some(json!({
                    "ManualReplacementRequired": true,
                    "PlaceholderValue": PLACEHOLDER_VALUE,
                }));
                self.output(
                    "SecretArn",
                    "Connector secret; replace its placeholder values after deployment",
                    Token::attr(id.clone(), Attribute::Ref),
                );
            }
            StackResource::Secret(_) => {
                self.output(
                    "SecretArn",
                    "Connector secret",
                    Token::attr(id.clone(), Attribute::Ref),
                );
            }
            StackResource::Application(_) => {
                self.output(
                    "ApplicationId",
                    "Q Business application id",
                    Token::attr(id.clone(), Attribute::ApplicationId),
                );
            }
            StackResource::Index(_) => {
                self.output(
                    "IndexId",
                    "Q Business index id",
                    Token::attr(id.clone(), Attribute::IndexId),
                );
            }
            _ => {}
        }

        self.resources.insert(id.to_string(), entry);
        Ok(())
    }

    fn output(&mut self, name: &str, description: &'static str, value: Token) {
        self.outputs
            .insert(name.to_string(), TemplateOutput { description, value });
    }

    /// Resource entries in order
    #[must_use]
    pub fn resources(&self) -> &IndexMap<String, TemplateResource> {
        &self.resources
    }

    /// Resource entry by logical id
    #[must_use]
    pub fn resource(&self, id: &str) -> Option<&TemplateResource> {
        self.resources.get(id)
    }

    /// Outputs in order
    #[must_use]
    pub fn outputs(&self) -> &IndexMap<String, TemplateOutput> {
        &self.outputs
    }

    /// Render as a JSON value
    ///
    /// # Errors
    /// `StackError::Template` on serialization failure.
    pub fn to_json_value(&self) -> Result<Value, StackError> {
        serde_json::to_value(self).map_err(|e| StackError::Template(e.to_string()))
    }

    /// Render as pretty-printed JSON
    ///
    /// # Errors
    /// `StackError::Template` on serialization failure.
    pub fn to_json_pretty(&self) -> Result<String, StackError> {
        serde_json::to_string_pretty(self).map_err(|e| StackError::Template(e.to_string()))
    }
}

/// Dependencies not implied by any token in the resource
fn explicit_dependencies(declaration: &Declaration<StackResource>) -> Vec<String> {
    let implied: HashSet<&LogicalId> = declaration
        .resource()
        .tokens()
        .into_iter()
        .flat_map(Token::references)
        .map(|(id, _)| id)
        .collect();

    declaration
        .dependencies()
        .iter()
        .filter(|dep| !implied.contains(dep))
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_stack;
    use crate::config::StackProps;
    use crate::ids;
    use qbiz_graph::Environment;

    fn template() -> Template {
        let props = StackProps::new(
            "arn:aws:sso:::instance/ssoins-1234567890abcdef",
            "https://example.atlassian.net/",
        );
        let graph = build_stack(&props, &Environment::new("111122223333", "us-east-1")).unwrap();
        Template::synthesize(&graph).unwrap()
    }

    #[test]
    fn key_expands_to_key_and_alias() {
        let template = template();
        assert_eq!(template.resources().len(), 14);

        let key = template.resource(ids::KEY).unwrap();
        assert_eq!(key.resource_type(), "AWS::KMS::Key");
        assert_eq!(key.deletion_policy(), Some("Delete"));

        let alias = template.resource("QBusinessKeyAlias").unwrap();
        assert_eq!(alias.properties()["AliasName"], "alias/QBusinessKey");
        assert_eq!(
            template.resources().get_index_of("QBusinessKeyAlias"),
            Some(1)
        );
    }

    #[test]
    fn token_edges_are_not_repeated_as_depends_on() {
        let template = template();
        assert!(template.resources().values().all(|r| r.depends_on().is_empty()));
    }

    #[test]
    fn secret_is_flagged_and_exported() {
        let template = template();
        let secret = template.resource(ids::SECRET).unwrap();
        assert_eq!(secret.metadata().unwrap()["ManualReplacementRequired"], true);

        let names: Vec<&str> = template.outputs().keys().map(String::as_str).collect();
        assert_eq!(names, ["SecretArn", "ApplicationId", "IndexId"]);
    }
}
