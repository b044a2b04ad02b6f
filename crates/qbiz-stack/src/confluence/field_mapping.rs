//! Source field → index field mappings per content category

use crate::error::MappingError;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Date pattern of Confluence timestamps
pub const CONFLUENCE_DATE_FORMAT: &str = "yyyy-MM-dd'T'HH:mm:ss'Z'";

/// Index field value type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IndexFieldType {
    /// Single string
    String,
    /// List of strings
    StringList,
    /// Timestamp parsed with a date pattern
    Date,
}

/// Confluence content category with its own mapping table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentCategory {
    /// Space metadata
    Space,
    /// Page content
    Page,
}

impl ContentCategory {
    /// Key in the connector's repository configuration
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Space => "space",
            Self::Page => "page",
        }
    }
}

impl fmt::Display for ContentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One mapping from a source field to an index field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMapping {
    data_source_field_name: String,
    index_field_name: String,
    index_field_type: IndexFieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_field_format: Option<String>,
}

impl FieldMapping {
    /// String mapping
    #[must_use]
    pub fn string(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::raw(source, target, IndexFieldType::String, None)
    }

    /// String-list mapping
    #[must_use]
    pub fn string_list(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::raw(source, target, IndexFieldType::StringList, None)
    }

    /// Date mapping parsed with `format`
    #[must_use]
    pub fn date(source: impl Into<String>, target: impl Into<String>, format: impl Into<String>) -> Self {
        Self::raw(source, target, IndexFieldType::Date, Some(format.into()))
    }

    /// Mapping without type/format coupling; checked by [`FieldMappingTable::new`]
    #[must_use]
    pub fn raw(
        source: impl Into<String>,
        target: impl Into<String>,
        index_field_type: IndexFieldType,
        date_field_format: Option<String>,
    ) -> Self {
        Self {
            data_source_field_name: source.into(),
            index_field_name: target.into(),
            index_field_type,
            date_field_format,
        }
    }

    /// Source field
    #[must_use]
    pub fn source(&self) -> &str {
        &self.data_source_field_name
    }

    /// Index field
    #[must_use]
    pub fn target(&self) -> &str {
        &self.index_field_name
    }

    /// Value type
    #[must_use]
    pub fn field_type(&self) -> IndexFieldType {
        self.index_field_type
    }

    /// Date pattern, for date mappings
    #[must_use]
    pub fn date_format(&self) -> Option<&str> {
        self.date_field_format.as_deref()
    }
}

/// Validated mappings for one content category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldMappingTable {
    #[serde(skip)]
    category: ContentCategory,
    #[serde(rename = "fieldMappings")]
    mappings: Vec<FieldMapping>,
}

impl FieldMappingTable {
    /// Check and wrap mappings
    ///
    /// # Errors
    /// - `MappingError::DuplicateTarget` if two mappings write one index field
    /// - `MappingError::MissingDateFormat` for a date mapping without pattern
    /// - `MappingError::UnexpectedDateFormat` for a pattern on a non-date mapping
    pub fn new(category: ContentCategory, mappings: Vec<FieldMapping>) -> Result<Self, MappingError> {
        let mut targets = HashSet::with_capacity(mappings.len());
        for mapping in &mappings {
            if !targets.insert(mapping.target()) {
                return Err(MappingError::DuplicateTarget {
                    category,
                    field: mapping.target().to_string(),
                });
            }
            match (mapping.field_type(), mapping.date_format()) {
                (IndexFieldType::Date, None) => {
                    return Err(MappingError::MissingDateFormat {
                        category,
                        field: mapping.target().to_string(),
                    })
                }
                (IndexFieldType::String | IndexFieldType::StringList, Some(_)) => {
                    return Err(MappingError::UnexpectedDateFormat {
                        category,
                        field: mapping.target().to_string(),
                    })
                }
                _ => {}
            }
        }
        Ok(Self { category, mappings })
    }

    /// Default mappings for `category`
    ///
    /// # Errors
    /// Never for the built-in tables; the signature matches [`Self::new`].
    pub fn defaults(category: ContentCategory) -> Result<Self, MappingError> {
        let mut mappings = vec![
            FieldMapping::string("itemType", "_category"),
            FieldMapping::string("url", "_source_uri"),
        ];
        if category == ContentCategory::Page {
            mappings.extend([
                FieldMapping::string_list("author", "_authors"),
                FieldMapping::date("createdDate", "_created_at", CONFLUENCE_DATE_FORMAT),
                FieldMapping::date("modifiedDate", "_last_updated_at", CONFLUENCE_DATE_FORMAT),
            ]);
        }
        Self::new(category, mappings)
    }

    /// Content category
    #[must_use]
    pub fn category(&self) -> ContentCategory {
        self.category
    }

    /// Mappings in order
    #[must_use]
    pub fn mappings(&self) -> &[FieldMapping] {
        &self.mappings
    }

    /// Number of mappings
    #[must_use]
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    /// Whether there are no mappings
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Mapping writing `target`
    #[must_use]
    pub fn find_target(&self, target: &str) -> Option<&FieldMapping> {
        self.mappings.iter().find(|m| m.target() == target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn default_tables() {
        let space = FieldMappingTable::defaults(ContentCategory::Space).unwrap();
        let page = FieldMappingTable::defaults(ContentCategory::Page).unwrap();
        assert_eq!(space.len(), 2);
        assert_eq!(page.len(), 5);

        let created = page.find_target("_created_at").unwrap();
        assert_eq!(created.field_type(), IndexFieldType::Date);
        assert_eq!(created.date_format(), Some(CONFLUENCE_DATE_FORMAT));
        assert!(space.find_target("_authors").is_none());
    }

    #[test]
    fn serializes_connector_shape() {
        let page = FieldMappingTable::defaults(ContentCategory::Page).unwrap();
        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(
            value["fieldMappings"][2],
            json!({
                "dataSourceFieldName": "author",
                "indexFieldName": "_authors",
                "indexFieldType": "STRING_LIST"
            })
        );
        assert_eq!(
            value["fieldMappings"][4]["dateFieldFormat"],
            json!("yyyy-MM-dd'T'HH:mm:ss'Z'")
        );
    }

    #[test]
    fn rejects_duplicate_targets() {
        let result = FieldMappingTable::new(
            ContentCategory::Space,
            vec![
                FieldMapping::string("itemType", "_category"),
                FieldMapping::string("type", "_category"),
            ],
        );
        assert_eq!(
            result,
            Err(MappingError::DuplicateTarget {
                category: ContentCategory::Space,
                field: "_category".to_string(),
            })
        );
    }

    #[test]
    fn date_mappings_need_a_format() {
        let result = FieldMappingTable::new(
            ContentCategory::Page,
            vec![FieldMapping::raw("createdDate", "_created_at", IndexFieldType::Date, None)],
        );
        assert!(matches!(result, Err(MappingError::MissingDateFormat { .. })));

        let result = FieldMappingTable::new(
            ContentCategory::Page,
            vec![FieldMapping::raw(
                "url",
                "_source_uri",
                IndexFieldType::String,
                Some(CONFLUENCE_DATE_FORMAT.to_string()),
            )],
        );
        assert!(matches!(result, Err(MappingError::UnexpectedDateFormat { .. })));
    }
}
