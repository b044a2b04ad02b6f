//! Crawl filters and toggles (`additionalProperties`)
//!
//! Key names and value encodings follow the connector schema verbatim,
//! including the irregular capitalisation and string-typed numbers.

use serde::{Deserialize, Serialize};

/// Crawl behavior of the Confluence connector
///
/// Deserializes from the same keys it serializes to; absent keys take
/// their default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
#[allow(clippy::struct_excessive_bools)]
pub struct CrawlSettings {
    /// Crawl page comments
    pub is_crawl_page_comment: bool,
    /// URL patterns to skip
    pub exclusion_url_patterns: Vec<String>,
    /// Attachment file types to include
    pub inclusion_file_type_patterns: Vec<String>,
    /// Crawl blog posts
    pub is_crawl_blog: bool,
    /// Blog titles to include
    #[serde(rename = "blogTitleRegEX")]
    pub blog_title_regex: Vec<String>,
    /// Proxy port, empty when no proxy is used
    pub proxy_port: String,
    /// URL patterns to include
    pub inclusion_url_patterns: Vec<String>,
    /// Attachment titles to include
    #[serde(rename = "attachmentTitleRegEX")]
    pub attachment_title_regex: Vec<String>,
    /// Restrict attachments to supported file types
    pub include_supported_file_type: bool,
    /// Crawl pages
    pub is_crawl_page: bool,
    /// User attribute used as identity
    pub field_for_user_id: String,
    /// Comment titles to include
    #[serde(rename = "commentTitleRegEX")]
    pub comment_title_regex: Vec<String>,
    /// Space keys to skip
    pub exclusion_space_key_filter: Vec<String>,
    /// Crawl blog attachments
    pub is_crawl_blog_attachment: bool,
    /// Crawl personal spaces
    pub is_crawl_personal_space: bool,
    /// Attachment file types to skip
    pub exclusion_file_type_patterns: Vec<String>,
    /// Crawl page attachments
    pub is_crawl_page_attachment: bool,
    /// Space keys to include
    pub inclusion_space_key_filter: Vec<String>,
    /// Largest file crawled, in megabytes, as a decimal string
    #[serde(rename = "maxFileSizeInMegaBytes")]
    pub max_file_size_in_megabytes: String,
    /// Proxy host, empty when no proxy is used
    pub proxy_host: String,
    /// Crawl archived spaces
    pub is_crawl_archived_space: bool,
    /// Crawl archived pages
    pub is_crawl_archived_page: bool,
    /// Crawl access control lists
    pub is_crawl_acl: bool,
    /// Page titles to include
    #[serde(rename = "pageTitleRegEX")]
    pub page_title_regex: Vec<String>,
    /// Crawl blog comments
    pub is_crawl_blog_comment: bool,
}

impl Default for CrawlSettings {
    /// Pages and their access lists only; no filters, no proxy
    fn default() -> Self {
        Self {
            is_crawl_page_comment: false,
            exclusion_url_patterns: Vec::new(),
            inclusion_file_type_patterns: Vec::new(),
            is_crawl_blog: false,
            blog_title_regex: Vec::new(),
            proxy_port: String::new(),
            inclusion_url_patterns: Vec::new(),
            attachment_title_regex: Vec::new(),
            include_supported_file_type: false,
            is_crawl_page: true,
            field_for_user_id: "uuid".to_string(),
            comment_title_regex: Vec::new(),
            exclusion_space_key_filter: Vec::new(),
            is_crawl_blog_attachment: false,
            is_crawl_personal_space: false,
            exclusion_file_type_patterns: Vec::new(),
            is_crawl_page_attachment: false,
            inclusion_space_key_filter: Vec::new(),
            max_file_size_in_megabytes: "50".to_string(),
            proxy_host: String::new(),
            is_crawl_archived_space: false,
            is_crawl_archived_page: false,
            is_crawl_acl: true,
            page_title_regex: Vec::new(),
            is_crawl_blog_comment: false,
        }
    }
}

impl CrawlSettings {
    /// Largest crawled file in megabytes, if the setting is a positive integer
    #[must_use]
    pub fn max_file_size_megabytes(&self) -> Option<u32> {
        self.max_file_size_in_megabytes
            .trim()
            .parse()
            .ok()
            .filter(|size| *size > 0)
    }
}
