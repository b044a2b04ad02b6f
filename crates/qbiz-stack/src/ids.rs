//! Logical ids of the stack's declarations, in declaration order

/// Encryption key
pub const KEY: &str = "QBusinessKey";
/// Connector secret
pub const SECRET: &str = "Secret";
/// Application permission policy
pub const APPLICATION_POLICY: &str = "ApplicationPolicy";
/// Application service role
pub const APPLICATION_ROLE: &str = "ApplicationRole";
/// Application
pub const APPLICATION: &str = "Application";
/// Index
pub const INDEX: &str = "Index";
/// Retriever
pub const RETRIEVER: &str = "Retriever";
/// Web experience permission policy
pub const WEB_EXPERIENCE_POLICY: &str = "WebExperiencePolicy";
/// Web experience service role
pub const WEB_EXPERIENCE_ROLE: &str = "WebExperienceRole";
/// Web experience
pub const WEB_EXPERIENCE: &str = "WebExperience";
/// Data source permission policy
pub const DATA_SOURCE_POLICY: &str = "ConfluenceDataSourcePolicy";
/// Data source service role
pub const DATA_SOURCE_ROLE: &str = "ConfluenceDataSourceRole";
/// Data source
pub const DATA_SOURCE: &str = "ConfluenceDataSource";

/// Every id, in the order the builder declares them
pub const DECLARATION_ORDER: [&str; 13] = [
    KEY,
    SECRET,
    APPLICATION_POLICY,
    APPLICATION_ROLE,
    APPLICATION,
    INDEX,
    RETRIEVER,
    WEB_EXPERIENCE_POLICY,
    WEB_EXPERIENCE_ROLE,
    WEB_EXPERIENCE,
    DATA_SOURCE_POLICY,
    DATA_SOURCE_ROLE,
    DATA_SOURCE,
];
