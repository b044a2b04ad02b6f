//! Permission and trust documents of the stack
//!
//! Each function returns one complete document. Statement ids are fixed so
//! that revisions of the stack diff statement by statement.

use qbiz_graph::{Environment, Token};
use qbiz_iam::keys;
use qbiz_iam::{
    ConditionOperator, ConditionValue, PolicyDocument, PolicyError, PolicyStatement, Principal,
    ScopedServicePrincipal, SourceArnCondition,
};

/// Chat actions granted to the web experience
pub const CONVERSATION_ACTIONS: [&str; 10] = [
    "qbusiness:Chat",
    "qbusiness:ChatSync",
    "qbusiness:ListMessages",
    "qbusiness:ListConversations",
    "qbusiness:DeleteConversation",
    "qbusiness:PutFeedback",
    "qbusiness:GetWebExperience",
    "qbusiness:GetApplication",
    "qbusiness:ListPlugins",
    "qbusiness:GetChatControlsConfiguration",
];

/// Lightweight-app actions granted to the web experience
pub const QAPPS_ACTIONS: [&str; 20] = [
    "qapps:CreateQApp",
    "qapps:PredictProblemStatementFromConversation",
    "qapps:PredictQAppFromProblemStatement",
    "qapps:CopyQApp",
    "qapps:GetQApp",
    "qapps:ListQApps",
    "qapps:UpdateQApp",
    "qapps:DeleteQApp",
    "qapps:AssociateQAppWithUser",
    "qapps:DisassociateQAppFromUser",
    "qapps:ImportDocumentToQApp",
    "qapps:ImportDocumentToQAppSession",
    "qapps:CreateLibraryItem",
    "qapps:GetLibraryItem",
    "qapps:UpdateLibraryItem",
    "qapps:CreateLibraryItemReview",
    "qapps:ListLibraryItems",
    "qapps:CreateSubscriptionToken",
    "qapps:StartQAppSession",
    "qapps:StopQAppSession",
];

/// Identity-mapping actions granted to the data source
pub const PRINCIPAL_MAPPING_ACTIONS: [&str; 5] = [
    "qbusiness:PutGroup",
    "qbusiness:CreateUser",
    "qbusiness:DeleteGroup",
    "qbusiness:UpdateUser",
    "qbusiness:ListGroups",
];

/// Metrics namespace the application publishes to
pub const METRICS_NAMESPACE: &str = "AWS/QBusiness";

/// Bucket pattern the connector may read staged objects from
pub const CONNECTOR_BUCKET_OBJECTS: &str = "arn:aws:s3:::bucket/*";

/// Services allowed to use the key on the data source's behalf
pub const SECRET_DECRYPT_VIA_SERVICE: &str = "secretsmanager.*.amazonaws.com";

/// Key policy: the owning account administers the key
///
/// # Errors
/// Propagates statement construction errors.
pub fn key_policy(env: &Environment) -> Result<PolicyDocument, PolicyError> {
    PolicyDocument::from_statements([PolicyStatement::builder("EnableAccountAdministration")
        .principal(Principal::account_root(env.account()))
        .action("kms:*")
        .resource("*")
        .build()?])
}

/// Application permissions: metrics and its own log groups
///
/// # Errors
/// Propagates statement construction errors.
pub fn application_policy(env: &Environment) -> Result<PolicyDocument, PolicyError> {
    PolicyDocument::from_statements([
        PolicyStatement::builder("AmazonQApplicationPutMetricDataPermission")
            .action("cloudwatch:PutMetricData")
            .resource("*")
            .condition(
                ConditionOperator::StringEquals,
                keys::CLOUDWATCH_NAMESPACE,
                METRICS_NAMESPACE,
            )
            .build()?,
        PolicyStatement::builder("AmazonQApplicationDescribeLogGroupsPermission")
            .action("logs:DescribeLogGroups")
            .resource("*")
            .build()?,
        PolicyStatement::builder("AmazonQApplicationCreateLogGroupPermission")
            .action("logs:CreateLogGroup")
            .resource(env.arn("logs", "log-group:/aws/qbusiness/*"))
            .build()?,
        PolicyStatement::builder("AmazonQApplicationLogStreamPermission")
            .actions([
                "logs:DescribeLogStreams",
                "logs:CreateLogStream",
                "logs:PutLogEvents",
            ])
            .resource(env.arn("logs", "log-group:/aws/qbusiness/*:log-stream:*"))
            .build()?,
    ])
}

/// Trust for the application role: any application in this account and region
///
/// # Errors
/// Propagates statement construction errors.
pub fn application_trust(env: &Environment) -> Result<PolicyDocument, PolicyError> {
    ScopedServicePrincipal::new(
        keys::QBUSINESS_SERVICE,
        env.account().clone(),
        SourceArnCondition::Like(env.arn("qbusiness", "application/*")),
    )
    .assume_role_document("QBusinessApplicationAssumeRole")
}

/// Web experience permissions: chat and lightweight apps on one application
///
/// # Errors
/// Propagates statement construction errors.
pub fn web_experience_policy(application_arn: &Token) -> Result<PolicyDocument, PolicyError> {
    PolicyDocument::from_statements([
        PolicyStatement::builder("QBusinessConversationPermission")
            .actions(CONVERSATION_ACTIONS)
            .resource(application_arn.clone())
            .build()?,
        PolicyStatement::builder("QBusinessQAppsPermissions")
            .actions(QAPPS_ACTIONS)
            .resource(application_arn.clone())
            .build()?,
    ])
}

/// Trust for the web experience role: the one application, assume and set context
///
/// # Errors
/// Propagates statement construction errors.
pub fn web_experience_trust(
    env: &Environment,
    application_arn: &Token,
) -> Result<PolicyDocument, PolicyError> {
    ScopedServicePrincipal::new(
        keys::QBUSINESS_APPLICATION_SERVICE,
        env.account().clone(),
        SourceArnCondition::Equals(application_arn.clone()),
    )
    .trust_document(&[
        ("QBusinessWebExperienceAssumeRole", keys::STS_ASSUME_ROLE),
        ("QBusinessWebExperienceSetContext", keys::STS_SET_CONTEXT),
    ])
}

/// References the data source policy grants access to
#[derive(Debug, Clone, Copy)]
pub struct DataSourceTargets<'a> {
    /// Connector secret
    pub secret_arn: &'a Token,
    /// Key encrypting the secret
    pub key_arn: &'a Token,
    /// Application
    pub application_arn: &'a Token,
    /// Index
    pub index_arn: &'a Token,
}

/// Data source permissions: staged objects, the secret, ingestion, identity mapping
///
/// # Errors
/// Propagates statement construction errors.
pub fn data_source_policy(
    env: &Environment,
    targets: DataSourceTargets<'_>,
) -> Result<PolicyDocument, PolicyError> {
    let index_data_sources = Token::join([targets.index_arn.clone(), Token::literal("/data-source/*")]);

    PolicyDocument::from_statements([
        PolicyStatement::builder("AllowsAmazonQToGetS3Objects")
            .action("s3:GetObject")
            .resource(CONNECTOR_BUCKET_OBJECTS)
            .condition(
                ConditionOperator::StringEquals,
                keys::RESOURCE_ACCOUNT,
                env.account().clone(),
            )
            .build()?,
        PolicyStatement::builder("AllowsAmazonQToGetSecret")
            .action("secretsmanager:GetSecretValue")
            .resource(targets.secret_arn.clone())
            .build()?,
        PolicyStatement::builder("AllowsAmazonQToDecryptSecret")
            .action("kms:Decrypt")
            .resource(targets.key_arn.clone())
            .condition(
                ConditionOperator::StringLike,
                keys::KMS_VIA_SERVICE,
                ConditionValue::set([SECRET_DECRYPT_VIA_SERVICE]),
            )
            .build()?,
        PolicyStatement::builder("AllowsAmazonQToIngestDocuments")
            .actions(["qbusiness:BatchPutDocument", "qbusiness:BatchDeleteDocument"])
            .resource(targets.index_arn.clone())
            .build()?,
        PolicyStatement::builder("AllowsAmazonQToIngestPrincipalMapping")
            .actions(PRINCIPAL_MAPPING_ACTIONS)
            .resources([
                targets.application_arn.clone(),
                targets.index_arn.clone(),
                index_data_sources,
            ])
            .build()?,
    ])
}

/// Trust for the data source role: the one application
///
/// # Errors
/// Propagates statement construction errors.
pub fn data_source_trust(
    env: &Environment,
    application_arn: &Token,
) -> Result<PolicyDocument, PolicyError> {
    ScopedServicePrincipal::new(
        keys::QBUSINESS_SERVICE,
        env.account().clone(),
        SourceArnCondition::Equals(application_arn.clone()),
    )
    .assume_role_document("QBusinessDataSourceAssumeRole")
}
