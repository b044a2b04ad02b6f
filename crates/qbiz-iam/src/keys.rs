//! Condition keys and service principals used by the stack
//!
//! Global keys carry the `aws:` prefix; service keys carry their service prefix.

/// Account of the calling service resource
pub const SOURCE_ACCOUNT: &str = "aws:SourceAccount";
/// ARN of the calling service resource
pub const SOURCE_ARN: &str = "aws:SourceArn";
/// Account owning the accessed resource
pub const RESOURCE_ACCOUNT: &str = "aws:ResourceAccount";
/// CloudWatch metric namespace
pub const CLOUDWATCH_NAMESPACE: &str = "cloudwatch:namespace";
/// Service a KMS request is made through
pub const KMS_VIA_SERVICE: &str = "kms:ViaService";

/// Keys that scope a trust statement to an account
pub const ACCOUNT_SCOPE_KEYS: &[&str] = &[SOURCE_ACCOUNT, RESOURCE_ACCOUNT];

/// Principal the Q Business service assumes roles as
pub const QBUSINESS_SERVICE: &str = "qbusiness.amazonaws.com";
/// Principal the Q Business web experience assumes roles as
pub const QBUSINESS_APPLICATION_SERVICE: &str = "application.qbusiness.amazonaws.com";

/// Role assumption
pub const STS_ASSUME_ROLE: &str = "sts:AssumeRole";
/// Session context propagation (identity-aware web experience)
pub const STS_SET_CONTEXT: &str = "sts:SetContext";
