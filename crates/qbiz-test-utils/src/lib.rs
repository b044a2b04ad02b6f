//! Testing utilities for the QBiz workspace
//!
//! Shared fixtures for stack inputs, environments and built graphs.

#![allow(missing_docs)]

use qbiz_graph::{Environment, ValidatedGraph};
use qbiz_stack::{build_stack, StackProps, StackResource};

pub const IDENTITY_CENTER_ARN: &str = "arn:aws:sso:::instance/ssoins-1234567890abcdef";
pub const CONFLUENCE_HOST_URL: &str = "https://example.atlassian.net/";
pub const ACCOUNT: &str = "111122223333";
pub const REGION: &str = "us-east-1";

pub fn sample_props() -> StackProps {
    StackProps::new(IDENTITY_CENTER_ARN, CONFLUENCE_HOST_URL)
}

pub fn sample_environment() -> Environment {
    Environment::new(ACCOUNT, REGION)
}

/// Stack graph for the sample props, with literal account and region
pub fn build_sample_graph() -> ValidatedGraph<StackResource> {
    build_stack(&sample_props(), &sample_environment()).expect("sample stack builds")
}

/// Stack graph for the sample props, account and region resolved at deploy time
pub fn build_deploy_time_graph() -> ValidatedGraph<StackResource> {
    build_stack(&sample_props(), &Environment::deploy_time()).expect("sample stack builds")
}

/// Route tracing output through the test harness
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("debug")
        .try_init();
}
