use anyhow::Result;
use qbiz_stack::config::{CONFLUENCE_HOST_URL_VAR, IDENTITY_CENTER_ARN_VAR};
use qbiz_stack::resources::{IndexType, RemovalPolicy};
use qbiz_stack::{build_stack, ConfigError, StackError, StackProps, SyncMode};
use qbiz_test_utils::{sample_environment, CONFLUENCE_HOST_URL, IDENTITY_CENTER_ARN};
use std::io::Write;

fn write_config(suffix: &str, contents: &str) -> Result<tempfile::NamedTempFile> {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile()?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(file)
}

#[test]
fn loads_toml_file() -> Result<()> {
    let file = write_config(
        ".toml",
        r#"
identity_center_instance_arn = "arn:aws:sso:::instance/ssoins-1234567890abcdef"
confluence_host_url = "https://example.atlassian.net/"

[settings]
application_display_name = "TeamDocs"
index_type = "ENTERPRISE"
index_capacity_units = 2
key_removal_policy = "Retain"
"#,
    )?;

    let props = StackProps::from_path(file.path())?;
    assert_eq!(props.identity_center_instance_arn.as_deref(), Some(IDENTITY_CENTER_ARN));
    assert_eq!(props.settings.application_display_name, "TeamDocs");
    assert_eq!(props.settings.index_type, IndexType::Enterprise);
    assert_eq!(props.settings.key_removal_policy, RemovalPolicy::Retain);
    assert_eq!(props.settings.sync_mode, SyncMode::ForcedFullCrawl);

    let graph = build_stack(&props, &sample_environment())?;
    assert_eq!(graph.len(), 13);
    Ok(())
}

#[test]
fn loads_yaml_file() -> Result<()> {
    let file = write_config(
        ".yaml",
        "identity_center_instance_arn: arn:aws:sso:::instance/ssoins-1234567890abcdef\n\
         confluence_host_url: https://example.atlassian.net/\n\
         settings:\n  sync_mode: CHANGE_LOG\n",
    )?;

    let props = StackProps::from_path(file.path())?;
    assert_eq!(props.confluence_host_url.as_deref(), Some(CONFLUENCE_HOST_URL));
    assert_eq!(props.settings.sync_mode, SyncMode::ChangeLog);
    Ok(())
}

#[test]
fn partial_file_completed_by_overrides() -> Result<()> {
    let file = write_config(
        ".yml",
        "identity_center_instance_arn: arn:aws:sso:::instance/ssoins-1234567890abcdef\n",
    )?;
    let props = StackProps::from_path(file.path())?;

    let error = build_stack(&props, &sample_environment()).unwrap_err();
    assert!(matches!(
        error,
        StackError::Config(ConfigError::MissingParameter("confluence_host_url"))
    ));

    let props = props.with_overrides_from(|name| {
        (name == CONFLUENCE_HOST_URL_VAR).then(|| CONFLUENCE_HOST_URL.to_string())
    });
    assert!(build_stack(&props, &sample_environment()).is_ok());
    Ok(())
}

#[test]
fn overrides_win_over_file_values() -> Result<()> {
    let file = write_config(
        ".toml",
        r#"
identity_center_instance_arn = "arn:aws:sso:::instance/ssoins-0000000000000000"
confluence_host_url = "https://example.atlassian.net/"
"#,
    )?;
    let props = StackProps::from_path(file.path())?.with_overrides_from(|name| {
        (name == IDENTITY_CENTER_ARN_VAR).then(|| IDENTITY_CENTER_ARN.to_string())
    });
    assert_eq!(props.identity_center_instance_arn.as_deref(), Some(IDENTITY_CENTER_ARN));
    Ok(())
}

#[test]
fn rejects_unknown_extension_and_missing_file() -> Result<()> {
    let file = write_config(".json", "{}")?;
    assert!(matches!(
        StackProps::from_path(file.path()),
        Err(ConfigError::UnsupportedFormat(_))
    ));

    let dir = tempfile::tempdir()?;
    let missing = dir.path().join("absent.toml");
    assert!(matches!(
        StackProps::from_path(&missing),
        Err(ConfigError::Io { .. })
    ));
    Ok(())
}

#[test]
fn out_of_range_window_fails_build() -> Result<()> {
    let file = write_config(
        ".toml",
        r#"
identity_center_instance_arn = "arn:aws:sso:::instance/ssoins-1234567890abcdef"
confluence_host_url = "https://example.atlassian.net/"

[settings]
key_pending_window_days = 31
"#,
    )?;
    let props = StackProps::from_path(file.path())?;
    let error = build_stack(&props, &sample_environment()).unwrap_err();
    assert!(error.is_recoverable());
    assert!(matches!(
        error,
        StackError::Config(ConfigError::InvalidValue {
            field: "key_pending_window_days",
            ..
        })
    ));
    Ok(())
}
