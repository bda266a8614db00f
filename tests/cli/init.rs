use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::CliTest;

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["sourceRoot"], "./schema");
    assert_eq!(parsed["themeRoot"], "./");
    assert_eq!(parsed["locale"], "en");
    assert_eq!(parsed["debounceMs"], 200);
    assert!(
        parsed.get("extensionRoot").is_none(),
        "extensionRoot is opt-in"
    );

    assert!(
        content.contains("\n  \""),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .schemasyncrc.json

    ----- stderr -----
    ");

    assert!(test.root().join(".schemasyncrc.json").exists());
    let content = test.read_file(".schemasyncrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".schemasyncrc.json", "{}")?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    Error: .schemasyncrc.json already exists
    ");

    assert_eq!(test.read_file(".schemasyncrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_generated_config_is_used() -> Result<()> {
    let test = CliTest::with_theme()?;

    let output = test.command().arg("init").output()?;
    assert!(output.status.success());

    let output = test.generate_command().output()?;
    assert!(output.status.success());
    assert!(test.root().join("sections/hero.liquid").exists());

    Ok(())
}
