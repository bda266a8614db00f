use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::{CliTest, stdout};

#[test]
fn test_check_before_generate() -> Result<()> {
    let test = CliTest::with_theme()?;

    assert_cmd_snapshot!(test.check_command(), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    ✘ sections/footer.liquid (would be created)
    ✘ sections/hero.liquid (would be created)
    ✘ config/settings_schema.json (would be created)
    ✘ locales/en.default.schema.json (would be created)
    ✘ 4 of 4 files out of date (run schemasync generate to update)

    ----- stderr -----
    ");

    // Dry-run never touches the theme
    assert!(!test.root().join("sections").exists());
    assert!(!test.root().join("locales").exists());

    Ok(())
}

#[test]
fn test_check_after_generate() -> Result<()> {
    let test = CliTest::with_theme()?;
    test.generate_command().output()?;

    let output = test.check_command().output()?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "✓ 4 files up to date\n");

    Ok(())
}

#[test]
fn test_check_detects_definition_change() -> Result<()> {
    let test = CliTest::with_theme()?;
    test.generate_command().output()?;

    // A second "Title" label turns it into a shared string
    test.write_file(
        "schema/sections/promo.json",
        r#"{ "name": "Promo", "settings": [{ "type": "text", "id": "title", "label": "Title" }] }"#,
    )?;

    let output = test.check_command().output()?;
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        "✘ sections/hero.liquid (would be updated)\n\
         ✘ sections/promo.liquid (would be created)\n\
         ✘ locales/en.default.schema.json (would be updated)\n\
         ✘ 3 of 5 files out of date (run schemasync generate to update)\n"
    );

    Ok(())
}

#[test]
fn test_check_detects_hand_edits() -> Result<()> {
    let test = CliTest::with_theme()?;
    test.generate_command().output()?;
    test.write_file("locales/en.default.schema.json", "{}\n")?;

    let output = test.check_command().output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("✘ locales/en.default.schema.json (would be updated)"));

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().output()?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Usage: schemasync"));

    Ok(())
}
