use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{CliTest, stderr, stdout};

const HERO_LIQUID: &str = r#"{% schema %}
{
  "name": "t:sections.hero.name",
  "settings": [
    {
      "type": "header",
      "content": "t:sections.all.layout"
    },
    {
      "type": "text",
      "id": "title",
      "label": "t:sections.hero.settings.title.label"
    },
    {
      "type": "image_picker",
      "id": "image",
      "label": "t:sections.all.image"
    }
  ],
  "blocks": [
    {
      "type": "@app"
    }
  ],
  "presets": [
    {
      "name": "t:sections.hero.presets.hero.name"
    }
  ],
  "tag": "section"
}
{% endschema %}
"#;

#[test]
fn test_generate_theme() -> Result<()> {
    let test = CliTest::with_theme()?;

    let output = test.generate_command().output()?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "✓ created sections/footer.liquid\n\
         ✓ created sections/hero.liquid\n\
         ✓ created config/settings_schema.json\n\
         ✓ created locales/en.default.schema.json\n\
         ✓ Wrote 4 files, 0 unchanged (3 definitions)\n"
    );

    assert_eq!(test.read_file("sections/hero.liquid")?, HERO_LIQUID);
    assert_eq!(
        test.read_json("locales/en.default.schema.json")?,
        json!({
            "sections": {
                "all": { "layout": "Layout", "image": "Image" },
                "footer": { "name": "Footer" },
                "hero": {
                    "name": "Hero",
                    "settings": { "title": { "label": "Title" } },
                    "presets": { "hero": { "name": "Hero" } }
                }
            },
            "settings_schema": {
                "colors": {
                    "name": "Colors",
                    "settings": { "accent": { "label": "Accent" } }
                }
            }
        })
    );
    assert_eq!(
        test.read_json("config/settings_schema.json")?[0],
        json!({ "name": "theme_info", "theme_name": "Demo", "theme_version": "1.0.0" })
    );

    Ok(())
}

#[test]
fn test_generate_is_idempotent() -> Result<()> {
    let test = CliTest::with_theme()?;

    test.generate_command().output()?;
    let bundle = test.read_file("locales/en.default.schema.json")?;

    let output = test.generate_command().output()?;
    assert_eq!(
        stdout(&output),
        "✓ 4 files up to date (3 definitions)\n"
    );
    assert_eq!(test.read_file("locales/en.default.schema.json")?, bundle);

    Ok(())
}

#[test]
fn test_generate_keeps_liquid_markup() -> Result<()> {
    let test = CliTest::with_file(
        "schema/sections/banner.json",
        r#"{ "name": "Banner", "settings": [{ "type": "text", "id": "title", "label": "Title" }] }"#,
    )?;
    test.write_file(
        "sections/banner.liquid",
        "<h2>{{ section.settings.title }}</h2>\n\n{% schema %}\n{ \"name\": \"Banner\" }\n{% endschema %}\n",
    )?;

    let output = test.generate_command().output()?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("✓ updated sections/banner.liquid"));

    let liquid = test.read_file("sections/banner.liquid")?;
    assert!(liquid.starts_with("<h2>{{ section.settings.title }}</h2>\n\n{% schema %}\n{\n"));
    assert!(liquid.contains("\"label\": \"t:sections.banner.settings.title.label\""));
    assert!(liquid.ends_with("{% endschema %}\n"));

    Ok(())
}

#[test]
fn test_generate_with_config_and_extension() -> Result<()> {
    let test = CliTest::with_file(
        ".schemasyncrc.json",
        r#"{
  "sourceRoot": "./defs",
  "themeRoot": "./theme",
  "extensionRoot": "./extensions/reviews",
  "locale": "de",
  "ignores": ["sections/wip_*"]
}"#,
    )?;
    test.write_file(
        "defs/sections/hero.json",
        r#"{ "name": "Hero", "generate_block_files": true, "blocks": [{ "type": "slide", "name": "Slide" }] }"#,
    )?;
    test.write_file("defs/sections/wip_promo.json", "not json")?;
    test.write_file(
        "defs/blocks/rating.json",
        r#"{ "name": "Rating", "settings": [{ "type": "range", "id": "size", "label": "Size", "min": 1, "max": 5 }] }"#,
    )?;

    let output = test.generate_command().output()?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "✓ created theme/sections/hero.liquid\n\
         ✓ created theme/snippets/hero.slide.liquid\n\
         ✓ created theme/locales/de.default.schema.json\n\
         ✓ created extensions/reviews/blocks/rating.liquid\n\
         ✓ created extensions/reviews/locales/de.default.schema.json\n\
         ✓ Wrote 5 files, 0 unchanged (2 definitions)\n"
    );

    assert_eq!(
        test.read_json("extensions/reviews/locales/de.default.schema.json")?,
        json!({ "blocks": { "rating": {
            "name": "Rating",
            "settings": { "size": { "label": "Size" } }
        }}})
    );
    let rating = test.read_file("extensions/reviews/blocks/rating.liquid")?;
    assert!(rating.contains("\"min\": 1"));

    Ok(())
}

#[test]
fn test_generate_warns_about_unrouted_blocks() -> Result<()> {
    let test = CliTest::with_file("schema/blocks/rating.json", r#"{ "name": "Rating" }"#)?;

    let output = test.generate_command().output()?;
    assert!(output.status.success());
    assert_eq!(
        stderr(&output),
        "warning: 1 app block definition skipped: no extensionRoot configured\n"
    );

    Ok(())
}

#[test]
fn test_generate_rejects_invalid_definitions() -> Result<()> {
    let test = CliTest::with_theme()?;
    test.write_file(
        "schema/sections/broken.json",
        r#"{ "name": "Broken", "settings": [{ "type": "text", "label": "No id" }] }"#,
    )?;

    let output = test.generate_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(
        stderr(&output),
        "Error: setting #1 (type `text`) in `sections.broken.settings` has no `id`\n"
    );
    assert!(!test.root().join("sections").exists());

    Ok(())
}

#[test]
fn test_generate_reports_parse_errors() -> Result<()> {
    let test = CliTest::with_file("schema/sections/hero.json", "{ \"name\": ")?;

    let output = test.generate_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    let err = stderr(&output);
    assert!(err.starts_with("Error: Failed to parse definition: "));
    assert!(err.contains("hero.json"));

    Ok(())
}

#[test]
fn test_generate_without_source_root() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.generate_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Source root does not exist"));

    Ok(())
}

#[test]
fn test_generate_verbose_notes_default_config() -> Result<()> {
    let test = CliTest::with_theme()?;

    let output = test.generate_command().arg("-v").output()?;
    assert!(output.status.success());
    assert!(
        stderr(&output).contains("Note: No .schemasyncrc.json found, using default configuration")
    );

    let output = test.generate_command().arg("--verbose").output()?;
    assert!(stdout(&output).contains("  unchanged sections/hero.liquid\n"));

    Ok(())
}
