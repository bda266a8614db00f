use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod check;
mod generate;
mod init;

const BIN_NAME: &str = "schemasync";

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    pub fn with_file(path: &str, content: &str) -> Result<Self> {
        let test = Self::new()?;
        test.write_file(path, content)?;
        Ok(test)
    }

    /// A small theme: two sections sharing a header and an image label,
    /// plus a global settings schema with a theme-info group.
    pub fn with_theme() -> Result<Self> {
        let test = Self::new()?;
        test.write_file(
            "schema/sections/hero.json",
            r#"{
  "name": "Hero",
  "tag": "section",
  "settings": [
    { "type": "header", "content": "Layout" },
    { "type": "text", "id": "title", "label": "Title" },
    { "type": "image_picker", "id": "image", "label": "Image" }
  ],
  "blocks": [{ "type": "@app" }],
  "presets": [{ "name": "Hero" }]
}"#,
        )?;
        test.write_file(
            "schema/sections/footer.json",
            r#"{
  "name": "Footer",
  "settings": [
    { "type": "header", "content": "Layout" },
    { "type": "image_picker", "id": "logo", "label": "Image" }
  ]
}"#,
        )?;
        test.write_file(
            "schema/settings_schema.json",
            r#"[
  { "name": "theme_info", "theme_name": "Demo", "theme_version": "1.0.0" },
  { "name": "Colors", "settings": [{ "type": "color", "id": "accent", "label": "Accent" }] }
]"#,
        )?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    pub fn generate_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("generate");
        cmd
    }

    pub fn check_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("check");
        cmd
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }

    pub fn read_json(&self, path: &str) -> Result<serde_json::Value> {
        let content = self.read_file(path)?;
        serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path))
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
