//! `{% schema %}` block handling for Liquid files.

use std::sync::LazyLock;

use regex::{NoExpand, Regex};

static SCHEMA_BLOCK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\{%-?\s*schema\s*-?%\}.*?\{%-?\s*endschema\s*-?%\}")
        .expect("Invalid schema block regex")
});

/// Schema block wrapping pretty-printed JSON.
pub fn render_schema_block(schema_json: &str) -> String {
    format!("{{% schema %}}\n{}\n{{% endschema %}}", schema_json)
}

pub fn has_schema_block(content: &str) -> bool {
    SCHEMA_BLOCK_REGEX.is_match(content)
}

/// Replace the first schema block of `existing` with `block`, keeping all
/// surrounding markup. Without an existing block, `block` is appended.
pub fn upsert_schema(existing: Option<&str>, block: &str) -> String {
    match existing {
        Some(content) if has_schema_block(content) => SCHEMA_BLOCK_REGEX
            .replace(content, NoExpand(block))
            .into_owned(),
        Some(content) if !content.trim().is_empty() => {
            format!("{}\n\n{}\n", content.trim_end(), block)
        }
        _ => format!("{}\n", block),
    }
}

/// Initial content of a scaffolded block snippet.
pub fn snippet_stub(section_key: &str, block_type: &str) -> String {
    format!(
        "{{% comment %}}\n  Renders the `{}` block of the `{}` section.\n  Accepts: block\n{{% endcomment %}}\n",
        block_type, section_key
    )
}
