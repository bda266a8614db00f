use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Setting input type.
///
/// Serialized as the plain Shopify type string. Types outside the known set
/// are kept as [`SettingType::Other`] and passed through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SettingType {
    Text,
    Textarea,
    Checkbox,
    Number,
    Range,
    Radio,
    Select,
    Color,
    ImagePicker,
    LinkList,
    Page,
    Product,
    ProductList,
    Collection,
    CollectionList,
    Article,
    Blog,
    FontPicker,
    Richtext,
    Html,
    Url,
    VideoUrl,
    Header,
    Paragraph,
    Liquid,
    ColorBackground,
    InlineRichtext,
    Other(String),
}

impl SettingType {
    pub fn as_str(&self) -> &str {
        match self {
            SettingType::Text => "text",
            SettingType::Textarea => "textarea",
            SettingType::Checkbox => "checkbox",
            SettingType::Number => "number",
            SettingType::Range => "range",
            SettingType::Radio => "radio",
            SettingType::Select => "select",
            SettingType::Color => "color",
            SettingType::ImagePicker => "image_picker",
            SettingType::LinkList => "link_list",
            SettingType::Page => "page",
            SettingType::Product => "product",
            SettingType::ProductList => "product_list",
            SettingType::Collection => "collection",
            SettingType::CollectionList => "collection_list",
            SettingType::Article => "article",
            SettingType::Blog => "blog",
            SettingType::FontPicker => "font_picker",
            SettingType::Richtext => "richtext",
            SettingType::Html => "html",
            SettingType::Url => "url",
            SettingType::VideoUrl => "video_url",
            SettingType::Header => "header",
            SettingType::Paragraph => "paragraph",
            SettingType::Liquid => "liquid",
            SettingType::ColorBackground => "color_background",
            SettingType::InlineRichtext => "inline_richtext",
            SettingType::Other(other) => other,
        }
    }

    /// Sidebar text entries (`header`, `paragraph`) carry `content` and no `id`.
    pub fn is_text_block(&self) -> bool {
        matches!(self, SettingType::Header | SettingType::Paragraph)
    }

    /// Types whose `options` labels are shown to merchants.
    pub fn has_options(&self) -> bool {
        matches!(self, SettingType::Radio | SettingType::Select)
    }
}

impl From<String> for SettingType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "text" => SettingType::Text,
            "textarea" => SettingType::Textarea,
            "checkbox" => SettingType::Checkbox,
            "number" => SettingType::Number,
            "range" => SettingType::Range,
            "radio" => SettingType::Radio,
            "select" => SettingType::Select,
            "color" => SettingType::Color,
            "image_picker" => SettingType::ImagePicker,
            "link_list" => SettingType::LinkList,
            "page" => SettingType::Page,
            "product" => SettingType::Product,
            "product_list" => SettingType::ProductList,
            "collection" => SettingType::Collection,
            "collection_list" => SettingType::CollectionList,
            "article" => SettingType::Article,
            "blog" => SettingType::Blog,
            "font_picker" => SettingType::FontPicker,
            "richtext" => SettingType::Richtext,
            "html" => SettingType::Html,
            "url" => SettingType::Url,
            "video_url" => SettingType::VideoUrl,
            "header" => SettingType::Header,
            "paragraph" => SettingType::Paragraph,
            "liquid" => SettingType::Liquid,
            "color_background" => SettingType::ColorBackground,
            "inline_richtext" => SettingType::InlineRichtext,
            _ => SettingType::Other(value),
        }
    }
}

impl From<SettingType> for String {
    fn from(value: SettingType) -> Self {
        match value {
            SettingType::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for SettingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a `select`/`radio` setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single configurable field of a section, block or settings group.
///
/// Localizable fields are explicit options: a field is either present or
/// absent, never an empty placeholder. Everything the generator does not
/// localize (`default`, `min`, `max`, `unit`, ...) lives in `extra` and is
/// passed through as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setting {
    #[serde(rename = "type")]
    pub kind: SettingType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    /// Usually text, but numeric placeholders exist for `number` settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Setting {
    /// Placeholder text, if the placeholder is a string.
    pub fn placeholder_text(&self) -> Option<&str> {
        self.placeholder.as_ref().and_then(Value::as_str)
    }
}
