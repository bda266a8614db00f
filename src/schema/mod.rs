//! Definition model: sections, blocks, settings and the global settings schema.
//!
//! These are the source-of-truth trees read from the definition files. The
//! same types are reused for the localized output, where every localizable
//! string has been replaced by a `t:` reference.

mod section;
mod setting;
mod settings_schema;

pub use section::{APP_BLOCK_TYPE, Block, Definitions, Preset, Section, THEME_BLOCK_TYPE};
pub use setting::{SelectOption, Setting, SettingType};
pub use settings_schema::{SettingsGroup, SettingsSchema, THEME_INFO_GROUP};
