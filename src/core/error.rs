use thiserror::Error;

/// A definition that cannot be turned into unambiguous translation keys.
///
/// Every variant names the dotted scope path where the problem was found.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("setting #{position} (type `{kind}`) in `{scope}` has no `id`")]
    MissingSettingId {
        scope: String,
        position: usize,
        kind: String,
    },

    #[error("setting id `{id}` is used more than once in `{scope}`")]
    DuplicateSettingId { scope: String, id: String },

    #[error("block of type `{block_type}` in `{scope}` has no `name`")]
    MissingBlockName { scope: String, block_type: String },

    #[error("block type `{block_type}` is declared more than once in `{scope}`")]
    DuplicateBlockType { scope: String, block_type: String },

    #[error("preset `{name}` in `{scope}` maps to the same key as another preset")]
    DuplicatePreset { scope: String, name: String },

    #[error("settings group `{name}` maps to the same key as another group")]
    DuplicateGroup { name: String },

    #[error("`{segment}` in `{scope}` cannot be used as a translation key: {reason}")]
    InvalidKeySegment {
        scope: String,
        segment: String,
        reason: &'static str,
    },
}
