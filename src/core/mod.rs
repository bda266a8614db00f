//! Translation-key allocation and deduplication engine.
//!
//! Pure, I/O-free functions over in-memory definition trees.
//!
//! ## Module Structure
//!
//! - `normalize`: text -> canonical snake_case key
//! - `index`: frequency index over every localizable field of a pass
//! - `resolve`: shared vs. local key decisions, per-definition key plans
//! - `localize`: definitions with `t:` references for `{% schema %}` blocks
//! - `bundle`: the locale bundle holding the strings behind those references
//!
//! ## Pass Pipeline
//!
//! 1. **Index** (`FrequencyIndex::build`) over the complete definition set
//! 2. **Plan** (`KeyResolver::plan_section`) for every definition
//! 3. **Emit** both consumers from the same plans: `localize_section` per
//!    definition, `LocaleBundleBuilder` once for the whole namespace
//!
//! The index is read-only once built; positional counters live in a
//! `ScopeCounter` created per settings list.

pub mod bundle;
pub mod error;
pub mod index;
pub mod localize;
pub mod normalize;
pub mod resolve;


pub use bundle::{LocaleBundleBuilder, LocaleTree, build_bundle};
pub use error::SchemaError;
pub use index::{FrequencyIndex, MAX_SHARED_WORDS, is_shareable_text, word_count};
pub use localize::{localize_section, localize_settings_schema};
pub use normalize::normalize_key;
pub use resolve::{
    FieldKind, KeyResolver, ResolvedField, SHARED_NAMESPACE, Scope, ScopeCounter, ScopeKind,
    SectionPlan, SettingKeys, SettingsSchemaPlan, TranslationKey,
};
