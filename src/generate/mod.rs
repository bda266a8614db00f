//! Regeneration passes: definition files in, Liquid schemas and locale
//! bundles out.

pub mod artifact;
pub mod liquid;
pub mod loader;
pub mod pass;

pub use artifact::{Artifact, JsonFile, Render, SectionFile, SnippetStub, write_artifact};
pub use loader::{Project, load_project};
pub use pass::{ArtifactChange, PassOptions, PassSummary, plan_artifacts, run_pass};
