use std::path::{Component, Path, PathBuf};

use anyhow::Result;

use crate::{
    cli::args::CommonArgs,
    config::{CONFIG_FILE_NAME, Config, load_config},
    generate::PassOptions,
};

/// Config file, CLI overrides and resolved paths of one invocation.
pub struct ProjectContext {
    pub config: Config,
    /// Directory the command was pointed at; reported paths are relative to it.
    pub root_dir: PathBuf,
    pub options: PassOptions,
}

impl ProjectContext {
    /// Load config starting at `args.path` and apply CLI overrides
    /// (CLI > config file > defaults).
    pub fn new(args: &CommonArgs, apply: bool) -> Result<Self> {
        let root_dir = args.path.clone();
        let verbose = args.verbose;

        let config_result = load_config(&root_dir)?;
        if verbose && !config_result.from_file {
            eprintln!(
                "Note: No {} found, using default configuration",
                CONFIG_FILE_NAME
            );
        }

        let mut config = config_result.config;
        if let Some(locale) = &args.locale {
            config.locale = locale.clone();
        }
        config.validate()?;

        // Config paths are relative to the config file, CLI paths to the
        // working directory
        let base_dir = &config_result.base_dir;
        let source_root = args
            .source_root
            .clone()
            .unwrap_or_else(|| resolve_path(base_dir, &config.source_root));
        let theme_root = args
            .theme_root
            .clone()
            .unwrap_or_else(|| resolve_path(base_dir, &config.theme_root));
        let extension_root = args.extension_root.clone().or_else(|| {
            config
                .extension_root
                .as_deref()
                .map(|root| resolve_path(base_dir, root))
        });

        let options = PassOptions {
            source_root,
            theme_root,
            extension_root,
            locale: config.locale.clone(),
            ignores: config.ignores.clone(),
            apply,
            verbose,
        };

        Ok(Self {
            config,
            root_dir,
            options,
        })
    }
}

fn resolve_path(base_dir: &Path, path: &str) -> PathBuf {
    let p = Path::new(path);
    if p.is_absolute() {
        return p.to_path_buf();
    }
    let is_cur_dir = base_dir.components().all(|c| matches!(c, Component::CurDir));
    if is_cur_dir {
        p.to_path_buf()
    } else {
        let rel = p.strip_prefix(Path::new(".")).unwrap_or(p);
        base_dir.join(rel)
    }
}
