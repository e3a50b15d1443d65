//! Command implementations.

use std::path::{Path, PathBuf};

pub mod build;
pub mod check;
pub mod new;
pub mod serve;

/// Directory content paths in the configuration are relative to.
///
/// This is the directory holding the configuration file, so
/// `folio -c site/config.toml build` works from anywhere.
pub fn site_root(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
