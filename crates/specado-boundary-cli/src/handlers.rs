//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod completions;
mod describe;
mod extract;

pub use completions::handle_completions;
pub use describe::handle_describe;
pub use extract::handle_extract;

use crate::error::{Error, Result};
use specado_boundary::Catalog;
use std::path::Path;
use tracing::debug;

/// Load a declaration catalog, reporting a missing file distinctly
pub(crate) fn load_catalog(path: &Path) -> Result<Catalog> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let catalog = Catalog::from_path(path)?;
    debug!(catalog = %path.display(), models = catalog.len(), "Catalog loaded");
    Ok(catalog)
}
