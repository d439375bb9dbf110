//! Document output handling for generated pages.
//!
//! Every run persists its document to disk so a crash after generation never
//! loses paid LM work; stdout formatting is layered on top of the saved file.
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Write the generated document to `out`, or to the default location under
/// the user's local data directory, and return the path written.
pub fn save_document(out: Option<&Path>, markup: &str) -> Result<PathBuf> {
    let path = match out {
        Some(path) => path.to_path_buf(),
        None => default_output_path()?,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create output directory {}", parent.display()))?;
        }
    }
    fs::write(&path, markup)
        .with_context(|| format!("write document {}", path.display()))?;

    tracing::info!(path = %path.display(), bytes = markup.len(), "document written");
    Ok(path)
}

/// Default to `~/.local/share/pagesmith/generated_template.html` (or the
/// platform equivalent).
fn default_output_path() -> Result<PathBuf> {
    let data_dir = dirs::data_local_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| anyhow!("cannot determine home directory"))?;
    Ok(data_dir.join("pagesmith").join("generated_template.html"))
}
