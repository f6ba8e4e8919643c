pub mod show;
pub mod stats;

use std::io::Write;

use anyhow::{Context, Result};

use notebook::config::NotebookConfig;
use notebook::store::NoteStore;

/// Open the configured document for offline inspection. `None` if the file
/// does not exist yet.
fn open_existing(config: &NotebookConfig, out: &mut impl Write) -> Result<Option<NoteStore>> {
    let path = config.resolved_store_path();
    if !path.exists() {
        writeln!(out, "Notebook: not found at {}", path.display())?;
        writeln!(out, "Run `notebook serve` and add a note to create it.")?;
        return Ok(None);
    }

    let store = NoteStore::open(&path)
        .with_context(|| format!("failed to open notebook at {}", path.display()))?;
    Ok(Some(store))
}

#[cfg(test)]
pub(crate) mod testing {
    use std::path::Path;

    use notebook::config::NotebookConfig;

    /// Config pointing the store at `path`, everything else default.
    pub fn config_for(path: &Path) -> NotebookConfig {
        let mut config = NotebookConfig::default();
        config.storage.path = path.display().to_string();
        config
    }
}
