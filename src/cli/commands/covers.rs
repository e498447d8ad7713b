//! Cover art extraction command.

use std::path::Path;

use crate::cover;
use crate::metadata::FormatRegistry;

/// Extract embedded covers for every file under `root`
pub fn cmd_covers(root: &Path) -> anyhow::Result<()> {
    println!("Extracting covers under {}", root.display());
    let summary = cover::extract_covers(root, &FormatRegistry::with_defaults())?;
    println!("{summary}");
    Ok(())
}
