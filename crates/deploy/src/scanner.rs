//! Asset directory scanning.
//!
//! Walks a local asset folder and loads every file into memory, keyed by its
//! path relative to the folder with `/` separators. Hidden entries are skipped.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use crate::error::DeployError;

/// Loads all files under `root` as deployable assets.
pub fn scan_assets(root: &Path) -> Result<BTreeMap<String, Vec<u8>>, DeployError> {
    let mut assets = BTreeMap::new();
    walk_dir(root, root, &mut assets)?;
    debug!(root = %root.display(), count = assets.len(), "assets scanned");
    Ok(assets)
}

fn walk_dir(
    root: &Path,
    current: &Path,
    assets: &mut BTreeMap<String, Vec<u8>>,
) -> Result<(), DeployError> {
    for entry in std::fs::read_dir(current)? {
        let entry = entry?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }

        let path = entry.path();
        let metadata = entry.metadata()?;

        if metadata.is_dir() {
            walk_dir(root, &path, assets)?;
        } else if metadata.is_file() {
            let rel_path = path.strip_prefix(root).map_err(std::io::Error::other)?;
            let key = rel_path.to_string_lossy().replace('\\', "/");
            assets.insert(key, std::fs::read(&path)?);
        }
    }

    Ok(())
}
