use std::{
    fs, io,
    path::Path,
    time::{SystemTime, UNIX_EPOCH},
};

use color_eyre::eyre::{self, WrapErr};
use cube_core::SavedPuzzle;
use log::{debug, info};

/// Read the saved cube, or `None` if nothing has been saved yet
pub fn load(path: &Path) -> eyre::Result<Option<SavedPuzzle>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!("No saved cube at {}", path.display());
            return Ok(None);
        }
        Err(err) => {
            return Err(err).wrap_err_with(|| format!("Could not read {}", path.display()));
        }
    };

    let saved = serde_json::from_str(&text)
        .wrap_err_with(|| format!("{} does not hold a valid cube", path.display()))?;

    Ok(Some(saved))
}

/// Write the cube, stamping it with the current time
pub fn save(path: &Path, saved: &mut SavedPuzzle) -> eyre::Result<()> {
    saved.last_played = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .map(|since| since.as_secs());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("Could not create {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(saved)?;
    fs::write(path, json).wrap_err_with(|| format!("Could not write {}", path.display()))?;

    info!("Saved cube to {}", path.display());

    Ok(())
}
