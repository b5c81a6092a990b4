use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use mpa::utils::errors::StegoError;

use crate::input::is_pipe;

pub fn create_path_with_suffix(base_path: &Path, suffix: &str) -> PathBuf {
    let mut path = base_path.to_path_buf();
    let file_name = base_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());

    path.set_file_name(format!("{file_name}.{suffix}"));
    path
}

/// Writes `data` to `path` so that readers see either the old file or the
/// complete new one.
///
/// The bytes go to a temporary sibling first, which is synced and then
/// renamed over `path`. On failure the temporary is removed. Use "-" for
/// stdout.
pub fn write_output(path: &Path, data: &[u8]) -> Result<(), StegoError> {
    if is_pipe(path) {
        let mut stdout = io::stdout().lock();
        return stdout
            .write_all(data)
            .and_then(|_| stdout.flush())
            .map_err(StegoError::FileWrite);
    }

    let tmp_path = create_path_with_suffix(path, &format!("{}.tmp", std::process::id()));

    let result = write_synced(&tmp_path, data).and_then(|_| fs::rename(&tmp_path, path));
    if let Err(e) = result {
        let _ = fs::remove_file(&tmp_path);
        return Err(StegoError::FileWrite(e));
    }

    log::debug!("Wrote {} bytes to {}", data.len(), path.display());
    Ok(())
}

fn write_synced(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data)?;
    file.sync_all()
}
