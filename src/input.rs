use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use mpa::utils::errors::StegoError;

/// Whether `path` designates a standard stream rather than a file.
pub fn is_pipe<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().as_os_str() == "-"
}

/// Reads the whole input into one buffer.
/// Use "-" for stdin pipe input
pub fn read_input<P: AsRef<Path>>(input_path: P) -> Result<Vec<u8>, StegoError> {
    let input_path = input_path.as_ref();

    if is_pipe(input_path) {
        let mut data = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut data)
            .map_err(StegoError::FileRead)?;

        return Ok(data);
    }

    let mut file = File::open(input_path).map_err(StegoError::FileRead)?;
    let len = file.metadata().map_err(StegoError::FileRead)?.len();

    let mut data = Vec::new();
    usize::try_from(len)
        .ok()
        .and_then(|len| data.try_reserve_exact(len).ok())
        .ok_or(StegoError::Memory(len))?;

    file.read_to_end(&mut data).map_err(StegoError::FileRead)?;
    log::debug!("Read {} bytes from {}", data.len(), input_path.display());

    Ok(data)
}

/// Name used in user-facing messages.
pub fn display_name(input_path: &Path) -> String {
    if is_pipe(input_path) {
        return "<stdin>".to_string();
    }

    input_path
        .file_name()
        .unwrap_or(input_path.as_os_str())
        .to_string_lossy()
        .into_owned()
}
