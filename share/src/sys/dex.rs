//! Writing embedded DEX bytecode for a `DexClassLoader`.

use std::fs;
use std::path::Path;

use crate::ShareError;

/// Write `bytes` to `path` and make the file read-only.
///
/// Android 14 refuses to load a writable dynamically loaded DEX. A read-only
/// copy left by an earlier run is removed first so the write can succeed.
pub(crate) fn write_read_only(path: &Path, bytes: &[u8]) -> Result<(), ShareError> {
    let _ = fs::remove_file(path);

    log::info!("Writing share helper DEX to {}", path.display());
    fs::write(path, bytes)
        .map_err(|e| ShareError::PlatformError(format!("write DEX failed: {e}")))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(path)
            .map_err(|e| ShareError::PlatformError(format!("metadata DEX failed: {e}")))?
            .permissions();
        perms.set_mode(0o444);
        fs::set_permissions(path, perms)
            .map_err(|e| ShareError::PlatformError(format!("set_permissions DEX failed: {e}")))?;
        log::info!("DEX file permissions set to read-only (0444)");
    }

    Ok(())
}
