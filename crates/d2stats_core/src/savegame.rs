//! Locating and loading exported character documents on disk.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::{debug, info};

use crate::core_api::{CoreError, CoreErrorCode, Engine, Session};

pub const CHARACTER_EXTENSION: &str = "json";
const HARDCORE_STASH: &str = "SharedStashHardCoreV2.json";
const SOFTCORE_STASH: &str = "SharedStashSoftCoreV2.json";

/// Shared stash document that sits next to a character of the given mode.
pub fn shared_stash_path(dir: &Path, hardcore: bool) -> PathBuf {
    dir.join(if hardcore { HARDCORE_STASH } else { SOFTCORE_STASH })
}

/// Most recently modified regular file in `dir` with the given extension.
///
/// Shared stash documents are never picked.
pub fn find_most_recent(dir: &Path, extension: &str) -> Result<Option<PathBuf>, CoreError> {
    let entries = fs::read_dir(dir).map_err(|e| io_error(dir, e))?;
    let mut newest: Option<(SystemTime, PathBuf)> = None;
    for entry in entries {
        let entry = entry.map_err(|e| io_error(dir, e))?;
        let path = entry.path();
        let matches = path.extension().is_some_and(|ext| ext == extension);
        let is_stash = path
            .file_name()
            .is_some_and(|name| name == HARDCORE_STASH || name == SOFTCORE_STASH);
        if !matches || is_stash {
            continue;
        }
        let metadata = entry.metadata().map_err(|e| io_error(&path, e))?;
        if !metadata.is_file() {
            continue;
        }
        let modified = metadata.modified().map_err(|e| io_error(&path, e))?;
        if newest.as_ref().is_none_or(|(best, _)| modified > *best) {
            newest = Some((modified, path));
        }
    }
    if let Some((_, path)) = &newest {
        info!(path = %path.display(), "found most recent character");
    }
    Ok(newest.map(|(_, path)| path))
}

/// Read a character document and, when enabled, the matching shared stash.
pub fn load_session(engine: &Engine, path: &Path) -> Result<Session, CoreError> {
    let bytes = fs::read(path).map_err(|e| io_error(path, e))?;
    let session = engine.open_bytes(bytes)?;
    if !engine.config().stats.include_shared_stash {
        return Ok(session);
    }

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let stash_path = shared_stash_path(dir, session.character().hardcore);
    debug!(path = %stash_path.display(), "reading shared stash");
    let stash_bytes = fs::read(&stash_path).map_err(|e| io_error(&stash_path, e))?;
    let tabs = Engine::parse_shared_stash(stash_bytes)?;
    Ok(session.with_shared_stash(tabs))
}

fn io_error(path: &Path, e: std::io::Error) -> CoreError {
    CoreError::new(
        CoreErrorCode::Io,
        format!("{}: {e}", path.display()),
    )
}
