use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use crate::error::MushafError;

/// Whether `dir` already holds at least one `*.{extension}` file.
pub fn has_documents(dir: &Path, extension: &str) -> Result<bool, MushafError> {
    if !dir.is_dir() {
        return Ok(false);
    }
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let matches = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case(extension))
            .unwrap_or(false);
        if matches && path.is_file() {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Expand a bundled page archive into `dest`.
///
/// Does nothing when `dest` already contains documents with `extension`.
/// Returns the paths written. The archive is deleted afterwards only when
/// `remove_archive` is set.
pub fn expand_archive(
    archive_path: &Path,
    dest: &Path,
    extension: &str,
    remove_archive: bool,
) -> Result<Vec<PathBuf>, MushafError> {
    if has_documents(dest, extension)? {
        log::info!(
            "{} already contains .{} files, skipping archive expansion",
            dest.display(),
            extension
        );
        return Ok(Vec::new());
    }

    let file = File::open(archive_path).map_err(|e| {
        MushafError::Archive(format!("cannot open {}: {}", archive_path.display(), e))
    })?;
    let mut archive = ZipArchive::new(file)
        .map_err(|e| MushafError::Archive(format!("{}: {}", archive_path.display(), e)))?;

    std::fs::create_dir_all(dest)?;
    let mut written = Vec::new();

    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| MushafError::Archive(format!("entry {i}: {e}")))?;
        if entry.is_dir() {
            continue;
        }
        let relative = entry.enclosed_name().ok_or_else(|| {
            MushafError::Archive(format!("entry '{}' escapes the target directory", entry.name()))
        })?;

        let out_path = dest.join(relative);
        if let Some(parent) = out_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&out_path)?;
        io::copy(&mut entry, &mut out)?;
        written.push(out_path);
    }

    log::info!(
        "expanded {} files from {} into {}",
        written.len(),
        archive_path.display(),
        dest.display()
    );

    if remove_archive {
        std::fs::remove_file(archive_path)?;
        log::info!("removed {}", archive_path.display());
    }

    Ok(written)
}
