//! Upload scratch directories and shapefile archive extraction.
//!
//! SYSTEM CONTEXT
//! ==============
//! The upload route hands the raw `.zip` bytes here. Everything in this
//! module is blocking filesystem work and runs inside `spawn_blocking`.
//! The scratch directory is removed when its `UploadDir` is dropped, on both
//! success and failure paths.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid zip archive: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("zip entry escapes the upload directory: {0}")]
    UnsafeEntry(String),
    #[error("ZIP does not contain a .shp")]
    MissingShp,
}

/// Per-upload scratch directory named `fauno_*`.
#[derive(Debug)]
pub struct UploadDir {
    dir: TempDir,
}

impl UploadDir {
    /// Create a fresh directory under `root`, creating `root` if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if either directory cannot be created.
    pub fn create(root: &Path) -> Result<Self, ArchiveError> {
        fs::create_dir_all(root)?;
        let dir = tempfile::Builder::new().prefix("fauno_").tempdir_in(root)?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// A shapefile located inside an extracted upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedShapefile {
    pub shp_path: PathBuf,
    /// File stem of the `.shp` (already lowercased).
    pub stem: String,
    /// Contents of a sibling `<stem>.sld`, when the archive carried one.
    pub sld_xml: Option<String>,
}

/// Write the uploaded archive into `dir`, extract it and locate the shapefile.
///
/// # Errors
///
/// Returns an error for unreadable or unsafe archives, filesystem failures,
/// or when no `.shp` sits at the top level of the archive.
pub fn unpack_shapefile(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<ExtractedShapefile, ArchiveError> {
    let zip_name = Path::new(file_name)
        .file_name()
        .map_or_else(|| PathBuf::from("upload.zip"), PathBuf::from);
    let zip_path = dir.join(zip_name);
    fs::write(&zip_path, bytes)?;

    extract_zip(&zip_path, dir)?;
    lowercase_entries(dir)?;

    let shp_path = find_shapefile(dir)?.ok_or(ArchiveError::MissingShp)?;
    let stem = shp_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let sld_path = dir.join(format!("{stem}.sld"));
    let sld_xml = if sld_path.is_file() {
        Some(String::from_utf8_lossy(&fs::read(&sld_path)?).into_owned())
    } else {
        None
    };

    Ok(ExtractedShapefile { shp_path, stem, sld_xml })
}

/// Extract every entry of `zip_path` into `dest`, rejecting path traversal.
pub(crate) fn extract_zip(zip_path: &Path, dest: &Path) -> Result<(), ArchiveError> {
    let mut archive = zip::ZipArchive::new(File::open(zip_path)?)?;
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let Some(relative) = entry.enclosed_name() else {
            return Err(ArchiveError::UnsafeEntry(entry.name().to_owned()));
        };
        let target = dest.join(relative);
        if entry.is_dir() {
            fs::create_dir_all(&target)?;
            continue;
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&target)?;
        io::copy(&mut entry, &mut out)?;
    }
    Ok(())
}

/// Rename every entry directly inside `dir` to its lowercase name.
pub(crate) fn lowercase_entries(dir: &Path) -> Result<(), ArchiveError> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let lower = name.to_lowercase();
        if lower != name {
            fs::rename(entry.path(), dir.join(lower))?;
        }
    }
    Ok(())
}

/// First `.shp` file at the top level of `dir`, by name.
pub(crate) fn find_shapefile(dir: &Path) -> Result<Option<PathBuf>, ArchiveError> {
    let mut candidates = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_shp = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("shp"));
        if is_shp && path.is_file() {
            candidates.push(path);
        }
    }
    candidates.sort();
    Ok(candidates.into_iter().next())
}

#[cfg(test)]
#[path = "archive_test.rs"]
mod tests;
