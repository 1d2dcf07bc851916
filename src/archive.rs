//! Unpacking of uploaded codebases into scratch space
//!
//! Accepts zip files, gzip-compressed or plain tarballs, or a directory that has already been
//! extracted by the caller. Extracted archives live in a [`TempDir`] owned by the
//! returned [`ExtractedTree`], so the scratch files are removed when the tree is
//! dropped even if the pipeline fails half-way.

use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{self, Read, Seek};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use thiserror::Error;
use tracing::{debug, info, warn};
use zip::ZipArchive;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Input path does not exist: {0}")]
    NotFound(PathBuf),

    #[error("Unsupported archive format: {0} (expected .zip, .tar.gz, .tgz, .tar or a directory)")]
    UnsupportedFormat(PathBuf),

    #[error("Failed to prepare scratch directory: {0}")]
    Scratch(#[source] io::Error),

    #[error("Failed to unpack archive {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArchiveKind {
    Zip,
    TarGz,
    Tar,
}

impl ArchiveKind {
    fn detect(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_lowercase();
        if name.ends_with(".zip") {
            Some(ArchiveKind::Zip)
        } else if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            Some(ArchiveKind::TarGz)
        } else if name.ends_with(".tar") {
            Some(ArchiveKind::Tar)
        } else {
            None
        }
    }
}

/// Source tree ready for scanning.
#[derive(Debug)]
pub struct ExtractedTree {
    root: PathBuf,
    scratch: Option<TempDir>,
}

impl ExtractedTree {
    /// Wraps a directory the caller owns. It is never deleted.
    pub fn borrowed(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            scratch: None,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// True when the tree lives in scratch space created by the extractor.
    pub fn is_scratch(&self) -> bool {
        self.scratch.is_some()
    }

    /// Removes scratch files now, reporting any I/O failure.
    pub fn cleanup(self) -> io::Result<()> {
        match self.scratch {
            Some(dir) => {
                let path = dir.path().to_path_buf();
                dir.close()?;
                debug!(path = %path.display(), "Removed scratch directory");
                Ok(())
            }
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ArchiveExtractor {
    scratch_parent: Option<PathBuf>,
}

impl ArchiveExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates scratch directories under `parent` instead of the system temp dir.
    pub fn with_scratch_parent(mut self, parent: impl Into<PathBuf>) -> Self {
        self.scratch_parent = Some(parent.into());
        self
    }

    pub fn extract(&self, input: &Path) -> Result<ExtractedTree, ArchiveError> {
        if !input.exists() {
            return Err(ArchiveError::NotFound(input.to_path_buf()));
        }

        if input.is_dir() {
            debug!(path = %input.display(), "Input is a directory, skipping extraction");
            return Ok(ExtractedTree::borrowed(input));
        }

        let kind = ArchiveKind::detect(input)
            .ok_or_else(|| ArchiveError::UnsupportedFormat(input.to_path_buf()))?;

        let scratch = match &self.scratch_parent {
            Some(parent) => tempfile::Builder::new()
                .prefix("litscout-")
                .tempdir_in(parent),
            None => tempfile::Builder::new().prefix("litscout-").tempdir(),
        }
        .map_err(ArchiveError::Scratch)?;

        let corrupt = |source: io::Error| ArchiveError::Corrupt {
            path: input.to_path_buf(),
            source,
        };

        let file = File::open(input).map_err(corrupt)?;
        let unpacked = match kind {
            ArchiveKind::Zip => unpack_zip(file, scratch.path()),
            // `unpack` refuses entries that would land outside the destination.
            ArchiveKind::TarGz => tar::Archive::new(GzDecoder::new(file)).unpack(scratch.path()),
            ArchiveKind::Tar => tar::Archive::new(file).unpack(scratch.path()),
        };
        unpacked.map_err(corrupt)?;

        info!(
            archive = %input.display(),
            kind = ?kind,
            scratch = %scratch.path().display(),
            "Archive extracted"
        );

        Ok(ExtractedTree {
            root: scratch.path().to_path_buf(),
            scratch: Some(scratch),
        })
    }
}

/// Writes every entry of a zip archive below `dest`.
///
/// Entries whose names are absolute or climb out with `..` are skipped.
fn unpack_zip<R: Read + Seek>(reader: R, dest: &Path) -> io::Result<()> {
    let invalid = |e: zip::result::ZipError| io::Error::new(io::ErrorKind::InvalidData, e);
    let mut archive = ZipArchive::new(reader).map_err(invalid)?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(invalid)?;

        let Some(relative) = entry.enclosed_name() else {
            warn!(entry = entry.name(), "Skipping zip entry outside the extraction root");
            continue;
        };
        let target = dest.join(relative);

        if entry.is_dir() {
            std::fs::create_dir_all(&target)?;
            continue;
        }

        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&target)?;
        io::copy(&mut entry, &mut out)?;
    }

    debug!(entries = archive.len(), "Unpacked zip archive");
    Ok(())
}

/// Derives a display name from an upload's file name by dropping archive suffixes.
pub fn codebase_name_from(path: &Path) -> String {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("codebase");

    for suffix in [".tar.gz", ".tgz", ".tar", ".zip"] {
        if name.len() > suffix.len() && name.to_lowercase().ends_with(suffix) {
            return name[..name.len() - suffix.len()].to_string();
        }
    }

    name.to_string()
}

/// Best-effort removal used on the failure path, where the error must not mask
/// the original one.
pub(crate) fn cleanup_quietly(tree: ExtractedTree) {
    let root = tree.root().to_path_buf();
    if let Err(e) = tree.cleanup() {
        warn!(path = %root.display(), error = %e, "Failed to remove scratch directory");
    }
}
