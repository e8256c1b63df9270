//! Document copy module
//!
//! Moves downloaded document files (policy docs and similar) into the
//! site's assets directory. Copies preserve permissions and timestamps,
//! byte sizes are compared afterwards, and a missing source produces a
//! list of similarly-named files from its directory as a hint that the
//! download landed under a different name.

use filetime::FileTime;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for copy operations
pub type Result<T> = std::result::Result<T, CopyError>;

/// Errors that can occur while syncing documents
#[derive(Error, Debug)]
pub enum CopyError {
    /// Source file does not exist (or is not a regular file)
    #[error("source file does not exist: {0}")]
    SourceNotFound(PathBuf),

    /// IO failure while copying or inspecting a file
    #[error("failed to copy to {path}: {source}")]
    Copy {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Manifest file could not be read
    #[error("failed to read manifest {path}: {source}")]
    ManifestRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Manifest file is not valid TOML
    #[error("invalid manifest {path}: {source}")]
    ManifestFormat {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Command-line mapping was not of the form SOURCE=DEST_NAME
    #[error("invalid mapping '{0}', expected SOURCE=DEST_NAME")]
    InvalidMapping(String),
}

/// One (source file, destination name) pair
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct DocumentMapping {
    /// Source file, absolute or relative to the configured source dir
    pub source: PathBuf,
    /// File name to create in the destination directory
    pub dest: String,
}

impl DocumentMapping {
    /// Parse a `SOURCE=DEST_NAME` command-line mapping
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.split_once('=') {
            Some((source, dest)) if !source.is_empty() && !dest.is_empty() => Ok(Self {
                source: PathBuf::from(source),
                dest: dest.to_string(),
            }),
            _ => Err(CopyError::InvalidMapping(raw.to_string())),
        }
    }
}

/// TOML manifest listing the documents to sync
#[derive(Debug, Deserialize, Default)]
pub struct Manifest {
    /// Directory relative sources are resolved against
    #[serde(default)]
    pub source_dir: Option<PathBuf>,
    #[serde(default)]
    pub documents: Vec<DocumentMapping>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| CopyError::ManifestRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| CopyError::ManifestFormat {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Byte sizes recorded around one completed copy
#[derive(Debug, Clone, Copy)]
pub struct CopyReport {
    pub src_size: u64,
    pub dst_size: u64,
}

impl CopyReport {
    /// Source and destination sizes differ after the copy
    pub const fn size_mismatch(&self) -> bool {
        self.src_size != self.dst_size
    }

    /// Copy looks complete but implausibly small (placeholder download?)
    pub const fn suspiciously_small(&self, min_size: u64) -> bool {
        !self.size_mismatch() && self.dst_size < min_size
    }
}

/// Copy `src` to `dst`, preserving permissions and timestamps
///
/// A missing source is an error and creates nothing at `dst`. The returned
/// report carries the before/after byte sizes for verification.
pub fn copy_document(src: &Path, dst: &Path) -> Result<CopyReport> {
    let src_meta =
        fs::metadata(src).map_err(|_| CopyError::SourceNotFound(src.to_path_buf()))?;
    if !src_meta.is_file() {
        return Err(CopyError::SourceNotFound(src.to_path_buf()));
    }

    let copy_err = |source| CopyError::Copy {
        path: dst.to_path_buf(),
        source,
    };

    // fs::copy carries contents and permissions; timestamps need an extra step.
    fs::copy(src, dst).map_err(copy_err)?;
    let atime = FileTime::from_last_access_time(&src_meta);
    let mtime = FileTime::from_last_modification_time(&src_meta);
    filetime::set_file_times(dst, atime, mtime).map_err(copy_err)?;

    let dst_size = fs::metadata(dst).map_err(copy_err)?.len();

    Ok(CopyReport {
        src_size: src_meta.len(),
        dst_size,
    })
}

/// Files in `dir` that look like the wanted file
///
/// A candidate is similar when it shares the wanted file's extension or
/// when either stem contains the other, case-insensitively. Used to hint
/// at downloads that landed under a slightly different name.
pub fn similar_files(dir: &Path, wanted: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let wanted_stem = lowered(wanted.file_stem());
    let wanted_ext = lowered_opt(wanted.extension());

    let mut matches: Vec<String> = entries
        .filter_map(std::result::Result::ok)
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| is_similar(name, &wanted_stem, wanted_ext.as_deref()))
        .collect();
    matches.sort();
    matches
}

fn lowered(part: Option<&std::ffi::OsStr>) -> String {
    part.and_then(|s| s.to_str()).unwrap_or("").to_lowercase()
}

fn lowered_opt(part: Option<&std::ffi::OsStr>) -> Option<String> {
    part.and_then(|s| s.to_str()).map(str::to_lowercase)
}

fn is_similar(candidate: &str, wanted_stem: &str, wanted_ext: Option<&str>) -> bool {
    let candidate_path = Path::new(candidate);
    if let (Some(ext), Some(candidate_ext)) = (wanted_ext, lowered_opt(candidate_path.extension()))
    {
        if candidate_ext == ext {
            return true;
        }
    }

    let candidate_stem = lowered(candidate_path.file_stem());
    !wanted_stem.is_empty()
        && !candidate_stem.is_empty()
        && (candidate_stem.contains(wanted_stem) || wanted_stem.contains(&candidate_stem))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_parse() {
        let mapping = DocumentMapping::parse("policy.docx=politika-personalnye-dannye.docx")
            .unwrap();
        assert_eq!(mapping.source, PathBuf::from("policy.docx"));
        assert_eq!(mapping.dest, "politika-personalnye-dannye.docx");
    }

    #[test]
    fn test_mapping_parse_rejects_malformed() {
        assert!(DocumentMapping::parse("no-separator").is_err());
        assert!(DocumentMapping::parse("=dest").is_err());
        assert!(DocumentMapping::parse("src=").is_err());
    }

    #[test]
    fn test_manifest_load() {
        let dir = tempfile::tempdir().unwrap();
        let manifest_path = dir.path().join("docs.toml");
        fs::write(
            &manifest_path,
            r#"
source_dir = "/downloads"

[[documents]]
source = "consent.doc"
dest = "soglasie-personalnye-dannye.doc"

[[documents]]
source = "policy.docx"
dest = "politika-personalnye-dannye.docx"
"#,
        )
        .unwrap();

        let manifest = Manifest::load(&manifest_path).unwrap();
        assert_eq!(manifest.source_dir, Some(PathBuf::from("/downloads")));
        assert_eq!(manifest.documents.len(), 2);
        assert_eq!(manifest.documents[1].dest, "politika-personalnye-dannye.docx");
    }

    #[test]
    fn test_manifest_load_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let manifest_path = dir.path().join("docs.toml");
        fs::write(&manifest_path, "documents = 3").unwrap();
        assert!(matches!(
            Manifest::load(&manifest_path),
            Err(CopyError::ManifestFormat { .. })
        ));
    }

    #[test]
    fn test_copy_preserves_size_content_and_mtime() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("policy.docx");
        let dst = dir.path().join("out.docx");
        fs::write(&src, vec![7u8; 2048]).unwrap();

        let report = copy_document(&src, &dst).unwrap();
        assert_eq!(report.src_size, 2048);
        assert_eq!(report.dst_size, 2048);
        assert!(!report.size_mismatch());
        assert_eq!(fs::read(&src).unwrap(), fs::read(&dst).unwrap());

        let src_mtime = FileTime::from_last_modification_time(&fs::metadata(&src).unwrap());
        let dst_mtime = FileTime::from_last_modification_time(&fs::metadata(&dst).unwrap());
        assert_eq!(src_mtime.unix_seconds(), dst_mtime.unix_seconds());
    }

    #[test]
    fn test_missing_source_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("absent.doc");
        let dst = dir.path().join("out.doc");

        let err = copy_document(&src, &dst).unwrap_err();
        assert!(matches!(err, CopyError::SourceNotFound(_)));
        assert!(!dst.exists());
    }

    #[test]
    fn test_small_copy_is_flagged() {
        let report = CopyReport {
            src_size: 120,
            dst_size: 120,
        };
        assert!(report.suspiciously_small(10_000));
        assert!(!report.suspiciously_small(100));
    }

    #[test]
    fn test_mismatch_wins_over_small() {
        let report = CopyReport {
            src_size: 120,
            dst_size: 64,
        };
        assert!(report.size_mismatch());
        assert!(!report.suspiciously_small(10_000));
    }

    #[test]
    fn test_similar_files_by_stem_and_extension() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("privacy-policy-final.docx"), "x").unwrap();
        fs::write(dir.path().join("unrelated.png"), "x").unwrap();
        fs::write(dir.path().join("notes.docx"), "x").unwrap();

        let hints = similar_files(dir.path(), Path::new("policy.docx"));
        // Same extension matches both .docx files; the stem match adds nothing new.
        assert_eq!(hints, vec!["notes.docx", "privacy-policy-final.docx"]);

        let hints = similar_files(dir.path(), Path::new("unrelated-2024.pdf"));
        assert_eq!(hints, vec!["unrelated.png"]);
    }

    #[test]
    fn test_similar_files_missing_dir_is_empty() {
        let hints = similar_files(Path::new("/no/such/dir"), Path::new("policy.docx"));
        assert!(hints.is_empty());
    }
}
