use crate::document::Document;
use crate::rewrite::{Pipeline, RunStats};
use std::fs;
use std::path::{Path, PathBuf};

/// Default extension of files picked up by [`scan_files`].
pub const DEFAULT_EXTENSION: &str = "rst";

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to scan {path}: {source}")]
    Walk {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid root directory: {0}")]
    InvalidRoot(String),
}

impl IoError {
    /// The file or directory the failure relates to.
    pub fn path(&self) -> Option<&Path> {
        match self {
            IoError::NotFound(path)
            | IoError::Read { path, .. }
            | IoError::Write { path, .. }
            | IoError::Walk { path, .. } => Some(path),
            IoError::InvalidRoot(_) => None,
        }
    }
}

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub changed: bool,
    pub stats: RunStats,
}

/// Read a file's full text
pub fn read_file(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Overwrite a file with new content
pub fn write_file(path: &Path, content: &str) -> Result<(), IoError> {
    fs::write(path, content).map_err(|source| IoError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Recursively find files with the given extension under `root`.
///
/// A file matches when its name ends in `.<extension>`, so a file named
/// just `.rst` counts. Directory symlinks are not followed. Results are
/// sorted. Any unreadable directory aborts the scan.
pub fn scan_files(root: &Path, extension: &str) -> Result<Vec<PathBuf>, IoError> {
    Ok(scan(root, extension, false)?.files)
}

#[derive(Debug, Default)]
struct Scan {
    files: Vec<PathBuf>,
    skipped_dirs: Vec<PathBuf>,
}

fn scan(root: &Path, extension: &str, keep_going: bool) -> Result<Scan, IoError> {
    validate_root(root)?;

    let suffix = format!(".{extension}");
    let mut scan = Scan::default();
    scan_directory_recursive(root, &suffix, keep_going, &mut scan)?;
    scan.files.sort();
    Ok(scan)
}

fn scan_directory_recursive(
    dir: &Path,
    suffix: &str,
    keep_going: bool,
    scan: &mut Scan,
) -> Result<(), IoError> {
    if let Err(e) = scan_directory(dir, suffix, keep_going, scan) {
        if !keep_going {
            return Err(e);
        }
        log::warn!("Skipping directory {}: {e}", dir.display());
        scan.skipped_dirs.push(dir.to_path_buf());
    }
    Ok(())
}

fn scan_directory(
    dir: &Path,
    suffix: &str,
    keep_going: bool,
    scan: &mut Scan,
) -> Result<(), IoError> {
    let walk_error = |source| IoError::Walk {
        path: dir.to_path_buf(),
        source,
    };
    let entries = fs::read_dir(dir).map_err(walk_error)?;

    for entry in entries {
        let entry = entry.map_err(walk_error)?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(walk_error)?;

        if file_type.is_dir() {
            scan_directory_recursive(&path, suffix, keep_going, scan)?;
        } else if has_suffix(&path, suffix) && path.is_file() {
            scan.files.push(path);
        }
    }

    Ok(())
}

fn has_suffix(path: &Path, suffix: &str) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().ends_with(suffix))
}

pub fn validate_root(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidRoot(format!(
            "{} is not a directory",
            path.display()
        )));
    }

    Ok(())
}

/// Run the pipeline over one file, writing it back only if the text changed.
pub fn process_file(path: &Path, pipeline: &Pipeline) -> Result<FileOutcome, IoError> {
    let original = read_file(path)?;
    let mut document = Document::from_text(&original);
    let stats = pipeline.run(&mut document);
    let rewritten = document.to_text();

    let changed = rewritten != original;
    if changed {
        write_file(path, &rewritten)?;
        let stages: Vec<_> = stats.active_stages().map(|s| s.stage).collect();
        log::info!(
            "Rewrote {} ({} line(s) changed by {})",
            path.display(),
            stats.lines_rewritten(),
            stages.join(", ")
        );
    } else {
        log::debug!("Unchanged {}", path.display());
    }

    Ok(FileOutcome {
        path: path.to_path_buf(),
        changed,
        stats,
    })
}

/// Totals for a directory run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkSummary {
    pub scanned: usize,
    pub rewritten: usize,
    /// Files and directories that could not be processed.
    pub skipped: Vec<PathBuf>,
}

/// Process every matching file under `root`, stopping at the first failure.
pub fn process_directory(
    root: &Path,
    extension: &str,
    pipeline: &Pipeline,
) -> Result<WalkSummary, IoError> {
    let mut summary = WalkSummary::default();
    for path in scan_files(root, extension)? {
        let outcome = process_file(&path, pipeline)?;
        summary.scanned += 1;
        if outcome.changed {
            summary.rewritten += 1;
        }
    }
    Ok(summary)
}

/// Like [`process_directory`], but files and directories that fail are
/// logged and skipped.
pub fn process_directory_keep_going(
    root: &Path,
    extension: &str,
    pipeline: &Pipeline,
) -> Result<WalkSummary, IoError> {
    let scan = scan(root, extension, true)?;
    let mut summary = WalkSummary {
        skipped: scan.skipped_dirs,
        ..WalkSummary::default()
    };
    for path in scan.files {
        summary.scanned += 1;
        match process_file(&path, pipeline) {
            Ok(outcome) if outcome.changed => summary.rewritten += 1,
            Ok(_) => {}
            Err(e) => {
                log::warn!("Skipping {}: {e}", path.display());
                summary.skipped.push(path);
            }
        }
    }
    Ok(summary)
}
