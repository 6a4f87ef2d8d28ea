use relative_path::{RelativePath, RelativePathBuf};
use std::path::Path;

/// A path discovered under a documentation root, shown relative to it
#[derive(Debug, Clone, PartialEq)]
pub struct RstFile {
    relative_path: RelativePathBuf,
}

impl RstFile {
    pub fn new(relative_path: RelativePathBuf) -> Self {
        Self { relative_path }
    }

    /// Build from an absolute path found while scanning `root`.
    ///
    /// Returns `None` when the path is not inside `root`.
    pub fn from_absolute(root: &Path, path: &Path) -> Option<Self> {
        let stripped = path.strip_prefix(root).ok()?;
        RelativePathBuf::from_path(stripped).ok().map(Self::new)
    }

    /// Get the path relative to the documentation root
    pub fn relative_path(&self) -> &RelativePath {
        &self.relative_path
    }
}

impl std::fmt::Display for RstFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.relative_path().as_str())
    }
}
