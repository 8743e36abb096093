use std::path::{Path, PathBuf};

/// A room document on disk, identified by its path and file stem.
///
/// The stem is the document's storage name and must equal its canonical title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomFile {
    path: PathBuf,
    stem: String,
}

impl RoomFile {
    pub fn new(path: PathBuf) -> Self {
        let stem = Self::extract_stem(&path);
        Self { path, stem }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The storage name (file name without extension)
    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// File name of the JSON record written for this document
    pub fn record_name(&self) -> String {
        format!("{}.json", self.stem)
    }

    /// Sibling path this document would have if its stem were `stem`
    pub fn sibling_named(&self, stem: &str) -> PathBuf {
        let file_name = match self.path.extension() {
            Some(ext) => format!("{stem}.{}", ext.to_string_lossy()),
            None => stem.to_string(),
        };
        self.path.with_file_name(file_name)
    }

    fn extract_stem(path: &Path) -> String {
        path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

impl From<PathBuf> for RoomFile {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

impl From<&Path> for RoomFile {
    fn from(path: &Path) -> Self {
        Self::new(path.to_path_buf())
    }
}
