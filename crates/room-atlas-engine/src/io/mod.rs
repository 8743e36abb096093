use crate::models::NormalizedRoom;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_GLOB: &str = "**/*.md";

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid rooms directory: {0}")]
    InvalidRoomsDir(String),
    #[error("Invalid glob pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },
    #[error("Could not serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl IoError {
    fn at(path: &Path) -> impl FnOnce(std::io::Error) -> IoError + '_ {
        move |source| IoError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Read a room document and return its content
pub fn read_document(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(IoError::at(path))
}

/// Write a normalized record as `<out_dir>/<name>`, creating the directory if needed
pub fn write_record(out_dir: &Path, name: &str, room: &NormalizedRoom) -> Result<PathBuf, IoError> {
    fs::create_dir_all(out_dir).map_err(IoError::at(out_dir))?;
    let path = out_dir.join(name);
    let json = room.to_json_string()?;
    fs::write(&path, json).map_err(IoError::at(&path))?;
    Ok(path)
}

/// Scan for room documents under `rooms_dir` matching `pattern`, sorted by path
pub fn scan_documents(rooms_dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, IoError> {
    validate_rooms_dir(rooms_dir)?;

    // The directory is literal; only `pattern` carries glob syntax.
    let base = glob::Pattern::escape(&rooms_dir.to_string_lossy());
    let full_pattern = Path::new(&base).join(pattern);
    let full_pattern = full_pattern.to_string_lossy();
    let entries = glob::glob(&full_pattern).map_err(|source| IoError::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| IoError::Io {
            path: e.path().to_path_buf(),
            source: e.into_error(),
        })?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Scan for JSON records directly inside `out_dir`, sorted by path
pub fn scan_records(out_dir: &Path) -> Result<Vec<PathBuf>, IoError> {
    let entries = fs::read_dir(out_dir).map_err(IoError::at(out_dir))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(IoError::at(out_dir))?.path();
        if path.is_file()
            && let Some(ext) = path.extension()
            && ext == "json"
        {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

pub fn validate_rooms_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidRoomsDir(format!(
            "{} does not exist or is not a directory",
            path.display()
        )));
    }

    Ok(())
}
