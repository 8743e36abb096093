//! Title identity: canonical title, `#` heading and file stem must agree.
//!
//! The canonical title is derived from the heading and validated against the
//! schema's title pattern. With fixing enabled, a disagreeing heading is
//! rewritten in place and a disagreeing file is renamed; without it, each
//! disagreement is reported separately.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::RoomFile;
use crate::parsing::blocks::{HeadingClassifier, LineClass};
use crate::schema::RoomSchema;
use crate::vocab::TITLE_PREFIX;

#[derive(Debug, Error)]
pub enum TitleError {
    #[error(
        "Title does not satisfy schema pattern and cannot be canonicalized safely \
         (H1: {heading:?}, pattern: {pattern:?})"
    )]
    NotCanonicalizable { heading: String, pattern: String },

    #[error("H1 does not match canonical title: {heading:?} != {canonical:?}")]
    HeadingMismatch { heading: String, canonical: String },

    #[error("Filename stem does not match canonical title: {stem:?} != {canonical:?}")]
    StemMismatch { stem: String, canonical: String },

    #[error(
        "H1 does not match canonical title: {heading:?} != {canonical:?}; \
         filename stem does not match canonical title: {stem:?} != {canonical:?}"
    )]
    IdentityMismatch {
        heading: String,
        stem: String,
        canonical: String,
    },

    #[error("Cannot rename file; target already exists: {}", .0.display())]
    RenameCollision(PathBuf),

    #[error("Could not update {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A repair applied while resolving a document's identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleFix {
    HeadingRewritten { path: PathBuf, title: String },
    FileRenamed { from: PathBuf, to: PathBuf },
}

impl fmt::Display for TitleFix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TitleFix::HeadingRewritten { path, title } => {
                write!(f, "{}: H1 rewritten to {title:?}", path.display())
            }
            TitleFix::FileRenamed { from, to } => {
                write!(f, "renamed {} → {}", from.display(), to.display())
            }
        }
    }
}

/// Outcome of identity resolution for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleResolution {
    pub canonical: String,
    /// The document after any rename.
    pub file: RoomFile,
    pub fixes: Vec<TitleFix>,
}

/// Derives the canonical title from a raw `#` heading.
///
/// The heading is accepted as is when it matches the schema pattern, or with
/// the world prefix prepended when only that form matches.
pub fn canonicalize_title(heading: &str, schema: &RoomSchema) -> Result<String, TitleError> {
    let heading = heading.trim();
    if schema.title_matches(heading) {
        return Ok(heading.to_string());
    }

    let prefixed = format!("{TITLE_PREFIX}{heading}");
    if schema.title_matches(&prefixed) {
        return Ok(prefixed);
    }

    Err(TitleError::NotCanonicalizable {
        heading: heading.to_string(),
        pattern: schema.title_pattern().to_string(),
    })
}

/// Checks heading and stem against the canonical title without touching disk.
pub fn check_identity(heading: &str, stem: &str, canonical: &str) -> Result<(), TitleError> {
    let (heading, stem) = (heading.trim(), stem.trim());
    let canonical = canonical.to_string();
    match (heading == canonical, stem == canonical) {
        (true, true) => Ok(()),
        (false, true) => Err(TitleError::HeadingMismatch {
            heading: heading.to_string(),
            canonical,
        }),
        (true, false) => Err(TitleError::StemMismatch {
            stem: stem.to_string(),
            canonical,
        }),
        (false, false) => Err(TitleError::IdentityMismatch {
            heading: heading.to_string(),
            stem: stem.to_string(),
            canonical,
        }),
    }
}

/// Resolves the canonical title of `file` and enforces the identity invariant.
///
/// With `fix_titles`, the heading is rewritten first and the file renamed
/// second, so the returned [`TitleResolution::file`] is where the document now
/// lives. A rename that would collide fails before either write happens.
pub fn resolve_identity(
    file: &RoomFile,
    heading: &str,
    schema: &RoomSchema,
    fix_titles: bool,
) -> Result<TitleResolution, TitleError> {
    let canonical = canonicalize_title(heading, schema)?;

    if !fix_titles {
        check_identity(heading, file.stem(), &canonical)?;
        return Ok(TitleResolution {
            canonical,
            file: file.clone(),
            fixes: vec![],
        });
    }

    let needs_rename = file.stem().trim() != canonical;
    if needs_rename {
        let target = file.sibling_named(&canonical);
        if target != file.path() && target.exists() {
            return Err(TitleError::RenameCollision(target));
        }
    }

    let mut fixes = Vec::new();
    if heading.trim() != canonical && rewrite_heading(file.path(), &canonical)? {
        log::info!("FIXED: {}: H1 rewritten to '{canonical}'", file.path().display());
        fixes.push(TitleFix::HeadingRewritten {
            path: file.path().to_path_buf(),
            title: canonical.clone(),
        });
    }

    let mut resolved = file.clone();
    if needs_rename {
        resolved = rename_to_title(file, &canonical)?;
        log::info!(
            "FIXED: renamed '{}' → '{}'",
            file.path().display(),
            resolved.path().display()
        );
        fixes.push(TitleFix::FileRenamed {
            from: file.path().to_path_buf(),
            to: resolved.path().to_path_buf(),
        });
    }

    Ok(TitleResolution {
        canonical,
        file: resolved,
        fixes,
    })
}

/// Replaces the first `#` heading with `# {title}`, keeping every other byte.
///
/// Inserts a heading after any leading blank lines when there is none.
/// Returns whether the file changed.
pub fn rewrite_heading(path: &Path, title: &str) -> Result<bool, TitleError> {
    let io_err = |source| TitleError::Io {
        path: path.to_path_buf(),
        source,
    };
    let text = fs::read_to_string(path).map_err(io_err)?;
    let heading = format!("{} {title}", HeadingClassifier::TITLE_MARKER);
    let classifier = HeadingClassifier;

    let mut lines: Vec<String> = text.split_inclusive('\n').map(str::to_string).collect();
    let title_line = lines.iter().position(|line| {
        matches!(
            classifier.classify(line.trim_end_matches(['\r', '\n'])),
            LineClass::Title(_)
        )
    });

    match title_line {
        Some(idx) => {
            let line = &lines[idx];
            let body = line.trim_end_matches(['\r', '\n']);
            if body == heading {
                return Ok(false);
            }
            let ending = &line[body.len()..];
            lines[idx] = format!("{heading}{ending}");
        }
        None => {
            let insert_at = lines
                .iter()
                .position(|line| !line.trim().is_empty())
                .unwrap_or(lines.len());
            lines.insert(insert_at, format!("{heading}\n"));
        }
    }

    fs::write(path, lines.concat()).map_err(io_err)?;
    Ok(true)
}

/// Moves `file` to `<canonical>.<ext>` in the same directory.
///
/// Fails without touching anything if the target already exists.
pub fn rename_to_title(file: &RoomFile, canonical: &str) -> Result<RoomFile, TitleError> {
    let target = file.sibling_named(canonical);
    if target == file.path() {
        return Ok(file.clone());
    }
    if target.exists() {
        return Err(TitleError::RenameCollision(target));
    }
    fs::rename(file.path(), &target).map_err(|source| TitleError::Io {
        path: file.path().to_path_buf(),
        source,
    })?;
    Ok(RoomFile::new(target))
}
