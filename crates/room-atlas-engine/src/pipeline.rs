//! Batch normalization of room documents.
//!
//! Each document goes through block splitting, identity resolution, section
//! dispatch and record assembly on its own. A failing document is recorded
//! and the batch moves on, unless fail-fast is requested.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::io::{self, DEFAULT_GLOB, IoError};
use crate::models::{NormalizedRoom, RoomFile};
use crate::parsing::{SectionError, StructureError, parse_document, parse_sections};
use crate::schema::RoomSchema;
use crate::title::{TitleError, TitleFix, canonicalize_title, check_identity, resolve_identity};

/// A per-document failure, tagged with the document it came from.
#[derive(Debug, Error)]
#[error("{}: {kind}", path.display())]
pub struct DocumentError {
    pub path: PathBuf,
    pub kind: DocumentErrorKind,
}

#[derive(Debug, Error)]
pub enum DocumentErrorKind {
    #[error(transparent)]
    Structure(#[from] StructureError),
    #[error(transparent)]
    Section(#[from] SectionError),
    #[error(transparent)]
    Title(#[from] TitleError),
    #[error(transparent)]
    Io(#[from] IoError),
    #[error("Output {} was already written by another document in this run", .0.display())]
    OutputCollision(PathBuf),
}

impl DocumentError {
    fn new(path: &Path, kind: impl Into<DocumentErrorKind>) -> Self {
        Self {
            path: path.to_path_buf(),
            kind: kind.into(),
        }
    }
}

/// Run-level failures; nothing per-document has been reported when these occur.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Io(#[from] IoError),
    #[error("No room documents found under {} matching {pattern}", dir.display())]
    NoDocuments { dir: PathBuf, pattern: String },
}

#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    pub rooms_dir: PathBuf,
    pub out_dir: PathBuf,
    pub glob: String,
    pub fail_fast: bool,
    pub fix_titles: bool,
}

impl NormalizeOptions {
    pub fn new(rooms_dir: impl Into<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            rooms_dir: rooms_dir.into(),
            out_dir: out_dir.into(),
            glob: DEFAULT_GLOB.to_string(),
            fail_fast: false,
            fix_titles: false,
        }
    }
}

/// Outcome of a batch run. Failures are listed in document path order.
#[derive(Debug, Default)]
pub struct RunReport {
    pub total: usize,
    pub written: Vec<PathBuf>,
    pub failures: Vec<DocumentError>,
    pub fixes: Vec<TitleFix>,
    /// Fail-fast stopped the run before every document was attempted.
    pub stopped_early: bool,
}

impl RunReport {
    pub fn ok_count(&self) -> usize {
        self.written.len()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Normalizes document text under `stem` without touching disk.
///
/// Identity is checked strictly: heading and stem must already equal the
/// canonical title.
pub fn normalize_text(text: &str, stem: &str, schema: &RoomSchema) -> Result<NormalizedRoom, DocumentErrorKind> {
    let doc = parse_document(text, schema)?;
    let canonical = canonicalize_title(&doc.title, schema)?;
    check_identity(&doc.title, stem, &canonical)?;
    let sections = parse_sections(&doc, schema)?;
    Ok(NormalizedRoom::new(canonical, sections, schema.section_order().to_vec()))
}

/// A normalized document together with where it now lives.
#[derive(Debug, Clone)]
pub struct NormalizedDocument {
    pub room: NormalizedRoom,
    pub file: RoomFile,
    pub fixes: Vec<TitleFix>,
}

/// Reads and normalizes one document, resolving its identity first.
///
/// With `fix_titles`, the heading may be rewritten and the file renamed before
/// sections are parsed.
pub fn normalize_document(
    path: &Path,
    schema: &RoomSchema,
    fix_titles: bool,
) -> Result<NormalizedDocument, DocumentError> {
    let text = io::read_document(path).map_err(|e| DocumentError::new(path, e))?;
    let doc = parse_document(&text, schema).map_err(|e| DocumentError::new(path, e))?;

    let resolution = resolve_identity(&RoomFile::from(path), &doc.title, schema, fix_titles)
        .map_err(|e| DocumentError::new(path, e))?;

    let sections = parse_sections(&doc, schema).map_err(|e| DocumentError::new(resolution.file.path(), e))?;
    let room = NormalizedRoom::new(resolution.canonical, sections, schema.section_order().to_vec());

    Ok(NormalizedDocument {
        room,
        file: resolution.file,
        fixes: resolution.fixes,
    })
}

/// Normalizes a batch of room documents into JSON records.
pub struct Pipeline<'a> {
    schema: &'a RoomSchema,
    options: NormalizeOptions,
}

impl<'a> Pipeline<'a> {
    pub fn new(schema: &'a RoomSchema, options: NormalizeOptions) -> Self {
        Self { schema, options }
    }

    /// Discovers documents and normalizes each one, writing a record per success.
    pub fn run(&self) -> Result<RunReport, RunError> {
        let paths = io::scan_documents(&self.options.rooms_dir, &self.options.glob)?;
        if paths.is_empty() {
            return Err(RunError::NoDocuments {
                dir: self.options.rooms_dir.clone(),
                pattern: self.options.glob.clone(),
            });
        }
        Ok(self.run_paths(&paths))
    }

    /// Normalizes the given documents in path order.
    pub fn run_paths(&self, paths: &[PathBuf]) -> RunReport {
        let mut paths = paths.to_vec();
        paths.sort();

        let mut report = RunReport {
            total: paths.len(),
            ..RunReport::default()
        };
        let mut outputs: HashSet<String> = HashSet::new();

        for path in &paths {
            log::debug!("normalizing {}", path.display());
            match self.process(path, &mut outputs) {
                Ok((written, fixes)) => {
                    report.written.push(written);
                    report.fixes.extend(fixes);
                }
                Err(err) => {
                    log::warn!("{err}");
                    report.failures.push(err);
                    if self.options.fail_fast {
                        report.stopped_early = report.failures.len() + report.written.len() < report.total;
                        break;
                    }
                }
            }
        }

        log::info!("normalized {} / {} document(s)", report.ok_count(), report.total);
        report
    }

    fn process(&self, path: &Path, outputs: &mut HashSet<String>) -> Result<(PathBuf, Vec<TitleFix>), DocumentError> {
        let normalized = normalize_document(path, self.schema, self.options.fix_titles)?;

        let record_name = normalized.file.record_name();
        if !outputs.insert(record_name.clone()) {
            return Err(DocumentError::new(
                normalized.file.path(),
                DocumentErrorKind::OutputCollision(self.options.out_dir.join(record_name)),
            ));
        }

        let written = io::write_record(&self.options.out_dir, &record_name, &normalized.room)
            .map_err(|e| DocumentError::new(normalized.file.path(), e))?;
        Ok((written, normalized.fixes))
    }
}
