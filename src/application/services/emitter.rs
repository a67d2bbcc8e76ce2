//! Tree-to-diagram emitter service
//!
//! Locates one line of a tree-bank file, parses it and writes the TikZ
//! document for it. The document is rendered completely in memory before the
//! output file is touched, so a failing line never leaves partial output.

use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::application::render::render_document;
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{DomainError, Record, Tree, PARSE_ESCAPES};
use crate::infrastructure::traits::FileSystem;

/// Summary of one emitted document.
#[derive(Debug, Clone)]
pub struct EmitReport {
    /// Where the document was written
    pub output: PathBuf,
    /// Parsed tree (literal text, not escaped)
    pub tree: Tree,
    pub height: usize,
    pub leaf_count: usize,
    pub token_count: usize,
}

/// Service rendering one tree-bank line into a standalone document.
pub struct EmitterService {
    fs: Arc<dyn FileSystem>,
    settings: Arc<Settings>,
}

impl EmitterService {
    /// Create a new emitter service.
    pub fn new(fs: Arc<dyn FileSystem>, settings: Arc<Settings>) -> Self {
        Self { fs, settings }
    }

    /// Return line `index` (zero-based) of `path` without its line ending.
    pub fn read_line(&self, path: &Path, index: usize) -> ApplicationResult<String> {
        let reader = self
            .fs
            .open_buffered(path)
            .map_err(|source| ApplicationError::InputUnreadable {
                path: path.to_path_buf(),
                source,
            })?;

        // Only the selected line is decoded; other lines may hold any bytes.
        let mut line_count = 0;
        for bytes in reader.split(b'\n') {
            let mut bytes = bytes.with_path_context("read line", path)?;
            if line_count == index {
                if bytes.last() == Some(&b'\r') {
                    bytes.pop();
                }
                return String::from_utf8(bytes).map_err(|_| {
                    ApplicationError::Domain(DomainError::MalformedRecord {
                        message: "line is not valid UTF-8".to_string(),
                    })
                });
            }
            line_count += 1;
        }

        Err(ApplicationError::LineNotFound {
            path: path.to_path_buf(),
            index,
            line_count,
        })
    }

    /// Read, split and parse line `index` of `path`.
    pub fn load(&self, path: &Path, index: usize) -> ApplicationResult<(Record, Tree)> {
        let line = self.read_line(path, index)?;
        let record = Record::parse(&line)?;
        debug!("load: {} token(s), tree text {:?}", record.tokens.len(), record.tree_text);

        let tree = Tree::parse_escaped(&record.tree_text, &PARSE_ESCAPES)?;
        debug!("load: parsed {}", tree);
        Ok((record, tree))
    }

    /// Render line `index` of `path` to the configured output file.
    pub fn emit(&self, path: &Path, index: usize) -> ApplicationResult<EmitReport> {
        debug!("emit: file={}, line={}", path.display(), index);
        let (record, tree) = self.load(path, index)?;

        let document = render_document(
            &tree,
            &record,
            &self.settings.layout,
            &self.settings.cjk_font,
        )?;

        let output = self.settings.output.clone();
        self.fs
            .write(&output, &document)
            .map_err(|source| ApplicationError::OutputUnwritable {
                path: output.clone(),
                source,
            })?;
        info!("emit: wrote {} ({} bytes)", output.display(), document.len());

        Ok(EmitReport {
            output,
            height: tree.height(),
            leaf_count: tree.leaves().len(),
            token_count: record.tokens.len(),
            tree,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::{self, BufRead, Cursor};
    use std::sync::Mutex;

    /// In-memory filesystem recording writes.
    #[derive(Default)]
    struct MemoryFileSystem {
        files: Mutex<HashMap<PathBuf, String>>,
    }

    impl MemoryFileSystem {
        fn with_file(path: &str, content: &str) -> Self {
            let fs = Self::default();
            fs.files
                .lock()
                .unwrap()
                .insert(PathBuf::from(path), content.to_string());
            fs
        }

        fn get(&self, path: &str) -> Option<String> {
            self.files.lock().unwrap().get(Path::new(path)).cloned()
        }
    }

    impl FileSystem for MemoryFileSystem {
        fn open_buffered(&self, path: &Path) -> io::Result<Box<dyn BufRead>> {
            let content = self
                .files
                .lock()
                .unwrap()
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))?;
            Ok(Box::new(Cursor::new(content.into_bytes())))
        }

        fn write(&self, path: &Path, content: &str) -> io::Result<()> {
            self.files
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), content.to_string());
            Ok(())
        }
    }

    const BANK: &str = "(S (A a) (B b)) ||||| a b\n(S (X x) (Y y) (Z z)) ||||| x y z\nno delimiter here\n";

    fn service(fs: Arc<MemoryFileSystem>) -> EmitterService {
        EmitterService::new(fs, Arc::new(Settings::default()))
    }

    #[test]
    fn test_read_line_selects_by_zero_based_index() {
        let fs = Arc::new(MemoryFileSystem::with_file("bank.txt", BANK));
        let svc = service(fs);
        assert_eq!(
            svc.read_line(Path::new("bank.txt"), 1).unwrap(),
            "(S (X x) (Y y) (Z z)) ||||| x y z"
        );
    }

    #[test]
    fn test_read_line_past_end_reports_line_count() {
        let fs = Arc::new(MemoryFileSystem::with_file("bank.txt", BANK));
        let err = service(fs).read_line(Path::new("bank.txt"), 3).unwrap_err();
        match err {
            ApplicationError::LineNotFound {
                index, line_count, ..
            } => {
                assert_eq!(index, 3);
                assert_eq!(line_count, 3);
            }
            other => panic!("expected LineNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_emit_writes_document_to_configured_output() {
        let fs = Arc::new(MemoryFileSystem::with_file("bank.txt", BANK));
        let report = service(Arc::clone(&fs)).emit(Path::new("bank.txt"), 1).unwrap();

        assert_eq!(report.output, PathBuf::from("tree.tex"));
        assert_eq!(report.height, 3);
        assert_eq!(report.leaf_count, 3);
        assert_eq!(report.token_count, 3);

        let doc = fs.get("tree.tex").unwrap();
        assert!(doc.contains(r"\node(n0) {x};"));
        assert!(doc.contains(r"\node(n1) {z};"));
        assert!(doc.contains(r"\node () at ($(s0)!0.5!(s1)$) {y};"));
    }

    #[test]
    fn test_emit_malformed_record_writes_nothing() {
        let fs = Arc::new(MemoryFileSystem::with_file("bank.txt", BANK));
        let err = service(Arc::clone(&fs))
            .emit(Path::new("bank.txt"), 2)
            .unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::MalformedRecord { .. })
        ));
        assert!(fs.get("tree.tex").is_none());
    }

    #[test]
    fn test_emit_missing_file_is_input_unreadable() {
        let fs = Arc::new(MemoryFileSystem::default());
        let err = service(fs).emit(Path::new("nope.txt"), 0).unwrap_err();
        assert!(matches!(err, ApplicationError::InputUnreadable { .. }));
    }
}
