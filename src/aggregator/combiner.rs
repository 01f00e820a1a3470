//! Merge snapshots from several massif sources into one document.
//!
//! Every source contributes its snapshots. Headers describe the profiled
//! process, which is the same across sources, so only the first source
//! that has any gets to contribute them.

use crate::parser::{parse_massif, Document};
use crate::utils::error::CombineError;
use log::{debug, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// What one source contributed to the combined document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceOutcome {
    /// Source path as given
    pub path: PathBuf,

    /// Snapshots committed from this source (including those committed
    /// before a parse error)
    pub snapshots_added: usize,

    /// Whether this source supplied the document headers
    pub captured_headers: bool,

    /// Error message if the source failed
    pub error: Option<String>,
}

/// Accumulates sources into a single owned `Document`
#[derive(Debug, Default)]
pub struct Combiner {
    document: Document,
    outcomes: Vec<SourceOutcome>,
}

impl Combiner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Combined document so far
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Per-source results, in the order sources were added
    pub fn outcomes(&self) -> &[SourceOutcome] {
        &self.outcomes
    }

    /// Hand the document over for serialization
    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn into_parts(self) -> (Document, Vec<SourceOutcome>) {
        (self.document, self.outcomes)
    }

    /// Parse one already-opened source
    ///
    /// Headers are captured only while the document has none.
    ///
    /// # Errors
    /// * `CombineError::Parse` - Source is malformed or unreadable midway.
    ///   Snapshots committed before the error are kept.
    pub fn add_reader<R: BufRead>(
        &mut self,
        path: impl AsRef<Path>,
        reader: R,
    ) -> Result<(), CombineError> {
        let path = path.as_ref();
        let capture_headers = !self.document.has_headers();
        let snapshots_before = self.document.snapshots.len();

        let result = parse_massif(reader, &mut self.document, capture_headers);

        let snapshots_added = self.document.snapshots.len() - snapshots_before;
        let captured_headers = capture_headers && self.document.has_headers();

        let result = result.map_err(|source| CombineError::Parse {
            path: path.to_path_buf(),
            source,
        });

        self.outcomes.push(SourceOutcome {
            path: path.to_path_buf(),
            snapshots_added,
            captured_headers,
            error: result.as_ref().err().map(ToString::to_string),
        });

        result
    }

    /// Open and parse a source file
    ///
    /// # Errors
    /// * `CombineError::SourceUnavailable` - File cannot be opened
    /// * `CombineError::Parse` - See [`Combiner::add_reader`]
    pub fn add_path(&mut self, path: impl AsRef<Path>) -> Result<(), CombineError> {
        let path = path.as_ref();

        let file = match File::open(path) {
            Ok(file) => file,
            Err(source) => {
                let err = CombineError::SourceUnavailable {
                    path: path.to_path_buf(),
                    source,
                };
                self.outcomes.push(SourceOutcome {
                    path: path.to_path_buf(),
                    snapshots_added: 0,
                    captured_headers: false,
                    error: Some(err.to_string()),
                });
                return Err(err);
            }
        };

        self.add_reader(path, BufReader::new(file))
    }

    /// Add every source in order, best effort
    ///
    /// A failing source does not stop the remaining ones. If any source
    /// failed, the last error encountered is returned.
    pub fn add_all<I, P>(&mut self, paths: I) -> Result<(), CombineError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut last_error = None;

        for path in paths {
            let path = path.as_ref();
            if let Err(e) = self.add_path(path) {
                if e.is_malformed() {
                    warn!("{} is not valid massif output: {}", path.display(), e);
                } else {
                    warn!("Skipping {}: {}", path.display(), e);
                }
                last_error = Some(e);
            }
            debug!(
                "Input: {}  Size: {}",
                path.display(),
                self.document.snapshots.len()
            );
        }

        match last_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
