//! Massif output writer.
//!
//! Sorts the combined snapshots by time, renumbers them from 0 and
//! writes headers followed by one block per snapshot. The time value
//! inside each body is left untouched.

use crate::parser::schema::{Document, Snapshot};
use crate::utils::config::{SNAPSHOT_DELIMITER, SNAPSHOT_INDEX_PREFIX};
use crate::utils::error::OutputError;
use log::{debug, info, warn};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Serialize a document to any writer
///
/// **Public** - core serializer, used by `write_massif` and tests
///
/// # Returns
/// Number of snapshots written
///
/// # Errors
/// * `OutputError::EmptyDocument` - Nothing to write; writer untouched
/// * `OutputError::SinkWriteError` - Write failed midway
/// * `OutputError::SinkFinalizeError` - Final flush failed
pub fn serialize_document<W: Write>(
    mut document: Document,
    writer: &mut W,
) -> Result<usize, OutputError> {
    if document.is_empty() {
        return Err(OutputError::EmptyDocument);
    }

    document.sort_snapshots();
    write_body(&document, writer).map_err(OutputError::SinkWriteError)?;
    writer.flush().map_err(OutputError::SinkFinalizeError)?;

    Ok(document.snapshots.len())
}

/// Write a combined document to a new massif file
///
/// **Public** - main entry point for massif output
///
/// # Arguments
/// * `document` - Combined document, consumed
/// * `output_path` - Destination file
///
/// # Returns
/// Number of snapshots written
///
/// # Errors
/// * `OutputError::EmptyDocument` - Nothing to write; no file is created
/// * `OutputError::InvalidPath` - Path is empty
/// * `OutputError::SinkUnavailable` - Path is a directory or cannot be created
/// * `OutputError::SinkWriteError` - Write failed midway
/// * `OutputError::SinkFinalizeError` - Flush or sync on close failed
pub fn write_massif(document: Document, output_path: impl AsRef<Path>) -> Result<usize, OutputError> {
    let output_path = output_path.as_ref();

    if document.is_empty() {
        warn!("No content, nothing written to {}", output_path.display());
        return Err(OutputError::EmptyDocument);
    }

    info!("Writing combined massif file to: {}", output_path.display());

    super::validate_path(output_path)?;
    super::create_parent_dirs(output_path)?;

    let file = File::create(output_path).map_err(|source| OutputError::SinkUnavailable {
        path: output_path.to_path_buf(),
        source,
    })?;

    let mut writer = BufWriter::new(file);
    let written = serialize_document(document, &mut writer)?;

    let file = writer
        .into_inner()
        .map_err(|e| OutputError::SinkFinalizeError(e.into_error()))?;
    file.sync_all().map_err(OutputError::SinkFinalizeError)?;

    debug!("Wrote {} snapshots", written);

    Ok(written)
}

/// Headers, then one block per snapshot in current order
///
/// **Private** - assumes snapshots are already sorted
fn write_body<W: Write>(document: &Document, writer: &mut W) -> io::Result<()> {
    for header in &document.headers {
        write_line(writer, header)?;
    }

    for (index, snapshot) in document.snapshots.iter().enumerate() {
        write_snapshot(writer, index, snapshot)?;
    }

    Ok(())
}

fn write_snapshot<W: Write>(writer: &mut W, index: usize, snapshot: &Snapshot) -> io::Result<()> {
    write_line(writer, SNAPSHOT_DELIMITER)?;
    write_line(writer, format!("{}{}", SNAPSHOT_INDEX_PREFIX, index).as_bytes())?;
    write_line(writer, SNAPSHOT_DELIMITER)?;

    for line in &snapshot.body {
        write_line(writer, line)?;
    }

    Ok(())
}

fn write_line<W: Write>(writer: &mut W, line: &[u8]) -> io::Result<()> {
    writer.write_all(line)?;
    writer.write_all(b"\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Writer that accepts a fixed number of bytes, then fails
    struct LimitedWriter {
        remaining: usize,
        fail_flush: bool,
    }

    impl Write for LimitedWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.remaining == 0 {
                return Err(io::Error::new(io::ErrorKind::WriteZero, "sink full"));
            }
            let n = buf.len().min(self.remaining);
            self.remaining -= n;
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            if self.fail_flush {
                return Err(io::Error::new(io::ErrorKind::Other, "flush failed"));
            }
            Ok(())
        }
    }

    fn sample_document() -> Document {
        let mut doc = Document::new();
        doc.headers.push(b"desc: x".to_vec());
        doc.commit(Snapshot {
            time: Some(100),
            body: vec![b"time=100".to_vec()],
        });
        doc
    }

    #[test]
    fn test_empty_document_leaves_writer_untouched() {
        let mut out = Vec::new();
        let err = serialize_document(Document::new(), &mut out).unwrap_err();

        assert!(matches!(err, OutputError::EmptyDocument));
        assert!(out.is_empty());
    }

    #[test]
    fn test_write_failure_is_distinct() {
        let mut sink = LimitedWriter {
            remaining: 4,
            fail_flush: false,
        };
        let err = serialize_document(sample_document(), &mut sink).unwrap_err();
        assert!(matches!(err, OutputError::SinkWriteError(_)));
    }

    #[test]
    fn test_flush_failure_is_distinct() {
        let mut sink = LimitedWriter {
            remaining: usize::MAX,
            fail_flush: true,
        };
        let err = serialize_document(sample_document(), &mut sink).unwrap_err();
        assert!(matches!(err, OutputError::SinkFinalizeError(_)));
    }

    #[test]
    fn test_headers_only_document() {
        let mut doc = Document::new();
        doc.headers.push(b"cmd: ./app".to_vec());

        let mut out = Vec::new();
        let written = serialize_document(doc, &mut out).unwrap();

        assert_eq!(written, 0);
        assert_eq!(out, b"cmd: ./app\n");
    }
}
