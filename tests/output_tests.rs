use massif_combine::aggregator::Combiner;
use massif_combine::output::validate_path;
use massif_combine::output::{build_report, read_report, write_massif, write_report};
use massif_combine::parser::{Document, Snapshot};
use massif_combine::utils::error::OutputError;
use pretty_assertions::assert_eq;
use std::path::Path;
use tempfile::NamedTempFile;

fn create_test_document() -> Document {
    let mut doc = Document::new();
    doc.headers.push(b"desc: (none)".to_vec());
    doc.headers.push(b"cmd: ./app".to_vec());
    doc.headers.push(b"time_unit: i".to_vec());
    for time in [2000, 0, 1000] {
        doc.commit(Snapshot {
            time: Some(time),
            body: vec![format!("time={}", time).into_bytes(), b"heap_tree=empty".to_vec()],
        });
    }
    doc
}

#[test]
fn test_write_massif() {
    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();

    let written = write_massif(create_test_document(), path).unwrap();
    assert_eq!(written, 3);

    let content = std::fs::read_to_string(path).unwrap();
    assert_eq!(
        content,
        "desc: (none)\ncmd: ./app\ntime_unit: i\n\
         #-----------\nsnapshot=0\n#-----------\ntime=0\nheap_tree=empty\n\
         #-----------\nsnapshot=1\n#-----------\ntime=1000\nheap_tree=empty\n\
         #-----------\nsnapshot=2\n#-----------\ntime=2000\nheap_tree=empty\n"
    );
}

#[test]
fn test_empty_document_creates_no_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("massif.out.combine");

    let err = write_massif(Document::new(), &path).unwrap_err();

    assert!(matches!(err, OutputError::EmptyDocument));
    assert!(!path.exists());
}

#[test]
fn test_validate_output_path_empty() {
    let result = validate_path(Path::new(""));
    assert!(result.is_err());
}

#[test]
fn test_write_to_directory_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    let err = write_massif(create_test_document(), temp_dir.path()).unwrap_err();
    assert!(matches!(err, OutputError::SinkUnavailable { .. }));
}

#[test]
fn test_uncreatable_parent_is_sink_unavailable() {
    let temp_file = NamedTempFile::new().unwrap();
    // Parent "directory" is a regular file
    let path = temp_file.path().join("massif.out.combine");

    let err = write_massif(create_test_document(), &path).unwrap_err();
    assert!(matches!(err, OutputError::SinkUnavailable { .. }));
    assert!(!path.exists());
}

#[cfg(target_os = "linux")]
#[test]
fn test_full_device_is_finalize_error() {
    // Small writes are buffered, so the failure surfaces when closing
    let err = write_massif(create_test_document(), "/dev/full").unwrap_err();
    assert!(matches!(err, OutputError::SinkFinalizeError(_)));
}

#[test]
fn test_write_creates_parent_dirs() {
    let temp_dir = tempfile::tempdir().unwrap();
    let nested_path = temp_dir.path().join("nested/dirs/massif.out.combine");

    write_massif(create_test_document(), &nested_path).unwrap();

    assert!(nested_path.exists());
}

#[test]
fn test_write_and_read_report() {
    let mut combiner = Combiner::new();
    combiner
        .add_reader(
            "massif.out.1",
            "cmd: x\n#-----------\nsnapshot=0\n#-----------\ntime=1\n".as_bytes(),
        )
        .unwrap();
    let _ = combiner.add_path("/nonexistent/massif.out.2");

    let report = build_report(Path::new("massif.out.combine"), combiner.outcomes(), 1, 1);
    let temp_file = NamedTempFile::new().unwrap();
    write_report(&report, temp_file.path()).unwrap();

    let loaded = read_report(temp_file.path()).unwrap();
    assert_eq!(loaded.version, "1.0.0");
    assert_eq!(loaded.total_snapshots, 1);
    assert_eq!(loaded.inputs.len(), 2);
    assert!(loaded.inputs[0].supplied_headers);
    assert_eq!(loaded.inputs[0].error, None);
    assert!(loaded.inputs[1].error.is_some());
}

#[cfg(target_os = "linux")]
#[test]
fn test_report_flush_failure_is_reported() {
    let report = build_report(Path::new("massif.out.combine"), &[], 0, 0);
    let err = write_report(&report, "/dev/full").unwrap_err();
    assert!(matches!(err, OutputError::SinkFinalizeError(_)));
}
