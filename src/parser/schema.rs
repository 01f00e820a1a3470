//! In-memory model of a massif dump.
//!
//! A `Document` holds the preamble header lines and the snapshots
//! recovered from one or more sources. Lines are raw bytes so payloads
//! in any encoding survive the round trip.

/// One raw line, without its line terminator
pub type Line = Vec<u8>;

/// A single profiler sample
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Value of the first `time=` line in the body, if any
    pub time: Option<u64>,

    /// Lines between the opening delimiter and the next one, verbatim
    pub body: Vec<Line>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sort key; a snapshot without a `time=` line sorts as 0
    pub fn chronological_key(&self) -> u64 {
        self.time.unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Headers plus snapshots, either for one source or fully merged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Preamble lines (`desc:`, `cmd:`, `time_unit:`) in capture order
    pub headers: Vec<Line>,

    /// Snapshots in no particular order until serialization sorts them
    pub snapshots: Vec<Snapshot>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_headers(&self) -> bool {
        !self.headers.is_empty()
    }

    /// A document with neither headers nor snapshots cannot be written
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.snapshots.is_empty()
    }

    /// Store a finished snapshot, dropping it if the body is empty.
    ///
    /// Returns true if the snapshot was kept.
    pub fn commit(&mut self, snapshot: Snapshot) -> bool {
        if snapshot.is_empty() {
            return false;
        }
        self.snapshots.push(snapshot);
        true
    }

    /// Sort snapshots by chronological key, ascending
    pub fn sort_snapshots(&mut self) {
        self.snapshots.sort_by_key(Snapshot::chronological_key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_time_sorts_as_zero() {
        let snapshot = Snapshot {
            time: None,
            body: vec![b"mem_heap_B=1".to_vec()],
        };
        assert_eq!(snapshot.chronological_key(), 0);
    }

    #[test]
    fn test_commit_drops_empty_snapshot() {
        let mut doc = Document::new();
        assert!(!doc.commit(Snapshot::new()));
        assert!(doc.snapshots.is_empty());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_headers_only_document_is_not_empty() {
        let doc = Document {
            headers: vec![b"desc: (none)".to_vec()],
            snapshots: Vec::new(),
        };
        assert!(!doc.is_empty());
        assert!(doc.has_headers());
    }

    #[test]
    fn test_sort_snapshots() {
        let mut doc = Document::new();
        for t in [30, 10, 20] {
            doc.commit(Snapshot {
                time: Some(t),
                body: vec![format!("time={}", t).into_bytes()],
            });
        }
        doc.sort_snapshots();

        let keys: Vec<u64> = doc.snapshots.iter().map(Snapshot::chronological_key).collect();
        assert_eq!(keys, vec![10, 20, 30]);
    }
}
