//! Result store: one JSON document per record id plus a session index.

use std::fs;
use std::path::{Path, PathBuf};

use retinascan_core::AnalysisResult;
use tracing::info;

use crate::StoreError;

/// Persisted store of analysis results.
///
/// Each record is written as `<id>.json` under the data directory; writes
/// to an existing id overwrite it (last-write-wins is the only consistency
/// guarantee). Reads go to disk, so records persist across sessions, while
/// [`list`](Self::list) covers only records inserted since [`open`](Self::open)
/// — the history view is session-scoped.
///
/// Single-session access only; there is no cross-process coordination.
pub struct ResultStore {
    root: PathBuf,
    session: Vec<AnalysisResult>,
}

impl ResultStore {
    /// Open a store rooted at the given directory, creating it if needed.
    pub fn open(root: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(root)?;
        Ok(Self {
            root: root.to_path_buf(),
            session: Vec::new(),
        })
    }

    /// Persist a record and add it to the session index.
    ///
    /// An existing record with the same id is replaced in both places.
    pub fn insert(&mut self, record: AnalysisResult) -> Result<(), StoreError> {
        let path = self.record_path(&record.id)?;
        let doc = serde_json::to_vec(&record)?;
        fs::write(&path, doc)?;

        self.session.retain(|r| r.id != record.id);
        info!(id = %record.id, grade = record.grade.number(), "stored analysis result");
        self.session.push(record);
        Ok(())
    }

    /// Fetch a persisted record by id.
    ///
    /// The persisted document is authoritative: a record deleted from disk
    /// is gone even if the session index still saw it this session.
    pub fn get(&self, id: &str) -> Result<AnalysisResult, StoreError> {
        let path = self.record_path(id)?;
        let doc = match fs::read(&path) {
            Ok(doc) => doc,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(id.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_slice(&doc)?)
    }

    /// Records inserted this session, in insertion order.
    pub fn list(&self) -> &[AnalysisResult] {
        &self.session
    }

    /// Remove a record from the session index and from disk.
    ///
    /// Deleting an id that was never stored is not an error.
    pub fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let path = self.record_path(id)?;
        self.session.retain(|r| r.id != id);
        match fs::remove_file(&path) {
            Ok(()) => {
                info!(id = %id, "deleted analysis result");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Resolve the document path for an id.
    ///
    /// Ids are restricted to `[A-Za-z0-9_-]` so a crafted id cannot name a
    /// path outside the data directory.
    fn record_path(&self, id: &str) -> Result<PathBuf, StoreError> {
        if id.is_empty()
            || !id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(StoreError::InvalidId(id.to_string()));
        }
        Ok(self.root.join(format!("{id}.json")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use retinascan_core::Grade;

    fn sample(id: &str) -> AnalysisResult {
        AnalysisResult {
            id: id.to_string(),
            image_url: "file:///scans/fundus.png".into(),
            grade: Grade::Mild,
            confidence: 0.78,
            timestamp: "2026-08-07T10:15:00.000Z".into(),
            patient_id: Some("P-0007".into()),
        }
    }

    #[test]
    fn insert_then_get_round_trips_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ResultStore::open(dir.path()).unwrap();

        let record = sample("1754560000123");
        store.insert(record.clone()).unwrap();

        let fetched = store.get("1754560000123").unwrap();
        assert_eq!(fetched, record);
    }

    #[test]
    fn get_missing_id_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::open(dir.path()).unwrap();

        let err = store.get("1754560000123").unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn delete_then_get_always_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ResultStore::open(dir.path()).unwrap();

        store.insert(sample("42")).unwrap();
        store.delete("42").unwrap();

        assert!(matches!(store.get("42"), Err(StoreError::NotFound(_))));
        assert!(store.list().iter().all(|r| r.id != "42"));
    }

    #[test]
    fn delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ResultStore::open(dir.path()).unwrap();

        store.delete("never-stored").unwrap();
        store.insert(sample("42")).unwrap();
        store.delete("42").unwrap();
        store.delete("42").unwrap();
    }

    #[test]
    fn list_is_session_scoped() {
        let dir = tempfile::tempdir().unwrap();

        {
            let mut store = ResultStore::open(dir.path()).unwrap();
            store.insert(sample("1")).unwrap();
            store.insert(sample("2")).unwrap();
            assert_eq!(store.list().len(), 2);
        }

        // A reopened store lists nothing but still serves persisted reads.
        let store = ResultStore::open(dir.path()).unwrap();
        assert!(store.list().is_empty());
        assert_eq!(store.get("1").unwrap().id, "1");
    }

    #[test]
    fn same_id_insert_is_last_write_wins() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ResultStore::open(dir.path()).unwrap();

        store.insert(sample("7")).unwrap();
        let mut newer = sample("7");
        newer.grade = Grade::Severe;
        newer.confidence = 0.99;
        store.insert(newer.clone()).unwrap();

        assert_eq!(store.get("7").unwrap(), newer);
        assert_eq!(store.list().len(), 1);
        assert_eq!(store.list()[0].grade, Grade::Severe);
    }

    #[test]
    fn list_preserves_insertion_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ResultStore::open(dir.path()).unwrap();

        store.insert(sample("b")).unwrap();
        store.insert(sample("a")).unwrap();
        store.insert(sample("c")).unwrap();

        let ids: Vec<&str> = store.list().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["b", "a", "c"]);
    }

    #[test]
    fn path_escaping_ids_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ResultStore::open(dir.path()).unwrap();

        assert!(matches!(
            store.get("../outside"),
            Err(StoreError::InvalidId(_))
        ));
        assert!(matches!(store.get(""), Err(StoreError::InvalidId(_))));
        assert!(matches!(
            store.delete("a/b"),
            Err(StoreError::InvalidId(_))
        ));
    }

    #[test]
    fn malformed_document_surfaces_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::open(dir.path()).unwrap();

        fs::write(dir.path().join("bad.json"), b"{not json").unwrap();
        assert!(matches!(store.get("bad"), Err(StoreError::Json(_))));
    }
}
