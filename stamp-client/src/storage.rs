//! Local storage for fetched stamp records

use sled::Db;
use stamp_core::StampRecord;

use crate::{ClientError, Result};

/// Storage for stamp records, keyed by stamp id
pub struct RecordStorage {
    db: Db,
}

impl RecordStorage {
    /// Open or create a record storage at the given path
    pub fn open(path: &std::path::Path) -> Result<Self> {
        let db = sled::open(path)
            .map_err(|e| ClientError::Storage(format!("Failed to open database: {}", e)))?;

        Ok(Self { db })
    }

    /// Store a stamp record, replacing any earlier snapshot
    pub fn store(&self, record: &StampRecord) -> Result<()> {
        let value = serde_json::to_vec(record)
            .map_err(|e| ClientError::Storage(format!("Failed to serialize record: {}", e)))?;

        self.db
            .insert(record.stamp_id().as_bytes(), value)
            .map_err(|e| ClientError::Storage(format!("Failed to store record: {}", e)))?;

        self.db
            .flush()
            .map_err(|e| ClientError::Storage(format!("Failed to flush database: {}", e)))?;

        Ok(())
    }

    /// Retrieve a stamp record
    pub fn get(&self, stamp_id: &str) -> Result<Option<StampRecord>> {
        let value = self
            .db
            .get(stamp_id.as_bytes())
            .map_err(|e| ClientError::Storage(format!("Failed to retrieve record: {}", e)))?;

        match value {
            Some(bytes) => {
                let record = serde_json::from_slice(&bytes).map_err(|e| {
                    ClientError::Storage(format!("Failed to deserialize record: {}", e))
                })?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    /// List all stored records, ordered by stamp id
    pub fn list(&self) -> Result<Vec<StampRecord>> {
        let mut records = Vec::new();

        for item in self.db.iter() {
            let (_, value) = item
                .map_err(|e| ClientError::Storage(format!("Failed to iterate database: {}", e)))?;

            let record = serde_json::from_slice(&value)
                .map_err(|e| ClientError::Storage(format!("Failed to deserialize record: {}", e)))?;

            records.push(record);
        }

        Ok(records)
    }

    /// Export a record as pretty-printed JSON
    pub fn export_json(&self, stamp_id: &str) -> Result<String> {
        let record = self
            .get(stamp_id)?
            .ok_or_else(|| ClientError::Storage(format!("Record not found: {}", stamp_id)))?;

        serde_json::to_string_pretty(&record)
            .map_err(|e| ClientError::Storage(format!("Failed to serialize record: {}", e)))
    }

    /// Import a record from JSON, returning its stamp id
    pub fn import_json(&self, json: &str) -> Result<String> {
        let record: StampRecord = serde_json::from_str(json)
            .map_err(|e| ClientError::Storage(format!("Failed to parse JSON: {}", e)))?;

        self.store(&record)?;

        Ok(record.stamp_id().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stamp_types::{ProofRecord, StampStatus};

    const ORIGINAL: &str = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";

    fn make_record(stamp_id: &str) -> StampRecord {
        let proof = ProofRecord {
            leaf_hash: ORIGINAL.to_string(),
            leaf_index: 0,
            siblings: vec![],
            directions: vec![],
            root_hash: ORIGINAL.to_string(),
        };
        StampRecord::new(stamp_id, ORIGINAL, "", StampStatus::Confirmed, Some(proof))
    }

    #[test]
    fn test_storage_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = RecordStorage::open(temp_dir.path()).unwrap();

        let record = make_record("stamp-1");
        storage.store(&record).unwrap();

        let retrieved = storage.get("stamp-1").unwrap();
        assert_eq!(retrieved, Some(record));
        assert!(storage.get("stamp-2").unwrap().is_none());
    }

    #[test]
    fn test_store_replaces_snapshot() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = RecordStorage::open(temp_dir.path()).unwrap();

        storage
            .store(&StampRecord::new("stamp-1", ORIGINAL, "", StampStatus::Pending, None))
            .unwrap();
        storage.store(&make_record("stamp-1")).unwrap();

        let records = storage.list().unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].has_proof());
    }

    #[test]
    fn test_list_orders_by_id() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = RecordStorage::open(temp_dir.path()).unwrap();

        for id in ["c", "a", "b"] {
            storage.store(&make_record(id)).unwrap();
        }

        let ids: Vec<String> = storage
            .list()
            .unwrap()
            .iter()
            .map(|r| r.stamp_id().to_string())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_export_import() {
        let source_dir = tempfile::tempdir().unwrap();
        let source = RecordStorage::open(source_dir.path()).unwrap();
        source.store(&make_record("stamp-1")).unwrap();
        let json = source.export_json("stamp-1").unwrap();

        let dest_dir = tempfile::tempdir().unwrap();
        let dest = RecordStorage::open(dest_dir.path()).unwrap();
        assert_eq!(dest.import_json(&json).unwrap(), "stamp-1");

        let imported = dest.get("stamp-1").unwrap().unwrap();
        assert!(imported.is_valid(ORIGINAL));
    }

    #[test]
    fn test_export_missing_record() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = RecordStorage::open(temp_dir.path()).unwrap();
        assert!(matches!(
            storage.export_json("nope"),
            Err(ClientError::Storage(_))
        ));
    }

    #[test]
    fn test_import_invalid_json() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = RecordStorage::open(temp_dir.path()).unwrap();
        assert!(storage.import_json("{\"hash\": 1}").is_err());
    }
}
