//! JSON backup import/export
//!
//! Export is a single JSON object with one array per collection, in a
//! fixed order. Import upserts record by record with no rollback: a
//! malformed record aborts mid-way and everything already written
//! stays. Re-importing the same file is idempotent because records keep
//! their ids. Reminder flags are local state and never travel.

use std::path::Path;

use chrono::Local;
use serde_json::{Map, Value};
use tracing::info;

use crate::storage::{Storage, Store};
use crate::utils::{AppError, AppResult};

/// Assemble the full backup document
pub fn export(storage: &Storage) -> AppResult<Value> {
    let mut doc = Map::new();
    for store in Store::ALL {
        let rows = storage.get_all_raw(store)?;
        doc.insert(store.name().into(), Value::Array(rows));
    }
    Ok(Value::Object(doc))
}

/// Write the backup document to a file, pretty-printed
pub fn export_to_file(storage: &Storage, path: &Path) -> AppResult<()> {
    let doc = export(storage)?;
    std::fs::write(path, serde_json::to_string_pretty(&doc)?)?;
    info!(path = %path.display(), "Backup exported");
    Ok(())
}

/// Default export filename: `respaldo_salon_YYYY-MM-DD.json`
pub fn default_filename() -> String {
    format!("respaldo_salon_{}.json", Local::now().format("%Y-%m-%d"))
}

/// Import a backup document, upserting every record.
///
/// Unknown top-level keys are ignored; missing collections are treated
/// as empty. Existing records not present in the file are left alone.
pub fn import(storage: &Storage, doc: &Value) -> AppResult<()> {
    let obj = doc
        .as_object()
        .ok_or_else(|| AppError::invalid("Archivo inválido"))?;

    let mut imported = 0usize;
    for store in Store::ALL {
        let rows = match obj.get(store.name()) {
            Some(Value::Array(rows)) => rows.as_slice(),
            Some(_) => return Err(AppError::invalid("Archivo inválido")),
            None => &[],
        };
        for row in rows {
            let id = row
                .get("id")
                .and_then(Value::as_str)
                .ok_or_else(|| AppError::invalid("Archivo inválido"))?;
            storage.put_raw(store, id, row)?;
            imported += 1;
        }
    }

    info!(records = imported, "Backup imported");
    Ok(())
}

/// Read and import a backup file
pub fn import_from_file(storage: &Storage, path: &Path) -> AppResult<()> {
    let text = std::fs::read_to_string(path)?;
    let doc: Value =
        serde_json::from_str(&text).map_err(|_| AppError::invalid("Archivo inválido"))?;
    import(storage, &doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::seed::seed_if_empty;
    use serde_json::json;

    #[test]
    fn export_has_all_collections() {
        let storage = Storage::open_in_memory().unwrap();
        seed_if_empty(&storage).unwrap();

        let doc = export(&storage).unwrap();
        for store in Store::ALL {
            assert!(doc.get(store.name()).is_some(), "{}", store.name());
        }
        assert_eq!(doc["clients"].as_array().unwrap().len(), 2);
        assert_eq!(doc["counters"][0]["value"], json!(2));
    }

    #[test]
    fn roundtrip_into_fresh_database() {
        let source = Storage::open_in_memory().unwrap();
        seed_if_empty(&source).unwrap();
        let doc = export(&source).unwrap();

        let target = Storage::open_in_memory().unwrap();
        import(&target, &doc).unwrap();

        assert_eq!(export(&target).unwrap(), doc);
    }

    #[test]
    fn import_is_idempotent_and_merges() {
        let storage = Storage::open_in_memory().unwrap();
        seed_if_empty(&storage).unwrap();
        let doc = export(&storage).unwrap();

        // a record created after the export survives the import
        crate::repository::clients::create(
            &storage,
            crate::models::ClientDraft { name: "Extra".into(), ..Default::default() },
        )
        .unwrap();

        import(&storage, &doc).unwrap();
        import(&storage, &doc).unwrap();
        assert_eq!(storage.count(Store::Clients).unwrap(), 3);
    }

    #[test]
    fn record_without_id_aborts_without_rollback() {
        let storage = Storage::open_in_memory().unwrap();
        let doc = json!({
            "clients": [
                {"id": "cli_ok", "name": "Ana"},
                {"name": "sin id"}
            ]
        });

        let err = import(&storage, &doc).unwrap_err();
        assert!(matches!(err, AppError::Invalid { .. }));
        // the valid record before the bad one was written
        assert_eq!(storage.count(Store::Clients).unwrap(), 1);
    }

    #[test]
    fn non_object_document_rejected() {
        let storage = Storage::open_in_memory().unwrap();
        assert!(import(&storage, &json!([1, 2, 3])).is_err());
        assert!(import(&storage, &json!({"clients": "nope"})).is_err());
    }

    #[test]
    fn file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(default_filename());

        let source = Storage::open_in_memory().unwrap();
        seed_if_empty(&source).unwrap();
        export_to_file(&source, &path).unwrap();

        let target = Storage::open_in_memory().unwrap();
        import_from_file(&target, &path).unwrap();
        assert_eq!(target.count(Store::Clients).unwrap(), 2);
    }
}
