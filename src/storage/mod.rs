//! redb-based storage gateway
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `clients` .. `counters` | record id | JSON record | one table per collection |
//! | `reminders_sent` | appointment id | `()` | reminder one-shot flags |
//!
//! Records are JSON-serialized; the gateway only knows ids and bytes.
//! All operations are synchronous — redb commits are durable when
//! `commit()` returns, and the app is single-user/single-process, so no
//! coordination is needed on top.

use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

const CLIENTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("clients");
const SERVICES_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("services");
const APPOINTMENTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("appointments");
const INVOICES_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("invoices");
const INVENTORY_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("inventory");
const SETTINGS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("settings");
const COUNTERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("counters");

/// One-shot reminder flags: key = appointment id, value = empty.
/// Deliberately not a collection — flags are local state, never exported.
const REMINDERS_SENT_TABLE: TableDefinition<&str, ()> = TableDefinition::new("reminders_sent");

/// Named record collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Store {
    Clients,
    Services,
    Appointments,
    Invoices,
    Inventory,
    Settings,
    Counters,
}

impl Store {
    /// Every collection, in backup-file order
    pub const ALL: [Store; 7] = [
        Store::Clients,
        Store::Services,
        Store::Appointments,
        Store::Invoices,
        Store::Inventory,
        Store::Settings,
        Store::Counters,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Store::Clients => "clients",
            Store::Services => "services",
            Store::Appointments => "appointments",
            Store::Invoices => "invoices",
            Store::Inventory => "inventory",
            Store::Settings => "settings",
            Store::Counters => "counters",
        }
    }

    fn table(&self) -> TableDefinition<'static, &'static str, &'static [u8]> {
        match self {
            Store::Clients => CLIENTS_TABLE,
            Store::Services => SERVICES_TABLE,
            Store::Appointments => APPOINTMENTS_TABLE,
            Store::Invoices => INVOICES_TABLE,
            Store::Inventory => INVENTORY_TABLE,
            Store::Settings => SETTINGS_TABLE,
            Store::Counters => COUNTERS_TABLE,
        }
    }
}

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Record storage backed by redb
#[derive(Clone)]
pub struct Storage {
    db: Arc<Database>,
}

impl Storage {
    /// Open or create the database at the given path.
    ///
    /// redb commits with `Durability::Immediate` by default: once a put
    /// returns, the record survives process death.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        let storage = Self { db: Arc::new(db) };
        storage.init_tables()?;
        Ok(storage)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        let storage = Self { db: Arc::new(db) };
        storage.init_tables()?;
        Ok(storage)
    }

    /// Create all tables up front so readers never hit a missing table
    fn init_tables(&self) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            for store in Store::ALL {
                let _ = write_txn.open_table(store.table())?;
            }
            let _ = write_txn.open_table(REMINDERS_SENT_TABLE)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    // ========== Record Operations ==========

    /// Get a record by id, or None if absent
    pub fn get<T: DeserializeOwned>(&self, store: Store, id: &str) -> StorageResult<Option<T>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(store.table())?;
        match table.get(id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// All records of a collection, in key order
    pub fn get_all<T: DeserializeOwned>(&self, store: Store) -> StorageResult<Vec<T>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(store.table())?;
        let mut records = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            records.push(serde_json::from_slice(value.value())?);
        }
        Ok(records)
    }

    /// Upsert a record by id
    pub fn put<T: Serialize>(&self, store: Store, id: &str, record: &T) -> StorageResult<()> {
        let bytes = serde_json::to_vec(record)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(store.table())?;
            table.insert(id, bytes.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Remove a record. Returns true if it existed; absent ids are a no-op.
    pub fn delete(&self, store: Store, id: &str) -> StorageResult<bool> {
        let write_txn = self.db.begin_write()?;
        let existed = {
            let mut table = write_txn.open_table(store.table())?;
            table.remove(id)?.is_some()
        };
        write_txn.commit()?;
        Ok(existed)
    }

    /// Drop every record of a collection (demo reset)
    pub fn clear(&self, store: Store) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            write_txn.delete_table(store.table())?;
            let _ = write_txn.open_table(store.table())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Number of records in a collection
    pub fn count(&self, store: Store) -> StorageResult<u64> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(store.table())?;
        let mut n = 0u64;
        for result in table.iter()? {
            result?;
            n += 1;
        }
        Ok(n)
    }

    // ========== Raw Operations (backup import/export) ==========

    /// All records of a collection as raw JSON values
    pub fn get_all_raw(&self, store: Store) -> StorageResult<Vec<serde_json::Value>> {
        self.get_all(store)
    }

    /// Upsert a raw JSON record under an explicit id
    pub fn put_raw(&self, store: Store, id: &str, record: &serde_json::Value) -> StorageResult<()> {
        self.put(store, id, record)
    }

    // ========== Reminder Flags ==========

    /// Whether a reminder was already emitted for this appointment
    pub fn is_reminder_sent(&self, appointment_id: &str) -> StorageResult<bool> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(REMINDERS_SENT_TABLE)?;
        Ok(table.get(appointment_id)?.is_some())
    }

    /// Mark an appointment's reminder as emitted.
    /// The flag is keyed by id only — rescheduling does not reset it.
    pub fn mark_reminder_sent(&self, appointment_id: &str) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(REMINDERS_SENT_TABLE)?;
            table.insert(appointment_id, ())?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Client, new_id};

    fn client(name: &str) -> Client {
        Client {
            id: new_id("cli"),
            name: name.into(),
            phone: String::new(),
            email: String::new(),
            notes: String::new(),
            history: Vec::new(),
        }
    }

    #[test]
    fn put_get_roundtrip() {
        let storage = Storage::open_in_memory().unwrap();
        let c = client("Ana Pérez");
        storage.put(Store::Clients, &c.id, &c).unwrap();

        let loaded: Client = storage.get(Store::Clients, &c.id).unwrap().unwrap();
        assert_eq!(loaded.name, "Ana Pérez");
        assert!(
            storage
                .get::<Client>(Store::Clients, "cli_missing")
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn put_is_upsert() {
        let storage = Storage::open_in_memory().unwrap();
        let mut c = client("Ana");
        storage.put(Store::Clients, &c.id, &c).unwrap();
        c.name = "Ana María".into();
        storage.put(Store::Clients, &c.id, &c).unwrap();

        let all: Vec<Client> = storage.get_all(Store::Clients).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Ana María");
    }

    #[test]
    fn delete_absent_is_noop() {
        let storage = Storage::open_in_memory().unwrap();
        let c = client("Bruno");
        storage.put(Store::Clients, &c.id, &c).unwrap();

        assert!(storage.delete(Store::Clients, &c.id).unwrap());
        assert!(!storage.delete(Store::Clients, &c.id).unwrap());
        assert_eq!(storage.count(Store::Clients).unwrap(), 0);
    }

    #[test]
    fn clear_empties_single_collection() {
        let storage = Storage::open_in_memory().unwrap();
        let c = client("Ana");
        storage.put(Store::Clients, &c.id, &c).unwrap();
        storage
            .put(Store::Counters, "invoice", &serde_json::json!({"id": "invoice", "value": 3}))
            .unwrap();

        storage.clear(Store::Clients).unwrap();
        assert_eq!(storage.count(Store::Clients).unwrap(), 0);
        assert_eq!(storage.count(Store::Counters).unwrap(), 1);
    }

    #[test]
    fn reminder_flags_are_sticky() {
        let storage = Storage::open_in_memory().unwrap();
        assert!(!storage.is_reminder_sent("apt_1").unwrap());
        storage.mark_reminder_sent("apt_1").unwrap();
        assert!(storage.is_reminder_sent("apt_1").unwrap());
        // marking twice is fine
        storage.mark_reminder_sent("apt_1").unwrap();
        assert!(storage.is_reminder_sent("apt_1").unwrap());
    }
}
