use funnelbook_model::{Collection, Table};
use funnelbook_store::{
    table_from_csv, table_to_csv, LocalFsStore, MemoryStore, StoreErrorCode, TabularStore,
};
use std::collections::BTreeMap;
use std::fs;
use std::sync::atomic::Ordering;

fn sample_table() -> Table {
    let mut table = Table::new(Collection::Funnel.columns().iter().copied());
    let mut record = BTreeMap::new();
    record.insert("cliente_id".to_string(), "7".to_string());
    record.insert("cliente_nombre".to_string(), "Acme, S.A.".to_string());
    record.insert("no_oportunidad".to_string(), "100000".to_string());
    record.insert("producto".to_string(), "Leasing".to_string());
    record.insert("valor".to_string(), "1500000".to_string());
    record.insert("fecha_cierre".to_string(), "2026-12-01".to_string());
    record.insert("etapa".to_string(), "Gestión Inicial".to_string());
    record.insert("estado".to_string(), "Planeada".to_string());
    record.insert("comercial_id".to_string(), "com-01".to_string());
    record.insert(
        "fecha_gestion".to_string(),
        "2026-08-27T10:00:00.000000Z".to_string(),
    );
    table.push_record(&record);
    table
}

#[test]
fn read_of_absent_collection_is_empty_table() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = LocalFsStore::new(dir.path());
    let table = store.read(Collection::Funnel).expect("read");
    assert!(table.is_empty());
    assert!(table.columns().is_empty());
}

#[test]
fn write_then_read_round_trips_exactly() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = LocalFsStore::new(dir.path());
    let table = sample_table();
    store.write(Collection::Funnel, &table).expect("write");
    let back = store.read(Collection::Funnel).expect("read");
    assert_eq!(back, table);
}

#[test]
fn reads_are_idempotent_without_intervening_write() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = LocalFsStore::new(dir.path());
    store.write(Collection::Funnel, &sample_table()).expect("write");
    let first = store.read(Collection::Funnel).expect("first read");
    let second = store.read(Collection::Funnel).expect("second read");
    assert_eq!(first, second);
}

#[test]
fn collections_are_isolated_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = LocalFsStore::new(dir.path());
    store.write(Collection::Funnel, &sample_table()).expect("write");
    let other = store.read(Collection::PlanCuenta).expect("read");
    assert!(other.is_empty());
    assert!(dir.path().join("funnel.csv").exists());
    assert!(dir.path().join("funnel.csv.sha256").exists());
}

#[test]
fn tampered_payload_is_reported_as_validation_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = LocalFsStore::new(dir.path());
    store.write(Collection::Funnel, &sample_table()).expect("write");
    let path = dir.path().join("funnel.csv");
    let mut bytes = fs::read(&path).expect("read file");
    bytes.extend_from_slice(b"tampered,row\n");
    fs::write(&path, bytes).expect("tamper");
    let err = store.read(Collection::Funnel).expect_err("must fail");
    assert_eq!(err.code, StoreErrorCode::Validation);
}

#[test]
fn stale_lock_file_surfaces_as_conflict() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = LocalFsStore::new(dir.path());
    fs::write(dir.path().join("funnel.csv.lock"), b"").expect("plant lock");
    let err = store
        .write(Collection::Funnel, &sample_table())
        .expect_err("must conflict");
    assert_eq!(err.code, StoreErrorCode::Conflict);
}

#[test]
fn lock_is_released_after_successful_write() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = LocalFsStore::new(dir.path());
    store.write(Collection::Funnel, &sample_table()).expect("first");
    store.write(Collection::Funnel, &sample_table()).expect("second");
    assert!(!dir.path().join("funnel.csv.lock").exists());
}

#[test]
fn csv_codec_round_trips_quoting_and_unicode() {
    let table = sample_table();
    let bytes = table_to_csv(&table).expect("encode");
    let back = table_from_csv(&bytes).expect("decode");
    assert_eq!(back, table);
    assert_eq!(back.cell(0, "cliente_nombre"), Some("Acme, S.A."));
    assert_eq!(back.cell(0, "etapa"), Some("Gestión Inicial"));
}

#[test]
fn empty_bytes_decode_to_empty_table() {
    let table = table_from_csv(b"").expect("decode");
    assert!(table.is_empty());
    assert!(table.columns().is_empty());
}

#[test]
fn memory_store_reads_are_snapshots() {
    let store = MemoryStore::new();
    store.write(Collection::Funnel, &sample_table()).expect("write");
    let mut first = store.read(Collection::Funnel).expect("read");
    first.push_row(["local", "only"]);
    let second = store.read(Collection::Funnel).expect("read again");
    assert_eq!(second.row_count(), 1);
}

#[test]
fn memory_store_failure_injection() {
    let store = MemoryStore::new();
    store.fail_reads.store(true, Ordering::Relaxed);
    let err = store.read(Collection::Funnel).expect_err("read must fail");
    assert_eq!(err.code, StoreErrorCode::Io);
    store.fail_reads.store(false, Ordering::Relaxed);
    store.fail_writes.store(true, Ordering::Relaxed);
    let err = store
        .write(Collection::Funnel, &sample_table())
        .expect_err("write must fail");
    assert_eq!(err.code, StoreErrorCode::Io);
    assert_eq!(store.read_calls.load(Ordering::Relaxed), 2);
    assert_eq!(store.write_calls.load(Ordering::Relaxed), 1);
}
