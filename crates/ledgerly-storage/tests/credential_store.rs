//! Integration tests for `CredentialStore` over the durable file backend.

use std::sync::Arc;

use ledgerly_storage::{CredentialStore, FileBackend, StorageBackend};

fn file_store(dir: &tempfile::TempDir) -> CredentialStore {
    CredentialStore::new(FileBackend::open(dir.path().join("storage.json")).unwrap())
}

#[test]
fn test_credential_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    file_store(&dir).set("auth_token", "header.payload.signature");

    // A brand-new store over the same file plays the part of a reloaded page.
    let reopened = file_store(&dir);

    assert_eq!(
        reopened.get::<String>("auth_token").as_deref(),
        Some("header.payload.signature")
    );
}

#[test]
fn test_remove_is_visible_to_other_handles_on_same_file() {
    let dir = tempfile::tempdir().unwrap();
    let first = file_store(&dir);
    let second = file_store(&dir);
    first.set("auth_token", "abc");

    second.remove("auth_token");

    assert_eq!(first.get::<String>("auth_token"), None);
}

#[test]
fn test_corrupt_file_reads_as_absent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "\u{0}\u{1}garbage").unwrap();
    let store = CredentialStore::new(FileBackend::open(&path).unwrap());

    assert_eq!(store.get::<String>("auth_token"), None);
}

#[test]
fn test_values_are_stored_as_json_text() {
    let dir = tempfile::tempdir().unwrap();
    let backend: Arc<dyn StorageBackend> =
        Arc::new(FileBackend::open(dir.path().join("storage.json")).unwrap());
    let store = CredentialStore::from_shared(Arc::clone(&backend));

    store.set("auth_token", "abc");

    assert_eq!(
        backend.get_item("auth_token").unwrap().as_deref(),
        Some("\"abc\"")
    );
}
