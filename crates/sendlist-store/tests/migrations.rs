use sendlist_store::Store;
use tempfile::TempDir;

#[test]
fn migrate_sets_schema_version_and_is_repeatable() {
    let store = Store::open_in_memory().expect("open store");
    assert_eq!(store.schema_version().expect("version"), 0);

    store.migrate().expect("migrate");
    assert_eq!(store.schema_version().expect("version"), 1);

    store.migrate().expect("migrate again");
    assert_eq!(store.schema_version().expect("version"), 1);
}

#[test]
fn open_creates_missing_parent_directory() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("nested").join("sendlist.sqlite3");

    let store = Store::open(&path).expect("open store");
    store.migrate().expect("migrate");
    assert!(path.exists());
}
