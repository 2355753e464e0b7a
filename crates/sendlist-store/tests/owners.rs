use sendlist_core::domain::OwnerName;
use sendlist_store::error::StoreErrorKind;
use sendlist_store::Store;

#[test]
fn owner_country_code_set_and_clear() {
    let store = Store::open_in_memory().expect("open store");
    store.migrate().expect("migrate");
    let owner = OwnerName::new("acme").expect("owner");
    let now = 1_700_000_000;

    assert_eq!(store.owners().default_country_code(&owner).expect("get"), None);

    let stored = store
        .owners()
        .set_default_country_code(now, &owner, "0092")
        .expect("set");
    assert_eq!(stored, "+92");
    assert_eq!(
        store.owners().default_country_code(&owner).expect("get").as_deref(),
        Some("+92")
    );

    store
        .owners()
        .set_default_country_code(now + 1, &owner, "1")
        .expect("overwrite");
    assert_eq!(
        store.owners().default_country_code(&owner).expect("get").as_deref(),
        Some("+1")
    );

    store
        .owners()
        .clear_default_country_code(now + 2, &owner)
        .expect("clear");
    assert_eq!(store.owners().default_country_code(&owner).expect("get"), None);
}

#[test]
fn owner_country_code_rejects_invalid_code() {
    let store = Store::open_in_memory().expect("open store");
    store.migrate().expect("migrate");
    let owner = OwnerName::new("acme").expect("owner");

    let err = store
        .owners()
        .set_default_country_code(1_700_000_000, &owner, "abc")
        .unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::Core);
}
