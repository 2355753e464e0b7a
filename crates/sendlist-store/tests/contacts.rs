use sendlist_core::domain::{ContactId, OwnerName};
use sendlist_store::error::StoreErrorKind;
use sendlist_store::repo::ContactNew;
use sendlist_store::Store;

fn store() -> Store {
    let store = Store::open_in_memory().expect("open store");
    store.migrate().expect("migrate");
    store
}

fn owner(name: &str) -> OwnerName {
    OwnerName::new(name).expect("owner")
}

fn new_contact(owner_name: &str, phone: &str) -> ContactNew {
    ContactNew {
        owner: owner(owner_name),
        phone: phone.to_string(),
        display_name: None,
    }
}

#[test]
fn create_stores_normalized_phone() {
    let store = store();
    let now = 1_700_000_000;

    let contact = store
        .contacts()
        .create(now, new_contact("acme", "0300-1234567"), Some("+92"))
        .expect("create contact");
    assert_eq!(contact.phone, "+923001234567");

    let loaded = store.contacts().get(contact.id).expect("get contact");
    assert_eq!(loaded, contact);
}

#[test]
fn create_rejects_duplicate_phone_for_same_owner() {
    let store = store();
    let now = 1_700_000_000;

    store
        .contacts()
        .create(now, new_contact("acme", "+923001234567"), None)
        .expect("create contact");
    let err = store
        .contacts()
        .create(now, new_contact("acme", "0300 1234567"), Some("+92"))
        .unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::DuplicateContact);

    store
        .contacts()
        .create(now, new_contact("other", "+923001234567"), None)
        .expect("same phone for another owner");
}

#[test]
fn create_rejects_unparseable_phone() {
    let store = store();
    let err = store
        .contacts()
        .create(1_700_000_000, new_contact("acme", "n/a"), None)
        .unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::Core);
}

#[test]
fn phones_for_owner_is_scoped_to_owner() {
    let store = store();
    let now = 1_700_000_000;
    let contacts = store.contacts();

    contacts
        .create(now, new_contact("acme", "+14155550002"), None)
        .expect("create");
    contacts
        .create(now + 1, new_contact("acme", "+14155550001"), None)
        .expect("create");
    contacts
        .create(now, new_contact("other", "+14155550003"), None)
        .expect("create");

    let phones = contacts.phones_for_owner(&owner("acme")).expect("phones");
    assert_eq!(phones, vec!["+14155550001", "+14155550002"]);

    let listed = contacts.list_for_owner(&owner("acme")).expect("list");
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].phone, "+14155550002");
}

#[test]
fn delete_removes_contact_and_reports_missing() {
    let store = store();
    let contact = store
        .contacts()
        .create(1_700_000_000, new_contact("acme", "+14155550001"), None)
        .expect("create");

    store.contacts().delete(contact.id).expect("delete");
    let err = store.contacts().delete(contact.id).unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::NotFound);

    let err = store.contacts().get(ContactId::new()).unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::NotFound);
}
