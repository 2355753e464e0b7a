use sendlist_core::domain::TemplateId;
use sendlist_store::error::StoreErrorKind;
use sendlist_store::repo::TemplateNew;
use sendlist_store::Store;

fn store() -> Store {
    let store = Store::open_in_memory().expect("open store");
    store.migrate().expect("migrate");
    store
}

#[test]
fn templates_create_list_and_toggle() {
    let store = store();
    let now = 1_700_000_000;

    let welcome = store
        .templates()
        .create(
            now,
            TemplateNew {
                name: " welcome ".to_string(),
                content: "Hello {name}".to_string(),
            },
        )
        .expect("create template");
    assert_eq!(welcome.name, "welcome");
    assert!(welcome.active);

    store
        .templates()
        .create(
            now,
            TemplateNew {
                name: "reminder".to_string(),
                content: "Don't forget".to_string(),
            },
        )
        .expect("create template");

    let names: Vec<String> = store
        .templates()
        .list()
        .expect("list")
        .into_iter()
        .map(|template| template.name)
        .collect();
    assert_eq!(names, vec!["reminder", "welcome"]);

    let inactive = store
        .templates()
        .set_active(now + 10, welcome.id, false)
        .expect("deactivate");
    assert!(!inactive.active);
    assert_eq!(inactive.updated_at, now + 10);

    let err = store.templates().get_active(welcome.id).unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::InactiveTemplate);

    store
        .templates()
        .set_active(now + 20, welcome.id, true)
        .expect("activate");
    let active = store.templates().get_active(welcome.id).expect("active");
    assert_eq!(active.content, "Hello {name}");
}

#[test]
fn templates_reject_blank_content_and_unknown_ids() {
    let store = store();
    let err = store
        .templates()
        .create(
            1_700_000_000,
            TemplateNew {
                name: "empty".to_string(),
                content: "  ".to_string(),
            },
        )
        .unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::Core);

    let err = store.templates().get(TemplateId::new()).unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::NotFound);

    let err = store
        .templates()
        .set_active(1_700_000_000, TemplateId::new(), false)
        .unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::NotFound);
}
