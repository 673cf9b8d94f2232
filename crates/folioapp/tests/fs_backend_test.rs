use folioapp::clock::ManualClock;
use folioapp::drafts::DraftStore;
use folioapp::model::{Field, Form};
use folioapp::notify::NoticeBoard;
use folioapp::store::{FsBackend, KeyValueStore};
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, FsBackend) {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new(dir.path().join("store"));
    (dir, backend)
}

#[test]
fn test_fs_backend_basic_io() {
    let (_dir, backend) = setup();

    assert_eq!(backend.get("theme").unwrap(), None);

    backend.set("theme", "dark").unwrap();
    assert_eq!(backend.get("theme").unwrap(), Some("dark".to_string()));

    backend.remove("theme").unwrap();
    assert_eq!(backend.get("theme").unwrap(), None);

    // Removing again is fine
    backend.remove("theme").unwrap();
}

#[test]
fn test_fs_backend_atomic_write_artifacts() {
    let (_dir, backend) = setup();

    backend.set("draft-contact", r#"{"name":"Ana"}"#).unwrap();
    backend.set("theme", "light").unwrap();

    assert!(backend.storage_path().exists());

    let entries = fs::read_dir(backend.root()).unwrap();
    for entry in entries {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
    }
}

#[test]
fn test_fs_backend_values_survive_new_instance() {
    let (dir, backend) = setup();
    backend.set("draft-a", "{}").unwrap();
    backend.set("draft-b", "{}").unwrap();

    let reopened = FsBackend::new(dir.path().join("store"));
    assert_eq!(reopened.keys().unwrap(), vec!["draft-a", "draft-b"]);
}

#[test]
fn test_fs_backend_corrupt_store_is_an_error() {
    let (_dir, backend) = setup();
    fs::create_dir_all(backend.root()).unwrap();
    fs::write(backend.storage_path(), "not json").unwrap();

    assert!(backend.get("theme").is_err());
}

#[test]
fn test_drafts_round_trip_through_disk() {
    let (dir, backend) = setup();
    let clock = ManualClock::new();
    let mut notices = NoticeBoard::new(clock.clone());

    let filled = Form::new("contact")
        .with_autosave()
        .with_field(Field::text("name").with_value("Ana"))
        .with_field(Field::email("email").with_value("ana@example.com"))
        .with_field(Field::file("attachment").with_value("secret.pdf"));

    {
        let mut store = DraftStore::with_clock(backend, clock.clone());
        store.schedule_save(&filled);
        clock.advance_ms(2000);
        assert_eq!(store.run_due(&mut notices), vec!["contact"]);
    }

    // A fresh "page load"
    let mut store = DraftStore::with_clock(FsBackend::new(dir.path().join("store")), clock);
    let mut blank = Form::new("contact")
        .with_autosave()
        .with_field(Field::text("name"))
        .with_field(Field::email("email"))
        .with_field(Field::file("attachment"));

    assert_eq!(store.load(&mut blank, &mut notices), 2);
    assert_eq!(blank.value("name"), Some("Ana"));
    assert_eq!(blank.value("email"), Some("ana@example.com"));
    assert_eq!(blank.value("attachment"), Some(""));
}

#[test]
fn test_unreadable_store_degrades_to_no_draft() {
    let (_dir, backend) = setup();
    fs::create_dir_all(backend.root()).unwrap();
    fs::write(backend.storage_path(), "{ truncated").unwrap();

    let clock = ManualClock::new();
    let mut notices = NoticeBoard::new(clock.clone());
    let mut store = DraftStore::with_clock(backend, clock);
    let mut form = Form::new("contact").with_field(Field::text("name").with_value("default"));

    assert_eq!(store.load(&mut form, &mut notices), 0);
    assert_eq!(form.value("name"), Some("default"));
}

#[test]
fn test_fs_backend_write_recovers_from_corrupt_store() {
    let (_dir, backend) = setup();
    fs::create_dir_all(backend.root()).unwrap();
    fs::write(backend.storage_path(), "{ truncated").unwrap();

    backend.set("theme", "dark").unwrap();
    assert_eq!(backend.get("theme").unwrap(), Some("dark".to_string()));

    // The unreadable content is kept aside, not thrown away
    assert_eq!(
        fs::read_to_string(backend.corrupt_path()).unwrap(),
        "{ truncated"
    );
}

#[test]
fn test_drafts_keep_saving_after_corrupt_store() {
    let (_dir, backend) = setup();
    fs::create_dir_all(backend.root()).unwrap();
    fs::write(backend.storage_path(), "{ truncated").unwrap();

    let clock = ManualClock::new();
    let mut notices = NoticeBoard::new(clock.clone());
    let mut store = DraftStore::with_clock(backend, clock);
    let form = Form::new("contact").with_field(Field::text("name").with_value("Ana"));

    assert!(store.save(&form, &mut notices));
    let draft = store.stored("contact").unwrap();
    assert_eq!(draft.values["name"], "Ana");

    // Later saves and listings keep working
    assert!(store.save(&form, &mut notices));
    assert_eq!(store.stored_form_ids().unwrap(), vec!["contact"]);
}
