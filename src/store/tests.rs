use super::*;
use crate::config::StorageConfig;
use crate::notes::{HexColor, Note};
use std::fs;
use std::path::Path;

fn colors(codes: &[&str]) -> Vec<HexColor> {
    codes.iter().map(|code| HexColor::parse(code).unwrap()).collect()
}

fn store_in(dir: &Path) -> NoteStore {
    NoteStore::new(StoreOptions::new(dir.join("notes_data.json")))
}

#[test]
fn missing_document_loads_empty() {
    let temp = tempfile::tempdir().unwrap();
    let store = NoteStore::open(StoreOptions::new(temp.path().join("absent.json"))).unwrap();
    assert!(store.is_empty());
    assert!(!temp.path().join("absent.json").exists());
}

#[test]
fn appended_note_survives_reload() {
    let temp = tempfile::tempdir().unwrap();
    let mut store = store_in(temp.path());
    let original = Note::new("Palette A", colors(&["#FF0000", "#00FF00"]));
    store.append(original.clone()).unwrap();

    let reloaded = NoteStore::open(store.options().clone()).unwrap();
    assert_eq!(reloaded.notes(), &[original]);
}

#[test]
fn mixed_mutations_round_trip() {
    let temp = tempfile::tempdir().unwrap();
    let mut store = store_in(temp.path());
    store.append(Note::new("one", colors(&["#111111"]))).unwrap();
    let second = store
        .append(Note::new("two", colors(&["#222222", "#222222"])))
        .unwrap();
    store.append(Note::new("three", colors(&["#333333"]))).unwrap();
    store.rename(second, "deux").unwrap();
    store.remove_at(0).unwrap();
    store.rename_at(1, "trois").unwrap();

    let reloaded = NoteStore::open(store.options().clone()).unwrap();
    assert_eq!(reloaded.notes(), store.notes());
    let names: Vec<&str> = reloaded.notes().iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, ["deux", "trois"]);
    assert_eq!(reloaded.position(second), Some(0));
}

#[test]
fn out_of_range_indices_are_rejected() {
    let temp = tempfile::tempdir().unwrap();
    let mut store = store_in(temp.path());
    store.append(Note::new("only", colors(&["#ABCDEF"]))).unwrap();

    assert!(matches!(
        store.remove_at(1),
        Err(StoreError::IndexOutOfRange { index: 1, len: 1 })
    ));
    assert!(matches!(
        store.rename_at(1, "x"),
        Err(StoreError::IndexOutOfRange { index: 1, len: 1 })
    ));
    assert!(matches!(
        store.resolve_index(-1),
        Err(StoreError::IndexOutOfRange { index: -1, len: 1 })
    ));
    assert!(matches!(
        store.resolve_index(1),
        Err(StoreError::IndexOutOfRange { index: 1, len: 1 })
    ));
    assert_eq!(store.resolve_index(0).unwrap(), 0);
    assert_eq!(store.len(), 1);
}

#[test]
fn unknown_id_is_reported() {
    let temp = tempfile::tempdir().unwrap();
    let mut store = store_in(temp.path());
    let stray = Note::new("stray", colors(&["#000000"]));
    assert!(matches!(
        store.remove(stray.id),
        Err(StoreError::NoteNotFound(id)) if id == stray.id
    ));
}

#[test]
fn corrupt_document_is_an_error() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("notes_data.json");
    fs::write(&path, "{ not json").unwrap();
    let err = NoteStore::open(StoreOptions::new(&path)).unwrap_err();
    assert!(err.is_corrupt(), "unexpected error: {err}");
}

#[test]
fn wrongly_shaped_document_is_corrupt() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("notes_data.json");
    fs::write(&path, r#"{"name": "not an array", "colors": []}"#).unwrap();
    assert!(NoteStore::open(StoreOptions::new(&path)).unwrap_err().is_corrupt());

    fs::write(&path, r#"[{"title": "missing fields"}]"#).unwrap();
    assert!(NoteStore::open(StoreOptions::new(&path)).unwrap_err().is_corrupt());
}

#[test]
fn recover_starts_empty_and_keeps_corrupt_copy() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("notes_data.json");
    fs::write(&path, "garbage").unwrap();

    let (mut store, warning) = NoteStore::open_or_recover(StoreOptions::new(&path)).unwrap();
    assert!(warning.is_some_and(|err| err.is_corrupt()));
    assert!(store.is_empty());

    store.append(Note::new("fresh", colors(&["#123456"]))).unwrap();
    let backup = store.options().backup_file_path();
    assert_eq!(fs::read_to_string(backup).unwrap(), "garbage");
    assert_eq!(NoteStore::open(StoreOptions::new(&path)).unwrap().len(), 1);
}

#[test]
fn legacy_document_without_ids_loads() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("notes_data.json");
    fs::write(
        &path,
        r##"[{"name": "Old", "colors": ["#FF0000", "red"]}, {"name": "Older", "colors": []}]"##,
    )
    .unwrap();

    let store = NoteStore::open(StoreOptions::new(&path)).unwrap();
    assert_eq!(store.len(), 2);
    assert_ne!(store.notes()[0].id, store.notes()[1].id);
    assert_eq!(store.notes()[0].colors[1].as_str(), "red");
}

#[test]
fn save_without_backup_or_lock_leaves_single_file() {
    let temp = tempfile::tempdir().unwrap();
    let mut options = StoreOptions::new(temp.path().join("nested/dir/notes.json"));
    options.backup_retention = 0;
    options.lock = false;
    let mut store = NoteStore::new(options);
    store.append(Note::new("a", colors(&["#000000"]))).unwrap();
    store.append(Note::new("b", colors(&["#FFFFFF"]))).unwrap();

    let entries: Vec<_> = fs::read_dir(temp.path().join("nested/dir"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(entries, ["notes.json"]);
}

#[test]
fn failed_save_rolls_back_mutation() {
    let temp = tempfile::tempdir().unwrap();
    // A directory where the document should be makes the final rename fail.
    let path = temp.path().join("notes_data.json");
    fs::create_dir(&path).unwrap();
    let mut options = StoreOptions::new(&path);
    options.backup_retention = 0;
    let mut store = NoteStore::new(options);

    assert!(store.append(Note::new("lost", colors(&["#000000"]))).is_err());
    assert!(store.is_empty());
}

#[test]
fn persisted_shape_is_array_of_name_and_colors() {
    let temp = tempfile::tempdir().unwrap();
    let mut store = store_in(temp.path());
    store.append(Note::new("Palette A", colors(&["#FF0000"]))).unwrap();

    let raw = fs::read_to_string(&store.options().path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let entry = &value.as_array().unwrap()[0];
    assert_eq!(entry["name"], "Palette A");
    assert_eq!(entry["colors"][0], "#FF0000");
    assert!(entry["id"].is_string());
}

#[test]
fn id_prefix_lookup_requires_unique_match() {
    let temp = tempfile::tempdir().unwrap();
    let mut store = store_in(temp.path());
    let id = store.append(Note::new("a", colors(&["#000000"]))).unwrap();
    assert_eq!(store.find_by_id_prefix(&id.short()), Some(id));
    assert_eq!(store.find_by_id_prefix(&id.to_string()), Some(id));
    assert_eq!(store.find_by_id_prefix("zz"), None);
}

#[test]
fn options_from_config_prefers_override() {
    let mut cfg = StorageConfig::default();
    cfg.backup_retention = 0;
    cfg.lock = false;

    let options = options_from_config(&cfg, None);
    assert_eq!(options.path, Path::new(DEFAULT_NOTES_FILE));
    assert_eq!(options.backup_retention, 0);
    assert!(!options.lock);
    assert_eq!(
        options.backup_file_path(),
        Path::new("notes_data.json.bak")
    );

    let overridden = options_from_config(&cfg, Some(Path::new("/tmp/other.json")));
    assert_eq!(overridden.path, Path::new("/tmp/other.json"));
    assert_eq!(overridden.lock_file_path(), Path::new("/tmp/other.json.lock"));
}
