use serde_json::json;

use super::*;

#[test]
fn dir_storage_set_get_remove() {
    let tmp = tempfile::tempdir().unwrap();
    let storage = DirStorage::open(&tmp.path().join("storage")).unwrap();

    assert_eq!(storage.get("RECORD_KEY").unwrap(), None);
    storage.set("RECORD_KEY", json!({"a": 1})).unwrap();
    assert_eq!(storage.get("RECORD_KEY").unwrap(), Some(json!({"a": 1})));

    storage.remove("RECORD_KEY").unwrap();
    assert_eq!(storage.get("RECORD_KEY").unwrap(), None);
    // Removing a missing key is not an error.
    storage.remove("RECORD_KEY").unwrap();
}

#[test]
fn dir_storage_survives_reopen() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("storage");
    DirStorage::open(&root)
        .unwrap()
        .set("k", json!("v"))
        .unwrap();

    let reopened = DirStorage::open(&root).unwrap();
    assert_eq!(reopened.get("k").unwrap(), Some(json!("v")));
}

#[test]
fn dir_storage_take_consumes_once() {
    let tmp = tempfile::tempdir().unwrap();
    let storage = DirStorage::open(tmp.path()).unwrap();
    storage.set("slot", json!([1, 2])).unwrap();

    assert_eq!(storage.take("slot").unwrap(), Some(json!([1, 2])));
    assert_eq!(storage.take("slot").unwrap(), None);
    assert_eq!(storage.get("slot").unwrap(), None);

    let leftovers = std::fs::read_dir(tmp.path()).unwrap().count();
    assert_eq!(leftovers, 0);
}

#[test]
fn dir_storage_concurrent_takers_see_value_once() {
    let tmp = tempfile::tempdir().unwrap();
    let storage = DirStorage::open(tmp.path()).unwrap();
    storage.set("slot", json!({"n": 1})).unwrap();

    let hits = std::thread::scope(|s| {
        let handles = (0..8)
            .map(|_| s.spawn(|| storage.take("slot").unwrap()))
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .filter_map(|h| h.join().unwrap())
            .count()
    });
    assert_eq!(hits, 1);
}

#[test]
fn dir_storage_rejects_path_like_keys() {
    let tmp = tempfile::tempdir().unwrap();
    let storage = DirStorage::open(tmp.path()).unwrap();
    assert!(storage.set("../escape", json!(1)).is_err());
    assert!(storage.get("").is_err());
}

#[test]
fn dir_storage_reports_corrupt_entries() {
    let tmp = tempfile::tempdir().unwrap();
    let storage = DirStorage::open(tmp.path()).unwrap();
    std::fs::write(tmp.path().join("bad.json"), b"{not json").unwrap();
    assert!(storage.get("bad").is_err());
}

#[test]
fn discarding_a_claimed_entry_tolerates_failure() {
    let tmp = tempfile::tempdir().unwrap();
    let claimed = tmp.path().join("RECORD_KEY.taking.1.0");
    std::fs::write(&claimed, b"{}").unwrap();
    assert!(discard_claimed(&claimed));
    assert!(!claimed.exists());

    // Already gone, or not a file: logged and reported, never a panic.
    assert!(!discard_claimed(&claimed));
    let dir = tmp.path().join("RECORD_KEY.taking.1.1");
    std::fs::create_dir(&dir).unwrap();
    assert!(!discard_claimed(&dir));
}

#[test]
fn memory_storage_take_clears() {
    let storage = MemoryStorage::new();
    storage.set("k", json!(true)).unwrap();
    assert_eq!(storage.take("k").unwrap(), Some(json!(true)));
    assert_eq!(storage.take("k").unwrap(), None);
}
