use super::*;

#[test]
fn memory_store_round_trips_session_user() {
    let store = MemorySessionStore::new();
    assert_eq!(current_session_user(&store).expect("read"), None);

    store_session_user(&store, &SessionUser::employee("a@a")).expect("write");
    assert_eq!(
        store.get_item(SESSION_USER_KEY).expect("raw").as_deref(),
        Some(r#"{"type":"Employee","email":"a@a"}"#)
    );

    clear_session_user(&store).expect("clear");
    assert_eq!(current_session_user(&store).expect("read"), None);
}

#[test]
fn malformed_user_entry_is_an_error() {
    let store = MemorySessionStore::new();
    store.set_item(SESSION_USER_KEY, "{not json").expect("write");
    assert!(matches!(
        current_session_user(&store),
        Err(SessionError::Json { .. })
    ));
}

#[test]
fn file_store_persists_across_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("session.json");

    let store = FileSessionStore::open(&path).expect("open missing file");
    store_session_user(&store, &SessionUser::employee("a@a")).expect("write");
    assert!(path.exists());

    let reopened = FileSessionStore::open(&path).expect("reopen");
    assert_eq!(
        current_session_user(&reopened).expect("read"),
        Some(SessionUser::employee("a@a"))
    );

    clear_session_user(&reopened).expect("clear");
    let cleared = FileSessionStore::open(&path).expect("reopen again");
    assert_eq!(current_session_user(&cleared).expect("read"), None);
}

#[test]
fn file_store_rejects_corrupt_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("session.json");
    fs::write(&path, "[1, 2").expect("seed");

    assert!(matches!(
        FileSessionStore::open(&path),
        Err(SessionError::Json { .. })
    ));
}
