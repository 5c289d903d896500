//! Integration tests for the editor crate

use serde_json::json;
use std::sync::Arc;
use storeblocks_editor::{
    CanvasEvent, EditSession, EditorError, FilePageStore, MemoryPageStore, NotificationLevel,
    NotificationLog, PageStore, SaveMode, StoreError,
};
use storeblocks_model::{ElementType, LegalKey, PageAddress, PageContent, SettingsMap};

fn session_on(store: Arc<dyn PageStore>) -> (EditSession, Arc<NotificationLog>) {
    let log = Arc::new(NotificationLog::new());
    (EditSession::new("shop", store, log.clone()), log)
}

fn memory_session() -> (EditSession, Arc<NotificationLog>) {
    session_on(Arc::new(MemoryPageStore::new()))
}

fn ids(session: &EditSession) -> Vec<String> {
    session.elements().iter().map(|e| e.id.clone()).collect()
}

fn patch(key: &str, value: serde_json::Value) -> SettingsMap {
    let mut patch = SettingsMap::new();
    patch.insert(key.to_string(), value);
    patch
}

#[tokio::test]
async fn test_hero_defaults() {
    let (mut session, _) = memory_session();
    session.open(PageAddress::Homepage).await.unwrap();

    let id = session.add_element(ElementType::Hero).unwrap();
    let hero = session.selected().unwrap();

    assert_eq!(hero.id, id);
    assert_eq!(hero.kind.settings_value()["title"], json!("Welcome to Our Store"));
}

#[test]
fn test_empty_patch_changes_nothing() {
    let (mut session, _) = memory_session();
    let id = session.add_element(ElementType::Cta).unwrap();
    let before = session.elements().to_vec();
    let undo_levels = session.history().undo_levels();

    let changed = session.update_element_settings(&id, SettingsMap::new()).unwrap();

    assert!(!changed);
    assert_eq!(session.elements(), before.as_slice());
    assert_eq!(session.history().undo_levels(), undo_levels);
}

#[test]
fn test_add_then_remove_restores_sequence() {
    let (mut session, _) = memory_session();
    session.add_element(ElementType::Hero).unwrap();
    session.add_element(ElementType::Text).unwrap();
    session.add_element(ElementType::Columns).unwrap();
    let before = session.elements().to_vec();

    for element_type in ElementType::ALL {
        let id = session.add_element(element_type).unwrap();
        assert_eq!(session.elements().len(), before.len() + 1);

        session.remove_element(&id).unwrap();
        assert_eq!(session.elements(), before.as_slice());
    }
}

#[test]
fn test_reorder_preserves_ids() {
    let (mut session, _) = memory_session();
    for element_type in [
        ElementType::Hero,
        ElementType::Products,
        ElementType::Text,
        ElementType::Cta,
    ] {
        session.add_element(element_type).unwrap();
    }

    let mut expected = ids(&session);
    expected.sort();

    for source in 0..4 {
        for destination in 0..4 {
            session.reorder(source, Some(destination)).unwrap();

            let mut after = ids(&session);
            after.sort();
            assert_eq!(after, expected);
        }
    }
}

#[test]
fn test_reorder_is_a_splice_and_drop_outside_is_noop() {
    let (mut session, _) = memory_session();
    let a = session.add_element(ElementType::Text).unwrap();
    let b = session.add_element(ElementType::Image).unwrap();
    let c = session.add_element(ElementType::Cta).unwrap();

    session
        .handle(CanvasEvent::Drag {
            source: 0,
            destination: None,
        })
        .unwrap();
    assert_eq!(ids(&session), vec![a.clone(), b.clone(), c.clone()]);

    session
        .handle(CanvasEvent::Drag {
            source: 0,
            destination: Some(2),
        })
        .unwrap();
    assert_eq!(ids(&session), vec![b, c, a]);
}

#[test]
fn test_selection_reflects_updated_settings() {
    let (mut session, _) = memory_session();
    let id = session.add_element(ElementType::Hero).unwrap();
    assert_eq!(session.selected_id(), Some(id.as_str()));

    session
        .update_element_settings(&id, patch("title", json!("Summer Sale")))
        .unwrap();

    let selected = session.selected().unwrap();
    assert_eq!(selected.kind.settings_value()["title"], json!("Summer Sale"));
    // Untouched keys survive the shallow merge
    assert_eq!(selected.kind.settings_value()["buttonText"], json!("Shop Now"));
}

#[test]
fn test_removing_selected_element_clears_selection() {
    let (mut session, _) = memory_session();
    let keep = session.add_element(ElementType::Text).unwrap();
    let gone = session.add_element(ElementType::Image).unwrap();
    assert_eq!(session.selected_id(), Some(gone.as_str()));

    session.handle(CanvasEvent::Remove(gone)).unwrap();

    assert!(session.selected().is_none());
    assert_eq!(ids(&session), vec![keep]);
}

#[test]
fn test_column_add_touches_only_its_columns_element() {
    let (mut session, _) = memory_session();
    session.add_element(ElementType::Hero).unwrap();
    let columns_id = session.add_element(ElementType::Columns).unwrap();
    session.add_element(ElementType::Text).unwrap();
    let selected_before = session.selected_id().map(str::to_string);

    let others_before: Vec<String> = session
        .elements()
        .iter()
        .filter(|e| e.id != columns_id)
        .map(|e| serde_json::to_string(e).unwrap())
        .collect();

    let child_id = session
        .add_element_to_column(&columns_id, 1, ElementType::Text)
        .unwrap()
        .unwrap();

    let others_after: Vec<String> = session
        .elements()
        .iter()
        .filter(|e| e.id != columns_id)
        .map(|e| serde_json::to_string(e).unwrap())
        .collect();
    assert_eq!(others_after, others_before);
    assert_eq!(session.selected_id().map(str::to_string), selected_before);

    let columns = session.elements()[1].columns().unwrap();
    assert_eq!(columns.children.len(), 1);
    assert_eq!(columns.children[0].id, child_id);
    assert_eq!(columns.children[0].column_index, Some(1));
    assert_eq!(columns.children[0].parent_id.as_deref(), Some(columns_id.as_str()));
    assert_eq!(columns.column(1).count(), 1);
    assert_eq!(columns.column(0).count(), 0);
}

#[test]
fn test_column_add_on_non_columns_is_skipped() {
    let (mut session, log) = memory_session();
    let text_id = session.add_element(ElementType::Text).unwrap();
    let before = session.elements().to_vec();
    let notifications = log.entries().len();

    let added = session
        .add_element_to_column(&text_id, 0, ElementType::Image)
        .unwrap();
    assert_eq!(added, None);

    let added = session
        .add_element_to_column("missing", 0, ElementType::Image)
        .unwrap();
    assert_eq!(added, None);

    assert_eq!(session.elements(), before.as_slice());
    assert_eq!(log.entries().len(), notifications);
}

#[test]
fn test_column_child_removed_with_parent_and_alone() {
    let (mut session, _) = memory_session();
    let columns_id = session.add_element(ElementType::Columns).unwrap();
    let first = session
        .add_element_to_column(&columns_id, 0, ElementType::Text)
        .unwrap()
        .unwrap();
    session
        .add_element_to_column(&columns_id, 1, ElementType::Image)
        .unwrap();

    assert!(session.remove_element(&first).unwrap());
    assert_eq!(session.elements()[0].children().len(), 1);

    session.remove_element(&columns_id).unwrap();
    assert!(session.elements().is_empty());
    assert!(session.document().find(&first).is_none());
}

#[test]
fn test_rejected_edit_notifies_and_keeps_page() {
    let (mut session, log) = memory_session();
    let columns_id = session.add_element(ElementType::Columns).unwrap();
    session
        .add_element_to_column(&columns_id, 1, ElementType::Text)
        .unwrap();
    let before = session.elements().to_vec();

    let result = session.update_element_settings(&columns_id, patch("columnCount", json!(1)));

    assert!(matches!(result, Err(EditorError::Mutation(_))));
    assert_eq!(session.elements(), before.as_slice());
    let last = log.entries().pop().unwrap();
    assert_eq!(last.level, NotificationLevel::Error);
}

#[test]
fn test_undo_redo_through_session() {
    let (mut session, _) = memory_session();
    let hero = session.add_element(ElementType::Hero).unwrap();
    session
        .update_element_settings(&hero, patch("title", json!("New")))
        .unwrap();

    assert!(session.undo().unwrap());
    assert_eq!(
        session.elements()[0].kind.settings_value()["title"],
        json!("Welcome to Our Store")
    );

    assert!(session.undo().unwrap());
    assert!(session.elements().is_empty());
    assert!(!session.can_undo());

    assert!(session.redo().unwrap());
    assert!(session.redo().unwrap());
    assert_eq!(session.elements()[0].kind.settings_value()["title"], json!("New"));
    assert!(!session.can_redo());
}

#[tokio::test]
async fn test_fresh_custom_page_is_empty() {
    let (mut session, _) = memory_session();
    let page = session.create_custom_page("About Us", None).await.unwrap();

    session.open(PageAddress::Custom(page.id.clone())).await.unwrap();

    assert!(session.elements().is_empty());
    assert_eq!(session.custom_pages().len(), 1);
    assert_eq!(session.custom_pages()[0].slug, "about-us");
}

#[tokio::test]
async fn test_switching_pages_clears_selection_and_history() {
    let (mut session, _) = memory_session();
    session.open(PageAddress::Homepage).await.unwrap();
    session.add_element(ElementType::Text).unwrap();
    assert!(session.selected().is_some());

    session.open(PageAddress::Legal(LegalKey::Terms)).await.unwrap();

    assert!(session.selected().is_none());
    assert!(!session.can_undo());
    assert!(session.elements().is_empty());
}

#[tokio::test]
async fn test_save_and_reload() {
    let store = Arc::new(MemoryPageStore::new());
    let (mut session, log) = session_on(store.clone());
    session.open(PageAddress::Homepage).await.unwrap();
    session.add_element(ElementType::Hero).unwrap();
    session.add_element(ElementType::Products).unwrap();
    assert!(session.is_dirty());

    let revision = session.save().await.unwrap();
    assert_eq!(revision, 1);
    assert!(!session.is_dirty());
    assert_eq!(log.entries().last().unwrap().level, NotificationLevel::Success);

    let (mut reopened, _) = session_on(store);
    reopened.open(PageAddress::Homepage).await.unwrap();
    assert_eq!(reopened.elements(), session.elements());
}

#[tokio::test]
async fn test_failed_save_keeps_local_edits() {
    let store = Arc::new(MemoryPageStore::new());
    let (mut session, log) = session_on(store.clone());
    session.open(PageAddress::Homepage).await.unwrap();
    session.add_element(ElementType::Text).unwrap();

    store.set_fail_saves(true);
    assert!(session.save().await.is_err());

    assert_eq!(session.elements().len(), 1);
    assert!(session.is_dirty());
    assert_eq!(log.errors().len(), 1);

    store.set_fail_saves(false);
    assert!(session.save().await.is_ok());
}

#[tokio::test]
async fn test_concurrent_sessions_conflict() {
    let store = Arc::new(MemoryPageStore::new());
    let (mut first, _) = session_on(store.clone());
    let (mut second, second_log) = session_on(store.clone());
    first.open(PageAddress::Homepage).await.unwrap();
    second.open(PageAddress::Homepage).await.unwrap();

    first.add_element(ElementType::Hero).unwrap();
    first.save().await.unwrap();

    second.add_element(ElementType::Cta).unwrap();
    let result = second.save().await;
    assert!(matches!(
        result,
        Err(EditorError::Store(StoreError::Conflict {
            expected: 0,
            actual: 1
        }))
    ));
    assert_eq!(second_log.errors().len(), 1);

    // Last writer wins when forced
    assert_eq!(second.save_with(SaveMode::Force).await.unwrap(), 2);
    let stored = store.load_page("shop", &PageAddress::Homepage).await.unwrap();
    assert_eq!(stored.content.elements()[0].element_type(), Some(ElementType::Cta));
}

#[tokio::test]
async fn test_legal_page_editing() {
    let store = Arc::new(MemoryPageStore::new());
    let (mut session, _) = session_on(store.clone());
    let address = PageAddress::Legal(LegalKey::Privacy);
    session.open(address.clone()).await.unwrap();

    assert!(matches!(
        session.add_element(ElementType::Text),
        Err(EditorError::Mutation(_))
    ));

    session
        .update_legal("Privacy Policy", "We keep your data safe.")
        .unwrap();
    session.save().await.unwrap();

    let stored = store.load_page("shop", &address).await.unwrap();
    match stored.content {
        PageContent::Legal(page) => assert_eq!(page.content, "We keep your data safe."),
        other => panic!("Expected legal page, got {:?}", other),
    }
}

#[tokio::test]
async fn test_file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FilePageStore::new(dir.path()));
    let (mut session, _) = session_on(store);

    session.open(PageAddress::Homepage).await.unwrap();
    let columns_id = session.add_element(ElementType::Columns).unwrap();
    session
        .add_element_to_column(&columns_id, 1, ElementType::Text)
        .unwrap();
    session.save().await.unwrap();

    assert!(dir.path().join("shop/pages/homepage.json").exists());

    let (mut reopened, _) = session_on(Arc::new(FilePageStore::new(dir.path())));
    reopened.open(PageAddress::Homepage).await.unwrap();
    assert_eq!(reopened.elements(), session.elements());
    assert_eq!(reopened.document().revision(), 1);

    // Ids handed out after a reload never collide with stored ones
    let fresh = reopened.add_element(ElementType::Hero).unwrap();
    assert_ne!(fresh, columns_id);
    assert!(reopened.elements()[0].children()[0].id != fresh);
}

#[tokio::test]
async fn test_file_store_custom_pages() {
    let dir = tempfile::tempdir().unwrap();
    let store = FilePageStore::new(dir.path());

    let about = store.create_custom_page("shop", "About", None).await.unwrap();
    let contact = store
        .create_custom_page("shop", "Contact Us", Some("contact"))
        .await
        .unwrap();

    let pages = store.list_custom_pages("shop").await.unwrap();
    assert_eq!(pages, vec![about.clone(), contact]);

    let missing = store
        .load_page("shop", &PageAddress::Custom("nope".to_string()))
        .await;
    assert!(matches!(missing, Err(StoreError::PageNotFound(_))));

    let page = store
        .load_page("shop", &PageAddress::Custom(about.id))
        .await
        .unwrap();
    assert_eq!(page.revision, 0);
    assert!(page.content.elements().is_empty());
}

#[tokio::test]
async fn test_file_store_stale_save_conflicts() {
    let dir = tempfile::tempdir().unwrap();
    let store = FilePageStore::new(dir.path());
    let content = PageContent::Elements(Vec::new());

    store
        .save_page("shop", &PageAddress::Homepage, &content, SaveMode::IfRevision(0))
        .await
        .unwrap();
    let stale = store
        .save_page("shop", &PageAddress::Homepage, &content, SaveMode::IfRevision(0))
        .await;

    assert_eq!(stale, Err(StoreError::Conflict { expected: 0, actual: 1 }));
}
