mod support;

use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;
use support::{RecordingStore, RecordingView, StoreOp};
use synclist_core::{
    DocumentId, ListController, ListIntent, ListItem, MemoryStore, RemoteStore, SubmitEvent,
    TodoItem,
};

type TodoController = ListController<TodoItem, RecordingView>;

fn todo_controller(store: Rc<dyn RemoteStore>) -> (TodoController, Rc<RefCell<RecordingView>>) {
    let view = Rc::new(RefCell::new(RecordingView::default()));
    let controller = ListController::new(store, "alice", Rc::clone(&view));
    (controller, view)
}

#[tokio::test]
async fn handle_add_appends_the_stored_entity_with_its_assigned_id() {
    let store = Rc::new(MemoryStore::new());
    let (mut controller, view) = todo_controller(store.clone());
    controller.start().await;

    controller.handle_add("buy milk").await;

    let items = controller.model().items();
    assert_eq!(items.len(), 1);
    let item = &items[0];
    assert!(item.id.is_assigned());
    assert_eq!(item.title, "buy milk");
    assert!(!item.completed);
    assert_eq!(item.owner, "alice");

    // The stored document's own id field carries the native key.
    let doc_id = DocumentId::new(item.id.as_str());
    let document = store
        .get(TodoItem::COLLECTION, &doc_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(document["id"], item.id.as_str());

    // One render for the initial (empty) population, one for the append.
    let view = view.borrow();
    assert_eq!(view.renders.len(), 2);
    assert_eq!(view.renders[1], (vec!["buy milk".to_string()], 1));
}

#[tokio::test]
async fn handle_add_abandons_the_item_when_the_create_is_rejected() {
    let store = Rc::new(RecordingStore::new());
    let (mut controller, view) = todo_controller(store.clone());
    controller.start().await;

    store.fail_writes.set(true);
    controller.handle_add("doomed").await;

    assert_eq!(controller.model().total_count(), 0);
    assert_eq!(view.borrow().renders.len(), 1);
}

#[tokio::test]
async fn sequential_toggles_issue_two_remote_updates_in_order() {
    let store = Rc::new(RecordingStore::new());
    let (mut controller, _view) = todo_controller(store.clone());
    controller.start().await;

    controller.handle_add("toggle me").await;
    let id = controller.model().items()[0].id.clone();

    controller.handle_update(&id, true).await;
    controller.handle_update(&id, false).await;

    assert!(!controller.model().items()[0].completed);
    assert_eq!(
        store.completed_updates(),
        vec![
            (id.as_str().to_string(), json!(true)),
            (id.as_str().to_string(), json!(false)),
        ]
    );
}

#[tokio::test]
async fn optimistic_update_is_visible_locally_before_any_remote_confirmation() {
    let store = Rc::new(RecordingStore::new());
    let (mut controller, _view) = todo_controller(store.clone());
    controller.start().await;

    controller.handle_add("optimism").await;
    let id = controller.model().items()[0].id.clone();

    // Remote writes now fail; the local mutation must stand regardless.
    store.fail_writes.set(true);
    controller.handle_update(&id, true).await;

    assert!(controller.model().items()[0].completed);

    let document = store
        .get(TodoItem::COLLECTION, &DocumentId::new(id.as_str()))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(document["completed"], false, "no remote write landed");
}

#[tokio::test]
async fn handle_delete_removes_locally_and_issues_the_remote_delete() {
    let store = Rc::new(RecordingStore::new());
    let (mut controller, _view) = todo_controller(store.clone());
    controller.start().await;

    controller.handle_add("short lived").await;
    let id = controller.model().items()[0].id.clone();

    controller.handle_delete(&id).await;

    assert_eq!(controller.model().total_count(), 0);
    let deletes: Vec<StoreOp> = store
        .ops()
        .into_iter()
        .filter(|op| matches!(op, StoreOp::Delete { .. }))
        .collect();
    assert_eq!(
        deletes,
        vec![StoreOp::Delete {
            collection: TodoItem::COLLECTION.to_string(),
            id: id.as_str().to_string(),
        }]
    );
}

#[tokio::test]
async fn delete_failure_does_not_restore_the_local_item() {
    let store = Rc::new(RecordingStore::new());
    let (mut controller, _view) = todo_controller(store.clone());
    controller.start().await;

    controller.handle_add("stubborn").await;
    let id = controller.model().items()[0].id.clone();

    store.fail_writes.set(true);
    controller.handle_delete(&id).await;

    assert_eq!(controller.model().total_count(), 0);
}

#[tokio::test]
async fn handle_submit_prevents_default_and_clears_the_input() {
    let store = Rc::new(MemoryStore::new());
    let (mut controller, _view) = todo_controller(store.clone());
    controller.start().await;

    let mut event = SubmitEvent::new("from the form");
    controller.handle_submit(&mut event).await;

    assert!(event.is_default_prevented());
    assert_eq!(event.take_input(), "");
    assert_eq!(controller.model().items()[0].title, "from the form");
}

#[tokio::test]
async fn handle_submit_is_inert_while_unmounted() {
    let store = Rc::new(MemoryStore::new());
    let (mut controller, _view) = todo_controller(store.clone());
    controller.start().await;
    controller.unmount();

    let mut event = SubmitEvent::new("ignored");
    controller.handle_submit(&mut event).await;

    assert!(!event.is_default_prevented());
    assert_eq!(controller.model().total_count(), 0);
}

#[tokio::test]
async fn intents_dispatch_to_the_matching_handlers() {
    let store = Rc::new(MemoryStore::new());
    let (mut controller, _view) = todo_controller(store.clone());
    controller.start().await;

    controller
        .handle_intent(ListIntent::Add {
            title: "via intent".to_string(),
        })
        .await;
    let id = controller.model().items()[0].id.clone();

    controller
        .handle_intent(ListIntent::Update {
            id: id.clone(),
            completed: true,
        })
        .await;
    assert!(controller.model().items()[0].completed);

    controller.handle_intent(ListIntent::Delete { id }).await;
    assert_eq!(controller.model().total_count(), 0);
}
