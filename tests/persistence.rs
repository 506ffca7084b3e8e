//! Saved state survives remounting, and bad entries fall back to the initial state.

mod common;

use std::sync::Arc;

use common::*;
use navtree::nav::{NavState, NavTarget, NodePath, Operation};
use navtree::node::{mount_root, Node, ParentNode, RootContext};
use navtree::store::{encode, FileStateStore, MemoryStateStore, StateStore};
use tempfile::TempDir;

fn remount_stack(store: &MemoryStateStore) -> ParentNode<Page> {
    let (ctx, _queue) = root_ctx_with(store);
    page_stack(ctx, BuildLog::default())
}

#[tokio::test]
async fn back_stack_round_trip() {
    let store = MemoryStateStore::new();
    {
        let mut stack = remount_stack(&store);
        stack.apply(Operation::Push(Page::Settings)).unwrap();
        stack.apply(Operation::Push(Page::Profile)).unwrap();
        stack.apply(Operation::Replace(Page::Home)).unwrap();
        stack.release();
    }

    let stack = remount_stack(&store);
    assert_eq!(
        stack.model().state().elements(),
        &[Page::Home, Page::Settings, Page::Home]
    );
    assert_eq!(stack.model().state().foreground_index(), 2);
    assert_eq!(stack.model().revision(), 0);
    assert_eq!(foreground_title(&stack).as_deref(), Some("home"));
}

#[tokio::test]
async fn nested_state_restored_per_path() {
    let store = MemoryStateStore::new();
    let slides_at = |ctx| {
        ParentNode::new(
            ctx,
            NavState::carousel(Slide::all().to_vec(), 0.0).unwrap(),
            leaf_resolver(BuildLog::default()),
        )
        .map(ParentNode::boxed)
    };

    {
        let (ctx, _queue) = root_ctx_with(&store);
        let mut root = slides_at(ctx.child("outer")).unwrap();
        root.dispatch(&[], Operation::Last).unwrap();
        root.release();
    }

    let (ctx, _queue) = root_ctx_with(&store);
    let root = slides_at(ctx.child("outer")).unwrap();
    assert_eq!(
        root.view().foreground_chain()[1].path(),
        &path("root/outer/b")
    );
}

#[tokio::test]
async fn fractional_carousel_position_snaps_on_restore() {
    let store = MemoryStateStore::new();
    let slides = || NavState::carousel(Slide::all().to_vec(), 0.0).unwrap();
    {
        let (ctx, _queue) = root_ctx_with(&store);
        let mut node = ParentNode::new(ctx, slides(), leaf_resolver(BuildLog::default())).unwrap();
        node.apply(Operation::ScrollTo(0.7)).unwrap();
    }

    let (ctx, _queue) = root_ctx_with(&store);
    let node = ParentNode::new(ctx, slides(), leaf_resolver(BuildLog::default())).unwrap();
    assert_eq!(node.model().state().position(), 1.0);
    assert!(!node.model().state().is_transitioning());
}

#[tokio::test]
async fn corrupt_entry_falls_back_to_initial() {
    let store = MemoryStateStore::new();
    store.insert_raw(NodePath::root(), "{not json");

    let stack = remount_stack(&store);
    assert_eq!(stack.model().state().elements(), &[Page::Home]);
    // The fallback is written back over the corrupt entry.
    let blob = store.load(&NodePath::root()).unwrap();
    assert_eq!(blob, encode(&NodePath::root(), stack.model().state()).unwrap());
}

#[tokio::test]
async fn kind_mismatch_falls_back_to_initial() {
    let store = MemoryStateStore::new();
    let tabs = NavState::tab_selector(Page::all().to_vec(), 2).unwrap();
    store.save(&NodePath::root(), &encode(&NodePath::root(), &tabs).unwrap());

    let stack = remount_stack(&store);
    assert_eq!(stack.model().state().elements(), &[Page::Home]);
}

#[tokio::test]
async fn release_keeps_state_and_discard_drops_subtree() {
    let store = MemoryStateStore::new();
    let mut stack = remount_stack(&store);
    stack.apply(Operation::Push(Page::Settings)).unwrap();
    assert!(store.load(&NodePath::root()).is_some());

    stack.release();
    assert!(store.load(&NodePath::root()).is_some());

    let mut stack = remount_stack(&store);
    stack.discard();
    assert!(store.is_empty());
}

#[tokio::test]
async fn file_store_survives_process_restart() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("nested").join("state.json");

    {
        let store: Arc<dyn StateStore> = Arc::new(FileStateStore::open(&file));
        let mut host = mount_root(RootContext { store }, |ctx| {
            Ok(page_stack(ctx, BuildLog::default()).boxed())
        })
        .unwrap();
        host.dispatch(&NodePath::root(), Operation::Push("profile".to_string()))
            .unwrap();
        host.release().unwrap();
    }
    assert!(file.exists());

    let reopened = FileStateStore::open(&file);
    assert_eq!(reopened.len(), 1);

    let store: Arc<dyn StateStore> = Arc::new(reopened);
    let host = mount_root(RootContext { store }, |ctx| {
        Ok(page_stack(ctx, BuildLog::default()).boxed())
    })
    .unwrap();
    assert_eq!(
        host.view().visible_screen().map(|s| s.title.as_str()),
        Some("profile")
    );
}

#[tokio::test]
async fn fresh_file_store_ignores_existing_state() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("state.json");
    let store = FileStateStore::open(&file);
    store.save(&NodePath::root(), "{}");
    store.flush().unwrap();

    assert_eq!(FileStateStore::open(&file).len(), 1);
    assert!(FileStateStore::fresh(&file).is_empty());
}
