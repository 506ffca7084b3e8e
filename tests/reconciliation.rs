//! Children follow the active sequence: kept, discarded or constructed.

mod common;

use common::*;
use navtree::nav::{ChildKey, NavError, NavState, NavTarget, NodePath, Operation};
use navtree::node::{LeafNode, Node, NodeContext, ParentNode, ReconcileStats};
use navtree::store::StateStore;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn reconcile_is_idempotent() {
    let (ctx, _store, _queue) = root_ctx();
    let log = BuildLog::default();
    let mut stack = page_stack(ctx, log.clone());
    stack.apply(Operation::Push(Page::Settings)).unwrap();

    assert_eq!(stack.reconcile().unwrap(), ReconcileStats::default());
    assert_eq!(stack.reconcile().unwrap(), ReconcileStats::default());
    assert_eq!(log.lock().len(), 2);
}

#[tokio::test]
async fn popped_child_is_released_and_its_state_dropped() {
    let (ctx, store, _queue) = root_ctx();
    let tokens: Arc<Mutex<Vec<(String, CancellationToken)>>> = Arc::default();
    let seen = Arc::clone(&tokens);
    let resolver = move |target: &Page, ctx: NodeContext| -> Result<Box<dyn Node>, NavError> {
        seen.lock()
            .push((target.as_str().to_string(), ctx.scope().token()));
        match target {
            // Settings hosts its own stack so it has persisted state.
            Page::Settings => Ok(page_stack(ctx, BuildLog::default()).boxed()),
            _ => Ok(LeafNode::boxed(ctx, Titled("page"))),
        }
    };
    let mut stack =
        ParentNode::new(ctx, NavState::back_stack(Page::Home), resolver).unwrap();

    stack.apply(Operation::Push(Page::Settings)).unwrap();
    let nested = path("root/settings");
    assert!(store.load(&nested).is_some());

    stack.apply(Operation::Pop).unwrap();

    let tokens = tokens.lock();
    let (_, settings_token) = tokens.iter().find(|(name, _)| name == "settings").unwrap();
    let (_, home_token) = tokens.iter().find(|(name, _)| name == "home").unwrap();
    assert!(settings_token.is_cancelled());
    assert!(!home_token.is_cancelled());
    assert!(store.load(&nested).is_none());
    assert!(store.load(&NodePath::root()).is_some());
}

#[tokio::test]
async fn surviving_children_are_not_rebuilt() {
    let (ctx, _store, _queue) = root_ctx();
    let log = BuildLog::default();
    let mut stack = page_stack(ctx, log.clone());

    stack.apply(Operation::Push(Page::Settings)).unwrap();
    stack.apply(Operation::Push(Page::Profile)).unwrap();
    stack.apply(Operation::Pop).unwrap();
    stack.apply(Operation::Push(Page::Profile)).unwrap();

    assert_eq!(
        *log.lock(),
        vec!["root/home", "root/settings", "root/profile", "root/profile"]
    );
    assert_eq!(stack.child_count(), 3);
}

#[tokio::test]
async fn failing_resolver_leaves_child_absent() {
    let (ctx, _store, _queue) = root_ctx();
    let resolver = |target: &Page, ctx: NodeContext| -> Result<Box<dyn Node>, NavError> {
        match target {
            Page::Profile => Err(NavError::InvalidState {
                reason: "profile unavailable".to_string(),
            }),
            _ => Ok(LeafNode::boxed(ctx, Titled("page"))),
        }
    };
    let mut stack =
        ParentNode::new(ctx, NavState::back_stack(Page::Home), resolver).unwrap();

    let err = stack.apply(Operation::Push(Page::Profile)).unwrap_err();
    match err {
        NavError::UnresolvedTarget { path, target } => {
            assert_eq!(path.to_string(), "root/profile");
            assert_eq!(target, "profile");
        }
        other => panic!("unexpected error: {other}"),
    }

    // The model change stands; only the child is missing.
    assert_eq!(stack.model().state().elements(), &[Page::Home, Page::Profile]);
    assert_eq!(stack.child_count(), 1);
    assert!(stack
        .child(&ChildKey { target: Page::Home, occurrence: 0 })
        .is_some());
    assert_eq!(foreground_title(&stack), None);

    // Backing out recovers.
    stack.apply(Operation::Pop).unwrap();
    assert_eq!(foreground_title(&stack).as_deref(), Some("page"));
}

#[tokio::test]
async fn unknown_string_target_is_rejected_without_change() {
    let (ctx, _store, _queue) = root_ctx();
    let mut stack = page_stack(ctx, BuildLog::default());

    let err = stack
        .dispatch(&[], Operation::Push("billing".to_string()))
        .unwrap_err();
    assert!(matches!(err, NavError::UnresolvedTarget { ref target, .. } if target == "billing"));
    assert_eq!(stack.model().revision(), 0);
    assert_eq!(stack.child_count(), 1);
}

#[tokio::test]
async fn dispatch_routes_by_segment() {
    let (ctx, _store, _queue) = root_ctx();
    let resolver = |target: &Page, ctx: NodeContext| -> Result<Box<dyn Node>, NavError> {
        match target {
            Page::Settings => Ok(page_stack(ctx, BuildLog::default()).boxed()),
            _ => Ok(LeafNode::boxed(ctx, Titled("page"))),
        }
    };
    let mut stack =
        ParentNode::new(ctx, NavState::back_stack(Page::Home), resolver).unwrap();
    stack.apply(Operation::Push(Page::Settings)).unwrap();

    let route = vec!["settings".to_string()];
    stack
        .dispatch(&route, Operation::Push("profile".to_string()))
        .unwrap();
    assert_eq!(
        stack.view().foreground_chain().last().unwrap().path(),
        &path("root/settings/profile")
    );

    let missing = vec!["profile".to_string()];
    assert!(matches!(
        stack.dispatch(&missing, Operation::Pop),
        Err(NavError::NodeNotFound { .. })
    ));

    // Back goes to the deepest stack first.
    assert!(stack.handle_back());
    assert_eq!(stack.model().state().len(), 2);
    assert!(stack.handle_back());
    assert_eq!(stack.model().state().len(), 1);
}
