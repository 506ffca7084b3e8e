mod common;

use std::time::Duration;

use common::*;
use navtree::nav::{NavError, NavState, NavTarget, Operation};
use navtree::node::{CommandQueue, Node, ParentNode, Transition};

fn carousel() -> (ParentNode<Slide>, CommandQueue) {
    let (ctx, _store, queue) = root_ctx();
    let node = ParentNode::new(
        ctx,
        NavState::carousel(Slide::all().to_vec(), 0.0).unwrap(),
        leaf_resolver(BuildLog::default()),
    )
    .unwrap();
    (node, queue)
}

fn transition() -> Transition {
    Transition {
        steps: 4,
        step: Duration::from_millis(10),
    }
}

#[tokio::test]
async fn first_and_last_jump() {
    let (mut node, _queue) = carousel();

    node.apply(Operation::Last).unwrap();
    assert_eq!(node.model().state().position(), 1.0);
    assert_eq!(foreground_title(&node).as_deref(), Some("b"));

    node.apply(Operation::First).unwrap();
    assert_eq!(node.model().state().position(), 0.0);
    assert_eq!(foreground_title(&node).as_deref(), Some("a"));
}

#[tokio::test]
async fn scroll_to_accepts_fractions_within_bounds() {
    let (mut node, _queue) = carousel();

    node.apply(Operation::ScrollTo(0.4)).unwrap();
    assert!(node.model().state().is_transitioning());
    assert_eq!(node.model().state().foreground(), Some(&Slide::A));

    node.apply(Operation::ScrollTo(0.6)).unwrap();
    assert_eq!(node.model().state().foreground(), Some(&Slide::B));

    let err = node.apply(Operation::ScrollTo(1.5)).unwrap_err();
    assert!(matches!(err, NavError::InvalidOperation { .. }));
    assert_eq!(node.model().state().position(), 0.6);
}

#[tokio::test]
async fn carousel_rejects_stack_and_tab_operations() {
    let (mut node, _queue) = carousel();
    assert!(node.apply(Operation::Push(Slide::A)).is_err());
    assert!(node.apply(Operation::SelectIndex(1)).is_err());
    assert_eq!(node.model().revision(), 0);
}

#[tokio::test(start_paused = true)]
async fn animated_scroll_posts_intermediate_positions() {
    let (mut node, mut queue) = carousel();
    node.animate_to(1, transition()).unwrap();

    let mut positions = Vec::new();
    for _ in 0..4 {
        let command = queue.next().await.unwrap();
        assert_eq!(&command.path, node.path());
        if let Operation::ScrollTo(position) = command.operation {
            positions.push(position);
        }
        node.dispatch_posted(&[], command.operation).unwrap();
    }

    assert_eq!(positions, vec![0.25, 0.5, 0.75, 1.0]);
    assert_eq!(node.model().state().position(), 1.0);
    assert!(!node.model().state().is_transitioning());
}

#[tokio::test(start_paused = true)]
async fn release_cancels_in_flight_scroll() {
    let (mut node, mut queue) = carousel();
    node.animate_to(1, transition()).unwrap();

    let first = queue.next().await.unwrap();
    node.dispatch_posted(&[], first.operation).unwrap();
    let position = node.model().state().position();

    node.release();
    tokio::time::sleep(Duration::from_secs(1)).await;

    assert!(queue.try_next().is_none());
    assert_eq!(node.model().state().position(), position);
    assert_eq!(node.context().scope().active_tasks(), 0);
    assert!(matches!(
        node.apply(Operation::Last),
        Err(NavError::Released { .. })
    ));
}

#[tokio::test(start_paused = true)]
async fn new_animation_supersedes_the_running_one() {
    let (mut node, mut queue) = carousel();
    node.animate_to(1, transition()).unwrap();
    // One step of the first scroll is queued but not applied yet.
    tokio::time::sleep(Duration::from_millis(15)).await;
    node.animate_to(0, transition()).unwrap();

    let mut stale = 0;
    let mut positions = Vec::new();
    while positions.len() < 4 {
        let command = queue.next().await.unwrap();
        if command.is_stale() {
            stale += 1;
            continue;
        }
        if let Operation::ScrollTo(position) = command.operation {
            positions.push(position);
        }
        node.dispatch_posted(&[], command.operation).unwrap();
    }

    assert_eq!(stale, 1);
    assert_eq!(positions, vec![0.0, 0.0, 0.0, 0.0]);
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(queue.try_next().is_none());
    assert_eq!(node.model().state().position(), 0.0);
}

#[tokio::test(start_paused = true)]
async fn direct_move_stops_the_animation() {
    let (mut node, mut queue) = carousel();
    node.animate_to(1, transition()).unwrap();

    let first = queue.next().await.unwrap();
    node.dispatch_posted(&[], first.operation).unwrap();
    assert_eq!(node.model().state().position(), 0.25);

    node.apply(Operation::First).unwrap();
    assert!(first.origin.is_cancelled());
    tokio::time::sleep(Duration::from_secs(1)).await;

    assert!(queue.try_next().is_none());
    assert_eq!(node.model().state().position(), 0.0);
    assert_eq!(node.context().scope().active_tasks(), 0);
}

#[tokio::test]
async fn animate_rejected_on_non_carousel() {
    let (ctx, _store, _queue) = root_ctx();
    let mut stack = page_stack(ctx, BuildLog::default());
    assert!(matches!(
        stack.animate_to(0, transition()),
        Err(NavError::InvalidOperation { .. })
    ));
}
