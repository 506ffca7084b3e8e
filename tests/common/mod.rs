//! Shared test utilities: a small target set and node builders.

#![allow(dead_code, unused_imports)]

use navtree::nav::{NavError, NavState, NavTarget, NodePath};
use navtree::node::{
    mount_root, CommandQueue, Dispatcher, LeafNode, NavHost, Node, NodeContext, ParentNode,
    RootContext, Screen, ScreenView,
};
use navtree::store::{MemoryStateStore, StateStore};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Page {
    Home,
    Settings,
    Profile,
}

impl NavTarget for Page {
    fn all() -> &'static [Self] {
        &[Self::Home, Self::Settings, Self::Profile]
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Settings => "settings",
            Self::Profile => "profile",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slide {
    A,
    B,
}

impl NavTarget for Slide {
    fn all() -> &'static [Self] {
        &[Self::A, Self::B]
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::A => "a",
            Self::B => "b",
        }
    }
}

/// Screen that only shows its title.
pub struct Titled(pub &'static str);

impl Screen for Titled {
    fn render(&self) -> ScreenView {
        ScreenView {
            title: self.0.to_string(),
            ..ScreenView::default()
        }
    }
}

/// Paths of every child the resolver has built, in order.
pub type BuildLog = Arc<Mutex<Vec<String>>>;

/// Resolver producing titled leaves and recording each construction.
pub fn leaf_resolver<T: NavTarget>(
    log: BuildLog,
) -> impl Fn(&T, NodeContext) -> Result<Box<dyn Node>, NavError> + Send + 'static {
    move |target: &T, ctx: NodeContext| {
        log.lock().push(ctx.path().to_string());
        Ok(LeafNode::boxed(ctx, Titled(target.as_str())))
    }
}

/// Root context over a fresh in-memory store, plus the store and queue.
pub fn root_ctx() -> (NodeContext, MemoryStateStore, CommandQueue) {
    let store = MemoryStateStore::new();
    let (ctx, queue) = root_ctx_with(&store);
    (ctx, store, queue)
}

pub fn root_ctx_with(store: &MemoryStateStore) -> (NodeContext, CommandQueue) {
    let (dispatcher, queue) = Dispatcher::channel();
    let shared: Arc<dyn StateStore> = Arc::new(store.clone());
    (NodeContext::root(shared, dispatcher), queue)
}

/// Back stack of pages rooted at `Home`, with leaf children.
pub fn page_stack(ctx: NodeContext, log: BuildLog) -> ParentNode<Page> {
    ParentNode::new(ctx, NavState::back_stack(Page::Home), leaf_resolver(log))
        .expect("stack mounts")
}

/// Host with a page back stack at the root.
pub fn page_host(store: &MemoryStateStore) -> NavHost {
    let shared: Arc<dyn StateStore> = Arc::new(store.clone());
    mount_root(RootContext { store: shared }, |ctx| {
        Ok(page_stack(ctx, BuildLog::default()).boxed())
    })
    .expect("host mounts")
}

pub fn foreground_title(node: &dyn Node) -> Option<String> {
    node.view().visible_screen().map(|s| s.title.clone())
}

pub fn path(s: &str) -> NodePath {
    NodePath::parse(s).expect("valid path")
}
