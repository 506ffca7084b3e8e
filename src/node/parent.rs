use std::collections::HashMap;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::nav::{
    ChildKey, ModelKind, NavError, NavState, NavTarget, NavigationModel, NodePath, Operation,
};
use crate::node::context::NodeContext;
use crate::node::resolver::ChildResolver;
use crate::node::view::{ContainerView, NodeView, ScreenAction};
use crate::node::Node;

/// Counts from one reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub constructed: usize,
    pub released: usize,
}

/// Shape of an animated carousel scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Number of `ScrollTo` steps, the last one landing on the target.
    pub steps: u32,
    /// Delay before each step.
    pub step: Duration,
}

impl Default for Transition {
    fn default() -> Self {
        Self {
            steps: 6,
            step: Duration::from_millis(40),
        }
    }
}

/// Node that owns a navigation model and one child per active element.
pub struct ParentNode<T: NavTarget> {
    ctx: NodeContext,
    model: NavigationModel<T>,
    resolver: Box<dyn ChildResolver<T>>,
    children: HashMap<ChildKey<T>, Box<dyn Node>>,
    actions: Vec<ScreenAction>,
    animation: Option<CancellationToken>,
    released: bool,
}

impl<T: NavTarget> ParentNode<T> {
    /// Load the model (persisted or `initial`) and construct the initial children.
    ///
    /// Fails if any initial child cannot be resolved; children built up to
    /// that point are torn down with the partially built node.
    pub fn new(
        ctx: NodeContext,
        initial: NavState<T>,
        resolver: impl ChildResolver<T> + 'static,
    ) -> Result<Self, NavError> {
        let model = NavigationModel::restore(ctx.path().clone(), ctx.store(), initial)?;
        let mut node = Self {
            ctx,
            model,
            resolver: Box::new(resolver),
            children: HashMap::new(),
            actions: Vec::new(),
            animation: None,
            released: false,
        };
        node.reconcile()?;
        tracing::debug!(
            path = %node.ctx.path(),
            kind = %node.model.state().kind(),
            children = node.children.len(),
            "Node mounted"
        );
        Ok(node)
    }

    /// Node-level actions shown alongside the children (tab bar, carousel buttons).
    pub fn with_actions(mut self, actions: Vec<ScreenAction>) -> Self {
        self.actions = actions;
        self
    }

    pub fn boxed(self) -> Box<dyn Node> {
        Box::new(self)
    }

    pub fn model(&self) -> &NavigationModel<T> {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut NavigationModel<T> {
        &mut self.model
    }

    pub fn context(&self) -> &NodeContext {
        &self.ctx
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn child(&self, key: &ChildKey<T>) -> Option<&dyn Node> {
        self.children.get(key).map(|child| child.as_ref())
    }

    /// Apply an operation, then bring the children in line with the new state.
    ///
    /// If a newly required child cannot be resolved the model change stands,
    /// the child stays absent and the error is returned; the next
    /// reconciliation retries it.
    ///
    /// A direct carousel move stops any animation in flight.
    pub fn apply(&mut self, operation: Operation<T>) -> Result<u64, NavError> {
        self.ensure_active()?;
        if matches!(
            operation,
            Operation::First | Operation::Last | Operation::ScrollTo(_)
        ) {
            self.stop_animation();
        }
        self.apply_posted(operation)
    }

    fn apply_posted(&mut self, operation: Operation<T>) -> Result<u64, NavError> {
        self.ensure_active()?;
        let revision = self.model.apply(operation)?;
        self.reconcile()?;
        Ok(revision)
    }

    /// Match the child table to the active sequence.
    ///
    /// Children still present are kept as they are, children whose keys left
    /// the sequence are discarded, and missing ones are resolved. Running it
    /// against an unchanged sequence does nothing.
    pub fn reconcile(&mut self) -> Result<ReconcileStats, NavError> {
        self.ensure_active()?;
        let desired = ChildKey::for_sequence(self.model.state().elements());
        let mut stats = ReconcileStats::default();

        let stale: Vec<ChildKey<T>> = self
            .children
            .keys()
            .filter(|key| !desired.contains(key))
            .cloned()
            .collect();
        for key in stale {
            if let Some(mut child) = self.children.remove(&key) {
                child.discard();
                stats.released += 1;
            }
        }

        let mut failure = None;
        for key in desired {
            if self.children.contains_key(&key) {
                continue;
            }
            let child_ctx = self.ctx.child(&key.segment());
            match self.resolver.resolve(&key.target, child_ctx) {
                Ok(child) => {
                    self.children.insert(key, child);
                    stats.constructed += 1;
                }
                Err(err) => {
                    tracing::error!(
                        path = %self.ctx.path(),
                        target = key.target.as_str(),
                        error = %err,
                        "Failed to construct child"
                    );
                    failure.get_or_insert(NavError::UnresolvedTarget {
                        path: self.ctx.path().child(&key.segment()),
                        target: key.target.as_str().to_string(),
                    });
                }
            }
        }

        if stats.constructed > 0 || stats.released > 0 {
            tracing::debug!(
                path = %self.ctx.path(),
                constructed = stats.constructed,
                released = stats.released,
                "Children reconciled"
            );
        }

        match failure {
            Some(err) => Err(err),
            None => Ok(stats),
        }
    }

    /// Scroll a carousel to `index` through fractional positions.
    ///
    /// Steps are posted through the dispatcher and applied by the host in
    /// order. The task lives on this node's scope and stops when the node
    /// is released or another animation starts.
    pub fn animate_to(&mut self, index: usize, transition: Transition) -> Result<(), NavError> {
        self.ensure_active()?;
        let state = self.model.state();
        if state.kind() != ModelKind::Carousel {
            return Err(NavError::invalid(
                "animate",
                format!("not supported by a {}", state.kind()),
            ));
        }
        if index >= state.len() {
            return Err(NavError::invalid(
                "animate",
                format!("index {} outside 0..{}", index, state.len()),
            ));
        }

        let from = state.position();
        let to = index as f32;
        let steps = transition.steps.max(1);
        let path = self.ctx.path().clone();
        let dispatcher = self.ctx.dispatcher().clone();

        self.stop_animation();
        let token = self.ctx.scope().token().child_token();
        self.animation = Some(token.clone());

        self.ctx.scope().launch("carousel-scroll", move |_| async move {
            for step in 1..=steps {
                tokio::select! {
                    _ = token.cancelled() => return,
                    _ = tokio::time::sleep(transition.step) => {}
                }
                let position = if step == steps {
                    to
                } else {
                    from + (to - from) * step as f32 / steps as f32
                };
                if !dispatcher.post(&token, path.clone(), Operation::ScrollTo(position)) {
                    return;
                }
            }
        })?;
        Ok(())
    }

    fn stop_animation(&mut self) {
        if let Some(token) = self.animation.take() {
            token.cancel();
        }
    }

    fn ensure_active(&self) -> Result<(), NavError> {
        if self.released {
            Err(NavError::Released {
                path: self.ctx.path().clone(),
            })
        } else {
            Ok(())
        }
    }

    fn route(
        &mut self,
        route: &[String],
        operation: Operation<String>,
        origin: Origin,
    ) -> Result<u64, NavError> {
        self.ensure_active()?;
        match route.split_first() {
            None => {
                let operation =
                    operation
                        .resolve::<T>()
                        .map_err(|target| NavError::UnresolvedTarget {
                            path: self.ctx.path().clone(),
                            target,
                        })?;
                match origin {
                    Origin::Direct => self.apply(operation),
                    Origin::Posted => self.apply_posted(operation),
                }
            }
            Some((segment, rest)) => {
                let path = self.ctx.path().child(segment);
                match self.child_by_segment(segment) {
                    Some(child) => match origin {
                        Origin::Direct => child.dispatch(rest, operation),
                        Origin::Posted => child.dispatch_posted(rest, operation),
                    },
                    None => Err(NavError::NodeNotFound { path }),
                }
            }
        }
    }

    fn foreground_child_mut(&mut self) -> Option<&mut Box<dyn Node>> {
        let state = self.model.state();
        let index = state.foreground_index();
        let key = ChildKey::for_sequence(state.elements()).into_iter().nth(index)?;
        self.children.get_mut(&key)
    }

    fn child_by_segment(&mut self, segment: &str) -> Option<&mut Box<dyn Node>> {
        self.children
            .iter_mut()
            .find(|(key, _)| key.segment() == segment)
            .map(|(_, child)| child)
    }
}

/// Where a routed operation came from.
#[derive(Clone, Copy)]
enum Origin {
    Direct,
    Posted,
}

impl<T: NavTarget> Node for ParentNode<T> {
    fn path(&self) -> &NodePath {
        self.ctx.path()
    }

    fn view(&self) -> NodeView {
        let state = self.model.state();
        let keys = ChildKey::for_sequence(state.elements());
        let targets: Vec<String> = keys.iter().map(ChildKey::segment).collect();
        let children = keys
            .iter()
            .filter_map(|key| {
                self.children
                    .get(key)
                    .map(|child| (key.segment(), child.view()))
            })
            .collect();

        NodeView::Container(ContainerView {
            path: self.ctx.path().clone(),
            kind: state.kind(),
            targets,
            position: state.position(),
            foreground: state.foreground_index(),
            revision: self.model.revision(),
            children,
            actions: self.actions.clone(),
        })
    }

    fn dispatch(
        &mut self,
        route: &[String],
        operation: Operation<String>,
    ) -> Result<u64, NavError> {
        self.route(route, operation, Origin::Direct)
    }

    fn dispatch_posted(
        &mut self,
        route: &[String],
        operation: Operation<String>,
    ) -> Result<u64, NavError> {
        self.route(route, operation, Origin::Posted)
    }

    fn animate(
        &mut self,
        route: &[String],
        index: usize,
        transition: Transition,
    ) -> Result<(), NavError> {
        self.ensure_active()?;
        match route.split_first() {
            None => self.animate_to(index, transition),
            Some((segment, rest)) => {
                let path = self.ctx.path().child(segment);
                match self.child_by_segment(segment) {
                    Some(child) => child.animate(rest, index, transition),
                    None => Err(NavError::NodeNotFound { path }),
                }
            }
        }
    }

    fn handle_back(&mut self) -> bool {
        if self.released {
            return false;
        }
        if let Some(child) = self.foreground_child_mut() {
            if child.handle_back() {
                return true;
            }
        }
        let state = self.model.state();
        if state.kind() == ModelKind::BackStack && state.len() > 1 {
            return self.apply(Operation::Pop).is_ok();
        }
        false
    }

    fn save_state(&self) {
        if self.released {
            return;
        }
        self.model.persist();
        for child in self.children.values() {
            child.save_state();
        }
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        for (_, mut child) in self.children.drain() {
            child.release();
        }
        self.ctx.scope().cancel_all();
        tracing::debug!(path = %self.ctx.path(), "Node released");
    }

    fn discard(&mut self) {
        self.release();
        self.ctx.store().remove(self.ctx.path());
    }

    fn is_released(&self) -> bool {
        self.released
    }
}
