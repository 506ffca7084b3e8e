use crate::nav::{NavError, NodePath, Operation};
use crate::node::context::NodeContext;
use crate::node::view::{NodeView, ScreenView};
use crate::node::Node;

/// Externally supplied screen content for a leaf.
///
/// The core calls `render` when building a view and passes the result
/// through untouched.
pub trait Screen: Send {
    fn render(&self) -> ScreenView;
}

/// Node without a navigation model.
pub struct LeafNode {
    ctx: NodeContext,
    screen: Box<dyn Screen>,
    released: bool,
}

impl LeafNode {
    pub fn new(ctx: NodeContext, screen: impl Screen + 'static) -> Self {
        Self {
            ctx,
            screen: Box::new(screen),
            released: false,
        }
    }

    /// Convenience for resolvers returning `Box<dyn Node>`.
    pub fn boxed(ctx: NodeContext, screen: impl Screen + 'static) -> Box<dyn Node> {
        Box::new(Self::new(ctx, screen))
    }

    pub fn context(&self) -> &NodeContext {
        &self.ctx
    }
}

impl Node for LeafNode {
    fn path(&self) -> &NodePath {
        self.ctx.path()
    }

    fn view(&self) -> NodeView {
        NodeView::Leaf {
            path: self.ctx.path().clone(),
            screen: self.screen.render(),
        }
    }

    fn dispatch(
        &mut self,
        route: &[String],
        operation: Operation<String>,
    ) -> Result<u64, NavError> {
        if self.released {
            return Err(NavError::Released {
                path: self.ctx.path().clone(),
            });
        }
        match route.first() {
            None => Err(NavError::invalid(
                operation.name(),
                format!("leaf '{}' has no navigation model", self.ctx.path()),
            )),
            Some(segment) => Err(NavError::NodeNotFound {
                path: self.ctx.path().child(segment),
            }),
        }
    }

    fn handle_back(&mut self) -> bool {
        false
    }

    fn save_state(&self) {}

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.ctx.scope().cancel_all();
        tracing::debug!(path = %self.ctx.path(), "Leaf released");
    }

    fn discard(&mut self) {
        self.release();
        self.ctx.store().remove(self.ctx.path());
    }

    fn is_released(&self) -> bool {
        self.released
    }
}
