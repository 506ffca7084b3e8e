//! Render boundary types.
//!
//! The core produces these snapshots and never reads them back; an
//! external renderer interprets them and reports user intent through
//! [`ScreenAction`]s, which carry operations from the navigation vocabulary.

use crate::nav::{ModelKind, NodePath, Operation};

/// What a user-facing action does when triggered.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionCommand {
    /// Apply an operation to the node at the action's path.
    Apply(Operation<String>),
    /// Animate the carousel at the action's path to an index.
    ScrollAnimated(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenAction {
    pub label: String,
    pub path: NodePath,
    pub command: ActionCommand,
}

impl ScreenAction {
    pub fn apply(label: impl Into<String>, path: NodePath, operation: Operation<String>) -> Self {
        Self {
            label: label.into(),
            path,
            command: ActionCommand::Apply(operation),
        }
    }

    pub fn scroll(label: impl Into<String>, path: NodePath, index: usize) -> Self {
        Self {
            label: label.into(),
            path,
            command: ActionCommand::ScrollAnimated(index),
        }
    }
}

/// Output of a leaf screen.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScreenView {
    pub title: String,
    pub lines: Vec<String>,
    pub actions: Vec<ScreenAction>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContainerView {
    pub path: NodePath,
    pub kind: ModelKind,
    pub targets: Vec<String>,
    pub position: f32,
    pub foreground: usize,
    pub revision: u64,
    /// Children keyed by path segment, in active-sequence order.
    pub children: Vec<(String, NodeView)>,
    pub actions: Vec<ScreenAction>,
}

impl ContainerView {
    pub fn foreground_child(&self) -> Option<&NodeView> {
        let segment = self.targets.get(self.foreground)?;
        self.children
            .iter()
            .find(|(seg, _)| seg == segment)
            .map(|(_, view)| view)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeView {
    Leaf { path: NodePath, screen: ScreenView },
    Container(ContainerView),
}

impl NodeView {
    pub fn path(&self) -> &NodePath {
        match self {
            Self::Leaf { path, .. } => path,
            Self::Container(container) => &container.path,
        }
    }

    /// Nodes from this one down to the visible leaf.
    pub fn foreground_chain(&self) -> Vec<&NodeView> {
        let mut chain = vec![self];
        let mut current = self;
        while let NodeView::Container(container) = current {
            match container.foreground_child() {
                Some(child) => {
                    chain.push(child);
                    current = child;
                }
                None => break,
            }
        }
        chain
    }

    /// Actions available on the visible path, outermost first.
    pub fn visible_actions(&self) -> Vec<&ScreenAction> {
        self.foreground_chain()
            .into_iter()
            .flat_map(|view| match view {
                NodeView::Leaf { screen, .. } => screen.actions.iter(),
                NodeView::Container(container) => container.actions.iter(),
            })
            .collect()
    }

    /// Indented outline of the subtree; `*` marks foreground children.
    ///
    /// ```text
    /// root [back_stack first,second @1]
    ///   first
    /// * second "Second"
    /// ```
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.write_outline(&mut out, 0, true);
        out
    }

    fn write_outline(&self, out: &mut String, depth: usize, foreground: bool) {
        let marker = if foreground && depth > 0 { "* " } else { "  " };
        let indent = "  ".repeat(depth.saturating_sub(1));
        let name = self.path().last();
        match self {
            NodeView::Leaf { screen, .. } => {
                out.push_str(&format!("{indent}{marker}{name} \"{}\"\n", screen.title));
            }
            NodeView::Container(container) => {
                out.push_str(&format!(
                    "{indent}{marker}{name} [{} {} @{}]\n",
                    container.kind,
                    container.targets.join(","),
                    container.position
                ));
                let fg = container.targets.get(container.foreground);
                for (segment, child) in &container.children {
                    child.write_outline(out, depth + 1, fg == Some(segment));
                }
            }
        }
    }

    /// The visible leaf screen, if the chain ends in one.
    pub fn visible_screen(&self) -> Option<&ScreenView> {
        match self.foreground_chain().last().copied() {
            Some(NodeView::Leaf { screen, .. }) => Some(screen),
            _ => None,
        }
    }
}
