//! Sample application tree.
//!
//! ```text
//! root (back stack: first → second | spotlight | tabs)
//! ├── first        links to the others
//! ├── second       countdown while mounted
//! ├── spotlight    carousel: third, fourth
//! └── tabs         tab bar: first_destination, second_destination
//! ```

mod screens;
mod targets;

use std::time::Duration;

pub use screens::{ColorScreen, FirstScreen, SecondScreen};
pub use targets::{LinearTarget, SpotlightTarget, TabTarget};

use crate::config::Config;
use crate::lifecycle::Countdown;
use crate::nav::{NavError, NavState, NavTarget, NodePath, Operation};
use crate::node::{
    ChildResolver, LeafNode, Node, NodeContext, ParentNode, ScreenAction, Transition,
};

/// Knobs for the demo tree, usually taken from [`Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoSettings {
    pub countdown: Countdown,
    /// Animate carousel buttons instead of jumping.
    pub animate_carousel: bool,
    pub transition: Transition,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            countdown: Countdown::new(10, Duration::from_secs(1)),
            animate_carousel: true,
            transition: Transition::default(),
        }
    }
}

impl From<&Config> for DemoSettings {
    fn from(config: &Config) -> Self {
        Self {
            countdown: Countdown::new(
                config.countdown.ticks,
                Duration::from_millis(config.countdown.interval_ms),
            ),
            animate_carousel: config.carousel.animate,
            transition: Transition {
                steps: config.carousel.steps,
                step: Duration::from_millis(config.carousel.step_ms),
            },
        }
    }
}

/// Build the root back stack. Pass this to [`crate::node::mount_root`].
pub fn build_root(ctx: NodeContext, settings: DemoSettings) -> Result<Box<dyn Node>, NavError> {
    ParentNode::new(
        ctx,
        NavState::back_stack(LinearTarget::First),
        LinearResolver { settings },
    )
    .map(ParentNode::boxed)
}

struct LinearResolver {
    settings: DemoSettings,
}

impl ChildResolver<LinearTarget> for LinearResolver {
    fn resolve(
        &self,
        target: &LinearTarget,
        ctx: NodeContext,
    ) -> Result<Box<dyn Node>, NavError> {
        let stack = ctx.path().parent().unwrap_or_else(NodePath::root);
        match target {
            LinearTarget::First => Ok(LeafNode::boxed(ctx, FirstScreen { stack })),
            LinearTarget::Second => {
                let countdown = self.settings.countdown.through_zero().launch(ctx.scope())?;
                Ok(LeafNode::boxed(ctx, SecondScreen { stack, countdown }))
            }
            LinearTarget::SpotlightTabs => spotlight(ctx, self.settings),
            LinearTarget::MaterialTabs => material_tabs(ctx),
        }
    }
}

fn spotlight(ctx: NodeContext, settings: DemoSettings) -> Result<Box<dyn Node>, NavError> {
    let path = ctx.path().clone();
    let items = SpotlightTarget::all().to_vec();
    let last = items.len() - 1;
    let actions = if settings.animate_carousel {
        vec![
            ScreenAction::scroll("Third", path.clone(), 0),
            ScreenAction::scroll("Fourth", path, last),
        ]
    } else {
        vec![
            ScreenAction::apply("Third", path.clone(), Operation::First),
            ScreenAction::apply("Fourth", path, Operation::Last),
        ]
    };

    let resolver = |target: &SpotlightTarget, ctx: NodeContext| -> Result<Box<dyn Node>, NavError> {
        Ok(match target {
            SpotlightTarget::Third => LeafNode::boxed(ctx, ColorScreen { name: "Third" }),
            SpotlightTarget::Fourth => LeafNode::boxed(ctx, ColorScreen { name: "Fourth" }),
        })
    };

    Ok(ParentNode::new(ctx, NavState::carousel(items, 0.0)?, resolver)?
        .with_actions(actions)
        .boxed())
}

fn material_tabs(ctx: NodeContext) -> Result<Box<dyn Node>, NavError> {
    let path = ctx.path().clone();
    let tabs = TabTarget::all().to_vec();
    let actions = tabs
        .iter()
        .enumerate()
        .map(|(index, tab)| {
            ScreenAction::apply(tab.label(), path.clone(), Operation::SelectIndex(index))
        })
        .collect();

    let resolver = |target: &TabTarget, ctx: NodeContext| -> Result<Box<dyn Node>, NavError> {
        Ok(LeafNode::boxed(ctx, ColorScreen { name: target.label() }))
    };

    Ok(ParentNode::new(ctx, NavState::tab_selector(tabs, 0)?, resolver)?
        .with_actions(actions)
        .boxed())
}
