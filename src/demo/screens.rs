use tokio::sync::watch;

use crate::demo::targets::LinearTarget;
use crate::nav::{NavTarget, NodePath, Operation};
use crate::node::{Screen, ScreenAction, ScreenView};

/// Entry screen with links into the rest of the demo.
pub struct FirstScreen {
    pub stack: NodePath,
}

impl Screen for FirstScreen {
    fn render(&self) -> ScreenView {
        let push = |label: &str, target: LinearTarget| {
            ScreenAction::apply(
                label,
                self.stack.clone(),
                Operation::Push(target.as_str().to_string()),
            )
        };
        ScreenView {
            title: "First".to_string(),
            lines: vec!["Hello from the First Node!".to_string()],
            actions: vec![
                push("Go to Second Node", LinearTarget::Second),
                push("Go to Spotlight Tabs", LinearTarget::SpotlightTabs),
                push("Go to Material Tabs", LinearTarget::MaterialTabs),
            ],
        }
    }
}

/// Screen showing a countdown that runs while the node is mounted.
pub struct SecondScreen {
    pub stack: NodePath,
    pub countdown: watch::Receiver<u32>,
}

impl Screen for SecondScreen {
    fn render(&self) -> ScreenView {
        ScreenView {
            title: "Second".to_string(),
            lines: vec![
                "Hello from the Second Node!".to_string(),
                format!("Countdown: {}", *self.countdown.borrow()),
            ],
            actions: vec![ScreenAction::apply(
                "Go to First Node",
                self.stack.clone(),
                Operation::Pop,
            )],
        }
    }
}

/// Static page used by the carousel and the tab bar.
pub struct ColorScreen {
    pub name: &'static str,
}

impl Screen for ColorScreen {
    fn render(&self) -> ScreenView {
        ScreenView {
            title: self.name.to_string(),
            lines: vec![format!("Hello from the {} Node!", self.name)],
            actions: Vec::new(),
        }
    }
}
