use serde::{Deserialize, Serialize};

use crate::nav::target::NavTarget;

/// A navigation request applied to a model.
///
/// Operations are validated against the current state before anything
/// changes; a rejected operation leaves the model untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation<T> {
    /// BackStack: append a target, it becomes the foreground.
    Push(T),
    /// BackStack: remove the foreground. Rejected at depth 1.
    Pop,
    /// BackStack: swap the foreground target in place.
    Replace(T),
    /// TabSelector: select the tab at this index.
    SelectIndex(usize),
    /// Carousel: jump to the first item.
    First,
    /// Carousel: jump to the last item.
    Last,
    /// Carousel: set the position. Fractional values are mid-transition.
    ScrollTo(f32),
}

impl<T> Operation<T> {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Push(_) => "push",
            Self::Pop => "pop",
            Self::Replace(_) => "replace",
            Self::SelectIndex(_) => "select_index",
            Self::First => "first",
            Self::Last => "last",
            Self::ScrollTo(_) => "scroll_to",
        }
    }

    /// Convert the carried target, keeping the operation shape.
    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<Operation<U>, E> {
        Ok(match self {
            Self::Push(target) => Operation::Push(f(target)?),
            Self::Replace(target) => Operation::Replace(f(target)?),
            Self::Pop => Operation::Pop,
            Self::SelectIndex(index) => Operation::SelectIndex(index),
            Self::First => Operation::First,
            Self::Last => Operation::Last,
            Self::ScrollTo(position) => Operation::ScrollTo(position),
        })
    }
}

impl Operation<String> {
    /// Resolve string keys into typed targets. Returns the unknown key on failure.
    pub fn resolve<T: NavTarget>(self) -> Result<Operation<T>, String> {
        self.try_map(|key| T::parse(&key).ok_or(key))
    }
}

impl<T: NavTarget> Operation<T> {
    /// String-keyed form, used by screen actions and the command queue.
    pub fn keyed(&self) -> Operation<String> {
        match self {
            Self::Push(target) => Operation::Push(target.as_str().to_string()),
            Self::Replace(target) => Operation::Replace(target.as_str().to_string()),
            Self::Pop => Operation::Pop,
            Self::SelectIndex(index) => Operation::SelectIndex(*index),
            Self::First => Operation::First,
            Self::Last => Operation::Last,
            Self::ScrollTo(position) => Operation::ScrollTo(*position),
        }
    }
}
