use std::fmt;

use serde::{Deserialize, Serialize};

use crate::nav::error::NavError;

/// Arrangement strategy of a navigation model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// Call stack from root (index 0) to current (top).
    BackStack,
    /// Fixed set of tabs with exactly one selected.
    TabSelector,
    /// Fixed ordered list scanned by a possibly fractional position.
    Carousel,
}

impl ModelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BackStack => "back_stack",
            Self::TabSelector => "tab_selector",
            Self::Carousel => "carousel",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimal state of one node's navigation: the active sequence and
/// which element is in the foreground.
///
/// For BackStack and TabSelector the position is always integral. For a
/// Carousel a fractional position is an in-flight transition between the
/// two neighbouring items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavState<T> {
    kind: ModelKind,
    elements: Vec<T>,
    position: f32,
}

impl<T> NavState<T> {
    pub fn new(kind: ModelKind, elements: Vec<T>, position: f32) -> Result<Self, NavError> {
        let state = Self {
            kind,
            elements,
            position,
        };
        state.validate()?;
        Ok(state)
    }

    pub fn back_stack(root: T) -> Self {
        Self {
            kind: ModelKind::BackStack,
            elements: vec![root],
            position: 0.0,
        }
    }

    /// Back stack with `elements` from bottom to top.
    pub fn back_stack_of(elements: Vec<T>) -> Result<Self, NavError> {
        let top = elements.len().saturating_sub(1);
        Self::new(ModelKind::BackStack, elements, top as f32)
    }

    pub fn tab_selector(tabs: Vec<T>, selected: usize) -> Result<Self, NavError> {
        Self::new(ModelKind::TabSelector, tabs, selected as f32)
    }

    pub fn carousel(items: Vec<T>, position: f32) -> Result<Self, NavError> {
        Self::new(ModelKind::Carousel, items, position)
    }

    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    pub fn elements(&self) -> &[T] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    /// Index of the visible element, rounding carousel positions.
    pub fn foreground_index(&self) -> usize {
        let last = self.elements.len().saturating_sub(1);
        (self.position.round().max(0.0) as usize).min(last)
    }

    pub fn foreground(&self) -> Option<&T> {
        self.elements.get(self.foreground_index())
    }

    pub fn is_transitioning(&self) -> bool {
        self.position.fract() != 0.0
    }

    /// Copy of this state with the position rounded to the nearest element.
    pub fn snapped(&self) -> Self
    where
        T: Clone,
    {
        Self {
            kind: self.kind,
            elements: self.elements.clone(),
            position: self.foreground_index() as f32,
        }
    }

    pub fn validate(&self) -> Result<(), NavError> {
        if self.elements.is_empty() {
            return Err(NavError::invalid_state(format!(
                "{} has no active elements",
                self.kind
            )));
        }
        let last = (self.elements.len() - 1) as f32;
        if !self.position.is_finite() || self.position < 0.0 || self.position > last {
            return Err(NavError::invalid_state(format!(
                "position {} outside 0..={} for {}",
                self.position, last, self.kind
            )));
        }
        match self.kind {
            ModelKind::BackStack if self.position != last => Err(NavError::invalid_state(
                format!("back stack foreground {} is not the top {}", self.position, last),
            )),
            ModelKind::BackStack | ModelKind::TabSelector if self.position.fract() != 0.0 => {
                Err(NavError::invalid_state(format!(
                    "fractional position {} outside a carousel",
                    self.position
                )))
            }
            _ => Ok(()),
        }
    }

    pub(crate) fn with(kind: ModelKind, elements: Vec<T>, position: f32) -> Self {
        Self {
            kind,
            elements,
            position,
        }
    }
}
