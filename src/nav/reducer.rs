//! Pure state transitions for navigation models.

use crate::nav::error::NavError;
use crate::nav::operation::Operation;
use crate::nav::state::{ModelKind, NavState};

/// Reducer transforms state based on operations.
///
/// The reducer is the only place where navigation state transitions happen.
/// It must be a pure function: (State, Intent) -> Result<State>.
/// A rejected intent never yields a partially updated state.
pub trait Reducer {
    /// The state type this reducer operates on.
    type State: Clone + PartialEq;

    /// The intent type this reducer handles.
    type Intent;

    /// Process an intent and return the new state, or reject it.
    fn reduce(state: &Self::State, intent: Self::Intent) -> Result<Self::State, NavError>;
}

pub struct NavReducer<T>(std::marker::PhantomData<T>);

impl<T: Clone + PartialEq> Reducer for NavReducer<T> {
    type State = NavState<T>;
    type Intent = Operation<T>;

    fn reduce(state: &Self::State, intent: Self::Intent) -> Result<Self::State, NavError> {
        let name = intent.name();
        let kind = state.kind();
        let mut elements = state.elements().to_vec();
        let count = elements.len();

        match (kind, intent) {
            (ModelKind::BackStack, Operation::Push(target)) => {
                elements.push(target);
                let top = elements.len() - 1;
                Ok(NavState::with(kind, elements, top as f32))
            }
            (ModelKind::BackStack, Operation::Pop) => {
                if count <= 1 {
                    return Err(NavError::invalid(name, "cannot pop the root of a back stack"));
                }
                elements.pop();
                let top = elements.len() - 1;
                Ok(NavState::with(kind, elements, top as f32))
            }
            (ModelKind::BackStack, Operation::Replace(target)) => {
                if let Some(top) = elements.last_mut() {
                    *top = target;
                }
                Ok(NavState::with(kind, elements, state.position()))
            }
            (ModelKind::TabSelector, Operation::SelectIndex(index)) => {
                if index >= count {
                    return Err(NavError::invalid(
                        name,
                        format!("tab index {} outside 0..{}", index, count),
                    ));
                }
                Ok(NavState::with(kind, elements, index as f32))
            }
            (ModelKind::Carousel, Operation::First) => Ok(NavState::with(kind, elements, 0.0)),
            (ModelKind::Carousel, Operation::Last) => {
                Ok(NavState::with(kind, elements, (count - 1) as f32))
            }
            (ModelKind::Carousel, Operation::ScrollTo(position)) => {
                let last = (count - 1) as f32;
                if !position.is_finite() || position < 0.0 || position > last {
                    return Err(NavError::invalid(
                        name,
                        format!("position {} outside 0..={}", position, last),
                    ));
                }
                Ok(NavState::with(kind, elements, position))
            }
            (kind, _) => Err(NavError::invalid(
                name,
                format!("not supported by a {}", kind),
            )),
        }
    }
}
