use serde::{Deserialize, Serialize};

use crate::nav::NavTarget;

/// Destinations of the root back stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinearTarget {
    First,
    Second,
    SpotlightTabs,
    MaterialTabs,
}

impl NavTarget for LinearTarget {
    fn all() -> &'static [Self] {
        &[
            Self::First,
            Self::Second,
            Self::SpotlightTabs,
            Self::MaterialTabs,
        ]
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Second => "second",
            Self::SpotlightTabs => "spotlight",
            Self::MaterialTabs => "tabs",
        }
    }
}

/// Pages of the spotlight carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpotlightTarget {
    Third,
    Fourth,
}

impl NavTarget for SpotlightTarget {
    fn all() -> &'static [Self] {
        &[Self::Third, Self::Fourth]
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Third => "third",
            Self::Fourth => "fourth",
        }
    }
}

/// Destinations of the bottom tab bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TabTarget {
    FirstDestination,
    SecondDestination,
}

impl TabTarget {
    /// Label shown on the tab bar.
    pub fn label(&self) -> &'static str {
        match self {
            Self::FirstDestination => "Third",
            Self::SecondDestination => "Fourth",
        }
    }
}

impl NavTarget for TabTarget {
    fn all() -> &'static [Self] {
        &[Self::FirstDestination, Self::SecondDestination]
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::FirstDestination => "first_destination",
            Self::SecondDestination => "second_destination",
        }
    }
}
