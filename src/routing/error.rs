//! Error types for the routing engine
//!
//! Failing to find a path is not an error; only malformed requests are.

use std::fmt;

use thiserror::Error;

/// Which box of a request was malformed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxRole {
    Start,
    End,
    Obstacle(usize),
}

impl fmt::Display for BoxRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoxRole::Start => write!(f, "start"),
            BoxRole::End => write!(f, "end"),
            BoxRole::Obstacle(index) => write!(f, "obstacle #{}", index),
        }
    }
}

/// Errors raised before a search is attempted
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteError {
    /// Box with inverted or non-finite coordinates
    #[error("invalid {role} box: {reason}")]
    InvalidBox { role: BoxRole, reason: String },

    /// Margin or shift that is negative or not a finite number
    #[error("invalid value for '{name}': {value}")]
    InvalidMargin { name: &'static str, value: f64 },
}

impl RouteError {
    /// Create an invalid box error
    pub fn invalid_box(role: BoxRole, reason: impl Into<String>) -> Self {
        Self::InvalidBox {
            role,
            reason: reason.into(),
        }
    }

    /// Create an invalid margin error
    pub fn invalid_margin(name: &'static str, value: f64) -> Self {
        Self::InvalidMargin { name, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_box_display() {
        let err = RouteError::invalid_box(BoxRole::Obstacle(2), "start 5 is after end 1");
        assert_eq!(
            err.to_string(),
            "invalid obstacle #2 box: start 5 is after end 1"
        );
    }

    #[test]
    fn test_invalid_margin_display() {
        let err = RouteError::invalid_margin("horizontal_margin", -1.0);
        assert!(err.to_string().contains("horizontal_margin"));
    }
}
