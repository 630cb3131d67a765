//! Binding context configuration

use crate::error::{BindError, Result};

/// Configuration threaded through bind and emit calls.
///
/// Binding is a purely recursive in-memory tree walk; the only tunable is
/// the recursion guard, which bounds nesting depth on untrusted input
/// instead of overflowing the call stack.
#[derive(Debug, Clone)]
pub struct BindContext {
    /// Maximum nesting depth (stack overflow protection)
    pub max_depth: usize,
}

impl Default for BindContext {
    fn default() -> Self {
        Self { max_depth: 128 }
    }
}

impl BindContext {
    /// Create a new context with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context with a custom depth limit.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth,
        }
    }

    /// Check the current depth against the limit.
    pub(crate) fn check_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            return Err(BindError::DepthExceeded {
                max: self.max_depth,
            });
        }
        Ok(())
    }
}
