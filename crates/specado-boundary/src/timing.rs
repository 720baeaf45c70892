//! Timing instrumentation for `around_attribute` hooks

use crate::error::Result;
use serde_json::Value;
use std::time::{Duration, Instant};

/// Timer that emits a debug event with the attribute's resolution time when dropped
pub struct AttributeTimer {
    start: Instant,
    attribute: String,
}

impl AttributeTimer {
    pub fn start(attribute: &str) -> Self {
        Self {
            start: Instant::now(),
            attribute: attribute.to_string(),
        }
    }

    /// Get elapsed time without finishing the timer
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for AttributeTimer {
    fn drop(&mut self) {
        tracing::debug!(
            attribute = %self.attribute,
            duration_us = self.start.elapsed().as_micros() as u64,
            "Attribute resolution timed"
        );
    }
}

/// Resolve under an [`AttributeTimer`]
///
/// ```rust
/// use specado_boundary::{timing, AttributeSet, ModelClass, Result};
/// use serde_json::Value;
///
/// struct Timed(AttributeSet);
///
/// impl ModelClass for Timed {
///     fn attributes(&self) -> &AttributeSet {
///         &self.0
///     }
///
///     fn around_attribute(
///         &self,
///         name: &str,
///         resolve: &mut dyn FnMut() -> Result<Option<Value>>,
///     ) -> Result<Option<Value>> {
///         timing::timed(name, resolve)
///     }
/// }
/// ```
pub fn timed(
    name: &str,
    resolve: &mut dyn FnMut() -> Result<Option<Value>>,
) -> Result<Option<Value>> {
    let _timer = AttributeTimer::start(name);
    resolve()
}
