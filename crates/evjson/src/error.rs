// evjson - incremental JSON tree reconstruction from event streams
//
// Copyright (c) 2025 the evjson contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types for event-stream consumption.
//!
//! Every fault is surfaced to the immediate caller at the exact pull that
//! detects it. Nothing is retried and nothing is silently recovered: a
//! stream that ends early or breaks the container protocol terminates the
//! lazy sequence with an error, while previously yielded items remain valid.
//!
//! # Error Categories
//!
//! - **Incomplete**: the event source ended while a value was still being
//!   assembled (truncated upstream, or empty where a value was required)
//! - **Underflow**: a container end event arrived with no matching start
//! - **Malformed**: the upstream sequence violated the map/array protocol
//!   (a key outside a map, a value with no pending key, ...)
//! - **InvalidTarget**: a target path was rejected before any event was
//!   pulled

use thiserror::Error;

/// Errors that can occur while consuming an event stream.
///
/// `Incomplete` and `Underflow` indicate a broken or truncated upstream
/// source; `Malformed` indicates a backend contract violation;
/// `InvalidTarget` is a configuration error raised before consumption
/// starts.
///
/// # Examples
///
/// ```rust
/// use evjson::{build_tree, Event, StreamError};
///
/// // A lone StartMap is truncated data, not an empty object.
/// let err = build_tree(vec![Event::StartMap]).unwrap_err();
/// assert!(matches!(err, StreamError::Incomplete(_)));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// The event source ended while a value was still being assembled,
    /// or produced nothing where a value was required.
    #[error("incomplete event stream: {0}")]
    Incomplete(&'static str),

    /// A container end event arrived with no open container to close.
    #[error("container underflow: {0} event with no open container")]
    Underflow(&'static str),

    /// The upstream event sequence violated the map/array protocol.
    #[error("malformed event stream: {0}")]
    Malformed(&'static str),

    /// A target path was supplied in an unsupported shape.
    #[error("invalid target path: {0}")]
    InvalidTarget(String),
}

impl StreamError {
    /// Create an invalid-target error.
    #[inline]
    pub fn invalid_target(message: impl Into<String>) -> Self {
        Self::InvalidTarget(message.into())
    }

    /// Whether this fault means the source ended too early, as opposed to
    /// emitting events that were wrong in themselves.
    #[inline]
    pub fn is_incomplete(&self) -> bool {
        matches!(self, Self::Incomplete(_))
    }
}

/// Result type for stream operations.
pub type StreamResult<T> = Result<T, StreamError>;

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Display tests ====================

    #[test]
    fn test_incomplete_display() {
        let err = StreamError::Incomplete("event source ended with open containers");
        let display = format!("{}", err);
        assert!(display.contains("incomplete"));
        assert!(display.contains("open containers"));
    }

    #[test]
    fn test_underflow_display() {
        let err = StreamError::Underflow("end_map");
        let display = format!("{}", err);
        assert!(display.contains("underflow"));
        assert!(display.contains("end_map"));
    }

    #[test]
    fn test_malformed_display() {
        let err = StreamError::Malformed("map key outside of a map");
        let display = format!("{}", err);
        assert!(display.contains("malformed"));
        assert!(display.contains("map key"));
    }

    #[test]
    fn test_invalid_target_display() {
        let err = StreamError::invalid_target("empty path");
        let display = format!("{}", err);
        assert!(display.contains("invalid target path"));
        assert!(display.contains("empty path"));
    }

    // ==================== Constructor tests ====================

    #[test]
    fn test_invalid_target_constructor() {
        let err = StreamError::invalid_target(String::from("empty segment"));
        if let StreamError::InvalidTarget(message) = err {
            assert_eq!(message, "empty segment");
        } else {
            panic!("Expected InvalidTarget variant");
        }
    }

    #[test]
    fn test_is_incomplete() {
        assert!(StreamError::Incomplete("x").is_incomplete());
        assert!(!StreamError::Underflow("end_array").is_incomplete());
        assert!(!StreamError::invalid_target("x").is_incomplete());
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(
            StreamError::Underflow("end_map"),
            StreamError::Underflow("end_map")
        );
        assert_ne!(
            StreamError::Underflow("end_map"),
            StreamError::Underflow("end_array")
        );
    }

    #[test]
    fn test_debug_output() {
        let err = StreamError::Incomplete("no events");
        let debug = format!("{:?}", err);
        assert!(debug.contains("Incomplete"));
    }
}
