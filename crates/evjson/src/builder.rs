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

//! Incremental tree building from events.
//!
//! [`TreeBuilder`] reconstructs exactly one top-level value per
//! `Start...End` cycle (or a single root scalar). It keeps a stack of open
//! container frames; a frame is popped when its end event arrives and the
//! finished container is attached to its parent, so the stack depth always
//! equals the current nesting depth. Callers that need several independent
//! values (one per array item, say) run one builder per value.
//!
//! # Examples
//!
//! ```rust
//! use evjson::{build_tree, Event, Value};
//!
//! let events = vec![
//!     Event::StartMap,
//!     Event::MapKey("a".into()),
//!     Event::StartArray,
//!     Event::Int(1),
//!     Event::Int(2),
//!     Event::EndArray,
//!     Event::EndMap,
//! ];
//!
//! let value = build_tree(events).unwrap();
//! assert_eq!(
//!     value.get("a"),
//!     Some(&Value::Array(vec![Value::Int(1), Value::Int(2)]))
//! );
//! ```

use crate::error::{StreamError, StreamResult};
use crate::event::Event;
use crate::value::Value;
use indexmap::IndexMap;

/// An open container awaiting its end event.
#[derive(Debug)]
enum Frame {
    Array(Vec<Value>),
    Object {
        map: IndexMap<String, Value>,
        pending: Option<String>,
    },
}

/// Incrementally builds one value from a stream of events.
///
/// Feed events in document order with [`event()`](Self::event); once
/// [`is_complete()`](Self::is_complete) reports true, take the value with
/// [`finish()`](Self::finish).
#[derive(Debug, Default)]
pub struct TreeBuilder {
    stack: Vec<Frame>,
    root: Option<Value>,
}

impl TreeBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a complete top-level value has been assembled.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.root.is_some() && self.stack.is_empty()
    }

    /// Apply the next event.
    ///
    /// # Errors
    ///
    /// - [`StreamError::Underflow`] on an end event with no open container
    /// - [`StreamError::Malformed`] on a map-protocol violation or on any
    ///   event after the value already completed
    pub fn event(&mut self, event: Event) -> StreamResult<()> {
        if self.is_complete() {
            return Err(StreamError::Malformed("event after a completed value"));
        }

        match event {
            Event::MapKey(key) => match self.stack.last_mut() {
                Some(Frame::Object { pending, .. }) => {
                    // A second key before any value silently replaces the
                    // pending one, matching upstream tokenizer expectations.
                    *pending = Some(key);
                    Ok(())
                }
                _ => Err(StreamError::Malformed("map key outside of a map")),
            },
            Event::StartMap => {
                self.stack.push(Frame::Object {
                    map: IndexMap::new(),
                    pending: None,
                });
                Ok(())
            }
            Event::StartArray => {
                self.stack.push(Frame::Array(Vec::new()));
                Ok(())
            }
            Event::EndMap => match self.stack.pop() {
                Some(Frame::Object { map, .. }) => self.attach(Value::Object(map)),
                Some(_) => Err(StreamError::Malformed("end_map closing an array")),
                None => Err(StreamError::Underflow("end_map")),
            },
            Event::EndArray => match self.stack.pop() {
                Some(Frame::Array(items)) => self.attach(Value::Array(items)),
                Some(_) => Err(StreamError::Malformed("end_array closing a map")),
                None => Err(StreamError::Underflow("end_array")),
            },
            scalar => match scalar.into_scalar() {
                Some(value) => self.attach(value),
                None => Err(StreamError::Malformed("non-scalar event in scalar position")),
            },
        }
    }

    /// Place a finished value into the innermost open container, or set it
    /// as the root when no container is open.
    fn attach(&mut self, value: Value) -> StreamResult<()> {
        match self.stack.last_mut() {
            Some(Frame::Array(items)) => {
                items.push(value);
                Ok(())
            }
            Some(Frame::Object { map, pending }) => match pending.take() {
                Some(key) => {
                    map.insert(key, value);
                    Ok(())
                }
                None => Err(StreamError::Malformed("map value with no pending key")),
            },
            None => {
                if self.root.is_some() {
                    return Err(StreamError::Malformed("second top-level value"));
                }
                self.root = Some(value);
                Ok(())
            }
        }
    }

    /// Take the completed value.
    ///
    /// # Errors
    ///
    /// [`StreamError::Incomplete`] if no events were seen or a container is
    /// still open.
    pub fn finish(self) -> StreamResult<Value> {
        if !self.stack.is_empty() {
            return Err(StreamError::Incomplete(
                "event source ended with open containers",
            ));
        }
        self.root
            .ok_or(StreamError::Incomplete("event source produced no value"))
    }
}

/// Reconstruct one top-level value from an event sequence.
///
/// Accepts flat events or prefixed events (the prefix is ignored). Consumes
/// events only until the first top-level value completes.
///
/// # Errors
///
/// [`StreamError::Incomplete`] on an empty or truncated source, plus any
/// fault from [`TreeBuilder::event`].
pub fn build_tree<I>(events: I) -> StreamResult<Value>
where
    I: IntoIterator,
    I::Item: Into<Event>,
{
    let mut builder = TreeBuilder::new();
    for event in events {
        builder.event(event.into())?;
        if builder.is_complete() {
            break;
        }
    }
    builder.finish()
}
