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

//! Hybrid eager/lazy document consumption.
//!
//! [`HybridStream`] makes a single pass over a flat event stream and does
//! two jobs at once: it eagerly builds the full tree for everything outside
//! a target path (the *skeleton*), and it lazily forwards each value found
//! at the target path as soon as it completes. The targeted collection is
//! never retained, so a huge array can be consumed in bounded memory while
//! sibling fields appearing before and after it still land in the skeleton.
//!
//! The machine has two phases. While *descending* it builds structure
//! normally until the key context matches the target's parent path; the
//! container opening there is replaced in the skeleton by an empty array
//! placeholder and the machine switches to *streaming*. While streaming it
//! keeps maintaining the same stacks (so later siblings are captured) and
//! yields every value that completes exactly at the target path.
//!
//! Drain the items first, then take the skeleton: it is fully populated
//! only once the underlying stream is exhausted.
//!
//! # Examples
//!
//! ```rust
//! use evjson::{Event, HybridStream, TargetPath, Value};
//!
//! let events = vec![
//!     Event::StartMap,
//!     Event::MapKey("columns".into()),
//!     Event::StartArray,
//!     Event::String("id".into()),
//!     Event::EndArray,
//!     Event::MapKey("data".into()),
//!     Event::StartArray,
//!     Event::Int(1),
//!     Event::Int(2),
//!     Event::EndArray,
//!     Event::MapKey("total".into()),
//!     Event::Int(2),
//!     Event::EndMap,
//! ];
//!
//! let target = TargetPath::parse("data.item").unwrap();
//! let mut stream = HybridStream::new(events, target);
//!
//! let items: Vec<Value> = stream.by_ref().collect::<Result<_, _>>().unwrap();
//! assert_eq!(items, vec![Value::Int(1), Value::Int(2)]);
//!
//! let skeleton = stream.into_skeleton().unwrap();
//! assert_eq!(skeleton.get("total"), Some(&Value::Int(2)));
//! assert_eq!(skeleton.get("data"), Some(&Value::Array(Vec::new())));
//! ```

use crate::error::{StreamError, StreamResult};
use crate::event::Event;
use crate::path::ITEM;
use crate::value::Value;
use indexmap::IndexMap;

/// A validated target location inside the document.
///
/// Segments are map keys or the literal `item` wildcard for "every element
/// of the array here". Constructible from a dotted string or an ordered
/// segment list; empty paths and empty segments are rejected before any
/// event is pulled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetPath {
    segments: Vec<String>,
}

impl TargetPath {
    /// Parse a dotted path such as `"data.item"`.
    pub fn parse(path: &str) -> StreamResult<Self> {
        if path.is_empty() {
            return Err(StreamError::invalid_target("path must not be empty"));
        }
        Self::from_segments(path.split('.').map(str::to_string).collect())
    }

    /// Build a path from an ordered segment list.
    pub fn from_segments(segments: Vec<String>) -> StreamResult<Self> {
        if segments.is_empty() {
            return Err(StreamError::invalid_target("path must not be empty"));
        }
        if segments.iter().any(String::is_empty) {
            return Err(StreamError::invalid_target("path contains an empty segment"));
        }
        Ok(Self { segments })
    }

    /// The ordered segments of this path.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl std::str::FromStr for TargetPath {
    type Err = StreamError;

    fn from_str(s: &str) -> StreamResult<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for TargetPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Building structure eagerly, watching for the target's parent path.
    Descending,
    /// Forwarding values completed at the target path while still
    /// maintaining the surrounding structure.
    Streaming,
}

/// Single-pass eager skeleton builder and lazy item forwarder.
///
/// Iterates over `StreamResult<Value>` items found at the target path;
/// after the iterator is drained, [`into_skeleton()`](Self::into_skeleton)
/// returns the surrounding document with an empty array standing in for
/// the streamed collection.
pub struct HybridStream<I> {
    events: I,
    target: Vec<String>,
    /// Current key or index context per open container. Mutated in place
    /// by `MapKey` events; always the same length as `data`.
    keys: Vec<String>,
    /// The container under construction per open level.
    data: Vec<Value>,
    root: Option<Value>,
    phase: Phase,
    finished: bool,
}

impl<I> HybridStream<I>
where
    I: Iterator<Item = Event>,
{
    /// Consume a flat event source, streaming the values at `target`.
    pub fn new<S>(events: S, target: TargetPath) -> Self
    where
        S: IntoIterator<Item = Event, IntoIter = I>,
    {
        Self {
            events: events.into_iter(),
            target: target.segments,
            keys: Vec::new(),
            data: Vec::new(),
            root: None,
            phase: Phase::Descending,
            finished: false,
        }
    }

    /// The skeleton built so far, if the document has already closed.
    pub fn skeleton(&self) -> Option<&Value> {
        if self.data.is_empty() {
            self.root.as_ref()
        } else {
            None
        }
    }

    /// Take the skeleton after the stream has been drained.
    ///
    /// # Errors
    ///
    /// [`StreamError::Incomplete`] if the document never closed: the
    /// source was truncated, empty, or the items were not fully drained.
    pub fn into_skeleton(self) -> StreamResult<Value> {
        if !self.data.is_empty() {
            return Err(StreamError::Incomplete(
                "document still open; drain the items first",
            ));
        }
        self.root
            .ok_or(StreamError::Incomplete("event source produced no document"))
    }

    /// Apply one event to the dual-stack machine. Returns a value when one
    /// completed exactly at the target path.
    fn apply(&mut self, event: Event) -> StreamResult<Option<Value>> {
        match event {
            Event::MapKey(key) => match self.keys.last_mut() {
                Some(current) => {
                    *current = key;
                    Ok(None)
                }
                None => Err(StreamError::Malformed("map key with no open container")),
            },
            Event::StartMap | Event::StartArray => {
                let parent_len = self.target.len() - 1;
                if self.phase == Phase::Descending && self.keys[..] == self.target[..parent_len] {
                    // This container is the streamed collection. An empty
                    // array stands in for it; its items are forwarded, not
                    // retained.
                    self.phase = Phase::Streaming;
                    self.data.push(Value::Array(Vec::new()));
                } else if event == Event::StartMap {
                    self.data.push(Value::Object(IndexMap::new()));
                } else {
                    self.data.push(Value::Array(Vec::new()));
                }
                self.keys.push(ITEM.to_string());
                Ok(None)
            }
            Event::EndMap | Event::EndArray => {
                let value = match self.data.pop() {
                    Some(value) => value,
                    None => return Err(StreamError::Underflow(event.kind())),
                };
                self.keys.pop();
                if self.phase == Phase::Streaming && self.keys == self.target {
                    return Ok(Some(value));
                }
                self.attach(value)?;
                Ok(None)
            }
            scalar => {
                let value = match scalar.into_scalar() {
                    Some(value) => value,
                    None => {
                        return Err(StreamError::Malformed("non-scalar event in scalar position"))
                    }
                };
                if self.phase == Phase::Streaming && self.keys == self.target {
                    return Ok(Some(value));
                }
                self.attach(value)?;
                Ok(None)
            }
        }
    }

    /// Link a finished value into the innermost open container via the
    /// current key context, or set it as the root.
    fn attach(&mut self, value: Value) -> StreamResult<()> {
        match self.data.last_mut() {
            Some(Value::Object(map)) => {
                // Safe: keys and data are pushed and popped together
                let key = self.keys.last().expect("stacks move together").clone();
                map.insert(key, value);
                Ok(())
            }
            Some(Value::Array(items)) => {
                items.push(value);
                Ok(())
            }
            Some(_) => Err(StreamError::Malformed("scalar frame on the data stack")),
            None => {
                if self.root.is_some() {
                    return Err(StreamError::Malformed("second top-level value"));
                }
                self.root = Some(value);
                Ok(())
            }
        }
    }
}

impl<I> Iterator for HybridStream<I>
where
    I: Iterator<Item = Event>,
{
    type Item = StreamResult<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            let event = match self.events.next() {
                Some(event) => event,
                None => {
                    self.finished = true;
                    if self.root.is_none() || !self.data.is_empty() {
                        return Some(Err(StreamError::Incomplete(
                            "event source ended before the document closed",
                        )));
                    }
                    return None;
                }
            };

            match self.apply(event) {
                Ok(Some(item)) => return Some(Ok(item)),
                Ok(None) => {}
                Err(err) => {
                    self.finished = true;
                    return Some(Err(err));
                }
            }
        }
    }
}
