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

//! Value extraction at a fixed prefix.
//!
//! [`Items`] walks a prefixed event stream and reconstructs one value per
//! occurrence of a target prefix: scalars are yielded directly, composite
//! regions are rebuilt with a fresh [`TreeBuilder`] up to their matching
//! end event. Events at other prefixes are consumed and discarded; the
//! surrounding document is never reconstructed.
//!
//! The sequence is forward-only and non-restartable. Exhausting the source
//! ends it cleanly; only a source that dies inside a matched region faults.
//!
//! # Examples
//!
//! ```rust
//! use evjson::{Event, Items, PathAnnotator, Value};
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
//! let values: Vec<Value> = Items::new(PathAnnotator::new(events), "a.item")
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(values, vec![Value::Int(1), Value::Int(2)]);
//! ```

use crate::builder::TreeBuilder;
use crate::error::{StreamError, StreamResult};
use crate::event::{Event, PrefixedEvent};
use crate::value::Value;

/// Lazy iterator over the values occurring exactly at a target prefix.
pub struct Items<I> {
    events: I,
    prefix: String,
    finished: bool,
}

impl<I> Items<I>
where
    I: Iterator<Item = StreamResult<PrefixedEvent>>,
{
    /// Extract values at `prefix` from a prefixed event source.
    pub fn new<S>(events: S, prefix: impl Into<String>) -> Self
    where
        S: IntoIterator<Item = StreamResult<PrefixedEvent>, IntoIter = I>,
    {
        Self {
            events: events.into_iter(),
            prefix: prefix.into(),
            finished: false,
        }
    }

    /// Rebuild one composite region that starts with `start` at the target
    /// prefix, consuming events through the matching end.
    fn build_region(&mut self, start: Event) -> StreamResult<Value> {
        let mut builder = TreeBuilder::new();
        builder.event(start)?;
        while !builder.is_complete() {
            match self.events.next() {
                Some(Ok(prefixed)) => builder.event(prefixed.event)?,
                Some(Err(err)) => return Err(err),
                None => {
                    return Err(StreamError::Incomplete(
                        "event source ended inside an extracted value",
                    ))
                }
            }
        }
        builder.finish()
    }
}

impl<I> Iterator for Items<I>
where
    I: Iterator<Item = StreamResult<PrefixedEvent>>,
{
    type Item = StreamResult<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            let prefixed = match self.events.next() {
                Some(Ok(prefixed)) => prefixed,
                Some(Err(err)) => {
                    self.finished = true;
                    return Some(Err(err));
                }
                None => {
                    self.finished = true;
                    return None;
                }
            };

            if prefixed.prefix != self.prefix {
                continue;
            }

            match prefixed.event {
                Event::StartMap | Event::StartArray => {
                    let result = self.build_region(prefixed.event);
                    if result.is_err() {
                        self.finished = true;
                    }
                    return Some(result);
                }
                // Keys and end events at the target prefix belong to the
                // surrounding structure, not to an extracted value.
                Event::MapKey(_) | Event::EndMap | Event::EndArray => continue,
                scalar => match scalar.into_scalar() {
                    Some(value) => return Some(Ok(value)),
                    None => continue,
                },
            }
        }
    }
}
