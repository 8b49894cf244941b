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

//! Path annotation for flat event streams.
//!
//! [`PathAnnotator`] wraps a flat event iterator and tags each event with
//! the dotted path of the container its value belongs to. For the document
//! `{"a": [1, 2]}` the annotated stream carries prefixes:
//!
//! ```text
//! ""        StartMap
//! ""        MapKey("a")
//! "a"       StartArray
//! "a.item"  Int(1)
//! "a.item"  Int(2)
//! "a"       EndArray
//! ""        EndMap
//! ```
//!
//! Annotation is deterministic: running the same flat sequence through two
//! annotators yields identical output.
//!
//! # Examples
//!
//! ```rust
//! use evjson::{Event, PathAnnotator};
//!
//! let events = vec![
//!     Event::StartArray,
//!     Event::Int(1),
//!     Event::EndArray,
//! ];
//!
//! let prefixes: Vec<String> = PathAnnotator::new(events)
//!     .map(|ev| ev.unwrap().prefix)
//!     .collect();
//! assert_eq!(prefixes, vec!["", "item", ""]);
//! ```

use crate::error::{StreamError, StreamResult};
use crate::event::{Event, PrefixedEvent};

/// Path segment denoting "inside the nearest enclosing array".
pub const ITEM: &str = "item";

/// Placeholder segment for a map that has not yet seen a key. A well-formed
/// stream replaces it with the first `MapKey` before it can appear in any
/// prefix.
const PENDING: &str = "";

/// Lazy iterator tagging each flat event with its dotted prefix.
///
/// Yields [`StreamResult`]`<`[`PrefixedEvent`]`>`: an `EndMap`/`EndArray`
/// with no open container faults immediately with
/// [`StreamError::Underflow`], and a source that ends with containers still
/// open faults once with [`StreamError::Incomplete`] at exhaustion.
pub struct PathAnnotator<I> {
    events: I,
    path: Vec<String>,
    finished: bool,
}

impl<I> PathAnnotator<I>
where
    I: Iterator<Item = Event>,
{
    /// Wrap a flat event source.
    pub fn new<S>(events: S) -> Self
    where
        S: IntoIterator<Item = Event, IntoIter = I>,
    {
        Self {
            events: events.into_iter(),
            path: Vec::new(),
            finished: false,
        }
    }

    /// Current nesting depth of the annotator.
    #[inline]
    pub fn depth(&self) -> usize {
        self.path.len()
    }
}

impl<I> Iterator for PathAnnotator<I>
where
    I: Iterator<Item = Event>,
{
    type Item = StreamResult<PrefixedEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let event = match self.events.next() {
            Some(event) => event,
            None => {
                self.finished = true;
                if self.path.is_empty() {
                    return None;
                }
                return Some(Err(StreamError::Incomplete(
                    "event source ended with open containers",
                )));
            }
        };

        let prefix = match &event {
            Event::MapKey(key) => {
                if self.path.is_empty() {
                    self.finished = true;
                    return Some(Err(StreamError::Malformed("map key with no open map")));
                }
                let prefix = join(&self.path[..self.path.len() - 1]);
                // Safe: emptiness checked above
                *self.path.last_mut().expect("path is non-empty") = key.clone();
                prefix
            }
            Event::StartMap => {
                let prefix = join(&self.path);
                self.path.push(PENDING.to_string());
                prefix
            }
            Event::StartArray => {
                let prefix = join(&self.path);
                self.path.push(ITEM.to_string());
                prefix
            }
            Event::EndMap | Event::EndArray => {
                if self.path.pop().is_none() {
                    self.finished = true;
                    return Some(Err(StreamError::Underflow(event.kind())));
                }
                join(&self.path)
            }
            _ => join(&self.path),
        };

        Some(Ok(PrefixedEvent { prefix, event }))
    }
}

#[inline]
fn join(segments: &[String]) -> String {
    segments.join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annotate_all(events: Vec<Event>) -> Vec<PrefixedEvent> {
        PathAnnotator::new(events)
            .collect::<StreamResult<Vec<_>>>()
            .unwrap()
    }

    fn sample_events() -> Vec<Event> {
        vec![
            Event::StartMap,
            Event::MapKey("a".into()),
            Event::StartArray,
            Event::Int(1),
            Event::Int(2),
            Event::EndArray,
            Event::EndMap,
        ]
    }

    // ==================== Prefix rule tests ====================

    #[test]
    fn test_prefixes_for_map_with_array() {
        let prefixed = annotate_all(sample_events());
        let prefixes: Vec<&str> = prefixed.iter().map(|ev| ev.prefix.as_str()).collect();
        assert_eq!(prefixes, vec!["", "", "a", "a.item", "a.item", "a", ""]);
    }

    #[test]
    fn test_prefixes_for_nested_maps() {
        let events = vec![
            Event::StartMap,
            Event::MapKey("map".into()),
            Event::StartMap,
            Event::MapKey("key".into()),
            Event::String("value".into()),
            Event::EndMap,
            Event::EndMap,
        ];
        let prefixed = annotate_all(events);
        let pairs: Vec<(&str, &str)> = prefixed
            .iter()
            .map(|ev| (ev.prefix.as_str(), ev.event.kind()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("", "start_map"),
                ("", "map_key"),
                ("map", "start_map"),
                ("map", "map_key"),
                ("map.key", "string"),
                ("map", "end_map"),
                ("", "end_map"),
            ]
        );
    }

    #[test]
    fn test_root_scalar_has_empty_prefix() {
        let prefixed = annotate_all(vec![Event::Int(42)]);
        assert_eq!(prefixed.len(), 1);
        assert_eq!(prefixed[0].prefix, "");
    }

    #[test]
    fn test_nested_arrays() {
        let events = vec![
            Event::StartArray,
            Event::StartArray,
            Event::Int(1),
            Event::EndArray,
            Event::EndArray,
        ];
        let prefixed = annotate_all(events);
        let prefixes: Vec<&str> = prefixed.iter().map(|ev| ev.prefix.as_str()).collect();
        assert_eq!(prefixes, vec!["", "item", "item.item", "item", ""]);
    }

    #[test]
    fn test_empty_source_yields_nothing() {
        let mut annotator = PathAnnotator::new(Vec::new());
        assert!(annotator.next().is_none());
    }

    // ==================== Fault tests ====================

    #[test]
    fn test_underflow_on_unmatched_end() {
        let mut annotator = PathAnnotator::new(vec![Event::EndMap]);
        let err = annotator.next().unwrap().unwrap_err();
        assert_eq!(err, StreamError::Underflow("end_map"));
        // The fault terminates the sequence.
        assert!(annotator.next().is_none());
    }

    #[test]
    fn test_truncation_on_open_container() {
        let mut annotator = PathAnnotator::new(vec![Event::StartMap]);
        assert!(annotator.next().unwrap().is_ok());
        let err = annotator.next().unwrap().unwrap_err();
        assert!(err.is_incomplete());
        assert!(annotator.next().is_none());
    }

    #[test]
    fn test_stray_map_key_faults() {
        let mut annotator = PathAnnotator::new(vec![Event::MapKey("k".into())]);
        let err = annotator.next().unwrap().unwrap_err();
        assert!(matches!(err, StreamError::Malformed(_)));
    }

    // ==================== Determinism tests ====================

    #[test]
    fn test_annotation_is_idempotent() {
        let first = annotate_all(sample_events());
        let second = annotate_all(sample_events());
        assert_eq!(first, second);
    }
}
