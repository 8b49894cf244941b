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

//! Event types produced by an upstream JSON tokenizer.
//!
//! The tokenizer itself lives outside this crate; it is expected to hand
//! over a well-formed, pull-based sequence of [`Event`]s in document order
//! (every `StartMap` matched by `EndMap`, every `StartArray` by `EndArray`,
//! `MapKey` only directly inside a map and immediately followed by that
//! key's value or subtree).
//!
//! # Event Flow
//!
//! For the document `{"a": [1, 2]}` the tokenizer produces:
//!
//! ```text
//! StartMap
//! MapKey("a")
//! StartArray
//! Int(1)
//! Int(2)
//! EndArray
//! EndMap
//! ```

use crate::value::Value;

/// A flat structural or scalar token, with no path information attached.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    /// Null scalar.
    Null,
    /// Boolean scalar.
    Bool(bool),
    /// Integer number scalar.
    Int(i64),
    /// Floating-point number scalar.
    Float(f64),
    /// String scalar.
    String(String),
    /// A key inside a map, preceding that key's value.
    MapKey(String),
    /// Start of a map.
    StartMap,
    /// End of a map.
    EndMap,
    /// Start of an array.
    StartArray,
    /// End of an array.
    EndArray,
}

impl Event {
    /// The conventional tokenizer name for this event kind.
    #[inline]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) | Self::Float(_) => "number",
            Self::String(_) => "string",
            Self::MapKey(_) => "map_key",
            Self::StartMap => "start_map",
            Self::EndMap => "end_map",
            Self::StartArray => "start_array",
            Self::EndArray => "end_array",
        }
    }

    /// Whether this event carries a complete scalar value.
    #[inline]
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Self::Null | Self::Bool(_) | Self::Int(_) | Self::Float(_) | Self::String(_)
        )
    }

    /// Consume the event, returning its scalar payload if it has one.
    ///
    /// Structural events and `MapKey` return `None`.
    #[inline]
    pub fn into_scalar(self) -> Option<Value> {
        match self {
            Self::Null => Some(Value::Null),
            Self::Bool(b) => Some(Value::Bool(b)),
            Self::Int(n) => Some(Value::Int(n)),
            Self::Float(n) => Some(Value::Float(n)),
            Self::String(s) => Some(Value::String(s)),
            _ => None,
        }
    }
}

/// An event tagged with the dotted path of the container it belongs to.
///
/// Produced by [`PathAnnotator`](crate::PathAnnotator); the root prefix is
/// the empty string, array elements contribute the `item` segment, and map
/// values contribute their key.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrefixedEvent {
    /// Dotted segment path of the enclosing container.
    pub prefix: String,
    /// The underlying event.
    pub event: Event,
}

impl PrefixedEvent {
    /// Create a prefixed event.
    pub fn new(prefix: impl Into<String>, event: Event) -> Self {
        Self {
            prefix: prefix.into(),
            event,
        }
    }
}

impl From<PrefixedEvent> for Event {
    fn from(prefixed: PrefixedEvent) -> Self {
        prefixed.event
    }
}
