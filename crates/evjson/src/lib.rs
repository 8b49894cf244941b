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

//! Incremental JSON tree reconstruction from flat parser event streams.
//!
//! This crate sits downstream of a JSON tokenizer: it never sees raw bytes,
//! only a pull-based sequence of structural and scalar [`Event`]s. From
//! that flat sequence it rebuilds the logical document, or a filtered
//! slice of it, incrementally and without buffering the whole tree.
//!
//! # Components
//!
//! - [`PathAnnotator`]: tags each event with the dotted path of the
//!   container it belongs to
//! - [`build_tree`] / [`TreeBuilder`]: reconstructs one complete [`Value`]
//!   per top-level value
//! - [`Items`]: yields one reconstructed value per occurrence of a target
//!   prefix, lazily
//! - [`HybridStream`]: eagerly builds everything outside a [`TargetPath`]
//!   while lazily forwarding the values inside it, in one pass and with
//!   bounded memory for the streamed collection
//!
//! Every produced sequence is lazy, forward-only, and single-consumer;
//! faults surface at the exact pull that detects them.
//!
//! # Example
//!
//! ```rust
//! use evjson::{Event, Items, PathAnnotator, Value};
//!
//! // {"a": [1, 2]} as emitted by an upstream tokenizer.
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

mod builder;
mod error;
mod event;
mod hybrid;
mod items;
mod path;
mod value;

pub use builder::{build_tree, TreeBuilder};
pub use error::{StreamError, StreamResult};
pub use event::{Event, PrefixedEvent};
pub use hybrid::{HybridStream, TargetPath};
pub use items::Items;
pub use path::{PathAnnotator, ITEM};
pub use value::Value;

// Object values expose their map type directly; re-export it so callers
// can construct objects without naming the dependency.
pub use indexmap::IndexMap;
