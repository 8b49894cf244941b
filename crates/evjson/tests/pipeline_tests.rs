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

//! End-to-end tests composing the annotator, builder, and extractor.

use evjson::{build_tree, Event, Items, PathAnnotator, StreamResult, Value};
use pretty_assertions::assert_eq;

/// `{"a": [1, 2]}` as a flat tokenizer sequence.
fn map_with_array() -> Vec<Event> {
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

// ==================== Annotation Tests ====================

#[test]
fn test_annotated_prefixes_and_kinds() {
    let annotated: Vec<_> = PathAnnotator::new(map_with_array())
        .collect::<StreamResult<Vec<_>>>()
        .unwrap();

    let pairs: Vec<(String, &str)> = annotated
        .iter()
        .map(|ev| (ev.prefix.clone(), ev.event.kind()))
        .collect();

    assert_eq!(
        pairs,
        vec![
            ("".to_string(), "start_map"),
            ("".to_string(), "map_key"),
            ("a".to_string(), "start_array"),
            ("a.item".to_string(), "number"),
            ("a.item".to_string(), "number"),
            ("a".to_string(), "end_array"),
            ("".to_string(), "end_map"),
        ]
    );
}

#[test]
fn test_annotation_runs_are_identical() {
    let first: Vec<_> = PathAnnotator::new(map_with_array())
        .collect::<StreamResult<Vec<_>>>()
        .unwrap();
    let second: Vec<_> = PathAnnotator::new(map_with_array())
        .collect::<StreamResult<Vec<_>>>()
        .unwrap();
    assert_eq!(first, second);
}

// ==================== Tree Building Tests ====================

#[test]
fn test_build_tree_from_flat_events() {
    let value = build_tree(map_with_array()).unwrap();
    assert_eq!(
        value.get("a"),
        Some(&Value::Array(vec![Value::Int(1), Value::Int(2)]))
    );
}

#[test]
fn test_build_tree_from_prefixed_events() {
    // Prefixed events feed the builder too; prefixes are ignored.
    let annotated: Vec<_> = PathAnnotator::new(map_with_array())
        .collect::<StreamResult<Vec<_>>>()
        .unwrap();
    let value = build_tree(annotated).unwrap();
    assert_eq!(
        value.get("a"),
        Some(&Value::Array(vec![Value::Int(1), Value::Int(2)]))
    );
}

// ==================== Extraction Tests ====================

#[test]
fn test_extract_scalar_items() {
    let values: Vec<Value> = Items::new(PathAnnotator::new(map_with_array()), "a.item")
        .collect::<StreamResult<_>>()
        .unwrap();
    assert_eq!(values, vec![Value::Int(1), Value::Int(2)]);
}

#[test]
fn test_extract_is_forward_only() {
    let mut items = Items::new(PathAnnotator::new(map_with_array()), "a.item");
    assert_eq!(items.next().unwrap().unwrap(), Value::Int(1));
    assert_eq!(items.next().unwrap().unwrap(), Value::Int(2));
    assert!(items.next().is_none());
    // Exhausted for good; no restart.
    assert!(items.next().is_none());
}

#[test]
fn test_extract_composite_occurrences_in_document_order() {
    // {"batches": [{"n": 1}, {"n": 2}], "tail": [{"n": 3}]}
    let events = vec![
        Event::StartMap,
        Event::MapKey("batches".into()),
        Event::StartArray,
        Event::StartMap,
        Event::MapKey("n".into()),
        Event::Int(1),
        Event::EndMap,
        Event::StartMap,
        Event::MapKey("n".into()),
        Event::Int(2),
        Event::EndMap,
        Event::EndArray,
        Event::MapKey("tail".into()),
        Event::StartArray,
        Event::StartMap,
        Event::MapKey("n".into()),
        Event::Int(3),
        Event::EndMap,
        Event::EndArray,
        Event::EndMap,
    ];
    let values: Vec<Value> = Items::new(PathAnnotator::new(events), "batches.item")
        .collect::<StreamResult<_>>()
        .unwrap();

    let ns: Vec<&Value> = values.iter().filter_map(|v| v.get("n")).collect();
    assert_eq!(ns, vec![&Value::Int(1), &Value::Int(2)]);
}

// ==================== Fault Propagation Tests ====================

#[test]
fn test_truncation_surfaces_through_the_pipeline() {
    let mut items = Items::new(PathAnnotator::new(vec![Event::StartMap]), "a");
    let err = items.next().unwrap().unwrap_err();
    assert!(err.is_incomplete());
}

#[test]
fn test_items_before_fault_remain_valid() {
    // [1, 2, <truncated array>
    let events = vec![
        Event::StartArray,
        Event::Int(1),
        Event::Int(2),
        Event::StartArray,
    ];
    let mut items = Items::new(PathAnnotator::new(events), "item");
    assert_eq!(items.next().unwrap().unwrap(), Value::Int(1));
    assert_eq!(items.next().unwrap().unwrap(), Value::Int(2));
    assert!(items.next().unwrap().is_err());
}
