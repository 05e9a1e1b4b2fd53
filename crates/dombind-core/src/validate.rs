// Dombind - Schema-Driven Markup Binding
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
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

//! Whole-document binding walk.
//!
//! Binds every element and attribute in document order and collects the
//! per-node outcomes into a [`ValidationReport`]. A node without a binding
//! is reported, not failed: whether unbound nodes are acceptable is the
//! caller's policy (the CLI's `--strict` flag, for instance).

use crate::cache::AnnotationStore;
use crate::error::BindResult;
use crate::resolver::{Binding, Resolver};
use crate::tree::{Document, NodeId};

/// Outcome of binding one node.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeOutcome {
    /// The node that was bound (or not).
    pub node: NodeId,
    /// Its source-form name, `@`-prefixed for attributes.
    pub name: String,
    /// Slash-separated path from the root, occurrence-indexed.
    pub path: String,
    /// The resolved binding, or `None` for a node outside the schema.
    pub binding: Option<Binding>,
}

/// Per-document binding report.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationReport {
    outcomes: Vec<NodeOutcome>,
}

impl ValidationReport {
    /// All outcomes in document order.
    pub fn outcomes(&self) -> &[NodeOutcome] {
        &self.outcomes
    }

    /// Outcomes for nodes outside the schema.
    pub fn unmatched(&self) -> impl Iterator<Item = &NodeOutcome> {
        self.outcomes.iter().filter(|o| o.binding.is_none())
    }

    /// Number of bound nodes.
    pub fn matched_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.binding.is_some()).count()
    }

    /// Number of nodes outside the schema.
    pub fn unmatched_count(&self) -> usize {
        self.outcomes.len() - self.matched_count()
    }

    /// Whether every node bound.
    pub fn is_fully_bound(&self) -> bool {
        self.unmatched_count() == 0
    }
}

/// Bind every element and attribute of `doc`, in document order.
pub fn validate<S: AnnotationStore>(
    resolver: &mut Resolver<'_, S>,
    doc: &Document,
) -> BindResult<ValidationReport> {
    let mut outcomes = Vec::new();
    if let Some(root) = doc.root() {
        walk(resolver, doc, root, "", &mut outcomes)?;
    }
    Ok(ValidationReport { outcomes })
}

fn walk<S: AnnotationStore>(
    resolver: &mut Resolver<'_, S>,
    doc: &Document,
    element: NodeId,
    parent_path: &str,
    outcomes: &mut Vec<NodeOutcome>,
) -> BindResult<()> {
    let Some(data) = doc.get(element) else {
        return Ok(());
    };
    let position = doc
        .preceding_siblings(element)
        .filter(|(_, s)| s.name() == data.name())
        .count();
    let path = format!("{}/{}[{}]", parent_path, data.raw_name(), position);

    let binding = resolver.resolve(doc, element)?;
    outcomes.push(NodeOutcome {
        node: element,
        name: data.raw_name().to_string(),
        path: path.clone(),
        binding,
    });

    for &attr in data.attributes() {
        let Some(attr_data) = doc.get(attr) else {
            continue;
        };
        let binding = resolver.resolve(doc, attr)?;
        outcomes.push(NodeOutcome {
            node: attr,
            name: format!("@{}", attr_data.raw_name()),
            path: format!("{}/@{}", path, attr_data.raw_name()),
            binding,
        });
    }

    for &child in data.children() {
        walk(resolver, doc, child, &path, outcomes)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{DescriptorSet, Schema};
    use crate::name::{ContextEvaluator, NamePattern, QName};
    use crate::tree::DocumentBuilder;

    const NS: &str = "urn:test";

    fn schema() -> Schema {
        let set = DescriptorSet::builder()
            .fixed(NamePattern::qualified("item", NS), "Item", 2)
            .attribute(NamePattern::qualified("id", NS), "Id")
            .build()
            .unwrap();
        Schema::builder()
            .root(NamePattern::qualified("project", NS), "Project")
            .descriptor_set("Project", set)
            .build()
            .unwrap()
    }

    #[test]
    fn test_report_covers_all_nodes_in_order() {
        let mut b = DocumentBuilder::new();
        let root = b.element(None, QName::new("project", NS)).unwrap();
        b.attribute(root, QName::local("id")).unwrap();
        b.element(Some(root), QName::new("item", NS)).unwrap();
        b.element(Some(root), QName::new("item", NS)).unwrap();
        let doc = b.finish().unwrap();

        let schema = schema();
        let mut resolver = Resolver::new(&schema, &ContextEvaluator);
        let report = validate(&mut resolver, &doc).unwrap();

        let names: Vec<&str> = report.outcomes().iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["project", "@id", "item", "item"]);
        assert!(report.is_fully_bound());
        assert_eq!(report.matched_count(), 4);
    }

    #[test]
    fn test_unmatched_nodes_are_reported_not_failed() {
        let mut b = DocumentBuilder::new();
        let root = b.element(None, QName::new("project", NS)).unwrap();
        b.element(Some(root), QName::new("stray", NS)).unwrap();
        let doc = b.finish().unwrap();

        let schema = schema();
        let mut resolver = Resolver::new(&schema, &ContextEvaluator);
        let report = validate(&mut resolver, &doc).unwrap();

        assert_eq!(report.unmatched_count(), 1);
        let unmatched: Vec<&str> = report.unmatched().map(|o| o.name.as_str()).collect();
        assert_eq!(unmatched, vec!["stray"]);
    }

    #[test]
    fn test_paths_are_occurrence_indexed() {
        let mut b = DocumentBuilder::new();
        let root = b.element(None, QName::new("project", NS)).unwrap();
        b.element(Some(root), QName::new("item", NS)).unwrap();
        b.element(Some(root), QName::new("item", NS)).unwrap();
        let doc = b.finish().unwrap();

        let schema = schema();
        let mut resolver = Resolver::new(&schema, &ContextEvaluator);
        let report = validate(&mut resolver, &doc).unwrap();

        let paths: Vec<&str> = report.outcomes().iter().map(|o| o.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["/project[0]", "/project[0]/item[0]", "/project[0]/item[1]"]
        );
    }
}
