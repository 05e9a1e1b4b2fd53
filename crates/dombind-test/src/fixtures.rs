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

//! Canonical schemas and documents for binding tests.

use dombind_core::{
    DescriptorSet, Document, DocumentBuilder, NamePattern, NodeId, QName, Schema,
};

/// Namespace shared by all fixtures.
pub const NS: &str = "urn:fixtures";

/// A project schema exercising every descriptor category:
///
/// - fixed `name` (bound 1) and `item` (bound 2)
/// - collection `dep`
/// - custom fallback `Extension`
/// - attribute `lang`
///
/// `Dep` declares one fixed `version` child so nested resolution has a
/// second level to bind through.
pub fn project_schema() -> Schema {
    let project = DescriptorSet::builder()
        .fixed(NamePattern::qualified("name", NS), "ProjectName", 1)
        .fixed(NamePattern::qualified("item", NS), "Item", 2)
        .collection(NamePattern::qualified("dep", NS), "Dep")
        .custom("Extension")
        .attribute(NamePattern::qualified("lang", NS), "Lang")
        .build()
        .expect("fixture schema is well-formed");
    let dep = DescriptorSet::builder()
        .fixed(NamePattern::qualified("version", NS), "Version", 1)
        .build()
        .expect("fixture schema is well-formed");
    Schema::builder()
        .root(NamePattern::qualified("project", NS), "Project")
        .descriptor_set("Project", project)
        .descriptor_set("Dep", dep)
        .build()
        .expect("fixture schema is well-formed")
}

/// A schema with one fixed and one collection descriptor for the same
/// name, for occurrence-split tests.
pub fn split_schema(max_occurs: usize) -> Schema {
    let set = DescriptorSet::builder()
        .fixed(NamePattern::qualified("item", NS), "Item", max_occurs)
        .collection(NamePattern::qualified("item", NS), "Item")
        .build()
        .expect("fixture schema is well-formed");
    Schema::builder()
        .root(NamePattern::qualified("project", NS), "Project")
        .descriptor_set("Project", set)
        .build()
        .expect("fixture schema is well-formed")
}

/// A `<project>` root with `n` `<item>` children.
pub fn project_with_items(n: usize) -> (Document, Vec<NodeId>) {
    let mut b = DocumentBuilder::new();
    let root = b
        .element(None, QName::new("project", NS))
        .expect("fixture document is well-formed");
    let items = (0..n)
        .map(|_| {
            b.element(Some(root), QName::new("item", NS))
                .expect("fixture document is well-formed")
        })
        .collect();
    (b.finish().expect("fixture document is well-formed"), items)
}

/// A project exercising every category: name, three items, a dep with a
/// version, an unknown extension child, and a `lang` attribute.
///
/// Returns the document and the root id.
pub fn comprehensive_project() -> (Document, NodeId) {
    let mut b = DocumentBuilder::new();
    let root = b
        .element(None, QName::new("project", NS))
        .expect("fixture document is well-formed");
    b.attribute(root, QName::local("lang"))
        .expect("fixture document is well-formed");
    b.element(Some(root), QName::new("name", NS))
        .expect("fixture document is well-formed");
    for _ in 0..3 {
        b.element(Some(root), QName::new("item", NS))
            .expect("fixture document is well-formed");
    }
    let dep = b
        .element(Some(root), QName::new("dep", NS))
        .expect("fixture document is well-formed");
    b.element(Some(dep), QName::new("version", NS))
        .expect("fixture document is well-formed");
    b.element(Some(root), QName::new("plugin", NS))
        .expect("fixture document is well-formed");
    (
        b.finish().expect("fixture document is well-formed"),
        root,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use dombind_core::{BindingKind, ContextEvaluator, Resolver};

    #[test]
    fn test_project_schema_builds() {
        let schema = project_schema();
        assert!(schema.descriptor_set("Project").is_some());
        assert!(schema.descriptor_set("Dep").is_some());
    }

    #[test]
    fn test_comprehensive_project_covers_all_categories() {
        let schema = project_schema();
        let (doc, root) = comprehensive_project();
        let mut resolver = Resolver::new(&schema, &ContextEvaluator);

        let mut kinds = Vec::new();
        for id in doc.subtree_ids(root) {
            if let Some(binding) = resolver.resolve(&doc, id).unwrap() {
                kinds.push(binding.kind);
            }
        }
        assert!(kinds.contains(&BindingKind::Root));
        assert!(kinds.contains(&BindingKind::Fixed { index: 0 }));
        assert!(kinds.contains(&BindingKind::Fixed { index: 1 }));
        assert!(kinds.contains(&BindingKind::Collection));
        assert!(kinds.contains(&BindingKind::Custom));
        assert!(kinds.contains(&BindingKind::Attribute));
    }
}
