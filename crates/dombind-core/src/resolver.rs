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

//! Binding resolution: the ordered category dispatch.
//!
//! For a given node, descriptor categories are tried strictly in this
//! order, first success wins:
//!
//! 1. root — the document's top-level element, no parent lookup;
//! 2. fixed — bounded positional children, occurrence-indexed;
//! 3. collection — unbounded children;
//! 4. custom — the fallback child, only when neither a fixed nor a
//!    collection binding was produced for the node in this pass;
//! 5. attribute — attribute nodes against the owning element's set.
//!
//! `Ok(None)` means the node is outside the modeled schema; callers fall
//! back to generic tree handling. Parent bindings resolve recursively
//! through the same memoized entry point, so binding a deep node fills the
//! cache along its ancestor chain.
//!
//! The resolver borrows the document per call rather than owning it: the
//! cache outlives structural edits, and the tree-mutation observer calls
//! [`Resolver::invalidate`] with the affected parent between edits and
//! subsequent lookups. Resolution itself is synchronous and bounded: cost
//! is proportional to the sibling run length and the descriptor set size,
//! with no I/O and no suspension.

use crate::cache::{AnnotationStore, BindingCache, CacheEntry, CacheStats, InMemoryStore};
use crate::descriptor::{DescriptorKind, Schema};
use crate::error::{BindError, BindResult};
use crate::matcher::{matches_attribute, matches_element};
use crate::name::NamespaceEvaluator;
use crate::sibling::{occurrence_index, SiblingIndex};
use crate::tree::{Document, NodeId};

/// Identity of a descriptor inside a schema: the owning model type (or
/// the schema root) plus the declaration index within its set.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DescriptorPath {
    /// Owning model type; `None` for the schema's root descriptor.
    pub owner: Option<String>,
    /// Declaration index within the owner's descriptor set (0 for root).
    pub index: usize,
}

impl DescriptorPath {
    fn root() -> Self {
        Self {
            owner: None,
            index: 0,
        }
    }

    fn in_type(owner: &str, index: usize) -> Self {
        Self {
            owner: Some(owner.to_string()),
            index,
        }
    }
}

/// How a node bound.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BindingKind {
    /// The document's top-level element.
    Root,
    /// A bounded positional child with its occurrence index.
    Fixed {
        /// Zero-based occurrence index among same-named siblings.
        index: usize,
    },
    /// An unbounded child.
    Collection,
    /// The custom-child fallback.
    Custom,
    /// An attribute of a bound element.
    Attribute,
}

/// The resolved binding of a node: which descriptor claimed it, as what,
/// and (for fixed children) at which occurrence index.
///
/// Identity is by node, descriptor path, and kind; two resolutions of the
/// same node under the same tree shape compare equal.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Binding {
    /// The bound node.
    pub node: NodeId,
    /// The category (and occurrence index) it bound as.
    pub kind: BindingKind,
    /// The model type the binding exposes.
    pub type_name: String,
    /// Identity of the claiming descriptor.
    pub descriptor: DescriptorPath,
}

impl Binding {
    /// Occurrence index, for fixed bindings.
    pub fn index(&self) -> Option<usize> {
        match self.kind {
            BindingKind::Fixed { index } => Some(index),
            _ => None,
        }
    }
}

/// Memoizing binding resolver for one schema.
pub struct Resolver<'a, S: AnnotationStore = InMemoryStore> {
    schema: &'a Schema,
    evaluator: &'a dyn NamespaceEvaluator,
    cache: BindingCache<S>,
}

impl<'a> Resolver<'a, InMemoryStore> {
    /// Resolver with the default in-memory cache store.
    pub fn new(schema: &'a Schema, evaluator: &'a dyn NamespaceEvaluator) -> Self {
        Self::with_store(schema, evaluator, InMemoryStore::new())
    }
}

impl<'a, S: AnnotationStore> Resolver<'a, S> {
    /// Resolver with an injected annotation store.
    pub fn with_store(
        schema: &'a Schema,
        evaluator: &'a dyn NamespaceEvaluator,
        store: S,
    ) -> Self {
        Self {
            schema,
            evaluator,
            cache: BindingCache::with_store(store),
        }
    }

    /// The governing schema.
    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    /// Cache counters so far.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Drop cached results for the subtree rooted at `subtree_root`.
    ///
    /// Must be called after any structural mutation that can change
    /// sibling counts or descriptor applicability under that parent, and
    /// never concurrently with [`Resolver::resolve`] on an overlapping
    /// subtree.
    pub fn invalidate(&mut self, doc: &Document, subtree_root: NodeId) {
        self.cache.invalidate(doc, subtree_root);
    }

    /// Resolve the binding for `node`.
    ///
    /// `Ok(None)` is the ordinary "not part of the model" outcome. `Err`
    /// is reserved for violated caller preconditions and cannot be
    /// produced by schemas assembled through the descriptor builders.
    pub fn resolve(&mut self, doc: &Document, node: NodeId) -> BindResult<Option<Binding>> {
        if let Some(entry) = self.cache.lookup(doc, node) {
            return Ok(entry.into_binding());
        }
        let computed = self.compute(doc, node)?;
        self.cache.store(node, CacheEntry::from(computed.clone()));
        Ok(computed)
    }

    fn compute(&mut self, doc: &Document, node: NodeId) -> BindResult<Option<Binding>> {
        let Some(data) = doc.get(node) else {
            return Ok(None);
        };
        if data.is_attribute() {
            self.compute_attribute(doc, node)
        } else {
            self.compute_element(doc, node)
        }
    }

    fn compute_element(&mut self, doc: &Document, node: NodeId) -> BindResult<Option<Binding>> {
        let schema = self.schema;
        let evaluator = self.evaluator;

        // Category 1: the top-level element always binds as root.
        if doc.is_root(node) {
            return Ok(Some(Binding {
                node,
                kind: BindingKind::Root,
                type_name: schema.root().type_name().to_string(),
                descriptor: DescriptorPath::root(),
            }));
        }

        let Some(parent) = doc.parent_element(node) else {
            return Ok(None);
        };
        let Some(parent_binding) = self.resolve(doc, parent)? else {
            return Ok(None);
        };
        let Some(set) = schema.descriptor_set(&parent_binding.type_name) else {
            return Ok(None);
        };
        let data = doc
            .get(node)
            .ok_or_else(|| BindError::invariant("node vanished mid-resolution"))?;
        let owner_type = parent_binding.type_name.as_str();

        // Category 2: fixed children, declaration order; an overflowed
        // run falls through to the remaining categories.
        let mut fixed_binding = None;
        for (i, descriptor) in set.fixed() {
            let DescriptorKind::Fixed { max_occurs } = *descriptor.kind() else {
                continue;
            };
            let name = evaluator.evaluate(descriptor.name(), doc.context());
            if !matches_element(&name, data) {
                continue;
            }
            match occurrence_index(doc, node, max_occurs)? {
                SiblingIndex::Position(index) => {
                    fixed_binding = Some(Binding {
                        node,
                        kind: BindingKind::Fixed { index },
                        type_name: descriptor.type_name().to_string(),
                        descriptor: DescriptorPath::in_type(owner_type, i),
                    });
                    break;
                }
                SiblingIndex::Overflow => continue,
            }
        }
        if fixed_binding.is_some() {
            return Ok(fixed_binding);
        }

        // Category 3: collection children, first name match wins.
        let mut collection_binding = None;
        for (i, descriptor) in set.collections() {
            let name = evaluator.evaluate(descriptor.name(), doc.context());
            if matches_element(&name, data) {
                collection_binding = Some(Binding {
                    node,
                    kind: BindingKind::Collection,
                    type_name: descriptor.type_name().to_string(),
                    descriptor: DescriptorPath::in_type(owner_type, i),
                });
                break;
            }
        }
        if collection_binding.is_some() {
            return Ok(collection_binding);
        }

        // Category 4: the custom fallback. Requires a non-empty local
        // name and that this pass produced neither a fixed nor a
        // collection binding for the node.
        if let Some((i, descriptor)) = set.custom() {
            if !data.name().local.is_empty()
                && fixed_binding.is_none()
                && collection_binding.is_none()
            {
                return Ok(Some(Binding {
                    node,
                    kind: BindingKind::Custom,
                    type_name: descriptor.type_name().to_string(),
                    descriptor: DescriptorPath::in_type(owner_type, i),
                }));
            }
        }

        Ok(None)
    }

    fn compute_attribute(&mut self, doc: &Document, node: NodeId) -> BindResult<Option<Binding>> {
        let schema = self.schema;
        let evaluator = self.evaluator;

        let Some(owner) = doc.parent_element(node) else {
            return Ok(None);
        };
        let Some(owner_binding) = self.resolve(doc, owner)? else {
            return Ok(None);
        };
        let Some(set) = schema.descriptor_set(&owner_binding.type_name) else {
            return Ok(None);
        };
        let data = doc
            .get(node)
            .ok_or_else(|| BindError::invariant("node vanished mid-resolution"))?;
        let owner_namespace = doc
            .get(owner)
            .map(|o| o.name().namespace.clone())
            .unwrap_or_default();

        // Category 5: attribute descriptors, first name match wins.
        for (i, descriptor) in set.attributes() {
            let name = evaluator.evaluate(descriptor.name(), doc.context());
            if matches_attribute(&name, data, &owner_namespace) {
                return Ok(Some(Binding {
                    node,
                    kind: BindingKind::Attribute,
                    type_name: descriptor.type_name().to_string(),
                    descriptor: DescriptorPath::in_type(&owner_binding.type_name, i),
                }));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::DescriptorSet;
    use crate::name::{ContextEvaluator, NamePattern, QName};
    use crate::tree::DocumentBuilder;

    const NS: &str = "urn:test";

    fn item_schema(max_occurs: usize, with_collection: bool) -> Schema {
        let mut set = DescriptorSet::builder().fixed(
            NamePattern::qualified("item", NS),
            "Item",
            max_occurs,
        );
        if with_collection {
            set = set.collection(NamePattern::qualified("item", NS), "Item");
        }
        Schema::builder()
            .root(NamePattern::qualified("project", NS), "Project")
            .descriptor_set("Project", set.build().unwrap())
            .build()
            .unwrap()
    }

    fn project_with_items(n: usize) -> (Document, Vec<NodeId>) {
        let mut b = DocumentBuilder::new();
        let root = b.element(None, QName::new("project", NS)).unwrap();
        let items = (0..n)
            .map(|_| b.element(Some(root), QName::new("item", NS)).unwrap())
            .collect();
        (b.finish().unwrap(), items)
    }

    #[test]
    fn test_root_always_binds() {
        let schema = item_schema(1, false);
        let (doc, _) = project_with_items(0);
        let mut resolver = Resolver::new(&schema, &ContextEvaluator);
        let binding = resolver.resolve(&doc, doc.root().unwrap()).unwrap().unwrap();
        assert_eq!(binding.kind, BindingKind::Root);
        assert_eq!(binding.type_name, "Project");
    }

    #[test]
    fn test_fixed_then_collection_split() {
        let schema = item_schema(2, true);
        let (doc, items) = project_with_items(3);
        let mut resolver = Resolver::new(&schema, &ContextEvaluator);

        let first = resolver.resolve(&doc, items[0]).unwrap().unwrap();
        assert_eq!(first.kind, BindingKind::Fixed { index: 0 });

        let second = resolver.resolve(&doc, items[1]).unwrap().unwrap();
        assert_eq!(second.kind, BindingKind::Fixed { index: 1 });

        let third = resolver.resolve(&doc, items[2]).unwrap().unwrap();
        assert_eq!(third.kind, BindingKind::Collection);
    }

    #[test]
    fn test_overflow_without_collection_is_no_match() {
        let schema = item_schema(2, false);
        let (doc, items) = project_with_items(3);
        let mut resolver = Resolver::new(&schema, &ContextEvaluator);
        assert!(resolver.resolve(&doc, items[2]).unwrap().is_none());
    }

    #[test]
    fn test_unknown_child_is_no_match() {
        let schema = item_schema(1, false);
        let mut b = DocumentBuilder::new();
        let root = b.element(None, QName::new("project", NS)).unwrap();
        let stray = b.element(Some(root), QName::new("stray", NS)).unwrap();
        let doc = b.finish().unwrap();
        let mut resolver = Resolver::new(&schema, &ContextEvaluator);
        assert!(resolver.resolve(&doc, stray).unwrap().is_none());
    }

    #[test]
    fn test_custom_fallback_binds_unknown_named_child() {
        let set = DescriptorSet::builder()
            .fixed(NamePattern::qualified("name", NS), "Name", 1)
            .custom("Extension")
            .build()
            .unwrap();
        let schema = Schema::builder()
            .root(NamePattern::qualified("project", NS), "Project")
            .descriptor_set("Project", set)
            .build()
            .unwrap();

        let mut b = DocumentBuilder::new();
        let root = b.element(None, QName::new("project", NS)).unwrap();
        let stray = b.element(Some(root), QName::new("whatever", NS)).unwrap();
        let doc = b.finish().unwrap();

        let mut resolver = Resolver::new(&schema, &ContextEvaluator);
        let binding = resolver.resolve(&doc, stray).unwrap().unwrap();
        assert_eq!(binding.kind, BindingKind::Custom);
        assert_eq!(binding.type_name, "Extension");
    }

    #[test]
    fn test_custom_never_attempted_for_empty_name() {
        let set = DescriptorSet::builder().custom("Extension").build().unwrap();
        let schema = Schema::builder()
            .root(NamePattern::qualified("project", NS), "Project")
            .descriptor_set("Project", set)
            .build()
            .unwrap();

        let mut b = DocumentBuilder::new();
        let root = b.element(None, QName::new("project", NS)).unwrap();
        let nameless = b.element(Some(root), QName::new("", NS)).unwrap();
        let doc = b.finish().unwrap();

        let mut resolver = Resolver::new(&schema, &ContextEvaluator);
        assert!(resolver.resolve(&doc, nameless).unwrap().is_none());
    }

    #[test]
    fn test_attribute_binds_through_owner() {
        let set = DescriptorSet::builder()
            .attribute(NamePattern::qualified("lang", NS), "Lang")
            .build()
            .unwrap();
        let schema = Schema::builder()
            .root(NamePattern::qualified("project", NS), "Project")
            .descriptor_set("Project", set)
            .build()
            .unwrap();

        let mut b = DocumentBuilder::new();
        let root = b.element(None, QName::new("project", NS)).unwrap();
        let attr = b.attribute(root, QName::local("lang")).unwrap();
        let doc = b.finish().unwrap();

        let mut resolver = Resolver::new(&schema, &ContextEvaluator);
        let binding = resolver.resolve(&doc, attr).unwrap().unwrap();
        assert_eq!(binding.kind, BindingKind::Attribute);
        assert_eq!(binding.type_name, "Lang");
    }

    #[test]
    fn test_foreign_namespace_attribute_no_match() {
        // Descriptor evaluates to ns1; the attribute sits in ns0 under a
        // ns0 tag, so neither namespace branch holds.
        let set = DescriptorSet::builder()
            .attribute(NamePattern::qualified("lang", "ns1"), "Lang")
            .build()
            .unwrap();
        let schema = Schema::builder()
            .root(NamePattern::qualified("tag", "ns0"), "Tag")
            .descriptor_set("Tag", set)
            .build()
            .unwrap();

        let mut b = DocumentBuilder::new();
        let root = b.element(None, QName::new("tag", "ns0")).unwrap();
        let attr = b.attribute(root, QName::new("lang", "ns0")).unwrap();
        let doc = b.finish().unwrap();

        let mut resolver = Resolver::new(&schema, &ContextEvaluator);
        assert!(resolver.resolve(&doc, attr).unwrap().is_none());
    }

    #[test]
    fn test_fixed_declaration_order_first_match_wins() {
        let set = DescriptorSet::builder()
            .fixed(NamePattern::qualified("item", NS), "First", 1)
            .fixed(NamePattern::qualified("item", NS), "Second", 1)
            .build()
            .unwrap();
        let schema = Schema::builder()
            .root(NamePattern::qualified("project", NS), "Project")
            .descriptor_set("Project", set)
            .build()
            .unwrap();
        let (doc, items) = project_with_items(1);
        let mut resolver = Resolver::new(&schema, &ContextEvaluator);
        let binding = resolver.resolve(&doc, items[0]).unwrap().unwrap();
        assert_eq!(binding.type_name, "First");
    }

    #[test]
    fn test_overflowed_first_descriptor_falls_to_second() {
        let set = DescriptorSet::builder()
            .fixed(NamePattern::qualified("item", NS), "First", 1)
            .fixed(NamePattern::qualified("item", NS), "Second", 2)
            .build()
            .unwrap();
        let schema = Schema::builder()
            .root(NamePattern::qualified("project", NS), "Project")
            .descriptor_set("Project", set)
            .build()
            .unwrap();
        let (doc, items) = project_with_items(2);
        let mut resolver = Resolver::new(&schema, &ContextEvaluator);

        // Second occurrence overflows "First" (bound 1) but fits
        // "Second" (bound 2) at index 1.
        let binding = resolver.resolve(&doc, items[1]).unwrap().unwrap();
        assert_eq!(binding.type_name, "Second");
        assert_eq!(binding.kind, BindingKind::Fixed { index: 1 });
    }

    #[test]
    fn test_resolution_fills_ancestor_chain() {
        let project_set = DescriptorSet::builder()
            .collection(NamePattern::qualified("module", NS), "Module")
            .build()
            .unwrap();
        let module_set = DescriptorSet::builder()
            .fixed(NamePattern::qualified("name", NS), "Name", 1)
            .build()
            .unwrap();
        let schema = Schema::builder()
            .root(NamePattern::qualified("project", NS), "Project")
            .descriptor_set("Project", project_set)
            .descriptor_set("Module", module_set)
            .build()
            .unwrap();

        let mut b = DocumentBuilder::new();
        let root = b.element(None, QName::new("project", NS)).unwrap();
        let module = b.element(Some(root), QName::new("module", NS)).unwrap();
        let name = b.element(Some(module), QName::new("name", NS)).unwrap();
        let doc = b.finish().unwrap();

        let mut resolver = Resolver::new(&schema, &ContextEvaluator);
        let binding = resolver.resolve(&doc, name).unwrap().unwrap();
        assert_eq!(binding.kind, BindingKind::Fixed { index: 0 });
        assert_eq!(binding.type_name, "Name");

        // The ancestor chain was resolved and cached on the way; asking
        // for the module again is a pure hit.
        let hits_before = resolver.cache_stats().hits;
        assert!(resolver.resolve(&doc, module).unwrap().is_some());
        assert_eq!(resolver.cache_stats().hits, hits_before + 1);
    }

    #[test]
    fn test_cached_result_is_identical() {
        let schema = item_schema(2, true);
        let (doc, items) = project_with_items(2);
        let mut resolver = Resolver::new(&schema, &ContextEvaluator);
        let first = resolver.resolve(&doc, items[1]).unwrap();
        let again = resolver.resolve(&doc, items[1]).unwrap();
        assert_eq!(first, again);
    }

    #[test]
    fn test_mutation_plus_invalidate_recomputes() {
        let schema = item_schema(2, true);
        let (mut doc, items) = project_with_items(2);
        let root = doc.root().unwrap();
        let mut resolver = Resolver::new(&schema, &ContextEvaluator);

        let binding = resolver.resolve(&doc, items[1]).unwrap().unwrap();
        assert_eq!(binding.kind, BindingKind::Fixed { index: 1 });

        // Shift the run by inserting a new first item, then invalidate
        // the affected parent's subtree.
        doc.insert_element(root, 0, QName::new("item", NS)).unwrap();
        resolver.invalidate(&doc, root);

        let binding = resolver.resolve(&doc, items[1]).unwrap().unwrap();
        assert_eq!(binding.kind, BindingKind::Collection);
    }

    #[test]
    fn test_invalidate_recomputes_value_equal_result() {
        let schema = item_schema(2, true);
        let (doc, items) = project_with_items(1);
        let mut resolver = Resolver::new(&schema, &ContextEvaluator);

        let before = resolver.resolve(&doc, items[0]).unwrap();
        resolver.invalidate(&doc, doc.root().unwrap());
        let misses_before = resolver.cache_stats().misses;
        let after = resolver.resolve(&doc, items[0]).unwrap();

        assert_eq!(before, after);
        assert!(resolver.cache_stats().misses > misses_before);
    }

    #[test]
    fn test_removed_node_resolves_to_no_match() {
        let schema = item_schema(2, true);
        let (mut doc, items) = project_with_items(2);
        let root = doc.root().unwrap();
        let mut resolver = Resolver::new(&schema, &ContextEvaluator);

        assert!(resolver.resolve(&doc, items[0]).unwrap().is_some());
        doc.remove_subtree(items[0]).unwrap();
        resolver.invalidate(&doc, root);

        assert!(resolver.resolve(&doc, items[0]).unwrap().is_none());
        // The survivor moved down one occurrence slot.
        let binding = resolver.resolve(&doc, items[1]).unwrap().unwrap();
        assert_eq!(binding.kind, BindingKind::Fixed { index: 0 });
    }
}
