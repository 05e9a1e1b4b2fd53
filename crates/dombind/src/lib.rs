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

//! # Dombind
//!
//! Schema-driven binding of markup trees to typed model handlers.
//!
//! Given a declarative schema of expected children and attributes,
//! Dombind deterministically resolves each element/attribute node of a
//! markup tree to a typed binding — fixed children are occurrence-indexed,
//! collections repeat unbounded, a custom fallback catches the rest —
//! with per-node memoization and subtree invalidation on structural
//! edits.
//!
//! ## Quick Start
//!
//! ```rust
//! use dombind::{
//!     BindingKind, ContextEvaluator, DescriptorSet, DocumentBuilder, NamePattern, QName,
//!     Resolver, Schema,
//! };
//!
//! const NS: &str = "urn:quickstart";
//!
//! // Declare the schema: up to two indexed <item> children, then
//! // unbounded repetition.
//! let set = DescriptorSet::builder()
//!     .fixed(NamePattern::qualified("item", NS), "Item", 2)
//!     .collection(NamePattern::qualified("item", NS), "Item")
//!     .build()?;
//! let schema = Schema::builder()
//!     .root(NamePattern::qualified("project", NS), "Project")
//!     .descriptor_set("Project", set)
//!     .build()?;
//!
//! // Build a document with three items.
//! let mut b = DocumentBuilder::new();
//! let root = b.element(None, QName::new("project", NS))?;
//! let items: Vec<_> = (0..3)
//!     .map(|_| b.element(Some(root), QName::new("item", NS)))
//!     .collect::<Result<_, _>>()?;
//! let doc = b.finish()?;
//!
//! // Resolve: fixed 0, fixed 1, collection.
//! let mut resolver = Resolver::new(&schema, &ContextEvaluator);
//! assert_eq!(
//!     resolver.resolve(&doc, items[0])?.map(|b| b.kind),
//!     Some(BindingKind::Fixed { index: 0 })
//! );
//! assert_eq!(
//!     resolver.resolve(&doc, items[2])?.map(|b| b.kind),
//!     Some(BindingKind::Collection)
//! );
//! # Ok::<(), dombind::BindError>(())
//! ```
//!
//! ## Modules
//!
//! - [`core`](dombind_core): arena tree, descriptors, resolver, cache
//! - `xml` (feature = "xml"): XML ingestion and declarative schema
//!   loading
//!
//! ## Design
//!
//! Resolution is a pure, bounded computation over the tree: no I/O, no
//! suspension, cost proportional to sibling run length and descriptor
//! set size. Callers that mutate the tree invalidate the affected parent
//! subtree; the cache also drops entries for detached nodes on sight.

// Re-export core types
pub use dombind_core::{
    occurrence_index, validate, AnnotationStore, BindError, BindErrorKind, BindResult, Binding,
    BindingCache, BindingKind, CacheEntry, CacheStats, ContextEvaluator, Descriptor,
    DescriptorKind, DescriptorPath, DescriptorSet, DescriptorSetBuilder, Document,
    DocumentBuilder, EvaluatedName, InMemoryStore, NamePattern, NamespaceContext,
    NamespaceEvaluator, NodeData, NodeId, NodeKind, NodeOutcome, QName, Resolver, Schema,
    SchemaBuilder, SiblingIndex, ValidationReport,
};

/// XML front-end (feature = "xml").
#[cfg(feature = "xml")]
pub use dombind_xml as xml;
