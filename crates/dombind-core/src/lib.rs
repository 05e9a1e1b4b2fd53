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

//! Core binding engine for Dombind.
//!
//! Given an arena markup tree and a declarative schema of expected
//! children and attributes, the engine deterministically resolves each
//! element/attribute node to a typed model binding, with positional
//! disambiguation for bounded repeated children. Results are memoized per
//! node and invalidated by subtree when the tree mutates.
//!
//! # Overview
//!
//! - [`tree`]: the arena document (`Document`, `NodeId`, builder,
//!   structural mutation)
//! - [`descriptor`]: schema descriptors and their construction-time
//!   well-formedness checks
//! - [`name`]: qualified names, declared patterns, namespace evaluation
//! - [`matcher`] / [`sibling`]: the pure matching and occurrence-indexing
//!   primitives
//! - [`resolver`]: the ordered category dispatch (root → fixed →
//!   collection → custom → attribute)
//! - [`cache`]: per-node memoization over an injectable annotation store
//! - [`validate`]: whole-document binding reports
//!
//! # Example
//!
//! ```rust
//! use dombind_core::{
//!     BindingKind, ContextEvaluator, DescriptorSet, DocumentBuilder, NamePattern, QName,
//!     Resolver, Schema,
//! };
//!
//! const NS: &str = "urn:example";
//!
//! let set = DescriptorSet::builder()
//!     .fixed(NamePattern::qualified("item", NS), "Item", 2)
//!     .collection(NamePattern::qualified("item", NS), "Item")
//!     .build()?;
//! let schema = Schema::builder()
//!     .root(NamePattern::qualified("project", NS), "Project")
//!     .descriptor_set("Project", set)
//!     .build()?;
//!
//! let mut b = DocumentBuilder::new();
//! let root = b.element(None, QName::new("project", NS))?;
//! let first = b.element(Some(root), QName::new("item", NS))?;
//! let doc = b.finish()?;
//!
//! let mut resolver = Resolver::new(&schema, &ContextEvaluator);
//! let binding = resolver.resolve(&doc, first)?.expect("bound");
//! assert_eq!(binding.kind, BindingKind::Fixed { index: 0 });
//! # Ok::<(), dombind_core::BindError>(())
//! ```

pub mod cache;
pub mod descriptor;
mod error;
pub mod matcher;
pub mod name;
pub mod resolver;
pub mod sibling;
pub mod tree;
pub mod validate;

pub use cache::{AnnotationStore, BindingCache, CacheEntry, CacheStats, InMemoryStore};
pub use descriptor::{
    Descriptor, DescriptorKind, DescriptorSet, DescriptorSetBuilder, Schema, SchemaBuilder,
};
pub use error::{BindError, BindErrorKind, BindResult};
pub use name::{
    ContextEvaluator, EvaluatedName, NamePattern, NamespaceContext, NamespaceEvaluator, QName,
};
pub use resolver::{Binding, BindingKind, DescriptorPath, Resolver};
pub use sibling::{occurrence_index, SiblingIndex};
pub use tree::{Document, DocumentBuilder, NodeData, NodeId, NodeKind};
pub use validate::{validate, NodeOutcome, ValidationReport};
