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

//! Per-node memoization of binding results.
//!
//! Each node caches at most one entry: the resolved binding, or an
//! explicit no-match sentinel (so "known to be outside the schema" is as
//! cheap to re-answer as a hit). The backing store is an injected
//! [`AnnotationStore`], letting hosts attach entries to their own node
//! annotation machinery; [`InMemoryStore`] is the standalone default.
//!
//! The cache is not internally synchronized. Lookups on disjoint subtrees
//! may proceed concurrently (each with its own cache), but lookup and
//! invalidation over the same subtree require external serialization.

use std::collections::HashMap;

use crate::resolver::Binding;
use crate::tree::{Document, NodeId};

/// A cached per-node resolution result.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheEntry {
    /// The node resolved to this binding.
    Bound(Binding),
    /// The node is known to have no binding under the current tree shape.
    NoMatch,
}

impl CacheEntry {
    /// The binding, if this entry holds one.
    pub fn binding(&self) -> Option<&Binding> {
        match self {
            Self::Bound(binding) => Some(binding),
            Self::NoMatch => None,
        }
    }

    /// Convert into the resolver's `Option<Binding>` result shape.
    pub fn into_binding(self) -> Option<Binding> {
        match self {
            Self::Bound(binding) => Some(binding),
            Self::NoMatch => None,
        }
    }
}

impl From<Option<Binding>> for CacheEntry {
    fn from(binding: Option<Binding>) -> Self {
        match binding {
            Some(binding) => Self::Bound(binding),
            None => Self::NoMatch,
        }
    }
}

/// Node-identity-keyed storage for cache entries.
///
/// Implementations only store and retrieve; hit/miss accounting and
/// invalidation policy live in [`BindingCache`].
pub trait AnnotationStore {
    /// Read the entry attached to `node`, if any.
    fn read(&self, node: NodeId) -> Option<&CacheEntry>;
    /// Attach an entry to `node`, replacing any previous one.
    fn write(&mut self, node: NodeId, entry: CacheEntry);
    /// Drop the entry attached to `node`.
    fn remove(&mut self, node: NodeId);
    /// Drop every entry.
    fn clear(&mut self);
}

/// Default [`AnnotationStore`]: a plain node-id-keyed map.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: HashMap<NodeId, CacheEntry>,
}

impl InMemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl AnnotationStore for InMemoryStore {
    fn read(&self, node: NodeId) -> Option<&CacheEntry> {
        self.entries.get(&node)
    }

    fn write(&mut self, node: NodeId, entry: CacheEntry) {
        self.entries.insert(node, entry);
    }

    fn remove(&mut self, node: NodeId) {
        self.entries.remove(&node);
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Lookup and invalidation counters, observable by tests and reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CacheStats {
    /// Lookups answered from the store.
    pub hits: u64,
    /// Lookups that required a fresh computation.
    pub misses: u64,
    /// Entries dropped by subtree invalidation.
    pub invalidated: u64,
}

/// The memoization layer: an [`AnnotationStore`] plus accounting and the
/// conservative subtree invalidation policy.
#[derive(Debug, Default)]
pub struct BindingCache<S: AnnotationStore = InMemoryStore> {
    store: S,
    stats: CacheStats,
}

impl BindingCache<InMemoryStore> {
    /// Cache backed by the default in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: AnnotationStore> BindingCache<S> {
    /// Cache backed by an injected store.
    pub fn with_store(store: S) -> Self {
        Self {
            store,
            stats: CacheStats::default(),
        }
    }

    /// Look up the entry for `node`, counting a hit or a miss.
    ///
    /// Entries attached to nodes that have since been detached from the
    /// tree are dropped on sight, so stale results cannot outlive their
    /// nodes.
    pub fn lookup(&mut self, doc: &Document, node: NodeId) -> Option<CacheEntry> {
        if doc.get(node).is_none() {
            self.store.remove(node);
            self.stats.misses += 1;
            return None;
        }
        match self.store.read(node) {
            Some(entry) => {
                self.stats.hits += 1;
                Some(entry.clone())
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    /// Attach a computed result to `node`.
    pub fn store(&mut self, node: NodeId, entry: CacheEntry) {
        self.store.write(node, entry);
    }

    /// Drop entries for every node in the subtree rooted at
    /// `subtree_root`. Conservative: the whole affected subtree goes,
    /// rather than attempting a fine-grained diff.
    pub fn invalidate(&mut self, doc: &Document, subtree_root: NodeId) {
        for id in doc.subtree_ids(subtree_root) {
            if self.store.read(id).is_some() {
                self.store.remove(id);
                self.stats.invalidated += 1;
            }
        }
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Lookup and invalidation counters so far.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// The backing store.
    pub fn store_ref(&self) -> &S {
        &self.store
    }
}
