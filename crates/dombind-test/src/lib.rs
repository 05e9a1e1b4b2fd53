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

//! Shared test fixtures and utilities for Dombind.
//!
//! Canonical schemas and documents covering the binding categories, plus
//! the call-counting evaluator used to observe memoization behavior.
//!
//! # Quick Start
//!
//! ```rust
//! use dombind_core::{ContextEvaluator, Resolver};
//! use dombind_test::{fixtures, CountingEvaluator};
//!
//! let schema = fixtures::project_schema();
//! let (doc, items) = fixtures::project_with_items(3);
//!
//! let evaluator = CountingEvaluator::default();
//! let mut resolver = Resolver::new(&schema, &evaluator);
//! resolver.resolve(&doc, items[0]).unwrap();
//! assert!(evaluator.calls() > 0);
//! ```

use std::cell::Cell;

use dombind_core::{
    ContextEvaluator, EvaluatedName, NamePattern, NamespaceContext, NamespaceEvaluator,
};

/// Canonical schemas and documents.
pub mod fixtures;

/// Call-counting [`NamespaceEvaluator`] double.
///
/// Delegates to [`ContextEvaluator`] and records how many descriptor
/// names were evaluated, so tests can assert that a cache hit skipped
/// recomputation entirely.
#[derive(Debug, Default)]
pub struct CountingEvaluator {
    calls: Cell<u64>,
}

impl CountingEvaluator {
    /// Evaluator with a zeroed counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of evaluations so far.
    pub fn calls(&self) -> u64 {
        self.calls.get()
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.calls.set(0);
    }
}

impl NamespaceEvaluator for CountingEvaluator {
    fn evaluate(&self, pattern: &NamePattern, context: &NamespaceContext) -> EvaluatedName {
        self.calls.set(self.calls.get() + 1);
        ContextEvaluator.evaluate(pattern, context)
    }
}
