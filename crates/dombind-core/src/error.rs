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

//! Error types for schema construction and binding.
//!
//! A node that simply falls outside the modeled schema is *not* an error:
//! the resolver reports it as `Ok(None)`. `BindError` covers the two
//! genuinely exceptional cases: a malformed schema declaration rejected at
//! construction time, and a violated caller precondition.

use std::fmt;
use thiserror::Error;

/// The kind of error that occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindErrorKind {
    /// Malformed schema declaration (duplicate root, empty custom type,
    /// zero occurrence bound). Raised only while building descriptor sets.
    Schema,
    /// Violated caller precondition, such as indexing against a descriptor
    /// with no occurrence budget. Indicates a bug in the caller, never a
    /// property of the input document.
    Invariant,
}

impl fmt::Display for BindErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Schema => write!(f, "SchemaError"),
            Self::Invariant => write!(f, "InvariantViolation"),
        }
    }
}

/// An error raised during schema construction or binding.
#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}")]
pub struct BindError {
    /// The kind of error.
    pub kind: BindErrorKind,
    /// Human-readable error message.
    pub message: String,
    /// Additional context (e.g., "in descriptor set for type Project").
    pub context: Option<String>,
}

impl BindError {
    /// Create a new error.
    pub fn new(kind: BindErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: None,
        }
    }

    /// Add context information.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// A schema construction error.
    pub fn schema(message: impl Into<String>) -> Self {
        Self::new(BindErrorKind::Schema, message)
    }

    /// A violated caller precondition.
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::new(BindErrorKind::Invariant, message)
    }
}

/// Result type for binding operations.
pub type BindResult<T> = Result<T, BindError>;
