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

//! Qualified names, declared name patterns, and namespace evaluation.
//!
//! A descriptor declares a [`NamePattern`]; before matching it against a
//! concrete node the pattern is resolved into an [`EvaluatedName`] by a
//! [`NamespaceEvaluator`], which may consult the document's
//! [`NamespaceContext`]. The evaluator is an injected capability so hosts
//! with their own namespace machinery can substitute it.

use std::collections::BTreeMap;

/// A concrete qualified name: local part plus namespace URI.
///
/// An empty namespace string means "no namespace" (the XML default for
/// unprefixed attributes).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    /// Local part of the name.
    pub local: String,
    /// Namespace URI, empty for "no namespace".
    pub namespace: String,
}

impl QName {
    /// Create a qualified name.
    pub fn new(local: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            local: local.into(),
            namespace: namespace.into(),
        }
    }

    /// Create a name with no namespace.
    pub fn local(local: impl Into<String>) -> Self {
        Self {
            local: local.into(),
            namespace: String::new(),
        }
    }
}

/// A declared (schema-side) name, resolved against a document context
/// before matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamePattern {
    /// Literal local name and namespace URI.
    Qualified {
        /// Local part of the name.
        local: String,
        /// Namespace URI the descriptor expects.
        namespace: String,
    },
    /// Local name with a symbolic namespace key; the key is resolved
    /// through the document's [`NamespaceContext`].
    Keyed {
        /// Local part of the name.
        local: String,
        /// Symbolic key looked up in the context's key table.
        key: String,
    },
    /// Local name only; matches regardless of namespace.
    AnyNamespace {
        /// Local part of the name.
        local: String,
    },
}

impl NamePattern {
    /// Literal qualified pattern.
    pub fn qualified(local: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self::Qualified {
            local: local.into(),
            namespace: namespace.into(),
        }
    }

    /// Pattern with a context-resolved namespace key.
    pub fn keyed(local: impl Into<String>, key: impl Into<String>) -> Self {
        Self::Keyed {
            local: local.into(),
            key: key.into(),
        }
    }

    /// Namespace-agnostic pattern.
    pub fn any_namespace(local: impl Into<String>) -> Self {
        Self::AnyNamespace {
            local: local.into(),
        }
    }

    /// The local part this pattern expects.
    pub fn local_name(&self) -> &str {
        match self {
            Self::Qualified { local, .. }
            | Self::Keyed { local, .. }
            | Self::AnyNamespace { local } => local,
        }
    }
}

/// A pattern resolved against a document context.
///
/// `namespace == None` means the pattern is namespace-agnostic and only the
/// local name participates in matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluatedName {
    /// Local part of the name.
    pub local: String,
    /// Resolved namespace URI, or `None` for a wildcard match.
    pub namespace: Option<String>,
}

impl EvaluatedName {
    /// Create an evaluated name with a concrete namespace.
    pub fn qualified(local: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            local: local.into(),
            namespace: Some(namespace.into()),
        }
    }

    /// Create a namespace-agnostic evaluated name.
    pub fn any(local: impl Into<String>) -> Self {
        Self {
            local: local.into(),
            namespace: None,
        }
    }
}

/// Namespace information carried by a document: its default namespace and
/// the symbolic key table used by [`NamePattern::Keyed`] descriptors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceContext {
    /// The default namespace of the document's root element.
    pub default_namespace: String,
    keys: BTreeMap<String, String>,
}

impl NamespaceContext {
    /// Context with a default namespace and no keys.
    pub fn new(default_namespace: impl Into<String>) -> Self {
        Self {
            default_namespace: default_namespace.into(),
            keys: BTreeMap::new(),
        }
    }

    /// Register a symbolic namespace key.
    pub fn with_key(mut self, key: impl Into<String>, namespace: impl Into<String>) -> Self {
        self.keys.insert(key.into(), namespace.into());
        self
    }

    /// Register a symbolic namespace key in place.
    pub fn insert_key(&mut self, key: impl Into<String>, namespace: impl Into<String>) {
        self.keys.insert(key.into(), namespace.into());
    }

    /// Look up a symbolic key.
    pub fn key(&self, key: &str) -> Option<&str> {
        self.keys.get(key).map(String::as_str)
    }
}

/// Injected capability resolving a declared name pattern into a concrete
/// (or wildcard) name for matching.
pub trait NamespaceEvaluator {
    /// Resolve `pattern` against `context`.
    fn evaluate(&self, pattern: &NamePattern, context: &NamespaceContext) -> EvaluatedName;
}

/// Default evaluator: literal patterns pass through, keyed patterns are
/// looked up in the context's key table and fall back to the document's
/// default namespace when the key is undeclared.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextEvaluator;

impl NamespaceEvaluator for ContextEvaluator {
    fn evaluate(&self, pattern: &NamePattern, context: &NamespaceContext) -> EvaluatedName {
        match pattern {
            NamePattern::Qualified { local, namespace } => {
                EvaluatedName::qualified(local.clone(), namespace.clone())
            }
            NamePattern::Keyed { local, key } => {
                let namespace = context
                    .key(key)
                    .unwrap_or(&context.default_namespace)
                    .to_string();
                EvaluatedName {
                    local: local.clone(),
                    namespace: Some(namespace),
                }
            }
            NamePattern::AnyNamespace { local } => EvaluatedName::any(local.clone()),
        }
    }
}
