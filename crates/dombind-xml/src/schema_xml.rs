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

//! Declarative schema loading.
//!
//! Schemas are declared in a compact XML dialect and assembled through the
//! core builders, so malformed declarations surface at load time, never
//! during resolution:
//!
//! ```xml
//! <schema targetNamespace="urn:demo">
//!   <root name="project" type="Project"/>
//!   <type name="Project">
//!     <element name="name" type="ProjectName"/>
//!     <element name="item" type="Item" maxOccurs="2"/>
//!     <element name="dep" type="Dep" maxOccurs="unbounded"/>
//!     <any type="Extension"/>
//!     <attribute name="lang" type="Lang" namespace="urn:other"/>
//!   </type>
//! </schema>
//! ```
//!
//! `element` declarations are fixed children by default (`maxOccurs`
//! absent = 1, a number = that bound) and collection children with
//! `maxOccurs="unbounded"`. `any` declares the custom-child fallback.
//! Name attributes resolve to the `targetNamespace` unless a `namespace`,
//! `key` (context-resolved), or `anyNamespace="true"` attribute says
//! otherwise.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dombind_core::{DescriptorSet, NamePattern, Schema};
use parking_lot::RwLock;
use roxmltree::{Document as XmlDocument, Node};
use thiserror::Error;

/// Errors that can occur while loading a schema declaration.
#[derive(Debug, Clone, Error)]
pub enum SchemaLoadError {
    /// The schema XML itself is malformed.
    #[error("Schema parse error: {message}")]
    ParseError {
        /// Description of the parsing error.
        message: String,
    },

    /// The declaration is well-formed XML but not a valid schema
    /// (unknown directive, missing attribute, or a construction rule
    /// rejected by the core builders).
    #[error("Invalid schema declaration: {message}")]
    InvalidDeclaration {
        /// Description of the violated rule.
        message: String,
    },

    /// Schema file not found.
    #[error("Schema file not found: {}", path.display())]
    NotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// I/O error reading the schema file.
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error.
        message: String,
    },
}

/// Parse a schema declaration from its XML text.
pub fn from_schema_xml(text: &str) -> Result<Schema, SchemaLoadError> {
    let doc = XmlDocument::parse(text).map_err(|e| SchemaLoadError::ParseError {
        message: e.to_string(),
    })?;
    let root = doc.root_element();
    if root.tag_name().name() != "schema" {
        return Err(SchemaLoadError::InvalidDeclaration {
            message: "root element must be <schema>".to_string(),
        });
    }
    let target_namespace = root.attribute("targetNamespace").unwrap_or("");

    let mut builder = Schema::builder();
    for child in root.children().filter(|n| n.is_element()) {
        match child.tag_name().name() {
            "root" => {
                let name = required(&child, "name")?;
                let type_name = required(&child, "type")?;
                builder = builder.root(pattern(&child, name, target_namespace), type_name);
            }
            "type" => {
                let type_name = required(&child, "name")?;
                let set = parse_type(&child, target_namespace)?;
                builder = builder.descriptor_set(type_name, set);
            }
            other => {
                return Err(SchemaLoadError::InvalidDeclaration {
                    message: format!("unknown schema directive <{}>", other),
                });
            }
        }
    }
    builder
        .build()
        .map_err(|e| SchemaLoadError::InvalidDeclaration {
            message: e.to_string(),
        })
}

/// Load a schema declaration from a file.
pub fn from_schema_file(path: &Path) -> Result<Schema, SchemaLoadError> {
    if !path.exists() {
        return Err(SchemaLoadError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let text = fs::read_to_string(path).map_err(|e| SchemaLoadError::Io {
        message: e.to_string(),
    })?;
    from_schema_xml(&text)
}

fn required<'a>(node: &Node<'a, '_>, attr: &str) -> Result<&'a str, SchemaLoadError> {
    node.attribute(attr)
        .ok_or_else(|| SchemaLoadError::InvalidDeclaration {
            message: format!(
                "<{}> is missing the '{}' attribute",
                node.tag_name().name(),
                attr
            ),
        })
}

fn pattern(node: &Node<'_, '_>, name: &str, target_namespace: &str) -> NamePattern {
    if node.attribute("anyNamespace") == Some("true") {
        NamePattern::any_namespace(name)
    } else if let Some(key) = node.attribute("key") {
        NamePattern::keyed(name, key)
    } else if let Some(ns) = node.attribute("namespace") {
        NamePattern::qualified(name, ns)
    } else {
        NamePattern::qualified(name, target_namespace)
    }
}

fn parse_type(
    node: &Node<'_, '_>,
    target_namespace: &str,
) -> Result<DescriptorSet, SchemaLoadError> {
    let mut builder = DescriptorSet::builder();
    for child in node.children().filter(|n| n.is_element()) {
        match child.tag_name().name() {
            "element" => {
                let name = required(&child, "name")?;
                let type_name = required(&child, "type")?;
                let name_pattern = pattern(&child, name, target_namespace);
                match child.attribute("maxOccurs") {
                    None => builder = builder.fixed(name_pattern, type_name, 1),
                    Some("unbounded") => {
                        builder = builder.collection(name_pattern, type_name)
                    }
                    Some(n) => {
                        let bound =
                            n.parse::<usize>()
                                .map_err(|_| SchemaLoadError::InvalidDeclaration {
                                    message: format!(
                                        "maxOccurs must be a number or 'unbounded', found '{}'",
                                        n
                                    ),
                                })?;
                        builder = builder.fixed(name_pattern, type_name, bound);
                    }
                }
            }
            "any" => {
                let type_name = required(&child, "type")?;
                builder = builder.custom(type_name);
            }
            "attribute" => {
                let name = required(&child, "name")?;
                let type_name = required(&child, "type")?;
                builder = builder.attribute(pattern(&child, name, target_namespace), type_name);
            }
            other => {
                return Err(SchemaLoadError::InvalidDeclaration {
                    message: format!("unknown descriptor directive <{}>", other),
                });
            }
        }
    }
    builder
        .build()
        .map_err(|e| SchemaLoadError::InvalidDeclaration {
            message: e.to_string(),
        })
}

/// Thread-safe cache of loaded schemas, keyed by path.
///
/// Parsing a schema is pure, so concurrent loads of the same path are
/// harmless; the double-checked write keeps the cache single-copy.
pub struct SchemaCache {
    cache: Arc<RwLock<HashMap<PathBuf, Arc<Schema>>>>,
    max_size: usize,
}

impl SchemaCache {
    /// Cache holding at most `max_size` schemas.
    pub fn new(max_size: usize) -> Self {
        Self {
            cache: Arc::new(RwLock::new(HashMap::new())),
            max_size,
        }
    }

    /// Get the cached schema for `path`, loading it on first use.
    pub fn get_or_load(&self, path: &Path) -> Result<Arc<Schema>, SchemaLoadError> {
        {
            let cache = self.cache.read();
            if let Some(schema) = cache.get(path) {
                return Ok(Arc::clone(schema));
            }
        }

        let mut cache = self.cache.write();
        // Another thread may have loaded while we waited for the lock.
        if let Some(schema) = cache.get(path) {
            return Ok(Arc::clone(schema));
        }

        let schema = Arc::new(from_schema_file(path)?);
        if cache.len() >= self.max_size {
            if let Some(evicted) = cache.keys().next().cloned() {
                cache.remove(&evicted);
            }
        }
        cache.insert(path.to_path_buf(), Arc::clone(&schema));
        Ok(schema)
    }

    /// Drop every cached schema.
    pub fn clear(&self) {
        self.cache.write().clear();
    }

    /// Number of cached schemas.
    pub fn size(&self) -> usize {
        self.cache.read().len()
    }
}

impl Default for SchemaCache {
    /// Cache with capacity 100.
    fn default() -> Self {
        Self::new(100)
    }
}
