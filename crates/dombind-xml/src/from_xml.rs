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

//! XML to arena document conversion.
//!
//! Only structure participates in binding, so text content is skipped;
//! elements and attributes are materialized with resolved namespaces.
//! Namespace declarations (`xmlns`, `xmlns:p`) are tracked on a scope
//! stack and are not materialized as attribute nodes. The document's
//! [`NamespaceContext`] collects the root's default namespace and every
//! prefix declaration (first declaration of a prefix wins) so keyed
//! descriptor patterns can resolve against it.

use std::collections::HashMap;

use dombind_core::{Document, DocumentBuilder, NamespaceContext, NodeId, QName};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::XmlError;

/// Configuration for XML import.
#[derive(Debug, Clone)]
pub struct FromXmlConfig {
    /// Maximum element nesting depth (prevents stack overflow).
    pub max_recursion_depth: usize,
    /// Maximum children per element (prevents memory exhaustion).
    pub max_children: usize,
    /// Maximum attributes per element.
    pub max_attributes: usize,
}

impl Default for FromXmlConfig {
    fn default() -> Self {
        Self {
            max_recursion_depth: 100,
            max_children: 100_000,
            max_attributes: 1_000,
        }
    }
}

/// One level of in-scope namespace declarations.
#[derive(Debug, Clone, Default)]
struct Scope {
    default_namespace: String,
    prefixes: HashMap<String, String>,
}

/// Convert an XML string into an arena [`Document`].
pub fn from_xml(xml: &str, config: &FromXmlConfig) -> Result<Document, XmlError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut builder = DocumentBuilder::new();
    let mut context = NamespaceContext::default();
    let mut stack: Vec<(NodeId, Scope)> = Vec::new();
    let mut root_closed = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let (id, scope) = open_element(
                    &e,
                    &mut builder,
                    &mut context,
                    &stack,
                    root_closed,
                    config,
                )?;
                stack.push((id, scope));
            }
            Ok(Event::Empty(e)) => {
                open_element(&e, &mut builder, &mut context, &stack, root_closed, config)?;
                if stack.is_empty() {
                    root_closed = true;
                }
            }
            Ok(Event::End(_)) => {
                stack.pop();
                if stack.is_empty() {
                    root_closed = true;
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {} // text, comments, declarations: structure only
            Err(e) => {
                return Err(XmlError::ParseError {
                    pos: reader.buffer_position(),
                    message: e.to_string(),
                })
            }
        }
    }

    builder.set_context(context);
    builder.finish().map_err(|e| XmlError::StructureError {
        message: e.to_string(),
    })
}

fn open_element(
    e: &BytesStart<'_>,
    builder: &mut DocumentBuilder,
    context: &mut NamespaceContext,
    stack: &[(NodeId, Scope)],
    root_closed: bool,
    config: &FromXmlConfig,
) -> Result<(NodeId, Scope), XmlError> {
    if stack.is_empty() && root_closed {
        return Err(XmlError::StructureError {
            message: "content after the root element".to_string(),
        });
    }
    if stack.len() >= config.max_recursion_depth {
        return Err(XmlError::RecursionLimitExceeded {
            max: config.max_recursion_depth,
            current: stack.len() + 1,
        });
    }

    let parent = stack.last().map(|(id, _)| *id);
    let mut scope = stack
        .last()
        .map(|(_, scope)| scope.clone())
        .unwrap_or_default();

    // First pass over attributes: namespace declarations extend the scope
    // before any name in this element resolves.
    let mut plain_attrs: Vec<(String, String, Option<String>)> = Vec::new();
    for attr in e.attributes().flatten() {
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = String::from_utf8_lossy(&attr.value).to_string();
        if key == "xmlns" {
            scope.default_namespace = value;
        } else if let Some(prefix) = key.strip_prefix("xmlns:") {
            if context.key(prefix).is_none() {
                context.insert_key(prefix, value.clone());
            }
            scope.prefixes.insert(prefix.to_string(), value);
        } else {
            let split = key
                .split_once(':')
                .map(|(prefix, local)| (prefix.to_string(), local.to_string()));
            match split {
                Some((prefix, local)) => plain_attrs.push((key, local, Some(prefix))),
                None => {
                    let local = key.clone();
                    plain_attrs.push((key, local, None));
                }
            }
        }
    }
    if plain_attrs.len() > config.max_attributes {
        return Err(XmlError::AttributeLimitExceeded {
            max: config.max_attributes,
            current: plain_attrs.len(),
        });
    }

    let raw_name = String::from_utf8_lossy(e.name().as_ref()).to_string();
    let (local, namespace) = match raw_name.split_once(':') {
        Some((prefix, local)) => {
            let ns = scope
                .prefixes
                .get(prefix)
                .ok_or_else(|| XmlError::UndeclaredPrefix {
                    prefix: prefix.to_string(),
                })?
                .clone();
            (local.to_string(), ns)
        }
        None => (raw_name.clone(), scope.default_namespace.clone()),
    };

    if parent.is_none() {
        // The root element fixes the document's default namespace.
        context.default_namespace = scope.default_namespace.clone();
    }
    if let Some(parent) = parent {
        let child_count = builder
            .document()
            .get(parent)
            .map(|p| p.children().len())
            .unwrap_or(0);
        if child_count >= config.max_children {
            return Err(XmlError::ChildLimitExceeded {
                max: config.max_children,
                current: child_count + 1,
            });
        }
    }

    let id = builder
        .element_raw(parent, QName::new(local, namespace), raw_name)
        .map_err(|e| XmlError::StructureError {
            message: e.to_string(),
        })?;

    for (raw, local, prefix) in plain_attrs {
        // Unprefixed attributes carry no namespace of their own.
        let namespace = match &prefix {
            Some(prefix) => scope
                .prefixes
                .get(prefix)
                .ok_or_else(|| XmlError::UndeclaredPrefix {
                    prefix: prefix.clone(),
                })?
                .clone(),
            None => String::new(),
        };
        builder
            .attribute_raw(id, QName::new(local, namespace), raw)
            .map_err(|e| XmlError::StructureError {
                message: e.to_string(),
            })?;
    }

    Ok((id, scope))
}
