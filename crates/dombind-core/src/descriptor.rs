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

//! Schema descriptors: what children and attributes a model type expects.
//!
//! Descriptor sets are built through [`DescriptorSetBuilder`] /
//! [`SchemaBuilder`], which enforce well-formedness at construction time.
//! Resolution therefore never re-validates a schema; a malformed
//! declaration is rejected before any document is consulted.

use std::collections::BTreeMap;

use crate::error::{BindError, BindResult};
use crate::name::NamePattern;

/// The category of a descriptor. The set is closed; resolution dispatches
/// over it in a fixed priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DescriptorKind {
    /// The document's top-level element.
    Root,
    /// A child that may appear a bounded number of times, each occurrence
    /// individually addressable by index.
    Fixed {
        /// Number of addressable occurrences; always `>= 1`.
        max_occurs: usize,
    },
    /// A child with unbounded repetition, not individually indexed.
    Collection,
    /// A fallback child matched by name presence rather than a declared
    /// qualified name.
    Custom,
    /// An attribute of the owning element.
    Attribute,
}

impl DescriptorKind {
    /// Short human-readable label (used by reports and the CLI).
    pub fn label(&self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Fixed { .. } => "fixed",
            Self::Collection => "collection",
            Self::Custom => "custom",
            Self::Attribute => "attribute",
        }
    }
}

/// One declared expectation for a child element or attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    name: NamePattern,
    kind: DescriptorKind,
    type_name: String,
}

impl Descriptor {
    fn new(name: NamePattern, kind: DescriptorKind, type_name: impl Into<String>) -> Self {
        Self {
            name,
            kind,
            type_name: type_name.into(),
        }
    }

    /// Declared name pattern.
    pub fn name(&self) -> &NamePattern {
        &self.name
    }

    /// Descriptor category.
    pub fn kind(&self) -> &DescriptorKind {
        &self.kind
    }

    /// The model type a binding through this descriptor exposes.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

/// Ordered descriptors owned by one model type. Insertion order is
/// evaluation priority for same-kind descriptors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptorSet {
    descriptors: Vec<Descriptor>,
}

impl DescriptorSet {
    /// Start building a descriptor set.
    pub fn builder() -> DescriptorSetBuilder {
        DescriptorSetBuilder::default()
    }

    /// All descriptors in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Descriptor> {
        self.descriptors.iter()
    }

    /// Descriptor at `index` in declaration order.
    pub fn get(&self, index: usize) -> Option<&Descriptor> {
        self.descriptors.get(index)
    }

    /// Number of descriptors.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether the set declares nothing.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Fixed-child descriptors with their declaration indices.
    pub fn fixed(&self) -> impl Iterator<Item = (usize, &Descriptor)> {
        self.descriptors
            .iter()
            .enumerate()
            .filter(|(_, d)| matches!(d.kind, DescriptorKind::Fixed { .. }))
    }

    /// Collection-child descriptors with their declaration indices.
    pub fn collections(&self) -> impl Iterator<Item = (usize, &Descriptor)> {
        self.descriptors
            .iter()
            .enumerate()
            .filter(|(_, d)| d.kind == DescriptorKind::Collection)
    }

    /// Attribute descriptors with their declaration indices.
    pub fn attributes(&self) -> impl Iterator<Item = (usize, &Descriptor)> {
        self.descriptors
            .iter()
            .enumerate()
            .filter(|(_, d)| d.kind == DescriptorKind::Attribute)
    }

    /// The set's custom-child descriptor, if one is declared.
    ///
    /// The builder guarantees at most one exists.
    pub fn custom(&self) -> Option<(usize, &Descriptor)> {
        self.descriptors
            .iter()
            .enumerate()
            .find(|(_, d)| d.kind == DescriptorKind::Custom)
    }
}

/// Builder for [`DescriptorSet`]; all well-formedness checks happen in
/// [`DescriptorSetBuilder::build`].
#[derive(Debug, Default)]
pub struct DescriptorSetBuilder {
    descriptors: Vec<Descriptor>,
}

impl DescriptorSetBuilder {
    /// Declare a fixed child with `max_occurs` addressable occurrences.
    pub fn fixed(
        mut self,
        name: NamePattern,
        type_name: impl Into<String>,
        max_occurs: usize,
    ) -> Self {
        self.descriptors.push(Descriptor::new(
            name,
            DescriptorKind::Fixed { max_occurs },
            type_name,
        ));
        self
    }

    /// Declare a collection child (unbounded repetition).
    pub fn collection(mut self, name: NamePattern, type_name: impl Into<String>) -> Self {
        self.descriptors
            .push(Descriptor::new(name, DescriptorKind::Collection, type_name));
        self
    }

    /// Declare the custom-child fallback.
    pub fn custom(mut self, type_name: impl Into<String>) -> Self {
        self.descriptors.push(Descriptor::new(
            NamePattern::any_namespace(""),
            DescriptorKind::Custom,
            type_name,
        ));
        self
    }

    /// Declare an attribute.
    pub fn attribute(mut self, name: NamePattern, type_name: impl Into<String>) -> Self {
        self.descriptors
            .push(Descriptor::new(name, DescriptorKind::Attribute, type_name));
        self
    }

    /// Validate and build the set.
    pub fn build(self) -> BindResult<DescriptorSet> {
        let mut customs = 0usize;
        for descriptor in &self.descriptors {
            match &descriptor.kind {
                DescriptorKind::Fixed { max_occurs } => {
                    if *max_occurs == 0 {
                        return Err(BindError::schema(format!(
                            "fixed child '{}' declares zero occurrences",
                            descriptor.name.local_name()
                        )));
                    }
                }
                DescriptorKind::Custom => {
                    customs += 1;
                    if descriptor.type_name.is_empty() {
                        return Err(BindError::schema(
                            "custom child descriptor has an empty type",
                        ));
                    }
                }
                DescriptorKind::Root => {
                    return Err(BindError::schema(
                        "root descriptors belong to the schema, not a descriptor set",
                    ));
                }
                DescriptorKind::Collection | DescriptorKind::Attribute => {}
            }
        }
        if customs > 1 {
            return Err(BindError::schema(
                "descriptor set declares more than one custom child",
            ));
        }
        Ok(DescriptorSet {
            descriptors: self.descriptors,
        })
    }
}

/// A complete schema: the root element descriptor plus the descriptor set
/// of every model type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    root: Descriptor,
    types: BTreeMap<String, DescriptorSet>,
}

impl Schema {
    /// Start building a schema.
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// The root element descriptor.
    pub fn root(&self) -> &Descriptor {
        &self.root
    }

    /// Descriptor set governing children of `type_name`, if declared.
    pub fn descriptor_set(&self, type_name: &str) -> Option<&DescriptorSet> {
        self.types.get(type_name)
    }

    /// All declared model types with their descriptor sets.
    pub fn types(&self) -> impl Iterator<Item = (&str, &DescriptorSet)> {
        self.types.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Builder for [`Schema`].
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    root: Option<Descriptor>,
    duplicate_root: bool,
    types: BTreeMap<String, DescriptorSet>,
    duplicate_type: Option<String>,
}

impl SchemaBuilder {
    /// Declare the root element. Declaring it twice is a schema error
    /// surfaced by [`SchemaBuilder::build`].
    pub fn root(mut self, name: NamePattern, type_name: impl Into<String>) -> Self {
        if self.root.is_some() {
            self.duplicate_root = true;
        } else {
            self.root = Some(Descriptor::new(name, DescriptorKind::Root, type_name));
        }
        self
    }

    /// Attach the descriptor set for a model type.
    pub fn descriptor_set(mut self, type_name: impl Into<String>, set: DescriptorSet) -> Self {
        let type_name = type_name.into();
        if self.types.insert(type_name.clone(), set).is_some() {
            self.duplicate_type = Some(type_name);
        }
        self
    }

    /// Validate and build the schema.
    pub fn build(self) -> BindResult<Schema> {
        if self.duplicate_root {
            return Err(BindError::schema("schema declares more than one root"));
        }
        if let Some(type_name) = self.duplicate_type {
            return Err(
                BindError::schema("duplicate descriptor set").with_context(type_name)
            );
        }
        let root = self
            .root
            .ok_or_else(|| BindError::schema("schema declares no root element"))?;
        if root.type_name.is_empty() {
            return Err(BindError::schema("root descriptor has an empty type"));
        }
        Ok(Schema {
            root,
            types: self.types,
        })
    }
}
