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

//! Arena-based markup tree.
//!
//! Nodes are referenced by integer id; parent and previous-sibling links
//! are stored as indices, so the tree has unambiguous ownership and no
//! reference cycles. Element children and attributes live in separate
//! ordered lists, which keeps sibling walks kind-homogeneous.
//!
//! Structural mutation ([`Document::insert_element`],
//! [`Document::remove_subtree`]) returns the affected parent so callers can
//! invalidate any binding cache covering that subtree.

use crate::error::{BindError, BindResult};
use crate::name::{NamespaceContext, QName};

/// Arena index of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(u32);

impl NodeId {
    /// Arena slot of this id.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    fn new(index: usize) -> Self {
        Self(index as u32)
    }
}

/// The kind of a tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    /// An element tag.
    Element,
    /// An attribute of an element.
    Attribute,
}

/// One node in the arena.
#[derive(Debug, Clone)]
pub struct NodeData {
    kind: NodeKind,
    name: QName,
    raw_name: String,
    parent: Option<NodeId>,
    prev_sibling: Option<NodeId>,
    children: Vec<NodeId>,
    attributes: Vec<NodeId>,
    detached: bool,
}

impl NodeData {
    fn new(kind: NodeKind, name: QName, raw_name: String, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            name,
            raw_name,
            parent,
            prev_sibling: None,
            children: Vec::new(),
            attributes: Vec::new(),
            detached: false,
        }
    }

    /// Node kind.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Resolved qualified name (local part + namespace URI).
    pub fn name(&self) -> &QName {
        &self.name
    }

    /// The name as written in the source, prefix included.
    pub fn raw_name(&self) -> &str {
        &self.raw_name
    }

    /// Parent node, if any.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Previous sibling of the same kind, if any.
    pub fn prev_sibling(&self) -> Option<NodeId> {
        self.prev_sibling
    }

    /// Element children in document order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Attributes in document order.
    pub fn attributes(&self) -> &[NodeId] {
        &self.attributes
    }

    /// Whether this node is an element.
    pub fn is_element(&self) -> bool {
        self.kind == NodeKind::Element
    }

    /// Whether this node is an attribute.
    pub fn is_attribute(&self) -> bool {
        self.kind == NodeKind::Attribute
    }
}

/// An arena-backed markup document.
#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: Vec<NodeData>,
    root: Option<NodeId>,
    context: NamespaceContext,
}

impl Document {
    /// The root element, if the document has one.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Namespace context used for descriptor name evaluation.
    pub fn context(&self) -> &NamespaceContext {
        &self.context
    }

    /// Look up a node; `None` for out-of-range or detached ids.
    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.index()).filter(|n| !n.detached)
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| !n.detached).count()
    }

    /// Whether the document has no live nodes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `id` is the document's root element.
    pub fn is_root(&self, id: NodeId) -> bool {
        self.root == Some(id)
    }

    /// The owning element of a node (the parent for elements and
    /// attributes alike), if it is a live element.
    pub fn parent_element(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.get(id)?.parent?;
        self.get(parent).filter(|n| n.is_element())?;
        Some(parent)
    }

    /// Iterate over preceding siblings of the same kind, nearest first.
    pub fn preceding_siblings(&self, id: NodeId) -> PrecedingSiblings<'_> {
        PrecedingSiblings {
            doc: self,
            current: self.get(id).and_then(|n| n.prev_sibling),
        }
    }

    /// All live node ids in the subtree rooted at `root` (attributes
    /// included), in depth-first pre-order.
    pub fn subtree_ids(&self, root: NodeId) -> Vec<NodeId> {
        let mut ids = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.get(id) else { continue };
            ids.push(id);
            stack.extend(node.attributes.iter().copied());
            stack.extend(node.children.iter().rev().copied());
        }
        ids
    }

    fn push_node(&mut self, data: NodeData) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(data);
        id
    }

    fn relink_children(&mut self, parent: NodeId) {
        let children = self.nodes[parent.index()].children.clone();
        let mut prev = None;
        for child in children {
            self.nodes[child.index()].prev_sibling = prev;
            prev = Some(child);
        }
    }

    fn relink_attributes(&mut self, owner: NodeId) {
        let attributes = self.nodes[owner.index()].attributes.clone();
        let mut prev = None;
        for attr in attributes {
            self.nodes[attr.index()].prev_sibling = prev;
            prev = Some(attr);
        }
    }

    /// Insert a new element at `index` among `parent`'s children.
    ///
    /// Returns the new node's id. The caller is responsible for
    /// invalidating any binding cache covering `parent`'s subtree.
    pub fn insert_element(
        &mut self,
        parent: NodeId,
        index: usize,
        name: QName,
    ) -> BindResult<NodeId> {
        let raw = name.local.clone();
        self.insert_element_raw(parent, index, name, raw)
    }

    /// Insert a new element with an explicit source-form (prefixed) name.
    pub fn insert_element_raw(
        &mut self,
        parent: NodeId,
        index: usize,
        name: QName,
        raw_name: impl Into<String>,
    ) -> BindResult<NodeId> {
        let parent_node = self
            .get(parent)
            .ok_or_else(|| BindError::invariant("insert target is not a live node"))?;
        if !parent_node.is_element() {
            return Err(BindError::invariant("insert target is not an element"));
        }
        if index > parent_node.children.len() {
            return Err(BindError::invariant(format!(
                "child index {} out of bounds ({} children)",
                index,
                parent_node.children.len()
            )));
        }
        let id = self.push_node(NodeData::new(
            NodeKind::Element,
            name,
            raw_name.into(),
            Some(parent),
        ));
        self.nodes[parent.index()].children.insert(index, id);
        self.relink_children(parent);
        Ok(id)
    }

    /// Remove the subtree rooted at `id` (or a single attribute).
    ///
    /// Returns the parent whose subtree was affected, or `None` when the
    /// root itself was removed. The caller is responsible for invalidating
    /// any binding cache covering that parent's subtree.
    pub fn remove_subtree(&mut self, id: NodeId) -> BindResult<Option<NodeId>> {
        let node = self
            .get(id)
            .ok_or_else(|| BindError::invariant("removal target is not a live node"))?;
        let parent = node.parent;
        let kind = node.kind;

        for sub in self.subtree_ids(id) {
            self.nodes[sub.index()].detached = true;
        }
        if self.root == Some(id) {
            self.root = None;
        }
        if let Some(parent) = parent {
            match kind {
                NodeKind::Element => {
                    self.nodes[parent.index()].children.retain(|&c| c != id);
                    self.relink_children(parent);
                }
                NodeKind::Attribute => {
                    self.nodes[parent.index()].attributes.retain(|&a| a != id);
                    self.relink_attributes(parent);
                }
            }
        }
        Ok(parent)
    }
}

/// Iterator over preceding same-kind siblings, nearest first.
pub struct PrecedingSiblings<'a> {
    doc: &'a Document,
    current: Option<NodeId>,
}

impl<'a> Iterator for PrecedingSiblings<'a> {
    type Item = (NodeId, &'a NodeData);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.doc.get(id)?;
        self.current = node.prev_sibling();
        Some((id, node))
    }
}

/// Incremental constructor for [`Document`].
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    doc: Document,
}

impl DocumentBuilder {
    /// Builder with an empty namespace context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder with the given namespace context.
    pub fn with_context(context: NamespaceContext) -> Self {
        Self {
            doc: Document {
                context,
                ..Document::default()
            },
        }
    }

    /// Replace the namespace context.
    pub fn set_context(&mut self, context: NamespaceContext) {
        self.doc.context = context;
    }

    /// The document under construction.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Append an element. `parent == None` creates the root; a document
    /// has exactly one.
    pub fn element(&mut self, parent: Option<NodeId>, name: QName) -> BindResult<NodeId> {
        let raw = name.local.clone();
        self.element_raw(parent, name, raw)
    }

    /// Append an element with an explicit source-form (prefixed) name.
    pub fn element_raw(
        &mut self,
        parent: Option<NodeId>,
        name: QName,
        raw_name: impl Into<String>,
    ) -> BindResult<NodeId> {
        match parent {
            None => {
                if self.doc.root.is_some() {
                    return Err(BindError::invariant("document already has a root element"));
                }
                let id = self
                    .doc
                    .push_node(NodeData::new(NodeKind::Element, name, raw_name.into(), None));
                self.doc.root = Some(id);
                Ok(id)
            }
            Some(parent) => {
                let index = self
                    .doc
                    .get(parent)
                    .filter(|n| n.is_element())
                    .ok_or_else(|| BindError::invariant("parent is not a live element"))?
                    .children()
                    .len();
                self.doc.insert_element_raw(parent, index, name, raw_name)
            }
        }
    }

    /// Append an attribute to `owner`.
    pub fn attribute(&mut self, owner: NodeId, name: QName) -> BindResult<NodeId> {
        let raw = name.local.clone();
        self.attribute_raw(owner, name, raw)
    }

    /// Append an attribute with an explicit source-form (prefixed) name.
    pub fn attribute_raw(
        &mut self,
        owner: NodeId,
        name: QName,
        raw_name: impl Into<String>,
    ) -> BindResult<NodeId> {
        self.doc
            .get(owner)
            .filter(|n| n.is_element())
            .ok_or_else(|| BindError::invariant("attribute owner is not a live element"))?;
        let prev = self.doc.nodes[owner.index()].attributes.last().copied();
        let id = self.doc.push_node(NodeData::new(
            NodeKind::Attribute,
            name,
            raw_name.into(),
            Some(owner),
        ));
        self.doc.nodes[id.index()].prev_sibling = prev;
        self.doc.nodes[owner.index()].attributes.push(id);
        Ok(id)
    }

    /// Finish the document. Fails if no root element was added.
    pub fn finish(self) -> BindResult<Document> {
        if self.doc.root.is_none() {
            return Err(BindError::invariant("document has no root element"));
        }
        Ok(self.doc)
    }
}
