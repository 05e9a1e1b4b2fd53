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

//! Occurrence indexing for fixed (bounded, positional) children.

use crate::error::{BindError, BindResult};
use crate::tree::{Document, NodeId};

/// Outcome of occurrence indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiblingIndex {
    /// Zero-based occurrence index, strictly below the descriptor's bound.
    Position(usize),
    /// The preceding run already contains `max_occurs` same-named
    /// siblings; the node cannot bind through this fixed descriptor.
    Overflow,
}

/// Count preceding same-named, same-kind siblings of `node` against a
/// fixed descriptor's occurrence bound.
///
/// Walks nearest-first and short-circuits to [`SiblingIndex::Overflow`] as
/// soon as the running count reaches `max_occurs`; it never re-walks the
/// run. Cost is linear in the sibling run length.
///
/// # Errors
///
/// `max_occurs == 0` is a caller bug ([`BindError::invariant`]): the
/// descriptor builders reject such declarations, so a zero can only reach
/// this function through a hand-assembled call.
pub fn occurrence_index(
    doc: &Document,
    node: NodeId,
    max_occurs: usize,
) -> BindResult<SiblingIndex> {
    if max_occurs == 0 {
        return Err(BindError::invariant(
            "occurrence indexing against a zero occurrence bound",
        ));
    }
    let probe = doc
        .get(node)
        .ok_or_else(|| BindError::invariant("occurrence indexing against a dead node"))?;

    let mut count = 0usize;
    for (_, sibling) in doc.preceding_siblings(node) {
        if sibling.name() == probe.name() {
            count += 1;
            if count >= max_occurs {
                return Ok(SiblingIndex::Overflow);
            }
        }
    }
    Ok(SiblingIndex::Position(count))
}
