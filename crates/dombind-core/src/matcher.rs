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

//! Name matching: does a concrete node satisfy an evaluated descriptor
//! name? Pure functions of their inputs.

use crate::name::EvaluatedName;
use crate::tree::NodeData;

/// Whether an element node satisfies an evaluated descriptor name.
///
/// The local names must be equal; the namespaces must be equal unless the
/// pattern evaluated to a namespace wildcard.
pub fn matches_element(name: &EvaluatedName, node: &NodeData) -> bool {
    if name.local != node.name().local {
        return false;
    }
    match &name.namespace {
        None => true,
        Some(ns) => *ns == node.name().namespace,
    }
}

/// Whether an attribute node satisfies an evaluated descriptor name.
///
/// Unprefixed attributes carry no namespace of their own, so the match
/// also succeeds when the descriptor's namespace equals the owning tag's
/// namespace and the local name equals the attribute's source-form name.
/// A foreign-namespace descriptor matches only an attribute explicitly in
/// that namespace.
pub fn matches_attribute(
    name: &EvaluatedName,
    attribute: &NodeData,
    owner_namespace: &str,
) -> bool {
    match &name.namespace {
        None => name.local == attribute.name().local,
        Some(ns) => {
            (ns == owner_namespace && name.local == attribute.raw_name())
                || *ns == attribute.name().namespace
        }
    }
}
