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

//! Inspect command - dump a schema's descriptor sets.

use super::load_schema;
use dombind_core::{Descriptor, DescriptorKind, NamePattern};

/// Print the root declaration and every model type's descriptors.
pub fn inspect(schema: &str) -> Result<(), String> {
    let schema = load_schema(schema)?;

    println!(
        "root: {} -> {}",
        pattern_text(schema.root().name()),
        schema.root().type_name()
    );
    for (type_name, set) in schema.types() {
        println!("type {} ({} descriptors)", type_name, set.len());
        for descriptor in set.iter() {
            println!("  {}", descriptor_text(descriptor));
        }
    }
    Ok(())
}

fn descriptor_text(descriptor: &Descriptor) -> String {
    match descriptor.kind() {
        DescriptorKind::Fixed { max_occurs } => format!(
            "fixed      {} -> {} (maxOccurs {})",
            pattern_text(descriptor.name()),
            descriptor.type_name(),
            max_occurs
        ),
        DescriptorKind::Collection => format!(
            "collection {} -> {}",
            pattern_text(descriptor.name()),
            descriptor.type_name()
        ),
        DescriptorKind::Custom => format!("custom     * -> {}", descriptor.type_name()),
        DescriptorKind::Attribute => format!(
            "attribute  {} -> {}",
            pattern_text(descriptor.name()),
            descriptor.type_name()
        ),
        DescriptorKind::Root => format!(
            "root       {} -> {}",
            pattern_text(descriptor.name()),
            descriptor.type_name()
        ),
    }
}

fn pattern_text(pattern: &NamePattern) -> String {
    match pattern {
        NamePattern::Qualified { local, namespace } if namespace.is_empty() => local.clone(),
        NamePattern::Qualified { local, namespace } => format!("{{{}}}{}", namespace, local),
        NamePattern::Keyed { local, key } => format!("{{key:{}}}{}", key, local),
        NamePattern::AnyNamespace { local } => format!("{{*}}{}", local),
    }
}
