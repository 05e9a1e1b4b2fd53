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

//! Bind command - resolve every node and print the bindings.

use super::{load_document, load_schema, write_output};
use dombind_core::{validate, BindingKind, ContextEvaluator, Resolver};

/// Resolve every node of `file` against `schema` and print the report.
///
/// One line per node: its path, then the binding's model type and
/// category (with the occurrence index for fixed children), or `-` for a
/// node outside the schema. With `json`, the report serializes as JSON.
pub fn bind(schema: &str, file: &str, json: bool, output: Option<&str>) -> Result<(), String> {
    let schema = load_schema(schema)?;
    let doc = load_document(file)?;

    let mut resolver = Resolver::new(&schema, &ContextEvaluator);
    let report = validate(&mut resolver, &doc).map_err(|e| e.to_string())?;

    let rendered = if json {
        serde_json::to_string_pretty(report.outcomes())
            .map_err(|e| format!("Failed to serialize report: {}", e))?
    } else {
        let mut lines = String::new();
        for outcome in report.outcomes() {
            let verdict = match &outcome.binding {
                Some(binding) => format!("{} ({})", binding.type_name, kind_label(&binding.kind)),
                None => "-".to_string(),
            };
            lines.push_str(&format!("{:<40} {}\n", outcome.path, verdict));
        }
        lines
    };

    write_output(&rendered, output)
}

fn kind_label(kind: &BindingKind) -> String {
    match kind {
        BindingKind::Root => "root".to_string(),
        BindingKind::Fixed { index } => format!("fixed #{}", index),
        BindingKind::Collection => "collection".to_string(),
        BindingKind::Custom => "custom".to_string(),
        BindingKind::Attribute => "attribute".to_string(),
    }
}
