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

//! Check command - document-against-schema verdict.

use super::{load_document, load_schema};
use colored::Colorize;
use dombind_core::{validate, ContextEvaluator, Resolver};

/// Check `file` against `schema` and print a summary.
///
/// Prints bound/unbound counts and lists unbound node paths. In strict
/// mode the command fails when any node is outside the schema.
pub fn check(schema: &str, file: &str, strict: bool) -> Result<(), String> {
    let schema = load_schema(schema)?;
    let doc = load_document(file)?;

    let mut resolver = Resolver::new(&schema, &ContextEvaluator);
    let report = validate(&mut resolver, &doc).map_err(|e| e.to_string())?;

    if report.is_fully_bound() {
        println!("{} {}", "✓".green().bold(), file);
    } else {
        println!("{} {}", "✗".red().bold(), file);
    }
    println!("  Bound:   {}", report.matched_count());
    println!("  Unbound: {}", report.unmatched_count());
    for outcome in report.unmatched() {
        println!("    {}", outcome.path);
    }
    if strict {
        println!("  Mode: strict (all nodes must bind)");
        if !report.is_fully_bound() {
            return Err(format!(
                "{} node(s) outside the schema",
                report.unmatched_count()
            ));
        }
    }
    Ok(())
}
