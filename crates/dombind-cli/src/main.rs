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

//! Dombind Command Line Interface

use clap::Parser;
use dombind_cli::cli::Commands;
use std::process::ExitCode;

/// Dombind - schema-driven markup binding toolkit
///
/// Resolves the elements and attributes of an XML document against a
/// declarative binding schema, reporting which model type (and occurrence
/// index, for bounded children) each node binds to.
///
/// # Examples
///
/// ```bash
/// # Print the binding of every node
/// dombind bind project.schema.xml project.xml
///
/// # Machine-readable output
/// dombind bind project.schema.xml project.xml --json
///
/// # Fail if any node falls outside the schema
/// dombind check project.schema.xml project.xml --strict
///
/// # Show the schema's descriptor sets
/// dombind inspect project.schema.xml
/// ```
#[derive(Parser)]
#[command(name = "dombind")]
#[command(author, version, about = "Dombind - schema-driven markup binding toolkit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
