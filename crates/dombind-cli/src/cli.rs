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

//! CLI command definitions and argument parsing.

use crate::commands;
use clap::Subcommand;

/// Top-level CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Resolve every node of a document against a schema
    ///
    /// Prints one line per element/attribute with its binding (model
    /// type, category, occurrence index) or `-` for nodes outside the
    /// schema.
    Bind {
        /// Schema declaration file
        #[arg(value_name = "SCHEMA")]
        schema: String,

        /// XML document to bind
        #[arg(value_name = "FILE")]
        file: String,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Check a document against a schema
    ///
    /// Prints a ✓/✗ summary with bound/unbound counts. In strict mode,
    /// any node outside the schema fails the command.
    Check {
        /// Schema declaration file
        #[arg(value_name = "SCHEMA")]
        schema: String,

        /// XML document to check
        #[arg(value_name = "FILE")]
        file: String,

        /// Strict mode (fail when any node is unbound)
        #[arg(short, long)]
        strict: bool,
    },

    /// Show a schema's descriptor sets
    ///
    /// Dumps the root declaration and, per model type, every descriptor
    /// with its category, name pattern, and occurrence bound.
    Inspect {
        /// Schema declaration file
        #[arg(value_name = "SCHEMA")]
        schema: String,
    },
}

impl Commands {
    /// Execute the command with the provided arguments.
    pub fn execute(self) -> Result<(), String> {
        match self {
            Commands::Bind {
                schema,
                file,
                json,
                output,
            } => commands::bind(&schema, &file, json, output.as_deref()),
            Commands::Check {
                schema,
                file,
                strict,
            } => commands::check(&schema, &file, strict),
            Commands::Inspect { schema } => commands::inspect(&schema),
        }
    }
}
