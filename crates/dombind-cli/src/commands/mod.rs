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

//! CLI command implementations

mod bind;
mod check;
mod inspect;

pub use bind::bind;
pub use check::check;
pub use inspect::inspect;

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use dombind_core::Schema;
use dombind_xml::{from_schema_file, from_xml, FromXmlConfig};

/// Default maximum file size to prevent OOM attacks (64 MB).
/// Can be overridden via the DOMBIND_MAX_FILE_SIZE environment variable.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 64 * 1024 * 1024;

fn get_max_file_size() -> u64 {
    std::env::var("DOMBIND_MAX_FILE_SIZE")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_FILE_SIZE)
}

/// Read a file from disk with size validation.
///
/// Files larger than the configured maximum are rejected before reading
/// so an oversized input cannot exhaust memory.
pub fn read_file(path: &str) -> Result<String, String> {
    let metadata = fs::metadata(path)
        .map_err(|e| format!("Failed to get metadata for '{}': {}", path, e))?;

    let max_file_size = get_max_file_size();
    if metadata.len() > max_file_size {
        return Err(format!(
            "File '{}' is too large ({} bytes). Maximum allowed size is {} bytes.\n\
             To process larger files, set DOMBIND_MAX_FILE_SIZE (in bytes).",
            path,
            metadata.len(),
            max_file_size
        ));
    }

    fs::read_to_string(path).map_err(|e| format!("Failed to read '{}': {}", path, e))
}

/// Write content to a file or stdout.
pub fn write_output(content: &str, path: Option<&str>) -> Result<(), String> {
    match path {
        Some(p) => fs::write(p, content).map_err(|e| format!("Failed to write '{}': {}", p, e)),
        None => io::stdout()
            .write_all(content.as_bytes())
            .map_err(|e| format!("Failed to write to stdout: {}", e)),
    }
}

/// Load a schema declaration file.
pub(crate) fn load_schema(path: &str) -> Result<Schema, String> {
    from_schema_file(Path::new(path)).map_err(|e| format!("Failed to load schema '{}': {}", path, e))
}

/// Load an XML document into an arena tree.
pub(crate) fn load_document(path: &str) -> Result<dombind_core::Document, String> {
    let text = read_file(path)?;
    from_xml(&text, &FromXmlConfig::default())
        .map_err(|e| format!("Failed to parse '{}': {}", path, e))
}
