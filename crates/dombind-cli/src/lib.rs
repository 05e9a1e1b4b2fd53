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

//! Dombind CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! - **bind**: resolve every node of a document against a schema and
//!   print the resulting bindings (text or JSON)
//! - **check**: summary verdict; `--strict` fails when any node falls
//!   outside the schema
//! - **inspect**: dump a schema's descriptor sets
//!
//! All commands return `Result<(), String>` for consistent error
//! handling; errors include file paths and loader diagnostics.

pub mod cli;
pub mod commands;
