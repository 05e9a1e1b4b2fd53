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

//! Dombind XML front-end.
//!
//! Turns XML text into the core engine's arena documents and loads
//! binding schemas from a compact declarative dialect.
//!
//! # Features
//!
//! - Namespace-aware ingestion: prefix declarations are tracked per
//!   scope and every node carries its resolved namespace URI
//! - Security limits on nesting depth and element fan-out
//! - Declarative schema loading through the core builders, so schema
//!   errors surface at load time
//! - Thread-safe schema caching for repeated loads
//!
//! # Examples
//!
//! ```rust
//! use dombind_core::{ContextEvaluator, Resolver};
//! use dombind_xml::{from_schema_xml, from_xml, FromXmlConfig};
//!
//! let schema = from_schema_xml(r#"
//! <schema targetNamespace="urn:demo">
//!   <root name="project" type="Project"/>
//!   <type name="Project">
//!     <element name="item" type="Item" maxOccurs="unbounded"/>
//!   </type>
//! </schema>"#)?;
//!
//! let doc = from_xml(
//!     r#"<project xmlns="urn:demo"><item/><item/></project>"#,
//!     &FromXmlConfig::default(),
//! )?;
//!
//! let mut resolver = Resolver::new(&schema, &ContextEvaluator);
//! for &item in doc.get(doc.root().unwrap()).unwrap().children() {
//!     assert!(resolver.resolve(&doc, item).unwrap().is_some());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod from_xml;
mod schema_xml;

pub use error::XmlError;
pub use from_xml::{from_xml, FromXmlConfig};
pub use schema_xml::{from_schema_file, from_schema_xml, SchemaCache, SchemaLoadError};
