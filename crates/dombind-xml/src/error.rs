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

//! Error types for XML ingestion.

use std::fmt;

/// Errors that can occur while building a document from XML.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlError {
    /// XML parsing failed due to malformed syntax.
    ParseError {
        /// Byte offset in the XML input where the error occurred.
        pos: usize,
        /// Description of the parsing error.
        message: String,
    },

    /// Element nesting exceeded the configured depth limit.
    ///
    /// Prevents stack and memory exhaustion from pathologically nested
    /// input like `<a><a><a>…`.
    RecursionLimitExceeded {
        /// Maximum allowed nesting depth.
        max: usize,
        /// Depth at which the limit was hit.
        current: usize,
    },

    /// An element declared more children than the configured limit.
    ChildLimitExceeded {
        /// Maximum allowed children per element.
        max: usize,
        /// Count at which the limit was hit.
        current: usize,
    },

    /// An element declared more attributes than the configured limit.
    AttributeLimitExceeded {
        /// Maximum allowed attributes per element.
        max: usize,
        /// Count at which the limit was hit.
        current: usize,
    },

    /// A name used a namespace prefix with no in-scope declaration.
    UndeclaredPrefix {
        /// The offending prefix.
        prefix: String,
    },

    /// UTF-8 encoding error in XML content.
    Utf8Error {
        /// Description of the encoding error.
        message: String,
    },

    /// Invalid document structure (no root element, content after the
    /// root, and similar).
    StructureError {
        /// Description of the structural issue.
        message: String,
    },
}

impl fmt::Display for XmlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XmlError::ParseError { pos, message } => {
                write!(f, "XML parse error at position {}: {}", pos, message)
            }
            XmlError::RecursionLimitExceeded { max, current } => {
                write!(
                    f,
                    "XML nesting depth exceeded (max: {}, found: {})",
                    max, current
                )
            }
            XmlError::ChildLimitExceeded { max, current } => {
                write!(
                    f,
                    "Element child count exceeded maximum (max: {}, found: {})",
                    max, current
                )
            }
            XmlError::AttributeLimitExceeded { max, current } => {
                write!(
                    f,
                    "Element attribute count exceeded maximum (max: {}, found: {})",
                    max, current
                )
            }
            XmlError::UndeclaredPrefix { prefix } => {
                write!(f, "Undeclared namespace prefix '{}'", prefix)
            }
            XmlError::Utf8Error { message } => {
                write!(f, "UTF-8 encoding error: {}", message)
            }
            XmlError::StructureError { message } => {
                write!(f, "Invalid XML structure: {}", message)
            }
        }
    }
}

impl std::error::Error for XmlError {}

// Conversion from quick_xml errors
impl From<quick_xml::Error> for XmlError {
    fn from(err: quick_xml::Error) -> Self {
        XmlError::ParseError {
            pos: 0, // quick-xml doesn't always provide position
            message: err.to_string(),
        }
    }
}

impl From<std::str::Utf8Error> for XmlError {
    fn from(err: std::str::Utf8Error) -> Self {
        XmlError::Utf8Error {
            message: err.to_string(),
        }
    }
}
