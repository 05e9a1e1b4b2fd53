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

//! End-to-end tests for the `dombind` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

const SCHEMA: &str = r#"
<schema targetNamespace="urn:build">
  <root name="project" type="Project"/>
  <type name="Project">
    <element name="item" type="Item" maxOccurs="2"/>
    <element name="dep" type="Dep" maxOccurs="unbounded"/>
  </type>
</schema>"#;

const DOCUMENT: &str = r#"<project xmlns="urn:build"><item/><item/><dep/></project>"#;

const DOCUMENT_WITH_STRAY: &str =
    r#"<project xmlns="urn:build"><item/><stray/></project>"#;

fn write_files(schema: &str, doc: &str) -> (tempfile::TempDir, PathBuf, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let schema_path = dir.path().join("schema.xml");
    let doc_path = dir.path().join("doc.xml");
    std::fs::write(&schema_path, schema).unwrap();
    std::fs::write(&doc_path, doc).unwrap();
    (dir, schema_path, doc_path)
}

#[test]
fn test_bind_prints_bindings() {
    let (_dir, schema, doc) = write_files(SCHEMA, DOCUMENT);
    Command::cargo_bin("dombind")
        .unwrap()
        .arg("bind")
        .arg(&schema)
        .arg(&doc)
        .assert()
        .success()
        .stdout(predicate::str::contains("fixed #0"))
        .stdout(predicate::str::contains("fixed #1"))
        .stdout(predicate::str::contains("collection"));
}

#[test]
fn test_bind_json_output() {
    let (_dir, schema, doc) = write_files(SCHEMA, DOCUMENT);
    Command::cargo_bin("dombind")
        .unwrap()
        .arg("bind")
        .arg(&schema)
        .arg(&doc)
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"type_name\""));
}

#[test]
fn test_check_success() {
    let (_dir, schema, doc) = write_files(SCHEMA, DOCUMENT);
    Command::cargo_bin("dombind")
        .unwrap()
        .arg("check")
        .arg(&schema)
        .arg(&doc)
        .assert()
        .success()
        .stdout(predicate::str::contains("Unbound: 0"));
}

#[test]
fn test_check_strict_fails_on_stray_node() {
    let (_dir, schema, doc) = write_files(SCHEMA, DOCUMENT_WITH_STRAY);
    Command::cargo_bin("dombind")
        .unwrap()
        .arg("check")
        .arg(&schema)
        .arg(&doc)
        .arg("--strict")
        .assert()
        .failure()
        .stdout(predicate::str::contains("stray"));
}

#[test]
fn test_check_non_strict_tolerates_stray_node() {
    let (_dir, schema, doc) = write_files(SCHEMA, DOCUMENT_WITH_STRAY);
    Command::cargo_bin("dombind")
        .unwrap()
        .arg("check")
        .arg(&schema)
        .arg(&doc)
        .assert()
        .success()
        .stdout(predicate::str::contains("Unbound: 1"));
}

#[test]
fn test_inspect_dumps_descriptors() {
    let (_dir, schema, doc) = write_files(SCHEMA, DOCUMENT);
    drop(doc);
    Command::cargo_bin("dombind")
        .unwrap()
        .arg("inspect")
        .arg(&schema)
        .assert()
        .success()
        .stdout(predicate::str::contains("root:"))
        .stdout(predicate::str::contains("maxOccurs 2"))
        .stdout(predicate::str::contains("collection"));
}

#[test]
fn test_missing_schema_is_an_error() {
    let (_dir, _, doc) = write_files(SCHEMA, DOCUMENT);
    Command::cargo_bin("dombind")
        .unwrap()
        .arg("check")
        .arg("/nonexistent/schema.xml")
        .arg(&doc)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load schema"));
}

#[test]
fn test_malformed_document_is_an_error() {
    let (_dir, schema, doc) = write_files(SCHEMA, "<project><unclosed></project>");
    Command::cargo_bin("dombind")
        .unwrap()
        .arg("check")
        .arg(&schema)
        .arg(&doc)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse"));
}
