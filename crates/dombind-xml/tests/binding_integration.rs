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

//! End-to-end binding through the XML front-end: schema text + document
//! text, resolved by the core engine.

use dombind_core::{validate, BindingKind, ContextEvaluator, Resolver};
use dombind_xml::{from_schema_xml, from_xml, FromXmlConfig};

const SCHEMA: &str = r#"
<schema targetNamespace="urn:build">
  <root name="project" type="Project"/>
  <type name="Project">
    <element name="name" type="ProjectName"/>
    <element name="item" type="Item" maxOccurs="2"/>
    <element name="dep" type="Dep" maxOccurs="unbounded"/>
    <attribute name="lang" type="Lang"/>
  </type>
  <type name="Dep">
    <element name="version" type="Version"/>
  </type>
</schema>"#;

#[test]
fn test_end_to_end_binding() {
    let schema = from_schema_xml(SCHEMA).unwrap();
    let doc = from_xml(
        r#"<project xmlns="urn:build" lang="en">
             <name/>
             <item/><item/><item/>
             <dep><version/></dep>
           </project>"#,
        &FromXmlConfig::default(),
    )
    .unwrap();

    let mut resolver = Resolver::new(&schema, &ContextEvaluator);
    let root = doc.root().unwrap();
    let root_data = doc.get(root).unwrap();

    let kinds: Vec<Option<BindingKind>> = root_data
        .children()
        .iter()
        .map(|&c| resolver.resolve(&doc, c).unwrap().map(|b| b.kind))
        .collect();
    assert_eq!(
        kinds,
        vec![
            Some(BindingKind::Fixed { index: 0 }), // name
            Some(BindingKind::Fixed { index: 0 }), // item #1
            Some(BindingKind::Fixed { index: 1 }), // item #2
            None,                                  // item #3: overflow, no collection
            Some(BindingKind::Collection),         // dep
        ]
    );

    // Nested fixed child binds through its collection parent.
    let dep = root_data.children()[4];
    let version = doc.get(dep).unwrap().children()[0];
    let binding = resolver.resolve(&doc, version).unwrap().unwrap();
    assert_eq!(binding.kind, BindingKind::Fixed { index: 0 });
    assert_eq!(binding.type_name, "Version");

    // The unprefixed attribute binds via the owner-namespace branch.
    let lang = root_data.attributes()[0];
    let binding = resolver.resolve(&doc, lang).unwrap().unwrap();
    assert_eq!(binding.kind, BindingKind::Attribute);
}

#[test]
fn test_validation_report_over_parsed_document() {
    let schema = from_schema_xml(SCHEMA).unwrap();
    let doc = from_xml(
        r#"<project xmlns="urn:build"><name/><unknown/></project>"#,
        &FromXmlConfig::default(),
    )
    .unwrap();

    let mut resolver = Resolver::new(&schema, &ContextEvaluator);
    let report = validate(&mut resolver, &doc).unwrap();

    assert_eq!(report.unmatched_count(), 1);
    let unmatched: Vec<&str> = report.unmatched().map(|o| o.name.as_str()).collect();
    assert_eq!(unmatched, vec!["unknown"]);
}

#[test]
fn test_foreign_namespace_attribute_binding() {
    let schema = from_schema_xml(
        r#"
<schema targetNamespace="urn:build">
  <root name="tag" type="Tag"/>
  <type name="Tag">
    <attribute name="lang" type="Lang" namespace="urn:other"/>
  </type>
</schema>"#,
    )
    .unwrap();

    // The attribute is explicitly in the descriptor's foreign namespace.
    let doc = from_xml(
        r#"<tag xmlns="urn:build" xmlns:o="urn:other" o:lang="en"/>"#,
        &FromXmlConfig::default(),
    )
    .unwrap();
    let mut resolver = Resolver::new(&schema, &ContextEvaluator);
    let attr = doc.get(doc.root().unwrap()).unwrap().attributes()[0];
    assert!(resolver.resolve(&doc, attr).unwrap().is_some());

    // An unprefixed attribute of the same local name does not match the
    // foreign-namespace descriptor.
    let doc = from_xml(
        r#"<tag xmlns="urn:build" lang="en"/>"#,
        &FromXmlConfig::default(),
    )
    .unwrap();
    let mut resolver = Resolver::new(&schema, &ContextEvaluator);
    let attr = doc.get(doc.root().unwrap()).unwrap().attributes()[0];
    assert!(resolver.resolve(&doc, attr).unwrap().is_none());
}

#[test]
fn test_keyed_pattern_resolves_through_document_context() {
    let schema = from_schema_xml(
        r#"
<schema targetNamespace="urn:build">
  <root name="project" type="Project"/>
  <type name="Project">
    <element name="plugin" type="Plugin" key="ext" maxOccurs="unbounded"/>
  </type>
</schema>"#,
    )
    .unwrap();

    // The document declares the "ext" prefix; the keyed pattern resolves
    // to that URI through the document's namespace context.
    let doc = from_xml(
        r#"<project xmlns="urn:build" xmlns:ext="urn:plugins"><ext:plugin/></project>"#,
        &FromXmlConfig::default(),
    )
    .unwrap();

    let mut resolver = Resolver::new(&schema, &ContextEvaluator);
    let plugin = doc.get(doc.root().unwrap()).unwrap().children()[0];
    let binding = resolver.resolve(&doc, plugin).unwrap().unwrap();
    assert_eq!(binding.kind, BindingKind::Collection);
    assert_eq!(binding.type_name, "Plugin");
}
