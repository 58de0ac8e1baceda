use apollo_compiler::ast;
use apollo_extender::extend;
use pretty_assertions::assert_eq;

fn parse(input: &str) -> ast::Document {
    ast::Document::parse(input, "doc.graphql").unwrap()
}

/// Serializes both documents and compares the results, so tests don't
/// depend on whitespace in their inputs.
#[track_caller]
fn assert_same_document(merged: &ast::Document, expected: &str) {
    assert_eq!(merged.to_string(), parse(expected).to_string());
}

#[test]
fn empty_extension_returns_base_by_identity() {
    let base = parse("type Query { foo: String }");
    let merged = extend(&base, &ast::Document::new()).unwrap();

    assert_eq!(base.definitions.len(), merged.definitions.len());
    for (before, after) in base.definitions.iter().zip(&merged.definitions) {
        let (ast::Definition::ObjectTypeDefinition(before), ast::Definition::ObjectTypeDefinition(after)) =
            (before, after)
        else {
            panic!("expected object type definitions");
        };
        assert!(before.ptr_eq(after));
    }
}

#[test]
fn empty_documents_merge_to_an_empty_document() {
    let merged = extend(&ast::Document::new(), &ast::Document::new()).unwrap();
    assert!(merged.definitions.is_empty());
}

#[test]
fn empty_base_passes_the_extension_document_through() {
    let base = ast::Document::new();
    let extension = parse("type Query { foo: String } scalar Date");
    let merged = extend(&base, &extension).unwrap();

    assert_same_document(&merged, "type Query { foo: String } scalar Date");
}

#[test]
fn object_fields_are_appended_after_base_fields() {
    let base = parse("type Query { foo: String }");
    let extension = parse("extend type Query { bar: Int baz: Boolean }");
    let merged = extend(&base, &extension).unwrap();

    assert_same_document(&merged, "type Query { foo: String bar: Int baz: Boolean }");
}

#[test]
fn object_extension_carries_interfaces_and_directives() {
    let base = parse(
        r#"
        directive @tag(name: String!) repeatable on OBJECT
        interface Named { name: String }
        type Query { foo: String }
        "#,
    );
    let extension = parse(r#"extend type Query implements Named @tag(name: "a") { name: String }"#);
    let merged = extend(&base, &extension).unwrap();

    assert_same_document(
        &merged,
        r#"
        directive @tag(name: String!) repeatable on OBJECT
        interface Named { name: String }
        type Query implements Named @tag(name: "a") { foo: String name: String }
        "#,
    );
}

#[test]
fn interface_fields_are_appended() {
    let base = parse("interface Node { id: ID! }");
    let extension = parse("extend interface Node { createdAt: String }");
    let merged = extend(&base, &extension).unwrap();

    assert_same_document(&merged, "interface Node { id: ID! createdAt: String }");
}

#[test]
fn union_members_are_appended() {
    let base = parse("union A = B type B { x: Int }");
    let extension = parse("extend union A = C type C { y: Int }");
    let merged = extend(&base, &extension).unwrap();

    assert_same_document(&merged, "union A = B | C type B { x: Int } type C { y: Int }");
}

#[test]
fn enum_values_are_appended() {
    let base = parse("enum Color { RED }");
    let extension = parse("extend enum Color { GREEN BLUE }");
    let merged = extend(&base, &extension).unwrap();

    assert_same_document(&merged, "enum Color { RED GREEN BLUE }");
}

#[test]
fn input_object_fields_are_appended() {
    let base = parse("input Filter { name: String }");
    let extension = parse("extend input Filter { limit: Int }");
    let merged = extend(&base, &extension).unwrap();

    assert_same_document(&merged, "input Filter { name: String limit: Int }");
}

#[test]
fn scalar_extension_appends_directives() {
    let base = parse(
        r#"
        directive @specifiedBy2(url: String!) on SCALAR
        scalar Date
        "#,
    );
    let extension = parse(r#"extend scalar Date @specifiedBy2(url: "https://example.com")"#);
    let merged = extend(&base, &extension).unwrap();

    assert_same_document(
        &merged,
        r#"
        directive @specifiedBy2(url: String!) on SCALAR
        scalar Date @specifiedBy2(url: "https://example.com")
        "#,
    );
}

#[test]
fn schema_extension_adds_root_operations() {
    let base = parse("schema { query: Query } type Query { foo: Int }");
    let extension = parse("extend schema { mutation: Mutation } type Mutation { bar: Int }");
    let merged = extend(&base, &extension).unwrap();

    assert_same_document(
        &merged,
        r#"
        schema { query: Query mutation: Mutation }
        type Query { foo: Int }
        type Mutation { bar: Int }
        "#,
    );
}

#[test]
fn several_extensions_for_one_type_all_apply_in_document_order() {
    let base = parse("type Query { a: Int }");
    let extension = parse("extend type Query { b: Int } extend type Query { c: Int }");
    let merged = extend(&base, &extension).unwrap();

    assert_same_document(&merged, "type Query { a: Int b: Int c: Int }");
}

#[test]
fn untouched_definitions_keep_pointer_identity() {
    let base = parse("type Query { foo: String } type Other { x: Int }");
    let extension = parse("extend type Query { bar: Int }");
    let merged = extend(&base, &extension).unwrap();

    let ast::Definition::ObjectTypeDefinition(other_before) = &base.definitions[1] else {
        panic!("expected an object type definition");
    };
    let ast::Definition::ObjectTypeDefinition(other_after) = &merged.definitions[1] else {
        panic!("expected an object type definition");
    };
    assert!(other_before.ptr_eq(other_after));

    let ast::Definition::ObjectTypeDefinition(query_before) = &base.definitions[0] else {
        panic!("expected an object type definition");
    };
    let ast::Definition::ObjectTypeDefinition(query_after) = &merged.definitions[0] else {
        panic!("expected an object type definition");
    };
    assert!(!query_before.ptr_eq(query_after));
}

#[test]
fn inputs_are_not_mutated() {
    let base = parse("type Query { foo: String }");
    let extension = parse("extend type Query { bar: Int } scalar Date");
    let base_before = base.to_string();
    let extension_before = extension.to_string();

    extend(&base, &extension).unwrap();

    assert_eq!(base.to_string(), base_before);
    assert_eq!(extension.to_string(), extension_before);
}

#[test]
fn passthrough_definitions_keep_document_order() {
    let base = parse("type Query { foo: String }");
    let extension = parse(
        r#"
        scalar Date
        extend type Query { when: Date }
        directive @tag on OBJECT
        input Filter { q: String }
        "#,
    );
    let merged = extend(&base, &extension).unwrap();

    assert_same_document(
        &merged,
        r#"
        type Query { foo: String when: Date }
        scalar Date
        directive @tag on OBJECT
        input Filter { q: String }
        "#,
    );
}

#[test]
fn directive_applications_accumulate_without_deduplication() {
    // A repeated directive is not this crate's concern: structural rules
    // only cover fields, interfaces, members, values and root operations.
    // Semantic validation of directive usage stays with apollo-compiler.
    let base = parse(
        r#"
        directive @tag repeatable on OBJECT
        type Query @tag { foo: Int }
        "#,
    );
    let extension = parse("extend type Query @tag");
    let merged = extend(&base, &extension).unwrap();

    assert_same_document(
        &merged,
        r#"
        directive @tag repeatable on OBJECT
        type Query @tag @tag { foo: Int }
        "#,
    );
}
