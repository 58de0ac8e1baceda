//! Structural validation of a merged document.
//!
//! These rules check the uniqueness properties that only become violable
//! once two previously valid documents have been merged: the merge appends
//! extension lists without deduplicating, so a field, interface, union
//! member, enum value or root operation type contributed by an extension
//! may repeat one already present in the base definition.
//!
//! Anything beyond these checks (type references, argument types,
//! directive locations and the rest of GraphQL validation) is out of
//! scope here and left to apollo-compiler's own validation.

use apollo_compiler::ast;
use apollo_compiler::Name;
use std::collections::HashSet;

/// A single structural rule.
///
/// Rules are independent, stateless scans over the merged document; each
/// reports every violation it finds rather than stopping at the first.
pub type Rule = fn(&ast::Document, &mut Vec<Violation>);

/// The rules run after every merge that changed the base document,
/// unless [`assume_valid`][crate::ExtendOptions::assume_valid] is set.
pub const STRUCTURAL_RULES: &[Rule] = &[
    unique_field_names,
    unique_implements_interfaces,
    unique_union_members,
    unique_enum_values,
    unique_root_operations,
];

/// A structural uniqueness violation found in a merged document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    #[error("field `{type_name}.{field}` can only be defined once")]
    DuplicateFieldName { type_name: Name, field: Name },

    #[error("type `{type_name}` can only implement the interface `{interface}` once")]
    DuplicateImplementsInterface { type_name: Name, interface: Name },

    #[error("union `{union_name}` can only contain the member type `{member}` once")]
    DuplicateUnionMember { union_name: Name, member: Name },

    #[error("enum `{enum_name}` can only contain the value `{value}` once")]
    DuplicateEnumValue { enum_name: Name, value: Name },

    #[error("duplicate definitions for the `{operation}` root operation type")]
    DuplicateRootOperation { operation: &'static str },

    /// Reserved for externally supplied rules.
    #[error("{0}")]
    Other(String),
}

/// Runs the built-in structural rules, then `extra_rules`, over `document`.
pub fn validate(document: &ast::Document, extra_rules: &[Rule]) -> Vec<Violation> {
    let mut violations = Vec::new();
    for rule in STRUCTURAL_RULES.iter().chain(extra_rules) {
        rule(document, &mut violations);
    }
    violations
}

/// No two fields of an object, interface or input object may share a name.
fn unique_field_names(document: &ast::Document, violations: &mut Vec<Violation>) {
    for definition in &document.definitions {
        match definition {
            ast::Definition::ObjectTypeDefinition(def) => {
                check_unique_fields(&def.name, def.fields.iter().map(|f| &f.name), violations)
            }
            ast::Definition::InterfaceTypeDefinition(def) => {
                check_unique_fields(&def.name, def.fields.iter().map(|f| &f.name), violations)
            }
            ast::Definition::InputObjectTypeDefinition(def) => {
                check_unique_fields(&def.name, def.fields.iter().map(|f| &f.name), violations)
            }
            _ => {}
        }
    }
}

fn check_unique_fields<'a>(
    type_name: &Name,
    field_names: impl Iterator<Item = &'a Name>,
    violations: &mut Vec<Violation>,
) {
    let mut known = HashSet::new();
    for field in field_names {
        if !known.insert(field.as_str()) {
            violations.push(Violation::DuplicateFieldName {
                type_name: type_name.clone(),
                field: field.clone(),
            });
        }
    }
}

/// No object or interface may list the same implemented interface twice.
fn unique_implements_interfaces(document: &ast::Document, violations: &mut Vec<Violation>) {
    for definition in &document.definitions {
        let (type_name, interfaces) = match definition {
            ast::Definition::ObjectTypeDefinition(def) => {
                (&def.name, &def.implements_interfaces)
            }
            ast::Definition::InterfaceTypeDefinition(def) => {
                (&def.name, &def.implements_interfaces)
            }
            _ => continue,
        };
        let mut known = HashSet::new();
        for interface in interfaces {
            if !known.insert(interface.as_str()) {
                violations.push(Violation::DuplicateImplementsInterface {
                    type_name: type_name.clone(),
                    interface: interface.clone(),
                });
            }
        }
    }
}

/// No union may list the same member type twice.
fn unique_union_members(document: &ast::Document, violations: &mut Vec<Violation>) {
    for definition in &document.definitions {
        if let ast::Definition::UnionTypeDefinition(def) = definition {
            let mut known = HashSet::new();
            for member in &def.members {
                if !known.insert(member.as_str()) {
                    violations.push(Violation::DuplicateUnionMember {
                        union_name: def.name.clone(),
                        member: member.clone(),
                    });
                }
            }
        }
    }
}

/// No enum may define the same value twice.
fn unique_enum_values(document: &ast::Document, violations: &mut Vec<Violation>) {
    for definition in &document.definitions {
        if let ast::Definition::EnumTypeDefinition(def) = definition {
            let mut known = HashSet::new();
            for value in &def.values {
                if !known.insert(value.value.as_str()) {
                    violations.push(Violation::DuplicateEnumValue {
                        enum_name: def.name.clone(),
                        value: value.value.clone(),
                    });
                }
            }
        }
    }
}

/// No schema definition may map the same operation type twice.
fn unique_root_operations(document: &ast::Document, violations: &mut Vec<Violation>) {
    for definition in &document.definitions {
        if let ast::Definition::SchemaDefinition(def) = definition {
            let mut known = HashSet::new();
            for root in &def.root_operations {
                let operation_type = root.0;
                if !known.insert(operation_type) {
                    violations.push(Violation::DuplicateRootOperation {
                        operation: operation_name(operation_type),
                    });
                }
            }
        }
    }
}

fn operation_name(operation_type: ast::OperationType) -> &'static str {
    match operation_type {
        ast::OperationType::Query => "query",
        ast::OperationType::Mutation => "mutation",
        ast::OperationType::Subscription => "subscription",
    }
}
