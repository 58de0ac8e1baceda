use crate::index::ExtensionIndex;
use crate::validation;
use crate::validation::Rule;
use crate::ExtendError;
use apollo_compiler::ast;
use apollo_compiler::Name;
use apollo_compiler::Node;
use std::collections::HashSet;

/// Options for [`extend_with`].
#[derive(Debug, Clone, Default)]
pub struct ExtendOptions {
    assume_valid: bool,
    extra_rules: Vec<Rule>,
}

impl ExtendOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip the post-merge structural validation pass.
    ///
    /// For call sites that validate the merged document independently,
    /// for example with apollo-compiler's full schema validation, or that
    /// defer validation to a later stage.
    pub fn assume_valid(mut self, assume_valid: bool) -> Self {
        self.assume_valid = assume_valid;
        self
    }

    /// Add a structural rule to run after the
    /// [built-in ones][validation::STRUCTURAL_RULES].
    pub fn extra_rule(mut self, rule: Rule) -> Self {
        self.extra_rules.push(rule);
        self
    }
}

/// Folds `extension` into `base` with default options and returns the
/// merged document.
///
/// Each `extend` declaration in `extension` targets the base definition
/// with the same name and kind; its contributions are appended after the
/// base definition's own. Definitions that only exist in `extension` are
/// appended to the merged document unchanged.
///
/// Neither input is mutated. Definitions the extension document does not
/// touch keep pointer identity with `base` (see [`Node::ptr_eq`]); when
/// nothing matched and nothing was appended, the returned document is the
/// base document, definition for definition.
pub fn extend(
    base: &ast::Document,
    extension: &ast::Document,
) -> Result<ast::Document, ExtendError> {
    extend_with(base, extension, &ExtendOptions::default())
}

/// Same as [`extend`], with explicit [`ExtendOptions`].
pub fn extend_with(
    base: &ast::Document,
    extension: &ast::Document,
    options: &ExtendOptions,
) -> Result<ast::Document, ExtendError> {
    let mut index = ExtensionIndex::new(extension)?;
    let mut changed = false;
    let mut seen_schema = false;
    let mut seen_types: HashSet<&Name> = HashSet::new();
    let mut definitions = Vec::with_capacity(base.definitions.len());

    for definition in &base.definitions {
        let merged = if let Some(name) = type_definition_name(definition) {
            if !seen_types.insert(name) || index.has_type(name) {
                return Err(ExtendError::DuplicateType(name.clone()));
            }
            let extensions = index.type_extensions(name).to_vec();
            if extensions.is_empty() {
                definition.clone()
            } else {
                index.mark_used(name);
                let mut merged = definition.clone();
                for ext in &extensions {
                    if let Some(extended) = apply_type_extension(name, &merged, ext)? {
                        merged = extended;
                        changed = true;
                    }
                }
                merged
            }
        } else if let ast::Definition::SchemaDefinition(def) = definition {
            if seen_schema || index.has_schema_definition() {
                return Err(ExtendError::DuplicateSchema);
            }
            seen_schema = true;
            if let Some(ext) = index.schema_extension().cloned() {
                index.mark_schema_extension_used();
                match extend_schema(def, &ext) {
                    Some(extended) => {
                        changed = true;
                        ast::Definition::SchemaDefinition(extended)
                    }
                    None => definition.clone(),
                }
            } else {
                definition.clone()
            }
        } else {
            // Directive definitions, and anything else the base document
            // carries, pass through unchanged.
            definition.clone()
        };
        definitions.push(merged);
    }

    for definition in index.passthrough_definitions() {
        definitions.push(definition.clone());
        changed = true;
    }

    let unused = index.unused_extension_names();
    if !unused.is_empty() {
        return Err(ExtendError::MissingBaseTypes(unused));
    }
    if index.has_unused_schema_extension() {
        return Err(ExtendError::MissingBaseSchema);
    }

    let mut merged = base.clone();
    merged.definitions = definitions;

    // If nothing changed there is nothing to validate.
    if changed && !options.assume_valid {
        let violations = validation::validate(&merged, &options.extra_rules);
        if !violations.is_empty() {
            return Err(ExtendError::Validation { violations });
        }
    }

    Ok(merged)
}

/// The merge key of a type definition; `None` for any other kind.
fn type_definition_name(definition: &ast::Definition) -> Option<&Name> {
    match definition {
        ast::Definition::ScalarTypeDefinition(def) => Some(&def.name),
        ast::Definition::ObjectTypeDefinition(def) => Some(&def.name),
        ast::Definition::InterfaceTypeDefinition(def) => Some(&def.name),
        ast::Definition::UnionTypeDefinition(def) => Some(&def.name),
        ast::Definition::EnumTypeDefinition(def) => Some(&def.name),
        ast::Definition::InputObjectTypeDefinition(def) => Some(&def.name),
        _ => None,
    }
}

/// Applies one `extend` declaration to a same-name base definition.
///
/// Returns `None` when the extension contributes nothing, in which case
/// the base node is kept as is; errors when the extension's kind does not
/// match the base definition's.
fn apply_type_extension(
    name: &Name,
    base: &ast::Definition,
    extension: &ast::Definition,
) -> Result<Option<ast::Definition>, ExtendError> {
    use apollo_compiler::ast::Definition::*;

    Ok(match (base, extension) {
        (ScalarTypeDefinition(def), ScalarTypeExtension(ext)) => {
            extend_scalar(def, ext).map(ScalarTypeDefinition)
        }
        (ObjectTypeDefinition(def), ObjectTypeExtension(ext)) => {
            extend_object(def, ext).map(ObjectTypeDefinition)
        }
        (InterfaceTypeDefinition(def), InterfaceTypeExtension(ext)) => {
            extend_interface(def, ext).map(InterfaceTypeDefinition)
        }
        (UnionTypeDefinition(def), UnionTypeExtension(ext)) => {
            extend_union(def, ext).map(UnionTypeDefinition)
        }
        (EnumTypeDefinition(def), EnumTypeExtension(ext)) => {
            extend_enum(def, ext).map(EnumTypeDefinition)
        }
        (InputObjectTypeDefinition(def), InputObjectTypeExtension(ext)) => {
            extend_input_object(def, ext).map(InputObjectTypeDefinition)
        }
        (base, extension) => {
            return Err(ExtendError::MismatchedTypeExtension {
                name: name.clone(),
                base_kind: definition_kind(base),
                extension_kind: definition_kind(extension),
            })
        }
    })
}

// The per-kind merge rules. Extension lists are appended after the base
// lists, in extension order, without deduplicating; duplicates are the
// structural validation pass's job. Each rule returns `None` when the
// extension is empty so the base node keeps its identity.

fn extend_scalar(
    base: &Node<ast::ScalarTypeDefinition>,
    ext: &ast::ScalarTypeExtension,
) -> Option<Node<ast::ScalarTypeDefinition>> {
    if ext.directives.is_empty() {
        return None;
    }
    let mut node = base.clone();
    let def = node.make_mut();
    def.directives.extend(ext.directives.iter().cloned());
    Some(node)
}

fn extend_object(
    base: &Node<ast::ObjectTypeDefinition>,
    ext: &ast::ObjectTypeExtension,
) -> Option<Node<ast::ObjectTypeDefinition>> {
    if ext.directives.is_empty() && ext.implements_interfaces.is_empty() && ext.fields.is_empty() {
        return None;
    }
    let mut node = base.clone();
    let def = node.make_mut();
    def.directives.extend(ext.directives.iter().cloned());
    def.implements_interfaces
        .extend(ext.implements_interfaces.iter().cloned());
    def.fields.extend(ext.fields.iter().cloned());
    Some(node)
}

fn extend_interface(
    base: &Node<ast::InterfaceTypeDefinition>,
    ext: &ast::InterfaceTypeExtension,
) -> Option<Node<ast::InterfaceTypeDefinition>> {
    if ext.directives.is_empty() && ext.implements_interfaces.is_empty() && ext.fields.is_empty() {
        return None;
    }
    let mut node = base.clone();
    let def = node.make_mut();
    def.directives.extend(ext.directives.iter().cloned());
    def.implements_interfaces
        .extend(ext.implements_interfaces.iter().cloned());
    def.fields.extend(ext.fields.iter().cloned());
    Some(node)
}

fn extend_union(
    base: &Node<ast::UnionTypeDefinition>,
    ext: &ast::UnionTypeExtension,
) -> Option<Node<ast::UnionTypeDefinition>> {
    if ext.directives.is_empty() && ext.members.is_empty() {
        return None;
    }
    let mut node = base.clone();
    let def = node.make_mut();
    def.directives.extend(ext.directives.iter().cloned());
    def.members.extend(ext.members.iter().cloned());
    Some(node)
}

fn extend_enum(
    base: &Node<ast::EnumTypeDefinition>,
    ext: &ast::EnumTypeExtension,
) -> Option<Node<ast::EnumTypeDefinition>> {
    if ext.directives.is_empty() && ext.values.is_empty() {
        return None;
    }
    let mut node = base.clone();
    let def = node.make_mut();
    def.directives.extend(ext.directives.iter().cloned());
    def.values.extend(ext.values.iter().cloned());
    Some(node)
}

fn extend_input_object(
    base: &Node<ast::InputObjectTypeDefinition>,
    ext: &ast::InputObjectTypeExtension,
) -> Option<Node<ast::InputObjectTypeDefinition>> {
    if ext.directives.is_empty() && ext.fields.is_empty() {
        return None;
    }
    let mut node = base.clone();
    let def = node.make_mut();
    def.directives.extend(ext.directives.iter().cloned());
    def.fields.extend(ext.fields.iter().cloned());
    Some(node)
}

fn extend_schema(
    base: &Node<ast::SchemaDefinition>,
    ext: &ast::SchemaExtension,
) -> Option<Node<ast::SchemaDefinition>> {
    if ext.directives.is_empty() && ext.root_operations.is_empty() {
        return None;
    }
    let mut node = base.clone();
    let def = node.make_mut();
    def.directives.extend(ext.directives.iter().cloned());
    def.root_operations
        .extend(ext.root_operations.iter().cloned());
    Some(node)
}

/// The kind of a definition as it reads in GraphQL source, for error
/// messages.
fn definition_kind(definition: &ast::Definition) -> &'static str {
    match definition {
        ast::Definition::OperationDefinition(_) => "operation",
        ast::Definition::FragmentDefinition(_) => "fragment",
        ast::Definition::DirectiveDefinition(_) => "directive",
        ast::Definition::SchemaDefinition(_) | ast::Definition::SchemaExtension(_) => "schema",
        ast::Definition::ScalarTypeDefinition(_) | ast::Definition::ScalarTypeExtension(_) => {
            "scalar"
        }
        ast::Definition::ObjectTypeDefinition(_) | ast::Definition::ObjectTypeExtension(_) => {
            "object"
        }
        ast::Definition::InterfaceTypeDefinition(_)
        | ast::Definition::InterfaceTypeExtension(_) => "interface",
        ast::Definition::UnionTypeDefinition(_) | ast::Definition::UnionTypeExtension(_) => "union",
        ast::Definition::EnumTypeDefinition(_) | ast::Definition::EnumTypeExtension(_) => "enum",
        ast::Definition::InputObjectTypeDefinition(_)
        | ast::Definition::InputObjectTypeExtension(_) => "input object",
    }
}
