use crate::ExtendError;
use apollo_compiler::ast;
use apollo_compiler::Name;
use apollo_compiler::Node;
use indexmap::IndexMap;
use indexmap::IndexSet;

/// Classified contents of an extension document.
///
/// Built by a single pass over the extension document's definitions, then
/// consulted while the base document is walked: which named types have
/// pending `extend` declarations, whether a schema extension is pending,
/// and which definitions are "passthrough": present only in the extension
/// document, appended to the merged output unchanged.
///
/// The index lives for a single [`extend`][crate::extend] call.
pub(crate) struct ExtensionIndex {
    has_schema_definition: bool,
    schema_extension: Option<Node<ast::SchemaExtension>>,
    schema_extension_used: bool,
    /// Names of type definitions in the extension document, used to detect
    /// a base type being defined again rather than extended.
    type_names: IndexSet<Name>,
    /// All `extend` declarations targeting a name, in document order.
    /// Several extensions may accumulate under one name; each is applied
    /// in turn when the base definition is reached.
    type_extensions: IndexMap<Name, Vec<ast::Definition>>,
    used_extensions: IndexSet<Name>,
    passthrough: Vec<ast::Definition>,
}

impl ExtensionIndex {
    pub(crate) fn new(document: &ast::Document) -> Result<Self, ExtendError> {
        let mut index = Self {
            has_schema_definition: false,
            schema_extension: None,
            schema_extension_used: false,
            type_names: IndexSet::new(),
            type_extensions: IndexMap::new(),
            used_extensions: IndexSet::new(),
            passthrough: Vec::new(),
        };
        for definition in &document.definitions {
            match definition {
                ast::Definition::OperationDefinition(_) => {
                    return Err(ExtendError::UnexpectedExecutableDefinition {
                        kind: "operation",
                    })
                }
                ast::Definition::FragmentDefinition(_) => {
                    return Err(ExtendError::UnexpectedExecutableDefinition { kind: "fragment" })
                }
                ast::Definition::SchemaDefinition(_) => {
                    if index.has_schema_definition {
                        return Err(ExtendError::DuplicateSchema);
                    }
                    index.has_schema_definition = true;
                    index.passthrough.push(definition.clone());
                }
                ast::Definition::SchemaExtension(ext) => {
                    if index.schema_extension.is_some() {
                        return Err(ExtendError::DuplicateSchema);
                    }
                    index.schema_extension = Some(ext.clone());
                }
                ast::Definition::DirectiveDefinition(_) => {
                    index.passthrough.push(definition.clone())
                }
                ast::Definition::ScalarTypeDefinition(def) => {
                    index.add_type_definition(&def.name, definition)
                }
                ast::Definition::ObjectTypeDefinition(def) => {
                    index.add_type_definition(&def.name, definition)
                }
                ast::Definition::InterfaceTypeDefinition(def) => {
                    index.add_type_definition(&def.name, definition)
                }
                ast::Definition::UnionTypeDefinition(def) => {
                    index.add_type_definition(&def.name, definition)
                }
                ast::Definition::EnumTypeDefinition(def) => {
                    index.add_type_definition(&def.name, definition)
                }
                ast::Definition::InputObjectTypeDefinition(def) => {
                    index.add_type_definition(&def.name, definition)
                }
                ast::Definition::ScalarTypeExtension(ext) => {
                    index.add_type_extension(&ext.name, definition)
                }
                ast::Definition::ObjectTypeExtension(ext) => {
                    index.add_type_extension(&ext.name, definition)
                }
                ast::Definition::InterfaceTypeExtension(ext) => {
                    index.add_type_extension(&ext.name, definition)
                }
                ast::Definition::UnionTypeExtension(ext) => {
                    index.add_type_extension(&ext.name, definition)
                }
                ast::Definition::EnumTypeExtension(ext) => {
                    index.add_type_extension(&ext.name, definition)
                }
                ast::Definition::InputObjectTypeExtension(ext) => {
                    index.add_type_extension(&ext.name, definition)
                }
            }
        }
        Ok(index)
    }

    fn add_type_definition(&mut self, name: &Name, definition: &ast::Definition) {
        self.type_names.insert(name.clone());
        self.passthrough.push(definition.clone());
    }

    fn add_type_extension(&mut self, name: &Name, definition: &ast::Definition) {
        self.type_extensions
            .entry(name.clone())
            .or_default()
            .push(definition.clone());
    }

    /// Whether the extension document itself defines a type with this name.
    pub(crate) fn has_type(&self, name: &Name) -> bool {
        self.type_names.contains(name)
    }

    /// Whether the extension document contains a `schema` definition
    /// (as opposed to a schema extension).
    pub(crate) fn has_schema_definition(&self) -> bool {
        self.has_schema_definition
    }

    /// The `extend` declarations targeting `name`, in document order.
    pub(crate) fn type_extensions(&self, name: &Name) -> &[ast::Definition] {
        self.type_extensions
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub(crate) fn mark_used(&mut self, name: &Name) {
        self.used_extensions.insert(name.clone());
    }

    /// Names with a recorded extension that was never applied,
    /// in extension-document order.
    pub(crate) fn unused_extension_names(&self) -> Vec<Name> {
        self.type_extensions
            .keys()
            .filter(|name| !self.used_extensions.contains(*name))
            .cloned()
            .collect()
    }

    pub(crate) fn schema_extension(&self) -> Option<&Node<ast::SchemaExtension>> {
        self.schema_extension.as_ref()
    }

    pub(crate) fn mark_schema_extension_used(&mut self) {
        self.schema_extension_used = true;
    }

    pub(crate) fn has_unused_schema_extension(&self) -> bool {
        self.schema_extension.is_some() && !self.schema_extension_used
    }

    /// Definitions present only in the extension document, appended to the
    /// merged document unchanged, in extension-document order.
    pub(crate) fn passthrough_definitions(&self) -> &[ast::Definition] {
        &self.passthrough
    }
}
