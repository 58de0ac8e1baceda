use crate::validation::Violation;
use apollo_compiler::Name;

/// Errors raised while folding an extension document into a base document.
///
/// At most one error is returned per [`extend`][crate::extend] call; when
/// several extensions are unused or several structural rules are violated,
/// their reports are batched into a single `MissingBaseTypes` or
/// `Validation` value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtendError {
    /// More than one `schema` definition across the two documents combined,
    /// or more than one schema extension in the extension document.
    #[error("duplicate schema definition")]
    DuplicateSchema,

    /// A type name defined more than once among the base definitions,
    /// or defined again (not extended) by the extension document.
    #[error("duplicate type definition `{0}`")]
    DuplicateType(Name),

    /// An `extend` declaration whose kind does not match its target's kind.
    #[error("mismatched {extension_kind} extension for {base_kind} type `{name}`")]
    MismatchedTypeExtension {
        name: Name,
        base_kind: &'static str,
        extension_kind: &'static str,
    },

    /// Type extensions whose names match no base type definition.
    #[error("{}", missing_base_types_message(.0))]
    MissingBaseTypes(Vec<Name>),

    /// A schema extension with no base schema definition to extend.
    #[error("schema extension without a schema definition")]
    MissingBaseSchema,

    /// An operation or fragment definition in the extension document.
    #[error("unexpected {kind} definition: executable definitions are not allowed in a type system document")]
    UnexpectedExecutableDefinition { kind: &'static str },

    /// The merged document violates one or more structural uniqueness rules.
    #[error("{}", violations_message(.violations))]
    Validation { violations: Vec<Violation> },
}

fn missing_base_types_message(names: &[Name]) -> String {
    let list = names
        .iter()
        .map(|name| format!("`{name}`"))
        .collect::<Vec<_>>()
        .join(", ");
    if names.len() == 1 {
        format!("missing base type for the extension to {list}")
    } else {
        format!("missing base types for the extensions to {list}")
    }
}

fn violations_message(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
