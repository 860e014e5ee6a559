//! Naming policy for schema type and attribute names.

use logxsd_registry::{Primitive, TypeInfo, TypeKind};

/// Schema type name of text values.
pub const XS_STRING: &str = "xs:string";

/// Schema type of attributes accepting a deferred layout expression.
pub const LAYOUT_TYPE_NAME: &str = "NLogLayout";

/// Schema type of attributes accepting a deferred condition expression.
pub const CONDITION_TYPE_NAME: &str = "NLogCondition";

/// Name of the attribute every layout-capable component receives.
pub const IMPLICIT_LAYOUT_ATTRIBUTE: &str = "layout";

/// Returns the built-in schema type of a primitive, if it has one.
#[must_use]
pub const fn primitive_schema_name(primitive: Primitive) -> Option<&'static str> {
    match primitive {
        Primitive::Byte => Some("xs:byte"),
        Primitive::Int32 => Some("xs:integer"),
        Primitive::Int64 => Some("xs:long"),
        Primitive::Boolean => Some("xs:boolean"),
        _ => None,
    }
}

/// Returns the schema type name of a type.
///
/// Mapped primitives and text use their built-in schema names, a
/// name-override annotation is used verbatim, and everything else falls back
/// to the canonical type name.
#[must_use]
pub fn schema_type_name(info: &TypeInfo) -> &str {
    match info.kind {
        TypeKind::Primitive(primitive) => {
            if let Some(name) = primitive_schema_name(primitive) {
                return name;
            }
        }
        TypeKind::String => return XS_STRING,
        _ => {}
    }

    match &info.component {
        Some(annotation) => &annotation.name,
        None => &info.name,
    }
}

/// Converts a property name into its attribute name.
///
/// The leading uppercase run is lowercased. When that run is an acronym
/// followed by more text, its last letter stays uppercase as the start of
/// the next word: `Host` becomes `host`, `DBType` becomes `dbType`, `URL`
/// becomes `url`.
#[must_use]
pub fn attribute_name(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let len = chars.len();

    let mut first_lower = chars.iter().position(|c| c.is_lowercase()).unwrap_or(len);
    if first_lower == 0 {
        return name.to_string();
    }

    if first_lower != 1 && first_lower != len {
        first_lower -= 1;
    }

    let prefix: String = chars[..first_lower].iter().collect();
    let suffix: String = chars[first_lower..].iter().collect();
    prefix.to_lowercase() + &suffix
}
