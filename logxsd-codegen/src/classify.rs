//! Type classification.

use logxsd_registry::{TypeInfo, TypeKind};

/// Why a type produces no standalone definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Array types are described by the owning property.
    Array,
    /// Primitive value type.
    Primitive,
    /// Text.
    String,
}

/// Schema shape a type produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeShape<'a> {
    /// No definition.
    Skip(SkipReason),
    /// Restricted string with the given member names.
    Enumeration(&'a [String]),
    /// Complex type with elements and attributes.
    Structured,
}

/// Classifies a type.
#[must_use]
pub fn classify(info: &TypeInfo) -> TypeShape<'_> {
    match &info.kind {
        TypeKind::Array => TypeShape::Skip(SkipReason::Array),
        TypeKind::Primitive(_) => TypeShape::Skip(SkipReason::Primitive),
        TypeKind::String => TypeShape::Skip(SkipReason::String),
        TypeKind::Enum(members) => TypeShape::Enumeration(members),
        TypeKind::Structured => TypeShape::Structured,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logxsd_registry::Primitive;

    #[test]
    fn test_classify() {
        let array = TypeInfo::new("String[]", TypeKind::Array);
        assert_eq!(classify(&array), TypeShape::Skip(SkipReason::Array));

        let int = TypeInfo::new("Int32", TypeKind::Primitive(Primitive::Int32));
        assert_eq!(classify(&int), TypeShape::Skip(SkipReason::Primitive));

        let string = TypeInfo::new("String", TypeKind::String);
        assert_eq!(classify(&string), TypeShape::Skip(SkipReason::String));

        let members = vec!["Grow".to_string(), "Block".to_string()];
        let overflow = TypeInfo::new("OverflowAction", TypeKind::Enum(members.clone()));
        assert_eq!(classify(&overflow), TypeShape::Enumeration(&members));

        let file = TypeInfo::new("FileTarget", TypeKind::Structured);
        assert_eq!(classify(&file), TypeShape::Structured);
    }
}
