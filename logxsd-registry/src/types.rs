//! Registry type definitions.
//!
//! This module contains the data structures describing introspected plugin
//! types: their shape, base type, own properties and the annotations the
//! schema generator reacts to.

use std::fmt;

/// Identity of a type inside a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeKey(usize);

impl TypeKey {
    /// Creates a key from a catalog index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the catalog index of this key.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Framework types the generator treats specially.
///
/// Identity checks against these tags replace comparisons with concrete
/// framework classes, so any catalog can mark its own equivalents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WellKnown {
    /// Universal root of the type hierarchy.
    Root,
    /// Base type of every plugin component; also the plugin-child type.
    Component,
    /// Collection of plugin children.
    ComponentCollection,
    /// Base deferred layout expression type.
    Layout,
    /// Base deferred condition expression type.
    Condition,
}

impl WellKnown {
    /// All tags, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Root,
        Self::Component,
        Self::ComponentCollection,
        Self::Layout,
        Self::Condition,
    ];

    /// Parses a tag from its description-file spelling.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "root" => Some(Self::Root),
            "component" => Some(Self::Component),
            "component-collection" => Some(Self::ComponentCollection),
            "layout" => Some(Self::Layout),
            "condition" => Some(Self::Condition),
            _ => None,
        }
    }

    /// Returns the description-file spelling of the tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Component => "component",
            Self::ComponentCollection => "component-collection",
            Self::Layout => "layout",
            Self::Condition => "condition",
        }
    }

    /// Returns true for the tags whose typed properties never become attributes.
    #[must_use]
    pub const fn is_reserved_property_type(&self) -> bool {
        matches!(
            self,
            Self::Component | Self::ComponentCollection | Self::Layout | Self::Condition
        )
    }
}

impl fmt::Display for WellKnown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Built-in primitive value types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// Unsigned 8-bit integer.
    Byte,
    /// Signed 8-bit integer.
    SByte,
    /// Signed 16-bit integer.
    Int16,
    /// Signed 32-bit integer.
    Int32,
    /// Signed 64-bit integer.
    Int64,
    /// Unsigned 16-bit integer.
    UInt16,
    /// Unsigned 32-bit integer.
    UInt32,
    /// Unsigned 64-bit integer.
    UInt64,
    /// Boolean.
    Boolean,
    /// Single character.
    Char,
    /// 32-bit floating point.
    Single,
    /// 64-bit floating point.
    Double,
}

impl Primitive {
    /// Returns the canonical type name.
    #[must_use]
    pub const fn canonical_name(&self) -> &'static str {
        match self {
            Self::Byte => "Byte",
            Self::SByte => "SByte",
            Self::Int16 => "Int16",
            Self::Int32 => "Int32",
            Self::Int64 => "Int64",
            Self::UInt16 => "UInt16",
            Self::UInt32 => "UInt32",
            Self::UInt64 => "UInt64",
            Self::Boolean => "Boolean",
            Self::Char => "Char",
            Self::Single => "Single",
            Self::Double => "Double",
        }
    }

    /// Parses a primitive from its description-file spelling.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "byte" => Some(Self::Byte),
            "sbyte" => Some(Self::SByte),
            "int16" => Some(Self::Int16),
            "int32" => Some(Self::Int32),
            "int64" => Some(Self::Int64),
            "uint16" => Some(Self::UInt16),
            "uint32" => Some(Self::UInt32),
            "uint64" => Some(Self::UInt64),
            "boolean" | "bool" => Some(Self::Boolean),
            "char" => Some(Self::Char),
            "single" | "float" => Some(Self::Single),
            "double" => Some(Self::Double),
            _ => None,
        }
    }
}

/// Shape of a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    /// Primitive value type.
    Primitive(Primitive),
    /// Text.
    String,
    /// Enumeration with its member names in declaration order.
    Enum(Vec<String>),
    /// Array type.
    Array,
    /// Structured type with properties.
    Structured,
}

/// Name-override annotation carried by nameable component types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentAnnotation {
    /// Name used in configuration files and as the schema type name.
    pub name: String,
    /// Suppresses the implicit `layout` attribute.
    pub ignores_layout: bool,
}

impl ComponentAnnotation {
    /// Creates a new annotation that keeps the implicit layout attribute.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ignores_layout: false,
        }
    }

    /// Marks the component as not accepting a layout.
    #[must_use]
    pub fn ignoring_layout(mut self) -> Self {
        self.ignores_layout = true;
        self
    }
}

/// Array-element annotation of a collection-valued property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayElement {
    /// Name of the repeated child element.
    pub element_name: String,
    /// Type of each item.
    pub item_type: TypeKey,
}

/// Property declared on a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// Property name.
    pub name: String,
    /// Declared value type.
    pub value_type: TypeKey,
    /// Whether the property has a setter.
    pub writable: bool,
    /// Array-element annotation.
    pub array_element: Option<ArrayElement>,
    /// Accepts a deferred layout expression.
    pub accepts_layout: bool,
    /// Accepts a deferred condition expression.
    pub accepts_condition: bool,
}

impl Property {
    /// Creates a new writable property without annotations.
    #[must_use]
    pub fn new(name: impl Into<String>, value_type: TypeKey) -> Self {
        Self {
            name: name.into(),
            value_type,
            writable: true,
            array_element: None,
            accepts_layout: false,
            accepts_condition: false,
        }
    }

    /// Makes the property read-only.
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }

    /// Attaches an array-element annotation.
    #[must_use]
    pub fn with_array_element(mut self, element_name: impl Into<String>, item_type: TypeKey) -> Self {
        self.array_element = Some(ArrayElement {
            element_name: element_name.into(),
            item_type,
        });
        self
    }

    /// Marks the property as accepting a layout.
    #[must_use]
    pub fn accepting_layout(mut self) -> Self {
        self.accepts_layout = true;
        self
    }

    /// Marks the property as accepting a condition.
    #[must_use]
    pub fn accepting_condition(mut self) -> Self {
        self.accepts_condition = true;
        self
    }
}

/// Introspected description of one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    /// Canonical type name.
    pub name: String,
    /// Base type (None only for the universal root).
    pub base: Option<TypeKey>,
    /// Type shape.
    pub kind: TypeKind,
    /// Properties declared directly on this type.
    pub properties: Vec<Property>,
    /// Name-override annotation.
    pub component: Option<ComponentAnnotation>,
    /// Well-known framework tag.
    pub well_known: Option<WellKnown>,
}

impl TypeInfo {
    /// Creates a new type description with no base, properties or annotations.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            base: None,
            kind,
            properties: Vec::new(),
            component: None,
            well_known: None,
        }
    }

    /// Returns true if this is an array type.
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self.kind, TypeKind::Array)
    }

    /// Returns true if this is a structured type.
    #[must_use]
    pub const fn is_structured(&self) -> bool {
        matches!(self.kind, TypeKind::Structured)
    }

    /// Looks up an own property by name.
    #[must_use]
    pub fn get_property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_known_parse() {
        for tag in WellKnown::ALL {
            assert_eq!(WellKnown::parse(tag.as_str()), Some(tag));
        }
        assert_eq!(WellKnown::parse("object"), None);
    }

    #[test]
    fn test_reserved_property_types() {
        assert!(!WellKnown::Root.is_reserved_property_type());
        assert!(WellKnown::Component.is_reserved_property_type());
        assert!(WellKnown::ComponentCollection.is_reserved_property_type());
        assert!(WellKnown::Layout.is_reserved_property_type());
        assert!(WellKnown::Condition.is_reserved_property_type());
    }

    #[test]
    fn test_primitive_from_name() {
        assert_eq!(Primitive::from_name("int32"), Some(Primitive::Int32));
        assert_eq!(Primitive::from_name("bool"), Some(Primitive::Boolean));
        assert_eq!(Primitive::from_name("decimal"), None);
        assert_eq!(Primitive::Int64.canonical_name(), "Int64");
    }

    #[test]
    fn test_property_builders() {
        let key = TypeKey::new(3);
        let prop = Property::new("Rules", key)
            .read_only()
            .with_array_element("rule", TypeKey::new(4));
        assert!(!prop.writable);
        let element = prop.array_element.expect("array element");
        assert_eq!(element.element_name, "rule");
        assert_eq!(element.item_type, TypeKey::new(4));
    }

    #[test]
    fn test_type_info_queries() {
        let mut info = TypeInfo::new("FileTarget", TypeKind::Structured);
        info.properties
            .push(Property::new("FileName", TypeKey::new(1)).accepting_layout());
        assert!(info.is_structured());
        assert!(!info.is_array());
        assert!(info.get_property("FileName").is_some_and(|p| p.accepts_layout));
        assert!(info.get_property("Missing").is_none());
    }
}
