//! Generated schema definition records.
//!
//! Generation produces these plain records; turning them into markup is the
//! document assembler's job.

/// One generated top-level schema type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaDef {
    /// Restricted string type.
    Enumeration(EnumerationDef),
    /// Complex type.
    Complex(ComplexTypeDef),
}

impl SchemaDef {
    /// Returns the schema type name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Enumeration(e) => &e.name,
            Self::Complex(c) => &c.name,
        }
    }

    /// Returns the enumeration definition, if this is one.
    #[must_use]
    pub fn as_enumeration(&self) -> Option<&EnumerationDef> {
        match self {
            Self::Enumeration(e) => Some(e),
            Self::Complex(_) => None,
        }
    }

    /// Returns the complex type definition, if this is one.
    #[must_use]
    pub fn as_complex(&self) -> Option<&ComplexTypeDef> {
        match self {
            Self::Complex(c) => Some(c),
            Self::Enumeration(_) => None,
        }
    }
}

/// Restricted string type listing its allowed values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumerationDef {
    /// Schema type name.
    pub name: String,
    /// Allowed values in declaration order.
    pub values: Vec<String>,
}

/// Complex type with a repeatable choice of child elements and attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexTypeDef {
    /// Schema type name.
    pub name: String,
    /// Schema type name of the extended base, if any.
    pub extends: Option<String>,
    /// Child elements; each is optional and unbounded.
    pub elements: Vec<ElementDef>,
    /// Attributes.
    pub attributes: Vec<AttributeDef>,
}

impl ComplexTypeDef {
    /// Creates an empty complex type.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extends: None,
            elements: Vec::new(),
            attributes: Vec::new(),
        }
    }

    /// Looks up a child element by name.
    #[must_use]
    pub fn get_element(&self, name: &str) -> Option<&ElementDef> {
        self.elements.iter().find(|e| e.name == name)
    }

    /// Looks up an attribute by name.
    #[must_use]
    pub fn get_attribute(&self, name: &str) -> Option<&AttributeDef> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

/// Repeatable child element declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementDef {
    /// Element name.
    pub name: String,
    /// Schema type name of the element.
    pub type_name: String,
}

impl ElementDef {
    /// Creates a new element declaration.
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// Attribute declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDef {
    /// Attribute name.
    pub name: String,
    /// Schema type name of the attribute.
    pub type_name: String,
}

impl AttributeDef {
    /// Creates a new attribute declaration.
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}
