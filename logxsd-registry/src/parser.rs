//! Registry description parser.
//!
//! A registry description is an XML document listing every type the
//! generator may reach, with the same information a run-time type
//! introspection facility would supply:
//!
//! ```xml
//! <registry>
//!     <type name="Object" wellKnown="root"/>
//!     <string name="String" base="Object"/>
//!     <type name="Target" base="Object" wellKnown="component"/>
//!     <type name="FileTarget" base="Target" root="true" component="File">
//!         <property name="FileName" type="String" acceptsLayout="true"/>
//!     </type>
//! </registry>
//! ```
//!
//! Type references may point forward; they are resolved once the whole
//! document has been read.

use crate::catalog::{Registry, TypeCatalog};
use crate::error::ParseError;
use crate::types::{ComponentAnnotation, Primitive, Property, TypeKey, TypeKind, WellKnown};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Type declaration as read from the document, before name resolution.
#[derive(Debug)]
struct RawType {
    name: String,
    kind: RawKind,
    base: Option<String>,
    well_known: Option<WellKnown>,
    root: bool,
    component: Option<String>,
    ignores_layout: bool,
    properties: Vec<RawProperty>,
    members: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
enum RawKind {
    Primitive(Primitive),
    String,
    Array,
    Enum,
    Structured,
}

/// Property declaration as read from the document.
#[derive(Debug)]
struct RawProperty {
    name: String,
    type_name: String,
    writable: bool,
    element: Option<String>,
    item_type: Option<String>,
    accepts_layout: bool,
    accepts_condition: bool,
}

/// Parses a registry description from a string.
///
/// # Arguments
/// * `xml` - Registry description content
///
/// # Returns
/// Populated registry or parse error.
///
/// # Errors
/// Returns `ParseError` if the XML is malformed, an attribute is missing or
/// invalid, a type is declared twice, or a type reference cannot be resolved.
pub fn parse_registry(xml: &str) -> Result<Registry, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut raw_types: Option<Vec<RawType>> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_bytes)?;
                if name == "registry" {
                    raw_types = Some(parse_declarations(&mut reader)?);
                }
            }
            Ok(Event::Empty(ref e)) => {
                if e.name().as_ref() == b"registry" {
                    raw_types = Some(Vec::new());
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    let raw_types = raw_types.ok_or_else(|| ParseError::InvalidStructure {
        message: "No registry element found".to_string(),
    })?;

    let registry = resolve(raw_types)?;
    tracing::debug!(
        "Parsed registry with {} types and {} roots",
        registry.len(),
        registry.root_types().len()
    );
    Ok(registry)
}

/// Parses the children of the registry element.
fn parse_declarations(reader: &mut Reader<&[u8]>) -> Result<Vec<RawType>, ParseError> {
    let mut declarations = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let tag_name = std::str::from_utf8(&name_bytes)?;
                match declaration_kind(tag_name, e)? {
                    Some(kind) => {
                        let mut raw = parse_type_header(tag_name, kind, e)?;
                        parse_type_body(reader, &mut raw)?;
                        declarations.push(raw);
                    }
                    None => {
                        tracing::warn!("Ignoring unknown registry element <{}>", tag_name);
                        skip_to_end(reader)?;
                    }
                }
            }
            Ok(Event::Empty(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let tag_name = std::str::from_utf8(&name_bytes)?;
                match declaration_kind(tag_name, e)? {
                    Some(kind) => declarations.push(parse_type_header(tag_name, kind, e)?),
                    None => tracing::warn!("Ignoring unknown registry element <{}>", tag_name),
                }
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => {
                return Err(ParseError::InvalidStructure {
                    message: "unexpected end of document inside registry".to_string(),
                });
            }
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(declarations)
}

/// Maps a declaration element to the shape it declares.
fn declaration_kind(tag_name: &str, e: &BytesStart<'_>) -> Result<Option<RawKind>, ParseError> {
    let kind = match tag_name {
        "type" => RawKind::Structured,
        "string" => RawKind::String,
        "array" => RawKind::Array,
        "enum" => RawKind::Enum,
        "primitive" => {
            let value = find_attribute(e, "primitive")?
                .ok_or_else(|| ParseError::missing_attr("primitive", "primitive"))?;
            let primitive = Primitive::from_name(&value)
                .ok_or_else(|| ParseError::invalid_attr("primitive", "primitive", value))?;
            RawKind::Primitive(primitive)
        }
        _ => return Ok(None),
    };
    Ok(Some(kind))
}

/// Parses the attributes of a declaration element.
fn parse_type_header(
    tag_name: &str,
    kind: RawKind,
    e: &BytesStart<'_>,
) -> Result<RawType, ParseError> {
    let mut name = None;
    let mut base = None;
    let mut well_known = None;
    let mut root = false;
    let mut component = None;
    let mut ignores_layout = false;

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;

        match key {
            "name" => name = Some(value.to_string()),
            "base" => base = Some(value.to_string()),
            "wellKnown" => {
                well_known = Some(
                    WellKnown::parse(value)
                        .ok_or_else(|| ParseError::invalid_attr(tag_name, "wellKnown", value))?,
                )
            }
            "root" => root = parse_bool(tag_name, "root", value)?,
            "component" => component = Some(value.to_string()),
            "ignoresLayout" => ignores_layout = parse_bool(tag_name, "ignoresLayout", value)?,
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr(tag_name, "name"))?;

    Ok(RawType {
        name,
        kind,
        base,
        well_known,
        root,
        component,
        ignores_layout,
        properties: Vec::new(),
        members: Vec::new(),
    })
}

/// Parses the children of a declaration element up to its end tag.
fn parse_type_body(reader: &mut Reader<&[u8]>, raw: &mut RawType) -> Result<(), ParseError> {
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                parse_type_child(raw, e)?;
                skip_to_end(reader)?;
            }
            Ok(Event::Empty(ref e)) => parse_type_child(raw, e)?,
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

/// Parses one child of a declaration element.
fn parse_type_child(raw: &mut RawType, e: &BytesStart<'_>) -> Result<(), ParseError> {
    let name_bytes = e.name().as_ref().to_vec();
    let tag_name = std::str::from_utf8(&name_bytes)?;
    match (tag_name, raw.kind) {
        ("property", RawKind::Structured) => {
            let property = parse_property(e)?;
            if raw.properties.iter().any(|p| p.name == property.name) {
                return Err(ParseError::duplicate(
                    "property",
                    format!("{}.{}", raw.name, property.name),
                ));
            }
            raw.properties.push(property);
        }
        ("member", RawKind::Enum) => {
            let member = find_attribute(e, "name")?
                .ok_or_else(|| ParseError::missing_attr("member", "name"))?;
            if raw.members.contains(&member) {
                return Err(ParseError::duplicate(
                    "member",
                    format!("{}.{}", raw.name, member),
                ));
            }
            raw.members.push(member);
        }
        _ => {
            tracing::warn!(
                "Ignoring element <{}> inside declaration of '{}'",
                tag_name,
                raw.name
            );
        }
    }
    Ok(())
}

/// Parses a property element.
fn parse_property(e: &BytesStart<'_>) -> Result<RawProperty, ParseError> {
    let mut name = None;
    let mut type_name = None;
    let mut writable = true;
    let mut element = None;
    let mut item_type = None;
    let mut accepts_layout = false;
    let mut accepts_condition = false;

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;

        match key {
            "name" => name = Some(value.to_string()),
            "type" => type_name = Some(value.to_string()),
            "writable" => writable = parse_bool("property", "writable", value)?,
            "element" => element = Some(value.to_string()),
            "itemType" => item_type = Some(value.to_string()),
            "acceptsLayout" => accepts_layout = parse_bool("property", "acceptsLayout", value)?,
            "acceptsCondition" => {
                accepts_condition = parse_bool("property", "acceptsCondition", value)?
            }
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("property", "name"))?;
    let type_name = type_name.ok_or_else(|| ParseError::missing_attr("property", "type"))?;

    match (&element, &item_type) {
        (Some(_), None) => return Err(ParseError::missing_attr("property", "itemType")),
        (None, Some(_)) => return Err(ParseError::missing_attr("property", "element")),
        _ => {}
    }

    Ok(RawProperty {
        name,
        type_name,
        writable,
        element,
        item_type,
        accepts_layout,
        accepts_condition,
    })
}

/// Builds the registry from raw declarations, resolving type names.
fn resolve(raw_types: Vec<RawType>) -> Result<Registry, ParseError> {
    let mut registry = Registry::new();
    let mut keys = Vec::with_capacity(raw_types.len());

    for raw in &raw_types {
        if registry.lookup(&raw.name).is_some() {
            return Err(ParseError::duplicate("type", raw.name.clone()));
        }
        let kind = match raw.kind {
            RawKind::Primitive(p) => TypeKind::Primitive(p),
            RawKind::String => TypeKind::String,
            RawKind::Array => TypeKind::Array,
            RawKind::Enum => TypeKind::Enum(raw.members.clone()),
            RawKind::Structured => TypeKind::Structured,
        };
        keys.push(registry.declare(raw.name.clone(), kind)?);
    }

    for (raw, key) in raw_types.into_iter().zip(keys) {
        if let Some(base) = &raw.base {
            let base_key = lookup(&registry, base, &raw.name)?;
            registry.set_base(key, base_key)?;
        }

        for prop in raw.properties {
            let owner = format!("{}.{}", raw.name, prop.name);
            let value_type = lookup(&registry, &prop.type_name, &owner)?;
            let mut property = Property::new(prop.name, value_type);
            property.writable = prop.writable;
            property.accepts_layout = prop.accepts_layout;
            property.accepts_condition = prop.accepts_condition;
            if let (Some(element), Some(item)) = (prop.element, prop.item_type) {
                let item_type = lookup(&registry, &item, &owner)?;
                property = property.with_array_element(element, item_type);
            }
            registry.add_property(key, property)?;
        }

        if let Some(component) = raw.component {
            let mut annotation = ComponentAnnotation::new(component);
            annotation.ignores_layout = raw.ignores_layout;
            registry.set_component(key, annotation)?;
        }

        if let Some(tag) = raw.well_known {
            registry.mark_well_known(tag, key)?;
        }

        if raw.root {
            registry.add_root(key)?;
        }
    }

    Ok(registry)
}

fn lookup(registry: &Registry, name: &str, referenced_by: &str) -> Result<TypeKey, ParseError> {
    registry
        .lookup(name)
        .ok_or_else(|| ParseError::unknown_type(name, referenced_by))
}

/// Returns the value of a single attribute.
fn find_attribute(e: &BytesStart<'_>, attribute: &str) -> Result<Option<String>, ParseError> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == attribute.as_bytes() {
            return Ok(Some(std::str::from_utf8(&attr.value)?.to_string()));
        }
    }
    Ok(None)
}

fn parse_bool(element: &str, attribute: &str, value: &str) -> Result<bool, ParseError> {
    match value {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ParseError::invalid_attr(element, attribute, value)),
    }
}

/// Skips to the end of the current element.
fn skip_to_end(reader: &mut Reader<&[u8]>) -> Result<(), ParseError> {
    let mut buf = Vec::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE_REGISTRY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<registry>
    <type name="Object" wellKnown="root"/>
    <string name="String" base="Object"/>
    <primitive name="Int32" primitive="int32" base="Object"/>
    <type name="Layout" base="Object" wellKnown="layout"/>
    <type name="Target" base="Object" wellKnown="component">
        <property name="Name" type="String"/>
    </type>
    <enum name="LineEndingMode" base="Object">
        <member name="Default"/>
        <member name="CRLF"/>
        <member name="LF"/>
    </enum>
    <type name="FileTarget" base="Target" root="true" component="File">
        <property name="FileName" type="String" acceptsLayout="true"/>
        <property name="LineEnding" type="LineEndingMode"/>
        <property name="Rules" type="RuleCollection" element="rule" itemType="Rule"/>
        <property name="IsOpen" type="Boolean" writable="false"/>
    </type>
    <type name="RuleCollection" base="Object"/>
    <type name="Rule" base="Object">
        <property name="Condition" type="String" acceptsCondition="true"/>
    </type>
    <primitive name="Boolean" primitive="boolean" base="Object"/>
</registry>"#;

    #[test]
    fn test_parse_simple_registry() {
        let registry = parse_registry(SIMPLE_REGISTRY).expect("Failed to parse registry");

        assert_eq!(registry.len(), 10);
        let file = registry.lookup("FileTarget").unwrap();
        assert_eq!(registry.root_types(), &[file]);
        assert_eq!(registry.well_known(WellKnown::Root), registry.lookup("Object"));
        assert_eq!(
            registry.well_known(WellKnown::Component),
            registry.lookup("Target")
        );
    }

    #[test]
    fn test_parse_type_details() {
        let registry = parse_registry(SIMPLE_REGISTRY).expect("Failed to parse registry");

        let file = registry.type_info(registry.lookup("FileTarget").unwrap()).unwrap();
        assert_eq!(file.base, registry.lookup("Target"));
        assert_eq!(file.component, Some(ComponentAnnotation::new("File")));
        assert_eq!(file.properties.len(), 4);

        let file_name = file.get_property("FileName").unwrap();
        assert!(file_name.accepts_layout);
        assert!(file_name.writable);

        let rules = file.get_property("Rules").unwrap();
        let element = rules.array_element.as_ref().unwrap();
        assert_eq!(element.element_name, "rule");
        assert_eq!(Some(element.item_type), registry.lookup("Rule"));

        assert!(!file.get_property("IsOpen").unwrap().writable);
    }

    #[test]
    fn test_parse_enum_members() {
        let registry = parse_registry(SIMPLE_REGISTRY).expect("Failed to parse registry");
        let mode = registry
            .type_info(registry.lookup("LineEndingMode").unwrap())
            .unwrap();
        assert_eq!(
            mode.kind,
            TypeKind::Enum(vec![
                "Default".to_string(),
                "CRLF".to_string(),
                "LF".to_string()
            ])
        );
    }

    #[test]
    fn test_parse_unknown_type_reference() {
        let xml = r#"<registry>
    <type name="Object" wellKnown="root"/>
    <type name="A" base="Object">
        <property name="Ghost" type="Missing"/>
    </type>
</registry>"#;
        let err = parse_registry(xml).unwrap_err();
        match err {
            ParseError::UnknownType {
                type_name,
                referenced_by,
            } => {
                assert_eq!(type_name, "Missing");
                assert_eq!(referenced_by, "A.Ghost");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_duplicate_type() {
        let xml = r#"<registry><type name="A"/><string name="A"/></registry>"#;
        let err = parse_registry(xml).unwrap_err();
        assert!(matches!(err, ParseError::DuplicateDefinition { .. }));
    }

    #[test]
    fn test_parse_missing_name() {
        let xml = r#"<registry><type base="Object"/></registry>"#;
        let err = parse_registry(xml).unwrap_err();
        assert!(matches!(err, ParseError::MissingAttribute { .. }));
    }

    #[test]
    fn test_parse_invalid_primitive() {
        let xml = r#"<registry><primitive name="Decimal" primitive="decimal"/></registry>"#;
        let err = parse_registry(xml).unwrap_err();
        assert!(matches!(err, ParseError::InvalidAttribute { .. }));
    }

    #[test]
    fn test_parse_element_without_item_type() {
        let xml = r#"<registry>
    <type name="A"><property name="Items" type="A" element="item"/></type>
</registry>"#;
        let err = parse_registry(xml).unwrap_err();
        assert!(matches!(err, ParseError::MissingAttribute { .. }));
    }

    #[test]
    fn test_parse_no_registry_element() {
        let err = parse_registry("<types/>").unwrap_err();
        assert!(matches!(err, ParseError::InvalidStructure { .. }));
    }

    #[test]
    fn test_parse_ignores_unknown_elements() {
        let xml = r#"<registry>
    <comment>free text <b>bold</b></comment>
    <type name="Object" wellKnown="root"/>
</registry>"#;
        let registry = parse_registry(xml).expect("Failed to parse registry");
        assert_eq!(registry.len(), 1);
    }
}
