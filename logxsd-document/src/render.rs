//! XSD markup rendering of generated definitions.

use crate::error::DocumentError;
use logxsd_codegen::{ComplexTypeDef, EnumerationDef, SchemaDef};
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use std::io::Write;

/// XML Schema namespace URI.
pub const XS_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// Element wrapping generated definitions before they are spliced.
pub const FRAGMENT_ROOT: &str = "root";

const UNBOUNDED: [(&str, &str); 2] = [("minOccurs", "0"), ("maxOccurs", "unbounded")];

/// Renders definitions under a temporary root element declaring the `xs`
/// prefix.
///
/// # Errors
/// Returns `DocumentError` if writing fails.
pub fn render_fragment(defs: &[SchemaDef]) -> Result<String, DocumentError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    start(&mut writer, FRAGMENT_ROOT, &[("xmlns:xs", XS_NAMESPACE)])?;
    for def in defs {
        write_definition(&mut writer, def)?;
    }
    end(&mut writer, FRAGMENT_ROOT)?;

    Ok(String::from_utf8(writer.into_inner())?)
}

/// Writes one definition.
///
/// # Errors
/// Returns `DocumentError` if writing fails.
pub fn write_definition<W: Write>(
    writer: &mut Writer<W>,
    def: &SchemaDef,
) -> Result<(), DocumentError> {
    match def {
        SchemaDef::Enumeration(e) => write_enumeration(writer, e),
        SchemaDef::Complex(c) => write_complex(writer, c),
    }
}

fn write_enumeration<W: Write>(
    writer: &mut Writer<W>,
    def: &EnumerationDef,
) -> Result<(), DocumentError> {
    start(writer, "xs:simpleType", &[("name", def.name.as_str())])?;
    start(writer, "xs:restriction", &[("base", "xs:string")])?;
    for value in &def.values {
        empty(writer, "xs:enumeration", &[("value", value.as_str())])?;
    }
    end(writer, "xs:restriction")?;
    end(writer, "xs:simpleType")
}

fn write_complex<W: Write>(
    writer: &mut Writer<W>,
    def: &ComplexTypeDef,
) -> Result<(), DocumentError> {
    start(writer, "xs:complexType", &[("name", def.name.as_str())])?;
    if let Some(base) = &def.extends {
        start(writer, "xs:complexContent", &[])?;
        start(writer, "xs:extension", &[("base", base.as_str())])?;
    }

    if def.elements.is_empty() {
        empty(writer, "xs:choice", &UNBOUNDED)?;
    } else {
        start(writer, "xs:choice", &UNBOUNDED)?;
        for element in &def.elements {
            empty(
                writer,
                "xs:element",
                &[
                    ("name", element.name.as_str()),
                    ("type", element.type_name.as_str()),
                    UNBOUNDED[0],
                    UNBOUNDED[1],
                ],
            )?;
        }
        end(writer, "xs:choice")?;
    }

    for attribute in &def.attributes {
        empty(
            writer,
            "xs:attribute",
            &[
                ("name", attribute.name.as_str()),
                ("type", attribute.type_name.as_str()),
            ],
        )?;
    }

    if def.extends.is_some() {
        end(writer, "xs:extension")?;
        end(writer, "xs:complexContent")?;
    }
    end(writer, "xs:complexType")
}

fn element<'a>(name: &'a str, attributes: &[(&str, &str)]) -> BytesStart<'a> {
    let mut element = BytesStart::new(name);
    for &attribute in attributes {
        element.push_attribute(attribute);
    }
    element
}

fn start<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    attributes: &[(&str, &str)],
) -> Result<(), DocumentError> {
    writer.write_event(Event::Start(element(name, attributes)))?;
    Ok(())
}

fn empty<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    attributes: &[(&str, &str)],
) -> Result<(), DocumentError> {
    writer.write_event(Event::Empty(element(name, attributes)))?;
    Ok(())
}

fn end<W: Write>(writer: &mut Writer<W>, name: &str) -> Result<(), DocumentError> {
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use logxsd_codegen::{AttributeDef, ElementDef};

    fn file_def() -> SchemaDef {
        let mut def = ComplexTypeDef::new("File");
        def.extends = Some("TargetWithLayoutHeaderAndFooter".to_string());
        def.attributes.push(AttributeDef::new("fileName", "NLogLayout"));
        def.attributes.push(AttributeDef::new("layout", "NLogLayout"));
        SchemaDef::Complex(def)
    }

    #[test]
    fn test_render_enumeration() {
        let def = SchemaDef::Enumeration(EnumerationDef {
            name: "LineEndingMode".to_string(),
            values: vec!["CRLF".to_string(), "LF".to_string()],
        });
        let xml = render_fragment(&[def]).unwrap();

        assert!(xml.contains("<root xmlns:xs=\"http://www.w3.org/2001/XMLSchema\">"));
        assert!(xml.contains("<xs:simpleType name=\"LineEndingMode\">"));
        assert!(xml.contains("<xs:restriction base=\"xs:string\">"));
        let crlf = xml.find("<xs:enumeration value=\"CRLF\"/>").unwrap();
        let lf = xml.find("<xs:enumeration value=\"LF\"/>").unwrap();
        assert!(crlf < lf);
        assert!(xml.trim_end().ends_with("</root>"));
    }

    #[test]
    fn test_render_extension() {
        let xml = render_fragment(&[file_def()]).unwrap();

        assert!(xml.contains("<xs:complexType name=\"File\">"));
        assert!(xml.contains("<xs:complexContent>"));
        assert!(xml.contains("<xs:extension base=\"TargetWithLayoutHeaderAndFooter\">"));
        assert!(xml.contains("<xs:choice minOccurs=\"0\" maxOccurs=\"unbounded\"/>"));
        assert!(xml.contains("<xs:attribute name=\"fileName\" type=\"NLogLayout\"/>"));
        assert!(xml.find("</xs:extension>").unwrap() < xml.find("</xs:complexType>").unwrap());
    }

    #[test]
    fn test_render_elements() {
        let mut def = ComplexTypeDef::new("Database");
        def.elements
            .push(ElementDef::new("parameter", "DatabaseParameterInfo"));
        let xml = render_fragment(&[SchemaDef::Complex(def)]).unwrap();

        assert!(!xml.contains("xs:complexContent"));
        assert!(xml.contains("<xs:choice minOccurs=\"0\" maxOccurs=\"unbounded\">"));
        assert!(xml.contains(
            "<xs:element name=\"parameter\" type=\"DatabaseParameterInfo\" minOccurs=\"0\" maxOccurs=\"unbounded\"/>"
        ));
    }

    #[test]
    fn test_render_escapes_values() {
        let def = SchemaDef::Enumeration(EnumerationDef {
            name: "Ops".to_string(),
            values: vec!["<&>".to_string()],
        });
        let xml = render_fragment(&[def]).unwrap();
        assert!(xml.contains("value=\"&lt;&amp;&gt;\""));
    }
}
