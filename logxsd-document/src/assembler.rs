//! Template splicing.
//!
//! Generated definitions are rendered under a temporary root, that fragment
//! is parsed back, and its top-level nodes replace the insertion marker of
//! the template document. Everything else in the template passes through
//! unchanged apart from re-indentation.

use crate::error::DocumentError;
use crate::render::{XS_NAMESPACE, render_fragment};
use logxsd_codegen::SchemaDef;
use quick_xml::events::{BytesStart, Event};
use quick_xml::{Reader, Writer};

/// Name of the template placeholder replaced by generated definitions.
pub const INSERTION_MARKER: &str = "types-go-here";

const XS_DECLARATION: &[u8] = b"xmlns:xs";

/// Children of the fragment root, ready to be replayed into the template.
struct Fragment {
    events: Vec<Event<'static>>,
    /// Indices of the start or empty events of top-level definitions.
    top_level: Vec<usize>,
}

/// Renders `defs` and splices them into `template`.
///
/// # Arguments
/// * `template` - Template schema document containing one insertion marker
/// * `defs` - Generated definitions, in emission order
///
/// # Returns
/// The serialized output document.
///
/// # Errors
/// Returns `DocumentError` if the template is malformed or does not contain
/// exactly one insertion marker.
pub fn assemble(template: &str, defs: &[SchemaDef]) -> Result<String, DocumentError> {
    let fragment = render_fragment(defs)?;
    splice(template, &fragment)
}

/// Replaces the insertion marker of `template` with the children of the
/// root element of `fragment`.
///
/// Definitions use the `xs` prefix. Where the template does not bind `xs`
/// to the XML Schema namespace at the marker, each inserted definition
/// declares it itself.
///
/// # Errors
/// Returns `DocumentError` if either document is malformed or the template
/// does not contain exactly one insertion marker.
pub fn splice(template: &str, fragment: &str) -> Result<String, DocumentError> {
    let fragment = fragment_children(fragment)?;

    let mut reader = Reader::from_str(template);
    reader.config_mut().trim_text(true);
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    // `xmlns:xs` declared by each open element, innermost last.
    let mut xs_scope: Vec<Option<Vec<u8>>> = Vec::new();
    let mut found = false;

    loop {
        match reader.read_event()? {
            Event::Empty(e) if is_marker(&e) => {
                claim_marker(&mut found)?;
                write_fragment(&mut writer, &fragment, !xs_in_scope(&xs_scope))?;
            }
            Event::Start(e) if is_marker(&e) => {
                claim_marker(&mut found)?;
                skip_element(&mut reader)?;
                write_fragment(&mut writer, &fragment, !xs_in_scope(&xs_scope))?;
            }
            Event::Start(e) => {
                xs_scope.push(xs_declaration(&e));
                writer.write_event(Event::Start(e))?;
            }
            Event::End(e) => {
                xs_scope.pop();
                writer.write_event(Event::End(e))?;
            }
            Event::Eof => break,
            event => writer.write_event(event)?,
        }
    }

    if !found {
        return Err(DocumentError::MarkerNotFound {
            marker: INSERTION_MARKER.to_string(),
        });
    }

    Ok(String::from_utf8(writer.into_inner())?)
}

fn is_marker(e: &BytesStart<'_>) -> bool {
    e.name().as_ref() == INSERTION_MARKER.as_bytes()
}

fn claim_marker(found: &mut bool) -> Result<(), DocumentError> {
    if *found {
        return Err(DocumentError::DuplicateMarker {
            marker: INSERTION_MARKER.to_string(),
        });
    }
    *found = true;
    Ok(())
}

fn xs_declaration(e: &BytesStart<'_>) -> Option<Vec<u8>> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == XS_DECLARATION)
        .map(|attr| attr.value.into_owned())
}

/// Returns true if the innermost `xs` binding is the XML Schema namespace.
fn xs_in_scope(scope: &[Option<Vec<u8>>]) -> bool {
    scope
        .iter()
        .rev()
        .find_map(Option::as_deref)
        .is_some_and(|uri| uri == XS_NAMESPACE.as_bytes())
}

fn write_fragment(
    writer: &mut Writer<Vec<u8>>,
    fragment: &Fragment,
    declare_xs: bool,
) -> Result<(), DocumentError> {
    for (idx, event) in fragment.events.iter().enumerate() {
        let event = match event {
            Event::Start(e) if declare_xs && fragment.top_level.contains(&idx) => {
                Event::Start(with_xs_declaration(e))
            }
            Event::Empty(e) if declare_xs && fragment.top_level.contains(&idx) => {
                Event::Empty(with_xs_declaration(e))
            }
            other => other.clone(),
        };
        writer.write_event(event)?;
    }
    Ok(())
}

fn with_xs_declaration(e: &BytesStart<'static>) -> BytesStart<'static> {
    let mut e = e.clone();
    e.push_attribute(("xmlns:xs", XS_NAMESPACE));
    e
}

/// Collects every event strictly inside the fragment's root element.
fn fragment_children(fragment: &str) -> Result<Fragment, DocumentError> {
    let mut reader = Reader::from_str(fragment);
    reader.config_mut().trim_text(true);

    let mut events = Vec::new();
    let mut top_level = Vec::new();
    let mut depth = 0usize;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                depth += 1;
                if depth == 2 {
                    top_level.push(events.len());
                }
                if depth > 1 {
                    events.push(Event::Start(e.into_owned()));
                }
            }
            Event::End(e) => {
                if depth == 0 {
                    return Err(DocumentError::UnbalancedFragment);
                }
                depth -= 1;
                if depth == 0 {
                    break;
                }
                events.push(Event::End(e.into_owned()));
            }
            Event::Empty(e) => {
                if depth == 0 {
                    break;
                }
                if depth == 1 {
                    top_level.push(events.len());
                }
                events.push(Event::Empty(e.into_owned()));
            }
            Event::Eof => return Err(DocumentError::UnbalancedFragment),
            event if depth > 0 => events.push(event.into_owned()),
            _ => {}
        }
    }

    tracing::debug!("Parsed {} top-level definitions from fragment", top_level.len());
    Ok(Fragment { events, top_level })
}

/// Skips past the end tag of the element whose start tag was just read.
fn skip_element(reader: &mut Reader<&[u8]>) -> Result<(), DocumentError> {
    let mut depth = 1usize;

    loop {
        match reader.read_event()? {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
            Event::Eof => {
                return Err(DocumentError::Template {
                    message: format!("unterminated <{INSERTION_MARKER}> element"),
                });
            }
            _ => {}
        }
    }
}
