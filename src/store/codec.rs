//! XML encoding of the notebook document.
//!
//! ```xml
//! <?xml version="1.0" ?>
//! <notes>
//!   <topic name="cooking">
//!     <note>
//!       <text>boil eggs for 7 minutes</text>
//!       <timestamp>01.01.2024 10:00:00</timestamp>
//!     </note>
//!     <wikipedia_url title="Egg">https://en.wikipedia.org/wiki/Egg</wikipedia_url>
//!   </topic>
//! </notes>
//! ```
//!
//! [`render`] always produces one element per line with two-space indentation
//! and no blank lines. [`parse`] accepts any whitespace layout.

use roxmltree::Node;

use super::types::{Document, ExternalReference, Note, Topic};
use super::StoreError;

const INDENT: &str = "  ";

/// Parse the XML text of a notebook document.
pub fn parse(xml: &str) -> Result<Document, StoreError> {
    let doc = roxmltree::Document::parse(xml).map_err(|e| StoreError::Parse(e.to_string()))?;
    let root = doc.root_element();
    if !root.has_tag_name("notes") {
        return Err(StoreError::Parse(format!(
            "expected root element <notes>, found <{}>",
            root.tag_name().name()
        )));
    }

    let mut document = Document::default();
    for node in root.children().filter(|n| n.has_tag_name("topic")) {
        let name = node
            .attribute("name")
            .ok_or_else(|| StoreError::Parse("<topic> without a name attribute".into()))?;

        // Hand-edited files may repeat a topic; fold it into the first one.
        let topic = document.topic_or_insert(name);
        for child in node.children().filter(Node::is_element) {
            match child.tag_name().name() {
                "note" => topic.notes.push(parse_note(child, name)?),
                "wikipedia_url" if topic.reference.is_none() => {
                    topic.reference = Some(ExternalReference {
                        title: child.attribute("title").unwrap_or_default().to_string(),
                        url: child.text().unwrap_or_default().trim().to_string(),
                    });
                }
                _ => {}
            }
        }
    }

    Ok(document)
}

fn parse_note(node: Node<'_, '_>, topic: &str) -> Result<Note, StoreError> {
    let field = |tag: &str| {
        node.children()
            .find(|n| n.has_tag_name(tag))
            .map(|n| n.text().unwrap_or_default().to_string())
            .ok_or_else(|| StoreError::Parse(format!("note in topic '{topic}' has no <{tag}>")))
    };
    Ok(Note {
        text: field("text")?,
        timestamp: field("timestamp")?,
    })
}

/// Render the whole document as indented XML.
pub fn render(document: &Document) -> String {
    let mut out = String::from("<?xml version=\"1.0\" ?>\n");
    if document.topics.is_empty() {
        out.push_str("<notes/>\n");
        return out;
    }

    out.push_str("<notes>\n");
    for topic in &document.topics {
        render_topic(&mut out, topic);
    }
    out.push_str("</notes>\n");
    out
}

fn render_topic(out: &mut String, topic: &Topic) {
    let pad = INDENT;
    if topic.notes.is_empty() && topic.reference.is_none() {
        out.push_str(&format!("{pad}<topic name=\"{}\"/>\n", escape_attr(&topic.name)));
        return;
    }

    out.push_str(&format!("{pad}<topic name=\"{}\">\n", escape_attr(&topic.name)));
    let pad = INDENT.repeat(2);
    for note in &topic.notes {
        out.push_str(&format!("{pad}<note>\n"));
        push_leaf(out, 3, "text", &note.text);
        push_leaf(out, 3, "timestamp", &note.timestamp);
        out.push_str(&format!("{pad}</note>\n"));
    }
    if let Some(reference) = &topic.reference {
        out.push_str(&format!(
            "{pad}<wikipedia_url title=\"{}\">{}</wikipedia_url>\n",
            escape_attr(&reference.title),
            escape_text(&reference.url)
        ));
    }
    out.push_str(&format!("{INDENT}</topic>\n"));
}

fn push_leaf(out: &mut String, depth: usize, tag: &str, value: &str) {
    let pad = INDENT.repeat(depth);
    if value.is_empty() {
        out.push_str(&format!("{pad}<{tag}/>\n"));
    } else {
        out.push_str(&format!("{pad}<{tag}>{}</{tag}>\n", escape_text(value)));
    }
}

/// Characters allowed in an XML 1.0 document (the `Char` production).
pub fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\t' | '\n' | '\r'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

/// Reject values that could not be written as well-formed XML. Character
/// references do not help here: parsers refuse `&#1;` as well.
pub fn check_xml_chars(field: &'static str, value: &str) -> Result<(), StoreError> {
    match value.chars().find(|c| !is_xml_char(*c)) {
        Some(ch) => Err(StoreError::InvalidCharacter { field, ch }),
        None => Ok(()),
    }
}

/// Escape character data. Line breaks become character references so every
/// element stays on one line.
fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;").replace('\t', "&#9;")
}
