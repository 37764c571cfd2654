use quick_xml::{
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
    Writer,
};
use std::{borrow::Cow, io::Cursor};

use super::{XmlChild, XmlDocument, XmlNode, XmlRuntime};
use crate::MpdResult;

const INDENT_SIZE: usize = 2;

pub(super) fn write_document(document: &XmlDocument, _runtime: &XmlRuntime) -> MpdResult<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', INDENT_SIZE);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    if let Some(comment) = document.comment() {
        write_comment(&mut writer, comment)?;
    }
    write_node(&mut writer, document.root())?;

    let mut output = String::from_utf8(writer.into_inner().into_inner())?;
    output.push('\n');
    Ok(output)
}

fn write_node(writer: &mut Writer<Cursor<Vec<u8>>>, node: &XmlNode) -> MpdResult<()> {
    let mut start = BytesStart::new(node.name());
    for (key, value) in node.attributes() {
        start.push_attribute((key, value));
    }

    if node.children().is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in node.children() {
        match child {
            XmlChild::Element(element) => write_node(writer, element)?,
            XmlChild::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
            XmlChild::Comment(comment) => write_comment(writer, comment)?,
        }
    }
    writer.write_event(Event::End(BytesEnd::new(node.name())))?;
    Ok(())
}

fn write_comment(writer: &mut Writer<Cursor<Vec<u8>>>, comment: &str) -> MpdResult<()> {
    let comment = sanitize_comment(comment);
    writer.write_event(Event::Comment(BytesText::from_escaped(comment.as_ref())))?;
    Ok(())
}

/// A comment may neither contain `--` nor end with `-`.
fn sanitize_comment(comment: &str) -> Cow<'_, str> {
    if !comment.contains("--") && !comment.ends_with('-') {
        return Cow::Borrowed(comment);
    }

    let mut sanitized = comment.to_string();
    while sanitized.contains("--") {
        sanitized = sanitized.replace("--", "- -");
    }
    if sanitized.ends_with('-') {
        sanitized.push(' ');
    }
    Cow::Owned(sanitized)
}
