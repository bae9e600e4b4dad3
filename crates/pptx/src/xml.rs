//! Shared XML helpers for package parts.

use deck_core::{Error, Result};
use quick_xml::escape::escape;
use std::fmt::Write as FmtWrite;

pub(crate) const XML_DECLARATION: &str =
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Relationship type URIs.
pub mod rel_types {
    pub const OFFICE_DOCUMENT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    pub const CORE_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
    pub const EXTENDED_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
    pub const SLIDE_MASTER: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
    pub const SLIDE_LAYOUT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
    pub const SLIDE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
    pub const THEME: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";
    pub const PRES_PROPS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/presProps";
    pub const TABLE_STYLES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/tableStyles";
    pub const IMAGE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";
}

/// Map a `fmt::Write` failure onto our error type.
pub(crate) fn fmt_err(e: std::fmt::Error) -> Error {
    Error::XmlError(e.to_string())
}

/// One entry of a `.rels` part.
#[derive(Debug, Clone)]
pub(crate) struct Relationship {
    pub id: String,
    pub rel_type: &'static str,
    pub target: String,
}

impl Relationship {
    pub fn new(index: usize, rel_type: &'static str, target: impl Into<String>) -> Self {
        Self {
            id: format!("rId{}", index),
            rel_type,
            target: target.into(),
        }
    }
}

/// Serialize a relationships part.
pub(crate) fn relationships_xml(rels: &[Relationship]) -> Result<String> {
    let mut xml = String::with_capacity(256 + rels.len() * 160);
    xml.push_str(XML_DECLARATION);
    xml.push_str(
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for rel in rels {
        write!(
            xml,
            r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
            rel.id,
            rel.rel_type,
            escape(&rel.target)
        )
        .map_err(fmt_err)?;
    }
    xml.push_str("</Relationships>");
    Ok(xml)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relationship_target_escaped() {
        let rels = vec![Relationship::new(1, rel_types::IMAGE, "../media/a&b.png")];
        let xml = relationships_xml(&rels).unwrap();
        assert!(xml.contains(r#"Target="../media/a&amp;b.png""#));
    }

    #[test]
    fn test_relationships_xml() {
        let rels = vec![
            Relationship::new(1, rel_types::SLIDE_LAYOUT, "../slideLayouts/slideLayout2.xml"),
            Relationship::new(2, rel_types::IMAGE, "../media/image1.png"),
        ];
        let xml = relationships_xml(&rels).unwrap();
        assert!(xml.starts_with(XML_DECLARATION));
        assert!(xml.contains(r#"Id="rId1""#));
        assert!(xml.contains(r#"Target="../media/image1.png""#));
        assert!(xml.ends_with("</Relationships>"));
    }
}
