//! PPTX file reader, used to inspect written decks.

use deck_core::{Error, ExtractedDeck, ExtractedPicture, ExtractedSlide, Layout, Paragraph, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::io::{Read, Seek};
use zip::ZipArchive;

/// Parser for PPTX (Office Open XML) files.
pub struct PptxParser;

impl PptxParser {
    /// Create a new PPTX parser.
    pub fn new() -> Self {
        Self
    }

    /// Parse a PPTX file from a reader.
    pub fn parse<R: Read + Seek>(&self, reader: R, filename: &str) -> Result<ExtractedDeck> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

        let mut deck = ExtractedDeck::new(filename);

        // Get the slide order from presentation.xml.rels
        let slide_order = self.get_slide_order(&mut archive)?;
        log::debug!("Found {} slide parts", slide_order.len());

        for (idx, slide_path) in slide_order.iter().enumerate() {
            let slide = self.parse_slide(&mut archive, slide_path, idx + 1)?;
            deck.add_slide(slide);
        }

        Ok(deck)
    }

    /// Get the ordered list of slide paths from the presentation relationships.
    fn get_slide_order<R: Read + Seek>(&self, archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
        let rels_content = self.read_file_from_archive(archive, "ppt/_rels/presentation.xml.rels")?;

        let mut slides: Vec<(String, Option<usize>)> = parse_relationships(&rels_content)?
            .into_iter()
            .filter(|rel| rel.rel_type.ends_with("/slide"))
            .map(|rel| {
                // Order by the slide's file number, falling back to its rId
                let order = extract_slide_number(&rel.target).or_else(|| extract_slide_number(&rel.id));
                (resolve_target("ppt", &rel.target), order)
            })
            .collect();

        slides.sort_by(|a, b| match (a.1, b.1) {
            (Some(na), Some(nb)) => na.cmp(&nb),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.0.cmp(&b.0),
        });

        Ok(slides.into_iter().map(|(path, _)| path).collect())
    }

    /// Parse a single slide and its relationships from the archive.
    fn parse_slide<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        slide_path: &str,
        slide_number: usize,
    ) -> Result<ExtractedSlide> {
        let content = self.read_file_from_archive(archive, slide_path)?;
        let (dir, file) = slide_path.rsplit_once('/').unwrap_or(("", slide_path));
        let rels_path = format!("{}/_rels/{}.rels", dir, file);

        let rels = match self.read_file_from_archive(archive, &rels_path) {
            Ok(xml) => parse_relationships(&xml)?,
            Err(_) => {
                log::debug!("No relationships for {}", slide_path);
                Vec::new()
            }
        };

        let mut slide = ExtractedSlide::new(slide_number);
        slide.layout = rels
            .iter()
            .find(|r| r.rel_type.ends_with("/slideLayout"))
            .and_then(|r| Layout::from_part_name(&r.target));

        let targets: HashMap<&str, String> = rels
            .iter()
            .map(|r| (r.id.as_str(), resolve_target(dir, &r.target)))
            .collect();

        for shape in self.extract_shapes_from_xml(&content)? {
            match shape {
                ShapeInfo::Text { is_title, paragraphs } => {
                    if is_title && slide.title.is_none() {
                        let lines: Vec<&str> = paragraphs.iter().map(|p| p.text.as_str()).collect();
                        slide.title = Some(lines.join("\n"));
                    } else {
                        slide.paragraphs.extend(paragraphs);
                    }
                }
                ShapeInfo::Picture { embed, mut picture } => {
                    picture.target = embed.and_then(|id| targets.get(id.as_str()).cloned());
                    slide.pictures.push(picture);
                }
            }
        }

        Ok(slide)
    }

    /// Extract text shapes and pictures from slide XML, in document order.
    fn extract_shapes_from_xml(&self, xml_content: &str) -> Result<Vec<ShapeInfo>> {
        let mut shapes = Vec::new();
        let mut reader = Reader::from_str(xml_content);

        let mut state = ShapeState::default();

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => state.open(e, false),
                Ok(Event::Empty(ref e)) => state.open(e, true),
                Ok(Event::Text(ref e)) => {
                    if state.in_text_run {
                        let text = e
                            .unescape()
                            .map_err(|err| Error::XmlError(format!("Bad text in slide: {}", err)))?;
                        if let Some(p) = state.paragraph.as_mut() {
                            p.text.push_str(&text);
                        }
                    }
                }
                Ok(Event::End(ref e)) => {
                    if let Some(shape) = state.close(local_name(e.name().as_ref())) {
                        shapes.push(shape);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlError(format!(
                        "Error at position {}: {}",
                        reader.buffer_position(),
                        e
                    )));
                }
                _ => {}
            }
        }

        Ok(shapes)
    }

    /// Read a file from the ZIP archive.
    fn read_file_from_archive<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        path: &str,
    ) -> Result<String> {
        let mut file = archive
            .by_name(path)
            .map_err(|e| Error::ZipError(format!("File not found in archive '{}': {}", path, e)))?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

        Ok(content)
    }
}

impl Default for PptxParser {
    fn default() -> Self {
        Self::new()
    }
}

/// A shape extracted from slide XML.
#[derive(Debug)]
enum ShapeInfo {
    Text {
        is_title: bool,
        paragraphs: Vec<Paragraph>,
    },
    Picture {
        embed: Option<String>,
        picture: ExtractedPicture,
    },
}

/// Parser state while walking a slide's shape tree.
#[derive(Debug, Default)]
struct ShapeState {
    in_shape: bool,
    in_picture: bool,
    in_xfrm: bool,
    in_text_run: bool,
    is_title: bool,
    paragraph: Option<Paragraph>,
    paragraphs: Vec<Paragraph>,
    embed: Option<String>,
    picture: ExtractedPicture,
}

impl ShapeState {
    fn open(&mut self, e: &BytesStart, is_empty: bool) {
        let name = e.name();
        match local_name(name.as_ref()) {
            b"sp" if !is_empty => {
                self.in_shape = true;
                self.is_title = false;
                self.paragraphs.clear();
            }
            b"pic" if !is_empty => {
                self.in_picture = true;
                self.embed = None;
                self.picture = ExtractedPicture::default();
            }
            b"ph" if self.in_shape => {
                self.is_title = attr(e, b"type")
                    .map(|t| t == "title" || t == "ctrTitle")
                    .unwrap_or(false);
            }
            b"p" if self.in_shape => {
                self.paragraph = Some(Paragraph::empty());
                if is_empty {
                    self.finish_paragraph();
                }
            }
            b"pPr" => {
                if let (Some(p), Some(lvl)) = (self.paragraph.as_mut(), attr(e, b"lvl")) {
                    p.level = lvl.parse().unwrap_or(0);
                }
            }
            b"rPr" | b"endParaRPr" => {
                if let (Some(p), Some(b)) = (self.paragraph.as_mut(), attr(e, b"b")) {
                    p.bold |= b == "1" || b == "true";
                }
            }
            b"t" if !is_empty && self.paragraph.is_some() => self.in_text_run = true,
            b"blip" if self.in_picture => self.embed = attr(e, b"embed"),
            b"xfrm" if self.in_picture && !is_empty => self.in_xfrm = true,
            b"off" if self.in_xfrm => {
                self.picture.x = attr_i64(e, b"x");
                self.picture.y = attr_i64(e, b"y");
            }
            b"ext" if self.in_xfrm => {
                self.picture.cx = attr_i64(e, b"cx");
                self.picture.cy = attr_i64(e, b"cy");
            }
            _ => {}
        }
    }

    fn close(&mut self, name: &[u8]) -> Option<ShapeInfo> {
        match name {
            b"t" => self.in_text_run = false,
            b"p" if self.in_shape => self.finish_paragraph(),
            b"xfrm" => self.in_xfrm = false,
            b"sp" if self.in_shape => {
                self.in_shape = false;
                return Some(ShapeInfo::Text {
                    is_title: self.is_title,
                    paragraphs: std::mem::take(&mut self.paragraphs),
                });
            }
            b"pic" if self.in_picture => {
                self.in_picture = false;
                return Some(ShapeInfo::Picture {
                    embed: self.embed.take(),
                    picture: std::mem::take(&mut self.picture),
                });
            }
            _ => {}
        }
        None
    }

    fn finish_paragraph(&mut self) {
        if let Some(p) = self.paragraph.take() {
            self.paragraphs.push(p);
        }
    }
}

/// One `Relationship` entry of a `.rels` part.
#[derive(Debug, Clone)]
struct RelEntry {
    id: String,
    rel_type: String,
    target: String,
}

fn parse_relationships(xml: &str) -> Result<Vec<RelEntry>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut rels = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if local_name(e.name().as_ref()) == b"Relationship" =>
            {
                rels.push(RelEntry {
                    id: attr(e, b"Id").unwrap_or_default(),
                    rel_type: attr(e, b"Type").unwrap_or_default(),
                    target: attr(e, b"Target").unwrap_or_default(),
                });
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!("Error parsing relationships: {}", e)));
            }
            _ => {}
        }
    }

    Ok(rels)
}

/// Value of an attribute matched by local name.
fn attr(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| local_name(a.key.as_ref()) == key)
        .map(|a| String::from_utf8_lossy(&a.value).to_string())
}

fn attr_i64(e: &BytesStart, key: &[u8]) -> i64 {
    attr(e, key).and_then(|v| v.parse().ok()).unwrap_or(0)
}

/// Resolve a relationship target against the directory of its source part.
fn resolve_target(base_dir: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }

    let mut parts: Vec<&str> = base_dir.split('/').filter(|s| !s.is_empty()).collect();
    for segment in target.split('/') {
        match segment {
            ".." => {
                parts.pop();
            }
            "." | "" => {}
            s => parts.push(s),
        }
    }
    parts.join("/")
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

/// Extract a slide number from a string like "rId2" or "slides/slide3.xml".
fn extract_slide_number(s: &str) -> Option<usize> {
    let s = s.trim_end_matches(".xml").trim_end_matches(".rels");

    let digits: String = s.chars().rev().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let digits: String = digits.chars().rev().collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_slide_number() {
        assert_eq!(extract_slide_number("rId1"), Some(1));
        assert_eq!(extract_slide_number("rId12"), Some(12));
        assert_eq!(extract_slide_number("slides/slide1.xml"), Some(1));
        assert_eq!(extract_slide_number("slide123.xml"), Some(123));
        assert_eq!(extract_slide_number("nodigits"), None);
    }

    #[test]
    fn test_local_name() {
        assert_eq!(local_name(b"p:sp"), b"sp");
        assert_eq!(local_name(b"a:t"), b"t");
        assert_eq!(local_name(b"sp"), b"sp");
    }

    #[test]
    fn test_resolve_target() {
        assert_eq!(resolve_target("ppt", "slides/slide1.xml"), "ppt/slides/slide1.xml");
        assert_eq!(resolve_target("ppt/slides", "../media/image1.png"), "ppt/media/image1.png");
        assert_eq!(resolve_target("ppt/slides", "/ppt/media/x.png"), "ppt/media/x.png");
    }

    #[test]
    fn test_extract_shapes() {
        let xml = concat!(
            r#"<p:sld xmlns:a="a" xmlns:p="p" xmlns:r="r"><p:cSld><p:spTree>"#,
            r#"<p:sp><p:nvSpPr><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr>"#,
            r#"<p:txBody><a:p><a:r><a:t>Q &amp; A</a:t></a:r></a:p></p:txBody></p:sp>"#,
            r#"<p:sp><p:nvSpPr><p:nvPr><p:ph idx="1"/></p:nvPr></p:nvSpPr><p:txBody>"#,
            r#"<a:p><a:endParaRPr lang="en-US"/></a:p>"#,
            r#"<a:p><a:pPr lvl="1"/><a:r><a:rPr b="1"/><a:t>Deep</a:t></a:r></a:p>"#,
            r#"<a:p/>"#,
            r#"</p:txBody></p:sp>"#,
            r#"<p:pic><p:blipFill><a:blip r:embed="rId2"/></p:blipFill>"#,
            r#"<p:spPr><a:xfrm><a:off x="1" y="2"/><a:ext cx="3" cy="4"/></a:xfrm></p:spPr></p:pic>"#,
            r#"</p:spTree></p:cSld></p:sld>"#,
        );

        let shapes = PptxParser::new().extract_shapes_from_xml(xml).unwrap();
        assert_eq!(shapes.len(), 3);

        match &shapes[0] {
            ShapeInfo::Text { is_title, paragraphs } => {
                assert!(is_title);
                assert_eq!(paragraphs[0].text, "Q & A");
            }
            other => panic!("expected title, got {:?}", other),
        }

        match &shapes[1] {
            ShapeInfo::Text { is_title, paragraphs } => {
                assert!(!is_title);
                assert_eq!(paragraphs.len(), 3);
                assert!(paragraphs[0].is_empty());
                assert_eq!(paragraphs[1], Paragraph::bold("Deep").with_level(1));
                assert!(paragraphs[2].is_empty());
            }
            other => panic!("expected body, got {:?}", other),
        }

        match &shapes[2] {
            ShapeInfo::Picture { embed, picture } => {
                assert_eq!(embed.as_deref(), Some("rId2"));
                assert_eq!((picture.x, picture.y, picture.cx, picture.cy), (1, 2, 3, 4));
            }
            other => panic!("expected picture, got {:?}", other),
        }
    }
}
