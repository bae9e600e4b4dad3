//! Slide part generation.

use crate::image::Picture;
use crate::template::{GROUP_SHAPE_PROPERTIES, PML_NAMESPACES};
use crate::xml::{fmt_err, rel_types, relationships_xml, Relationship, XML_DECLARATION};
use deck_core::{Layout, Paragraph, Result, SlideSpec};
use quick_xml::escape::escape;
use std::fmt::Write as FmtWrite;

/// A slide ready to be written: its spec plus the picture, if one was loaded.
#[derive(Debug)]
pub struct SlidePart<'a> {
    pub spec: &'a SlideSpec,
    pub picture: Option<Picture>,

    /// Media part name of the picture, e.g. `image1.png`.
    pub media_name: Option<String>,
}

impl<'a> SlidePart<'a> {
    pub fn new(spec: &'a SlideSpec) -> Self {
        Self {
            spec,
            picture: None,
            media_name: None,
        }
    }

    /// Attach a loaded picture stored under the given media part name.
    pub fn with_picture(mut self, picture: Picture, media_name: String) -> Self {
        self.picture = Some(picture);
        self.media_name = Some(media_name);
        self
    }

    /// Relationships of this slide: its layout first, then the image.
    pub fn rels_xml(&self) -> Result<String> {
        let mut rels = vec![Relationship::new(
            1,
            rel_types::SLIDE_LAYOUT,
            format!("../slideLayouts/{}", self.spec.layout.part_name()),
        )];
        if let Some(name) = &self.media_name {
            rels.push(Relationship::new(2, rel_types::IMAGE, format!("../media/{}", name)));
        }
        relationships_xml(&rels)
    }

    /// Generate the slide XML.
    pub fn to_xml(&self) -> Result<String> {
        let spec = self.spec;
        let mut xml = String::with_capacity(4096);

        xml.push_str(XML_DECLARATION);
        write!(xml, "<p:sld {}>", PML_NAMESPACES).map_err(fmt_err)?;
        xml.push_str("<p:cSld><p:spTree>");
        xml.push_str(GROUP_SHAPE_PROPERTIES);

        // IDs: 1=group, 2=title, 3=body or picture
        let title_ph = match spec.layout {
            Layout::Title => r#"<p:ph type="ctrTitle"/>"#,
            Layout::TitleAndContent | Layout::TitleOnly => r#"<p:ph type="title"/>"#,
        };
        write_placeholder(
            &mut xml,
            2,
            "Title 1",
            title_ph,
            &Paragraph::lines(&spec.title),
        )?;

        match spec.layout {
            Layout::Title => write_placeholder(
                &mut xml,
                3,
                "Subtitle 2",
                r#"<p:ph type="subTitle" idx="1"/>"#,
                &spec.body,
            )?,
            Layout::TitleAndContent => write_placeholder(
                &mut xml,
                3,
                "Content Placeholder 2",
                r#"<p:ph idx="1"/>"#,
                &spec.body,
            )?,
            Layout::TitleOnly => {
                if let Some(picture) = &self.picture {
                    write_picture(&mut xml, 3, picture, "rId2")?;
                }
            }
        }

        xml.push_str("</p:spTree></p:cSld>");
        xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
        xml.push_str("</p:sld>");

        Ok(xml)
    }
}

/// Write a placeholder shape. Geometry is inherited from the layout.
fn write_placeholder(
    xml: &mut String,
    id: u32,
    name: &str,
    ph: &str,
    paragraphs: &[Paragraph],
) -> Result<()> {
    xml.push_str("<p:sp><p:nvSpPr>");
    write!(xml, r#"<p:cNvPr id="{}" name="{}"/>"#, id, name).map_err(fmt_err)?;
    xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#);
    write!(xml, "<p:nvPr>{}</p:nvPr>", ph).map_err(fmt_err)?;
    xml.push_str("</p:nvSpPr>");
    xml.push_str("<p:spPr/>");

    xml.push_str("<p:txBody><a:bodyPr/><a:lstStyle/>");
    if paragraphs.is_empty() {
        xml.push_str("<a:p/>");
    }
    for paragraph in paragraphs {
        write_paragraph(xml, paragraph)?;
    }
    xml.push_str("</p:txBody></p:sp>");
    Ok(())
}

fn write_paragraph(xml: &mut String, paragraph: &Paragraph) -> Result<()> {
    xml.push_str("<a:p>");
    if paragraph.level > 0 {
        write!(xml, r#"<a:pPr lvl="{}"/>"#, paragraph.level).map_err(fmt_err)?;
    }

    let bold = if paragraph.bold { r#" b="1""# } else { "" };
    if paragraph.is_empty() {
        write!(xml, r#"<a:endParaRPr lang="en-US" dirty="0"{}/>"#, bold).map_err(fmt_err)?;
    } else {
        write!(
            xml,
            r#"<a:r><a:rPr lang="en-US" dirty="0"{}/><a:t>{}</a:t></a:r>"#,
            bold,
            escape(&paragraph.text)
        )
        .map_err(fmt_err)?;
    }

    xml.push_str("</a:p>");
    Ok(())
}

fn write_picture(xml: &mut String, id: u32, picture: &Picture, rel_id: &str) -> Result<()> {
    xml.push_str("<p:pic><p:nvPicPr>");
    write!(
        xml,
        r#"<p:cNvPr id="{}" name="Picture {}" descr="{}"/>"#,
        id,
        id - 1,
        escape(&picture.description)
    )
    .map_err(fmt_err)?;
    xml.push_str(r#"<p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr>"#);
    xml.push_str("<p:nvPr/>");
    xml.push_str("</p:nvPicPr>");

    xml.push_str("<p:blipFill>");
    write!(xml, r#"<a:blip r:embed="{}"/>"#, rel_id).map_err(fmt_err)?;
    xml.push_str("<a:stretch><a:fillRect/></a:stretch>");
    xml.push_str("</p:blipFill>");

    xml.push_str("<p:spPr><a:xfrm>");
    write!(
        xml,
        r#"<a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/>"#,
        picture.left.get(),
        picture.top.get(),
        picture.width.get(),
        picture.height.get()
    )
    .map_err(fmt_err)?;
    xml.push_str("</a:xfrm>");
    xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
    xml.push_str("</p:spPr>");
    xml.push_str("</p:pic>");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::tests::png_bytes;
    use deck_core::{Emu, PictureSpec};

    #[test]
    fn test_title_slide_placeholders() {
        let spec = SlideSpec::title("Thank You!", "Line one\nLine two");
        let xml = SlidePart::new(&spec).to_xml().unwrap();
        assert!(xml.contains(r#"<p:ph type="ctrTitle"/>"#));
        assert!(xml.contains(r#"<p:ph type="subTitle" idx="1"/>"#));
        assert!(xml.contains("<a:t>Thank You!</a:t>"));
        assert!(xml.contains("<a:t>Line one</a:t></a:r></a:p><a:p>"));
        assert!(xml.contains("<a:t>Line two</a:t>"));
    }

    #[test]
    fn test_levels_bold_and_escaping() {
        let spec = SlideSpec::content(
            "Backend & Auth",
            vec![
                Paragraph::empty(),
                Paragraph::bold("Bold"),
                Paragraph::bullet("• Child"),
            ],
        );
        let xml = SlidePart::new(&spec).to_xml().unwrap();
        assert!(xml.contains("<a:t>Backend &amp; Auth</a:t>"));
        assert!(xml.contains(r#"<a:p><a:endParaRPr lang="en-US" dirty="0"/></a:p>"#));
        assert!(xml.contains(r#"<a:rPr lang="en-US" dirty="0" b="1"/><a:t>Bold</a:t>"#));
        assert!(xml.contains(r#"<a:pPr lvl="1"/><a:r><a:rPr lang="en-US" dirty="0"/><a:t>• Child</a:t>"#));
        assert!(xml.contains(r#"<p:ph idx="1"/>"#));
    }

    #[test]
    fn test_title_only_without_picture() {
        let spec = SlideSpec::picture("Screens", None);
        let part = SlidePart::new(&spec);
        let xml = part.to_xml().unwrap();
        assert!(!xml.contains("<p:pic>"));
        assert!(!xml.contains("idx=\"1\""));

        let rels = part.rels_xml().unwrap();
        assert!(rels.contains("../slideLayouts/slideLayout3.xml"));
        assert!(!rels.contains("media"));
    }

    #[test]
    fn test_picture_shape() {
        let pic_spec = PictureSpec::new(
            "shot.png",
            Emu::from_inches(1.0),
            Emu::from_inches(1.5),
            Emu::from_inches(5.0),
        );
        let picture = Picture::from_bytes(png_bytes(200, 100), &pic_spec, "shot.png".into()).unwrap();
        let spec = SlideSpec::picture("Screens", Some(pic_spec));
        let part = SlidePart::new(&spec).with_picture(picture, "image1.png".to_string());

        let xml = part.to_xml().unwrap();
        assert!(xml.contains(r#"<a:blip r:embed="rId2"/>"#));
        assert!(xml.contains(r#"<a:off x="914400" y="1371600"/><a:ext cx="9144000" cy="4572000"/>"#));
        assert!(xml.contains(r#"descr="shot.png""#));

        let rels = part.rels_xml().unwrap();
        assert!(rels.contains(r#"Target="../media/image1.png""#));
    }
}
