//! Default presentation template.
//!
//! The parts every deck shares: one slide master, the title, title and
//! content, and title only layouts, an Office theme, and the package-level
//! parts that tie them together. Slide size is 10" x 7.5" (4:3).

use crate::xml::{fmt_err, rel_types, relationships_xml, Relationship, XML_DECLARATION};
use deck_core::{Layout, Result};
use quick_xml::escape::escape;
use std::fmt::Write as FmtWrite;

/// Slide width in EMUs (10 inches).
pub const SLIDE_WIDTH: i64 = 9_144_000;

/// Slide height in EMUs (7.5 inches).
pub const SLIDE_HEIGHT: i64 = 6_858_000;

/// `p:sldMasterId` of the only master; layout ids continue from here.
const MASTER_ID: u64 = 2_147_483_648;

/// First `p:sldId`; PowerPoint reserves values below 256.
pub const FIRST_SLIDE_ID: u32 = 256;

/// Relationship ids in `presentation.xml.rels` before the first slide.
pub const PRESENTATION_FIXED_RELS: usize = 4;

pub mod content_types {
    pub const PRESENTATION: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
    pub const SLIDE: &str = "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
    pub const SLIDE_LAYOUT: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml";
    pub const SLIDE_MASTER: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml";
    pub const THEME: &str = "application/vnd.openxmlformats-officedocument.theme+xml";
    pub const PRES_PROPS: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.presProps+xml";
    pub const TABLE_STYLES: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.tableStyles+xml";
    pub const CORE_PROPERTIES: &str = "application/vnd.openxmlformats-package.core-properties+xml";
    pub const EXTENDED_PROPERTIES: &str =
        "application/vnd.openxmlformats-officedocument.extended-properties+xml";
    pub const RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
}

/// Root element attributes shared by slide, layout and master parts.
pub(crate) const PML_NAMESPACES: &str = concat!(
    r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#,
);

/// Non-visual and geometry properties of a slide's root group shape.
pub(crate) const GROUP_SHAPE_PROPERTIES: &str = concat!(
    "<p:nvGrpSpPr>",
    r#"<p:cNvPr id="1" name=""/>"#,
    "<p:cNvGrpSpPr/>",
    "<p:nvPr/>",
    "</p:nvGrpSpPr>",
    "<p:grpSpPr>",
    "<a:xfrm>",
    r#"<a:off x="0" y="0"/>"#,
    r#"<a:ext cx="0" cy="0"/>"#,
    r#"<a:chOff x="0" y="0"/>"#,
    r#"<a:chExt cx="0" cy="0"/>"#,
    "</a:xfrm>",
    "</p:grpSpPr>",
);

const SLIDE_MASTER_BODY: &str = concat!(
    r#"<p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg><p:spTree>"#,
    "<p:nvGrpSpPr>",
    r#"<p:cNvPr id="1" name=""/>"#,
    "<p:cNvGrpSpPr/><p:nvPr/>",
    "</p:nvGrpSpPr>",
    "<p:grpSpPr>",
    r#"<a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm>"#,
    "</p:grpSpPr>",
    // Title placeholder
    "<p:sp><p:nvSpPr>",
    r#"<p:cNvPr id="2" name="Title Placeholder 1"/>"#,
    r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#,
    r#"<p:nvPr><p:ph type="title"/></p:nvPr>"#,
    "</p:nvSpPr><p:spPr>",
    r#"<a:xfrm><a:off x="457200" y="274638"/><a:ext cx="8229600" cy="1143000"/></a:xfrm>"#,
    r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#,
    "</p:spPr><p:txBody>",
    r#"<a:bodyPr vert="horz" lIns="91440" tIns="45720" rIns="91440" bIns="45720" rtlCol="0" anchor="ctr"><a:normAutofit/></a:bodyPr>"#,
    "<a:lstStyle/>",
    r#"<a:p><a:r><a:rPr lang="en-US"/><a:t>Click to edit Master title style</a:t></a:r><a:endParaRPr lang="en-US"/></a:p>"#,
    "</p:txBody></p:sp>",
    // Body placeholder
    "<p:sp><p:nvSpPr>",
    r#"<p:cNvPr id="3" name="Text Placeholder 2"/>"#,
    r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#,
    r#"<p:nvPr><p:ph type="body" idx="1"/></p:nvPr>"#,
    "</p:nvSpPr><p:spPr>",
    r#"<a:xfrm><a:off x="457200" y="1600200"/><a:ext cx="8229600" cy="4525963"/></a:xfrm>"#,
    r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#,
    "</p:spPr><p:txBody>",
    r#"<a:bodyPr vert="horz" lIns="91440" tIns="45720" rIns="91440" bIns="45720" rtlCol="0"><a:normAutofit/></a:bodyPr>"#,
    "<a:lstStyle/>",
    r#"<a:p><a:pPr lvl="0"/><a:r><a:rPr lang="en-US"/><a:t>Click to edit Master text styles</a:t></a:r></a:p>"#,
    r#"<a:p><a:pPr lvl="1"/><a:r><a:rPr lang="en-US"/><a:t>Second level</a:t></a:r></a:p>"#,
    r#"<a:p><a:pPr lvl="2"/><a:r><a:rPr lang="en-US"/><a:t>Third level</a:t></a:r><a:endParaRPr lang="en-US"/></a:p>"#,
    "</p:txBody></p:sp>",
    "</p:spTree></p:cSld>",
    r#"<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>"#,
);

const SLIDE_MASTER_TEXT_STYLES: &str = concat!(
    "<p:txStyles>",
    "<p:titleStyle>",
    r#"<a:lvl1pPr algn="ctr" defTabSz="914400" rtl="0" eaLnBrk="1" latinLnBrk="0" hangingPunct="1">"#,
    r#"<a:spcBef><a:spcPct val="0"/></a:spcBef><a:buNone/>"#,
    r#"<a:defRPr sz="4400" kern="1200"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill>"#,
    r#"<a:latin typeface="+mj-lt"/><a:ea typeface="+mj-ea"/><a:cs typeface="+mj-cs"/></a:defRPr>"#,
    "</a:lvl1pPr>",
    "</p:titleStyle>",
    "<p:bodyStyle>",
    r#"<a:lvl1pPr marL="342900" indent="-342900" algn="l" defTabSz="914400" rtl="0" eaLnBrk="1" latinLnBrk="0" hangingPunct="1">"#,
    r#"<a:spcBef><a:spcPct val="20000"/></a:spcBef><a:buFont typeface="Arial"/><a:buChar char="&#8226;"/>"#,
    r#"<a:defRPr sz="3200" kern="1200"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill>"#,
    r#"<a:latin typeface="+mn-lt"/><a:ea typeface="+mn-ea"/><a:cs typeface="+mn-cs"/></a:defRPr>"#,
    "</a:lvl1pPr>",
    r#"<a:lvl2pPr marL="742950" indent="-285750" algn="l" defTabSz="914400" rtl="0" eaLnBrk="1" latinLnBrk="0" hangingPunct="1">"#,
    r#"<a:spcBef><a:spcPct val="20000"/></a:spcBef><a:buFont typeface="Arial"/><a:buChar char="&#8211;"/>"#,
    r#"<a:defRPr sz="2800" kern="1200"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill>"#,
    r#"<a:latin typeface="+mn-lt"/><a:ea typeface="+mn-ea"/><a:cs typeface="+mn-cs"/></a:defRPr>"#,
    "</a:lvl2pPr>",
    r#"<a:lvl3pPr marL="1143000" indent="-228600" algn="l" defTabSz="914400" rtl="0" eaLnBrk="1" latinLnBrk="0" hangingPunct="1">"#,
    r#"<a:spcBef><a:spcPct val="20000"/></a:spcBef><a:buFont typeface="Arial"/><a:buChar char="&#8226;"/>"#,
    r#"<a:defRPr sz="2400" kern="1200"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill>"#,
    r#"<a:latin typeface="+mn-lt"/><a:ea typeface="+mn-ea"/><a:cs typeface="+mn-cs"/></a:defRPr>"#,
    "</a:lvl3pPr>",
    "</p:bodyStyle>",
    "<p:otherStyle>",
    r#"<a:defPPr><a:defRPr lang="en-US"/></a:defPPr>"#,
    r#"<a:lvl1pPr marL="0" algn="l" defTabSz="914400" rtl="0" eaLnBrk="1" latinLnBrk="0" hangingPunct="1">"#,
    r#"<a:defRPr sz="1800" kern="1200"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill>"#,
    r#"<a:latin typeface="+mn-lt"/><a:ea typeface="+mn-ea"/><a:cs typeface="+mn-cs"/></a:defRPr>"#,
    "</a:lvl1pPr>",
    "</p:otherStyle>",
    "</p:txStyles>",
);

/// Office theme: colors, Calibri fonts and flat format styles.
pub const THEME_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme">"#,
    "<a:themeElements>",
    r#"<a:clrScheme name="Office">"#,
    r#"<a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>"#,
    r#"<a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>"#,
    r#"<a:dk2><a:srgbClr val="1F497D"/></a:dk2>"#,
    r#"<a:lt2><a:srgbClr val="EEECE1"/></a:lt2>"#,
    r#"<a:accent1><a:srgbClr val="4F81BD"/></a:accent1>"#,
    r#"<a:accent2><a:srgbClr val="C0504D"/></a:accent2>"#,
    r#"<a:accent3><a:srgbClr val="9BBB59"/></a:accent3>"#,
    r#"<a:accent4><a:srgbClr val="8064A2"/></a:accent4>"#,
    r#"<a:accent5><a:srgbClr val="4BACC6"/></a:accent5>"#,
    r#"<a:accent6><a:srgbClr val="F79646"/></a:accent6>"#,
    r#"<a:hlink><a:srgbClr val="0000FF"/></a:hlink>"#,
    r#"<a:folHlink><a:srgbClr val="800080"/></a:folHlink>"#,
    "</a:clrScheme>",
    r#"<a:fontScheme name="Office">"#,
    r#"<a:majorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont>"#,
    r#"<a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont>"#,
    "</a:fontScheme>",
    r#"<a:fmtScheme name="Office">"#,
    "<a:fillStyleLst>",
    r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#,
    r#"<a:solidFill><a:schemeClr val="phClr"><a:tint val="50000"/></a:schemeClr></a:solidFill>"#,
    r#"<a:solidFill><a:schemeClr val="phClr"><a:shade val="80000"/></a:schemeClr></a:solidFill>"#,
    "</a:fillStyleLst>",
    "<a:lnStyleLst>",
    r#"<a:ln w="9525" cap="flat" cmpd="sng" algn="ctr"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:prstDash val="solid"/></a:ln>"#,
    r#"<a:ln w="25400" cap="flat" cmpd="sng" algn="ctr"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:prstDash val="solid"/></a:ln>"#,
    r#"<a:ln w="38100" cap="flat" cmpd="sng" algn="ctr"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:prstDash val="solid"/></a:ln>"#,
    "</a:lnStyleLst>",
    "<a:effectStyleLst>",
    "<a:effectStyle><a:effectLst/></a:effectStyle>",
    "<a:effectStyle><a:effectLst/></a:effectStyle>",
    "<a:effectStyle><a:effectLst/></a:effectStyle>",
    "</a:effectStyleLst>",
    "<a:bgFillStyleLst>",
    r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#,
    r#"<a:solidFill><a:schemeClr val="phClr"><a:tint val="95000"/></a:schemeClr></a:solidFill>"#,
    r#"<a:solidFill><a:schemeClr val="phClr"><a:shade val="90000"/></a:schemeClr></a:solidFill>"#,
    "</a:bgFillStyleLst>",
    "</a:fmtScheme>",
    "</a:themeElements>",
    "<a:objectDefaults/>",
    "<a:extraClrSchemeLst/>",
    "</a:theme>",
);

pub const PRES_PROPS_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<p:presentationPr xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"/>"#,
);

pub const TABLE_STYLES_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<a:tblStyleLst xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"def="{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}"/>"#,
);

/// Generate the slide master, listing every layout.
pub fn slide_master_xml() -> Result<String> {
    let mut xml = String::with_capacity(8192);
    xml.push_str(XML_DECLARATION);
    write!(xml, "<p:sldMaster {}>", PML_NAMESPACES).map_err(fmt_err)?;
    xml.push_str(SLIDE_MASTER_BODY);

    xml.push_str("<p:sldLayoutIdLst>");
    for layout in Layout::ALL {
        write!(
            xml,
            r#"<p:sldLayoutId id="{}" r:id="rId{}"/>"#,
            MASTER_ID + layout.part_number() as u64,
            layout.part_number()
        )
        .map_err(fmt_err)?;
    }
    xml.push_str("</p:sldLayoutIdLst>");

    xml.push_str(SLIDE_MASTER_TEXT_STYLES);
    xml.push_str("</p:sldMaster>");
    Ok(xml)
}

/// Relationships of the slide master: its layouts, then the theme.
pub fn slide_master_rels_xml() -> Result<String> {
    let mut rels: Vec<Relationship> = Layout::ALL
        .into_iter()
        .map(|l| {
            Relationship::new(
                l.part_number(),
                rel_types::SLIDE_LAYOUT,
                format!("../slideLayouts/{}", l.part_name()),
            )
        })
        .collect();
    rels.push(Relationship::new(
        Layout::ALL.len() + 1,
        rel_types::THEME,
        "../theme/theme1.xml",
    ));
    relationships_xml(&rels)
}

/// Write one layout placeholder shape with prompt text.
fn write_layout_placeholder(
    xml: &mut String,
    id: u32,
    name: &str,
    ph: &str,
    xfrm: Option<(i64, i64, i64, i64)>,
    lst_style: &str,
    prompt: &str,
) -> Result<()> {
    xml.push_str("<p:sp><p:nvSpPr>");
    write!(xml, r#"<p:cNvPr id="{}" name="{}"/>"#, id, name).map_err(fmt_err)?;
    xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#);
    write!(xml, "<p:nvPr>{}</p:nvPr>", ph).map_err(fmt_err)?;
    xml.push_str("</p:nvSpPr>");

    match xfrm {
        Some((x, y, cx, cy)) => write!(
            xml,
            r#"<p:spPr><a:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></a:xfrm></p:spPr>"#,
            x, y, cx, cy
        )
        .map_err(fmt_err)?,
        None => xml.push_str("<p:spPr/>"),
    }

    xml.push_str("<p:txBody><a:bodyPr/>");
    xml.push_str(lst_style);
    write!(
        xml,
        r#"<a:p><a:r><a:rPr lang="en-US"/><a:t>{}</a:t></a:r><a:endParaRPr lang="en-US"/></a:p>"#,
        escape(prompt)
    )
    .map_err(fmt_err)?;
    xml.push_str("</p:txBody></p:sp>");
    Ok(())
}

/// Generate the XML of a slide layout.
pub fn slide_layout_xml(layout: Layout) -> Result<String> {
    let layout_type = match layout {
        Layout::Title => "title",
        Layout::TitleAndContent => "obj",
        Layout::TitleOnly => "titleOnly",
    };

    let mut xml = String::with_capacity(2048);
    xml.push_str(XML_DECLARATION);
    write!(
        xml,
        r#"<p:sldLayout {} type="{}" preserve="1">"#,
        PML_NAMESPACES, layout_type
    )
    .map_err(fmt_err)?;
    write!(xml, r#"<p:cSld name="{}"><p:spTree>"#, layout.display_name()).map_err(fmt_err)?;
    xml.push_str(GROUP_SHAPE_PROPERTIES);

    match layout {
        Layout::Title => {
            write_layout_placeholder(
                &mut xml,
                2,
                "Title 1",
                r#"<p:ph type="ctrTitle"/>"#,
                Some((685_800, 2_130_425, 7_772_400, 1_470_025)),
                "<a:lstStyle/>",
                "Click to edit Master title style",
            )?;
            write_layout_placeholder(
                &mut xml,
                3,
                "Subtitle 2",
                r#"<p:ph type="subTitle" idx="1"/>"#,
                Some((1_371_600, 3_886_200, 6_400_800, 1_752_600)),
                concat!(
                    "<a:lstStyle>",
                    r#"<a:lvl1pPr marL="0" indent="0" algn="ctr"><a:buNone/>"#,
                    r#"<a:defRPr><a:solidFill><a:schemeClr val="tx1"><a:tint val="75000"/></a:schemeClr></a:solidFill></a:defRPr>"#,
                    "</a:lvl1pPr>",
                    "</a:lstStyle>",
                ),
                "Click to edit Master subtitle style",
            )?;
        }
        Layout::TitleAndContent => {
            write_layout_placeholder(
                &mut xml,
                2,
                "Title 1",
                r#"<p:ph type="title"/>"#,
                None,
                "<a:lstStyle/>",
                "Click to edit Master title style",
            )?;
            write_layout_placeholder(
                &mut xml,
                3,
                "Content Placeholder 2",
                r#"<p:ph idx="1"/>"#,
                None,
                "<a:lstStyle/>",
                "Click to edit Master text styles",
            )?;
        }
        Layout::TitleOnly => {
            write_layout_placeholder(
                &mut xml,
                2,
                "Title 1",
                r#"<p:ph type="title"/>"#,
                None,
                "<a:lstStyle/>",
                "Click to edit Master title style",
            )?;
        }
    }

    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
    xml.push_str("</p:sldLayout>");
    Ok(xml)
}

/// Every layout points back at the master.
pub fn slide_layout_rels_xml() -> Result<String> {
    relationships_xml(&[Relationship::new(
        1,
        rel_types::SLIDE_MASTER,
        "../slideMasters/slideMaster1.xml",
    )])
}

/// Generate `[Content_Types].xml` for a deck.
///
/// `image_extensions` lists `(extension, mime)` pairs for embedded media.
pub fn content_types_xml(slide_count: usize, image_extensions: &[(&str, &str)]) -> Result<String> {
    let mut xml = String::with_capacity(2048 + slide_count * 160);
    xml.push_str(XML_DECLARATION);
    xml.push_str(
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    );

    write!(
        xml,
        r#"<Default Extension="rels" ContentType="{}"/>"#,
        content_types::RELATIONSHIPS
    )
    .map_err(fmt_err)?;
    xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);
    for (ext, mime) in image_extensions {
        write!(xml, r#"<Default Extension="{}" ContentType="{}"/>"#, ext, mime).map_err(fmt_err)?;
    }

    let mut overrides: Vec<(String, &str)> = vec![
        ("/ppt/presentation.xml".to_string(), content_types::PRESENTATION),
        ("/ppt/slideMasters/slideMaster1.xml".to_string(), content_types::SLIDE_MASTER),
        ("/ppt/theme/theme1.xml".to_string(), content_types::THEME),
        ("/ppt/presProps.xml".to_string(), content_types::PRES_PROPS),
        ("/ppt/tableStyles.xml".to_string(), content_types::TABLE_STYLES),
        ("/docProps/core.xml".to_string(), content_types::CORE_PROPERTIES),
        ("/docProps/app.xml".to_string(), content_types::EXTENDED_PROPERTIES),
    ];
    for layout in Layout::ALL {
        overrides.push((
            format!("/ppt/slideLayouts/{}", layout.part_name()),
            content_types::SLIDE_LAYOUT,
        ));
    }
    for n in 1..=slide_count {
        overrides.push((format!("/ppt/slides/slide{}.xml", n), content_types::SLIDE));
    }

    for (part, content_type) in &overrides {
        write!(
            xml,
            r#"<Override PartName="{}" ContentType="{}"/>"#,
            part, content_type
        )
        .map_err(fmt_err)?;
    }

    xml.push_str("</Types>");
    Ok(xml)
}

/// Package-level relationships in `_rels/.rels`.
pub fn package_rels_xml() -> Result<String> {
    relationships_xml(&[
        Relationship::new(1, rel_types::OFFICE_DOCUMENT, "ppt/presentation.xml"),
        Relationship::new(2, rel_types::CORE_PROPERTIES, "docProps/core.xml"),
        Relationship::new(3, rel_types::EXTENDED_PROPERTIES, "docProps/app.xml"),
    ])
}

/// Relationship id of the n-th (1-based) slide in `presentation.xml.rels`.
pub fn slide_rel_id(slide_number: usize) -> String {
    format!("rId{}", PRESENTATION_FIXED_RELS + slide_number)
}

/// Relationships of `presentation.xml`: master, theme, properties, then slides.
pub fn presentation_rels_xml(slide_count: usize) -> Result<String> {
    let mut rels = vec![
        Relationship::new(1, rel_types::SLIDE_MASTER, "slideMasters/slideMaster1.xml"),
        Relationship::new(2, rel_types::THEME, "theme/theme1.xml"),
        Relationship::new(3, rel_types::PRES_PROPS, "presProps.xml"),
        Relationship::new(4, rel_types::TABLE_STYLES, "tableStyles.xml"),
    ];
    for n in 1..=slide_count {
        rels.push(Relationship::new(
            PRESENTATION_FIXED_RELS + n,
            rel_types::SLIDE,
            format!("slides/slide{}.xml", n),
        ));
    }
    relationships_xml(&rels)
}

/// Generate `presentation.xml` for the given number of slides.
pub fn presentation_xml(slide_count: usize) -> Result<String> {
    let mut xml = String::with_capacity(1024 + slide_count * 48);
    xml.push_str(XML_DECLARATION);
    write!(xml, r#"<p:presentation {} saveSubsetFonts="1">"#, PML_NAMESPACES).map_err(fmt_err)?;

    xml.push_str("<p:sldMasterIdLst>");
    write!(xml, r#"<p:sldMasterId id="{}" r:id="rId1"/>"#, MASTER_ID).map_err(fmt_err)?;
    xml.push_str("</p:sldMasterIdLst>");

    if slide_count > 0 {
        xml.push_str("<p:sldIdLst>");
        for n in 1..=slide_count {
            write!(
                xml,
                r#"<p:sldId id="{}" r:id="{}"/>"#,
                FIRST_SLIDE_ID as usize + n - 1,
                slide_rel_id(n)
            )
            .map_err(fmt_err)?;
        }
        xml.push_str("</p:sldIdLst>");
    }

    write!(
        xml,
        r#"<p:sldSz cx="{}" cy="{}" type="screen4x3"/>"#,
        SLIDE_WIDTH, SLIDE_HEIGHT
    )
    .map_err(fmt_err)?;
    xml.push_str(r#"<p:notesSz cx="6858000" cy="9144000"/>"#);
    xml.push_str("</p:presentation>");
    Ok(xml)
}

/// Core document properties.
pub fn core_properties_xml(title: &str) -> Result<String> {
    let mut xml = String::with_capacity(512);
    xml.push_str(XML_DECLARATION);
    xml.push_str(concat!(
        r#"<cp:coreProperties "#,
        r#"xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
        r#"xmlns:dc="http://purl.org/dc/elements/1.1/" "#,
        r#"xmlns:dcterms="http://purl.org/dc/terms/" "#,
        r#"xmlns:dcmitype="http://purl.org/dc/dcmitype/" "#,
        r#"xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
    ));
    write!(xml, "<dc:title>{}</dc:title>", escape(title)).map_err(fmt_err)?;
    write!(xml, "<cp:lastModifiedBy>{}</cp:lastModifiedBy>", env!("CARGO_PKG_NAME"))
        .map_err(fmt_err)?;
    xml.push_str("<cp:revision>1</cp:revision>");
    xml.push_str("</cp:coreProperties>");
    Ok(xml)
}

/// Extended (application) document properties.
pub fn app_properties_xml(slide_count: usize) -> Result<String> {
    let mut xml = String::with_capacity(512);
    xml.push_str(XML_DECLARATION);
    xml.push_str(concat!(
        r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" "#,
        r#"xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#,
    ));
    write!(xml, "<Application>{}</Application>", env!("CARGO_PKG_NAME")).map_err(fmt_err)?;
    xml.push_str("<PresentationFormat>On-screen Show (4:3)</PresentationFormat>");
    write!(xml, "<Slides>{}</Slides>", slide_count).map_err(fmt_err)?;
    xml.push_str("</Properties>");
    Ok(xml)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_master_lists_every_layout() {
        let xml = slide_master_xml().unwrap();
        assert!(xml.contains(r#"<p:sldLayoutId id="2147483649" r:id="rId1"/>"#));
        assert!(xml.contains(r#"<p:sldLayoutId id="2147483651" r:id="rId3"/>"#));
        assert!(xml.contains("<p:txStyles>"));
        assert!(xml.ends_with("</p:sldMaster>"));

        let rels = slide_master_rels_xml().unwrap();
        assert!(rels.contains("../slideLayouts/slideLayout3.xml"));
        assert!(rels.contains(r#"Id="rId4""#));
        assert!(rels.contains("../theme/theme1.xml"));
    }

    #[test]
    fn test_layout_placeholders() {
        let title = slide_layout_xml(Layout::Title).unwrap();
        assert!(title.contains(r#"type="title" preserve="1""#));
        assert!(title.contains(r#"<p:ph type="ctrTitle"/>"#));
        assert!(title.contains(r#"<p:ph type="subTitle" idx="1"/>"#));

        let content = slide_layout_xml(Layout::TitleAndContent).unwrap();
        assert!(content.contains(r#"name="Title and Content""#));
        assert!(content.contains(r#"<p:ph idx="1"/>"#));

        let title_only = slide_layout_xml(Layout::TitleOnly).unwrap();
        assert!(title_only.contains(r#"type="titleOnly""#));
        assert!(!title_only.contains(r#"idx="1""#));
    }

    #[test]
    fn test_content_types() {
        let xml = content_types_xml(2, &[("png", "image/png")]).unwrap();
        assert!(xml.contains(r#"<Default Extension="png" ContentType="image/png"/>"#));
        assert!(xml.contains(r#"PartName="/ppt/slides/slide2.xml""#));
        assert!(!xml.contains("slide3.xml\""));
        assert!(xml.contains(r#"PartName="/ppt/slideLayouts/slideLayout1.xml""#));
    }

    #[test]
    fn test_presentation_ids_follow_rels() {
        let xml = presentation_xml(3).unwrap();
        assert!(xml.contains(r#"<p:sldId id="256" r:id="rId5"/>"#));
        assert!(xml.contains(r#"<p:sldId id="258" r:id="rId7"/>"#));
        assert!(xml.contains(r#"<p:sldSz cx="9144000" cy="6858000""#));

        let rels = presentation_rels_xml(3).unwrap();
        assert!(rels.contains(r#"<Relationship Id="rId7" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide3.xml"/>"#));
    }

    #[test]
    fn test_presentation_without_slides() {
        let xml = presentation_xml(0).unwrap();
        assert!(!xml.contains("<p:sldIdLst>"));
    }

    #[test]
    fn test_doc_props() {
        let core = core_properties_xml("Q&A").unwrap();
        assert!(core.contains("<dc:title>Q&amp;A</dc:title>"));
        let app = app_properties_xml(8).unwrap();
        assert!(app.contains("<Slides>8</Slides>"));
    }
}
