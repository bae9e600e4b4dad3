//! PPTX package writer.

use crate::image::Picture;
use crate::slide::SlidePart;
use crate::template;
use deck_core::{Deck, Error, Layout, Result};
use std::io::{Cursor, Seek, Write};
use std::path::Path;
use zip::write::FileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Summary of a written deck.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteReport {
    pub slides: usize,
    pub pictures_embedded: usize,

    /// Pictures whose source file did not exist.
    pub pictures_skipped: usize,
}

/// Writer for PPTX (Office Open XML) files.
pub struct PptxWriter {
    options: FileOptions,
}

impl PptxWriter {
    /// Create a new PPTX writer.
    pub fn new() -> Self {
        Self {
            options: FileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .last_modified_time(DateTime::default()),
        }
    }

    /// Write a deck to a file, replacing it if it exists.
    ///
    /// The package is built in memory first; the file is left untouched
    /// when the deck is invalid or a picture cannot be loaded.
    pub fn save<P: AsRef<Path>>(&self, deck: &Deck, path: P) -> Result<WriteReport> {
        let path = path.as_ref();
        let mut buf = Cursor::new(Vec::new());
        let report = self.write(deck, &mut buf)?;
        std::fs::write(path, buf.into_inner())?;

        log::info!(
            "Saved {} slides ({} pictures) to {}",
            report.slides,
            report.pictures_embedded,
            path.display()
        );
        Ok(report)
    }

    /// Write a deck as a PPTX package.
    pub fn write<W: Write + Seek>(&self, deck: &Deck, writer: W) -> Result<WriteReport> {
        deck.validate()?;

        let slides = self.prepare_slides(deck)?;
        let embedded = slides.iter().filter(|s| s.picture.is_some()).count();
        let report = WriteReport {
            slides: slides.len(),
            pictures_embedded: embedded,
            pictures_skipped: deck.picture_count() - embedded,
        };

        let mut zip = ZipWriter::new(writer);
        let count = slides.len();

        // Content types and package relationships go first
        let mut image_types: Vec<(&str, &str)> = Vec::new();
        for picture in slides.iter().filter_map(|s| s.picture.as_ref()) {
            let entry = (picture.format.extension(), picture.format.mime_type());
            if !image_types.contains(&entry) {
                image_types.push(entry);
            }
        }
        self.write_part(
            &mut zip,
            "[Content_Types].xml",
            template::content_types_xml(count, &image_types)?.as_bytes(),
        )?;
        self.write_part(&mut zip, "_rels/.rels", template::package_rels_xml()?.as_bytes())?;

        self.write_part(
            &mut zip,
            "docProps/core.xml",
            template::core_properties_xml(&deck.title)?.as_bytes(),
        )?;
        self.write_part(
            &mut zip,
            "docProps/app.xml",
            template::app_properties_xml(count)?.as_bytes(),
        )?;

        self.write_part(
            &mut zip,
            "ppt/presentation.xml",
            template::presentation_xml(count)?.as_bytes(),
        )?;
        self.write_part(
            &mut zip,
            "ppt/_rels/presentation.xml.rels",
            template::presentation_rels_xml(count)?.as_bytes(),
        )?;
        self.write_part(&mut zip, "ppt/presProps.xml", template::PRES_PROPS_XML.as_bytes())?;
        self.write_part(&mut zip, "ppt/tableStyles.xml", template::TABLE_STYLES_XML.as_bytes())?;
        self.write_part(&mut zip, "ppt/theme/theme1.xml", template::THEME_XML.as_bytes())?;

        self.write_part(
            &mut zip,
            "ppt/slideMasters/slideMaster1.xml",
            template::slide_master_xml()?.as_bytes(),
        )?;
        self.write_part(
            &mut zip,
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            template::slide_master_rels_xml()?.as_bytes(),
        )?;

        let layout_rels = template::slide_layout_rels_xml()?;
        for layout in Layout::ALL {
            let name = layout.part_name();
            self.write_part(
                &mut zip,
                &format!("ppt/slideLayouts/{}", name),
                template::slide_layout_xml(layout)?.as_bytes(),
            )?;
            self.write_part(
                &mut zip,
                &format!("ppt/slideLayouts/_rels/{}.rels", name),
                layout_rels.as_bytes(),
            )?;
        }

        for (idx, slide) in slides.iter().enumerate() {
            let number = idx + 1;
            self.write_part(
                &mut zip,
                &format!("ppt/slides/slide{}.xml", number),
                slide.to_xml()?.as_bytes(),
            )?;
            self.write_part(
                &mut zip,
                &format!("ppt/slides/_rels/slide{}.xml.rels", number),
                slide.rels_xml()?.as_bytes(),
            )?;

            if let (Some(picture), Some(name)) = (&slide.picture, &slide.media_name) {
                // Images are already compressed
                let stored = self.options.compression_method(CompressionMethod::Stored);
                zip.start_file(format!("ppt/media/{}", name), stored)
                    .map_err(|e| Error::ZipError(format!("Failed to add '{}': {}", name, e)))?;
                zip.write_all(&picture.data)?;
            }
        }

        zip.finish()
            .map_err(|e| Error::ZipError(format!("Failed to finish archive: {}", e)))?;

        Ok(report)
    }

    /// Pair every slide spec with its loaded picture and media part name.
    fn prepare_slides<'a>(&self, deck: &'a Deck) -> Result<Vec<SlidePart<'a>>> {
        let mut slides = Vec::with_capacity(deck.slides.len());
        let mut media_count = 0;

        for spec in &deck.slides {
            let mut part = SlidePart::new(spec);

            if let Some(picture_spec) = &spec.picture {
                if let Some(picture) = Picture::load(picture_spec)? {
                    media_count += 1;
                    let name = format!("image{}.{}", media_count, picture.format.extension());
                    part = part.with_picture(picture, name);
                }
            }

            slides.push(part);
        }

        Ok(slides)
    }

    /// Add one deflated part to the archive.
    fn write_part<W: Write + Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        name: &str,
        content: &[u8],
    ) -> Result<()> {
        log::debug!("Writing part {} ({} bytes)", name, content.len());
        zip.start_file(name, self.options)
            .map_err(|e| Error::ZipError(format!("Failed to add '{}': {}", name, e)))?;
        zip.write_all(content)?;
        Ok(())
    }
}

impl Default for PptxWriter {
    fn default() -> Self {
        Self::new()
    }
}
