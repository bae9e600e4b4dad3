//! Domain types for describing a deck and for content read back from a file.

use crate::error::{Error, Result};
use crate::units::Emu;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Deepest paragraph indentation level DrawingML supports (levels 0..=8).
pub const MAX_PARAGRAPH_LEVEL: u8 = 8;

/// Slide layouts available in the default template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// Centered title with a subtitle.
    Title,
    /// Title with a bulleted body placeholder.
    TitleAndContent,
    /// Title only; the rest of the slide is free for pictures.
    TitleOnly,
}

impl Layout {
    /// Layouts in the order they appear in the slide master.
    pub const ALL: [Layout; 3] = [Layout::Title, Layout::TitleAndContent, Layout::TitleOnly];

    /// Index of this layout in the conventional default template
    /// (0 = title, 1 = title and content, 5 = title only).
    pub fn index(self) -> usize {
        match self {
            Self::Title => 0,
            Self::TitleAndContent => 1,
            Self::TitleOnly => 5,
        }
    }

    /// Inverse of [`Layout::index`].
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.index() == index)
    }

    /// 1-based position of this layout's part in the package.
    pub fn part_number(self) -> usize {
        match self {
            Self::Title => 1,
            Self::TitleAndContent => 2,
            Self::TitleOnly => 3,
        }
    }

    /// File name of this layout's part, e.g. `slideLayout2.xml`.
    pub fn part_name(self) -> String {
        format!("slideLayout{}.xml", self.part_number())
    }

    /// Detect the layout from a part name or relationship target.
    pub fn from_part_name(name: &str) -> Option<Self> {
        let file = name.rsplit('/').next().unwrap_or(name);
        Self::ALL.into_iter().find(|l| l.part_name() == file)
    }

    /// Display name written into the layout part.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Title => "Title Slide",
            Self::TitleAndContent => "Title and Content",
            Self::TitleOnly => "Title Only",
        }
    }

    /// Whether the layout has a body (or subtitle) placeholder.
    pub fn has_body(self) -> bool {
        !matches!(self, Self::TitleOnly)
    }
}

/// One paragraph of a text frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub text: String,

    /// Indentation level, 0 for top-level.
    #[serde(default)]
    pub level: u8,

    #[serde(default)]
    pub bold: bool,
}

impl Paragraph {
    /// Top-level paragraph with regular weight.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: 0,
            bold: false,
        }
    }

    /// First-level indented paragraph.
    pub fn bullet(text: impl Into<String>) -> Self {
        Self {
            level: 1,
            ..Self::plain(text)
        }
    }

    /// Top-level bold paragraph.
    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            bold: true,
            ..Self::plain(text)
        }
    }

    /// Paragraph with no text.
    pub fn empty() -> Self {
        Self::plain("")
    }

    /// Set the indentation level.
    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    /// Split text on line feeds into one top-level paragraph per line,
    /// the way assigning a string to a text frame does.
    pub fn lines(text: &str) -> Vec<Self> {
        text.split('\n').map(Self::plain).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A picture to place on a slide, if its source file exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PictureSpec {
    pub path: PathBuf,
    pub left: Emu,
    pub top: Emu,

    /// Rendered height; width follows the image's aspect ratio.
    pub height: Emu,
}

impl PictureSpec {
    pub fn new(path: impl Into<PathBuf>, left: Emu, top: Emu, height: Emu) -> Self {
        Self {
            path: path.into(),
            left,
            top,
            height,
        }
    }
}

/// Specification of a single slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideSpec {
    pub layout: Layout,
    pub title: String,

    /// Body placeholder paragraphs; the subtitle on title slides.
    #[serde(default)]
    pub body: Vec<Paragraph>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<PictureSpec>,
}

impl SlideSpec {
    /// Title slide whose subtitle is split into paragraphs on line feeds.
    pub fn title(title: impl Into<String>, subtitle: &str) -> Self {
        Self {
            layout: Layout::Title,
            title: title.into(),
            body: Paragraph::lines(subtitle),
            picture: None,
        }
    }

    /// Title and content slide.
    pub fn content(title: impl Into<String>, body: Vec<Paragraph>) -> Self {
        Self {
            layout: Layout::TitleAndContent,
            title: title.into(),
            body,
            picture: None,
        }
    }

    /// Title only slide with an optional picture.
    pub fn picture(title: impl Into<String>, picture: Option<PictureSpec>) -> Self {
        Self {
            layout: Layout::TitleOnly,
            title: title.into(),
            body: Vec::new(),
            picture,
        }
    }

    /// Text of every body paragraph, in order.
    pub fn body_lines(&self) -> Vec<&str> {
        self.body.iter().map(|p| p.text.as_str()).collect()
    }
}

/// A complete deck definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    /// Document title stored in the package properties.
    pub title: String,

    /// Slides in presentation order.
    pub slides: Vec<SlideSpec>,
}

impl Deck {
    /// Create an empty deck with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            slides: Vec::new(),
        }
    }

    /// Append a slide.
    pub fn add_slide(&mut self, slide: SlideSpec) {
        self.slides.push(slide);
    }

    /// Parse a deck definition from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let deck: Deck = serde_json::from_str(json)?;
        deck.validate()?;
        Ok(deck)
    }

    /// Serialize the deck definition as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the structural rules every writable deck must follow.
    pub fn validate(&self) -> Result<()> {
        if self.slides.is_empty() {
            return Err(Error::InvalidDeck("deck has no slides".to_string()));
        }

        for (idx, slide) in self.slides.iter().enumerate() {
            let number = idx + 1;

            if !slide.layout.has_body() && !slide.body.is_empty() {
                return Err(Error::InvalidDeck(format!(
                    "slide {}: {:?} layout has no body placeholder",
                    number, slide.layout
                )));
            }

            if slide.picture.is_some() && slide.layout != Layout::TitleOnly {
                return Err(Error::InvalidDeck(format!(
                    "slide {}: pictures are only supported on title only slides",
                    number
                )));
            }

            if let Some(p) = slide.body.iter().find(|p| p.level > MAX_PARAGRAPH_LEVEL) {
                return Err(Error::InvalidDeck(format!(
                    "slide {}: paragraph level {} exceeds {}",
                    number, p.level, MAX_PARAGRAPH_LEVEL
                )));
            }

            if let Some(pic) = &slide.picture {
                if pic.height.get() <= 0 {
                    return Err(Error::InvalidDeck(format!(
                        "slide {}: picture height must be positive",
                        number
                    )));
                }
            }
        }

        Ok(())
    }

    /// Number of slides that request a picture.
    pub fn picture_count(&self) -> usize {
        self.slides.iter().filter(|s| s.picture.is_some()).count()
    }
}

/// A deck read back from a PPTX file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedDeck {
    /// Original filename (without path).
    pub filename: String,

    /// Slides in presentation order.
    pub slides: Vec<ExtractedSlide>,
}

impl ExtractedDeck {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            slides: Vec::new(),
        }
    }

    pub fn add_slide(&mut self, slide: ExtractedSlide) {
        self.slides.push(slide);
    }

    /// Titles of all slides; untitled slides yield an empty string.
    pub fn titles(&self) -> Vec<&str> {
        self.slides
            .iter()
            .map(|s| s.title.as_deref().unwrap_or(""))
            .collect()
    }
}

/// A single slide read back from a file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedSlide {
    /// 1-based slide number.
    pub number: usize,

    /// Layout detected from the slide's relationships.
    pub layout: Option<Layout>,

    /// Text of the title placeholder, paragraphs joined with line feeds.
    pub title: Option<String>,

    /// Paragraphs from every non-title text body.
    pub paragraphs: Vec<Paragraph>,

    pub pictures: Vec<ExtractedPicture>,
}

impl ExtractedSlide {
    /// Create a new slide with the given number.
    pub fn new(number: usize) -> Self {
        Self {
            number,
            ..Default::default()
        }
    }

    /// Body paragraph text, in reading order.
    pub fn body_lines(&self) -> Vec<&str> {
        self.paragraphs.iter().map(|p| p.text.as_str()).collect()
    }
}

/// A picture shape read back from a slide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedPicture {
    /// Package part the picture embeds, e.g. `ppt/media/image1.png`.
    pub target: Option<String>,
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_index_roundtrip() {
        for layout in Layout::ALL {
            assert_eq!(Layout::from_index(layout.index()), Some(layout));
        }
        assert_eq!(Layout::from_index(2), None);
    }

    #[test]
    fn test_layout_from_part_name() {
        assert_eq!(
            Layout::from_part_name("../slideLayouts/slideLayout3.xml"),
            Some(Layout::TitleOnly)
        );
        assert_eq!(Layout::from_part_name("slideLayout1.xml"), Some(Layout::Title));
        assert_eq!(Layout::from_part_name("slideLayout9.xml"), None);
    }

    #[test]
    fn test_paragraph_lines() {
        let paras = Paragraph::lines("First\nSecond");
        assert_eq!(paras.len(), 2);
        assert_eq!(paras[0], Paragraph::plain("First"));
        assert_eq!(paras[1].text, "Second");
        assert_eq!(Paragraph::lines("").len(), 1);
    }

    #[test]
    fn test_paragraph_constructors() {
        assert_eq!(Paragraph::bullet("x").level, 1);
        assert!(Paragraph::bold("x").bold);
        assert!(Paragraph::empty().is_empty());
        assert_eq!(Paragraph::plain("x").with_level(3).level, 3);
    }

    #[test]
    fn test_validate_empty_deck() {
        let deck = Deck::new("Empty");
        assert!(matches!(deck.validate(), Err(Error::InvalidDeck(_))));
    }

    #[test]
    fn test_validate_body_on_title_only() {
        let mut deck = Deck::new("Bad");
        let mut slide = SlideSpec::picture("Pictures", None);
        slide.body.push(Paragraph::plain("not allowed"));
        deck.add_slide(slide);
        assert!(deck.validate().is_err());
    }

    #[test]
    fn test_validate_picture_on_content() {
        let mut deck = Deck::new("Bad");
        let mut slide = SlideSpec::content("Content", vec![]);
        slide.picture = Some(PictureSpec::new(
            "a.png",
            Emu(0),
            Emu(0),
            Emu::from_inches(1.0),
        ));
        deck.add_slide(slide);
        assert!(deck.validate().is_err());
    }

    #[test]
    fn test_validate_level_too_deep() {
        let mut deck = Deck::new("Bad");
        deck.add_slide(SlideSpec::content(
            "Deep",
            vec![Paragraph::plain("x").with_level(9)],
        ));
        assert!(deck.validate().is_err());
    }

    #[test]
    fn test_json_roundtrip_keeps_layout_names() {
        let mut deck = Deck::new("Json");
        deck.add_slide(SlideSpec::title("Hello", "World"));
        let json = deck.to_json().unwrap();
        assert!(json.contains("\"title\""));
        assert!(json.contains("\"layout\": \"title\""));
        assert_eq!(Deck::from_json(&json).unwrap(), deck);
    }

    #[test]
    fn test_json_defaults() {
        let json = r#"{"title":"T","slides":[{"layout":"title_and_content","title":"A","body":[{"text":"x"}]}]}"#;
        let deck = Deck::from_json(json).unwrap();
        assert_eq!(deck.slides[0].body[0], Paragraph::plain("x"));
        assert!(deck.slides[0].picture.is_none());
    }
}
