//! PPTX (Office Open XML) backend for slide decks.
//!
//! Writes a [`deck_core::Deck`] as a .pptx package (a ZIP archive of XML
//! parts built on a default template) and reads written packages back.

pub mod image;
pub mod parser;
pub mod slide;
pub mod template;
pub mod writer;
mod xml;

pub use image::{ImageFormat, Picture};
pub use parser::PptxParser;
pub use writer::{PptxWriter, WriteReport};
