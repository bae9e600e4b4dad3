//! Core domain types and the project deck definition for building
//! PowerPoint presentations.

pub mod deck;
pub mod error;
pub mod types;
pub mod units;

pub use deck::{default_project_deck, project_deck, DEFAULT_OUTPUT};
pub use error::{Error, Result};
pub use types::{
    Deck, ExtractedDeck, ExtractedPicture, ExtractedSlide, Layout, Paragraph, PictureSpec,
    SlideSpec,
};
pub use units::Emu;
