//! The Mini SaaS Task Manager project deck.
//!
//! Eight slides: a title slide, four text slides, two screenshot slides and a
//! closing slide. Screenshots are only placed when their files exist.

use crate::types::{Deck, Paragraph, PictureSpec, SlideSpec};
use crate::units::Emu;
use std::path::Path;

/// File name the deck is saved under by default.
pub const DEFAULT_OUTPUT: &str = "Mini_SaaS_Project_Presentation.pptx";

/// Light mode dashboard mockup.
pub const DEFAULT_LIGHT_IMAGE: &str = "C:/Users/Ameesh Mohammed/.gemini/antigravity/brain/dafd483c-8b2e-40fc-b0ba-db937d09bf06/saas_dashboard_light_mockup_1770196765969.png";

/// Dark mode dashboard mockup.
pub const DEFAULT_DARK_IMAGE: &str = "C:/Users/Ameesh Mohammed/.gemini/antigravity/brain/dafd483c-8b2e-40fc-b0ba-db937d09bf06/saas_dashboard_dark_mockup_1770196796593.png";

/// Document title stored in the package properties.
pub const DECK_TITLE: &str = "Mini SaaS Task Manager";

/// Screenshot placement: 1in from the left, 1.5in from the top, 5in tall.
fn screenshot(path: &Path) -> PictureSpec {
    PictureSpec::new(
        path,
        Emu::from_inches(1.0),
        Emu::from_inches(1.5),
        Emu::from_inches(5.0),
    )
}

/// Build the project deck using the given screenshot paths.
pub fn project_deck(light_image: &Path, dark_image: &Path) -> Deck {
    let mut deck = Deck::new(DECK_TITLE);

    deck.add_slide(SlideSpec::title(
        DECK_TITLE,
        "A Modern, Productive, and Beautiful Task Management Solution\nBuilt with React & Supabase",
    ));

    deck.add_slide(SlideSpec::content(
        "Project Overview",
        vec![Paragraph::plain(
            "The Mini SaaS Task Manager is a full-stack application designed for simplicity and productivity. \
             It features a real-time dashboard, interactive task management, and advanced data portability options.",
        )],
    ));

    deck.add_slide(SlideSpec::content(
        "Key Features",
        vec![
            Paragraph::plain("Comprehensive Task Control"),
            Paragraph::bullet("• CRUD Operations: Create, Edit, Toggle, and Delete tasks in real-time."),
            Paragraph::bullet("• Advanced Categorization: Priority labeling and situational categories."),
            Paragraph::bullet("• Data Portability: Export to JSON/CSV and Import from JSON."),
            Paragraph::bullet("• Themes: Fluid transitions between Light and Amoled Dark modes."),
        ],
    ));

    // The body's initial paragraph is never written to, so it stays empty
    // ahead of the four appended ones.
    deck.add_slide(SlideSpec::content(
        "Technical Architecture",
        vec![
            Paragraph::empty(),
            Paragraph::bold("Frontend Framework: React.js (Vite)"),
            Paragraph::bold("Backend & Auth: Supabase (PostgreSQL)"),
            Paragraph::bold("Styling: Vanilla CSS with Modern Variables & Glassmorphism"),
            Paragraph::bold("Real-time State: Supabase Auth & DB Listeners"),
        ],
    ));

    deck.add_slide(SlideSpec::picture(
        "Modern Light Interface",
        Some(screenshot(light_image)),
    ));

    deck.add_slide(SlideSpec::picture(
        "Ultra Dark 'Amoled' Mode",
        Some(screenshot(dark_image)),
    ));

    deck.add_slide(SlideSpec::content(
        "Dashboard Analytics",
        vec![
            Paragraph::plain("The dashboard provides instant visual feedback:"),
            Paragraph::bullet("• Real-time Task Breakdown by Priority."),
            Paragraph::bullet("• Completion Rate Progress Visualization."),
            Paragraph::bullet("• Category-wise Active Task Tracking."),
        ],
    ));

    deck.add_slide(SlideSpec::title(
        "Thank You!",
        "A Premium Task Management Experience\nQuestions & Feedback",
    ));

    deck
}

/// The project deck with the screenshot paths it was authored against.
pub fn default_project_deck() -> Deck {
    project_deck(Path::new(DEFAULT_LIGHT_IMAGE), Path::new(DEFAULT_DARK_IMAGE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Layout;

    #[test]
    fn test_eight_slides_in_order() {
        let deck = default_project_deck();
        let layouts: Vec<Layout> = deck.slides.iter().map(|s| s.layout).collect();
        assert_eq!(
            layouts,
            vec![
                Layout::Title,
                Layout::TitleAndContent,
                Layout::TitleAndContent,
                Layout::TitleAndContent,
                Layout::TitleOnly,
                Layout::TitleOnly,
                Layout::TitleAndContent,
                Layout::Title,
            ]
        );
        assert!(deck.validate().is_ok());
    }

    #[test]
    fn test_titles() {
        let deck = default_project_deck();
        let titles: Vec<&str> = deck.slides.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Mini SaaS Task Manager",
                "Project Overview",
                "Key Features",
                "Technical Architecture",
                "Modern Light Interface",
                "Ultra Dark 'Amoled' Mode",
                "Dashboard Analytics",
                "Thank You!",
            ]
        );
    }

    #[test]
    fn test_subtitle_split_into_paragraphs() {
        let deck = default_project_deck();
        assert_eq!(
            deck.slides[0].body_lines(),
            vec![
                "A Modern, Productive, and Beautiful Task Management Solution",
                "Built with React & Supabase",
            ]
        );
        assert_eq!(
            deck.slides[7].body_lines(),
            vec!["A Premium Task Management Experience", "Questions & Feedback"]
        );
    }

    #[test]
    fn test_overview_is_one_paragraph() {
        let deck = default_project_deck();
        let body = &deck.slides[1].body;
        assert_eq!(body.len(), 1);
        assert!(body[0].text.starts_with("The Mini SaaS Task Manager is a full-stack"));
        assert!(body[0].text.contains("productivity. It features"));
    }

    #[test]
    fn test_feature_bullets_are_indented() {
        let deck = default_project_deck();
        let body = &deck.slides[2].body;
        assert_eq!(body.len(), 5);
        assert_eq!(body[0].level, 0);
        assert!(body[1..].iter().all(|p| p.level == 1 && !p.bold));
    }

    #[test]
    fn test_architecture_paragraphs_are_bold() {
        let deck = default_project_deck();
        let body = &deck.slides[3].body;
        assert_eq!(body.len(), 5);
        assert!(body[0].is_empty());
        assert!(body[1..].iter().all(|p| p.bold && p.level == 0));
    }

    #[test]
    fn test_screenshot_placement() {
        let deck = project_deck(Path::new("light.png"), Path::new("dark.png"));
        let light = deck.slides[4].picture.as_ref().unwrap();
        assert_eq!(light.path, Path::new("light.png"));
        assert_eq!(light.left, Emu(914_400));
        assert_eq!(light.top, Emu(1_371_600));
        assert_eq!(light.height, Emu(4_572_000));
        assert_eq!(deck.slides[5].picture.as_ref().unwrap().path, Path::new("dark.png"));
        assert_eq!(deck.picture_count(), 2);
    }
}
