use ratatui::style::Color;

/// Marker shown next to server-recommended products
pub const RECOMMENDED_MARKER: &str = "\u{2605}";

pub fn rating_color(rating: f64) -> Color {
    if rating >= 4.0 {
        Color::Green
    } else if rating >= 3.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

pub fn source_color(source: &str) -> Color {
    let source = source.to_lowercase();
    if source.contains("amazon") {
        Color::Yellow
    } else if source.contains("flipkart") {
        Color::LightBlue
    } else if source.contains("google") {
        Color::Green
    } else if source.contains("mock") {
        Color::Magenta
    } else {
        Color::White
    }
}

pub fn icon_for_product(has_image: bool) -> &'static str {
    if has_image {
        "\u{1F5BC}\u{FE0F}" // picture
    } else {
        "\u{1F4E6}" // package
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_colors_by_band() {
        assert_eq!(rating_color(4.5), Color::Green);
        assert_eq!(rating_color(3.2), Color::Yellow);
        assert_eq!(rating_color(1.9), Color::Red);
    }

    #[test]
    fn source_color_matches_known_retailers() {
        assert_eq!(source_color("Amazon (SerpAPI)"), Color::Yellow);
        assert_eq!(source_color("Google Shopping"), Color::Green);
        assert_eq!(source_color("Mock"), Color::Magenta);
        assert_eq!(source_color("SomeShop"), Color::White);
    }
}
