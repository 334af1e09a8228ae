use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

/// The colors shared by train cards and railway edges.
///
/// Eight concrete colors exist both as cards and as edge requirements.
/// [`Color::Wild`] exists only as a card: it pays for any color.
/// [`Color::Gray`] exists only on edges: it accepts any one concrete color.
#[derive(Clone, Copy, Debug, Deserialize, Display, EnumIter, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Color {
    Black,
    Blue,
    /// The "no requirement" marker for railway edges. There is no gray card.
    Gray,
    Green,
    Orange,
    Pink,
    Red,
    White,
    /// The wildcard. This is a special card that pays for any color.
    /// There is no wild railway edge.
    Wild,
    Yellow,
}

impl Color {
    /// Whether the current color is the wildcard.
    ///
    /// # Examples:
    /// ```
    /// use trunkline::color::Color;
    ///
    /// assert!(Color::Wild.is_wild());
    /// assert!(!Color::Black.is_wild());
    /// ```
    #[inline]
    pub fn is_wild(&self) -> bool {
        *self == Color::Wild
    }

    /// The opposite of `is_wild`.
    #[inline]
    pub fn is_not_wild(&self) -> bool {
        !self.is_wild()
    }

    /// Whether the current color is the gray edge marker.
    #[inline]
    pub fn is_gray(&self) -> bool {
        *self == Color::Gray
    }

    /// The opposite of `is_gray`.
    #[inline]
    pub fn is_not_gray(&self) -> bool {
        !self.is_gray()
    }

    /// Whether the current color is one of the eight concrete colors,
    /// i.e. neither the wildcard nor the gray edge marker.
    #[inline]
    pub fn is_concrete(&self) -> bool {
        self.is_not_wild() && self.is_not_gray()
    }

    /// Iterates over the nine colors a card can have (everything but gray).
    pub fn card_colors() -> impl Iterator<Item = Color> {
        Color::iter().filter(Color::is_not_gray)
    }

    /// Iterates over the eight concrete colors.
    pub fn concrete_colors() -> impl Iterator<Item = Color> {
        Color::iter().filter(Color::is_concrete)
    }

    /// Whether a railway edge of this color can be paid with an `offered`
    /// card: a gray edge accepts any card, and a colored edge accepts its
    /// own color or the wildcard.
    ///
    /// Gray is not a card, and no edge requires the wildcard; calling this
    /// with either in the wrong position is a programming error and panics.
    ///
    /// # Examples:
    /// ```
    /// use trunkline::color::Color;
    ///
    /// assert!(Color::Gray.accepts(Color::Green));
    /// assert!(Color::Red.accepts(Color::Red));
    /// assert!(Color::Red.accepts(Color::Wild));
    /// assert!(!Color::Red.accepts(Color::Blue));
    /// ```
    pub fn accepts(&self, offered: Color) -> bool {
        assert!(
            offered.is_not_gray(),
            "a gray card cannot be offered as payment"
        );
        assert!(self.is_not_wild(), "no railway edge requires the wildcard");

        self.is_gray() || *self == offered || offered.is_wild()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_to_string() {
        assert_eq!(Color::Orange.to_string(), "orange");
        assert_eq!(Color::Gray.to_string(), "gray");
        assert_eq!(Color::Wild.to_string(), "wild");
    }

    #[test]
    fn color_to_json() -> serde_json::Result<()> {
        assert_eq!(serde_json::to_string(&Color::Blue)?, r#""blue""#);
        assert_eq!(serde_json::to_string(&Color::Wild)?, r#""wild""#);
        Ok(())
    }

    #[test]
    fn json_to_color() -> serde_json::Result<()> {
        assert_eq!(serde_json::from_str::<Color>(r#""wild""#)?, Color::Wild);
        assert_eq!(serde_json::from_str::<Color>(r#""green""#)?, Color::Green);

        Ok(())
    }

    #[test]
    fn invalid_json_to_color() {
        assert!(serde_json::from_str::<Color>(r#""turquoise""#).is_err());
    }

    #[test]
    fn nine_card_colors_eight_concrete() {
        assert_eq!(Color::card_colors().count(), 9);
        assert_eq!(Color::concrete_colors().count(), 8);
        assert!(Color::card_colors().all(|color| color.is_not_gray()));
        assert!(Color::concrete_colors().all(|color| color.is_concrete()));
    }

    #[test]
    fn gray_edge_accepts_everything() {
        for offered in Color::card_colors() {
            assert!(Color::Gray.accepts(offered));
        }
    }

    #[test]
    fn colored_edge_accepts_own_color_and_wild_only() {
        assert!(Color::Red.accepts(Color::Red));
        assert!(Color::Red.accepts(Color::Wild));

        for offered in Color::concrete_colors() {
            assert_eq!(Color::Red.accepts(offered), offered == Color::Red);
        }
    }

    #[test]
    #[should_panic(expected = "gray card")]
    fn offering_gray_panics() {
        Color::Blue.accepts(Color::Gray);
    }

    #[test]
    #[should_panic(expected = "wildcard")]
    fn wild_edge_panics() {
        Color::Wild.accepts(Color::Blue);
    }
}
