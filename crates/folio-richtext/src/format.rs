//! Text format flags.
//!
//! Text nodes carry a `format` bit-field where every set bit wraps the text in
//! one more decoration. [`TextFormat`] keeps the raw bits but only exposes the
//! defined decorations, always in the same innermost-to-outermost order.

use serde::Deserialize;

/// A single text decoration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Decoration {
    Bold,
    Italic,
    Strikethrough,
    Underline,
    Code,
    Subscript,
    Superscript,
}

impl Decoration {
    /// All decorations, innermost first.
    pub const ALL: [Self; 7] = [
        Self::Bold,
        Self::Italic,
        Self::Strikethrough,
        Self::Underline,
        Self::Code,
        Self::Subscript,
        Self::Superscript,
    ];

    /// Bit assigned to this decoration in the `format` field.
    #[must_use]
    pub const fn bit(self) -> u32 {
        match self {
            Self::Bold => 1,
            Self::Italic => 1 << 1,
            Self::Strikethrough => 1 << 2,
            Self::Underline => 1 << 3,
            Self::Code => 1 << 4,
            Self::Subscript => 1 << 5,
            Self::Superscript => 1 << 6,
        }
    }

    /// HTML element used to render this decoration.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Bold => "strong",
            Self::Italic => "em",
            Self::Strikethrough => "s",
            Self::Underline => "u",
            Self::Code => "code",
            Self::Subscript => "sub",
            Self::Superscript => "sup",
        }
    }
}

/// Set of text decorations decoded from a `format` bit-field.
///
/// Unknown bits are preserved in [`bits`](Self::bits) but never rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct TextFormat(u32);

impl TextFormat {
    /// Empty format (plain text).
    pub const PLAIN: Self = Self(0);

    /// Create a format from raw bits.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Raw bit value.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Add a decoration.
    #[must_use]
    pub const fn with(self, decoration: Decoration) -> Self {
        Self(self.0 | decoration.bit())
    }

    /// Whether the decoration is set.
    #[must_use]
    pub const fn contains(self, decoration: Decoration) -> bool {
        self.0 & decoration.bit() != 0
    }

    /// Whether no defined decoration is set.
    #[must_use]
    pub fn is_plain(self) -> bool {
        self.decorations().next().is_none()
    }

    /// Iterate set decorations, innermost first.
    pub fn decorations(self) -> impl Iterator<Item = Decoration> {
        Decoration::ALL
            .into_iter()
            .filter(move |decoration| self.contains(*decoration))
    }
}

impl From<u32> for TextFormat {
    fn from(bits: u32) -> Self {
        Self::from_bits(bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_are_distinct_and_ascending() {
        let bits: Vec<u32> = Decoration::ALL.iter().map(|d| d.bit()).collect();
        assert_eq!(bits, vec![1, 2, 4, 8, 16, 32, 64]);
    }

    #[test]
    fn test_decorations_order_is_fixed() {
        let format = TextFormat::from_bits(64 | 2 | 1 | 16);
        let decorations: Vec<Decoration> = format.decorations().collect();
        assert_eq!(
            decorations,
            vec![
                Decoration::Bold,
                Decoration::Italic,
                Decoration::Code,
                Decoration::Superscript
            ]
        );
    }

    #[test]
    fn test_every_combination_yields_all_set_bits() {
        for bits in 0..128_u32 {
            let format = TextFormat::from_bits(bits);
            let recomposed = format.decorations().fold(0, |acc, d| acc | d.bit());
            assert_eq!(recomposed, bits);
        }
    }

    #[test]
    fn test_unknown_bits_ignored() {
        let format = TextFormat::from_bits(128 | 256);
        assert!(format.is_plain());
        assert_eq!(format.bits(), 384);
    }

    #[test]
    fn test_with_and_contains() {
        let format = TextFormat::PLAIN
            .with(Decoration::Underline)
            .with(Decoration::Bold);
        assert!(format.contains(Decoration::Underline));
        assert!(format.contains(Decoration::Bold));
        assert!(!format.contains(Decoration::Italic));
        assert_eq!(format.bits(), 9);
    }

    #[test]
    fn test_deserialize_from_number() {
        let format: TextFormat = serde_json::from_str("3").unwrap();
        assert_eq!(format, TextFormat::from_bits(3));
    }
}
