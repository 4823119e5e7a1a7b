//! Minimal text styling for window chrome.
//!
//! The toolkit deliberately carries no theming layer; these are just the
//! bold/reverse attributes and the handful of color pairs the title and
//! footer bars need. Monochrome fallback (forcing reverse video) is decided
//! by the window, not here.

/// Foreground/background slot used by chrome rendering.
///
/// Pairs are resolved to concrete colors by the active `Screen`
/// implementation; headless screens keep them symbolic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorPair {
    /// Terminal default colors.
    #[default]
    Default,
    /// Title bar band (light on blue).
    TitleBar,
    /// Footer background band.
    FooterBar,
    /// Footer key-label cell.
    FooterKey,
    /// Footer description cell.
    FooterText,
}

/// Attribute set applied to written cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStyle {
    pub bold: bool,
    pub reverse: bool,
    pub underline: bool,
    pub pair: ColorPair,
}

impl TextStyle {
    pub const fn plain() -> Self {
        Self {
            bold: false,
            reverse: false,
            underline: false,
            pair: ColorPair::Default,
        }
    }

    pub const fn with_pair(pair: ColorPair) -> Self {
        Self {
            bold: false,
            reverse: false,
            underline: false,
            pair,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }

    pub const fn underline(mut self) -> Self {
        self.underline = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{ColorPair, TextStyle};

    #[test]
    fn builders_compose() {
        let style = TextStyle::with_pair(ColorPair::FooterKey).bold().reverse();
        assert!(style.bold);
        assert!(style.reverse);
        assert!(!style.underline);
        assert_eq!(style.pair, ColorPair::FooterKey);

        let underlined = TextStyle::plain().underline();
        assert!(underlined.underline);
        assert!(!underlined.bold);
    }

    #[test]
    fn plain_is_default() {
        assert_eq!(TextStyle::plain(), TextStyle::default());
    }
}
