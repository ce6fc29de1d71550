//! Theme configuration for `Playlist Converter`.
//!
//! One palette per [`Theme`]; everything else (typography, spacing, radius,
//! motion) is shared. The stylesheet only references the CSS custom
//! properties emitted by [`generate_css_variables`].

use playlist_converter_core::Theme;

/// Colors that differ between light and dark mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Page background.
    pub background: &'static str,
    /// Cards, inputs and tables.
    pub surface: &'static str,
    /// Buttons.
    pub button: &'static str,
    /// Hovered/active buttons.
    pub button_active: &'static str,
    /// Body text.
    pub text: &'static str,
    /// Muted text.
    pub text_secondary: &'static str,
    /// Accent (title, focus rings, badges).
    pub accent: &'static str,
    /// Borders.
    pub border: &'static str,
    /// Loading mask.
    pub overlay: &'static str,
}

/// Dark palette (default).
pub const DARK: Palette = Palette {
    background: "#0d0d0d",
    surface: "#161616",
    button: "#111111",
    button_active: "#00ffcc",
    text: "#00ffcc",
    text_secondary: "#7fdcc7",
    accent: "#00ffcc",
    border: "rgba(0, 255, 204, 0.35)",
    overlay: "rgba(0, 0, 0, 0.7)",
};

/// Light palette.
pub const LIGHT: Palette = Palette {
    background: "#ffffff",
    surface: "#f7f7f7",
    button: "#f0f0f0",
    button_active: "#1db954",
    text: "#000000",
    text_secondary: "#4b4b4b",
    accent: "#1db954",
    border: "rgba(0, 0, 0, 0.15)",
    overlay: "rgba(255, 255, 255, 0.7)",
};

/// Palette for a theme.
#[must_use]
pub const fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Dark => DARK,
        Theme::Light => LIGHT,
    }
}

/// Typography configuration.
pub mod typography {
    /// Font family.
    pub const FONT_FAMILY: &str =
        "'Inter', -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif";

    /// Font sizes.
    pub mod sizes {
        /// Small text.
        pub const SMALL: &str = "14px";
        /// Body text.
        pub const MEDIUM: &str = "16px";
        /// Headings.
        pub const LARGE: &str = "24px";
    }
}

/// Spacing values.
pub mod spacing {
    /// Small spacing.
    pub const SM: &str = "0.5rem";
    /// Medium spacing.
    pub const MD: &str = "1rem";
    /// Large spacing.
    pub const LG: &str = "1.5rem";
}

/// Border radius values.
pub mod radius {
    /// Inputs and table cells.
    pub const SM: &str = "6px";
    /// Buttons and cards.
    pub const MD: &str = "10px";
    /// Badges.
    pub const FULL: &str = "9999px";
}

/// Animation/transition configuration.
pub mod animation {
    /// Button presses.
    pub const FAST: &str = "0.15s cubic-bezier(0.4, 0, 0.2, 1)";
    /// Fades.
    pub const SLOW: &str = "0.5s cubic-bezier(0.4, 0, 0.2, 1)";
}

/// Generate CSS custom properties for `theme`.
pub fn generate_css_variables(theme: Theme) -> String {
    let p = palette(theme);
    format!(
        r":root {{
  color-scheme: {scheme};

  /* Colors */
  --bg-primary: {background};
  --bg-surface: {surface};
  --bg-button: {button};
  --bg-button-active: {button_active};
  --text-primary: {text};
  --text-secondary: {text_secondary};
  --accent: {accent};
  --border: {border};
  --overlay-bg: {overlay};

  /* Typography */
  --font-family: {font_family};
  --font-size-sm: {font_sm};
  --font-size-md: {font_md};
  --font-size-lg: {font_lg};

  /* Spacing */
  --spacing-sm: {spacing_sm};
  --spacing-md: {spacing_md};
  --spacing-lg: {spacing_lg};

  /* Border radius */
  --radius-sm: {radius_sm};
  --radius-md: {radius_md};
  --radius-full: {radius_full};

  /* Transitions */
  --transition-fast: {transition_fast};
  --transition-slow: {transition_slow};
}}",
        scheme = theme,
        background = p.background,
        surface = p.surface,
        button = p.button,
        button_active = p.button_active,
        text = p.text,
        text_secondary = p.text_secondary,
        accent = p.accent,
        border = p.border,
        overlay = p.overlay,
        font_family = typography::FONT_FAMILY,
        font_sm = typography::sizes::SMALL,
        font_md = typography::sizes::MEDIUM,
        font_lg = typography::sizes::LARGE,
        spacing_sm = spacing::SM,
        spacing_md = spacing::MD,
        spacing_lg = spacing::LG,
        radius_sm = radius::SM,
        radius_md = radius::MD,
        radius_full = radius::FULL,
        transition_fast = animation::FAST,
        transition_slow = animation::SLOW,
    )
}
