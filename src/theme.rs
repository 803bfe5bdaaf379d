//! Theme and color lookup for highlighted output
//!
//! The highlighting engine never owns colors. It asks a [`Theme`] for the
//! [`ColorStyle`] bound to a style key and renders the token unstyled when the
//! theme has nothing for it.
//!
//! [`ThemeMap`] is the in-memory implementation used by the binary and by
//! tests. Loading and saving themes from disk is handled elsewhere.

use std::collections::HashMap;
use std::fmt;

use ratatui::style::{Color, Modifier, Style};

/// Style lookup by key
///
/// Implementations must return `None` for unknown keys and never panic.
pub trait Theme: Send + Sync {
    /// Resolve a style key such as `"timestamp_date"` to concrete attributes
    fn get_style(&self, key: &str) -> Option<ColorStyle>;
}

/// Foreground/background colors plus text attributes for one style key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorStyle {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
    pub dim: bool,
    pub italic: bool,
    pub underline: bool,
}

impl ColorStyle {
    /// Style with only a foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            fg: Some(color),
            ..Default::default()
        }
    }

    pub fn on(mut self, bg: Color) -> Self {
        self.bg = Some(bg);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// True when the style carries no color and no attribute
    pub fn is_plain(&self) -> bool {
        self.fg.is_none()
            && self.bg.is_none()
            && !self.bold
            && !self.dim
            && !self.italic
            && !self.underline
    }

    /// Render as a markup style spec, e.g. `bold lightred on black`
    pub fn to_markup(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if self.bold {
            parts.push("bold".to_string());
        }
        if self.dim {
            parts.push("dim".to_string());
        }
        if self.italic {
            parts.push("italic".to_string());
        }
        if self.underline {
            parts.push("underline".to_string());
        }
        if let Some(fg) = self.fg {
            parts.push(color_name(fg));
        }
        if let Some(bg) = self.bg {
            parts.push("on".to_string());
            parts.push(color_name(bg));
        }
        parts.join(" ")
    }

    /// Parse a markup style spec produced by [`ColorStyle::to_markup`]
    ///
    /// Returns `None` if any word is not a modifier, a color, or `on <color>`.
    pub fn from_markup(spec: &str) -> Option<Self> {
        let mut style = ColorStyle::default();
        let mut words = spec.split_whitespace();
        let mut seen_any = false;

        while let Some(word) = words.next() {
            seen_any = true;
            match word {
                "bold" => style.bold = true,
                "dim" => style.dim = true,
                "italic" => style.italic = true,
                "underline" => style.underline = true,
                "on" => style.bg = Some(parse_color(words.next()?)?),
                other => {
                    if style.fg.is_some() {
                        return None;
                    }
                    style.fg = Some(parse_color(other)?);
                }
            }
        }

        seen_any.then_some(style)
    }
}

impl fmt::Display for ColorStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_markup())
    }
}

impl From<ColorStyle> for Style {
    fn from(cs: ColorStyle) -> Self {
        let mut style = Style::default();
        if let Some(fg) = cs.fg {
            style = style.fg(fg);
        }
        if let Some(bg) = cs.bg {
            style = style.bg(bg);
        }
        let mut modifier = Modifier::empty();
        if cs.bold {
            modifier |= Modifier::BOLD;
        }
        if cs.dim {
            modifier |= Modifier::DIM;
        }
        if cs.italic {
            modifier |= Modifier::ITALIC;
        }
        if cs.underline {
            modifier |= Modifier::UNDERLINED;
        }
        style.add_modifier(modifier)
    }
}

/// Lowercase color name understood by [`parse_color`]
pub fn color_name(color: Color) -> String {
    match color {
        Color::Reset => "default".to_string(),
        Color::Black => "black".to_string(),
        Color::Red => "red".to_string(),
        Color::Green => "green".to_string(),
        Color::Yellow => "yellow".to_string(),
        Color::Blue => "blue".to_string(),
        Color::Magenta => "magenta".to_string(),
        Color::Cyan => "cyan".to_string(),
        Color::Gray => "gray".to_string(),
        Color::DarkGray => "darkgray".to_string(),
        Color::LightRed => "lightred".to_string(),
        Color::LightGreen => "lightgreen".to_string(),
        Color::LightYellow => "lightyellow".to_string(),
        Color::LightBlue => "lightblue".to_string(),
        Color::LightMagenta => "lightmagenta".to_string(),
        Color::LightCyan => "lightcyan".to_string(),
        Color::White => "white".to_string(),
        Color::Rgb(r, g, b) => format!("#{:02x}{:02x}{:02x}", r, g, b),
        Color::Indexed(i) => i.to_string(),
    }
}

/// Parse a color name, `#rrggbb` hex value, or 256-color index
pub fn parse_color(name: &str) -> Option<Color> {
    let normalized = name.to_ascii_lowercase().replace(['-', '_'], "");
    let color = match normalized.as_str() {
        "default" | "reset" => Color::Reset,
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "lightred" | "brightred" => Color::LightRed,
        "lightgreen" | "brightgreen" => Color::LightGreen,
        "lightyellow" | "brightyellow" => Color::LightYellow,
        "lightblue" | "brightblue" => Color::LightBlue,
        "lightmagenta" | "brightmagenta" => Color::LightMagenta,
        "lightcyan" | "brightcyan" => Color::LightCyan,
        "white" => Color::White,
        hex if hex.starts_with('#') && hex.len() == 7 && hex.is_ascii() => {
            let r = u8::from_str_radix(&hex[1..3], 16).ok()?;
            let g = u8::from_str_radix(&hex[3..5], 16).ok()?;
            let b = u8::from_str_radix(&hex[5..7], 16).ok()?;
            Color::Rgb(r, g, b)
        }
        index => Color::Indexed(index.parse().ok()?),
    };
    Some(color)
}

/// In-memory theme keyed by style name
#[derive(Debug, Clone, Default)]
pub struct ThemeMap {
    name: String,
    styles: HashMap<String, ColorStyle>,
    /// Treat unknown keys that parse as style specs (`"bold magenta"`) as inline styles
    inline_styles: bool,
}

impl ThemeMap {
    /// Empty theme; every lookup misses
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            styles: HashMap::new(),
            inline_styles: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn with_style(mut self, key: impl Into<String>, style: ColorStyle) -> Self {
        self.styles.insert(key.into(), style);
        self
    }

    pub fn with_inline_styles(mut self, enabled: bool) -> Self {
        self.inline_styles = enabled;
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, style: ColorStyle) {
        self.styles.insert(key.into(), style);
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.styles.contains_key(key)
    }

    /// Built-in dark palette covering every built-in style key
    pub fn default_dark() -> Self {
        let styles = [
            // structural
            ("timestamp_date", ColorStyle::fg(Color::Blue)),
            ("timestamp_time", ColorStyle::fg(Color::LightBlue)),
            ("timestamp_ms", ColorStyle::fg(Color::DarkGray)),
            ("timestamp_tz", ColorStyle::fg(Color::DarkGray).italic()),
            ("pid", ColorStyle::fg(Color::Magenta)),
            ("level_panic", ColorStyle::fg(Color::White).on(Color::Red).bold()),
            ("level_fatal", ColorStyle::fg(Color::LightRed).bold()),
            ("level_error", ColorStyle::fg(Color::Red).bold()),
            ("level_warning", ColorStyle::fg(Color::Yellow).bold()),
            ("level_notice", ColorStyle::fg(Color::Cyan)),
            ("level_info", ColorStyle::fg(Color::Green)),
            ("level_log", ColorStyle::fg(Color::Gray)),
            ("level_debug", ColorStyle::fg(Color::DarkGray)),
            ("level_detail", ColorStyle::fg(Color::Gray).italic()),
            // diagnostic
            ("sqlstate_success", ColorStyle::fg(Color::Green)),
            ("sqlstate_warning", ColorStyle::fg(Color::Yellow)),
            ("sqlstate_error", ColorStyle::fg(Color::Red).bold()),
            ("sqlstate_fatal", ColorStyle::fg(Color::LightRed).bold().underline()),
            ("error_name", ColorStyle::fg(Color::LightRed)),
            // performance
            ("duration_fast", ColorStyle::fg(Color::Green)),
            ("duration_slow", ColorStyle::fg(Color::Yellow)),
            ("duration_very_slow", ColorStyle::fg(Color::LightRed).bold()),
            ("duration_critical", ColorStyle::fg(Color::White).on(Color::Red).bold()),
            ("memory_size", ColorStyle::fg(Color::LightCyan)),
            ("percentage", ColorStyle::fg(Color::LightYellow)),
            ("count", ColorStyle::fg(Color::Cyan)),
            // objects
            ("object_type", ColorStyle::fg(Color::Gray).italic()),
            ("identifier", ColorStyle::fg(Color::LightCyan)),
            ("oid", ColorStyle::fg(Color::Indexed(141))),
            // wal
            ("lsn", ColorStyle::fg(Color::LightMagenta)),
            ("wal_segment", ColorStyle::fg(Color::Magenta).underline()),
            ("timeline", ColorStyle::fg(Color::LightMagenta).bold()),
            // connection
            ("conn_key", ColorStyle::fg(Color::DarkGray)),
            ("conn_value", ColorStyle::fg(Color::LightGreen)),
            ("ip_address", ColorStyle::fg(Color::LightBlue).underline()),
            ("port", ColorStyle::fg(Color::Blue)),
            ("backend_type", ColorStyle::fg(Color::Indexed(208))),
            // sql
            ("sql_keyword", ColorStyle::fg(Color::LightBlue).bold()),
            ("sql_string", ColorStyle::fg(Color::Green)),
            ("sql_param", ColorStyle::fg(Color::Yellow)),
            ("sql_function", ColorStyle::fg(Color::LightYellow)),
            // lock
            ("lock_share", ColorStyle::fg(Color::Yellow)),
            ("lock_exclusive", ColorStyle::fg(Color::LightRed).bold()),
            ("lock_state", ColorStyle::fg(Color::Yellow).italic()),
            ("tuple_id", ColorStyle::fg(Color::Gray)),
            // checkpoint
            ("checkpoint_phase", ColorStyle::fg(Color::LightGreen).bold()),
            ("checkpoint_reason", ColorStyle::fg(Color::Green).italic()),
            ("checkpoint_key", ColorStyle::fg(Color::DarkGray)),
            ("checkpoint_value", ColorStyle::fg(Color::LightCyan)),
            // misc
            ("boolean", ColorStyle::fg(Color::LightMagenta)),
            ("null", ColorStyle::fg(Color::DarkGray).italic()),
            ("uuid", ColorStyle::fg(Color::Indexed(141))),
            ("hex", ColorStyle::fg(Color::Indexed(141))),
            ("file_path", ColorStyle::fg(Color::Cyan).underline()),
            ("number", ColorStyle::fg(Color::Cyan)),
            ("custom", ColorStyle::fg(Color::LightMagenta).bold()),
        ];

        let mut theme = ThemeMap::new("dark").with_inline_styles(true);
        for (key, style) in styles {
            theme.insert(key, style);
        }
        theme
    }
}

impl Theme for ThemeMap {
    fn get_style(&self, key: &str) -> Option<ColorStyle> {
        if let Some(style) = self.styles.get(key) {
            return Some(*style);
        }
        if self.inline_styles {
            return ColorStyle::from_markup(key);
        }
        None
    }
}
