//! Inline markup produced by the highlighting engine
//!
//! Styled spans are written as `[<style spec>]text[/]`. Literal `[` and `\` in
//! log content are escaped as `\[` and `\\`, so any renderer can recover the
//! original text with [`strip`].
//!
//! Renderers live here too: [`to_line`] for the terminal UI (ratatui) and
//! [`to_ansi`] for plain line printing (crossterm).

use crossterm::style::{Attribute, Color as TermColor, ContentStyle};
use ratatui::style::Color;
use ratatui::text::{Line, Span};

use crate::theme::ColorStyle;

const CLOSE_TAG: &str = "[/]";

/// Escape markup delimiters in plain text
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    escape_into(&mut out, text);
    out
}

/// Escape `text` onto the end of `out`
pub fn escape_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '[' => out.push_str("\\["),
            _ => out.push(ch),
        }
    }
}

/// Write `text` wrapped in a style tag onto `out`
///
/// A plain style (no color, no attribute) emits the escaped text untagged.
pub fn push_styled(out: &mut String, style: &ColorStyle, text: &str) {
    if style.is_plain() {
        escape_into(out, text);
        return;
    }
    out.push('[');
    out.push_str(&style.to_markup());
    out.push(']');
    escape_into(out, text);
    out.push_str(CLOSE_TAG);
}

/// One run of text sharing a style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub style: Option<ColorStyle>,
    pub text: String,
}

/// Parse annotated text into styled segments
///
/// Unknown tag contents are dropped as tags with no style. An opening `[` with
/// no closing `]` is kept as literal text.
pub fn parse(annotated: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut style: Option<ColorStyle> = None;
    let mut chars = annotated.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some((_, escaped)) => current.push(escaped),
                None => current.push('\\'),
            },
            '[' => {
                let rest = &annotated[idx + 1..];
                let Some(close) = rest.find(']') else {
                    current.push_str(&annotated[idx..]);
                    break;
                };
                let tag = &rest[..close];

                if !current.is_empty() {
                    segments.push(Segment {
                        style,
                        text: std::mem::take(&mut current),
                    });
                }
                style = if tag == "/" {
                    None
                } else {
                    ColorStyle::from_markup(tag)
                };

                // skip the tag body and the closing bracket
                while let Some(&(next_idx, _)) = chars.peek() {
                    if next_idx > idx + close + 1 {
                        break;
                    }
                    chars.next();
                }
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        segments.push(Segment {
            style,
            text: current,
        });
    }

    segments
}

/// Remove tags and escapes, returning the original text
pub fn strip(annotated: &str) -> String {
    parse(annotated).into_iter().map(|s| s.text).collect()
}

/// Count style tags (opening tags only)
pub fn count_styled(annotated: &str) -> usize {
    parse(annotated).iter().filter(|s| s.style.is_some()).count()
}

/// Convert annotated text to a ratatui line for the terminal UI
pub fn to_line(annotated: &str) -> Line<'static> {
    let spans: Vec<Span<'static>> = parse(annotated)
        .into_iter()
        .map(|segment| match segment.style {
            Some(style) => Span::styled(segment.text, style),
            None => Span::raw(segment.text),
        })
        .collect();
    Line::from(spans)
}

/// Render annotated text as ANSI escape sequences for line-oriented output
pub fn to_ansi(annotated: &str) -> String {
    let mut out = String::with_capacity(annotated.len() + 16);
    for segment in parse(annotated) {
        match segment.style {
            Some(style) => out.push_str(&content_style(&style).apply(segment.text).to_string()),
            None => out.push_str(&segment.text),
        }
    }
    out
}

fn content_style(style: &ColorStyle) -> ContentStyle {
    let mut cs = ContentStyle::new();
    cs.foreground_color = style.fg.map(term_color);
    cs.background_color = style.bg.map(term_color);
    if style.bold {
        cs.attributes.set(Attribute::Bold);
    }
    if style.dim {
        cs.attributes.set(Attribute::Dim);
    }
    if style.italic {
        cs.attributes.set(Attribute::Italic);
    }
    if style.underline {
        cs.attributes.set(Attribute::Underlined);
    }
    cs
}

fn term_color(color: Color) -> TermColor {
    match color {
        Color::Reset => TermColor::Reset,
        Color::Black => TermColor::Black,
        Color::Red => TermColor::DarkRed,
        Color::Green => TermColor::DarkGreen,
        Color::Yellow => TermColor::DarkYellow,
        Color::Blue => TermColor::DarkBlue,
        Color::Magenta => TermColor::DarkMagenta,
        Color::Cyan => TermColor::DarkCyan,
        Color::Gray => TermColor::Grey,
        Color::DarkGray => TermColor::DarkGrey,
        Color::LightRed => TermColor::Red,
        Color::LightGreen => TermColor::Green,
        Color::LightYellow => TermColor::Yellow,
        Color::LightBlue => TermColor::Blue,
        Color::LightMagenta => TermColor::Magenta,
        Color::LightCyan => TermColor::Cyan,
        Color::White => TermColor::White,
        Color::Rgb(r, g, b) => TermColor::Rgb { r, g, b },
        Color::Indexed(i) => TermColor::AnsiValue(i),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("arr[1]"), "arr\\[1]");
        assert_eq!(escape("C:\\path"), "C:\\\\path");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_strip_roundtrip_escaped() {
        for text in ["arr[1]", "\\[not a tag]", "[/]", "trailing \\", "", "ünïcødé [x]"] {
            assert_eq!(strip(&escape(text)), text);
        }
    }

    #[test]
    fn test_parse_styled() {
        let mut out = String::new();
        out.push_str("pid ");
        push_styled(&mut out, &ColorStyle::fg(Color::Magenta), "[42]");
        out.push_str(" done");

        assert_eq!(out, "pid [magenta]\\[42][/] done");

        let segments = parse(&out);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[1].text, "[42]");
        assert_eq!(segments[1].style, Some(ColorStyle::fg(Color::Magenta)));
        assert_eq!(strip(&out), "pid [42] done");
        assert_eq!(count_styled(&out), 1);
    }

    #[test]
    fn test_plain_style_is_untagged() {
        let mut out = String::new();
        push_styled(&mut out, &ColorStyle::default(), "x[y");
        assert_eq!(out, "x\\[y");
    }

    #[test]
    fn test_unclosed_bracket_is_literal() {
        assert_eq!(strip("a [b"), "a [b");
    }

    #[test]
    fn test_to_line_spans() {
        let line = to_line("[bold red]ERROR:[/] boom");
        assert_eq!(line.spans.len(), 2);
        assert_eq!(line.spans[0].content, "ERROR:");
        assert_eq!(line.spans[1].content, " boom");
    }

    #[test]
    fn test_to_ansi_contains_text() {
        let ansi = to_ansi("[bold red]ERROR:[/] boom");
        assert!(ansi.contains("ERROR:"));
        assert!(ansi.contains("\u{1b}["));
        assert!(ansi.ends_with(" boom"));
    }
}
