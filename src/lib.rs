//! pgtail - semantic highlighting for PostgreSQL server logs
//!
//! Turns raw log messages into styled text by matching the tokens DBAs scan
//! for: timestamps, PIDs, severities, SQLSTATE codes, durations, LSNs,
//! connection details, embedded SQL, lock modes and more.
//!
//! # Architecture
//!
//! - **Highlighting**: pattern matchers, the priority-ordered chain that
//!   resolves their overlaps, and the registry that builds chains
//! - **Config**: the TOML-backed snapshot every `apply()` call reads
//! - **Theme**: style lookup by key, with a built-in dark palette
//! - **Markup**: the `[style]text[/]` output format and its renderers
//!
//! # Example
//!
//! ```no_run
//! use pgtail_core::{HighlighterRegistry, HighlightingConfig, ThemeMap};
//!
//! fn main() -> pgtail_core::Result<()> {
//!     let config = HighlightingConfig::load_or_default(&HighlightingConfig::default_path())?;
//!     let registry = HighlighterRegistry::with_builtins()?;
//!     let chain = registry.create_chain(&config).chain;
//!
//!     let theme = ThemeMap::default_dark();
//!     let line = "2024-01-15 10:23:45.123 UTC [12345] LOG:  duration: 6000.0 ms";
//!     let annotated = chain.apply(line, &theme, &config);
//!     println!("{}", pgtail_core::markup::to_ansi(&annotated));
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod highlighting;
pub mod markup;
pub mod theme;

// Re-export commonly used types
pub use config::{CustomPattern, DurationThresholds, HighlightingConfig};
pub use error::{PgtailError, Result};
pub use highlighting::{
    Category, ChainHandle, HighlightError, Highlighter, HighlighterChain, HighlighterRegistry,
    Match,
};
pub use theme::{ColorStyle, Theme, ThemeMap};
