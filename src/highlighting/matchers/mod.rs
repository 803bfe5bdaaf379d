//! Concrete matcher strategies
//!
//! All of these compile their pattern or automaton in the constructor and
//! reuse it for every line.

pub mod custom;
pub mod duration;
pub mod grouped;
pub mod keyword;
pub mod single;
pub mod scoped;

pub use custom::CustomHighlighter;
pub use duration::DurationHighlighter;
pub use grouped::GroupedRegexHighlighter;
pub use keyword::KeywordHighlighter;
pub use single::RegexHighlighter;
pub use scoped::ScopedHighlighter;
