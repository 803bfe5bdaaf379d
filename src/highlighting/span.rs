//! Highlighted spans and per-line occupancy tracking

use std::ops::Range;

/// One highlighted span of a line
///
/// Offsets are byte offsets into the line and always fall on character
/// boundaries. A `Match` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    start: usize,
    end: usize,
    style: String,
    text: String,
}

impl Match {
    /// Build a match over `line[start..end]`
    ///
    /// Returns `None` for empty or out-of-bounds ranges and for offsets that
    /// split a UTF-8 character.
    pub fn new(line: &str, start: usize, end: usize, style: impl Into<String>) -> Option<Self> {
        if start >= end || end > line.len() {
            return None;
        }
        let text = line.get(start..end)?;
        Some(Self {
            start,
            end,
            style: style.into(),
            text: text.to_string(),
        })
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span covers no bytes; never true for a constructed match
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn style(&self) -> &str {
        &self.style
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Same match moved `offset` bytes to the right
    ///
    /// Used when a matcher ran over a suffix of the line.
    pub fn shifted(self, offset: usize) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
            ..self
        }
    }

    pub fn overlaps(&self, other: &Match) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Which byte offsets of the current line are already claimed
///
/// Created fresh for every line and dropped when the line is done.
#[derive(Debug, Clone)]
pub struct OccupancyTracker {
    occupied: Vec<bool>,
}

impl OccupancyTracker {
    pub fn new(length: usize) -> Self {
        Self {
            occupied: vec![false; length],
        }
    }

    pub fn len(&self) -> usize {
        self.occupied.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupied.is_empty()
    }

    /// True iff no position in `[start, end)` is occupied
    ///
    /// Ranges reaching past the tracked length are never available.
    pub fn is_available(&self, start: usize, end: usize) -> bool {
        if start > end || end > self.occupied.len() {
            return false;
        }
        !self.occupied[start..end].iter().any(|&taken| taken)
    }

    /// Claim `[start, end)`; the range is clamped to the tracked length
    pub fn mark_occupied(&mut self, start: usize, end: usize) {
        let end = end.min(self.occupied.len());
        if start >= end {
            return;
        }
        self.occupied[start..end].fill(true);
    }

    /// Maximal unoccupied runs, in order
    pub fn available_ranges(&self) -> Vec<Range<usize>> {
        let mut ranges = Vec::new();
        let mut run_start: Option<usize> = None;

        for (idx, &taken) in self.occupied.iter().enumerate() {
            match (taken, run_start) {
                (false, None) => run_start = Some(idx),
                (true, Some(start)) => {
                    ranges.push(start..idx);
                    run_start = None;
                }
                _ => {}
            }
        }

        if let Some(start) = run_start {
            ranges.push(start..self.occupied.len());
        }

        ranges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_creation() {
        let line = "LOG: checkpoint starting";
        let m = Match::new(line, 5, 15, "checkpoint_phase").unwrap();
        assert_eq!(m.text(), "checkpoint");
        assert_eq!(m.range(), 5..15);
        assert_eq!(m.len(), 10);
        assert_eq!(m.style(), "checkpoint_phase");
    }

    #[test]
    fn test_zero_width_rejected() {
        assert!(Match::new("abc", 1, 1, "x").is_none());
        assert!(Match::new("abc", 2, 1, "x").is_none());
        assert!(Match::new("abc", 1, 4, "x").is_none());
    }

    #[test]
    fn test_char_boundary_rejected() {
        let line = "é1";
        assert!(Match::new(line, 1, 3, "x").is_none());
        assert_eq!(Match::new(line, 0, 2, "x").unwrap().text(), "é");
    }

    #[test]
    fn test_shifted() {
        let m = Match::new("SELECT", 0, 6, "sql_keyword").unwrap().shifted(11);
        assert_eq!(m.range(), 11..17);
        assert_eq!(m.text(), "SELECT");
    }

    #[test]
    fn test_match_is_never_empty() {
        let m = Match::new("é", 0, 2, "x").unwrap();
        assert_eq!(m.len(), 2);
        assert!(!m.is_empty());
        assert!(Match::new("abc", 1, 1, "x").is_none());
    }

    #[test]
    fn test_overlaps() {
        let line = "0123456789";
        let a = Match::new(line, 0, 5, "a").unwrap();
        let b = Match::new(line, 4, 8, "b").unwrap();
        let c = Match::new(line, 5, 8, "c").unwrap();
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_tracker_availability() {
        let mut tracker = OccupancyTracker::new(10);
        assert!(tracker.is_available(0, 10));

        tracker.mark_occupied(2, 5);
        assert!(!tracker.is_available(4, 6));
        assert!(tracker.is_available(5, 10));
        assert!(tracker.is_available(0, 2));
        assert!(!tracker.is_available(8, 11));
    }

    #[test]
    fn test_available_ranges() {
        let mut tracker = OccupancyTracker::new(10);
        tracker.mark_occupied(0, 2);
        tracker.mark_occupied(4, 6);
        assert_eq!(tracker.available_ranges(), vec![2..4, 6..10]);

        tracker.mark_occupied(6, 10);
        assert_eq!(tracker.available_ranges(), vec![2..4]);
    }

    #[test]
    fn test_empty_tracker() {
        let tracker = OccupancyTracker::new(0);
        assert!(tracker.is_empty());
        assert!(tracker.available_ranges().is_empty());
    }
}
