//! Bookkeeping of shared values visited while printing one log call.
//!
//! See [`ReferenceTracker`] for more details.
use crate::value::Reference;
use smallvec::SmallVec;

#[derive(Debug, Clone, Copy)]
struct Entry {
    reference: Reference,
    depth: usize,
}

/// Records which shared values were visited, and at what depth.
///
/// A value is reported as circular when it is reached again at a depth
/// strictly greater than a depth it was recorded at. This catches values that
/// contain themselves, but also values reached a second time along a longer
/// path, as in diamond-shaped graphs. Values revisited at the same or a
/// shallower depth are not reported and get printed again.
///
/// Entries are only ever appended, and a recorded depth only ever grows. The
/// tracker holds [`Reference`]s, which don't keep the values alive, and lives
/// for a single top-level print.
#[derive(Debug, Default)]
pub struct ReferenceTracker {
    entries: SmallVec<[Entry; 16]>,
}

impl ReferenceTracker {
    pub fn new() -> Self {
        ReferenceTracker::default()
    }

    /// Returns `true` if `reference`, reached at `depth`, should be printed as
    /// a circular reference instead of being expanded.
    ///
    /// When `true` is returned, the depth of the entry that triggered it is
    /// raised to `depth`. Otherwise a new entry is appended.
    ///
    /// # Examples
    ///
    /// ```
    /// use inklog::tracker::ReferenceTracker;
    /// use inklog::value::Record;
    ///
    /// let record = Record::new();
    /// let mut tracker = ReferenceTracker::new();
    ///
    /// assert!(!tracker.should_mark_circular(record.reference(), 0));
    /// assert!(tracker.should_mark_circular(record.reference(), 1));
    /// assert!(!tracker.should_mark_circular(record.reference(), 1));
    /// ```
    pub fn should_mark_circular(&mut self, reference: Reference, depth: usize) -> bool {
        for entry in self.entries.iter_mut() {
            if entry.reference == reference && depth > entry.depth {
                entry.depth = depth;
                return true;
            }
        }

        self.entries.push(Entry { reference, depth });
        false
    }

    /// Returns the number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::ReferenceTracker;
    use crate::value::{Record, Sequence};

    #[test]
    fn first_sighting_is_recorded() {
        let record = Record::new();
        let mut tracker = ReferenceTracker::new();

        assert!(!tracker.should_mark_circular(record.reference(), 3));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn deeper_sighting_is_circular_and_raises_depth() {
        let record = Record::new();
        let mut tracker = ReferenceTracker::new();

        assert!(!tracker.should_mark_circular(record.reference(), 0));
        assert!(tracker.should_mark_circular(record.reference(), 2));
        assert_eq!(tracker.len(), 1);

        // The entry now sits at depth 2, so depth 2 is not deeper.
        assert!(!tracker.should_mark_circular(record.reference(), 2));
        assert_eq!(tracker.len(), 2);
    }

    #[test]
    fn same_or_shallower_sightings_are_appended() {
        let sequence = Sequence::new();
        let mut tracker = ReferenceTracker::new();

        assert!(!tracker.should_mark_circular(sequence.reference(), 4));
        assert!(!tracker.should_mark_circular(sequence.reference(), 4));
        assert!(!tracker.should_mark_circular(sequence.reference(), 1));
        assert_eq!(tracker.len(), 3);

        // Deeper than the entry at depth 1, but the scan stops at the first
        // entry that is shallower.
        assert!(tracker.should_mark_circular(sequence.reference(), 5));
        assert_eq!(tracker.len(), 3);
    }

    #[test]
    fn distinct_references_do_not_interfere() {
        let a = Record::new();
        let b = Record::new();
        let mut tracker = ReferenceTracker::new();

        assert!(!tracker.should_mark_circular(a.reference(), 0));
        assert!(!tracker.should_mark_circular(b.reference(), 1));
        assert!(!tracker.should_mark_circular(b.reference(), 1));
        assert!(tracker.should_mark_circular(a.reference(), 1));
    }
}
