//! # Chord Segmentation
//!
//! Groups a column-sorted note stream into clusters of notes played together.
//!
//! Two or more consecutive notes with the same column form a cluster. A note
//! with no column partner is not a chord and is dropped here, so it never
//! reaches the matcher.
//!
//! The scan uses a single index that always advances past the end of the
//! cluster it just emitted. The last note of the stream is therefore only ever
//! compared as the right-hand member of a pair.

use crate::tab::NoteEvent;

/// A run of notes sharing one column, borrowed from the note stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChordCluster<'a> {
    notes: &'a [NoteEvent],
}

impl<'a> ChordCluster<'a> {
    pub fn new(notes: &'a [NoteEvent]) -> Self {
        Self { notes }
    }

    pub fn notes(&self) -> &'a [NoteEvent] {
        self.notes
    }

    /// Column shared by every member, `None` for an empty cluster
    pub fn column(&self) -> Option<usize> {
        self.notes.first().map(|n| n.column)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

/// Partition a column-sorted note stream into clusters of simultaneous notes.
pub fn segment(notes: &[NoteEvent]) -> Vec<ChordCluster<'_>> {
    let mut clusters = Vec::new();
    let last = notes.len().saturating_sub(1);
    let mut i = 0;

    while i < last {
        if notes[i].column == notes[i + 1].column {
            let start = i;
            let column = notes[i].column;
            i += 1;
            while i < last && notes[i + 1].column == column {
                i += 1;
            }
            // i now sits on the final member of the run
            let cluster = ChordCluster::new(&notes[start..=i]);
            tracing::trace!(column, size = cluster.len(), "found cluster");
            clusters.push(cluster);
        }
        i += 1;
    }

    clusters
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(string: u8, column: usize) -> NoteEvent {
        NoteEvent::new(string, 0, column)
    }

    fn columns(clusters: &[ChordCluster<'_>]) -> Vec<(usize, usize)> {
        clusters
            .iter()
            .map(|c| (c.column().unwrap(), c.len()))
            .collect()
    }

    #[test]
    fn test_empty_and_single_streams_have_no_clusters() {
        assert!(segment(&[]).is_empty());
        assert!(segment(&[note(1, 4)]).is_empty());
    }

    #[test]
    fn test_two_notes_same_column() {
        let notes = [note(1, 5), note(2, 5)];
        let clusters = segment(&notes);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].notes(), &notes[..]);
    }

    #[test]
    fn test_singletons_are_dropped() {
        let notes = [note(1, 2), note(3, 4), note(2, 6), note(5, 8)];
        assert!(segment(&notes).is_empty());
    }

    #[test]
    fn test_pairs_separated_by_singles() {
        let notes = [
            note(1, 2),
            note(2, 2),
            note(3, 3),
            note(4, 4),
            note(5, 5),
            note(6, 5),
        ];
        let clusters = segment(&notes);
        assert_eq!(columns(&clusters), vec![(2, 2), (5, 2)]);
    }

    #[test]
    fn test_run_extends_to_all_matching_notes() {
        let notes = [
            note(1, 2),
            note(2, 2),
            note(3, 2),
            note(4, 2),
            note(1, 7),
        ];
        let clusters = segment(&notes);
        assert_eq!(columns(&clusters), vec![(2, 4)]);
    }

    #[test]
    fn test_adjacent_clusters_are_separate() {
        let notes = [
            note(1, 2),
            note(2, 2),
            note(3, 2),
            note(1, 3),
            note(2, 3),
        ];
        let clusters = segment(&notes);
        assert_eq!(columns(&clusters), vec![(2, 3), (3, 2)]);
    }

    #[test]
    fn test_cluster_at_end_of_stream() {
        let notes = [note(1, 1), note(2, 9), note(3, 9), note(4, 9)];
        let clusters = segment(&notes);
        assert_eq!(columns(&clusters), vec![(9, 3)]);
        assert_eq!(clusters[0].notes()[0].string, 2);
    }

    #[test]
    fn test_trailing_single_after_cluster() {
        let notes = [note(1, 4), note(2, 4), note(3, 6)];
        let clusters = segment(&notes);
        assert_eq!(columns(&clusters), vec![(4, 2)]);
    }
}
