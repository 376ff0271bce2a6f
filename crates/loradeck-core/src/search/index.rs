// ── Snapshot index ──
//
// Holds the fetched series and the selected snapshot. No I/O; all side
// effects stay inside this struct's own state.

use crate::model::{ReceptionRecord, Snapshot, SnapshotSeries};

/// A selectable snapshot label: index plus human-readable timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotLabel {
    pub value: usize,
    pub label: String,
}

/// In-memory model for one loaded snapshot series and its selection.
///
/// Selection defaults to the first (index 0) snapshot on load and is
/// clamped silently: out-of-range `select` calls are no-ops.
#[derive(Debug, Clone, Default)]
pub struct SnapshotIndex {
    series: SnapshotSeries,
    selected: usize,
}

impl SnapshotIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the series wholesale and reset selection to index 0.
    pub fn load(&mut self, series: SnapshotSeries) {
        self.series = series;
        self.selected = 0;
    }

    /// Change the active snapshot. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.series.len() {
            self.selected = index;
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn series(&self) -> &SnapshotSeries {
        &self.series
    }

    /// Labels for every snapshot, preserving series order.
    pub fn labels(&self) -> Vec<SnapshotLabel> {
        self.series
            .iter()
            .enumerate()
            .map(|(value, snap)| SnapshotLabel {
                value,
                label: snap.time.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            })
            .collect()
    }

    /// The currently selected snapshot, if a series is loaded.
    pub fn active_snapshot(&self) -> Option<&Snapshot> {
        self.series.get(self.selected)
    }

    /// The reception records of the selected snapshot, or an empty
    /// slice when nothing is loaded.
    pub fn active_receptions(&self) -> &[ReceptionRecord] {
        self.active_snapshot()
            .map_or(&[], |snap| snap.receptions.as_slice())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{ReceptionRecord, Signal, Snapshot};
    use chrono::{TimeZone, Utc};

    fn record(gw: &str) -> ReceptionRecord {
        ReceptionRecord {
            gateway_id: gw.into(),
            signal: Signal::default(),
            location: None,
            distance_m: 0.0,
        }
    }

    fn series(n: usize) -> SnapshotSeries {
        SnapshotSeries::new(
            (0..n)
                .map(|i| Snapshot {
                    time: Utc.with_ymd_and_hms(2024, 5, 2, 10, 0, u32::try_from(i).unwrap()).unwrap(),
                    receptions: vec![record(&format!("gw-{i}"))],
                })
                .collect(),
        )
    }

    #[test]
    fn load_selects_first_and_labels_all_in_order() {
        let mut index = SnapshotIndex::new();
        index.load(series(3));

        assert_eq!(index.selected(), 0);
        let labels = index.labels();
        assert_eq!(labels.len(), 3);
        assert_eq!(labels[0].value, 0);
        assert_eq!(labels[0].label, "2024-05-02 10:00:00 UTC");
        assert_eq!(labels[2].label, "2024-05-02 10:00:02 UTC");
    }

    #[test]
    fn out_of_range_select_is_a_noop() {
        let mut index = SnapshotIndex::new();
        index.load(series(2));
        index.select(1);
        assert_eq!(index.selected(), 1);

        index.select(2);
        assert_eq!(index.selected(), 1);
        assert_eq!(index.active_receptions()[0].gateway_id, "gw-1");
    }

    #[test]
    fn reload_resets_selection() {
        let mut index = SnapshotIndex::new();
        index.load(series(3));
        index.select(2);
        index.load(series(1));
        assert_eq!(index.selected(), 0);
    }

    #[test]
    fn empty_index_has_no_receptions() {
        let index = SnapshotIndex::new();
        assert!(index.active_receptions().is_empty());
        assert!(index.labels().is_empty());
        assert!(index.active_snapshot().is_none());
    }
}
