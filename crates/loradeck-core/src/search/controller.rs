// ── Search lifecycle ──
//
// State machine for the device-location search. Validation happens
// before a ticket is handed out; completions carry the ticket's
// sequence number so a stale response can never clobber a newer one.

use tracing::debug;

use crate::error::CoreError;
use crate::model::SnapshotSeries;
use crate::search::index::SnapshotIndex;

/// Uplinks fetched per search when the user leaves the field alone.
pub const DEFAULT_QUERY_LIMIT: u32 = 5;

/// A validated uplink-count limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryLimit(u32);

impl QueryLimit {
    /// Parse user input. Whitespace is tolerated; anything that is not
    /// a positive integer is rejected before any request goes out.
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        let trimmed = input.trim();
        match trimmed.parse::<u32>() {
            Ok(n) if n > 0 => Ok(Self(n)),
            _ => Err(CoreError::ValidationFailed {
                message: format!("limit must be a positive integer, got {trimmed:?}"),
            }),
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for QueryLimit {
    fn default() -> Self {
        Self(DEFAULT_QUERY_LIMIT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    #[default]
    Idle,
    Loading,
    Loaded,
}

/// Permission to run one query. The caller dispatches the request and
/// reports back with the same sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryTicket {
    pub seq: u64,
    pub limit: u32,
}

/// Drives a search from input through loading to a loaded series.
#[derive(Debug, Default)]
pub struct SearchController {
    limit_input: String,
    phase: SearchPhase,
    error: Option<String>,
    next_seq: u64,
    current_seq: Option<u64>,
    index: SnapshotIndex,
}

impl SearchController {
    pub fn new() -> Self {
        Self {
            limit_input: DEFAULT_QUERY_LIMIT.to_string(),
            ..Self::default()
        }
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn limit_input(&self) -> &str {
        &self.limit_input
    }

    pub fn set_limit_input(&mut self, input: impl Into<String>) {
        self.limit_input = input.into();
    }

    pub fn index(&self) -> &SnapshotIndex {
        &self.index
    }

    pub fn index_mut(&mut self) -> &mut SnapshotIndex {
        &mut self.index
    }

    /// Validate the limit field and enter Loading. On success the
    /// returned ticket supersedes every earlier one. The entered limit
    /// stays in the field for the next search.
    pub fn begin_search(&mut self) -> Result<QueryTicket, CoreError> {
        let limit = QueryLimit::parse(&self.limit_input)?;
        self.next_seq += 1;
        let ticket = QueryTicket {
            seq: self.next_seq,
            limit: limit.get(),
        };
        self.current_seq = Some(ticket.seq);
        self.phase = SearchPhase::Loading;
        self.error = None;
        Ok(ticket)
    }

    /// Deliver the outcome for a ticket. Responses whose sequence is
    /// not the current one are discarded without touching any state.
    ///
    /// Returns whether the outcome was applied, so callers holding view
    /// state of their own (map focus, selections) know to leave it
    /// alone for a discarded response.
    pub fn complete(&mut self, seq: u64, outcome: Result<SnapshotSeries, CoreError>) -> bool {
        if self.current_seq != Some(seq) {
            debug!(seq, current = ?self.current_seq, "discarding stale search result");
            return false;
        }
        self.current_seq = None;
        match outcome {
            Ok(series) => {
                self.index.load(series);
                self.phase = SearchPhase::Loaded;
                self.error = None;
            }
            Err(err) => {
                self.phase = SearchPhase::Idle;
                self.error = Some(err.to_string());
            }
        }
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::Snapshot;
    use chrono::Utc;

    fn series(n: usize) -> SnapshotSeries {
        SnapshotSeries::new(
            (0..n)
                .map(|_| Snapshot {
                    time: Utc::now(),
                    receptions: vec![],
                })
                .collect(),
        )
    }

    #[test]
    fn limit_parses_positive_integers_only() {
        assert_eq!(QueryLimit::parse("5").unwrap().get(), 5);
        assert_eq!(QueryLimit::parse(" 20 ").unwrap().get(), 20);
        assert!(QueryLimit::parse("0").is_err());
        assert!(QueryLimit::parse("-3").is_err());
        assert!(QueryLimit::parse("abc").is_err());
        assert!(QueryLimit::parse("").is_err());
        assert!(QueryLimit::parse("5.5").is_err());
    }

    #[test]
    fn invalid_limit_never_starts_loading() {
        let mut ctl = SearchController::new();
        ctl.set_limit_input("nope");
        assert!(ctl.begin_search().is_err());
        assert_eq!(ctl.phase(), SearchPhase::Idle);
    }

    #[test]
    fn successful_search_loads_and_clears_error() {
        let mut ctl = SearchController::new();
        let ticket = ctl.begin_search().unwrap();
        assert_eq!(ticket.limit, DEFAULT_QUERY_LIMIT);
        assert_eq!(ctl.phase(), SearchPhase::Loading);

        ctl.complete(ticket.seq, Ok(series(2)));
        assert_eq!(ctl.phase(), SearchPhase::Loaded);
        assert_eq!(ctl.index().len(), 2);
        assert!(ctl.error().is_none());
    }

    #[test]
    fn failure_returns_to_idle_with_error() {
        let mut ctl = SearchController::new();
        let ticket = ctl.begin_search().unwrap();
        ctl.complete(
            ticket.seq,
            Err(CoreError::ConnectionFailed {
                reason: "timed out".into(),
            }),
        );
        assert_eq!(ctl.phase(), SearchPhase::Idle);
        assert!(ctl.error().unwrap().contains("timed out"));
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut ctl = SearchController::new();
        let first = ctl.begin_search().unwrap();
        let second = ctl.begin_search().unwrap();
        assert!(second.seq > first.seq);

        // The slow first response arrives after the second was issued.
        assert!(!ctl.complete(first.seq, Ok(series(9))));
        assert_eq!(ctl.phase(), SearchPhase::Loading);
        assert_eq!(ctl.index().len(), 0);

        assert!(ctl.complete(second.seq, Ok(series(1))));
        assert_eq!(ctl.phase(), SearchPhase::Loaded);
        assert_eq!(ctl.index().len(), 1);
    }

    #[test]
    fn stale_failure_does_not_clear_loaded_data() {
        let mut ctl = SearchController::new();
        let first = ctl.begin_search().unwrap();
        ctl.complete(first.seq, Ok(series(3)));

        let second = ctl.begin_search().unwrap();
        ctl.complete(second.seq, Ok(series(1)));
        let applied = ctl.complete(
            first.seq,
            Err(CoreError::Server {
                message: "late error".into(),
            }),
        );
        assert!(!applied);
        assert_eq!(ctl.phase(), SearchPhase::Loaded);
        assert_eq!(ctl.index().len(), 1);
        assert!(ctl.error().is_none());
    }

    #[test]
    fn entered_limit_survives_the_search() {
        let mut ctl = SearchController::new();
        ctl.set_limit_input("20");
        let ticket = ctl.begin_search().unwrap();
        assert_eq!(ticket.limit, 20);
        ctl.complete(ticket.seq, Ok(series(1)));
        assert_eq!(ctl.limit_input(), "20");
    }
}
