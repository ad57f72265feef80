//! Matchup comparison engine for a time-trial leaderboard.
//!
//! Given two or more competitors' recorded times, the engine reconciles their
//! results per race segment, ranks them with tie-aware competition ranking,
//! computes gaps to the best and to the next-better result, derives a colour
//! gradient intensity per result, tallies segment wins and runs the same
//! ranked comparison over the season aggregate metrics.
//!
//! [`matchup::build_matchup`] is the entry point; it is a pure function of its
//! inputs and safe to call concurrently for independent matchups.

pub mod comparator;
pub mod data_loader;
pub mod error;
pub mod format;
pub mod matchup;
pub mod metrics;
pub mod report;

pub use comparator::{compare, RankedEntry, SegmentComparison, SortDirection};
pub use data_loader::{load_roster, AggregateStats, Competitor, RaceResult};
pub use error::MatchupError;
pub use matchup::{build_matchup, MatchupResult, MetricRow, SegmentKey, SegmentRow, TimingMode};
pub use metrics::AggregateMetric;
