use serde::Serialize;

use crate::comparator::SortDirection;
use crate::data_loader::AggregateStats;
use crate::matchup::TimingMode;

/// The five season-long metrics that get the same ranked-comparison treatment
/// as an individual race segment. Each one declares its own sort direction and
/// whether its accumulator is divided down to a per-segment average for
/// display, so the consumer never re-derives that policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum AggregateMetric {
    TotalTime,
    AverageFinish,
    AverageStandard,
    RecordRatio,
    LeaderboardPoints,
}

impl AggregateMetric {
    pub const ALL: [AggregateMetric; 5] = [
        AggregateMetric::TotalTime,
        AggregateMetric::AverageFinish,
        AggregateMetric::AverageStandard,
        AggregateMetric::RecordRatio,
        AggregateMetric::LeaderboardPoints,
    ];

    pub fn direction(self) -> SortDirection {
        match self {
            AggregateMetric::LeaderboardPoints => SortDirection::Descending,
            _ => SortDirection::Ascending,
        }
    }

    /// Accumulator metrics are shown as `raw / divisor`; the comparison itself
    /// always runs on the raw accumulator.
    pub fn is_normalized(self) -> bool {
        matches!(
            self,
            AggregateMetric::AverageFinish
                | AggregateMetric::AverageStandard
                | AggregateMetric::RecordRatio
        )
    }

    /// The display divisor for this metric under the given timing mode. The
    /// full segment catalog has 32 courses, each timed two ways, so Overall
    /// averages over 64 entries and the single-mode views over 32.
    pub fn divisor(self, timing_mode: TimingMode) -> f64 {
        if self.is_normalized() {
            timing_mode.segment_count()
        } else {
            1.0
        }
    }

    pub fn value(self, stats: &AggregateStats) -> f64 {
        match self {
            AggregateMetric::TotalTime => stats.total_score,
            AggregateMetric::AverageFinish => stats.total_rank,
            AggregateMetric::AverageStandard => stats.total_standard,
            AggregateMetric::RecordRatio => stats.total_record_ratio,
            AggregateMetric::LeaderboardPoints => stats.leaderboard_points,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AggregateMetric::TotalTime => "Total Time",
            AggregateMetric::AverageFinish => "Average Finish",
            AggregateMetric::AverageStandard => "Average Standard",
            AggregateMetric::RecordRatio => "Record Ratio",
            AggregateMetric::LeaderboardPoints => "Leaderboard Points",
        }
    }
}
