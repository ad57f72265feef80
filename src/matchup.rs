use std::collections::{BTreeSet, HashSet};

use serde::Serialize;
use tracing::debug;

use crate::comparator::{compare, SegmentComparison, SortDirection};
use crate::data_loader::Competitor;
use crate::error::MatchupError;
use crate::metrics::AggregateMetric;

/// Which of a competitor's recorded times take part in the matchup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum TimingMode {
    CourseOnly,
    LapOnly,
    Overall,
}

impl TimingMode {
    fn includes(self, is_lap: bool) -> bool {
        match self {
            TimingMode::CourseOnly => !is_lap,
            TimingMode::LapOnly => is_lap,
            TimingMode::Overall => true,
        }
    }

    /// Size of the full segment catalog under this mode, used to average the
    /// season accumulators down for display.
    pub fn segment_count(self) -> f64 {
        match self {
            TimingMode::Overall => 64.0,
            TimingMode::CourseOnly | TimingMode::LapOnly => 32.0,
        }
    }
}

/// Identifies one race segment: a course timed either over the full run or a
/// single lap. Ordering is by course first, lap flag second, which fixes the
/// row order of the output matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SegmentKey {
    pub course: u32,
    pub is_lap: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct SegmentRow {
    pub key: SegmentKey,
    pub comparison: SegmentComparison,
}

#[derive(Clone, Debug, Serialize)]
pub struct MetricRow {
    pub metric: AggregateMetric,
    pub direction: SortDirection,
    /// Display divisor for this metric (1.0 when the raw value is shown).
    pub divisor: f64,
    pub comparison: SegmentComparison,
}

/// The assembled comparison matrix for one matchup. All sequences are parallel
/// to the roster order the competitors were supplied in.
#[derive(Clone, Debug, Serialize)]
pub struct MatchupResult {
    /// One row per discovered segment, ascending by `SegmentKey`.
    pub segments: Vec<SegmentRow>,
    /// Count of segments each competitor won. A tie for first counts as a win
    /// for every tied competitor.
    pub win_tally: Vec<u32>,
    /// The tally row itself ranked like a segment (more wins is better).
    pub tally_comparison: SegmentComparison,
    /// One row per season aggregate metric, in `AggregateMetric::ALL` order.
    pub aggregates: Vec<MetricRow>,
    /// True when the segment union holds both lap and full-course rows, which
    /// only happens under `Overall`. The consumer uses this to decide whether
    /// to render split course/lap sub-columns; no engine logic branches on it.
    pub mixed_segment_types: bool,
}

/// Builds the full comparison matrix for a roster of competitors.
///
/// The segment set is the union of every competitor's results under the
/// requested timing mode, not a fixed catalog: a segment only one competitor
/// has driven still becomes a row, with everyone else absent on it. Fails only
/// on a malformed roster (fewer than two competitors, or a duplicate
/// identity); missing data never errors.
pub fn build_matchup(
    competitors: &[Competitor],
    timing_mode: TimingMode,
) -> Result<MatchupResult, MatchupError> {
    if competitors.len() < 2 {
        return Err(MatchupError::RosterTooSmall(competitors.len()));
    }

    let mut seen = HashSet::new();
    for competitor in competitors {
        if !seen.insert(competitor.id) {
            return Err(MatchupError::DuplicateCompetitor(competitor.id));
        }
    }

    // Segment discovery. BTreeSet keeps the union in SegmentKey order.
    let mut union: BTreeSet<SegmentKey> = BTreeSet::new();
    for competitor in competitors {
        for result in &competitor.results {
            if timing_mode.includes(result.is_lap) {
                union.insert(SegmentKey {
                    course: result.course,
                    is_lap: result.is_lap,
                });
            }
        }
    }

    let has_lap = union.iter().any(|key| key.is_lap);
    let has_course = union.iter().any(|key| !key.is_lap);
    let mixed_segment_types = has_lap && has_course;

    debug!(
        segments = union.len(),
        competitors = competitors.len(),
        mixed = mixed_segment_types,
        "segment union discovered"
    );

    let mut segments = Vec::with_capacity(union.len());
    let mut win_tally = vec![0u32; competitors.len()];

    for key in union {
        let values: Vec<Option<f64>> = competitors
            .iter()
            .map(|competitor| {
                competitor
                    .results
                    .iter()
                    .find(|r| r.course == key.course && r.is_lap == key.is_lap)
                    .map(|r| f64::from(r.value))
            })
            .collect();

        let comparison = compare(&values, SortDirection::Ascending);

        for &winner in &comparison.winners {
            win_tally[winner] += 1;
        }

        segments.push(SegmentRow { key, comparison });
    }

    let tally_values: Vec<Option<f64>> =
        win_tally.iter().map(|&wins| Some(f64::from(wins))).collect();
    let tally_comparison = compare(&tally_values, SortDirection::Descending);

    // Aggregate-metric pass: each season metric becomes a synthetic segment
    // with one value per competitor, ranked on the raw accumulator.
    let aggregates = AggregateMetric::ALL
        .iter()
        .map(|&metric| {
            let values: Vec<Option<f64>> = competitors
                .iter()
                .map(|competitor| Some(metric.value(&competitor.stats)))
                .collect();

            MetricRow {
                metric,
                direction: metric.direction(),
                divisor: metric.divisor(timing_mode),
                comparison: compare(&values, metric.direction()),
            }
        })
        .collect();

    Ok(MatchupResult {
        segments,
        win_tally,
        tally_comparison,
        aggregates,
        mixed_segment_types,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_loader::{AggregateStats, RaceResult};

    fn stats(
        total_score: f64,
        total_rank: f64,
        total_standard: f64,
        total_record_ratio: f64,
        leaderboard_points: f64,
    ) -> AggregateStats {
        AggregateStats {
            total_score,
            total_rank,
            total_standard,
            total_record_ratio,
            leaderboard_points,
        }
    }

    fn competitor(id: u32, results: &[(u32, bool, u32)], stats: AggregateStats) -> Competitor {
        Competitor {
            id,
            name: format!("Player {id}"),
            results: results
                .iter()
                .map(|&(course, is_lap, value)| RaceResult {
                    course,
                    is_lap,
                    value,
                })
                .collect(),
            stats,
        }
    }

    fn flat_stats() -> AggregateStats {
        stats(1000.0, 100.0, 50.0, 30.0, 200.0)
    }

    #[test]
    fn rejects_short_rosters() {
        assert_eq!(
            build_matchup(&[], TimingMode::Overall).unwrap_err(),
            MatchupError::RosterTooSmall(0)
        );

        let solo = vec![competitor(1, &[], flat_stats())];
        assert_eq!(
            build_matchup(&solo, TimingMode::Overall).unwrap_err(),
            MatchupError::RosterTooSmall(1)
        );
    }

    #[test]
    fn rejects_duplicate_identities() {
        let roster = vec![
            competitor(5, &[], flat_stats()),
            competitor(5, &[], flat_stats()),
        ];

        assert_eq!(
            build_matchup(&roster, TimingMode::Overall).unwrap_err(),
            MatchupError::DuplicateCompetitor(5)
        );
    }

    #[test]
    fn union_covers_every_driven_segment() {
        let roster = vec![
            competitor(1, &[(1, false, 90_000), (2, false, 120_000)], flat_stats()),
            competitor(2, &[(2, false, 118_000), (3, true, 31_000)], flat_stats()),
        ];

        let result = build_matchup(&roster, TimingMode::Overall).unwrap();

        let keys: Vec<SegmentKey> = result.segments.iter().map(|row| row.key).collect();
        assert_eq!(
            keys,
            vec![
                SegmentKey { course: 1, is_lap: false },
                SegmentKey { course: 2, is_lap: false },
                SegmentKey { course: 3, is_lap: true },
            ]
        );

        // Competitor 2 never drove course 1; absent, not zero.
        assert!(result.segments[0].comparison.entries[1].is_none());
        assert!(result.segments[0].comparison.entries[0].is_some());
        assert!(result.mixed_segment_types);
    }

    #[test]
    fn timing_mode_filters_the_union() {
        let roster = vec![
            competitor(1, &[(4, false, 95_000), (4, true, 29_000)], flat_stats()),
            competitor(2, &[(4, false, 94_500), (5, true, 28_000)], flat_stats()),
        ];

        let course = build_matchup(&roster, TimingMode::CourseOnly).unwrap();
        assert_eq!(course.segments.len(), 1);
        assert!(!course.segments[0].key.is_lap);
        assert!(!course.mixed_segment_types);

        let lap = build_matchup(&roster, TimingMode::LapOnly).unwrap();
        assert_eq!(lap.segments.len(), 2);
        assert!(lap.segments.iter().all(|row| row.key.is_lap));
        assert!(!lap.mixed_segment_types);

        let overall = build_matchup(&roster, TimingMode::Overall).unwrap();
        assert_eq!(overall.segments.len(), 3);
        assert!(overall.mixed_segment_types);
    }

    #[test]
    fn segment_rows_come_out_sorted() {
        // Course ascending, full-course before lap within a course.
        let roster = vec![
            competitor(
                1,
                &[(9, true, 30_000), (2, true, 28_000), (9, false, 91_000)],
                flat_stats(),
            ),
            competitor(2, &[(2, false, 121_000)], flat_stats()),
        ];

        let result = build_matchup(&roster, TimingMode::Overall).unwrap();
        let keys: Vec<SegmentKey> = result.segments.iter().map(|row| row.key).collect();

        assert_eq!(
            keys,
            vec![
                SegmentKey { course: 2, is_lap: false },
                SegmentKey { course: 2, is_lap: true },
                SegmentKey { course: 9, is_lap: false },
                SegmentKey { course: 9, is_lap: true },
            ]
        );
    }

    #[test]
    fn win_tally_counts_shared_first_place_for_everyone() {
        let roster = vec![
            competitor(1, &[(1, false, 90_000), (2, false, 100_000)], flat_stats()),
            competitor(2, &[(1, false, 90_000), (2, false, 101_000)], flat_stats()),
            competitor(3, &[(2, false, 102_000)], flat_stats()),
        ];

        let result = build_matchup(&roster, TimingMode::Overall).unwrap();

        // Course 1 ties both to rank 0; course 2 goes to competitor 1 alone.
        assert_eq!(result.win_tally, vec![2, 1, 0]);
        assert_eq!(result.tally_comparison.winners, vec![0]);
    }

    #[test]
    fn zero_result_competitor_is_absent_everywhere() {
        let roster = vec![
            competitor(1, &[(1, false, 90_000)], flat_stats()),
            competitor(2, &[], flat_stats()),
        ];

        let result = build_matchup(&roster, TimingMode::Overall).unwrap();

        assert_eq!(result.segments.len(), 1);
        assert!(result.segments[0].comparison.entries[1].is_none());
        assert_eq!(result.win_tally, vec![1, 0]);
    }

    #[test]
    fn leaderboard_points_rank_descending() {
        let roster = vec![
            competitor(1, &[], stats(1000.0, 100.0, 50.0, 30.0, 500.0)),
            competitor(2, &[], stats(900.0, 90.0, 45.0, 25.0, 300.0)),
        ];

        let result = build_matchup(&roster, TimingMode::Overall).unwrap();

        let points = result
            .aggregates
            .iter()
            .find(|row| row.metric == AggregateMetric::LeaderboardPoints)
            .unwrap();
        assert_eq!(points.direction, SortDirection::Descending);
        assert_eq!(points.comparison.winners, vec![0]);

        // Total time is ascending, so the lower total wins.
        let total = result
            .aggregates
            .iter()
            .find(|row| row.metric == AggregateMetric::TotalTime)
            .unwrap();
        assert_eq!(total.comparison.winners, vec![1]);
    }

    #[test]
    fn aggregates_rank_on_raw_accumulators() {
        let roster = vec![
            competitor(1, &[], stats(1000.0, 640.0, 50.0, 30.0, 500.0)),
            competitor(2, &[], stats(900.0, 512.0, 45.0, 25.0, 300.0)),
        ];

        let result = build_matchup(&roster, TimingMode::Overall).unwrap();

        let finish = result
            .aggregates
            .iter()
            .find(|row| row.metric == AggregateMetric::AverageFinish)
            .unwrap();

        // The comparison carries the raw accumulator; the divisor rides along
        // for display only.
        let entry = finish.comparison.entries[0].unwrap();
        assert_eq!(entry.value, 640.0);
        assert_eq!(entry.gap_to_best, 128.0);
        assert_eq!(finish.divisor, 64.0);

        let lap_only = build_matchup(&roster, TimingMode::LapOnly).unwrap();
        let finish = lap_only
            .aggregates
            .iter()
            .find(|row| row.metric == AggregateMetric::AverageFinish)
            .unwrap();
        assert_eq!(finish.divisor, 32.0);
    }

    #[test]
    fn inputs_are_left_untouched() {
        let roster = vec![
            competitor(1, &[(1, false, 90_000)], flat_stats()),
            competitor(2, &[(1, false, 91_000)], flat_stats()),
        ];
        let before = format!("{roster:?}");

        build_matchup(&roster, TimingMode::Overall).unwrap();
        build_matchup(&roster, TimingMode::CourseOnly).unwrap();

        assert_eq!(format!("{roster:?}"), before);
    }
}
