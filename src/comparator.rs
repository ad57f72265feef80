use serde::Serialize;

/// Lower bound of the colour-gradient scalar. The worst present value in a
/// segment lands exactly here.
pub const INTENSITY_FLOOR: u8 = 100;

/// Value handed out when the spread is zero (every present value equal,
/// including the singleton case). Same as the best value's intensity.
pub const INTENSITY_NEUTRAL: u8 = 255;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SortDirection {
    /// Lower is better (times, rank accumulators).
    Ascending,
    /// Higher is better (leaderboard points, win tallies).
    Descending,
}

impl SortDirection {
    // Maps a raw value onto the axis where smaller is always better.
    fn adjust(self, value: f64) -> f64 {
        match self {
            SortDirection::Ascending => value,
            SortDirection::Descending => -value,
        }
    }
}

/// Per-competitor outcome of one segment comparison. Only present competitors
/// get one; an absent competitor never receives a rank, gap or intensity.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RankedEntry {
    /// The raw value as supplied, untouched by direction adjustment.
    pub value: f64,
    /// Competition rank: the count of strictly better present values.
    /// Equal values share a rank, the next distinct value skips ahead.
    pub rank: usize,
    /// Distance behind the best present value. Zero for the whole rank-0 group.
    pub gap_to_best: f64,
    /// Distance behind the nearest strictly better value. Zero at rank 0.
    pub gap_to_next: f64,
    /// Gradient scalar in [100, 255], best = 255, worst = 100.
    pub intensity: u8,
}

/// One ranked comparison over a set of competitor values. Entries are parallel
/// to the roster order the values came in with.
#[derive(Clone, Debug, Serialize)]
pub struct SegmentComparison {
    pub entries: Vec<Option<RankedEntry>>,
    /// Worst minus best on the direction-adjusted axis. Zero when fewer than
    /// two distinct present values exist.
    pub spread: f64,
    /// Roster positions that rank 0. Ties put every tied competitor here.
    pub winners: Vec<usize>,
}

impl SegmentComparison {
    /// A comparison slot where nobody has a value. Segments discovered through
    /// one competitor but filtered out upstream still occupy their row.
    pub fn all_absent(len: usize) -> Self {
        Self {
            entries: vec![None; len],
            spread: 0.0,
            winners: Vec::new(),
        }
    }

    pub fn present_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }
}

/// Ranks one segment's values. Total over any input: absent competitors are
/// skipped, an empty present set yields an all-absent comparison, and a zero
/// spread (all values equal) makes everyone a rank-0 winner with neutral
/// intensity and zero gaps.
///
/// With exactly two present competitors the caller may swap the gradient for a
/// binary winner/loser colour; that is a presentation decision, the numeric
/// fields returned here are the same either way.
pub fn compare(values: &[Option<f64>], direction: SortDirection) -> SegmentComparison {
    let mut sorted: Vec<f64> = values
        .iter()
        .filter_map(|v| v.map(|v| direction.adjust(v)))
        .collect();

    if sorted.is_empty() {
        return SegmentComparison::all_absent(values.len());
    }

    sorted.sort_by(|a, b| a.total_cmp(b));

    let best = sorted[0];
    let worst = sorted[sorted.len() - 1];
    let spread = worst - best;

    let mut entries = Vec::with_capacity(values.len());
    let mut winners = Vec::new();

    for (pos, value) in values.iter().enumerate() {
        let Some(value) = *value else {
            entries.push(None);
            continue;
        };

        let adjusted = direction.adjust(value);
        let rank = sorted.partition_point(|&s| s < adjusted);

        if rank == 0 {
            winners.push(pos);
        }

        let gap_to_best = adjusted - best;
        // sorted[rank - 1] is the largest value of the immediately better
        // tie group, since everything below `rank` is strictly smaller.
        let gap_to_next = if rank == 0 { 0.0 } else { adjusted - sorted[rank - 1] };

        let intensity = if spread > 0.0 {
            INTENSITY_FLOOR + (155.0 * (worst - adjusted) / spread).floor() as u8
        } else {
            INTENSITY_NEUTRAL
        };

        entries.push(Some(RankedEntry {
            value,
            rank,
            gap_to_best,
            gap_to_next,
            intensity,
        }));
    }

    SegmentComparison {
        entries,
        spread,
        winners,
    }
}
