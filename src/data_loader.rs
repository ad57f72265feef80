use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use thiserror::Error;

// Loads a competitor roster from a JSON file shaped like the leaderboard API
// responses: one object per requested player carrying their recorded times and
// the precomputed season stats snapshot. The engine itself never does I/O;
// this is the demo binary's feed.

#[derive(Error, Debug)]
pub enum RosterLoadError {
    #[error("failed to read roster file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse roster file: {0}")]
    Parse(#[from] serde_json::Error),
}

pub fn load_roster(file_path: impl AsRef<Path>) -> Result<Vec<Competitor>, RosterLoadError> {
    let data = fs::read_to_string(file_path)?;
    let roster: Vec<Competitor> = serde_json::from_str(&data)?;

    Ok(roster)
}

/// One participant in a matchup: a stable identity, their recorded times and a
/// season aggregate snapshot. Supplied per request; the engine never mutates it.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Competitor {
    // The API serves ids as strings in some endpoints.
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub id: u32,
    pub name: String,
    pub results: Vec<RaceResult>,
    pub stats: AggregateStats,
}

/// One recorded time for one competitor on one segment. Milliseconds, lower is
/// better.
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct RaceResult {
    #[serde(rename = "segmentCourseId")]
    pub course: u32,
    #[serde(rename = "isLap")]
    pub is_lap: bool,
    pub value: u32,
}

/// Season totals as served by the stats endpoint. The rank, standard and
/// record-ratio fields are raw accumulators over every segment; dividing them
/// down to per-segment averages is a display concern.
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct AggregateStats {
    #[serde(rename = "totalScore")]
    pub total_score: f64,
    #[serde(rename = "totalRank")]
    pub total_rank: f64,
    #[serde(rename = "totalStandard")]
    pub total_standard: f64,
    #[serde(rename = "totalRecordRatio")]
    pub total_record_ratio: f64,
    #[serde(rename = "leaderboardPoints")]
    pub leaderboard_points: f64,
}
