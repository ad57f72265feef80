use thiserror::Error;

// The engine only ever rejects a malformed roster. Missing results, zero-result
// competitors and all-tied segments are steady-state data, not errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchupError {
    #[error("a matchup needs at least two competitors, got {0}")]
    RosterTooSmall(usize),
    #[error("competitor {0} appears more than once in the roster")]
    DuplicateCompetitor(u32),
}
