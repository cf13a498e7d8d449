//! Match lifecycle: one active match, its live score and a linear undo/redo history.
//!
//! `Scheduled -> Active -> Completed`, or `Active -> discarded` on cancellation.
//! Finishing is an explicit caller action; reaching the winning score only makes the
//! match finishable.

use crate::models::game::{GameMatch, MatchId, MatchStatus, TeamSide};
use crate::models::settings::{TournamentSettings, MAX_SCORE};
use crate::models::tournament::TournamentError;
use serde::{Deserialize, Serialize};

/// Score snapshots `(team_1, team_2)` with a cursor.
///
/// The first snapshot is always `(0, 0)` and the cursor always points at a snapshot.
/// Recording after an undo drops the undone snapshots (no redo tree).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawScoreHistory")]
pub struct ScoreHistory {
    snapshots: Vec<(u32, u32)>,
    cursor: usize,
}

/// Unchecked wire form of [`ScoreHistory`].
#[derive(Deserialize)]
struct RawScoreHistory {
    snapshots: Vec<(u32, u32)>,
    cursor: usize,
}

impl TryFrom<RawScoreHistory> for ScoreHistory {
    type Error = &'static str;

    fn try_from(raw: RawScoreHistory) -> Result<Self, Self::Error> {
        if raw.snapshots.first() != Some(&(0, 0)) {
            return Err("score history must start at 0-0");
        }
        if raw.cursor >= raw.snapshots.len() {
            return Err("score history cursor out of range");
        }
        if raw
            .snapshots
            .iter()
            .any(|&(team_1, team_2)| team_1 > MAX_SCORE || team_2 > MAX_SCORE)
        {
            return Err("score history holds an out-of-range score");
        }
        Ok(Self {
            snapshots: raw.snapshots,
            cursor: raw.cursor,
        })
    }
}

impl Default for ScoreHistory {
    fn default() -> Self {
        Self {
            snapshots: vec![(0, 0)],
            cursor: 0,
        }
    }
}

impl ScoreHistory {
    pub fn snapshots(&self) -> &[(u32, u32)] {
        &self.snapshots
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> (u32, u32) {
        self.snapshots[self.cursor]
    }

    fn push(&mut self, snapshot: (u32, u32)) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(snapshot);
        self.cursor = self.snapshots.len() - 1;
    }

    fn back(&mut self) -> Option<(u32, u32)> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    fn forward(&mut self) -> Option<(u32, u32)> {
        if self.cursor + 1 >= self.snapshots.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }
}

/// A match in the `Active` state together with its score history.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLiveMatch")]
pub struct LiveMatch {
    game: GameMatch,
    history: ScoreHistory,
}

#[derive(Deserialize)]
struct RawLiveMatch {
    game: GameMatch,
    history: ScoreHistory,
}

impl TryFrom<RawLiveMatch> for LiveMatch {
    type Error = &'static str;

    fn try_from(raw: RawLiveMatch) -> Result<Self, Self::Error> {
        if raw.game.status != MatchStatus::Active || raw.game.winner.is_some() {
            return Err("live match must be active and undecided");
        }
        if !raw.game.has_distinct_participants() {
            return Err("live match needs four distinct players");
        }
        if raw.game.scores() != raw.history.current() {
            return Err("live match score does not match its history");
        }
        Ok(Self {
            game: raw.game,
            history: raw.history,
        })
    }
}

impl LiveMatch {
    /// Promote a scheduled match to active, starting from 0–0.
    pub fn activate(mut game: GameMatch) -> Result<Self, TournamentError> {
        if game.status != MatchStatus::Scheduled {
            return Err(TournamentError::MatchNotScheduled(game.id));
        }
        game.status = MatchStatus::Active;
        game.team_1.score = 0;
        game.team_2.score = 0;
        game.winner = None;
        game.touch();
        Ok(Self {
            game,
            history: ScoreHistory::default(),
        })
    }

    pub fn game(&self) -> &GameMatch {
        &self.game
    }

    pub fn id(&self) -> MatchId {
        self.game.id
    }

    pub fn history(&self) -> &ScoreHistory {
        &self.history
    }

    pub fn scores(&self) -> (u32, u32) {
        self.game.scores()
    }

    /// Add `delta` goals (may be negative) to one team. Scores never go below 0.
    ///
    /// Returns the new `(team_1, team_2)` scores.
    pub fn update_score(
        &mut self,
        side: TeamSide,
        delta: i32,
        settings: &TournamentSettings,
    ) -> Result<(u32, u32), TournamentError> {
        let current = i64::from(self.game.team(side).score);
        let next = (current + i64::from(delta)).max(0);
        let next = u32::try_from(next)
            .ok()
            .filter(|&score| score <= MAX_SCORE)
            .ok_or(TournamentError::ScoreOutOfRange)?;
        let (team_1, team_2) = match side {
            TeamSide::One => (next, self.game.team_2.score),
            TeamSide::Two => (self.game.team_1.score, next),
        };
        self.set_scores(team_1, team_2, settings)
    }

    /// Set both scores directly. Recorded in the history like any other edit.
    ///
    /// Rejected with [`TournamentError::ScoreConflict`] if both teams would be at or above the
    /// winning score, since no winner could be decided, and with
    /// [`TournamentError::ScoreOutOfRange`] above [`MAX_SCORE`].
    pub fn set_scores(
        &mut self,
        team_1: u32,
        team_2: u32,
        settings: &TournamentSettings,
    ) -> Result<(u32, u32), TournamentError> {
        if team_1 > MAX_SCORE || team_2 > MAX_SCORE {
            return Err(TournamentError::ScoreOutOfRange);
        }
        if team_1 >= settings.winning_score && team_2 >= settings.winning_score {
            return Err(TournamentError::ScoreConflict);
        }
        self.history.push((team_1, team_2));
        self.restore((team_1, team_2));
        Ok((team_1, team_2))
    }

    pub fn can_undo(&self) -> bool {
        self.history.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.history.cursor + 1 < self.history.snapshots.len()
    }

    /// Step back one edit. Returns false (no-op) at the initial 0–0.
    pub fn undo(&mut self) -> bool {
        match self.history.back() {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Re-apply an undone edit. Returns false (no-op) at the newest snapshot.
    pub fn redo(&mut self) -> bool {
        match self.history.forward() {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Either team has reached the winning score.
    pub fn is_finishable(&self, settings: &TournamentSettings) -> bool {
        let (team_1, team_2) = self.scores();
        team_1 >= settings.winning_score || team_2 >= settings.winning_score
    }

    /// The team at or above the winning score, if exactly one is.
    pub fn winner(&self, settings: &TournamentSettings) -> Option<TeamSide> {
        let (team_1, team_2) = self.scores();
        match (
            team_1 >= settings.winning_score,
            team_2 >= settings.winning_score,
        ) {
            (true, false) => Some(TeamSide::One),
            (false, true) => Some(TeamSide::Two),
            _ => None,
        }
    }

    /// The completed match. The live state (and its history) is left for the caller to drop.
    pub fn finish(&self, settings: &TournamentSettings) -> Result<GameMatch, TournamentError> {
        if !self.is_finishable(settings) {
            return Err(TournamentError::NotFinishable);
        }
        // Both over the threshold is only reachable if the winning score was lowered mid-match.
        let winner = self
            .winner(settings)
            .ok_or(TournamentError::ScoreConflict)?;
        let mut completed = self.game.clone();
        completed.status = MatchStatus::Completed;
        completed.winner = Some(winner);
        completed.touch();
        Ok(completed)
    }

    /// Cancel the match. Nothing about it survives.
    pub fn discard(self) -> MatchId {
        self.game.id
    }

    fn restore(&mut self, (team_1, team_2): (u32, u32)) {
        self.game.team_1.score = team_1;
        self.game.team_2.score = team_2;
        self.game.touch();
    }
}
