use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of players on one side of a map.
pub const ROSTER_SIZE: usize = 5;

/// Number of players a complete map lists (two full rosters).
pub const LOBBY_SIZE: usize = ROSTER_SIZE * 2;

/// A team's vlr.gg rating as shown next to its name in the match header.
///
/// Teams without a rating render an empty `[]`; that is kept as
/// [`TeamRating::Unrated`] and written out as `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum TeamRating {
    Rated(u32),
    Unrated,
}

impl TeamRating {
    pub fn value(self) -> Option<u32> {
        match self {
            TeamRating::Rated(r) => Some(r),
            TeamRating::Unrated => None,
        }
    }
}

impl From<i64> for TeamRating {
    fn from(value: i64) -> Self {
        u32::try_from(value)
            .map(TeamRating::Rated)
            .unwrap_or(TeamRating::Unrated)
    }
}

impl From<TeamRating> for i64 {
    fn from(rating: TeamRating) -> Self {
        match rating {
            TeamRating::Rated(r) => i64::from(r),
            TeamRating::Unrated => -1,
        }
    }
}

/// One of the two teams playing a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: u32,
    pub name: String,
    /// Tag shown under player names in the map tables; only known once a map
    /// with player rows has been seen.
    pub short_name: Option<String>,
    pub rating: TeamRating,
}

/// Match-level context shared by every map of a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: u32,
    pub date: NaiveDate,
    /// Series score as rendered in the header, e.g. `2:1`.
    pub score: String,
    /// Series format, e.g. `Bo3`.
    pub style: String,
    pub event: String,
    pub teams: [Team; 2],
}

/// One played map within a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub match_id: u32,
    /// Position among the match's eligible maps, in pick order.
    pub game_index: usize,
    pub map: String,
    pub scores: [Option<u32>; 2],
    pub rounds_played: Option<u32>,
}

impl GameRecord {
    /// Map score in `13:7` form. Unavailable sides render empty.
    pub fn score_line(&self) -> String {
        let side = |s: Option<u32>| s.map(|v| v.to_string()).unwrap_or_default();
        format!("{}:{}", side(self.scores[0]), side(self.scores[1]))
    }
}

/// One player's line for one map. Field order is the column order of the
/// dataset file.
///
/// `None` marks a stat that did not render on the page, as opposed to a
/// rendered zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatRow {
    pub match_id: u32,
    pub match_date: NaiveDate,
    pub match_score: String,
    pub game_index: usize,
    pub map: String,
    pub game_score: String,
    pub agent: Option<String>,
    pub rounds_played: Option<u32>,
    pub player_id: u32,
    pub player_name: String,
    pub team_id: u32,
    pub team_name: String,
    pub team_short_name: Option<String>,
    pub team_rating: TeamRating,
    pub adr: Option<f64>,
    pub kills: Option<u32>,
    pub deaths: Option<u32>,
    pub assists: Option<u32>,
    pub kpr: Option<f64>,
    pub opponent_id: u32,
    pub opponent_name: String,
    pub opponent_short_name: Option<String>,
    pub opponent_rating: TeamRating,
}

/// Kills per round rounded to two decimals, unavailable when either input is.
pub fn kills_per_round(kills: Option<u32>, rounds_played: Option<u32>) -> Option<f64> {
    let kills = kills?;
    let rounds = rounds_played.filter(|r| *r > 0)?;
    Some((f64::from(kills) / f64::from(rounds) * 100.0).round() / 100.0)
}
