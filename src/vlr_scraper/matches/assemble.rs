use itertools::izip;
use scraper::{ElementRef, Html};
use tracing::{debug, instrument};

use crate::error::{Result, VlrError};
use crate::model::{
    kills_per_round, GameRecord, MatchRecord, PlayerStatRow, Team, LOBBY_SIZE, ROSTER_SIZE,
};
use crate::vlr_scraper::matches::extract;

/// Match-level context extracted once and shared by every map.
///
/// Team short names are left unset; each map fills them in from its own
/// player tables.
pub fn extract_match_context(page: &ElementRef, match_id: u32) -> Result<MatchRecord> {
    let [id_a, id_b] = extract::team_ids(page)?;
    let [name_a, name_b] = extract::team_names_long(page)?;
    let [rating_a, rating_b] = extract::team_ratings(page)?;

    Ok(MatchRecord {
        id: match_id,
        date: extract::match_date(page)?,
        score: extract::match_score(page)?,
        style: extract::match_style(page)?,
        event: extract::match_event(page)?,
        teams: [
            Team {
                id: id_a,
                name: name_a,
                short_name: None,
                rating: rating_a,
            },
            Team {
                id: id_b,
                name: name_b,
                short_name: None,
                rating: rating_b,
            },
        ],
    })
}

/// Full match record, with team short names taken from the first map that
/// lists player rows.
pub fn extract_match_record(page: &ElementRef, match_id: u32) -> Result<MatchRecord> {
    let mut record = extract_match_context(page, match_id)?;
    for game in extract::game_fragments(page)? {
        let tags = extract::team_names_short(&game)?;
        if tags.len() == LOBBY_SIZE {
            record.teams[0].short_name = tags[0].clone();
            record.teams[1].short_name = tags[ROSTER_SIZE].clone();
            break;
        }
    }
    Ok(record)
}

pub fn extract_game_record(
    match_id: u32,
    game_index: usize,
    game: &ElementRef,
) -> Result<GameRecord> {
    Ok(GameRecord {
        match_id,
        game_index,
        map: extract::game_map(game)?,
        scores: extract::game_scores(game)?,
        rounds_played: extract::rounds_played(game)?,
    })
}

fn ensure_aligned<T>(map: &str, field: &'static str, values: &[T]) -> Result<()> {
    if values.len() != LOBBY_SIZE {
        return Err(VlrError::MisalignedStats {
            map: map.to_string(),
            field,
            expected: LOBBY_SIZE,
            found: values.len(),
        });
    }
    Ok(())
}

/// Rows for one map, one per player, first roster then second.
///
/// Returns an empty list when the map shows fewer than ten players, before
/// anything else on the map is read. A map with more than ten players, or
/// whose two team tables do not hold five each, is rejected: the first five
/// rows are taken as the first team and the next five as the second.
#[instrument(skip(context, game), fields(match_id = context.id))]
pub fn assemble_game(
    context: &MatchRecord,
    game_index: usize,
    game: &ElementRef,
) -> Result<Vec<PlayerStatRow>> {
    let names = extract::player_names(game)?;
    if names.len() < LOBBY_SIZE {
        debug!(game_index, players = names.len(), "skipping incomplete map");
        return Ok(vec![]);
    }

    let record = extract_game_record(context.id, game_index, game)?;
    if names.len() > LOBBY_SIZE {
        return Err(VlrError::RosterShape {
            map: record.map,
            expected: LOBBY_SIZE,
            found: names.len(),
        });
    }

    let ids = extract::player_ids(game)?;
    let tags = extract::team_names_short(game)?;
    let agents = extract::player_agents(game)?;
    let adrs = extract::player_adrs(game)?;
    let kills = extract::player_kills(game)?;
    let deaths = extract::player_deaths(game)?;
    let assists = extract::player_assists(game)?;
    ensure_aligned(&record.map, "player ids", &ids)?;
    ensure_aligned(&record.map, "team tags", &tags)?;
    ensure_aligned(&record.map, "agents", &agents)?;
    ensure_aligned(&record.map, "adr", &adrs)?;
    ensure_aligned(&record.map, "kills", &kills)?;
    ensure_aligned(&record.map, "deaths", &deaths)?;
    ensure_aligned(&record.map, "assists", &assists)?;

    let sizes = extract::roster_sizes(game)?;
    if sizes != [ROSTER_SIZE, ROSTER_SIZE] {
        return Err(VlrError::UnevenRosters {
            map: record.map,
            sizes,
        });
    }

    let mut teams = context.teams.clone();
    teams[0].short_name = tags[0].clone();
    teams[1].short_name = tags[ROSTER_SIZE].clone();

    let game_score = record.score_line();
    let rows = izip!(names, ids, agents, adrs, kills, deaths, assists)
        .enumerate()
        .map(|(index, (name, id, agent, adr, kills, deaths, assists))| {
            let (team, opponent) = if index < ROSTER_SIZE {
                (&teams[0], &teams[1])
            } else {
                (&teams[1], &teams[0])
            };
            PlayerStatRow {
                match_id: context.id,
                match_date: context.date,
                match_score: context.score.clone(),
                game_index,
                map: record.map.clone(),
                game_score: game_score.clone(),
                agent,
                rounds_played: record.rounds_played,
                player_id: id,
                player_name: name,
                team_id: team.id,
                team_name: team.name.clone(),
                team_short_name: team.short_name.clone(),
                team_rating: team.rating,
                adr,
                kills,
                deaths,
                assists,
                kpr: kills_per_round(kills, record.rounds_played),
                opponent_id: opponent.id,
                opponent_name: opponent.name.clone(),
                opponent_short_name: opponent.short_name.clone(),
                opponent_rating: opponent.rating,
            }
        })
        .collect();
    Ok(rows)
}

/// Every row of a match: maps in pick order, players in roster order.
#[instrument(skip(page))]
pub fn assemble_match(match_id: u32, page: &Html) -> Result<Vec<PlayerStatRow>> {
    let root = page.root_element();
    let context = extract_match_context(&root, match_id)?;
    let games = extract::game_fragments(&root)?;

    let mut rows = Vec::with_capacity(games.len() * LOBBY_SIZE);
    for (game_index, game) in games.iter().enumerate() {
        rows.extend(assemble_game(&context, game_index, game)?);
    }
    debug!(match_id, maps = games.len(), rows = rows.len(), "assembled match");
    Ok(rows)
}
