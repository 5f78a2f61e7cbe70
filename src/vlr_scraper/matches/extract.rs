//! Field extractors for match pages.
//!
//! Match-level extractors take the page root, game-level extractors take one
//! `div.vm-stats-game` fragment. Per-player extractors return one entry per
//! player row in page order: the first team's table, then the second's.
//!
//! Stat values that do not coerce to a number come back as `None`. Missing
//! structural elements are errors.

use chrono::NaiveDate;
use itertools::Itertools;
use scraper::{ElementRef, Selector};
use tracing::warn;

use crate::error::{Result, VlrError};
use crate::model::{TeamRating, LOBBY_SIZE};
use crate::vlr_scraper::{clean_text, collapsed_text, id_from_href, select_text};

const MATCH_DATE_FORMAT: &str = "%Y-%m-%d";

/// Columns of the per-map overview table, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatColumn {
    Rating = 0,
    Acs,
    Kills,
    Deaths,
    Assists,
    KdDiff,
    Kast,
    Adr,
    HsPct,
    FirstKills,
    FirstDeaths,
    FkDiff,
}

fn required<'a>(
    element: &ElementRef<'a>,
    selector: &Selector,
    context: &'static str,
) -> Result<ElementRef<'a>> {
    element
        .select(selector)
        .next()
        .ok_or(VlrError::ElementNotFound { context })
}

/// Match id as carried by the stats container's `data-url` (`/<id>/<slug>`).
pub fn match_id_from_page(page: &ElementRef) -> Result<u32> {
    let stats_selector = Selector::parse("div.vm-stats")?;
    let data_url = required(page, &stats_selector, "stats container (div.vm-stats)")?
        .value()
        .attr("data-url")
        .ok_or(VlrError::ElementNotFound {
            context: "stats container data-url",
        })?;
    id_from_href(data_url, "/")
}

pub fn match_date(page: &ElementRef) -> Result<NaiveDate> {
    let date_selector = Selector::parse("div.match-header-date div.moment-tz-convert")?;
    let timestamp = required(page, &date_selector, "match date (moment-tz-convert)")?
        .value()
        .attr("data-utc-ts")
        .ok_or(VlrError::ElementNotFound {
            context: "match date data-utc-ts",
        })?;
    let day = clean_text(timestamp.split(' ').next().unwrap_or_default());
    Ok(NaiveDate::parse_from_str(&day, MATCH_DATE_FORMAT)?)
}

/// Series format from the second header note, e.g. `Bo3`.
pub fn match_style(page: &ElementRef) -> Result<String> {
    let note_selector = Selector::parse("div.match-header-vs-note")?;
    page.select(&note_selector)
        .nth(1)
        .map(|e| collapsed_text(&e))
        .ok_or(VlrError::ElementNotFound {
            context: "match format note (match-header-vs-note)",
        })
}

pub fn match_event(page: &ElementRef) -> Result<String> {
    let event_selector = Selector::parse("a.match-header-event")?;
    let event = required(page, &event_selector, "match event (a.match-header-event)")?;
    Ok(collapsed_text(&event))
}

/// Series score with all padding removed, e.g. `2:1`.
pub fn match_score(page: &ElementRef) -> Result<String> {
    let score_selector = Selector::parse("div.match-header-vs-score .js-spoiler")?;
    let score = required(page, &score_selector, "match score (js-spoiler)")?;
    Ok(score.text().flat_map(str::split_whitespace).collect())
}

fn team_links<'a>(page: &ElementRef<'a>) -> Result<[ElementRef<'a>; 2]> {
    let first = Selector::parse("div.match-header-vs a.match-header-link.mod-1")?;
    let second = Selector::parse("div.match-header-vs a.match-header-link.mod-2")?;
    Ok([
        required(page, &first, "first team link (match-header-link mod-1)")?,
        required(page, &second, "second team link (match-header-link mod-2)")?,
    ])
}

pub fn team_ids(page: &ElementRef) -> Result<[u32; 2]> {
    let [a, b] = team_links(page)?;
    let id = |link: ElementRef| -> Result<u32> {
        let href = link.value().attr("href").ok_or(VlrError::ElementNotFound {
            context: "team link href",
        })?;
        id_from_href(href, "/team/")
    };
    Ok([id(a)?, id(b)?])
}

pub fn team_names_long(page: &ElementRef) -> Result<[String; 2]> {
    let name_selector = Selector::parse("div.wf-title-med")?;
    let [a, b] = team_links(page)?;
    let name = |link: ElementRef| -> Result<String> {
        let name = required(&link, &name_selector, "team name (wf-title-med)")?;
        Ok(collapsed_text(&name))
    };
    Ok([name(a)?, name(b)?])
}

/// Bracketed header ratings. An empty `[]`, a missing badge, or text that is
/// not a number all read as [`TeamRating::Unrated`].
pub fn team_ratings(page: &ElementRef) -> Result<[TeamRating; 2]> {
    let elo_selector = Selector::parse(".match-header-link-name-elo")?;
    let [a, b] = team_links(page)?;
    let rating = |link: ElementRef| -> TeamRating {
        let raw = select_text(&link, &elo_selector);
        let raw = raw.trim_matches(|c: char| c == '[' || c == ']' || c.is_whitespace());
        if raw.is_empty() {
            return TeamRating::Unrated;
        }
        match raw.parse() {
            Ok(r) => TeamRating::Rated(r),
            Err(_) => {
                warn!(rating = raw, "unreadable team rating");
                TeamRating::Unrated
            }
        }
    };
    Ok([rating(a), rating(b)])
}

/// Per-map fragments in pick order, without the aggregate "all maps" entry
/// and without maps still listed as TBD.
pub fn game_fragments<'a>(page: &ElementRef<'a>) -> Result<Vec<ElementRef<'a>>> {
    let container_selector = Selector::parse("div.vm-stats-container")?;
    let game_selector = Selector::parse("div.vm-stats-game")?;
    let container = required(
        page,
        &container_selector,
        "stats container (div.vm-stats-container)",
    )?;

    let mut games = Vec::new();
    for game in container.select(&game_selector) {
        if game.value().attr("data-game-id") == Some("all") {
            continue;
        }
        if game_map(&game)? == "TBD" {
            continue;
        }
        games.push(game);
    }
    Ok(games)
}

pub fn game_map(game: &ElementRef) -> Result<String> {
    let map_selector = Selector::parse("div.vm-stats-game-header div.map div:first-child span")?;
    let map = select_text(game, &map_selector);
    let map = map.replace("PICK", "").trim().to_string();
    if map.is_empty() {
        return Err(VlrError::ElementNotFound {
            context: "map name (div.map span)",
        });
    }
    Ok(map)
}

fn score_cells(game: &ElementRef) -> Result<[String; 2]> {
    let score_selector = Selector::parse("div.vm-stats-game-header div.score")?;
    game.select(&score_selector)
        .map(|e| collapsed_text(&e))
        .collect_tuple()
        .map(|(a, b)| [a, b])
        .ok_or(VlrError::ElementNotFound {
            context: "map scores (two div.score)",
        })
}

/// Final round count for each side of a map.
pub fn game_scores(game: &ElementRef) -> Result<[Option<u32>; 2]> {
    let [a, b] = score_cells(game)?;
    Ok([parse_count(&a), parse_count(&b)])
}

pub fn rounds_played(game: &ElementRef) -> Result<Option<u32>> {
    let [a, b] = game_scores(game)?;
    Ok(a.zip(b).and_then(|(a, b)| a.checked_add(b)))
}

fn player_rows<'a>(game: &ElementRef<'a>) -> Result<Vec<ElementRef<'a>>> {
    let row_selector = Selector::parse("table.mod-overview tbody tr:has(td.mod-player)")?;
    Ok(game.select(&row_selector).collect())
}

/// Number of player rows in each overview table, in page order. A regular
/// map has two tables of five.
pub fn roster_sizes(game: &ElementRef) -> Result<Vec<usize>> {
    let table_selector = Selector::parse("table.mod-overview")?;
    let row_selector = Selector::parse("tbody tr:has(td.mod-player)")?;
    Ok(game
        .select(&table_selector)
        .map(|table| table.select(&row_selector).count())
        .collect())
}

/// Player handles as shown in the name column, first word only.
pub fn player_names(game: &ElementRef) -> Result<Vec<String>> {
    let name_selector = Selector::parse("td.mod-player div.text-of")?;
    Ok(player_rows(game)?
        .iter()
        .filter_map(|row| row.select(&name_selector).next())
        .map(|name| {
            name.text()
                .flat_map(str::split_whitespace)
                .next()
                .unwrap_or_default()
                .to_string()
        })
        .filter(|name| !name.is_empty())
        .collect())
}

pub fn player_ids(game: &ElementRef) -> Result<Vec<u32>> {
    let link_selector = Selector::parse("td.mod-player a[href]")?;
    player_rows(game)?
        .iter()
        .map(|row| {
            let href = row
                .select(&link_selector)
                .next()
                .and_then(|a| a.value().attr("href"))
                .ok_or(VlrError::ElementNotFound {
                    context: "player link (td.mod-player a)",
                })?;
            id_from_href(href, "/player/")
        })
        .collect()
}

/// Team tag printed under each player's name.
pub fn team_names_short(game: &ElementRef) -> Result<Vec<Option<String>>> {
    let tag_selector = Selector::parse("td.mod-player div.ge-text-light")?;
    Ok(player_rows(game)?
        .iter()
        .map(|row| Some(select_text(row, &tag_selector)).filter(|t| !t.is_empty()))
        .collect())
}

/// Agent portrait titles. When fewer than ten portraits are present on the
/// map, every entry is unavailable rather than a partially shifted list.
pub fn player_agents(game: &ElementRef) -> Result<Vec<Option<String>>> {
    let agent_selector = Selector::parse("td.mod-agents img[title]")?;
    let agents = player_rows(game)?
        .iter()
        .map(|row| {
            row.select(&agent_selector)
                .next()
                .and_then(|img| img.value().attr("title"))
                .map(clean_text)
                .filter(|t| !t.is_empty())
        })
        .collect_vec();
    if agents.iter().flatten().count() < LOBBY_SIZE {
        return Ok(vec![None; LOBBY_SIZE]);
    }
    Ok(agents)
}

pub fn player_kills(game: &ElementRef) -> Result<Vec<Option<u32>>> {
    count_column(game, StatColumn::Kills)
}

pub fn player_deaths(game: &ElementRef) -> Result<Vec<Option<u32>>> {
    count_column(game, StatColumn::Deaths)
}

pub fn player_assists(game: &ElementRef) -> Result<Vec<Option<u32>>> {
    count_column(game, StatColumn::Assists)
}

pub fn player_adrs(game: &ElementRef) -> Result<Vec<Option<f64>>> {
    player_stat_column(game, StatColumn::Adr)
}

/// Any overview column as numbers, e.g. rating or KAST.
pub fn player_stat_column(game: &ElementRef, column: StatColumn) -> Result<Vec<Option<f64>>> {
    Ok(stat_texts(game, column)?
        .iter()
        .map(|t| parse_stat(t))
        .collect())
}

fn count_column(game: &ElementRef, column: StatColumn) -> Result<Vec<Option<u32>>> {
    Ok(stat_texts(game, column)?
        .iter()
        .map(|t| parse_count(t))
        .collect())
}

/// Raw both-sides text of one overview column for every player row. Rows
/// without the column yield an empty string.
fn stat_texts(game: &ElementRef, column: StatColumn) -> Result<Vec<String>> {
    let cell_selector = Selector::parse("td.mod-stat")?;
    let both_selector = Selector::parse("span.side.mod-both")?;
    Ok(player_rows(game)?
        .iter()
        .map(|row| {
            row.select(&cell_selector)
                .nth(column as usize)
                .map(|cell| {
                    let raw: String = match cell.select(&both_selector).next() {
                        Some(both) => both.text().collect(),
                        None => cell.text().collect(),
                    };
                    raw.replace('/', "")
                        .split_whitespace()
                        .next()
                        .unwrap_or_default()
                        .to_string()
                })
                .unwrap_or_default()
        })
        .collect())
}

pub(crate) fn parse_count(text: &str) -> Option<u32> {
    text.trim().parse().ok()
}

/// Numeric stat; percentages are normalised to a fraction.
pub(crate) fn parse_stat(text: &str) -> Option<f64> {
    let text = text.trim();
    let value = match text.strip_suffix('%') {
        Some(pct) => pct.trim().parse::<f64>().ok().map(|v| v / 100.0),
        None => text.parse::<f64>().ok(),
    };
    value.filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use super::*;
    use crate::vlr_scraper::matches::fixtures::{
        match_page, match_page_with_ratings, played_map, tbd_map, TEAM_A_ID, TEAM_B_ID,
    };

    fn two_maps() -> String {
        match_page(
            184805,
            &[
                played_map(1, "Ascent", 13, 7),
                played_map(2, "Lotus", 13, 11),
                tbd_map(3),
            ],
        )
    }

    #[test]
    fn test_match_level_fields() {
        let document = Html::parse_document(&two_maps());
        let page = document.root_element();

        assert_eq!(match_id_from_page(&page).unwrap(), 184805);
        assert_eq!(
            match_date(&page).unwrap(),
            NaiveDate::from_ymd_opt(2023, 6, 24).unwrap()
        );
        assert_eq!(match_style(&page).unwrap(), "Bo3");
        assert_eq!(
            match_event(&page).unwrap(),
            "Champions Tour 2023: Masters Tokyo Playoffs: Lower Final"
        );
        assert_eq!(match_score(&page).unwrap(), "2:0");
        assert_eq!(team_ids(&page).unwrap(), [TEAM_A_ID, TEAM_B_ID]);
        assert_eq!(
            team_names_long(&page).unwrap(),
            ["Fnatic".to_string(), "NRG Esports".to_string()]
        );
        assert_eq!(
            team_ratings(&page).unwrap(),
            [TeamRating::Rated(1874), TeamRating::Rated(1702)]
        );
    }

    #[test]
    fn test_empty_rating_is_unrated() {
        let html = match_page_with_ratings(1, ["[]", "[1702]"], &[]);
        let document = Html::parse_document(&html);
        assert_eq!(
            team_ratings(&document.root_element()).unwrap(),
            [TeamRating::Unrated, TeamRating::Rated(1702)]
        );
    }

    #[test]
    fn test_game_fragments_skip_all_and_tbd() {
        let document = Html::parse_document(&two_maps());
        let games = game_fragments(&document.root_element()).unwrap();
        let maps: Vec<String> = games.iter().map(|g| game_map(g).unwrap()).collect();
        assert_eq!(maps, vec!["Ascent", "Lotus"]);
    }

    #[test]
    fn test_missing_stats_container_is_structural_error() {
        let document = Html::parse_document("<html><body><div class='match-header'></div></body></html>");
        let result = game_fragments(&document.root_element());
        assert!(matches!(result, Err(VlrError::ElementNotFound { .. })));
        assert!(matches!(
            team_ids(&document.root_element()),
            Err(VlrError::ElementNotFound { .. })
        ));
    }

    #[test]
    fn test_game_level_fields() {
        let document = Html::parse_document(&two_maps());
        let games = game_fragments(&document.root_element()).unwrap();
        let game = &games[0];

        assert_eq!(game_map(game).unwrap(), "Ascent");
        assert_eq!(game_scores(game).unwrap(), [Some(13), Some(7)]);
        assert_eq!(rounds_played(game).unwrap(), Some(20));

        let names = player_names(game).unwrap();
        assert_eq!(names.len(), 10);
        assert_eq!(names[0], "player0");
        assert_eq!(names[9], "player9");

        let ids = player_ids(game).unwrap();
        assert_eq!(ids[0], 100);
        assert_eq!(ids[5], 205);

        let tags = team_names_short(game).unwrap();
        assert_eq!(tags[0].as_deref(), Some("FNC"));
        assert_eq!(tags[5].as_deref(), Some("NRG"));

        let agents = player_agents(game).unwrap();
        assert_eq!(agents[0].as_deref(), Some("Astra"));
        assert_eq!(agents[8].as_deref(), Some("KAY/O"));

        assert_eq!(player_kills(game).unwrap()[3], Some(13));
        assert_eq!(player_deaths(game).unwrap()[3], Some(12));
        assert_eq!(player_assists(game).unwrap()[3], Some(3));
        assert_eq!(player_adrs(game).unwrap()[3], Some(135.0));
    }

    #[test]
    fn test_percent_column_is_fraction() {
        let document = Html::parse_document(&two_maps());
        let games = game_fragments(&document.root_element()).unwrap();
        let kast = player_stat_column(&games[0], StatColumn::Kast).unwrap();
        assert_eq!(kast[0], Some(0.74));
        let rating = player_stat_column(&games[0], StatColumn::Rating).unwrap();
        assert_eq!(rating[9], Some(1.05));
        let kd_diff = stat_texts(&games[0], StatColumn::KdDiff).unwrap();
        assert_eq!(kd_diff[0], "+2");
    }

    #[test]
    fn test_blank_adr_is_unavailable_for_that_player_only() {
        let mut map = played_map(1, "Split", 13, 4);
        map.players[4].adr = String::new();
        let document = Html::parse_document(&match_page(9, &[map]));
        let games = game_fragments(&document.root_element()).unwrap();
        let adrs = player_adrs(&games[0]).unwrap();

        assert_eq!(adrs.len(), 10);
        assert_eq!(adrs[4], None);
        assert_eq!(adrs.iter().filter(|a| a.is_some()).count(), 9);
    }

    #[test]
    fn test_missing_agent_portraits_blank_every_agent() {
        let mut map = played_map(1, "Bind", 13, 9);
        map.players[2].agent = None;
        let document = Html::parse_document(&match_page(9, &[map]));
        let games = game_fragments(&document.root_element()).unwrap();
        let agents = player_agents(&games[0]).unwrap();

        assert_eq!(agents, vec![None; LOBBY_SIZE]);
    }

    #[test]
    fn test_unreadable_map_score_is_unavailable() {
        let mut map = played_map(1, "Haven", 13, 0);
        map.scores.1 = "-".to_string();
        let document = Html::parse_document(&match_page(9, &[map]));
        let games = game_fragments(&document.root_element()).unwrap();

        assert_eq!(game_scores(&games[0]).unwrap(), [Some(13), None]);
        assert_eq!(rounds_played(&games[0]).unwrap(), None);
    }

    #[test]
    fn test_roster_sizes_per_table() {
        let mut lopsided = played_map(2, "Lotus", 13, 11);
        lopsided.first_table = 6;
        let document = Html::parse_document(&match_page(
            9,
            &[played_map(1, "Ascent", 13, 7), lopsided],
        ));
        let games = game_fragments(&document.root_element()).unwrap();

        assert_eq!(roster_sizes(&games[0]).unwrap(), vec![5, 5]);
        assert_eq!(roster_sizes(&games[1]).unwrap(), vec![6, 4]);
    }

    #[test]
    fn test_absurd_map_score_degrades_rounds_played() {
        let map = played_map(1, "Sunset", u32::MAX, 1);
        let document = Html::parse_document(&match_page(9, &[map]));
        let games = game_fragments(&document.root_element()).unwrap();

        assert_eq!(game_scores(&games[0]).unwrap(), [Some(u32::MAX), Some(1)]);
        assert_eq!(rounds_played(&games[0]).unwrap(), None);
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_count(" 17 "), Some(17));
        assert_eq!(parse_count(""), None);
        assert_eq!(parse_count("***"), None);
        assert_eq!(parse_stat("31%"), Some(0.31));
        assert_eq!(parse_stat("142.5"), Some(142.5));
        assert_eq!(parse_stat(""), None);
        assert_eq!(parse_stat("NaN"), None);
    }
}
