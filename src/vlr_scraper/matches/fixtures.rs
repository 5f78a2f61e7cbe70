//! Offline match pages shaped like vlr.gg markup.

pub(crate) const TEAM_A_ID: u32 = 2593;
pub(crate) const TEAM_B_ID: u32 = 5248;

pub(crate) struct PlayerLine {
    pub id: u32,
    pub name: String,
    pub tag: String,
    pub agent: Option<String>,
    pub kills: String,
    pub deaths: String,
    pub assists: String,
    pub adr: String,
}

pub(crate) struct MapFixture {
    pub game_id: String,
    pub map: String,
    pub scores: (String, String),
    pub players: Vec<PlayerLine>,
    /// How many of `players` go in the first team's table.
    pub first_table: usize,
}

const AGENTS: [&str; 10] = [
    "Astra", "Killjoy", "Raze", "Skye", "Sova", "Omen", "Cypher", "Jett", "KAY/O", "Viper",
];

/// Ten players in page order: five for the first team, five for the second.
pub(crate) fn lobby() -> Vec<PlayerLine> {
    (0..10u32)
        .map(|i| {
            let (tag, base) = if i < 5 { ("FNC", 100) } else { ("NRG", 200) };
            PlayerLine {
                id: base + i,
                name: format!("player{i}"),
                tag: tag.to_string(),
                agent: Some(AGENTS[i as usize].to_string()),
                kills: (10 + i).to_string(),
                deaths: (15 - i).to_string(),
                assists: (i % 4).to_string(),
                adr: (120 + i * 5).to_string(),
            }
        })
        .collect()
}

pub(crate) fn played_map(game_id: u32, map: &str, a: u32, b: u32) -> MapFixture {
    MapFixture {
        game_id: game_id.to_string(),
        map: map.to_string(),
        scores: (a.to_string(), b.to_string()),
        players: lobby(),
        first_table: 5,
    }
}

pub(crate) fn tbd_map(game_id: u32) -> MapFixture {
    MapFixture {
        game_id: game_id.to_string(),
        map: "TBD".to_string(),
        scores: (String::new(), String::new()),
        players: vec![],
        first_table: 0,
    }
}

pub(crate) fn match_page(match_id: u32, maps: &[MapFixture]) -> String {
    match_page_with_ratings(match_id, ["[1874]", "[1702]"], maps)
}

pub(crate) fn match_page_with_ratings(
    match_id: u32,
    ratings: [&str; 2],
    maps: &[MapFixture],
) -> String {
    let all_maps = MapFixture {
        game_id: "all".to_string(),
        map: "All Maps".to_string(),
        scores: (String::new(), String::new()),
        players: lobby(),
        first_table: 5,
    };
    let games: String = std::iter::once(&all_maps)
        .chain(maps.iter())
        .map(game_html)
        .collect();
    format!(
        r#"<html><head><title>match</title></head><body>
<div id="wrapper"><div class="col mod-3">
  <div class="wf-card match-header">
    <div class="match-header-super">
      <a class="match-header-event" href="/event/1494/champions-tour-2023-masters-tokyo">
        <div>
          <div style="font-weight: 700;">
            Champions Tour 2023: Masters Tokyo
          </div>
          <div class="match-header-event-series">
            Playoffs:	Lower Final
          </div>
        </div>
      </a>
      <div class="match-header-date">
        <div class="moment-tz-convert" data-utc-ts="2023-06-24 20:00:00">Saturday, June 24th</div>
      </div>
    </div>
    <div class="match-header-vs">
      <a class="match-header-link wf-link-hover mod-1" href="/team/{TEAM_A_ID}/fnatic">
        <div class="match-header-link-name mod-1">
          <div class="wf-title-med">
            Fnatic
          </div>
          <div class="match-header-link-name-elo">
            {elo_a}
          </div>
        </div>
      </a>
      <div class="match-header-vs-score">
        <div class="match-header-vs-note">final</div>
        <div class="js-spoiler">
          <span class="match-header-vs-score-winner">2</span>
          <span class="match-header-vs-score-colon">:</span>
          <span class="match-header-vs-score-loser">0</span>
        </div>
        <div class="match-header-vs-note">Bo3</div>
      </div>
      <a class="match-header-link wf-link-hover mod-2" href="/team/{TEAM_B_ID}/nrg-esports">
        <div class="match-header-link-name mod-2">
          <div class="wf-title-med">
            NRG Esports
          </div>
          <div class="match-header-link-name-elo">
            {elo_b}
          </div>
        </div>
      </a>
    </div>
  </div>
  <div class="vm-stats" data-url="/{match_id}/fnatic-vs-nrg-esports">
    <div class="vm-stats-container">
{games}
    </div>
  </div>
</div></div>
</body></html>"#,
        elo_a = ratings[0],
        elo_b = ratings[1],
    )
}

fn game_html(map: &MapFixture) -> String {
    let (first, second) = map
        .players
        .split_at(map.first_table.min(map.players.len()));
    format!(
        r#"<div class="vm-stats-game" data-game-id="{game_id}">
  <div class="vm-stats-game-header">
    <div class="team">
      <div class="team-name">Fnatic</div>
      <div class="score mod-win">{score_a}</div>
    </div>
    <div class="map">
      <div style="font-weight: 700;">
        <span style="position: relative;">
          {map_name}
          <span class="picked mod-1">PICK</span>
        </span>
      </div>
      <div class="map-duration">48:12</div>
    </div>
    <div class="team mod-right">
      <div class="score">{score_b}</div>
      <div class="team-name">NRG Esports</div>
    </div>
  </div>
  <div>
    <div><table class="wf-table-inset mod-overview"><tbody>{rows_a}</tbody></table></div>
    <div><table class="wf-table-inset mod-overview"><tbody>{rows_b}</tbody></table></div>
  </div>
</div>
"#,
        game_id = map.game_id,
        score_a = map.scores.0,
        score_b = map.scores.1,
        map_name = map.map,
        rows_a = first.iter().map(player_row).collect::<String>(),
        rows_b = second.iter().map(player_row).collect::<String>(),
    )
}

fn player_row(player: &PlayerLine) -> String {
    let agent = player
        .agent
        .as_ref()
        .map(|a| format!(r#"<span class="stats-sq mod-agent small"><img src="/img/vlr/game/agents/{a}.png" alt="{a}" title="{a}"></span>"#))
        .unwrap_or_default();
    let columns: [(&str, &str); 12] = [
        ("mod-stat", "1.05"),
        ("mod-stat", "230"),
        ("mod-stat mod-vlr-kills", player.kills.as_str()),
        ("mod-stat mod-vlr-deaths", player.deaths.as_str()),
        ("mod-stat mod-vlr-assists", player.assists.as_str()),
        ("mod-stat mod-kd-diff", "+2"),
        ("mod-stat", "74%"),
        ("mod-stat mod-combat", player.adr.as_str()),
        ("mod-stat", "31%"),
        ("mod-stat mod-fb", "3"),
        ("mod-stat mod-fd", "2"),
        ("mod-stat mod-fk-diff", "+1"),
    ];
    let cells: String = columns
        .iter()
        .map(|(class, value)| {
            format!(
                r#"<td class="{class}"><span class="stats-sq"><span class="side mod-side mod-both">{value}</span><span class="side mod-side mod-t">{value}</span><span class="side mod-side mod-ct"></span></span></td>"#
            )
        })
        .collect();
    format!(
        r#"<tr>
  <td class="mod-player">
    <div style="display: flex; align-items: center">
      <a href="/player/{id}/{name}">
        <div class="text-of" style="font-weight: 700;"> {name} </div>
        <div class="ge-text-light">{tag}</div>
      </a>
    </div>
  </td>
  <td class="mod-agents"><div>{agent}</div></td>
  {cells}
</tr>"#,
        id = player.id,
        name = player.name,
        tag = player.tag,
    )
}
