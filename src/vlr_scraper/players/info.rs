use scraper::{Html, Selector};
use tracing::{debug, instrument};

use crate::error::{Result, VlrError};
use crate::model::{PlayerInfo, PlayerSocial, SocialPlatform};
use crate::vlr_scraper::{collapsed_text, select_text, PageSource};

#[instrument(skip(source))]
pub(crate) async fn get_player_info<S: PageSource>(source: &S, player_id: u32) -> Result<PlayerInfo> {
    let page = source
        .fetch(&format!("player/{player_id}"))
        .await?
        .ok_or(VlrError::PlayerNotFound { player_id })?;
    let info = parse_player_info(&Html::parse_document(&page), player_id)?;
    debug!(player_id, name = %info.name, "parsed player info");
    Ok(info)
}

fn parse_player_info(document: &Html, player_id: u32) -> Result<PlayerInfo> {
    let header_selector = Selector::parse("div.player-header")?;
    let header = document
        .select(&header_selector)
        .next()
        .ok_or(VlrError::ElementNotFound {
            context: "player header",
        })?;

    let name_selector = Selector::parse("h1.wf-title")?;
    let name = select_text(&header, &name_selector);
    if name.is_empty() {
        return Err(VlrError::ElementNotFound {
            context: "player name (h1.wf-title)",
        });
    }

    let real_name_selector = Selector::parse("h2.player-real-name")?;
    let real_name = Some(select_text(&header, &real_name_selector)).filter(|t| !t.is_empty());

    // Country sits in the last light-text block next to the flag
    let country_selector = Selector::parse("div.ge-text-light")?;
    let country = header
        .select(&country_selector)
        .map(|e| collapsed_text(&e))
        .filter(|t| !t.is_empty())
        .last();

    let link_selector = Selector::parse("a[href]")?;
    let socials = header
        .select(&link_selector)
        .filter_map(|a| {
            let url = a.value().attr("href").unwrap_or_default().trim();
            if url.is_empty() || collapsed_text(&a).is_empty() {
                return None;
            }
            Some(PlayerSocial {
                platform: SocialPlatform::from_url(url),
                url: url.to_string(),
            })
        })
        .collect();

    Ok(PlayerInfo {
        id: player_id,
        name,
        real_name,
        country,
        socials,
    })
}
