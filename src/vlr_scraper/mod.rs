pub(crate) mod match_item;
pub(crate) mod matches;
pub(crate) mod players;
pub(crate) mod teams;
#[cfg(test)]
pub(crate) mod testing;

use std::future::Future;

use scraper::{ElementRef, Selector};
use tracing::debug;

use crate::error::{Result, VlrError};

pub const BASE_URL: &str = "https://www.vlr.gg";

/// Anything that can hand out raw vlr.gg pages by site-relative path.
///
/// `Ok(None)` means the site answered "not found"; every other failure is an
/// error.
pub trait PageSource {
    fn fetch(&self, path: &str) -> impl Future<Output = Result<Option<String>>>;
}

/// Fetch a URL and return its body. A 404 yields `Ok(None)`.
pub(crate) async fn get_page(client: &reqwest::Client, url: &str) -> Result<Option<String>> {
    debug!(url, "fetching page");

    let response = client.get(url).send().await.map_err(|e| VlrError::Http {
        url: url.to_owned(),
        source: e,
    })?;

    let status = response.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        debug!(url, "page not found");
        return Ok(None);
    }
    if !status.is_success() {
        return Err(VlrError::UnexpectedStatus {
            url: url.to_owned(),
            status,
        });
    }

    let body = response.text().await.map_err(|e| VlrError::ResponseBody {
        url: url.to_owned(),
        source: e,
    })?;

    Ok(Some(body))
}

/// Strip surrounding whitespace and any embedded newlines or tabs.
pub(crate) fn clean_text(text: &str) -> String {
    text.trim().replace(['\n', '\t'], "")
}

/// Extract trimmed text content from the first element matching `selector`
/// inside `element`. Returns an empty string if nothing matches.
pub(crate) fn select_text(element: &ElementRef, selector: &Selector) -> String {
    element
        .select(selector)
        .next()
        .and_then(|d| d.text().map(|t| t.trim()).find(|t| !t.is_empty()))
        .map(clean_text)
        .unwrap_or_default()
}

/// All text below `element`, with runs of whitespace collapsed to one space.
pub(crate) fn collapsed_text(element: &ElementRef) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Pull the numeric id out of a site href such as `/team/2593/fnatic`.
pub(crate) fn id_from_href(href: &str, prefix: &str) -> Result<u32> {
    let id = href
        .strip_prefix(prefix)
        .and_then(|rest| rest.split('/').find(|s| !s.is_empty()))
        .ok_or(VlrError::ElementNotFound {
            context: "numeric id in href",
        })?;
    Ok(id.parse()?)
}
