use serde::Serialize;

/// Basic profile information for a player.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerInfo {
    pub id: u32,
    pub name: String,
    pub real_name: Option<String>,
    pub country: Option<String>,
    pub socials: Vec<PlayerSocial>,
}

/// A social media link from a player's profile.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerSocial {
    pub platform: SocialPlatform,
    pub url: String,
}

/// Platform a profile link points to, inferred from its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SocialPlatform {
    Twitter,
    Twitch,
    Instagram,
    Youtube,
    Tiktok,
    Other,
}

impl SocialPlatform {
    pub fn from_url(url: &str) -> Self {
        let url = url.to_lowercase();
        if url.contains("twitter.com") || url.contains("x.com") {
            Self::Twitter
        } else if url.contains("twitch.tv") {
            Self::Twitch
        } else if url.contains("instagram.com") {
            Self::Instagram
        } else if url.contains("youtube.com") || url.contains("youtu.be") {
            Self::Youtube
        } else if url.contains("tiktok.com") {
            Self::Tiktok
        } else {
            Self::Other
        }
    }
}
