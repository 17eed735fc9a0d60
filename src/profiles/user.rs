//! A user's profile page.
//!
//! The profile is one record assembled from three blocks:
//!
//! - `#deviant-info li`: fixed positions (status, deviant type, sex/location,
//!   online status, deviant since, subscribed since)
//! - `#deviant-stats li`: counters, decoded by [`STATS`]
//! - `#deviant-infobox.box ul.f li`: labelled personal details, decoded by [`INFOBOX`]
//!
//! Stats and infobox lines are matched by label, so lines this crate does not
//! know about are ignored rather than rejected.

use super::PageProfile;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::extract::assembler::Presence;
use crate::extract::rules::{split_into, Rule, RuleTable, Transform};
use crate::html::{self, Scope};
use crate::models::Record;
use scraper::Html;

const AVATAR: &str = "img.avatar";
const INFO: &str = "#deviant-info li";
const STATS_ITEMS: &str = "#deviant-stats li";
const INFOBOX_ITEMS: &str = "#deviant-infobox.box ul.f li";

/// Counters in the statistics block.
pub static STATS: RuleTable = RuleTable {
    name: "profile stats",
    rules: &[
        Rule::new("Scrap", "scraps_count", Transform::Count),
        Rule::new("Deviation Comment", "made_comments_count", Transform::Count),
        Rule::new("Deviant Comment", "got_comments_count", Transform::Count),
        Rule::new("Forum Post", "forum_posts_count", Transform::Count),
        Rule::new("News Comment", "news_comments_count", Transform::Count),
        Rule::new("Deviation", "deviations_count", Transform::Count),
        Rule::new("Pageview", "pageviews_count", Transform::Count),
    ],
};

/// Labelled lines in the personal infobox.
pub static INFOBOX: RuleTable = RuleTable {
    name: "profile infobox",
    rules: &[
        Rule::new("Website", "user_website", Transform::AfterLabel("Website")),
        Rule::new("Email", "user_email", Transform::AfterLabel("Email")),
        Rule::new("AIM", "user_aim", Transform::AfterLabel("AIM")),
        Rule::new("MSN", "user_msn", Transform::AfterLabel("MSN")),
        Rule::new("Yahoo", "user_yahoo", Transform::AfterLabel("Yahoo")),
        Rule::new("ICQ", "user_icq", Transform::AfterLabel("ICQ")),
        Rule::new("Skype", "user_skype", Transform::AfterLabel("Skype")),
        Rule::new("Age", "user_age", Transform::AfterLabel("Current Age")),
        Rule::new("Residence", "user_residence", Transform::AfterLabel("Current Residence")),
        Rule::new("deviantWEAR", "fav_deviantwear_size", Transform::AfterLabel("deviantWEAR sizing preference")),
        Rule::new("Print", "fav_print_size", Transform::AfterLabel("Print preference")),
        Rule::new("Interest", "interests", Transform::AfterLabel("Interests")),
        Rule::new("movie", "fav_movies", Transform::AfterLabel("Favourite movie")),
        Rule::new("band", "fav_bands", Transform::AfterLabel("Favourite band or musician")),
        Rule::new("of music", "fav_musics", Transform::AfterLabel("Favourite genre of music")),
        Rule::new("artist", "fav_artists", Transform::AfterLabel("Favourite artist")),
        Rule::new("poet", "fav_poet_writer", Transform::AfterLabel("Favourite poet or writer")),
        Rule::new("photographer", "fav_photographers", Transform::AfterLabel("Favourite photographer")),
        Rule::new("digital art", "fav_style", Transform::AfterLabel("Favourite style of digital art")),
        Rule::new("Operating", "fav_os", Transform::AfterLabel("Operating System")),
        Rule::new("MP3", "fav_mp3_players", Transform::AfterLabel("MP3 player of choice")),
        Rule::new("Shell", "fav_shells", Transform::AfterLabel("Shell of choice")),
        Rule::new("Wallpaper", "fav_wallpapers", Transform::AfterLabel("Wallpaper of choice")),
        Rule::new("Skin", "fav_skins", Transform::AfterLabel("Skin of choice")),
        Rule::new("game", "fav_games", Transform::AfterLabel("Favourite game")),
        Rule::new("gaming platform", "fav_game_platforms", Transform::AfterLabel("Favourite gaming platform")),
        Rule::new("cartoon character", "fav_cartoon_character", Transform::AfterLabel("Favourite cartoon character")),
        Rule::new("Quote", "pers_quote", Transform::AfterLabel("Personal Quote")),
        Rule::new("the Trade", "tools", Transform::AfterLabel("Tools of the Trade")),
    ],
};

enum InfoItem {
    Field(&'static str, Transform),
    Split(char, &'static [&'static str]),
}

impl InfoItem {
    fn first_field(&self) -> &'static str {
        match self {
            InfoItem::Field(name, _) => *name,
            InfoItem::Split(_, names) => names.first().copied().unwrap_or("info"),
        }
    }
}

/// `#deviant-info` lines, by position.
static INFO_ITEMS: [(InfoItem, Presence); 6] = [
    (InfoItem::Field("status", Transform::AfterLabel("Status")), Presence::Required),
    (InfoItem::Field("deviant_type", Transform::Verbatim), Presence::Required),
    (InfoItem::Split('/', &["sex", "location"]), Presence::Required),
    (InfoItem::Field("online_status", Transform::Verbatim), Presence::Required),
    (InfoItem::Field("deviant_since", Transform::AfterLabel("Deviant since")), Presence::Required),
    (InfoItem::Field("subscribed_since", Transform::AfterLabel("Subscribed since")), Presence::Optional),
];

#[derive(Debug, Clone)]
pub struct UserProfile {
    nickname: String,
    url: String,
}

impl UserProfile {
    /// Fails with [`Error::InvalidParameter`] for an unusable nickname.
    pub fn new(config: &Config, nickname: &str) -> Result<Self> {
        Ok(Self {
            nickname: nickname.trim().to_string(),
            url: config.user_base_url(nickname)?,
        })
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }
}

impl PageProfile for UserProfile {
    type Output = Record;

    fn name(&self) -> &'static str {
        "profile"
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn extract(&self, doc: &Html) -> Result<Record> {
        let scope = Scope::from(doc);
        let mut profile = Record::new();

        let avatar = scope.require("avatar_path", AVATAR)?;
        let src = html::attr(avatar, "src").ok_or_else(|| Error::MissingNode {
            field: "avatar_path",
            selector: format!("{AVATAR} @src"),
        })?;
        profile.insert("avatar_path", src);

        let info = scope.texts(INFO)?;
        for (index, (item, presence)) in INFO_ITEMS.iter().enumerate() {
            let Some(text) = info.get(index) else {
                if *presence == Presence::Required {
                    return Err(Error::MissingNode {
                        field: item.first_field(),
                        selector: format!("{INFO}[{index}]"),
                    });
                }
                continue;
            };
            match item {
                InfoItem::Field(name, transform) => {
                    if let Some(value) = transform.apply(text) {
                        profile.insert(*name, value);
                    }
                }
                InfoItem::Split(delimiter, names) => split_into(&mut profile, text, *delimiter, names),
            }
        }

        STATS.apply(scope.texts(STATS_ITEMS)?, &mut profile);
        INFOBOX.apply(scope.texts(INFOBOX_ITEMS)?, &mut profile);
        Ok(profile)
    }
}
