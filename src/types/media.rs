//! Media metadata records decoded from the mapping service.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Metadata for one anime entry: localized titles, per-episode details and
/// identifiers on other catalogs.
///
/// Constructed once per successful lookup and never mutated afterwards;
/// caches hand it out behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRecord {
    /// Language code → title (e.g. `"en"`, `"ro"`, `"ja"`).
    #[serde(default, deserialize_with = "null_as_default")]
    pub titles: HashMap<String, String>,
    /// Episode label (e.g. `"1"`, `"S1"`) → episode metadata.
    #[serde(default, deserialize_with = "null_as_default")]
    pub episodes: HashMap<String, Episode>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub episode_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub special_count: u32,
    #[serde(default)]
    pub mappings: Option<Mappings>,
}

impl MediaRecord {
    /// English title, falling back to the romaji (`ro`) title.
    ///
    /// Returns an empty string when neither is present.
    pub fn title(&self) -> &str {
        self.titles
            .get("en")
            .filter(|t| !t.is_empty())
            .or_else(|| self.titles.get("ro"))
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Cross-service identifiers, or an empty set when the service sent none.
    pub fn mappings(&self) -> Mappings {
        self.mappings.clone().unwrap_or_default()
    }

    /// Look up a single episode by its label.
    pub fn episode(&self, label: &str) -> Option<&Episode> {
        self.episodes.get(label)
    }
}

/// Per-episode metadata. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tvdb_eid: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airdate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season_number: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode_number: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absolute_episode_number: Option<i32>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty", deserialize_with = "null_as_default")]
    pub title: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anidb_eid: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
}

/// Identifiers of the same entry on other catalogs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mappings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animeplanet_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kitsu_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mal_id: Option<i64>,
    /// Media format as reported by the service (e.g. `"TV"`, `"MOVIE"`).
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anilist_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anisearch_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anidb_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notifymoe_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub livechart_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thetvdb_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub themoviedb_id: Option<String>,
}

/// Treat an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "titles": {"en": "Cowboy Bebop", "ro": "Cowboy Bebop", "ja": "カウボーイビバップ"},
            "episodes": {
                "1": {
                    "tvdbEid": 330210,
                    "airdate": "1998-04-03",
                    "seasonNumber": 1,
                    "episodeNumber": 1,
                    "absoluteEpisodeNumber": 1,
                    "title": {"en": "Asteroid Blues"},
                    "runtime": 25,
                    "anidbEid": 1
                }
            },
            "episodeCount": 26,
            "specialCount": 3,
            "mappings": {"mal_id": 1, "anilist_id": 1, "type": "TV", "imdb_id": "tt0213338"}
        }"#
    }

    #[test]
    fn decodes_full_record() {
        let media: MediaRecord = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(media.episode_count, 26);
        assert_eq!(media.special_count, 3);
        assert_eq!(media.title(), "Cowboy Bebop");

        let ep = media.episode("1").unwrap();
        assert_eq!(ep.tvdb_eid, Some(330210));
        assert_eq!(ep.title.get("en").map(String::as_str), Some("Asteroid Blues"));
        assert!(ep.summary.is_none());

        let mappings = media.mappings();
        assert_eq!(mappings.mal_id, Some(1));
        assert_eq!(mappings.kind.as_deref(), Some("TV"));
        assert_eq!(mappings.imdb_id.as_deref(), Some("tt0213338"));
        assert!(mappings.kitsu_id.is_none());
    }

    #[test]
    fn title_falls_back_to_romaji() {
        let media = MediaRecord {
            titles: HashMap::from([("ro".to_string(), "Shingeki no Kyojin".to_string())]),
            ..Default::default()
        };
        assert_eq!(media.title(), "Shingeki no Kyojin");
    }

    #[test]
    fn empty_english_title_falls_back() {
        let media = MediaRecord {
            titles: HashMap::from([
                ("en".to_string(), String::new()),
                ("ro".to_string(), "Mushishi".to_string()),
            ]),
            ..Default::default()
        };
        assert_eq!(media.title(), "Mushishi");
    }

    #[test]
    fn title_empty_without_titles() {
        assert_eq!(MediaRecord::default().title(), "");
    }

    #[test]
    fn nulls_decode_as_empty() {
        let media: MediaRecord = serde_json::from_str(
            r#"{"titles": null, "episodes": null, "episodeCount": null, "specialCount": null, "mappings": null}"#,
        )
        .unwrap();
        assert!(media.titles.is_empty());
        assert!(media.episodes.is_empty());
        assert_eq!(media.episode_count, 0);
        assert_eq!(media.special_count, 0);
        assert_eq!(media.mappings(), Mappings::default());
    }

    #[test]
    fn rejects_wrong_shape() {
        assert!(serde_json::from_str::<MediaRecord>(r#"{"episodeCount": "many"}"#).is_err());
        assert!(serde_json::from_str::<MediaRecord>("[]").is_err());
    }
}
