//! Catalog search results
//!
//! Deserializes the track search response of the download catalog and
//! converts its items into [`TrackRecord`]s for the download view.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::track::TrackRecord;

/// Top level of a search response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    pub tracks: SearchTracks,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchTracks {
    pub items: Vec<SearchTrack>,
}

/// A track as returned by the catalog
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchTrack {
    pub id: i64,
    pub title: String,
    /// Edition of the recording, e.g. "Remastered"
    pub version: Option<String>,
    pub duration: i64,
    pub isrc: String,
    pub composer: Option<NamedEntity>,
    pub copyright: Option<String>,
    pub maximum_bit_depth: i64,
    pub maximum_sampling_rate: f64,
    pub album: SearchAlbum,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchAlbum {
    pub title: String,
    /// Release time, unix seconds
    pub released_at: i64,
    pub artist: NamedEntity,
    pub genre: NamedEntity,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NamedEntity {
    pub name: String,
}

impl SearchResponse {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Convert every item into a track record
    pub fn into_records(self) -> Vec<TrackRecord> {
        self.tracks.items.into_iter().map(TrackRecord::from).collect()
    }
}

/// Format a unix timestamp as `YYYY-MM-DD` (UTC)
///
/// Negative timestamps use their absolute value.
fn release_date(released_at: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp(released_at.unsigned_abs().min(i64::MAX as u64) as i64, 0)
        .map(|date| date.format("%Y-%m-%d").to_string())
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

impl From<SearchTrack> for TrackRecord {
    fn from(track: SearchTrack) -> Self {
        let title = match track.version {
            Some(version) if !version.is_empty() => format!("{} ({})", track.title, version),
            _ => track.title,
        };

        TrackRecord {
            title: non_empty(title),
            album_title: non_empty(track.album.title),
            artist: non_empty(track.album.artist.name),
            genre: non_empty(track.album.genre.name),
            duration: u64::try_from(track.duration).ok(),
            date: release_date(track.album.released_at),
            composer: track.composer.and_then(|c| non_empty(c.name)),
            isrc: non_empty(track.isrc),
            copyright: track.copyright.and_then(non_empty),
            bit_depth: u32::try_from(track.maximum_bit_depth).ok().filter(|b| *b > 0),
            sampling_rate: Some(track.maximum_sampling_rate).filter(|s| *s > 0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r#"{
        "tracks": {
            "items": [
                {
                    "id": 52356,
                    "title": "Something About Us",
                    "version": "Remastered",
                    "duration": 232,
                    "isrc": "GBDUW0000062",
                    "composer": {"name": "Daft Punk"},
                    "copyright": "(P) 2001 Daft Life",
                    "maximum_bit_depth": 24,
                    "maximum_sampling_rate": 44.1,
                    "album": {
                        "title": "Discovery",
                        "released_at": 984355200,
                        "artist": {"name": "Daft Punk"},
                        "genre": {"name": "Electronic"}
                    }
                },
                {
                    "id": 1,
                    "title": "Untitled",
                    "duration": 59,
                    "album": {"released_at": -86400}
                }
            ]
        }
    }"#;

    #[test]
    fn test_convert_full_item() {
        let records = SearchResponse::from_json(RESPONSE).unwrap().into_records();
        assert_eq!(records.len(), 2);

        let record = &records[0];
        assert_eq!(record.title.as_deref(), Some("Something About Us (Remastered)"));
        assert_eq!(record.album_title.as_deref(), Some("Discovery"));
        assert_eq!(record.artist.as_deref(), Some("Daft Punk"));
        assert_eq!(record.genre.as_deref(), Some("Electronic"));
        assert_eq!(record.duration, Some(232));
        assert_eq!(record.date.as_deref(), Some("2001-03-12"));
        assert_eq!(record.composer.as_deref(), Some("Daft Punk"));
        assert_eq!(record.isrc.as_deref(), Some("GBDUW0000062"));
        assert_eq!(record.copyright.as_deref(), Some("(P) 2001 Daft Life"));
        assert_eq!(record.bit_depth, Some(24));
        assert_eq!(record.sampling_rate, Some(44.1));
    }

    #[test]
    fn test_convert_sparse_item() {
        let records = SearchResponse::from_json(RESPONSE).unwrap().into_records();
        let record = &records[1];

        assert_eq!(record.title.as_deref(), Some("Untitled"));
        assert_eq!(record.artist, None);
        assert_eq!(record.composer, None);
        assert_eq!(record.bit_depth, None);
        assert_eq!(record.sampling_rate, None);
        // Negative release times are mirrored
        assert_eq!(record.date.as_deref(), Some("1970-01-02"));
    }

    #[test]
    fn test_empty_response() {
        let records = SearchResponse::from_json("{}").unwrap().into_records();
        assert!(records.is_empty());
    }
}
