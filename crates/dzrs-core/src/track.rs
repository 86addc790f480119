//! Track metadata records
//!
//! [`TrackRecord`] is the metadata shape shown in the download view and fed
//! to the filename templates. [`TrackField`] names its fields; the same enum
//! provides the download-view column keys and the template placeholder
//! tokens.

use serde::{Deserialize, Serialize};

/// Separators between multiple values of one tag, e.g. `"Daft Punk; Romanthony"`
pub const TAG_SEPARATORS: [&str; 8] = [";", "; ", "/", "/ ", " / ", ",", ", ", " , "];

/// Metadata for a single track
///
/// Every field is optional. Missing values render as empty strings.
/// Numeric fields also accept numeric strings; a value that is negative or
/// not a number is dropped instead of failing the whole record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackRecord {
    pub title: Option<String>,
    pub album_title: Option<String>,
    pub artist: Option<String>,
    pub genre: Option<String>,
    /// Duration in whole seconds
    #[serde(deserialize_with = "lenient::unsigned")]
    pub duration: Option<u64>,
    /// Release date, `YYYY-MM-DD`
    pub date: Option<String>,
    pub composer: Option<String>,
    pub isrc: Option<String>,
    pub copyright: Option<String>,
    #[serde(deserialize_with = "lenient::unsigned")]
    pub bit_depth: Option<u32>,
    /// Sampling rate in kHz (e.g. `44.1`)
    #[serde(deserialize_with = "lenient::float")]
    pub sampling_rate: Option<f64>,
}

/// Field deserializers that never fail on a wrong value type
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn unsigned<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: TryFrom<u64>,
    {
        let value = Value::deserialize(deserializer)?;
        let number = match &value {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        };
        let number = number.and_then(|n| T::try_from(n).ok());
        if number.is_none() && !value.is_null() {
            log::debug!("unsigned: Dropping unusable value {}", value);
        }
        Ok(number)
    }

    pub fn float<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let number = match &value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        let number = number.filter(|n| n.is_finite() && *n >= 0.0);
        if number.is_none() && !value.is_null() {
            log::debug!("float: Dropping unusable value {}", value);
        }
        Ok(number)
    }
}

impl TrackRecord {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album_title = Some(album.into());
        self
    }

    pub fn with_duration(mut self, seconds: u64) -> Self {
        self.duration = Some(seconds);
        self
    }

    /// Parse a record from the host's JSON representation
    ///
    /// Unknown keys are ignored and missing keys stay `None`.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Format duration as `minutes.seconds`, seconds zero-padded
    ///
    /// 125 seconds gives `"2.05"`. Empty when unknown.
    pub fn format_duration(&self) -> String {
        self.duration
            .map(|d| format!("{}.{:02}", d / 60, d % 60))
            .unwrap_or_default()
    }
}

/// Split a multi-value tag on [`TAG_SEPARATORS`]
///
/// The longest separator at a position wins, so `"A / B"` splits into
/// `["A", "B"]`. Values are trimmed and empty ones dropped.
pub fn split_tag_values(value: &str) -> Vec<String> {
    let mut separators = TAG_SEPARATORS;
    separators.sort_by_key(|s| std::cmp::Reverse(s.len()));

    let mut values = Vec::new();
    let mut start = 0;
    let mut pos = 0;
    while pos < value.len() {
        match separators.iter().find(|s| value[pos..].starts_with(**s)) {
            Some(separator) => {
                values.push(&value[start..pos]);
                pos += separator.len();
                start = pos;
            }
            None => {
                pos += value[pos..].chars().next().map_or(1, char::len_utf8);
            }
        }
    }
    values.push(&value[start..]);

    values
        .into_iter()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

/// Fields of a [`TrackRecord`], in download-view column order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackField {
    Title,
    Album,
    Artist,
    Genre,
    Duration,
    Date,
    Composer,
    Isrc,
    Copyright,
    BitDepth,
    SamplingRate,
}

impl TrackField {
    /// All fields in display order
    pub const ALL: [TrackField; 11] = [
        TrackField::Title,
        TrackField::Album,
        TrackField::Artist,
        TrackField::Genre,
        TrackField::Duration,
        TrackField::Date,
        TrackField::Composer,
        TrackField::Isrc,
        TrackField::Copyright,
        TrackField::BitDepth,
        TrackField::SamplingRate,
    ];

    /// Stable key, used as column key and placeholder name
    pub fn key(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Album => "album",
            Self::Artist => "artist",
            Self::Genre => "genre",
            Self::Duration => "duration",
            Self::Date => "date",
            Self::Composer => "composer",
            Self::Isrc => "isrc",
            Self::Copyright => "copyright",
            Self::BitDepth => "bitDepth",
            Self::SamplingRate => "samplingRate",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.key() == key)
    }

    /// Value of this field as text, empty when missing
    pub fn format(&self, record: &TrackRecord) -> String {
        fn text(value: &Option<String>) -> String {
            value.clone().unwrap_or_default()
        }

        match self {
            Self::Title => text(&record.title),
            Self::Album => text(&record.album_title),
            Self::Artist => text(&record.artist),
            Self::Genre => text(&record.genre),
            Self::Duration => record.format_duration(),
            Self::Date => text(&record.date),
            Self::Composer => text(&record.composer),
            Self::Isrc => text(&record.isrc),
            Self::Copyright => text(&record.copyright),
            Self::BitDepth => record.bit_depth.map(|b| b.to_string()).unwrap_or_default(),
            Self::SamplingRate => record.sampling_rate.map(|s| s.to_string()).unwrap_or_default(),
        }
    }
}
