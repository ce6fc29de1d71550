//! Conversion result returned by the backend and its table view.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// Status and message reported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSummary {
    /// Outcome status, e.g. `ok`.
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: String,
    /// Human-readable message.
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: String,
}

/// A track reported as added or removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackEntry {
    /// Track title.
    #[serde(default, deserialize_with = "lenient_string")]
    pub track: String,
    /// Artist name.
    #[serde(default, deserialize_with = "lenient_string")]
    pub artist: String,
}

impl TrackEntry {
    /// Create a track entry.
    #[must_use]
    pub fn new(track: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            track: track.into(),
            artist: artist.into(),
        }
    }
}

/// JSON body of a conversion endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Status summary.
    #[serde(default)]
    pub result: ResultSummary,
    /// Tracks removed from the destination playlist.
    #[serde(
        rename = "Tracks Deleted",
        default,
        deserialize_with = "track_collection"
    )]
    pub tracks_deleted: Vec<TrackEntry>,
    /// Tracks newly added to the destination playlist.
    #[serde(
        rename = "New Tracks Detected",
        default,
        deserialize_with = "track_collection"
    )]
    pub new_tracks: Vec<TrackEntry>,
}

impl ConversionResult {
    /// Parse a response body.
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// Rows of the tracks table: additions first, then removals.
    #[must_use]
    pub fn table_rows(&self) -> Vec<TrackRow> {
        let added = self.new_tracks.iter().map(|t| TrackRow::from_entry(t, false));
        let removed = self.tracks_deleted.iter().map(|t| TrackRow::from_entry(t, true));
        added.chain(removed).collect()
    }
}

/// One row of the tracks table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRow {
    /// Track title.
    pub track: String,
    /// Artist name.
    pub artist: String,
    /// Whether the track was removed.
    pub deleted: bool,
}

impl TrackRow {
    fn from_entry(entry: &TrackEntry, deleted: bool) -> Self {
        Self {
            track: entry.track.clone(),
            artist: entry.artist.clone(),
            deleted,
        }
    }

    /// Text shown in the "Deleted" column.
    #[must_use]
    pub const fn deleted_label(&self) -> &'static str {
        if self.deleted { "Yes" } else { "No" }
    }
}

/// Tabs of the result viewer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResultTab {
    /// Status and message.
    #[default]
    Result,
    /// Combined tracks table.
    Table,
}

impl ResultTab {
    /// Both tabs, in display order.
    pub const ALL: [Self; 2] = [Self::Result, Self::Table];

    /// Tab button label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Result => "Result",
            Self::Table => "Tracks Table",
        }
    }
}

/// Accept strings, numbers and booleans; null becomes empty.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(de::Error::custom(format!("expected a string, got {other}"))),
    }
}

/// Accept an array of tracks or an object whose values are tracks.
///
/// Object entries are ordered numerically when the keys are indices.
fn track_collection<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Vec<TrackEntry>, D::Error> {
    let values = match Value::deserialize(deserializer)? {
        Value::Null => return Ok(Vec::new()),
        Value::Array(items) => items,
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by_key(|(key, _)| key.parse::<u64>().map_or((1, 0), |i| (0, i)));
            entries.into_iter().map(|(_, value)| value).collect()
        }
        other => {
            return Err(de::Error::custom(format!(
                "expected a list of tracks, got {other}"
            )));
        }
    };
    values
        .into_iter()
        .map(|value| TrackEntry::deserialize(value).map_err(de::Error::custom))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_backend_shape() {
        let body = r#"{
            "result": {"status": "ok", "message": "done"},
            "Tracks Deleted": [{"track": "A", "artist": "B"}],
            "New Tracks Detected": []
        }"#;
        let result = ConversionResult::from_json(body).unwrap();
        assert_eq!(result.result.status, "ok");
        assert_eq!(result.result.message, "done");
        assert_eq!(result.tracks_deleted, vec![TrackEntry::new("A", "B")]);
        assert!(result.new_tracks.is_empty());
    }

    #[test]
    fn test_table_rows_single_deleted() {
        let result = ConversionResult {
            result: ResultSummary {
                status: "ok".to_string(),
                message: "done".to_string(),
            },
            tracks_deleted: vec![TrackEntry::new("A", "B")],
            new_tracks: vec![],
        };
        let rows = result.table_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows.iter().filter(|r| r.deleted_label() == "Yes").count(), 1);
        assert_eq!(rows.iter().filter(|r| r.deleted_label() == "No").count(), 0);
    }

    #[test]
    fn test_table_rows_additions_first() {
        let result = ConversionResult {
            result: ResultSummary::default(),
            tracks_deleted: vec![TrackEntry::new("gone", "x")],
            new_tracks: vec![TrackEntry::new("new1", "y"), TrackEntry::new("new2", "z")],
        };
        let rows = result.table_rows();
        let titles: Vec<_> = rows.iter().map(|r| r.track.as_str()).collect();
        assert_eq!(titles, vec!["new1", "new2", "gone"]);
        assert_eq!(
            rows.iter().map(TrackRow::deleted_label).collect::<Vec<_>>(),
            vec!["No", "No", "Yes"]
        );
    }

    #[test]
    fn test_object_shaped_track_lists() {
        let body = r#"{
            "result": {"status": "ok", "message": "m"},
            "Tracks Deleted": {},
            "New Tracks Detected": {"10": {"track": "k"}, "2": {"track": "c", "artist": "d"}}
        }"#;
        let result = ConversionResult::from_json(body).unwrap();
        assert_eq!(
            result.new_tracks,
            vec![TrackEntry::new("c", "d"), TrackEntry::new("k", "")]
        );
    }

    #[test]
    fn test_missing_sections_default() {
        let result = ConversionResult::from_json(r#"{"result": {"status": 200}}"#).unwrap();
        assert_eq!(result.result.status, "200");
        assert_eq!(result.result.message, "");
        assert!(result.table_rows().is_empty());
    }

    #[test]
    fn test_rejects_non_object_body() {
        assert!(ConversionResult::from_json("\"just a string\"").is_err());
        assert!(ConversionResult::from_json(r#"{"Tracks Deleted": 5}"#).is_err());
    }

    #[test]
    fn test_tab_labels() {
        assert_eq!(ResultTab::default(), ResultTab::Result);
        assert_eq!(ResultTab::Result.label(), "Result");
        assert_eq!(ResultTab::Table.label(), "Tracks Table");
    }
}
