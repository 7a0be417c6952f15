use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named, timestamped entry ("how long since ...").
///
/// Field names match the data files written by earlier versions of the tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Since")]
    pub since: DateTime<Utc>,
}

impl Item {
    pub fn new(name: impl Into<String>, since: DateTime<Utc>) -> Self {
        Item {
            name: name.into(),
            since,
        }
    }
}

/// Where newly added items go in the list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddPosition {
    Top,
    #[default]
    Bottom,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn serializes_with_legacy_field_names() {
        let item = Item::new("coffee", Utc.with_ymd_and_hms(2025, 3, 1, 8, 30, 0).unwrap());
        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(json, r#"{"Name":"coffee","Since":"2025-03-01T08:30:00Z"}"#);
    }

    #[test]
    fn deserializes_offset_timestamps() {
        // Older files carry a local offset and nanoseconds
        let item: Item =
            serde_json::from_str(r#"{"Name":"x","Since":"2025-03-01T10:30:00.123456789+02:00"}"#)
                .unwrap();
        assert_eq!(item.name, "x");
        assert_eq!(
            item.since.timestamp(),
            Utc.with_ymd_and_hms(2025, 3, 1, 8, 30, 0).unwrap().timestamp()
        );
    }

    #[test]
    fn add_position_parses_lowercase() {
        let pos: AddPosition = serde_json::from_str(r#""top""#).unwrap();
        assert_eq!(pos, AddPosition::Top);
        assert_eq!(AddPosition::default(), AddPosition::Bottom);
    }
}
