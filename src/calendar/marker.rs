//! Per-day calendar markers
//!
//! A [`MarkerMap`] serializes to the JSON shape calendar widgets expect, e.g.
//! `{"2024-05-02": {"marked": true, "dotColor": "#4a90e2", "selected": true, "selectedColor": "#1e88e5"}}`

use std::collections::BTreeMap;

use chrono::NaiveDate;
use csscolorparser::Color;
use serde::{Serialize, Serializer};

/// Markers of every highlighted day. Days without any marker are absent.
pub type MarkerMap = BTreeMap<NaiveDate, Marker>;

/// How a single calendar day is highlighted
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    /// Whether at least one task covers this day
    #[serde(skip_serializing_if = "is_false")]
    pub marked: bool,
    #[serde(serialize_with = "serialize_color", skip_serializing_if = "Option::is_none")]
    pub dot_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<bool>,
    #[serde(serialize_with = "serialize_color", skip_serializing_if = "Option::is_none")]
    pub selected_color: Option<Color>,
}

impl Marker {
    /// A day covered by a task
    pub fn dot(color: Color) -> Self {
        Self { marked: true, dot_color: Some(color), ..Self::default() }
    }

    /// Flag this day as the selected one, keeping any dot already there
    pub fn select(&mut self, color: Color) {
        self.selected = Some(true);
        self.selected_color = Some(color);
    }

    pub fn is_selected(&self) -> bool {
        self.selected == Some(true)
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn serialize_color<S>(color: &Option<Color>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match color {
        Some(c) => serializer.serialize_str(&c.to_hex_string()),
        None => serializer.serialize_none(),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_json_shape() {
        let mut markers = MarkerMap::new();
        let day1 = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let day2 = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();

        markers.insert(day1, Marker::dot(Color::from_rgb_u8(0x4a, 0x90, 0xe2)));
        let mut selected_only = Marker::default();
        selected_only.select(Color::from_rgb_u8(0x1e, 0x88, 0xe5));
        markers.insert(day2, selected_only);

        let json = serde_json::to_value(&markers).unwrap();
        assert_eq!(json, serde_json::json!({
            "2024-05-01": { "marked": true, "dotColor": "#4a90e2" },
            "2024-05-02": { "selected": true, "selectedColor": "#1e88e5" },
        }));
    }

    #[test]
    fn selecting_keeps_the_dot() {
        let dot = Color::from_rgb_u8(0x4c, 0xaf, 0x50);
        let mut marker = Marker::dot(dot.clone());
        marker.select(Color::from_rgb_u8(0, 0, 0));
        assert!(marker.marked);
        assert!(marker.is_selected());
        assert_eq!(marker.dot_color, Some(dot));
    }
}
