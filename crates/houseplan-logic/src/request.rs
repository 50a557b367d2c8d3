//! House requests: the input side of the engine.
//!
//! A request is what the (external) text extractor produces: an ordered list of
//! room types, an optional plot size and a story count. `HouseRequest::from_json`
//! is the only fallible entry point of the crate.

use serde::{Deserialize, Serialize};

use crate::constants::dimensions::MAX_STORIES;
use crate::error::{RequestError, Result};
use crate::plot::PlotSize;

/// A single requested room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRequest {
    #[serde(rename = "type")]
    pub room_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl RoomRequest {
    pub fn new(room_type: impl Into<String>) -> Self {
        Self {
            room_type: room_type.into(),
            id: None,
        }
    }
}

/// Plot size as it may appear in a request: meters, Marla or Kanal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlotInput {
    #[serde(default)]
    pub width_meters: Option<f32>,
    #[serde(default)]
    pub length_meters: Option<f32>,
    #[serde(default)]
    pub marla: Option<f32>,
    #[serde(default)]
    pub kanal: Option<f32>,
}

impl PlotInput {
    /// Resolve to a concrete plot. Explicit meters win over Kanal, Kanal over
    /// Marla. Returns `None` when nothing usable is present.
    pub fn resolve(&self) -> Option<PlotSize> {
        match (self.width_meters, self.length_meters) {
            (Some(w), Some(l)) => Some(PlotSize {
                width_meters: w,
                length_meters: l,
                marla: self.marla,
                kanal: self.kanal,
            }),
            _ => self
                .kanal
                .map(PlotSize::from_kanal)
                .or_else(|| self.marla.map(PlotSize::from_marla)),
        }
    }
}

#[derive(Deserialize)]
struct RawRequest {
    #[serde(default)]
    rooms: Vec<RoomRequest>,
    #[serde(default)]
    plot_size: Option<PlotInput>,
    #[serde(default = "default_stories")]
    stories: u32,
}

fn default_stories() -> u32 {
    1
}

/// Validated house request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HouseRequest {
    pub rooms: Vec<RoomRequest>,
    /// `None` means "use the configured default plot".
    pub plot_size: Option<PlotSize>,
    pub stories: u32,
}

impl HouseRequest {
    /// Build a request from room type names, capping `stories` like
    /// [`from_json`](Self::from_json) does. A story count of 0 becomes 1.
    pub fn from_types<S: AsRef<str>>(types: &[S], plot_size: Option<PlotSize>, stories: u32) -> Self {
        Self {
            rooms: types.iter().map(|t| RoomRequest::new(t.as_ref())).collect(),
            plot_size,
            stories: stories.clamp(1, MAX_STORIES),
        }
    }

    /// Parse and validate a JSON request.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawRequest = serde_json::from_str(json)?;

        if raw.stories == 0 {
            return Err(RequestError::InvalidStories(raw.stories));
        }
        let stories = if raw.stories > MAX_STORIES {
            log::warn!(
                "Requested {} stories, capping at {}",
                raw.stories,
                MAX_STORIES
            );
            MAX_STORIES
        } else {
            raw.stories
        };

        let plot_size = raw.plot_size.and_then(|p| p.resolve());
        if let Some(plot) = &plot_size {
            check_plot(plot)?;
        }

        Ok(Self {
            rooms: raw.rooms,
            plot_size,
            stories,
        })
    }

    pub fn room_types(&self) -> impl Iterator<Item = &str> {
        self.rooms.iter().map(|r| r.room_type.as_str())
    }
}

fn check_plot(plot: &PlotSize) -> Result<()> {
    for (name, value) in [
        ("width_meters", plot.width_meters),
        ("length_meters", plot.length_meters),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(RequestError::InvalidPlot(format!(
                "{} must be a positive number, got {}",
                name, value
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_request() {
        let req = HouseRequest::from_json(r#"{"rooms": [{"type": "bedroom"}, {"type": "kitchen"}]}"#)
            .expect("valid request");
        assert_eq!(req.rooms.len(), 2);
        assert_eq!(req.rooms[0].room_type, "bedroom");
        assert_eq!(req.stories, 1);
        assert_eq!(req.plot_size, None);
    }

    #[test]
    fn test_stories_capped_at_five() {
        let req = HouseRequest::from_json(r#"{"rooms": [], "stories": 9}"#).expect("valid request");
        assert_eq!(req.stories, 5);
    }

    #[test]
    fn test_zero_stories_rejected() {
        let err = HouseRequest::from_json(r#"{"rooms": [], "stories": 0}"#).unwrap_err();
        assert!(matches!(err, RequestError::InvalidStories(0)));
    }

    #[test]
    fn test_negative_plot_rejected() {
        let err = HouseRequest::from_json(
            r#"{"rooms": [], "plot_size": {"width_meters": -3.0, "length_meters": 10.0}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, RequestError::InvalidPlot(_)));
        assert!(err.to_string().contains("width_meters"));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = HouseRequest::from_json("{rooms: ").unwrap_err();
        assert!(matches!(err, RequestError::Json(_)));
    }

    #[test]
    fn test_marla_plot_resolved_to_meters() {
        let req = HouseRequest::from_json(r#"{"rooms": [], "plot_size": {"marla": 10}}"#)
            .expect("valid request");
        let plot = req.plot_size.expect("plot resolved");
        assert_eq!(plot.marla, Some(10.0));
        assert!(plot.width_meters > 0.0 && plot.length_meters > 0.0);
    }

    #[test]
    fn test_meters_win_over_kanal() {
        let input = PlotInput {
            width_meters: Some(20.0),
            length_meters: Some(25.0),
            marla: None,
            kanal: Some(1.0),
        };
        let plot = input.resolve().expect("plot resolved");
        assert_eq!(plot.width_meters, 20.0);
        assert_eq!(plot.kanal, Some(1.0));
    }

    #[test]
    fn test_room_id_round_trips_through_type_field() {
        let room = RoomRequest {
            room_type: "study".into(),
            id: Some("study_1".into()),
        };
        let json = serde_json::to_string(&room).expect("serialize room");
        assert_eq!(json, r#"{"type":"study","id":"study_1"}"#);
    }

    #[test]
    fn test_from_types_clamps_stories() {
        let req = HouseRequest::from_types(&["bedroom"], None, 0);
        assert_eq!(req.stories, 1);
        let req = HouseRequest::from_types(&["bedroom"], None, 12);
        assert_eq!(req.stories, 5);
    }
}
