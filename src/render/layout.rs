use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Scene key the engine uses when a 3D trace names no scene.
pub const DEFAULT_SCENE: &str = "scene";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Title {
    pub text: String,
}

impl Title {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Axis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
}

impl Axis {
    #[must_use]
    pub fn titled(text: impl Into<String>) -> Self {
        Self {
            title: Some(Title::new(text)),
            range: None,
        }
    }

    #[must_use]
    pub fn with_range(mut self, start: f64, end: f64) -> Self {
        self.range = Some([start, end]);
        self
    }

    fn validate(&self) -> ChartResult<()> {
        match self.range {
            Some([start, end]) if !start.is_finite() || !end.is_finite() || start == end => Err(
                ChartError::InvalidData("axis range must be finite and non-empty".to_owned()),
            ),
            _ => Ok(()),
        }
    }
}

/// Fraction of the paper a scene occupies, both spans within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

impl Domain {
    #[must_use]
    pub const fn new(x: [f64; 2], y: [f64; 2]) -> Self {
        Self { x, y }
    }

    fn validate(self) -> ChartResult<()> {
        for [start, end] in [self.x, self.y] {
            if !(0.0..=1.0).contains(&start) || !(0.0..=1.0).contains(&end) || start >= end {
                return Err(ChartError::InvalidData(
                    "scene domain spans must be increasing and within [0, 1]".to_owned(),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneLayout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zaxis: Option<Axis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<Domain>,
}

impl SceneLayout {
    #[must_use]
    pub fn with_axes(x: &str, y: &str, z: &str) -> Self {
        Self {
            xaxis: Some(Axis::titled(x)),
            yaxis: Some(Axis::titled(y)),
            zaxis: Some(Axis::titled(z)),
            domain: None,
        }
    }

    #[must_use]
    pub fn with_domain(mut self, domain: Domain) -> Self {
        self.domain = Some(domain);
        self
    }

    fn validate(&self) -> ChartResult<()> {
        for axis in [&self.xaxis, &self.yaxis, &self.zaxis].into_iter().flatten() {
            axis.validate()?;
        }
        self.domain.map_or(Ok(()), Domain::validate)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisRef {
    Paper,
}

/// Text placed in normalized paper coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub xref: AxisRef,
    pub yref: AxisRef,
    pub showarrow: bool,
}

impl Annotation {
    #[must_use]
    pub fn paper(text: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            xref: AxisRef::Paper,
            yref: AxisRef::Paper,
            showarrow: false,
        }
    }

    fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData(
                "annotation text must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidData(
                "annotation coordinates must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub t: u32,
    pub b: u32,
}

impl Margin {
    #[must_use]
    pub const fn uniform(px: u32) -> Self {
        Self {
            l: px,
            r: px,
            t: px,
            b: px,
        }
    }
}

/// Layout metadata for one descriptor.
///
/// Multi-scene layouts keep their scenes in insertion order under the keys
/// `scene`, `scene2`, ... which are flattened into the layout object. Other
/// engine layout keys (`width`, `hovermode`, ...) are accepted and ignored
/// when reading a layout back.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paper_bgcolor: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plot_bgcolor: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
    #[serde(flatten, deserialize_with = "scenes_only")]
    pub scenes: IndexMap<String, SceneLayout>,
}

impl LayoutOptions {
    #[must_use]
    pub fn titled(text: impl Into<String>) -> Self {
        Self {
            title: Some(Title::new(text)),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    #[must_use]
    pub fn with_axes(mut self, x: Axis, y: Axis) -> Self {
        self.xaxis = Some(x);
        self.yaxis = Some(y);
        self
    }

    #[must_use]
    pub fn with_scene(mut self, key: impl Into<String>, scene: SceneLayout) -> Self {
        self.scenes.insert(key.into(), scene);
        self
    }

    #[must_use]
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    #[must_use]
    pub fn with_showlegend(mut self, showlegend: bool) -> Self {
        self.showlegend = Some(showlegend);
        self
    }

    #[must_use]
    pub fn title_text(&self) -> Option<&str> {
        self.title.as_ref().map(|title| title.text.as_str())
    }

    #[must_use]
    pub fn has_scene(&self, key: &str) -> bool {
        self.scenes.contains_key(key)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.height == Some(0) {
            return Err(ChartError::InvalidData(
                "layout height must be > 0".to_owned(),
            ));
        }
        for axis in [&self.xaxis, &self.yaxis].into_iter().flatten() {
            axis.validate()?;
        }
        for (key, scene) in &self.scenes {
            if !key.starts_with(DEFAULT_SCENE) {
                return Err(ChartError::InvalidData(format!(
                    "scene key `{key}` must start with `{DEFAULT_SCENE}`"
                )));
            }
            scene.validate()?;
        }
        for annotation in &self.annotations {
            annotation.validate()?;
        }
        for color in [self.paper_bgcolor, self.plot_bgcolor].into_iter().flatten() {
            color.validate()?;
        }
        Ok(())
    }
}

/// `scene` followed by an optional numeric suffix.
fn is_scene_key(key: &str) -> bool {
    key.strip_prefix(DEFAULT_SCENE)
        .is_some_and(|suffix| suffix.chars().all(|c| c.is_ascii_digit()))
}

fn scenes_only<'de, D>(deserializer: D) -> Result<IndexMap<String, SceneLayout>, D::Error>
where
    D: Deserializer<'de>,
{
    let rest = IndexMap::<String, serde_json::Value>::deserialize(deserializer)?;
    rest.into_iter()
        .filter(|(key, _)| is_scene_key(key))
        .map(|(key, value)| {
            SceneLayout::deserialize(value)
                .map(|scene| (key, scene))
                .map_err(D::Error::custom)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenes_flatten_into_layout_in_insertion_order() {
        let layout = LayoutOptions::titled("two panels")
            .with_scene(
                "scene",
                SceneLayout::default().with_domain(Domain::new([0.0, 0.5], [0.0, 1.0])),
            )
            .with_scene(
                "scene2",
                SceneLayout::default().with_domain(Domain::new([0.5, 1.0], [0.0, 1.0])),
            );
        let json = serde_json::to_string(&layout).expect("serialize");
        let first = json.find("\"scene\"").expect("scene key");
        let second = json.find("\"scene2\"").expect("scene2 key");
        assert!(first < second);

        let parsed: LayoutOptions = serde_json::from_str(&json).expect("parse");
        assert_eq!(parsed, layout);
    }

    #[test]
    fn unrelated_engine_keys_are_ignored_when_reading() {
        let parsed: LayoutOptions = serde_json::from_str(
            r#"{
                "width": 800,
                "hovermode": "closest",
                "scenery": { "mood": "calm" },
                "scene2": { "domain": { "x": [0.5, 1.0], "y": [0.0, 1.0] } },
                "height": 420
            }"#,
        )
        .expect("engine layout parses");
        assert_eq!(parsed.height, Some(420));
        assert_eq!(parsed.scenes.len(), 1);
        assert!(parsed.has_scene("scene2"));
    }

    #[test]
    fn malformed_scene_is_still_an_error() {
        let parsed = serde_json::from_str::<LayoutOptions>(r#"{ "scene": 3 }"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn overlapping_domain_bounds_are_rejected() {
        let layout = LayoutOptions::default().with_scene(
            "scene",
            SceneLayout::default().with_domain(Domain::new([0.6, 0.4], [0.0, 1.0])),
        );
        assert!(layout.validate().is_err());
    }
}
