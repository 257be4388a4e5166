//! Axis guides in the style of d3-axis.
//!
//! An axis is generated as three marks with fixed names: the `domain` line,
//! the `tick` rules and the `tick-label` text. Regenerating an axis only
//! replaces those marks in the target group, so anything else placed in the
//! group (titles) persists across redraws.

pub mod band;
pub mod numeric;
pub mod opts;

use barview_common::types::{TextAlign, TextBaseline, BLACK};
use barview_common::value::ScalarOrArray;
use barview_scenegraph::marks::{
    group::SceneGroup, mark::SceneMark, rule::SceneRuleMark, text::SceneTextMark,
};

use crate::error::GuidesError;
use opts::{AxisConfig, AxisOrientation};

pub const DOMAIN_MARK_NAME: &str = "domain";
pub const TICK_MARK_NAME: &str = "tick";
pub const TICK_LABEL_MARK_NAME: &str = "tick-label";

/// Generated marks for one axis
#[derive(Debug, Clone, PartialEq)]
pub struct AxisMarks {
    pub domain: SceneRuleMark,
    pub ticks: SceneRuleMark,
    pub labels: SceneTextMark,
    /// Tick offsets along the axis, in the axis group's coordinates
    pub positions: Vec<f32>,
}

impl AxisMarks {
    pub fn into_marks(self) -> Vec<SceneMark> {
        vec![self.domain.into(), self.ticks.into(), self.labels.into()]
    }

    /// Replaces this axis' marks inside `group`, leaving other marks untouched
    pub fn apply_to(self, group: &mut SceneGroup) {
        for mark in self.into_marks() {
            group.upsert_mark(mark);
        }
    }

    pub fn tick_labels(&self) -> Vec<String> {
        self.labels.text_vec()
    }
}

impl AxisOrientation {
    /// -1 for axes whose ticks point towards negative coordinates
    pub fn sign(&self) -> f32 {
        match self {
            AxisOrientation::Top | AxisOrientation::Left => -1.0,
            AxisOrientation::Bottom | AxisOrientation::Right => 1.0,
        }
    }

    pub fn is_vertical(&self) -> bool {
        matches!(self, AxisOrientation::Left | AxisOrientation::Right)
    }
}

pub(crate) fn make_axis_marks(
    positions: Vec<f32>,
    labels: Vec<String>,
    range: (f32, f32),
    config: &AxisConfig,
) -> Result<AxisMarks, GuidesError> {
    if !range.0.is_finite() || !range.1.is_finite() {
        return Err(GuidesError::NonFiniteRange(range.0, range.1));
    }

    Ok(AxisMarks {
        domain: make_axis_line(range, config),
        ticks: make_tick_marks(&positions, config),
        labels: make_tick_labels(&positions, labels, config),
        positions,
    })
}

/// The domain path as three segments: outer tick, spine, outer tick
fn make_axis_line(range: (f32, f32), config: &AxisConfig) -> SceneRuleMark {
    let outer = config.orientation.sign() * config.tick_size_outer;
    let spine = config.offset;
    let r0 = range.0 + config.offset;
    let r1 = range.1 + config.offset;

    let (x, y, x2, y2) = if config.orientation.is_vertical() {
        (
            vec![outer, spine, spine],
            vec![r0, r0, r1],
            vec![spine, spine, outer],
            vec![r0, r1, r1],
        )
    } else {
        (
            vec![r0, r0, r1],
            vec![outer, spine, spine],
            vec![r0, r1, r1],
            vec![spine, spine, outer],
        )
    };

    SceneRuleMark {
        name: DOMAIN_MARK_NAME.to_string(),
        len: 3,
        x: x.into(),
        y: y.into(),
        x2: x2.into(),
        y2: y2.into(),
        stroke: BLACK.into(),
        stroke_width: 1.0.into(),
        ..Default::default()
    }
}

fn make_tick_marks(positions: &[f32], config: &AxisConfig) -> SceneRuleMark {
    let along = ScalarOrArray::new_array(positions.to_vec());
    let tick_end = config.orientation.sign() * config.tick_size_inner;

    let (x, x2, y, y2) = if config.orientation.is_vertical() {
        (
            ScalarOrArray::new_scalar(0.0),
            ScalarOrArray::new_scalar(tick_end),
            along.clone(),
            along,
        )
    } else {
        (
            along.clone(),
            along,
            ScalarOrArray::new_scalar(0.0),
            ScalarOrArray::new_scalar(tick_end),
        )
    };

    SceneRuleMark {
        name: TICK_MARK_NAME.to_string(),
        len: positions.len() as u32,
        x,
        x2,
        y,
        y2,
        stroke: BLACK.into(),
        stroke_width: 1.0.into(),
        ..Default::default()
    }
}

fn make_tick_labels(positions: &[f32], labels: Vec<String>, config: &AxisConfig) -> SceneTextMark {
    let along = ScalarOrArray::new_array(positions.to_vec());
    let spacing = config.tick_size_inner.max(0.0) + config.tick_padding;

    let (x, y, align, baseline) = match config.orientation {
        AxisOrientation::Left => (
            ScalarOrArray::new_scalar(-spacing),
            along,
            TextAlign::Right,
            TextBaseline::Middle,
        ),
        AxisOrientation::Right => (
            ScalarOrArray::new_scalar(spacing),
            along,
            TextAlign::Left,
            TextBaseline::Middle,
        ),
        AxisOrientation::Top => (
            along,
            ScalarOrArray::new_scalar(-spacing),
            TextAlign::Center,
            TextBaseline::Alphabetic,
        ),
        AxisOrientation::Bottom => (
            along,
            ScalarOrArray::new_scalar(spacing),
            TextAlign::Center,
            TextBaseline::Top,
        ),
    };

    SceneTextMark {
        name: TICK_LABEL_MARK_NAME.to_string(),
        len: positions.len() as u32,
        text: labels.into(),
        x,
        y,
        align: align.into(),
        baseline: baseline.into(),
        color: BLACK.into(),
        font_size: config.font_size.into(),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::band::make_band_axis_marks;
    use barview_scales::band::BandScale;

    #[test]
    fn test_apply_to_keeps_other_marks() {
        let mut group = SceneGroup::new("x-axis axis", [0.0, 430.0]);
        group.marks.push(
            SceneTextMark {
                name: "axis-label x".to_string(),
                text: "State".into(),
                ..Default::default()
            }
            .into(),
        );

        let config = AxisConfig::new(AxisOrientation::Bottom);
        let scale = BandScale::new(vec!["A".to_string(), "B".to_string()]).range((0.0, 900.0));
        make_band_axis_marks(&scale, &config).unwrap().apply_to(&mut group);
        assert_eq!(group.marks.len(), 4);

        // Redrawing with a different domain replaces ticks in place
        let scale = scale.with_domain(vec!["C".to_string()]);
        make_band_axis_marks(&scale, &config).unwrap().apply_to(&mut group);
        assert_eq!(group.marks.len(), 4);

        let names: Vec<_> = group.marks.iter().map(|m| m.name().to_string()).collect();
        assert_eq!(names, vec!["axis-label x", "domain", "tick", "tick-label"]);
        assert_eq!(group.marks[2].len(), 1);
    }
}
