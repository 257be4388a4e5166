use barview_common::types::{Rgba, TRANSPARENT};
use barview_common::value::ScalarOrArray;
use itertools::izip;
use serde::{Deserialize, Serialize};

use super::mark::SceneMark;

/// Axis-aligned rectangles. Extent comes from `width`/`height` when present,
/// otherwise from `x2`/`y2`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SceneRectMark {
    pub name: String,
    pub len: u32,
    pub x: ScalarOrArray<f32>,
    pub y: ScalarOrArray<f32>,
    pub width: Option<ScalarOrArray<f32>>,
    pub height: Option<ScalarOrArray<f32>>,
    pub x2: Option<ScalarOrArray<f32>>,
    pub y2: Option<ScalarOrArray<f32>>,
    pub fill: ScalarOrArray<Rgba>,
    pub stroke: ScalarOrArray<Rgba>,
    pub stroke_width: ScalarOrArray<f32>,
    pub corner_radius: ScalarOrArray<f32>,
    pub indices: Option<Vec<usize>>,
    pub zindex: Option<i32>,
}

impl SceneRectMark {
    pub fn x_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.x.as_iter(self.len as usize, self.indices.as_ref())
    }

    pub fn x_vec(&self) -> Vec<f32> {
        self.x.as_vec(self.len as usize, self.indices.as_ref())
    }

    pub fn y_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.y.as_iter(self.len as usize, self.indices.as_ref())
    }

    pub fn y_vec(&self) -> Vec<f32> {
        self.y.as_vec(self.len as usize, self.indices.as_ref())
    }

    pub fn width_iter(&self) -> Box<dyn Iterator<Item = f32> + '_> {
        if let Some(width) = self.width.as_ref() {
            width.as_iter_owned(self.len as usize, self.indices.as_ref())
        } else if let Some(x2) = self.x2.as_ref() {
            Box::new(
                self.x_iter()
                    .zip(x2.as_iter(self.len as usize, self.indices.as_ref()))
                    .map(|(x, x2)| x2 - x),
            )
        } else {
            Box::new(std::iter::repeat(1.0).take(self.len as usize))
        }
    }

    pub fn width_vec(&self) -> Vec<f32> {
        self.width_iter().collect()
    }

    pub fn height_iter(&self) -> Box<dyn Iterator<Item = f32> + '_> {
        if let Some(height) = self.height.as_ref() {
            height.as_iter_owned(self.len as usize, self.indices.as_ref())
        } else if let Some(y2) = self.y2.as_ref() {
            Box::new(
                self.y_iter()
                    .zip(y2.as_iter(self.len as usize, self.indices.as_ref()))
                    .map(|(y, y2)| y2 - y),
            )
        } else {
            Box::new(std::iter::repeat(1.0).take(self.len as usize))
        }
    }

    pub fn height_vec(&self) -> Vec<f32> {
        self.height_iter().collect()
    }

    pub fn fill_iter(&self) -> Box<dyn Iterator<Item = &Rgba> + '_> {
        self.fill.as_iter(self.len as usize, self.indices.as_ref())
    }

    pub fn stroke_iter(&self) -> Box<dyn Iterator<Item = &Rgba> + '_> {
        self.stroke.as_iter(self.len as usize, self.indices.as_ref())
    }

    pub fn stroke_width_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.stroke_width
            .as_iter(self.len as usize, self.indices.as_ref())
    }

    pub fn corner_radius_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.corner_radius
            .as_iter(self.len as usize, self.indices.as_ref())
    }

    /// Normalized `[x, y, width, height]` per rect, with negative extents flipped
    pub fn bounds_vec(&self) -> Vec<[f32; 4]> {
        izip!(self.x_iter(), self.y_iter(), self.width_iter(), self.height_iter())
            .map(|(x, y, w, h)| {
                let x0 = f32::min(*x, x + w);
                let y0 = f32::min(*y, y + h);
                [x0, y0, w.abs(), h.abs()]
            })
            .collect()
    }
}

impl Default for SceneRectMark {
    fn default() -> Self {
        Self {
            name: "rect_mark".to_string(),
            len: 1,
            x: ScalarOrArray::new_scalar(0.0),
            y: ScalarOrArray::new_scalar(0.0),
            width: None,
            height: None,
            x2: None,
            y2: None,
            fill: ScalarOrArray::new_scalar(TRANSPARENT),
            stroke: ScalarOrArray::new_scalar(TRANSPARENT),
            stroke_width: ScalarOrArray::new_scalar(0.0),
            corner_radius: ScalarOrArray::new_scalar(0.0),
            indices: None,
            zindex: None,
        }
    }
}

impl From<SceneRectMark> for SceneMark {
    fn from(mark: SceneRectMark) -> Self {
        SceneMark::Rect(mark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_from_x2() {
        let mark = SceneRectMark {
            len: 2,
            x: vec![0.0, 10.0].into(),
            x2: Some(vec![5.0, 30.0].into()),
            ..Default::default()
        };
        assert_eq!(mark.width_vec(), vec![5.0, 20.0]);
        // No height or y2 defaults to one pixel
        assert_eq!(mark.height_vec(), vec![1.0, 1.0]);
    }

    #[test]
    fn test_bounds_flip_negative_height() {
        let mark = SceneRectMark {
            x: 1.0.into(),
            y: 10.0.into(),
            width: Some(4.0.into()),
            height: Some((-6.0).into()),
            ..Default::default()
        };
        assert_eq!(mark.bounds_vec(), vec![[1.0, 4.0, 4.0, 6.0]]);
    }
}
