//! The bar chart view.
//!
//! Layout follows the margin convention: the surface is
//! `container_width x container_height`, and an inner chart group translated
//! by `(margin.left, margin.top)` holds the y-axis group, the x-axis group
//! (translated to the bottom of the inner area) and the bars.

use barview_common::types::{Rgba, TextAlign, TextBaseline, BLACK};
use barview_guides::axis::band::make_band_axis_marks;
use barview_guides::axis::numeric::make_numeric_axis_marks;
use barview_guides::axis::opts::{AxisConfig, AxisOrientation};
use barview_scales::band::BandScale;
use barview_scales::numeric::linear::{LinearNumericScale, LinearNumericScaleConfig};
use barview_scales::numeric::ContinuousNumericScale;
use barview_scenegraph::marks::group::SceneGroup;
use barview_scenegraph::marks::rect::SceneRectMark;
use barview_scenegraph::marks::text::SceneTextMark;
use barview_scenegraph::scene_graph::SceneGraph;

use crate::config::ChartConfig;
use crate::data::Record;
use crate::error::ChartError;
use crate::join::{JoinPlan, RenderSummary};

pub const CHART_GROUP: &str = "chart";
pub const Y_AXIS_GROUP: &str = "y-axis axis";
pub const X_AXIS_GROUP: &str = "x-axis axis";
pub const BAR_MARK: &str = "bar";
pub const X_TITLE_MARK: &str = "axis-label x";
pub const Y_TITLE_MARK: &str = "axis-label y";

pub const X_TITLE: &str = "State";
pub const Y_TITLE: &str = "Percent Drinking";

/// css `steelblue`
pub const BAR_FILL: Rgba = [70.0 / 255.0, 130.0 / 255.0, 180.0 / 255.0, 1.0];

const PADDING_INNER: f32 = 0.2;
const TITLE_FONT_SIZE: f32 = 10.0;

/// Retained state of one bar element
#[derive(Debug, Clone, PartialEq)]
pub struct BarElement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub fill: Rgba,
}

impl BarElement {
    fn entered() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            fill: BAR_FILL,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChartView {
    config: ChartConfig,
    data: Vec<Record>,
    inner_width: f32,
    inner_height: f32,
    y_scale: LinearNumericScale,
    x_scale: BandScale<String>,
    y_axis: AxisConfig,
    x_axis: AxisConfig,
    bars: Vec<BarElement>,
    scene_graph: SceneGraph,
}

impl ChartView {
    /// Builds the surface, scales, axis groups and titles. The dataset is
    /// stored as given; scale domains are only derived by [`ChartView::update`].
    pub fn new(config: ChartConfig, data: Vec<Record>) -> Self {
        let inner_width = config.inner_width();
        let inner_height = config.inner_height();
        if !(inner_width > 0.0) || !(inner_height > 0.0) {
            log::warn!(
                "inner chart area is {inner_width}x{inner_height}; check container size and margins"
            );
        }

        let y_scale = LinearNumericScale::new(&LinearNumericScaleConfig {
            range: (inner_height, 0.0),
            ..Default::default()
        });
        let x_scale = BandScale::new(vec![])
            .range((0.0, inner_width))
            .padding_inner(PADDING_INNER);

        let mut y_axis_group = SceneGroup::new(Y_AXIS_GROUP, [0.0, 0.0]);
        y_axis_group.marks.push(
            SceneTextMark {
                name: Y_TITLE_MARK.to_string(),
                text: Y_TITLE.into(),
                // Rotated about its anchor, so x offsets the title away from the axis
                x: (-config.margin.top + 20.0).into(),
                y: (inner_height / 2.0).into(),
                angle: (-90.0).into(),
                align: TextAlign::Center.into(),
                baseline: TextBaseline::LineTop.into(),
                color: BLACK.into(),
                font_size: TITLE_FONT_SIZE.into(),
                ..Default::default()
            }
            .into(),
        );

        let mut x_axis_group = SceneGroup::new(X_AXIS_GROUP, [0.0, inner_height]);
        x_axis_group.marks.push(
            SceneTextMark {
                name: X_TITLE_MARK.to_string(),
                text: X_TITLE.into(),
                x: (inner_width / 2.0).into(),
                // 20px below the axis plus 2.5em
                y: (20.0 + 2.5 * TITLE_FONT_SIZE).into(),
                align: TextAlign::Center.into(),
                baseline: TextBaseline::Alphabetic.into(),
                color: BLACK.into(),
                font_size: TITLE_FONT_SIZE.into(),
                ..Default::default()
            }
            .into(),
        );

        let mut chart_group =
            SceneGroup::new(CHART_GROUP, [config.margin.left, config.margin.top]);
        chart_group.marks.push(y_axis_group.into());
        chart_group.marks.push(x_axis_group.into());

        let mut scene_graph = SceneGraph::new(config.container_width, config.container_height);
        scene_graph.marks.push(chart_group.into());

        Self {
            config,
            data,
            inner_width,
            inner_height,
            y_scale,
            x_scale,
            y_axis: AxisConfig::new(AxisOrientation::Left),
            x_axis: AxisConfig::new(AxisOrientation::Bottom),
            bars: vec![],
            scene_graph,
        }
    }

    /// Replaces the dataset, recomputes both scale domains and renders.
    ///
    /// Empty datasets and non-finite values are rejected without touching
    /// the current state.
    pub fn update(&mut self, data: Vec<Record>) -> Result<RenderSummary, ChartError> {
        validate_records(&data)?;

        let max = data
            .iter()
            .map(|record| record.value)
            .fold(f32::NEG_INFINITY, f32::max);
        let categories = data.iter().map(|record| record.category.clone()).collect();

        self.data = data;
        self.y_scale.set_domain((0.0, max));
        self.x_scale.set_domain(categories);
        log::debug!(
            "y domain [0, {max}], x domain {:?}",
            self.x_scale.get_domain()
        );

        self.render()
    }

    /// Joins the dataset against the retained bars by position, sets the
    /// geometry of every bar and redraws both axes.
    pub fn render(&mut self) -> Result<RenderSummary, ChartError> {
        // Resolve all geometry before mutating anything
        let bandwidth = self.x_scale.bandwidth();
        let geometry = self
            .data
            .iter()
            .map(|record| -> Result<(f32, f32, f32), ChartError> {
                let x = self
                    .x_scale
                    .position(&record.category, &Default::default())
                    .ok_or_else(|| ChartError::UnknownCategory(record.category.clone()))?;
                let y = self.y_scale.scale_scalar(record.value);
                Ok((x, y, self.inner_height - y))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let y_axis_marks = make_numeric_axis_marks(&self.y_scale, &self.y_axis)?;
        let x_axis_marks = make_band_axis_marks(&self.x_scale, &self.x_axis)?;

        let plan = JoinPlan::positional(self.bars.len(), geometry.len());
        self.bars.truncate(plan.update.end);
        self.bars
            .extend(plan.enter.clone().map(|_| BarElement::entered()));
        for (bar, (x, y, height)) in self.bars.iter_mut().zip(geometry) {
            bar.x = x;
            bar.y = y;
            bar.width = bandwidth;
            bar.height = height;
        }

        let bar_mark = self.bar_mark();
        let chart = self.scene_graph.find_group_mut(CHART_GROUP)?;
        chart.upsert_mark(bar_mark.into());
        y_axis_marks.apply_to(chart.child_group_mut(Y_AXIS_GROUP)?);
        x_axis_marks.apply_to(chart.child_group_mut(X_AXIS_GROUP)?);

        let summary = plan.summary();
        log::debug!(
            "rendered {} bars (entered {}, updated {}, exited {})",
            self.bars.len(),
            summary.entered,
            summary.updated,
            summary.exited
        );
        Ok(summary)
    }

    fn bar_mark(&self) -> SceneRectMark {
        SceneRectMark {
            name: BAR_MARK.to_string(),
            len: self.bars.len() as u32,
            x: self.bars.iter().map(|bar| bar.x).collect::<Vec<_>>().into(),
            y: self.bars.iter().map(|bar| bar.y).collect::<Vec<_>>().into(),
            width: Some(self.bars.iter().map(|bar| bar.width).collect::<Vec<_>>().into()),
            height: Some(self.bars.iter().map(|bar| bar.height).collect::<Vec<_>>().into()),
            fill: self.bars.iter().map(|bar| bar.fill).collect::<Vec<_>>().into(),
            ..Default::default()
        }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn data(&self) -> &[Record] {
        &self.data
    }

    pub fn inner_width(&self) -> f32 {
        self.inner_width
    }

    pub fn inner_height(&self) -> f32 {
        self.inner_height
    }

    pub fn y_scale(&self) -> &LinearNumericScale {
        &self.y_scale
    }

    pub fn x_scale(&self) -> &BandScale<String> {
        &self.x_scale
    }

    pub fn bars(&self) -> &[BarElement] {
        &self.bars
    }

    pub fn scene_graph(&self) -> &SceneGraph {
        &self.scene_graph
    }

    pub fn to_svg(&self) -> Result<String, ChartError> {
        Ok(barview_svg::scene_graph_to_svg(&self.scene_graph)?)
    }

    #[cfg(feature = "png")]
    pub fn to_png(&self, scale: f32) -> Result<Vec<u8>, ChartError> {
        Ok(barview_svg::png::svg_to_png(&self.to_svg()?, scale)?)
    }
}

fn validate_records(data: &[Record]) -> Result<(), ChartError> {
    if data.is_empty() {
        return Err(ChartError::EmptyDataset);
    }
    if let Some((index, record)) = data
        .iter()
        .enumerate()
        .find(|(_, record)| !record.value.is_finite())
    {
        return Err(ChartError::NonFiniteValue {
            index,
            category: record.category.clone(),
        });
    }
    Ok(())
}
