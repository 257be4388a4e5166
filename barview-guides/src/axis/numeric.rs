use barview_scales::error::ScaleError;
use barview_scales::format::{tick_format, NumberFormatter};
use barview_scales::numeric::ContinuousNumericScale;

use crate::error::GuidesError;

use super::opts::AxisConfig;
use super::{make_axis_marks, AxisMarks};

/// Builds axis marks for a continuous scale, with ticks from `scale.ticks`
/// labelled at the precision of the tick step.
pub fn make_numeric_axis_marks<S>(scale: &S, config: &AxisConfig) -> Result<AxisMarks, GuidesError>
where
    S: ContinuousNumericScale<f32>,
{
    let (d0, d1) = scale.domain();
    if !d0.is_finite() || !d1.is_finite() {
        return Err(ScaleError::InvalidDomain(d0, d1).into());
    }
    let tick_values = scale.ticks(Some(config.tick_count));
    let labels = tick_format(d0, d1, config.tick_count).format(&tick_values);

    let positions = scale
        .scale(&tick_values)
        .as_vec(tick_values.len(), None)
        .into_iter()
        .map(|p| p + config.offset)
        .collect();

    make_axis_marks(positions, labels, scale.range(), config)
}
