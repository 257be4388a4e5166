use std::fmt::Debug;
use std::hash::Hash;

use barview_scales::band::BandScale;

use crate::error::GuidesError;

use super::opts::AxisConfig;
use super::{make_axis_marks, AxisMarks};

/// Builds axis marks for a band scale with one tick per domain value,
/// centred in its band.
pub fn make_band_axis_marks<D>(
    scale: &BandScale<D>,
    config: &AxisConfig,
) -> Result<AxisMarks, GuidesError>
where
    D: Debug + Clone + Hash + Eq + Sync + ToString + 'static,
{
    // Inset by the pixel offset so the tick lands on the band centre once it is added back
    let mut inset = (scale.bandwidth() - 2.0 * config.offset).max(0.0) / 2.0;
    if scale.get_round() {
        inset = inset.round();
    }

    let mut positions = Vec::with_capacity(scale.get_domain().len());
    let mut labels = Vec::with_capacity(scale.get_domain().len());
    for value in scale.get_domain() {
        if let Some(start) = scale.position(value, &Default::default()) {
            positions.push(start + inset + config.offset);
            labels.push(value.to_string());
        }
    }

    make_axis_marks(positions, labels, scale.get_range(), config)
}
