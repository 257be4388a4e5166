/// Per-call options for [`super::BandScale::scale`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BandScaleOptions {
    /// Position within the band in [0, 1]; 0.5 gives the band centre
    pub band: Option<f32>,
    /// Constant pixel offset added to every output
    pub range_offset: Option<f32>,
}
