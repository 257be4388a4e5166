#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrientation {
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisConfig {
    pub orientation: AxisOrientation,
    pub tick_size_inner: f32,
    pub tick_size_outer: f32,
    pub tick_padding: f32,
    /// Requested tick count for continuous scales
    pub tick_count: f32,
    /// Half-pixel offset that keeps 1px lines crisp
    pub offset: f32,
    pub font_size: f32,
}

impl AxisConfig {
    pub fn new(orientation: AxisOrientation) -> Self {
        Self {
            orientation,
            ..Default::default()
        }
    }
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            orientation: AxisOrientation::Left,
            tick_size_inner: 6.0,
            tick_size_outer: 6.0,
            tick_padding: 3.0,
            tick_count: 10.0,
            offset: 0.5,
            font_size: 10.0,
        }
    }
}
