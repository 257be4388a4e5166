/// Logical size of a drawing surface plus the device scale used when it is rasterized
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CanvasDimensions {
    pub size: [f32; 2],
    pub scale: f32,
}

impl CanvasDimensions {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: [width, height],
            scale: 1.0,
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn to_physical_width(&self) -> u32 {
        (self.size[0] * self.scale) as u32
    }

    pub fn to_physical_height(&self) -> u32 {
        (self.size[1] * self.scale) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physical_size() {
        let dims = CanvasDimensions::new(1000.0, 600.0).with_scale(2.0);
        assert_eq!(dims.to_physical_width(), 2000);
        assert_eq!(dims.to_physical_height(), 1200);
    }
}
