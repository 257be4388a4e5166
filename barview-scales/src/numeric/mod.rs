pub mod linear;

use barview_common::value::{ScalarOrArray, ScalarOrArrayRef};

/// A scale that maps a continuous numeric domain to a continuous numeric range
pub trait ContinuousNumericScale<R: Sync + Clone>: Clone {
    /// Returns the current domain as (start, end)
    fn domain(&self) -> (f32, f32);

    /// Returns the current range as (start, end)
    fn range(&self) -> (f32, f32);

    /// Returns whether output clamping is enabled
    fn clamp(&self) -> bool;

    /// Maps input values from domain to range
    fn scale<'a>(&self, values: impl Into<ScalarOrArrayRef<'a, f32>>) -> ScalarOrArray<R>;

    /// Maps output values from range back to domain
    fn invert<'a>(&self, values: impl Into<ScalarOrArrayRef<'a, f32>>) -> ScalarOrArray<f32>;

    /// Generates approximately `count` tick values within the domain (default 10)
    fn ticks(&self, count: Option<f32>) -> Vec<f32>;

    fn set_domain(&mut self, domain: (f32, f32));

    fn set_range(&mut self, range: (f32, f32));

    fn set_clamp(&mut self, clamp: bool);

    /// Map a single value
    fn scale_scalar(&self, value: f32) -> R {
        match self.scale(value) {
            ScalarOrArray::Scalar(v) => v,
            // Scalar input always produces scalar output
            ScalarOrArray::Array(mut values) => values.remove(0),
        }
    }
}
