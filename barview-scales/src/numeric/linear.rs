use barview_common::value::{ScalarOrArray, ScalarOrArrayRef};

use crate::array;

use super::ContinuousNumericScale;

#[derive(Clone, Debug)]
pub struct LinearNumericScaleConfig {
    pub domain: (f32, f32),
    pub range: (f32, f32),
    pub clamp: bool,
    pub nice: Option<usize>,
    pub round: bool,
}

impl Default for LinearNumericScaleConfig {
    fn default() -> Self {
        Self {
            domain: (0.0, 1.0),
            range: (0.0, 1.0),
            clamp: false,
            nice: None,
            round: false,
        }
    }
}

/// A linear scale that maps numeric input values from a domain to a range.
/// Supports clamping, domain niceing, and tick generation.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearNumericScale {
    domain_start: f32,
    domain_end: f32,
    range_start: f32,
    range_end: f32,
    clamp: bool,
    round: bool,
}

impl LinearNumericScale {
    pub fn new(config: &LinearNumericScaleConfig) -> Self {
        let this = Self {
            domain_start: config.domain.0,
            domain_end: config.domain.1,
            range_start: config.range.0,
            range_end: config.range.1,
            clamp: config.clamp,
            round: config.round,
        };

        match config.nice {
            Some(count) => this.nice(Some(count)),
            None => this,
        }
    }

    /// Extends the domain to nice round numbers for better tick selection
    pub fn nice(mut self, count: Option<usize>) -> Self {
        if self.is_degenerate_domain() {
            return self;
        }

        let ascending = self.domain_start <= self.domain_end;
        let (mut start, mut stop) = if ascending {
            (self.domain_start, self.domain_end)
        } else {
            (self.domain_end, self.domain_start)
        };

        let count = count.unwrap_or(10) as f32;
        let mut prestep = 0.0;
        for _ in 0..10 {
            let step = array::tick_increment(start, stop, count);
            if step == prestep || !(step > 0.0) {
                break;
            }
            start = (start / step).floor() * step;
            stop = (stop / step).ceil() * step;
            prestep = step;
        }

        if ascending {
            self.domain_start = start;
            self.domain_end = stop;
        } else {
            self.domain_start = stop;
            self.domain_end = start;
        }
        self
    }

    pub fn with_domain(mut self, domain: (f32, f32)) -> Self {
        self.set_domain(domain);
        self
    }

    pub fn with_range(mut self, range: (f32, f32)) -> Self {
        self.set_range(range);
        self
    }

    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    pub fn with_round(mut self, round: bool) -> Self {
        self.round = round;
        self
    }

    fn is_degenerate_domain(&self) -> bool {
        self.domain_start == self.domain_end
            || self.domain_start.is_nan()
            || self.domain_end.is_nan()
    }

    fn is_degenerate(&self) -> bool {
        self.is_degenerate_domain()
            || self.range_start == self.range_end
            || self.range_start.is_nan()
            || self.range_end.is_nan()
    }

    fn range_extent(&self) -> (f32, f32) {
        if self.range_start <= self.range_end {
            (self.range_start, self.range_end)
        } else {
            (self.range_end, self.range_start)
        }
    }
}

impl ContinuousNumericScale<f32> for LinearNumericScale {
    fn domain(&self) -> (f32, f32) {
        (self.domain_start, self.domain_end)
    }

    fn range(&self) -> (f32, f32) {
        (self.range_start, self.range_end)
    }

    fn clamp(&self) -> bool {
        self.clamp
    }

    fn scale<'a>(&self, values: impl Into<ScalarOrArrayRef<'a, f32>>) -> ScalarOrArray<f32> {
        // Zero-width domain maps everything to the range start, so an all-zero
        // bar chart draws flat bars on the baseline
        if self.is_degenerate() {
            return values.into().map(|_| self.range_start);
        }

        let scale = (self.range_end - self.range_start) / (self.domain_end - self.domain_start);
        let offset = self.range_start - scale * self.domain_start;
        let (range_min, range_max) = self.range_extent();
        let (clamp, round) = (self.clamp, self.round);

        values.into().map(|v| {
            let mut out = scale * v + offset;
            if clamp {
                out = out.clamp(range_min, range_max);
            }
            if round {
                out = out.round();
            }
            out
        })
    }

    fn invert<'a>(&self, values: impl Into<ScalarOrArrayRef<'a, f32>>) -> ScalarOrArray<f32> {
        if self.is_degenerate() {
            return values.into().map(|_| self.domain_start);
        }

        let scale = (self.domain_end - self.domain_start) / (self.range_end - self.range_start);
        let offset = self.domain_start - scale * self.range_start;
        let (range_min, range_max) = self.range_extent();
        let clamp = self.clamp;

        values.into().map(|v| {
            let v = if clamp { v.clamp(range_min, range_max) } else { *v };
            scale * v + offset
        })
    }

    fn ticks(&self, count: Option<f32>) -> Vec<f32> {
        array::ticks(self.domain_start, self.domain_end, count.unwrap_or(10.0))
    }

    fn set_domain(&mut self, domain: (f32, f32)) {
        self.domain_start = domain.0;
        self.domain_end = domain.1;
    }

    fn set_range(&mut self, range: (f32, f32)) {
        self.range_start = range.0;
        self.range_end = range.1;
    }

    fn set_clamp(&mut self, clamp: bool) {
        self.clamp = clamp;
    }
}
