pub mod opts;

use barview_common::value::{ScalarOrArray, ScalarOrArrayRef};
use opts::BandScaleOptions;

use crate::ordinal::OrdinalScale;
use indexmap::IndexSet;
use std::fmt::Debug;
use std::hash::Hash;

/// A band scale divides a continuous range into uniform bands, one per
/// element of a discrete domain.
///
/// Commonly used for the category axis of bar charts. The domain keeps its
/// insertion order, duplicates are dropped, and an empty domain is allowed
/// (every lookup then misses and the bandwidth is zero).
#[derive(Debug, Clone)]
pub struct BandScale<D: Debug + Clone + Hash + Eq + Sync + 'static> {
    domain: Vec<D>,
    ordinal_scale: OrdinalScale<D, f32>,
    range: (f32, f32),
    padding_inner: f32,
    padding_outer: f32,
    align: f32,
    round: bool,
}

impl<D: Debug + Clone + Hash + Eq + Sync + 'static> BandScale<D> {
    /// Creates a new band scale with the given domain.
    ///
    /// # Defaults
    /// - range: (0.0, 1.0)
    /// - padding_inner: 0.0
    /// - padding_outer: 0.0
    /// - align: 0.5
    /// - round: false
    pub fn new(domain: Vec<D>) -> Self {
        let mut this = Self {
            domain: vec![],
            ordinal_scale: OrdinalScale::from_pairs(std::iter::empty(), f32::NAN),
            range: (0.0, 1.0),
            padding_inner: 0.0,
            padding_outer: 0.0,
            align: 0.5,
            round: false,
        };
        this.set_domain(domain);
        this
    }

    /// Replaces the domain, dropping repeated values after their first occurrence
    pub fn set_domain(&mut self, domain: Vec<D>) {
        let given = domain.len();
        let unique: IndexSet<D> = domain.into_iter().collect();
        log::debug!(
            "band domain set to {} values ({} repeats dropped)",
            unique.len(),
            given - unique.len()
        );
        self.domain = unique.into_iter().collect();
        self.update_ordinal_scale();
    }

    pub fn with_domain(mut self, domain: Vec<D>) -> Self {
        self.set_domain(domain);
        self
    }

    fn extent(&self) -> (f32, f32) {
        if self.range.1 < self.range.0 {
            (self.range.1, self.range.0)
        } else {
            (self.range.0, self.range.1)
        }
    }

    fn raw_step(&self) -> f32 {
        let (start, stop) = self.extent();
        (stop - start)
            / 1.0_f32.max(bandspace(
                self.domain.len(),
                Some(self.padding_inner),
                Some(self.padding_outer),
            ))
    }

    fn update_ordinal_scale(&mut self) {
        let n = self.domain.len();
        let reverse = self.range.1 < self.range.0;
        let (start, stop) = self.extent();

        let step = self.step();
        let start = start + (stop - start - step * (n as f32 - self.padding_inner)) * self.align;
        let start = if self.round { start.round() } else { start };

        let mut positions: Vec<f32> = (0..n).map(|i| start + step * i as f32).collect();
        if reverse {
            positions.reverse();
        }

        self.ordinal_scale =
            OrdinalScale::from_pairs(self.domain.iter().cloned().zip(positions), f32::NAN);
    }

    /// Sets the output range as (start, end). The range may be reversed.
    pub fn range(mut self, range: (f32, f32)) -> Self {
        self.range = range;
        self.update_ordinal_scale();
        self
    }

    /// Sets the inner padding between bands, clamped to [0, 1].
    ///
    /// This is the fraction of each step left blank between adjacent bands.
    pub fn padding_inner(mut self, padding: f32) -> Self {
        self.padding_inner = padding.clamp(0.0, 1.0);
        self.update_ordinal_scale();
        self
    }

    /// Sets the outer padding before the first and after the last band, as a
    /// non-negative multiple of the step.
    pub fn padding_outer(mut self, padding: f32) -> Self {
        self.padding_outer = padding.max(0.0);
        self.update_ordinal_scale();
        self
    }

    /// Sets both inner and outer padding to the same value.
    pub fn padding(mut self, padding: f32) -> Self {
        self.padding_inner = padding.clamp(0.0, 1.0);
        self.padding_outer = padding.max(0.0);
        self.update_ordinal_scale();
        self
    }

    /// Sets how leftover space is distributed: 0 packs bands at the start,
    /// 0.5 centres them and 1 packs them at the end.
    pub fn align(mut self, align: f32) -> Self {
        self.align = align.clamp(0.0, 1.0);
        self.update_ordinal_scale();
        self
    }

    /// Rounds band starts and widths to whole pixels
    pub fn round(mut self, round: bool) -> Self {
        self.round = round;
        self.update_ordinal_scale();
        self
    }

    pub fn get_domain(&self) -> &Vec<D> {
        &self.domain
    }

    pub fn get_range(&self) -> (f32, f32) {
        self.range
    }

    pub fn get_padding_inner(&self) -> f32 {
        self.padding_inner
    }

    pub fn get_padding_outer(&self) -> f32 {
        self.padding_outer
    }

    pub fn get_align(&self) -> f32 {
        self.align
    }

    pub fn get_round(&self) -> bool {
        self.round
    }

    /// Width of each band. Zero for an empty domain.
    pub fn bandwidth(&self) -> f32 {
        if self.domain.is_empty() {
            return 0.0;
        }
        // Rounded bands are sized from the floored step so they never overlap
        if self.round {
            (self.step() * (1.0 - self.padding_inner)).round()
        } else {
            self.raw_step() * (1.0 - self.padding_inner)
        }
    }

    /// Distance between the starts of adjacent bands. Zero for an empty domain.
    pub fn step(&self) -> f32 {
        if self.domain.is_empty() {
            return 0.0;
        }
        let step = self.raw_step();
        if self.round {
            step.floor()
        } else {
            step
        }
    }

    fn offset(&self, opts: &BandScaleOptions) -> f32 {
        self.bandwidth() * opts.band.unwrap_or(0.0) + opts.range_offset.unwrap_or(0.0)
    }

    /// Maps input values to band starts (or positions within the band per `opts`).
    /// Values outside the domain map to NaN.
    pub fn scale<'a>(
        &self,
        values: impl Into<ScalarOrArrayRef<'a, D>>,
        opts: &BandScaleOptions,
    ) -> ScalarOrArray<f32> {
        let offset = self.offset(opts);
        let scaled = self.ordinal_scale.scale(values);
        if offset == 0.0 {
            scaled
        } else {
            scaled.map(|v| v + offset)
        }
    }

    /// Maps a single value, returning `None` when it is not in the domain
    pub fn position(&self, value: &D, opts: &BandScaleOptions) -> Option<f32> {
        self.ordinal_scale
            .get(value)
            .map(|start| start + self.offset(opts))
    }

    /// Maps a range position back to the domain value whose band contains it
    pub fn invert(&self, value: f32) -> Option<D> {
        if value.is_nan() {
            return None;
        }
        let bandwidth = self.bandwidth();
        self.domain.iter().find_map(|d| {
            let start = *self.ordinal_scale.get(d)?;
            (value >= start && value <= start + bandwidth).then(|| d.clone())
        })
    }
}

/// Number of steps spanned by `count` bands with the given padding.
///
/// # Arguments
/// * `count` - Number of domain elements
/// * `padding_inner` - Inner padding [0.0, 1.0], defaults to 0.0
/// * `padding_outer` - Outer padding >= 0.0, defaults to 0.0
pub fn bandspace(count: usize, padding_inner: Option<f32>, padding_outer: Option<f32>) -> f32 {
    let padding_inner = padding_inner.unwrap_or(0.0).clamp(0.0, 1.0);
    let padding_outer = padding_outer.unwrap_or(0.0).max(0.0);
    count as f32 - padding_inner + padding_outer * 2.0
}
