//! Tick label formatting in the style of d3's default linear `tickFormat`.

use std::fmt::Debug;

use crate::array::tick_increment;

/// d3 formats negative numbers with a true minus sign
const MINUS: char = '\u{2212}';

pub trait NumberFormatter: Debug + Send + Sync + 'static {
    fn format(&self, values: &[f32]) -> Vec<String>;
}

/// Fixed-point formatter with optional thousands grouping (d3 `,.Nf`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedFormatter {
    pub precision: usize,
    pub grouping: bool,
}

impl Default for FixedFormatter {
    fn default() -> Self {
        Self {
            precision: 0,
            grouping: true,
        }
    }
}

impl FixedFormatter {
    /// Chooses the smallest precision that distinguishes ticks `step` apart
    pub fn for_step(step: f32) -> Self {
        Self {
            precision: precision_fixed(step),
            ..Default::default()
        }
    }

    pub fn format_value(&self, value: f32) -> String {
        let text = format!("{:.*}", self.precision, value.abs());
        let text = if self.grouping {
            group_thousands(&text)
        } else {
            text
        };

        // Treat values that round to zero as unsigned
        let is_zero = text.chars().all(|c| matches!(c, '0' | '.' | ','));
        if value.is_sign_negative() && !is_zero {
            format!("{MINUS}{text}")
        } else {
            text
        }
    }
}

impl NumberFormatter for FixedFormatter {
    fn format(&self, values: &[f32]) -> Vec<String> {
        values.iter().map(|v| self.format_value(*v)).collect()
    }
}

/// Number of fractional digits needed to represent multiples of `step`
pub fn precision_fixed(step: f32) -> usize {
    let step = step.abs();
    if !step.is_finite() || step == 0.0 {
        return 0;
    }
    let exponent = step.log10().floor() as i32;
    (-exponent).max(0) as usize
}

/// Formatter matching the ticks produced for `[start, stop]` with `count`
pub fn tick_format(start: f32, stop: f32, count: f32) -> FixedFormatter {
    FixedFormatter::for_step(tick_increment(start, stop, count))
}

fn group_thousands(text: &str) -> String {
    let (int_part, frac_part) = match text.find('.') {
        Some(idx) => text.split_at(idx),
        None => (text, ""),
    };

    let digits = int_part.as_bytes();
    let mut grouped = String::with_capacity(text.len() + digits.len() / 3);
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit as char);
    }
    grouped.push_str(frac_part);
    grouped
}
