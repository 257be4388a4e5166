//! d3-array style tick generation.

const E10: f32 = 7.071_068; // sqrt(50)
const E5: f32 = 3.162_277_7; // sqrt(10)
const E2: f32 = 1.414_213_5; // sqrt(2)

fn step_factor(error: f32) -> f32 {
    if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    }
}

/// Generate approximately `count` nicely rounded ticks covering `[start, stop]`.
///
/// Ticks are returned in the same direction as the input interval.
pub fn ticks(start: f32, stop: f32, count: f32) -> Vec<f32> {
    if count.is_nan() || count <= 0.0 {
        return vec![];
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let (i1, i2, inc) = tick_spec(lo, hi, count);

    // Also catches NaN bounds
    if !(i2 >= i1) {
        return vec![];
    }

    let n = (i2 - i1 + 1.0) as usize;
    let to_value = |k: f32| if inc < 0.0 { k / -inc } else { k * inc };

    (0..n)
        .map(|i| {
            let k = if reverse { i2 - i as f32 } else { i1 + i as f32 };
            to_value(k)
        })
        .collect()
}

/// Returns `(first_index, last_index, increment)`. A negative increment
/// encodes a fractional step as its reciprocal so that ticks can be computed
/// by division, which avoids accumulating float error (e.g. 0.30000004).
fn tick_spec(start: f32, stop: f32, count: f32) -> (f32, f32, f32) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let factor = step_factor(step / 10.0_f32.powf(power));

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let recip = 10.0_f32.powf(-power) / factor;
        i1 = (start * recip).round();
        i2 = (stop * recip).round();
        if i1 / recip < start {
            i1 += 1.0;
        }
        if i2 / recip > stop {
            i2 -= 1.0;
        }
        inc = -recip;
    } else {
        inc = 10.0_f32.powf(power) * factor;
        i1 = (start / inc).round();
        i2 = (stop / inc).round();
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }

    (i1, i2, inc)
}

/// Distance between adjacent ticks produced by [`ticks`] for the same arguments.
///
/// Returns NaN for a non-positive count and negative infinity for an empty interval.
pub fn tick_increment(start: f32, stop: f32, count: f32) -> f32 {
    if !(count > 0.0) {
        return f32::NAN;
    }
    if start == stop {
        return f32::NEG_INFINITY;
    }

    let step = (stop - start).abs() / count;
    if step == 0.0 || step.is_nan() {
        return f32::NAN;
    }

    let power = step.log10().floor();
    10.0_f32.powf(power) * step_factor(step / 10.0_f32.powf(power))
}
