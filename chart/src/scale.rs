/// Tick increment thresholds: `sqrt(50)`, `sqrt(10)`, `sqrt(2)`.
const E10: f64 = 7.071_067_811_865_475_5;
const E5: f64 = 3.162_277_660_168_379_5;
const E2: f64 = std::f64::consts::SQRT_2;

/// A continuous linear mapping from a data domain to a pixel range.
///
/// Either end of the domain or range may be the larger one; a y scale
/// usually maps `[ymin, ymax]` onto `[bottom, top]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),

    /// Round mapped pixel positions to whole pixels.
    round: bool,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain,
            range,
            round: false,
        }
    }

    #[must_use]
    pub fn with_round(mut self, round: bool) -> Self {
        self.round = round;
        self
    }

    #[must_use]
    pub fn with_domain(mut self, domain: (f64, f64)) -> Self {
        self.domain = domain;
        self
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Maps a data value to a pixel position.
    pub fn map(&self, value: f64) -> f64 {
        let t = normalize(self.domain, value);
        let (r0, r1) = self.range;
        let px = r0 + t * (r1 - r0);
        if self.round {
            px.round()
        } else {
            px
        }
    }

    /// Maps a pixel position back to a data value.
    ///
    /// Never rounds, even for rounding scales.
    pub fn invert(&self, px: f64) -> f64 {
        let t = normalize(self.range, px);
        let (d0, d1) = self.domain;
        d0 + t * (d1 - d0)
    }

    /// Returns roughly `count` round-numbered values inside the
    /// domain, in domain order.
    pub fn ticks(&self, count: f64) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, count)
    }

    /// Returns the spacing of [`LinearScale::ticks`] for `count`.
    pub fn tick_step(&self, count: f64) -> Option<f64> {
        let (lo, hi) = ordered(self.domain);
        tick_spec(lo, hi, count).map(|(_, _, inc)| if inc < 0.0 { -1.0 / inc } else { inc })
    }

    /// Formats `value` with just enough decimals to tell adjacent
    /// ticks apart.
    pub fn tick_format(&self, count: f64, value: f64) -> String {
        let precision = self
            .tick_step(count)
            .map_or(0.0, |step| (-step.abs().log10().floor()).max(0.0));
        // Precision is a small non-negative integer here.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let precision = precision as usize;
        let label = format!("{value:.precision$}");
        if label.starts_with('-') && label[1..].bytes().all(|b| b == b'0' || b == b'.') {
            label[1..].to_owned()
        } else {
            label
        }
    }

    /// Extends the domain outwards to round values.
    #[must_use]
    pub fn nice(self, count: f64) -> Self {
        let (mut start, mut stop) = self.domain;
        let reversed = stop < start;
        if reversed {
            std::mem::swap(&mut start, &mut stop);
        }
        let mut prestep = None;
        for _ in 0..10 {
            let Some(step) = tick_increment(start, stop, count) else {
                break;
            };
            if prestep == Some(step) {
                let domain = if reversed { (stop, start) } else { (start, stop) };
                return self.with_domain(domain);
            }
            if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            }
            prestep = Some(step);
        }
        self
    }
}

fn normalize((a, b): (f64, f64), value: f64) -> f64 {
    let span = b - a;
    if span == 0.0 {
        0.5
    } else {
        (value - a) / span
    }
}

fn ordered((a, b): (f64, f64)) -> (f64, f64) {
    if b < a {
        (b, a)
    } else {
        (a, b)
    }
}

/// Returns `(i1, i2, inc)`: ticks are `i * inc` for `i` in `i1..=i2`,
/// or `i / -inc` when `inc` is negative, which keeps sub-unit ticks
/// exact.
pub(crate) fn tick_spec(start: f64, stop: f64, count: f64) -> Option<(f64, f64, f64)> {
    let step = (stop - start) / count.max(0.0);
    if !(step.is_finite() && step > 0.0) {
        return None;
    }
    let power = step.log10().floor();
    let error = step / 10_f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let scale = 10_f64.powf(-power) / factor;
        i1 = (start * scale).round();
        i2 = (stop * scale).round();
        if i1 / scale < start {
            i1 += 1.0;
        }
        if i2 / scale > stop {
            i2 -= 1.0;
        }
        inc = -scale;
    } else {
        let scale = 10_f64.powf(power) * factor;
        i1 = (start / scale).round();
        i2 = (stop / scale).round();
        if i1 * scale < start {
            i1 += 1.0;
        }
        if i2 * scale > stop {
            i2 -= 1.0;
        }
        inc = scale;
    }
    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    Some((i1, i2, inc))
}

fn tick_increment(start: f64, stop: f64, count: f64) -> Option<f64> {
    tick_spec(start, stop, count).map(|(_, _, inc)| inc)
}

fn ticks(start: f64, stop: f64, count: f64) -> Vec<f64> {
    if !(count > 0.0) {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let (lo, hi) = ordered((start, stop));
    let Some((i1, i2, inc)) = tick_spec(lo, hi, count) else {
        return Vec::new();
    };
    let mut ticks = Vec::new();
    let mut i = i1;
    while i <= i2 {
        ticks.push(if inc < 0.0 { i / -inc } else { i * inc });
        i += 1.0;
    }
    if stop < start {
        ticks.reverse();
    }
    ticks
}
