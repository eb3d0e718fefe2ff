//! Integer Gaussian and first-derivative-of-Gaussian taps.
//!
//! Taps are scaled by 255 and truncated to integers:
//!
//! - smoothing: `g(r) = exp(-r² / 2σ²)`, symmetric, `g(0) = 255`
//! - derivative: `r · exp(-r² / 2σ²) / σ²`, antisymmetric, zero at the centre,
//!   positive for positive offsets (responds positively to rising intensity)
//!
//! The support is `2·radius + 1` taps regardless of σ; σ only shapes the
//! weights. The default radius is [`DEFAULT_RADIUS`].

/// Samples either side of the centre tap.
pub const DEFAULT_RADIUS: usize = 3;

/// Value added to derivative outputs so that zero maps to mid-gray.
pub const DERIVATIVE_BIAS: i32 = 128;

/// Trait implemented by separable 1D integer filters.
pub trait SeparableFilter {
    /// Taps in left-to-right order, `2·radius + 1` long.
    fn taps(&self) -> &[i32];

    /// Divisor applied to the folded convolution sum.
    fn normalizer(&self) -> i32;

    /// Offset added after normalisation (before clamping to a byte).
    fn bias(&self) -> i32;

    #[inline]
    fn radius(&self) -> usize {
        self.taps().len() / 2
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KernelKind {
    Smoothing,
    Derivative,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GaussianKernel {
    kind: KernelKind,
    taps: Vec<i32>,
    normalizer: i32,
}

impl GaussianKernel {
    pub fn smoothing(sigma: f64, radius: usize) -> Self {
        let sigma2 = sigma * sigma;
        let r = radius as isize;
        let taps: Vec<i32> = (-r..=r)
            .map(|i| {
                if i == 0 {
                    255
                } else {
                    let d = (i * i) as f64;
                    ((-d / (2.0 * sigma2)).exp() * 255.0) as i32
                }
            })
            .collect();
        let normalizer = taps.iter().sum::<i32>().max(1);
        Self {
            kind: KernelKind::Smoothing,
            taps,
            normalizer,
        }
    }

    pub fn derivative(sigma: f64, radius: usize) -> Self {
        let sigma2 = sigma * sigma;
        let r = radius as isize;
        let taps: Vec<i32> = (-r..=r)
            .map(|i| {
                let a = i.unsigned_abs() as f64;
                let mag = ((a * (-(a * a) / (2.0 * sigma2)).exp() / sigma2) * 255.0) as i32;
                i.signum() as i32 * mag
            })
            .collect();
        // Twice the magnitude of the negative lobe.
        let negative_lobe: i32 = taps[..radius].iter().sum();
        let normalizer = (-2 * negative_lobe).max(1);
        Self {
            kind: KernelKind::Derivative,
            taps,
            normalizer,
        }
    }

    pub fn kind(&self) -> KernelKind {
        self.kind
    }

    /// Tap at signed offset `k` from the centre.
    #[inline]
    pub fn tap(&self, k: isize) -> i32 {
        self.taps[(k + self.radius() as isize) as usize]
    }

    /// Sum of taps for offsets in `from..=to` (zero when the range is empty).
    #[inline]
    pub fn weight_between(&self, from: isize, to: isize) -> i32 {
        if from > to {
            return 0;
        }
        (from..=to).map(|k| self.tap(k)).sum()
    }
}

impl SeparableFilter for GaussianKernel {
    #[inline]
    fn taps(&self) -> &[i32] {
        &self.taps
    }

    #[inline]
    fn normalizer(&self) -> i32 {
        self.normalizer
    }

    #[inline]
    fn bias(&self) -> i32 {
        match self.kind {
            KernelKind::Smoothing => 0,
            KernelKind::Derivative => DERIVATIVE_BIAS,
        }
    }
}

/// Convolve one line of samples, folding out-of-range taps onto the edge.
///
/// Output `i` is `clamp(Σ w·s / normalizer + bias, 0, 255)`, where taps that
/// would read before the first sample are accumulated onto `line[0]` and taps
/// past the last sample onto `line[n - 1]`.
pub fn convolve_line<F: SeparableFilter + ?Sized>(filter: &F, line: &[i32], out: &mut [u8]) {
    let n = line.len();
    if n == 0 {
        return;
    }
    let taps = filter.taps();
    let radius = filter.radius() as isize;
    let normalizer = filter.normalizer();
    let bias = filter.bias();
    let first = line[0];
    let last = line[n - 1];

    for (i, dst) in out.iter_mut().enumerate().take(n) {
        let i = i as isize;
        let start = (-i).max(-radius);
        let end = (n as isize - 1 - i).min(radius);

        let mut val = 0i32;
        for k in -radius..start {
            val += first * taps[(k + radius) as usize];
        }
        for k in start..=end {
            val += line[(i + k) as usize] * taps[(k + radius) as usize];
        }
        for k in end + 1..=radius {
            val += last * taps[(k + radius) as usize];
        }

        *dst = (val / normalizer + bias).clamp(0, 255) as u8;
    }
}
