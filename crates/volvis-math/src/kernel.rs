//! Piecewise-cubic convolution kernel.
//!
//! The kernel is the classic two-piece cubic with shape parameter `a`:
//!
//! ```text
//! h(x) = (a+2)|x|^3 - (a+3)|x|^2 + 1        0 <= |x| < 1
//! h(x) = a|x|^3 - 5a|x|^2 + 8a|x| - 4a      1 <= |x| < 2
//! h(x) = 0                                  otherwise
//! ```
//!
//! `h(0) = 1` and `h(n) = 0` for every other integer `n`, independent of `a`,
//! so reconstruction at zero offset returns the centre sample unchanged.
//! The weights at any fractional offset sum to one.

/// Cubic convolution kernel with a tunable shape parameter.
///
/// Reconstruction works on four ordered samples `g0..g3` that sit at
/// integer offsets `-1, 0, 1, 2` relative to the query's floor, with a
/// fraction `t` in `[0, 1]` measured from `g1` towards `g2`.
///
/// # Example
///
/// ```rust
/// use volvis_math::CubicKernel;
///
/// let kernel = CubicKernel::default();
/// assert_eq!(kernel.a(), -1.0);
/// assert_eq!(kernel.weight(0.0), 1.0);
/// assert_eq!(kernel.weight(1.0), 0.0);
///
/// let mid = kernel.interpolate([0.0, 1.0, 2.0, 3.0], 0.5);
/// assert!((mid - 1.5).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicKernel {
    a: f32,
}

impl Default for CubicKernel {
    fn default() -> Self {
        Self::new(Self::DEFAULT_A)
    }
}

impl CubicKernel {
    /// Default shape parameter.
    pub const DEFAULT_A: f32 = -1.0;

    /// Half-width of the kernel support, in samples.
    pub const SUPPORT: f32 = 2.0;

    /// Creates a kernel with shape parameter `a`.
    #[inline]
    pub const fn new(a: f32) -> Self {
        Self { a }
    }

    /// Returns the shape parameter.
    #[inline]
    pub const fn a(&self) -> f32 {
        self.a
    }

    /// Evaluates the kernel weight `h(x)`.
    #[inline]
    pub fn weight(&self, x: f32) -> f32 {
        let a = self.a;
        let ax = x.abs();
        let ax2 = ax * ax;
        let ax3 = ax2 * ax;
        if ax < 1.0 {
            (a + 2.0) * ax3 - (a + 3.0) * ax2 + 1.0
        } else if ax < 2.0 {
            a * ax3 - 5.0 * a * ax2 + 8.0 * a * ax - 4.0 * a
        } else {
            0.0
        }
    }

    /// Returns the four tap weights for fractional offset `t`.
    ///
    /// The taps sit at distances `-1 - t, -t, 1 - t, 2 - t` from the query.
    #[inline]
    pub fn weights(&self, t: f32) -> [f32; 4] {
        [
            self.weight(-1.0 - t),
            self.weight(-t),
            self.weight(1.0 - t),
            self.weight(2.0 - t),
        ]
    }

    /// Reconstructs a value from four ordered samples.
    ///
    /// `t = 0` yields `g[1]`, `t = 1` yields `g[2]`.
    #[inline]
    pub fn interpolate(&self, g: [f32; 4], t: f32) -> f32 {
        let w = self.weights(t);
        w[0] * g[0] + w[1] * g[1] + w[2] * g[2] + w[3] * g[3]
    }

    /// Bicubic reconstruction over a 4x4 neighbourhood.
    ///
    /// `rows[j]` holds the four x-samples at the `j`-th y-level. Each row is
    /// reconstructed along x at `tx`, then the four results along y at `ty`.
    #[inline]
    pub fn interpolate_2d(&self, rows: &[[f32; 4]; 4], tx: f32, ty: f32) -> f32 {
        let wx = self.weights(tx);
        let mut column = [0.0f32; 4];
        for (value, row) in column.iter_mut().zip(rows) {
            *value = wx[0] * row[0] + wx[1] * row[1] + wx[2] * row[2] + wx[3] * row[3];
        }
        self.interpolate(column, ty)
    }
}
