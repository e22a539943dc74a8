use crate::error::{check_positive, OpsError};

/// Parameters of a 1D windowing pass.
///
/// # Example
///
/// ```
/// use datatrans_ops::params::WindowParams;
///
/// let params = WindowParams::new(3).with_shift(2);
/// assert_eq!(params.size, 3);
/// assert_eq!(params.shift, 2);
/// assert_eq!(params.stride, 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowParams {
    /// Number of elements in each window.
    pub size: usize,
    /// Distance between the start offsets of consecutive windows.
    #[cfg_attr(feature = "serde", serde(default = "default_step"))]
    pub shift: usize,
    /// Distance between sampled elements inside a window.
    #[cfg_attr(feature = "serde", serde(default = "default_step"))]
    pub stride: usize,
}

#[cfg(feature = "serde")]
fn default_step() -> usize {
    1
}

impl WindowParams {
    /// Windows of `size` elements with unit shift and stride.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            shift: 1,
            stride: 1,
        }
    }

    /// Set the distance between window starts.
    pub fn with_shift(mut self, shift: usize) -> Self {
        self.shift = shift;
        self
    }

    /// Set the distance between elements inside a window.
    pub fn with_stride(mut self, stride: usize) -> Self {
        self.stride = stride;
        self
    }

    /// Check that size, shift and stride are all at least 1.
    pub fn validate(&self) -> Result<(), OpsError> {
        check_positive("size", self.size)?;
        check_positive("shift", self.shift)?;
        check_positive("stride", self.stride)
    }

    /// Input offsets spanned by one window minus one, i.e. `(size - 1) * stride`.
    ///
    /// Returns `None` on overflow.
    pub fn span(&self) -> Option<usize> {
        self.size.saturating_sub(1).checked_mul(self.stride)
    }

    /// Number of windows that fit in an input of length `len`.
    ///
    /// # Example
    ///
    /// ```
    /// use datatrans_ops::params::WindowParams;
    ///
    /// assert_eq!(WindowParams::new(3).num_windows(5), 3);
    /// assert_eq!(WindowParams::new(2).with_stride(4).num_windows(5), 1);
    /// assert_eq!(WindowParams::new(2).with_stride(5).num_windows(5), 0);
    /// ```
    pub fn num_windows(&self, len: usize) -> usize {
        match self.span() {
            Some(span) if span < len && self.shift > 0 => (len - span - 1) / self.shift + 1,
            _ => 0,
        }
    }
}

/// Parameters of a 2D convolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConvolutionParams {
    /// Step between successive kernel anchor positions, along both axes.
    pub stride: usize,
}

impl Default for ConvolutionParams {
    fn default() -> Self {
        Self { stride: 1 }
    }
}

impl ConvolutionParams {
    /// Check that the stride is at least 1.
    pub fn validate(&self) -> Result<(), OpsError> {
        check_positive("stride", self.stride)
    }
}
