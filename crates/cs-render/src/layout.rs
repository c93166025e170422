//! Text measurement seam and widget sizing.

use cs_core::Extent;

/// Font weight used when laying out the label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FontWeight {
    /// Regular weight.
    #[default]
    Normal,
    /// Bold weight; the label is always drawn bold.
    Bold,
}

/// Measures a single line of text.
///
/// Implemented by whatever owns the font backend. Closures of the right
/// shape implement it too, which keeps tests free of any font machinery.
pub trait TextMeasure {
    /// Returns the pixel extent of `text` laid out on one line at `weight`.
    fn measure(&self, text: &str, weight: FontWeight) -> Extent;
}

impl<F> TextMeasure for F
where
    F: Fn(&str, FontWeight) -> Extent,
{
    fn measure(&self, text: &str, weight: FontWeight) -> Extent {
        self(text, weight)
    }
}

/// Horizontal padding added around the label.
pub const HORIZONTAL_PADDING: f64 = 16.0;

/// Vertical padding added around the label.
pub const VERTICAL_PADDING: f64 = 8.0;

/// Narrowest width the widget ever requests.
pub const MIN_REQUEST_WIDTH: f64 = 80.0;

/// Size the widget asks its host for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeRequest {
    /// Requested width in pixels.
    pub width: f64,
    /// Requested height in pixels.
    pub height: f64,
}

impl SizeRequest {
    /// Padded size request for a label of `extent`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cs_core::Extent;
    /// use cs_render::layout::SizeRequest;
    ///
    /// let request = SizeRequest::for_extent(Extent::new(120.0, 18.0));
    /// assert_eq!((request.width, request.height), (136.0, 26.0));
    ///
    /// let narrow = SizeRequest::for_extent(Extent::new(20.0, 18.0));
    /// assert_eq!(narrow.width, 80.0);
    /// ```
    #[must_use]
    pub fn for_extent(extent: Extent) -> Self {
        Self {
            width: (extent.width + HORIZONTAL_PADDING).max(MIN_REQUEST_WIDTH),
            height: extent.height + VERTICAL_PADDING,
        }
    }
}
