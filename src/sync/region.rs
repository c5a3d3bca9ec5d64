//! Scrollable region model.

/// One independently scrolling pane, measured in CSS pixels.
///
/// The region tracks:
/// - Current scroll offset from the top
/// - Total content height
/// - Visible viewport height
///
/// The scrollable extent is derived: `content - viewport`, floored at zero.
/// The offset is clamped into `0..=extent` on every mutation.
///
/// # Example
///
/// ```
/// use cvpress::sync::ScrollRegion;
///
/// let mut region = ScrollRegion::new(2000.0, 600.0);
/// assert_eq!(region.extent(), 1400.0);
///
/// region.set_offset(9999.0);
/// assert_eq!(region.offset(), 1400.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRegion {
    offset: f64,
    content_height: f64,
    viewport_height: f64,
}

impl ScrollRegion {
    /// Create a region at offset zero.
    pub fn new(content_height: f64, viewport_height: f64) -> Self {
        Self {
            offset: 0.0,
            content_height: content_height.max(0.0),
            viewport_height: viewport_height.max(0.0),
        }
    }

    /// Current scroll offset from the top, in pixels.
    pub const fn offset(&self) -> f64 {
        self.offset
    }

    /// Total content height in pixels.
    pub const fn content_height(&self) -> f64 {
        self.content_height
    }

    /// Visible viewport height in pixels.
    pub const fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    /// Maximum valid scroll offset: content minus viewport, floored at zero.
    pub fn extent(&self) -> f64 {
        (self.content_height - self.viewport_height).max(0.0)
    }

    /// Set the scroll offset, clamped into `0..=extent`.
    pub fn set_offset(&mut self, offset: f64) {
        self.offset = offset.clamp(0.0, self.extent());
    }

    /// Whether the region sits exactly at the top.
    pub fn at_top(&self) -> bool {
        self.offset <= 0.0
    }

    /// Whether the region sits exactly at the bottom.
    pub fn at_bottom(&self) -> bool {
        self.offset >= self.extent()
    }

    /// Update the measured heights (e.g. after a preview refresh or a pane
    /// resize), re-clamping the offset if the extent shrank.
    pub fn set_metrics(&mut self, content_height: f64, viewport_height: f64) {
        self.content_height = content_height.max(0.0);
        self.viewport_height = viewport_height.max(0.0);
        self.offset = self.offset.clamp(0.0, self.extent());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_region_starts_at_top() {
        let region = ScrollRegion::new(1000.0, 400.0);
        assert_eq!(region.offset(), 0.0);
        assert!(region.at_top());
    }

    #[test]
    fn test_extent_is_content_minus_viewport() {
        let region = ScrollRegion::new(1000.0, 400.0);
        assert_eq!(region.extent(), 600.0);
    }

    #[test]
    fn test_extent_floors_at_zero_when_content_fits() {
        let region = ScrollRegion::new(300.0, 400.0);
        assert_eq!(region.extent(), 0.0);
        assert!(region.at_top());
        assert!(region.at_bottom());
    }

    #[test]
    fn test_set_offset_clamps_to_extent() {
        let mut region = ScrollRegion::new(1000.0, 400.0);
        region.set_offset(5000.0);
        assert_eq!(region.offset(), 600.0);
        assert!(region.at_bottom());
    }

    #[test]
    fn test_set_offset_clamps_negative_to_zero() {
        let mut region = ScrollRegion::new(1000.0, 400.0);
        region.set_offset(-25.0);
        assert_eq!(region.offset(), 0.0);
    }

    #[test]
    fn test_set_metrics_reclamps_offset() {
        let mut region = ScrollRegion::new(1000.0, 400.0);
        region.set_offset(600.0);
        region.set_metrics(500.0, 400.0);
        assert_eq!(region.offset(), 100.0);
    }

    #[test]
    fn test_negative_heights_are_floored() {
        let region = ScrollRegion::new(-10.0, -5.0);
        assert_eq!(region.content_height(), 0.0);
        assert_eq!(region.viewport_height(), 0.0);
        assert_eq!(region.extent(), 0.0);
    }
}
