//! The scroll synchronization controller.

use std::time::{Duration, Instant};

use tracing::trace;

use super::ScrollRegion;

/// How long a driven update keeps the opposite direction suppressed.
///
/// Programmatic scroll updates echo back as scroll events from the host UI;
/// the cooldown lets that burst settle before the other pane's listener is
/// re-enabled.
pub const COOLDOWN: Duration = Duration::from_millis(100);

/// Result of handling one scroll event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SyncOutcome {
    /// The opposite region was driven to this offset.
    Applied(f64),
    /// The event arrived inside the opposite direction's cooldown window and
    /// was ignored to break the feedback loop.
    Suppressed,
    /// No region pair is attached; the event is a no-op, not an error.
    Detached,
}

/// Keeps two scrollable regions aligned by position ratio, in both
/// directions, without update loops.
///
/// The controller owns the attached [`ScrollRegion`] pair and a re-entrancy
/// guard per direction. At most one guard is armed at any instant: arming one
/// direction clears the other. Handlers take an explicit `now` so the
/// cooldown window is testable without sleeping.
///
/// # Example
///
/// ```
/// use std::time::Instant;
/// use cvpress::sync::{ScrollRegion, ScrollSyncController, SyncOutcome};
///
/// let mut sync = ScrollSyncController::new();
/// sync.attach(ScrollRegion::new(2000.0, 500.0), ScrollRegion::new(3500.0, 500.0));
///
/// // Halfway down the editor lands halfway down the preview.
/// let outcome = sync.on_source_scroll(750.0, Instant::now());
/// assert_eq!(outcome, SyncOutcome::Applied(1500.0));
/// ```
#[derive(Debug)]
pub struct ScrollSyncController {
    cooldown: Duration,
    source: Option<ScrollRegion>,
    target: Option<ScrollRegion>,
    source_driving_until: Option<Instant>,
    target_driving_until: Option<Instant>,
}

impl Default for ScrollSyncController {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollSyncController {
    /// Create a detached controller with the standard cooldown.
    pub const fn new() -> Self {
        Self::with_cooldown(COOLDOWN)
    }

    /// Create a detached controller with a custom cooldown window.
    pub const fn with_cooldown(cooldown: Duration) -> Self {
        Self {
            cooldown,
            source: None,
            target: None,
            source_driving_until: None,
            target_driving_until: None,
        }
    }

    /// Attach a source/target region pair, replacing any previous pair and
    /// clearing both guards.
    pub fn attach(&mut self, source: ScrollRegion, target: ScrollRegion) {
        self.source = Some(source);
        self.target = Some(target);
        self.source_driving_until = None;
        self.target_driving_until = None;
    }

    /// Detach both regions. Subsequent events are no-ops.
    pub fn detach(&mut self) {
        self.source = None;
        self.target = None;
        self.source_driving_until = None;
        self.target_driving_until = None;
    }

    /// The attached source region, if any.
    pub const fn source(&self) -> Option<&ScrollRegion> {
        self.source.as_ref()
    }

    /// The attached target region, if any.
    pub const fn target(&self) -> Option<&ScrollRegion> {
        self.target.as_ref()
    }

    /// Update the source region's measured heights.
    pub fn set_source_metrics(&mut self, content_height: f64, viewport_height: f64) {
        if let Some(region) = self.source.as_mut() {
            region.set_metrics(content_height, viewport_height);
        }
    }

    /// Update the target region's measured heights.
    pub fn set_target_metrics(&mut self, content_height: f64, viewport_height: f64) {
        if let Some(region) = self.target.as_mut() {
            region.set_metrics(content_height, viewport_height);
        }
    }

    /// Programmatically place the target region, e.g. to restore its scroll
    /// ratio after a content refresh. Arms no guard; the host is expected to
    /// apply the offset without re-reporting it as a user scroll.
    pub fn restore_target_offset(&mut self, offset: f64) {
        if let Some(region) = self.target.as_mut() {
            region.set_offset(offset);
        }
    }

    /// Handle a user scroll of the source region to `offset`.
    ///
    /// If the target-driving guard is active the event is suppressed (it is
    /// the echo of our own programmatic update). Otherwise the source-driving
    /// guard is armed for one cooldown window and the target is driven to the
    /// proportionally mapped offset, with exact snapping at both boundaries.
    pub fn on_source_scroll(&mut self, offset: f64, now: Instant) -> SyncOutcome {
        let (Some(source), Some(target)) = (self.source.as_mut(), self.target.as_mut()) else {
            return SyncOutcome::Detached;
        };
        source.set_offset(offset);

        if guard_active(self.target_driving_until, now) {
            trace!(offset, "source scroll suppressed during target cooldown");
            return SyncOutcome::Suppressed;
        }
        self.target_driving_until = None;
        self.source_driving_until = Some(now + self.cooldown);

        let driven = mapped_offset(source.offset(), source.extent(), target.extent());
        target.set_offset(driven);
        SyncOutcome::Applied(driven)
    }

    /// Handle a user scroll of the target region to `offset`.
    ///
    /// Symmetric to [`Self::on_source_scroll`] with the guards swapped.
    pub fn on_target_scroll(&mut self, offset: f64, now: Instant) -> SyncOutcome {
        let (Some(source), Some(target)) = (self.source.as_mut(), self.target.as_mut()) else {
            return SyncOutcome::Detached;
        };
        target.set_offset(offset);

        if guard_active(self.source_driving_until, now) {
            trace!(offset, "target scroll suppressed during source cooldown");
            return SyncOutcome::Suppressed;
        }
        self.source_driving_until = None;
        self.target_driving_until = Some(now + self.cooldown);

        let driven = mapped_offset(target.offset(), target.extent(), source.extent());
        source.set_offset(driven);
        SyncOutcome::Applied(driven)
    }
}

fn guard_active(deadline: Option<Instant>, now: Instant) -> bool {
    deadline.is_some_and(|deadline| now < deadline)
}

/// Map an offset in one region onto another by linear ratio.
///
/// Exact at the boundaries: the top always maps to the top and the bottom to
/// the bottom, regardless of rounding in the ratio. A zero driving extent
/// (content fits without scrolling) maps to the top.
fn mapped_offset(offset: f64, extent: f64, other_extent: f64) -> f64 {
    if offset <= 0.0 {
        0.0
    } else if offset >= extent {
        other_extent
    } else {
        let ratio = if extent == 0.0 { 0.0 } else { offset / extent };
        ratio * other_extent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attached() -> ScrollSyncController {
        let mut sync = ScrollSyncController::new();
        sync.attach(
            ScrollRegion::new(2000.0, 500.0), // extent 1500
            ScrollRegion::new(3500.0, 500.0), // extent 3000
        );
        sync
    }

    #[test]
    fn test_source_top_snaps_target_to_top() {
        let mut sync = attached();
        let outcome = sync.on_source_scroll(0.0, Instant::now());
        assert_eq!(outcome, SyncOutcome::Applied(0.0));
        assert_eq!(sync.target().unwrap().offset(), 0.0);
    }

    #[test]
    fn test_source_bottom_snaps_target_to_bottom() {
        let mut sync = attached();
        let outcome = sync.on_source_scroll(1500.0, Instant::now());
        assert_eq!(outcome, SyncOutcome::Applied(3000.0));
        assert!(sync.target().unwrap().at_bottom());
    }

    #[test]
    fn test_intermediate_offset_maps_by_ratio() {
        let mut sync = attached();
        let outcome = sync.on_source_scroll(750.0, Instant::now());
        // 750 / 1500 = 0.5 -> 0.5 * 3000
        assert_eq!(outcome, SyncOutcome::Applied(1500.0));
    }

    #[test]
    fn test_target_scroll_drives_source_symmetrically() {
        let mut sync = attached();
        let outcome = sync.on_target_scroll(3000.0, Instant::now());
        assert_eq!(outcome, SyncOutcome::Applied(1500.0));
        assert!(sync.source().unwrap().at_bottom());
    }

    #[test]
    fn test_opposite_event_suppressed_during_cooldown() {
        let mut sync = attached();
        let t0 = Instant::now();
        assert_eq!(sync.on_source_scroll(750.0, t0), SyncOutcome::Applied(1500.0));

        // The programmatic target update echoes back within the window.
        let echo = sync.on_target_scroll(1500.0, t0 + Duration::from_millis(10));
        assert_eq!(echo, SyncOutcome::Suppressed);
        // The source must not have been re-driven.
        assert_eq!(sync.source().unwrap().offset(), 750.0);
    }

    #[test]
    fn test_cooldown_expiry_reenables_opposite_direction() {
        let mut sync = attached();
        let t0 = Instant::now();
        sync.on_source_scroll(750.0, t0);

        let later = t0 + COOLDOWN + Duration::from_millis(1);
        let outcome = sync.on_target_scroll(0.0, later);
        assert_eq!(outcome, SyncOutcome::Applied(0.0));
    }

    #[test]
    fn test_latest_event_wins_within_same_direction() {
        let mut sync = attached();
        let t0 = Instant::now();
        sync.on_source_scroll(300.0, t0);
        let outcome = sync.on_source_scroll(900.0, t0 + Duration::from_millis(5));
        assert_eq!(outcome, SyncOutcome::Applied(1800.0));
    }

    #[test]
    fn test_detached_controller_is_noop() {
        let mut sync = ScrollSyncController::new();
        assert_eq!(sync.on_source_scroll(10.0, Instant::now()), SyncOutcome::Detached);
        assert_eq!(sync.on_target_scroll(10.0, Instant::now()), SyncOutcome::Detached);
    }

    #[test]
    fn test_both_extents_zero_is_noop_at_top() {
        let mut sync = ScrollSyncController::new();
        sync.attach(ScrollRegion::new(100.0, 400.0), ScrollRegion::new(200.0, 400.0));
        let outcome = sync.on_source_scroll(50.0, Instant::now());
        // Offset clamps to zero, which snaps the target to its top.
        assert_eq!(outcome, SyncOutcome::Applied(0.0));
    }

    #[test]
    fn test_driven_chain_terminates() {
        // Bounded ping-pong simulation: replay every driven update as an echo
        // event on the opposite pane. The guard must starve the chain.
        let mut sync = attached();
        let mut now = Instant::now();
        let mut pending = vec![(true, 750.0)];
        let mut steps = 0u32;
        while let Some((from_source, offset)) = pending.pop() {
            steps += 1;
            assert!(steps < 10, "sync chain did not terminate");
            now += Duration::from_millis(1);
            let outcome = if from_source {
                sync.on_source_scroll(offset, now)
            } else {
                sync.on_target_scroll(offset, now)
            };
            if let SyncOutcome::Applied(driven) = outcome {
                pending.push((!from_source, driven));
            }
        }
        assert_eq!(sync.source().unwrap().offset(), 750.0);
    }

    #[test]
    fn test_attach_resets_guards() {
        let mut sync = attached();
        let t0 = Instant::now();
        sync.on_source_scroll(750.0, t0);
        sync.attach(ScrollRegion::new(2000.0, 500.0), ScrollRegion::new(3500.0, 500.0));
        // A fresh pair must not inherit the old cooldown.
        let outcome = sync.on_target_scroll(1500.0, t0 + Duration::from_millis(1));
        assert_eq!(outcome, SyncOutcome::Applied(750.0));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn driven_offset_stays_within_target_bounds(
                source_content in 0.0..100_000.0f64,
                target_content in 0.0..100_000.0f64,
                viewport in 1.0..2_000.0f64,
                offset in 0.0..100_000.0f64,
            ) {
                let mut sync = ScrollSyncController::new();
                sync.attach(
                    ScrollRegion::new(source_content, viewport),
                    ScrollRegion::new(target_content, viewport),
                );
                if let SyncOutcome::Applied(driven) = sync.on_source_scroll(offset, Instant::now()) {
                    let target_extent = (target_content - viewport).max(0.0);
                    prop_assert!(driven >= 0.0);
                    prop_assert!(driven <= target_extent);
                }
            }

            #[test]
            fn boundaries_map_exactly(
                source_content in 1_000.0..50_000.0f64,
                target_content in 1_000.0..50_000.0f64,
                viewport in 1.0..999.0f64,
            ) {
                let mut sync = ScrollSyncController::new();
                sync.attach(
                    ScrollRegion::new(source_content, viewport),
                    ScrollRegion::new(target_content, viewport),
                );
                let source_extent = source_content - viewport;
                let target_extent = target_content - viewport;

                let now = Instant::now();
                prop_assert_eq!(
                    sync.on_source_scroll(source_extent, now),
                    SyncOutcome::Applied(target_extent)
                );
                let later = now + COOLDOWN + Duration::from_millis(1);
                prop_assert_eq!(
                    sync.on_source_scroll(0.0, later),
                    SyncOutcome::Applied(0.0)
                );
            }

            #[test]
            fn ratio_mapping_matches_linear_formula(
                offset_frac in 0.001..0.999f64,
            ) {
                let mut sync = ScrollSyncController::new();
                sync.attach(
                    ScrollRegion::new(2500.0, 500.0),
                    ScrollRegion::new(4500.0, 500.0),
                );
                let offset = offset_frac * 2000.0;
                if let SyncOutcome::Applied(driven) = sync.on_source_scroll(offset, Instant::now()) {
                    let expected = offset / 2000.0 * 4000.0;
                    prop_assert!((driven - expected).abs() < 1e-6);
                }
            }
        }
    }
}
