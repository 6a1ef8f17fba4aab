//! Underline row and the active-segment state machine.
//!
//! Exactly zero or one segment is highlighted: the one at the next entry
//! position, or none once the code is full. Moving the highlight goes
//! through [`UnderlineIndicator::set_active_segment`], which tears the old
//! highlight and its blink timer down before setting the new one up.

use crate::blink::BlinkTimer;
use codefield_core::{TimerId, TimerScheduler};
use codefield_graphics::Color;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::Rc;

/// Display state of one underline segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SegmentState {
    #[default]
    Idle,
    /// Solid highlight, used when flicker is off.
    Active,
    /// Highlight alternating with transparent.
    Blinking { visible: bool },
}

impl SegmentState {
    /// True for the entry-position segment, whatever its blink phase.
    pub fn is_highlighted(&self) -> bool {
        !matches!(self, SegmentState::Idle)
    }

    pub fn color(&self, idle: Color, active: Color) -> Color {
        match self {
            SegmentState::Idle => idle,
            SegmentState::Active | SegmentState::Blinking { visible: true } => active,
            SegmentState::Blinking { visible: false } => Color::TRANSPARENT,
        }
    }
}

type SegmentRow = SmallVec<[SegmentState; 8]>;

pub(crate) struct UnderlineIndicator {
    /// Shared with the blink callback, which only holds a weak handle.
    segments: Rc<RefCell<SegmentRow>>,
    active: Option<usize>,
    flicker_enabled: bool,
    blink: BlinkTimer,
}

impl UnderlineIndicator {
    pub(crate) fn new(scheduler: Rc<dyn TimerScheduler>) -> Self {
        Self {
            segments: Rc::new(RefCell::new(SegmentRow::new())),
            active: None,
            flicker_enabled: false,
            blink: BlinkTimer::new(scheduler),
        }
    }

    /// Drops the current row and builds `count` idle segments.
    pub(crate) fn rebuild(&mut self, count: usize, flicker_enabled: bool) {
        self.teardown();
        self.flicker_enabled = flicker_enabled;
        self.segments
            .borrow_mut()
            .extend(std::iter::repeat(SegmentState::Idle).take(count));
    }

    /// Cancels the blink timer and removes every segment.
    pub(crate) fn teardown(&mut self) {
        self.blink.stop();
        self.active = None;
        self.segments.borrow_mut().clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.segments.borrow().len()
    }

    pub(crate) fn states(&self) -> Vec<SegmentState> {
        self.segments.borrow().to_vec()
    }

    pub(crate) fn active_segment(&self) -> Option<usize> {
        self.active
    }

    pub(crate) fn is_blinking(&self) -> bool {
        self.blink.is_armed()
    }

    pub(crate) fn blink_timer_id(&self) -> Option<TimerId> {
        self.blink.timer_id()
    }

    /// Marks every segment other than `keep` idle.
    pub(crate) fn reset_idle_except(&mut self, keep: Option<usize>) {
        for (index, state) in self.segments.borrow_mut().iter_mut().enumerate() {
            if Some(index) != keep {
                *state = SegmentState::Idle;
            }
        }
        if self.active.is_some() && self.active != keep {
            self.blink.stop();
            self.active = None;
        }
    }

    /// Moves the highlight to `index`, or removes it with `None`.
    ///
    /// Always restarts the blink phase, so the highlight is visible right
    /// after every keystroke. Out-of-range indices behave like `None`.
    pub(crate) fn set_active_segment(&mut self, index: Option<usize>) {
        let index = index.filter(|&index| index < self.len());

        self.blink.stop();
        if let Some(previous) = self.active.take() {
            if let Some(state) = self.segments.borrow_mut().get_mut(previous) {
                *state = SegmentState::Idle;
            }
        }

        let Some(index) = index else {
            log::trace!("no active underline segment");
            return;
        };

        self.active = Some(index);
        if self.flicker_enabled {
            self.segments.borrow_mut()[index] = SegmentState::Blinking { visible: true };
            let segments = Rc::downgrade(&self.segments);
            self.blink.start(move || {
                let Some(segments) = segments.upgrade() else {
                    return;
                };
                if let Some(SegmentState::Blinking { visible }) =
                    segments.borrow_mut().get_mut(index)
                {
                    *visible = !*visible;
                };
            });
        } else {
            self.segments.borrow_mut()[index] = SegmentState::Active;
        }
    }
}

impl std::fmt::Debug for UnderlineIndicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnderlineIndicator")
            .field("segments", &self.segments.borrow())
            .field("active", &self.active)
            .field("blink", &self.blink)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blink::BLINK_INTERVAL;
    use codefield_core::TimerQueue;

    fn indicator(count: usize, flicker: bool) -> (Rc<TimerQueue>, UnderlineIndicator) {
        let queue = Rc::new(TimerQueue::new());
        let mut indicator = UnderlineIndicator::new(queue.clone());
        indicator.rebuild(count, flicker);
        (queue, indicator)
    }

    fn highlighted(indicator: &UnderlineIndicator) -> Vec<usize> {
        indicator
            .states()
            .iter()
            .enumerate()
            .filter(|(_, state)| state.is_highlighted())
            .map(|(index, _)| index)
            .collect()
    }

    #[test]
    fn activation_moves_single_highlight() {
        let (_queue, mut indicator) = indicator(4, false);
        indicator.set_active_segment(Some(0));
        assert_eq!(highlighted(&indicator), vec![0]);

        indicator.set_active_segment(Some(2));
        assert_eq!(highlighted(&indicator), vec![2]);
        assert_eq!(indicator.states()[2], SegmentState::Active);
        assert_eq!(indicator.active_segment(), Some(2));
    }

    #[test]
    fn flicker_toggles_visibility_each_interval() {
        let (queue, mut indicator) = indicator(3, true);
        indicator.set_active_segment(Some(1));
        assert_eq!(indicator.states()[1], SegmentState::Blinking { visible: true });

        queue.advance_by(BLINK_INTERVAL);
        assert_eq!(indicator.states()[1], SegmentState::Blinking { visible: false });
        queue.advance_by(BLINK_INTERVAL);
        assert_eq!(indicator.states()[1], SegmentState::Blinking { visible: true });
    }

    #[test]
    fn clearing_highlight_disarms_timer() {
        let (queue, mut indicator) = indicator(3, true);
        indicator.set_active_segment(Some(0));
        assert!(indicator.is_blinking());

        indicator.set_active_segment(None);
        assert!(!indicator.is_blinking());
        assert_eq!(queue.active_timer_count(), 0);
        assert!(highlighted(&indicator).is_empty());
    }

    #[test]
    fn changing_segment_replaces_timer() {
        let (queue, mut indicator) = indicator(3, true);
        indicator.set_active_segment(Some(0));
        let first = indicator.blink_timer_id();
        indicator.set_active_segment(Some(1));

        assert_ne!(indicator.blink_timer_id(), first);
        assert_eq!(queue.active_timer_count(), 1);
        assert_eq!(indicator.states()[0], SegmentState::Idle);
    }

    #[test]
    fn out_of_range_index_clears() {
        let (_queue, mut indicator) = indicator(2, false);
        indicator.set_active_segment(Some(0));
        indicator.set_active_segment(Some(2));
        assert_eq!(indicator.active_segment(), None);
        assert!(highlighted(&indicator).is_empty());
    }

    #[test]
    fn reset_idle_except_keeps_requested_segment() {
        let (queue, mut indicator) = indicator(3, true);
        indicator.set_active_segment(Some(1));
        indicator.reset_idle_except(Some(1));
        assert_eq!(indicator.active_segment(), Some(1));
        assert!(indicator.is_blinking());

        indicator.reset_idle_except(Some(2));
        assert_eq!(indicator.active_segment(), None);
        assert_eq!(queue.active_timer_count(), 0);
    }

    #[test]
    fn segment_colors() {
        let idle = Color::DARK_GRAY;
        let active = Color::BLUE;
        assert_eq!(SegmentState::Idle.color(idle, active), idle);
        assert_eq!(SegmentState::Active.color(idle, active), active);
        assert_eq!(
            SegmentState::Blinking { visible: true }.color(idle, active),
            active
        );
        assert_eq!(
            SegmentState::Blinking { visible: false }.color(idle, active),
            Color::TRANSPARENT
        );
    }

    #[test]
    fn teardown_releases_timer() {
        let (queue, mut indicator) = indicator(3, true);
        indicator.set_active_segment(Some(0));
        indicator.teardown();
        assert_eq!(queue.active_timer_count(), 0);
        assert_eq!(indicator.len(), 0);
    }
}
