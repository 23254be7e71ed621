use log::debug;

use super::geometry::{indicator_geometry, Rect};
use super::surface::{ContentHeight, StepSurface};
use super::task::{TaskHandle, TaskSlot};
use super::timing::{Delay, Ease, Tween};
use crate::config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Advancing,
    Transitioning,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveStyle {
    /// Every step up to and including the current one.
    #[default]
    Cumulative,
    Discrete,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepConfig {
    pub dwell: f64,
    pub transition: f64,
    pub end_delay: f64,
    pub transition_ease: Ease,
    pub active_style: ActiveStyle,
    /// CSS filter for the image of active steps.
    pub highlight: Option<&'static str>,
    pub clear_on_hide: bool,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self {
            dwell: config::LINE_DURATION,
            transition: config::SWITCH_DURATION,
            end_delay: config::END_DELAY,
            transition_ease: Ease::Power2InOut,
            active_style: ActiveStyle::Cumulative,
            highlight: None,
            clear_on_hide: true,
        }
    }
}

impl StepConfig {
    pub fn highlighted() -> Self {
        Self {
            highlight: Some(config::ACTIVE_FILTER),
            ..Self::default()
        }
    }
}

#[derive(Debug)]
struct Transition {
    from: usize,
    to: usize,
    tween: Tween,
    from_height: f64,
    to_start: f64,
    to_height: f64,
}

impl Transition {
    fn from_current(&self) -> f64 {
        self.from_height * (1.0 - self.tween.value())
    }

    fn to_current(&self) -> f64 {
        self.to_start + (self.to_height - self.to_start) * self.tween.value()
    }
}

/// Auto-advancing stepped progress widget.
///
/// Time only moves through [`StepWidget::tick`]; the host calls it once per
/// frame with the elapsed seconds. All state is per instance.
pub struct StepWidget<S: StepSurface> {
    surface: S,
    config: StepConfig,
    step_count: usize,
    active_index: usize,
    phase: Phase,
    hovering: bool,
    visible: bool,
    initialized: bool,
    live: bool,
    attached: bool,
    timer: TaskSlot<Tween>,
    transition: TaskSlot<Transition>,
    end_delay: TaskSlot<Delay>,
}

impl<S: StepSurface> StepWidget<S> {
    pub fn new(surface: S, config: StepConfig) -> Self {
        Self {
            surface,
            config,
            step_count: 0,
            active_index: 0,
            phase: Phase::Idle,
            hovering: false,
            visible: true,
            initialized: false,
            live: false,
            attached: true,
            timer: TaskSlot::default(),
            transition: TaskSlot::default(),
            end_delay: TaskSlot::default(),
        }
    }

    pub fn hidden(surface: S, config: StepConfig) -> Self {
        let mut widget = Self::new(surface, config);
        widget.visible = false;
        widget
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn timer_handle(&self) -> Option<TaskHandle> {
        self.timer.handle()
    }

    pub fn transition_handle(&self) -> Option<TaskHandle> {
        self.transition.handle()
    }

    fn is_running(&self) -> bool {
        self.live && self.visible && self.attached
    }

    /// True while the host should keep feeding frames and layout notifications.
    pub fn needs_frames(&self) -> bool {
        self.is_running()
    }

    /// Resets to step 0 and starts advancing. Hidden widgets only record their
    /// steps and wait for [`StepWidget::set_visible`].
    pub fn initialize(&mut self) {
        self.cancel_tasks();
        self.step_count = self.surface.step_count();
        self.active_index = 0;
        self.phase = Phase::Idle;
        self.initialized = true;
        self.live = self.step_count > 0;
        self.attached = self.surface.is_attached();

        if !self.is_running() {
            return;
        }
        debug!("Initializing step widget with {} steps", self.step_count);

        for index in 0..self.step_count {
            let height = if index == 0 {
                ContentHeight::Auto
            } else {
                ContentHeight::Collapsed
            };
            self.surface.set_content_height(index, height);
        }
        self.apply_active_flags(0);
        self.draw(0.0);
        self.advance_timer();
    }

    pub fn advance_timer(&mut self) {
        if !self.is_running() {
            return;
        }
        let from = self.active_index as f64;
        let to = (self.active_index + 1) as f64;
        self.timer
            .start(Tween::new(from, to, self.config.dwell, Ease::Linear));
        self.phase = if self.hovering {
            Phase::Paused
        } else {
            Phase::Advancing
        };
    }

    pub fn transition_to(&mut self, index: usize) {
        if index >= self.step_count || !self.is_running() {
            return;
        }
        self.timer.cancel();
        self.end_delay.cancel();

        let from = self.active_index;
        let mut from_height = self.surface.content_natural_height(from).unwrap_or(0.0);
        let mut to_start = 0.0;

        // Interrupted transition: settle its collapsing side, pick up where the rest left off
        if let Some(previous) = self.transition.finish() {
            if previous.from != previous.to && previous.from != index {
                self.surface
                    .set_content_height(previous.from, ContentHeight::Collapsed);
            }
            if previous.to == from {
                from_height = previous.to_current();
            }
            if previous.from == index {
                to_start = previous.from_current();
            }
        }

        if from == index {
            // Already open, nothing to expand from
            to_start = self.surface.content_natural_height(index).unwrap_or(0.0);
        }

        self.active_index = index;
        self.apply_active_flags(index);

        let to_height = self.surface.content_natural_height(index).unwrap_or(0.0);
        self.transition.start(Transition {
            from,
            to: index,
            tween: Tween::new(
                0.0,
                1.0,
                self.config.transition,
                self.config.transition_ease,
            ),
            from_height,
            to_start,
            to_height,
        });
        self.phase = Phase::Transitioning;
        self.draw(index as f64);
    }

    pub fn reset_to_first(&mut self) {
        self.transition_to(0);
    }

    pub fn pause(&mut self) {
        self.hovering = true;
        if self.phase == Phase::Advancing {
            self.phase = Phase::Paused;
        }
    }

    pub fn resume(&mut self) {
        self.hovering = false;
        if self.phase == Phase::Paused {
            self.phase = Phase::Advancing;
        }
    }

    pub fn on_step_header_click(&mut self, index: usize) {
        if index != self.active_index && self.is_running() {
            debug!("Step header {} clicked", index);
            self.transition_to(index);
        }
    }

    pub fn on_resize(&mut self) {
        if self.is_running() {
            self.draw(self.active_index as f64);
        }
    }

    pub fn draw(&mut self, position: f64) {
        let Some(container) = self.surface.container_rect() else {
            return;
        };
        let markers: Vec<Option<Rect>> = (0..self.surface.step_count())
            .map(|index| self.surface.marker_rect(index))
            .collect();

        if let Some(geometry) = indicator_geometry(container, &markers, position) {
            self.surface.set_indicator(&geometry);
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        if visible == self.visible {
            return;
        }
        self.visible = visible;

        if visible {
            if self.initialized {
                debug!("Step widget shown, restarting from the first step");
                self.initialize();
            }
            return;
        }

        debug!("Step widget hidden");
        self.suspend();
    }

    /// Re-reads attachment. Detaching suspends like hiding; re-attaching
    /// restarts from the first step.
    pub fn sync_attachment(&mut self) {
        if !self.live || !self.visible {
            return;
        }
        let attached = self.surface.is_attached();
        if attached == self.attached {
            return;
        }
        self.attached = attached;

        if attached {
            debug!("Step widget container attached again");
            self.initialize();
        } else {
            debug!("Step widget container detached");
            self.suspend();
        }
    }

    fn suspend(&mut self) {
        self.cancel_tasks();
        self.phase = Phase::Idle;
        if self.config.clear_on_hide {
            for index in 0..self.step_count {
                self.surface.set_step_active(index, false);
                if self.config.highlight.is_some() {
                    self.surface.set_highlight(index, None);
                }
                self.surface
                    .set_content_height(index, ContentHeight::Collapsed);
            }
        }
    }

    pub fn teardown(&mut self) {
        if self.live {
            debug!("Tearing down step widget");
        }
        self.cancel_tasks();
        self.live = false;
        self.phase = Phase::Idle;
    }

    pub fn tick(&mut self, dt: f64) {
        self.sync_attachment();
        if !self.is_running() {
            return;
        }

        if self.transition.is_active() {
            self.step_transition(dt);
            return;
        }

        // Hover freezes both the dwell timer and the end-of-cycle delay
        if self.hovering {
            return;
        }

        let timer_state = self.timer.get_mut().map(|timer| {
            let value = timer.advance(dt);
            (value, timer.is_done())
        });
        if let Some((value, done)) = timer_state {
            self.draw(value);
            if done {
                self.timer.finish();
                self.on_timer_complete();
            }
            return;
        }

        let delay_done = self
            .end_delay
            .get_mut()
            .map_or(false, |delay| delay.advance(dt));
        if delay_done {
            self.end_delay.finish();
            if self.is_running() {
                self.reset_to_first();
            }
        }
    }

    fn on_timer_complete(&mut self) {
        if self.active_index + 1 >= self.step_count {
            self.end_delay.start(Delay::new(self.config.end_delay));
        } else {
            self.transition_to(self.active_index + 1);
        }
    }

    fn step_transition(&mut self, dt: f64) {
        let Some(transition) = self.transition.get_mut() else {
            return;
        };
        transition.tween.advance(dt);
        let (from, to, done) = (transition.from, transition.to, transition.tween.is_done());
        let from_current = transition.from_current();
        let to_current = transition.to_current();

        if done {
            self.transition.finish();
            if from != to {
                self.surface.set_content_height(from, ContentHeight::Collapsed);
            }
            self.surface.set_content_height(to, ContentHeight::Auto);
            self.draw(self.active_index as f64);
            self.advance_timer();
            return;
        }

        if from != to {
            self.surface
                .set_content_height(from, ContentHeight::Px(from_current));
        }
        self.surface.set_content_height(to, ContentHeight::Px(to_current));
        self.draw(self.active_index as f64);
    }

    fn apply_active_flags(&mut self, index: usize) {
        for step in 0..self.step_count {
            let active = match self.config.active_style {
                ActiveStyle::Cumulative => step <= index,
                ActiveStyle::Discrete => step == index,
            };
            self.surface.set_step_active(step, active);
            if let Some(filter) = self.config.highlight {
                self.surface.set_highlight(step, active.then_some(filter));
            }
        }
    }

    fn cancel_tasks(&mut self) {
        self.timer.cancel();
        self.transition.cancel();
        self.end_delay.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steps::geometry::IndicatorGeometry;

    const FRAME: f64 = 0.25;

    struct FakeSurface {
        attached: bool,
        container: Option<Rect>,
        markers: Vec<Option<Rect>>,
        natural: Vec<f64>,
        heights: Vec<ContentHeight>,
        active: Vec<bool>,
        highlights: Vec<Option<String>>,
        indicator: Option<IndicatorGeometry>,
        indicator_writes: usize,
    }

    impl FakeSurface {
        fn with_steps(count: usize) -> Self {
            Self {
                attached: true,
                container: Some(Rect::new(0.0, 0.0, 300.0, 800.0)),
                markers: (0..count)
                    .map(|i| Some(Rect::new(10.0, 20.0 + 100.0 * i as f64, 10.0, 10.0)))
                    .collect(),
                natural: vec![80.0; count],
                heights: vec![ContentHeight::Px(80.0); count],
                active: vec![false; count],
                highlights: vec![None; count],
                indicator: None,
                indicator_writes: 0,
            }
        }

        fn expanded(&self) -> usize {
            self.heights
                .iter()
                .filter(|height| match height {
                    ContentHeight::Collapsed => false,
                    ContentHeight::Px(px) => *px > 0.0,
                    ContentHeight::Auto => true,
                })
                .count()
        }

        fn progress(&self) -> f64 {
            self.indicator.map(|g| g.progress_height).unwrap_or(-1.0)
        }
    }

    impl StepSurface for FakeSurface {
        fn step_count(&self) -> usize {
            self.markers.len()
        }

        fn is_attached(&self) -> bool {
            self.attached
        }

        fn container_rect(&self) -> Option<Rect> {
            self.container
        }

        fn marker_rect(&self, index: usize) -> Option<Rect> {
            self.markers.get(index).copied().flatten()
        }

        fn content_natural_height(&self, index: usize) -> Option<f64> {
            self.natural.get(index).copied()
        }

        fn set_content_height(&mut self, index: usize, height: ContentHeight) {
            self.heights[index] = height;
        }

        fn set_step_active(&mut self, index: usize, active: bool) {
            self.active[index] = active;
        }

        fn set_highlight(&mut self, index: usize, filter: Option<&str>) {
            self.highlights[index] = filter.map(str::to_string);
        }

        fn set_indicator(&mut self, geometry: &IndicatorGeometry) {
            self.indicator = Some(*geometry);
            self.indicator_writes += 1;
        }
    }

    fn widget(count: usize) -> StepWidget<FakeSurface> {
        let mut widget = StepWidget::new(FakeSurface::with_steps(count), StepConfig::default());
        widget.initialize();
        widget
    }

    fn run(widget: &mut StepWidget<FakeSurface>, seconds: f64) {
        let frames = (seconds / FRAME).round() as usize;
        for _ in 0..frames {
            widget.tick(FRAME);
        }
    }

    fn assert_settled_on(widget: &StepWidget<FakeSurface>, index: usize) {
        assert_eq!(widget.active_index(), index);
        assert_eq!(widget.surface().expanded(), 1);
        assert_eq!(widget.surface().heights[index], ContentHeight::Auto);
    }

    #[test]
    fn test_initialize_opens_first_step_only() {
        let widget = widget(4);
        assert_eq!(widget.phase(), Phase::Advancing);
        assert_settled_on(&widget, 0);
        assert_eq!(widget.surface().active, vec![true, false, false, false]);
        assert_eq!(widget.surface().progress(), 0.0);
        assert!(widget.timer_handle().is_some());
    }

    #[test]
    fn test_initialize_without_steps_stays_idle() {
        let mut widget = StepWidget::new(FakeSurface::with_steps(0), StepConfig::default());
        widget.initialize();
        assert_eq!(widget.phase(), Phase::Idle);
        widget.tick(1.0);
        assert!(widget.timer_handle().is_none());
    }

    #[test]
    fn test_four_step_timeline() {
        let mut widget = widget(4);

        run(&mut widget, 1.0);
        assert_eq!(widget.surface().progress(), 50.0);

        run(&mut widget, 1.0);
        assert_eq!(widget.phase(), Phase::Transitioning);
        assert_eq!(widget.active_index(), 1);
        assert_eq!(widget.surface().progress(), 100.0);

        run(&mut widget, 0.5);
        assert_eq!(widget.phase(), Phase::Advancing);
        assert_settled_on(&widget, 1);

        // Two more dwell + transition cycles reach the last step
        run(&mut widget, 5.0);
        assert_settled_on(&widget, 3);
        assert_eq!(widget.surface().active, vec![true; 4]);

        // Dwell on the last step, then the end-of-cycle delay
        run(&mut widget, 2.0);
        assert_eq!(widget.active_index(), 3);
        assert!(widget.timer_handle().is_none());
        run(&mut widget, 2.75);
        assert_eq!(widget.active_index(), 3);
        assert_eq!(widget.phase(), Phase::Advancing);

        run(&mut widget, 0.25);
        assert_eq!(widget.phase(), Phase::Transitioning);
        assert_eq!(widget.active_index(), 0);

        run(&mut widget, 0.5);
        assert_settled_on(&widget, 0);
        assert_eq!(widget.surface().progress(), 0.0);
        assert_eq!(widget.surface().active, vec![true, false, false, false]);
    }

    #[test]
    fn test_cycle_returns_to_first_step() {
        let mut widget = widget(3);
        let mut visited = vec![0];
        // 3 dwells, 2 transitions, end delay, reset transition
        for _ in 0..((3.0 * 2.0 + 2.0 * 0.5 + 3.0 + 0.5) / FRAME) as usize {
            widget.tick(FRAME);
            if visited.last() != Some(&widget.active_index()) {
                visited.push(widget.active_index());
            }
        }
        assert_eq!(visited, vec![0, 1, 2, 0]);
        assert_settled_on(&widget, 0);
    }

    #[test]
    fn test_one_content_open_when_settled_and_at_most_two_in_transition() {
        let mut widget = widget(4);
        for _ in 0..((30.0 / FRAME) as usize) {
            widget.tick(FRAME);
            let expanded = widget.surface().expanded();
            assert!(widget.active_index() < 4);
            if widget.phase() == Phase::Transitioning {
                assert!((1..=2).contains(&expanded));
            } else {
                assert_eq!(expanded, 1);
            }
        }
    }

    #[test]
    fn test_progress_is_monotonic_within_a_step() {
        let mut widget = widget(3);
        let mut last = widget.surface().progress();
        for _ in 0..8 {
            widget.tick(FRAME);
            let progress = widget.surface().progress();
            assert!(progress >= last);
            last = progress;
        }
    }

    #[test]
    fn test_header_click_cancels_running_timer() {
        let mut widget = widget(4);
        run(&mut widget, 1.0);
        let timer = widget.timer_handle().unwrap();

        widget.on_step_header_click(2);
        assert!(!timer.is_active());
        assert_eq!(widget.phase(), Phase::Transitioning);
        assert_eq!(widget.active_index(), 2);
        assert_eq!(widget.surface().active, vec![true, true, true, false]);

        run(&mut widget, 0.5);
        assert_settled_on(&widget, 2);

        // The cancelled timer would have advanced to step 1 by now
        run(&mut widget, 1.5);
        assert_eq!(widget.active_index(), 2);
        assert_eq!(widget.phase(), Phase::Advancing);
    }

    #[test]
    fn test_click_on_active_step_is_ignored() {
        let mut widget = widget(3);
        let timer = widget.timer_handle().unwrap();
        widget.on_step_header_click(0);
        assert!(timer.is_active());
        assert_eq!(widget.phase(), Phase::Advancing);
    }

    #[test]
    fn test_click_during_transition_collapses_interrupted_step() {
        let mut widget = widget(4);
        run(&mut widget, 2.25);
        assert_eq!(widget.phase(), Phase::Transitioning);

        widget.on_step_header_click(3);
        assert_eq!(widget.surface().heights[0], ContentHeight::Collapsed);
        run(&mut widget, 0.25);
        assert!(widget.surface().expanded() <= 2);
        run(&mut widget, 0.25);
        assert_settled_on(&widget, 3);
    }

    #[test]
    fn test_hover_pauses_only_hovered_instance() {
        let mut hovered = widget(3);
        let mut other = widget(3);

        hovered.pause();
        assert_eq!(hovered.phase(), Phase::Paused);
        assert_eq!(other.phase(), Phase::Advancing);

        run(&mut hovered, 2.0);
        run(&mut other, 2.0);
        assert_eq!(hovered.active_index(), 0);
        assert_eq!(hovered.surface().progress(), 0.0);
        assert_eq!(other.active_index(), 1);

        hovered.resume();
        assert_eq!(hovered.phase(), Phase::Advancing);
        run(&mut hovered, 2.0);
        assert_eq!(hovered.active_index(), 1);
    }

    #[test]
    fn test_hover_keeps_timer_progress() {
        let mut widget = widget(3);
        run(&mut widget, 1.0);
        widget.pause();
        run(&mut widget, 5.0);
        assert_eq!(widget.surface().progress(), 50.0);
        widget.resume();
        run(&mut widget, 1.0);
        assert_eq!(widget.phase(), Phase::Transitioning);
    }

    #[test]
    fn test_hover_during_transition_pauses_next_timer() {
        let mut widget = widget(3);
        run(&mut widget, 2.0);
        widget.pause();
        assert_eq!(widget.phase(), Phase::Transitioning);
        run(&mut widget, 0.5);
        assert_settled_on(&widget, 1);
        assert_eq!(widget.phase(), Phase::Paused);
    }

    #[test]
    fn test_hover_holds_end_of_cycle_reset() {
        let mut widget = widget(2);
        run(&mut widget, 2.0 + 0.5 + 2.0);
        assert_eq!(widget.active_index(), 1);

        widget.pause();
        run(&mut widget, 10.0);
        assert_eq!(widget.active_index(), 1);

        widget.resume();
        run(&mut widget, 3.0);
        assert_eq!(widget.active_index(), 0);
    }

    #[test]
    fn test_draw_skips_when_marker_missing() {
        let mut widget = widget(3);
        run(&mut widget, 1.0);
        let before = widget.surface().indicator;
        let writes = widget.surface().indicator_writes;

        widget.surface_mut().markers[1] = None;
        widget.draw(0.5);
        assert_eq!(widget.surface().indicator, before);
        assert_eq!(widget.surface().indicator_writes, writes);
    }

    #[test]
    fn test_draw_skips_when_container_collapsed() {
        let mut widget = widget(3);
        let before = widget.surface().indicator;
        widget.surface_mut().container = Some(Rect::new(0.0, 0.0, 300.0, 0.0));
        widget.draw(1.0);
        widget.on_resize();
        assert_eq!(widget.surface().indicator, before);

        widget.surface_mut().container = None;
        widget.draw(1.0);
        assert_eq!(widget.surface().indicator, before);
    }

    #[test]
    fn test_resize_redraws_current_step() {
        let mut widget = widget(3);
        run(&mut widget, 2.5);
        widget.surface_mut().markers = (0..3)
            .map(|i| Some(Rect::new(10.0, 20.0 + 50.0 * i as f64, 10.0, 10.0)))
            .collect();
        widget.on_resize();
        assert_eq!(widget.surface().progress(), 50.0);
        assert_eq!(widget.active_index(), 1);
    }

    #[test]
    fn test_teardown_is_idempotent() {
        let mut widget = widget(3);
        let timer = widget.timer_handle().unwrap();
        widget.teardown();
        widget.teardown();
        assert!(!timer.is_active());
        assert!(widget.timer_handle().is_none());
        assert_eq!(widget.phase(), Phase::Idle);

        run(&mut widget, 5.0);
        assert_eq!(widget.active_index(), 0);
        assert!(widget.timer_handle().is_none());

        let mut fresh = StepWidget::new(FakeSurface::with_steps(2), StepConfig::default());
        fresh.teardown();
        assert_eq!(fresh.phase(), Phase::Idle);
    }

    #[test]
    fn test_teardown_mid_transition_stops_animation() {
        let mut widget = widget(3);
        run(&mut widget, 2.25);
        let transition = widget.transition_handle().unwrap();
        widget.teardown();
        assert!(!transition.is_active());
        let heights = widget.surface().heights.clone();
        run(&mut widget, 1.0);
        assert_eq!(widget.surface().heights, heights);
    }

    #[test]
    fn test_detached_container_suspends_on_next_tick() {
        let mut widget = widget(3);
        let timer = widget.timer_handle().unwrap();
        widget.surface_mut().attached = false;
        widget.tick(FRAME);
        assert!(!timer.is_active());
        assert_eq!(widget.phase(), Phase::Idle);
        assert!(!widget.needs_frames());
    }

    #[test]
    fn test_reattached_container_restarts_from_first_step() {
        let mut widget = widget(3);
        run(&mut widget, 2.5);
        assert_eq!(widget.active_index(), 1);

        widget.surface_mut().attached = false;
        widget.tick(FRAME);
        run(&mut widget, 5.0);
        assert_eq!(widget.phase(), Phase::Idle);

        widget.surface_mut().attached = true;
        widget.sync_attachment();
        assert!(widget.needs_frames());
        assert_eq!(widget.phase(), Phase::Advancing);
        assert_settled_on(&widget, 0);

        run(&mut widget, 2.5);
        assert_settled_on(&widget, 1);
        assert!(widget.timer_handle().is_some_and(|timer| timer.is_active()));
    }

    #[test]
    fn test_reattach_while_hidden_waits_for_visibility() {
        let mut widget = widget(3);
        widget.set_visible(false);
        widget.surface_mut().attached = false;
        widget.tick(FRAME);
        widget.surface_mut().attached = true;
        widget.tick(FRAME);
        assert_eq!(widget.phase(), Phase::Idle);

        widget.set_visible(true);
        assert_eq!(widget.phase(), Phase::Advancing);
        assert_settled_on(&widget, 0);
    }

    #[test]
    fn test_explicit_teardown_is_not_undone_by_attachment() {
        let mut widget = widget(3);
        widget.teardown();
        widget.surface_mut().attached = false;
        widget.tick(FRAME);
        widget.surface_mut().attached = true;
        widget.tick(FRAME);
        assert_eq!(widget.phase(), Phase::Idle);
        assert!(!widget.needs_frames());
    }

    #[test]
    fn test_hidden_widget_clears_state_and_restarts_when_shown() {
        let mut widget = widget(3);
        run(&mut widget, 2.5);
        assert_eq!(widget.active_index(), 1);

        widget.set_visible(false);
        assert_eq!(widget.phase(), Phase::Idle);
        assert!(widget.timer_handle().is_none());
        assert_eq!(widget.surface().expanded(), 0);
        assert_eq!(widget.surface().active, vec![false; 3]);

        widget.on_step_header_click(2);
        run(&mut widget, 5.0);
        assert_eq!(widget.active_index(), 1);

        widget.set_visible(true);
        assert_eq!(widget.phase(), Phase::Advancing);
        assert_settled_on(&widget, 0);
    }

    #[test]
    fn test_hidden_during_end_delay_never_resets() {
        let mut widget = widget(2);
        run(&mut widget, 4.5);
        assert_eq!(widget.active_index(), 1);
        widget.set_visible(false);
        run(&mut widget, 5.0);
        assert_eq!(widget.active_index(), 1);
        assert!(widget.transition_handle().is_none());
    }

    #[test]
    fn test_starts_hidden_until_shown() {
        let mut widget = StepWidget::hidden(FakeSurface::with_steps(3), StepConfig::default());
        widget.initialize();
        assert_eq!(widget.phase(), Phase::Idle);
        assert!(widget.surface().indicator.is_none());

        widget.set_visible(true);
        assert_eq!(widget.phase(), Phase::Advancing);
        assert_settled_on(&widget, 0);
    }

    #[test]
    fn test_highlight_follows_cumulative_active_steps() {
        let mut widget = StepWidget::new(FakeSurface::with_steps(4), StepConfig::highlighted());
        widget.initialize();
        widget.on_step_header_click(2);

        let filter = Some(config::ACTIVE_FILTER.to_string());
        assert_eq!(
            widget.surface().highlights,
            vec![filter.clone(), filter.clone(), filter, None]
        );
    }

    #[test]
    fn test_discrete_style_marks_only_current_step() {
        let config = StepConfig {
            active_style: ActiveStyle::Discrete,
            ..StepConfig::default()
        };
        let mut widget = StepWidget::new(FakeSurface::with_steps(3), config);
        widget.initialize();
        widget.on_step_header_click(2);
        assert_eq!(widget.surface().active, vec![false, false, true]);
    }

    #[test]
    fn test_single_step_loops_in_place() {
        let mut widget = widget(1);
        run(&mut widget, 2.0 + 3.0);
        assert_eq!(widget.phase(), Phase::Transitioning);
        assert_eq!(widget.surface().heights[0], ContentHeight::Auto);
        run(&mut widget, 0.25);
        assert_eq!(widget.surface().expanded(), 1);
        run(&mut widget, 0.25);
        assert_settled_on(&widget, 0);
        assert_eq!(widget.phase(), Phase::Advancing);
    }
}
