#![allow(clippy::float_cmp)]

use std::cell::Cell;
use std::rc::Rc;

use super::*;
use crate::fake::{FakeElement, FakeTilt};

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn card_rect() -> Rect {
    Rect::new(100.0, 200.0, 300.0, 400.0)
}

fn cards(n: usize) -> Vec<FakeElement> {
    (0..n).map(|_| FakeElement::with_class("project-card")).collect()
}

fn mount(cards: &[FakeElement], width: f64) -> (FakeTilt, TiltManager<FakeElement>) {
    let backend = FakeTilt::default();
    let manager = TiltManager::mount(cards.to_vec(), TiltConfig::default(), Box::new(backend.clone()), width);
    (backend, manager)
}

// =============================================================
// Settings
// =============================================================

#[test]
fn default_settings_match_portfolio_tuning() {
    let s = TiltSettings::default();
    assert_eq!(s.max, 15.0);
    assert_eq!(s.speed, 400);
    assert!(s.glare);
    assert_eq!(s.max_glare, 0.5);
    assert!(!s.gyroscope);
    assert!(s.validate().is_ok());
}

#[test]
fn validate_rejects_out_of_range_angle() {
    for max in [0.0, -5.0, 91.0, f64::NAN] {
        let s = TiltSettings { max, ..Default::default() };
        assert!(matches!(s.validate(), Err(ConfigError::TiltMaxAngle(_))), "max {max}");
    }
}

#[test]
fn validate_rejects_out_of_range_glare() {
    let s = TiltSettings { max_glare: 1.5, ..Default::default() };
    assert!(matches!(s.validate(), Err(ConfigError::TiltMaxGlare(_))));
}

#[test]
fn validate_rejects_non_positive_perspective_and_scale() {
    let s = TiltSettings { perspective: 0.0, ..Default::default() };
    assert!(matches!(s.validate(), Err(ConfigError::TiltPerspective(_))));
    let s = TiltSettings { scale: -1.0, ..Default::default() };
    assert!(matches!(s.validate(), Err(ConfigError::TiltScale(_))));
}

#[test]
fn validate_rejects_empty_gyroscope_range() {
    let s = TiltSettings { gyroscope_min_angle_x: 10.0, gyroscope_max_angle_x: 10.0, ..Default::default() };
    assert!(matches!(s.validate(), Err(ConfigError::GyroscopeRange { .. })));
}

// =============================================================
// Motion math
// =============================================================

#[test]
fn center_pointer_is_level() {
    let s = TiltSettings::default();
    let f = s.frame(card_rect().center(), card_rect());
    assert!(approx_eq(f.tilt_x, 0.0));
    assert!(approx_eq(f.tilt_y, 0.0));
    assert!(approx_eq(f.percentage_x, 50.0));
    assert!(approx_eq(f.percentage_y, 50.0));
}

#[test]
fn top_left_corner_tilts_to_max() {
    let s = TiltSettings::default();
    let f = s.frame(Point::new(100.0, 200.0), card_rect());
    assert!(approx_eq(f.tilt_x, 15.0));
    assert!(approx_eq(f.tilt_y, -15.0));
}

#[test]
fn bottom_right_corner_tilts_to_negative_max() {
    let s = TiltSettings::default();
    let f = s.frame(Point::new(400.0, 600.0), card_rect());
    assert!(approx_eq(f.tilt_x, -15.0));
    assert!(approx_eq(f.tilt_y, 15.0));
}

#[test]
fn reverse_flips_direction() {
    let s = TiltSettings { reverse: true, ..Default::default() };
    let f = s.frame(Point::new(100.0, 200.0), card_rect());
    assert!(approx_eq(f.tilt_x, -15.0));
    assert!(approx_eq(f.tilt_y, 15.0));
}

#[test]
fn pointer_outside_clamps_to_edge() {
    let s = TiltSettings::default();
    let f = s.frame(Point::new(-500.0, 5000.0), card_rect());
    assert!(approx_eq(f.percentage_x, 0.0));
    assert!(approx_eq(f.percentage_y, 100.0));
}

#[test]
fn zero_sized_element_is_level() {
    let s = TiltSettings::default();
    let f = s.frame(Point::new(10.0, 10.0), Rect::new(0.0, 0.0, 0.0, 0.0));
    assert!(approx_eq(f.tilt_x, 0.0));
    assert!(approx_eq(f.tilt_y, 0.0));
}

#[test]
fn glare_angle_points_at_pointer() {
    let s = TiltSettings::default();
    let c = card_rect().center();
    let up = s.frame(Point::new(c.x, c.y - 10.0), card_rect());
    let right = s.frame(Point::new(c.x + 10.0, c.y), card_rect());
    let down = s.frame(Point::new(c.x, c.y + 10.0), card_rect());
    assert!(approx_eq(up.angle, 0.0));
    assert!(approx_eq(right.angle, 90.0));
    assert!(approx_eq(down.angle.abs(), 180.0));
}

#[test]
fn glare_opacity_scales_with_vertical_position() {
    let s = TiltSettings::default();
    let top = s.frame(Point::new(250.0, 200.0), card_rect());
    let bottom = s.frame(Point::new(250.0, 600.0), card_rect());
    assert!(approx_eq(s.glare_opacity(&top), 0.0));
    assert!(approx_eq(s.glare_opacity(&bottom), 0.5));
}

#[test]
fn transform_strings() {
    let s = TiltSettings::default();
    let f = s.frame(Point::new(100.0, 200.0), card_rect());
    assert_eq!(s.transform(&f), "perspective(1000px) rotateX(-15.00deg) rotateY(15.00deg) scale3d(1, 1, 1)");
    assert_eq!(s.rest_transform(), "perspective(1000px) rotateX(0deg) rotateY(0deg) scale3d(1, 1, 1)");
    assert_eq!(s.transition(), "400ms cubic-bezier(.03,.98,.52,.99)");
    assert_eq!(TiltSettings::glare_transform(&f), format!("rotate({:.2}deg) translate(-50%, -50%)", f.angle));
}

#[test]
fn level_orientation_maps_to_center() {
    let s = TiltSettings::default();
    let p = s.pointer_from_orientation(0.0, 0.0, card_rect());
    assert_eq!(p, card_rect().center());
}

#[test]
fn extreme_orientation_maps_to_corner() {
    let s = TiltSettings::default();
    let p = s.pointer_from_orientation(-45.0, 45.0, card_rect());
    assert!(approx_eq(p.x, 400.0));
    assert!(approx_eq(p.y, 200.0));
}

// =============================================================
// Manager: width gating
// =============================================================

#[test]
fn wide_viewport_tilts_every_card() {
    let cards = cards(4);
    let (backend, manager) = mount(&cards, 1280.0);
    assert_eq!(manager.active_count(), 4);
    assert_eq!(backend.attached_ids().len(), 4);
    assert!(cards.iter().all(|c| manager.is_active(c)));
}

#[test]
fn narrow_viewport_tilts_nothing() {
    let cards = cards(3);
    let (backend, manager) = mount(&cards, 600.0);
    assert_eq!(manager.active_count(), 0);
    assert_eq!(backend.attach_calls.get(), 0);
}

#[test]
fn breakpoint_itself_is_disabled() {
    let cards = cards(2);
    let (_, manager) = mount(&cards, 992.0);
    assert_eq!(manager.active_count(), 0);
    assert!(manager.enabled_at(992.5));
    assert!(!manager.enabled_at(992.0));
}

#[test]
fn shrinking_tears_down_every_instance() {
    let cards = cards(3);
    let (backend, mut manager) = mount(&cards, 1200.0);
    manager.on_viewport_width(800.0);
    assert_eq!(manager.active_count(), 0);
    assert!(backend.attached_ids().is_empty());
    assert_eq!(backend.detach_calls.get(), 3);
}

#[test]
fn growing_past_breakpoint_enables() {
    let cards = cards(2);
    let (backend, mut manager) = mount(&cards, 500.0);
    manager.on_viewport_width(1000.0);
    assert_eq!(manager.active_count(), 2);
    assert_eq!(backend.attached_ids().len(), 2);
}

#[test]
fn repeated_resizes_never_duplicate_instances() {
    let cards = cards(3);
    let (backend, mut manager) = mount(&cards, 1200.0);
    for width in [1300.0, 1400.0, 700.0, 1100.0, 1100.0, 990.0, 1500.0, 1501.0] {
        manager.on_viewport_width(width);
        let ids = backend.attached_ids();
        let mut deduped = ids.clone();
        deduped.dedup();
        assert_eq!(ids, deduped, "duplicate instance at width {width}");
        let expected = if width > 992.0 { 3 } else { 0 };
        assert_eq!(ids.len(), expected, "width {width}");
    }
    // Mount + two re-enables, each over three cards.
    assert_eq!(backend.attach_calls.get(), 9);
}

#[test]
fn same_element_listed_twice_gets_one_instance() {
    let card = FakeElement::new();
    let (backend, manager) = mount(&[card.clone(), card.clone()], 1200.0);
    assert_eq!(manager.card_count(), 1);
    assert_eq!(backend.attached_ids(), vec![card.id()]);
}

#[test]
fn destroy_all_detaches_and_is_repeatable() {
    let cards = cards(2);
    let (backend, mut manager) = mount(&cards, 1200.0);
    manager.destroy_all();
    manager.destroy_all();
    assert_eq!(backend.detach_calls.get(), 2);
    assert_eq!(manager.active_count(), 0);
}

#[test]
fn backend_receives_configured_settings() {
    let cards = cards(1);
    let backend = FakeTilt::default();
    let config = TiltConfig { settings: TiltSettings { max: 20.0, ..Default::default() }, ..Default::default() };
    let manager = TiltManager::mount(cards, config, Box::new(backend.clone()), 1200.0);
    assert_eq!(manager.settings().max, 20.0);
    assert_eq!(backend.last_settings.borrow().as_ref().map(|s| s.max), Some(20.0));
}

// =============================================================
// Glare sizing and transition timers
// =============================================================

#[test]
fn glare_covers_twice_the_longer_side() {
    assert_eq!(glare_diameter(300.0, 400.0), 800.0);
    assert_eq!(glare_diameter(500.0, 200.0), 1000.0);
}

#[test]
fn glare_follows_a_narrower_card() {
    let wide = glare_diameter(420.0, 380.0);
    let narrow = glare_diameter(330.0, 380.0);
    assert_eq!(wide, 840.0);
    assert_eq!(narrow, 760.0);
}

/// Timer stand-in that records when it is cancelled by being dropped.
struct CountingHandle(Rc<Cell<usize>>);

impl Drop for CountingHandle {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

#[test]
fn leave_during_enter_transition_cancels_enter_timer() {
    let enter_cancelled = Rc::new(Cell::new(0));
    let leave_cancelled = Rc::new(Cell::new(0));
    let timer = TransitionTimer::default();

    timer.restart(CountingHandle(Rc::clone(&enter_cancelled)));
    timer.restart(CountingHandle(Rc::clone(&leave_cancelled)));

    assert_eq!(enter_cancelled.get(), 1);
    assert_eq!(leave_cancelled.get(), 0);
}

#[test]
fn cancel_drops_pending_timer_once() {
    let cancelled = Rc::new(Cell::new(0));
    let timer = TransitionTimer::default();
    timer.restart(CountingHandle(Rc::clone(&cancelled)));
    timer.cancel();
    timer.cancel();
    assert_eq!(cancelled.get(), 1);
}

#[test]
fn dropping_timer_cancels_pending() {
    let cancelled = Rc::new(Cell::new(0));
    {
        let timer = TransitionTimer::default();
        timer.restart(CountingHandle(Rc::clone(&cancelled)));
    }
    assert_eq!(cancelled.get(), 1);
}
