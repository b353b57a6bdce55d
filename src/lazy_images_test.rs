use super::*;

// =============================================================
// Strategy
// =============================================================

#[test]
fn native_support_wins() {
    assert_eq!(LoadStrategy::detect(true, true), LoadStrategy::Native);
    assert_eq!(LoadStrategy::detect(true, false), LoadStrategy::Native);
}

#[test]
fn observer_used_when_native_missing() {
    assert_eq!(LoadStrategy::detect(false, true), LoadStrategy::Observe);
}

#[test]
fn eager_fallback_without_observer() {
    assert_eq!(LoadStrategy::detect(false, false), LoadStrategy::Eager);
}

#[test]
fn root_margin_is_css_pixels() {
    assert_eq!(root_margin(50), "50px");
}

// =============================================================
// Eager path
// =============================================================

#[test]
fn eager_promotion_copies_every_staged_source() {
    let staged = [Some("/img/a.webp"), Some("/img/b.webp"), Some("/img/c.webp")];
    let loads: Vec<_> = staged.iter().map(|s| ImageLoad::from_staged(s.map(str::to_owned))).collect();
    let srcs: Vec<_> = loads.iter().map(|l| l.src.as_deref()).collect();
    assert_eq!(srcs, vec![Some("/img/a.webp"), Some("/img/b.webp"), Some("/img/c.webp")]);
}

#[test]
fn image_without_staged_source_keeps_its_src() {
    assert_eq!(ImageLoad::from_staged(None), ImageLoad { src: None });
    assert_eq!(ImageLoad::from_staged(Some(String::new())), ImageLoad { src: None });
}

// =============================================================
// Observer path
// =============================================================

#[test]
fn release_fires_once_per_image() {
    let mut queue = LazyQueue::new(2);
    assert!(queue.release(0, true));
    assert!(!queue.release(0, true));
    assert!(queue.release(1, true));
}

#[test]
fn non_intersecting_report_keeps_image_pending() {
    let mut queue = LazyQueue::new(1);
    assert!(!queue.release(0, false));
    assert!(queue.release(0, true));
}

#[test]
fn unknown_index_is_ignored() {
    let mut queue = LazyQueue::new(1);
    assert!(!queue.release(5, true));
    assert!(queue.release(0, true));
}

#[test]
fn image_outside_margin_loads_only_when_it_enters_exactly_once() {
    let mut queue = LazyQueue::new(2);

    // Initial report: image 0 is on screen, image 1 far below the margin.
    assert!(queue.release(0, true));
    assert!(!queue.release(1, false));

    // Scrolling that keeps image 1 outside the margin reports it again.
    for _ in 0..3 {
        assert!(!queue.release(1, false));
    }

    // It crosses into the margin: promoted now.
    assert!(queue.release(1, true));

    // Reports queued before `unobserve` took effect, or after scrolling
    // away and back, never promote it again.
    assert!(!queue.release(1, true));
    assert!(!queue.release(1, false));
    assert!(!queue.release(1, true));
    assert!(!queue.release(0, true));
}
