//! Embedded configuration flowing into the behavior cores.

use saydiet::config::SiteConfig;
use saydiet::form::{CONTACT_RULES, validate};
use saydiet::lazy_images::{LazyQueue, root_margin};
use saydiet::nav::{NavCore, NavEffect, NavTrigger};

const PAGE_CONFIG: &str = r#"{
    "nav": { "breakpoint_px": 1024, "focus_delay_ms": 0, "resize_debounce_ms": 500 },
    "lazy": { "root_margin_px": 200 },
    "log_level": "warn"
}"#;

#[test]
fn page_overrides_reach_nav_core() {
    let config = SiteConfig::from_json(PAGE_CONFIG).unwrap();
    let mut nav = NavCore::new(&config.nav);

    let opened = nav.handle(NavTrigger::Toggle);
    assert!(opened.contains(&NavEffect::FocusFirstItem { delay_ms: 0 }));

    // 1000px is still the mobile layout under a 1024px breakpoint.
    assert!(nav.handle(NavTrigger::Resized { viewport_width: 1000.0 }).is_empty());
    assert_eq!(
        nav.handle(NavTrigger::LinkActivated { viewport_width: 1000.0 }),
        vec![NavEffect::ScheduleDismiss { delay_ms: 100 }]
    );
    assert!(!nav.handle(NavTrigger::Resized { viewport_width: 1025.0 }).is_empty());
    assert!(!nav.is_open());
}

#[test]
fn page_overrides_reach_lazy_loader() {
    let config = SiteConfig::from_json(PAGE_CONFIG).unwrap();
    assert_eq!(root_margin(config.lazy.root_margin_px), "200px");

    let mut queue = LazyQueue::new(1);
    assert!(!queue.release(0, false));
    assert!(queue.release(0, true));
    assert!(!queue.release(0, true));
}

#[test]
fn defaults_validate_contact_form() {
    let config = SiteConfig::from_json("").unwrap();
    assert_eq!(config, SiteConfig::default());
    assert_eq!(config.log_level(), log::Level::Info);

    let verdict = validate(
        &CONTACT_RULES,
        |id| match id {
            "name" => Some("Ann Lee".to_owned()),
            "email" => Some("a@b.com".to_owned()),
            "message" => Some("This is a sufficiently long message.".to_owned()),
            _ => None,
        },
        Some(""),
    );
    assert!(verdict.is_valid());
}
