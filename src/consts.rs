//! Shared constants: the DOM contract between the site markup and this crate,
//! plus the fixed timings the behaviors were tuned with.

// ── Year stamp ──────────────────────────────────────────────────

/// Element ids that receive the current year.
pub const YEAR_ELEMENT_IDS: [&str; 2] = ["year", "year-footer"];

// ── Mobile navigation ───────────────────────────────────────────

pub const NAV_TOGGLE_ID: &str = "nav-toggle";
pub const NAV_CLOSE_ID: &str = "nav-close";
pub const NAV_PANEL_ID: &str = "nav-list";

/// Class placed on the panel while the menu is open.
pub const NAV_OPEN_CLASS: &str = "mobile-open";

/// Class placed on `<body>` while the menu is open.
pub const BODY_MENU_OPEN_CLASS: &str = "menu-open";

/// Selector for the element that receives focus when the menu opens.
pub const NAV_FOCUSABLE_SELECTOR: &str = "a, button";

/// Widest viewport, in CSS pixels, still treated as the mobile layout.
pub const MOBILE_BREAKPOINT_PX: f64 = 900.0;

/// Delay before focusing the first menu item, so the open transition settles.
pub const NAV_FOCUS_DELAY_MS: u32 = 100;

/// Delay before closing after a menu link is activated, so navigation starts first.
pub const NAV_LINK_DISMISS_DELAY_MS: u32 = 100;

/// Quiet period after the last `resize` event before the breakpoint is checked.
pub const RESIZE_DEBOUNCE_MS: u32 = 250;

// ── Smooth scroll ───────────────────────────────────────────────

pub const IN_PAGE_ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";

// ── Contact form ────────────────────────────────────────────────

pub const CONTACT_FORM_SELECTOR: &str = "form#contact-form";
pub const HONEYPOT_SELECTOR: &str = "input[name=\"website\"]";
pub const FIELD_ERROR_CLASS: &str = "field-error";

/// Inline styles applied to each error marker, as `(property, value)` pairs.
pub const FIELD_ERROR_STYLE: [(&str, &str); 4] = [
    ("color", "var(--md-danger, #D32F2F)"),
    ("font-size", "0.85rem"),
    ("margin-top", "0.25rem"),
    ("font-weight", "600"),
];

// ── Lazy images ─────────────────────────────────────────────────

pub const LAZY_IMAGE_SELECTOR: &str = "img[loading=\"lazy\"]";
pub const LAZY_MARKER_ATTR: &str = "loading";
pub const STAGED_SRC_ATTR: &str = "data-src";

/// Distance outside the viewport at which a deferred image starts loading.
pub const LAZY_ROOT_MARGIN_PX: u32 = 50;

// ── Bootstrap ───────────────────────────────────────────────────

/// Id of an optional `<script type="application/json">` element holding overrides.
pub const CONFIG_ELEMENT_ID: &str = "site-config";

pub const DEFAULT_LOG_LEVEL: &str = "info";
