//! Icons a card can carry.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IconOption {
    pub name: &'static str,
    /// CSS class stored in [`crate::model::Card::icon`].
    pub class: &'static str,
}

const fn icon(name: &'static str, class: &'static str) -> IconOption {
    IconOption { name, class }
}

pub static ICON_OPTIONS: &[IconOption] = &[
    icon("Star", "pi pi-star"),
    icon("Heart", "pi pi-heart"),
    icon("Bolt", "pi pi-bolt"),
    icon("Sparkles", "pi pi-sparkles"),
    icon("Check", "pi pi-check"),
    icon("Times", "pi pi-times"),
    icon("User", "pi pi-user"),
    icon("Book", "pi pi-book"),
    icon("Calendar", "pi pi-calendar"),
    icon("Clock", "pi pi-clock"),
    icon("Envelope", "pi pi-envelope"),
    icon("Home", "pi pi-home"),
    icon("Cog", "pi pi-cog"),
    icon("Bell", "pi pi-bell"),
    icon("Globe", "pi pi-globe"),
    icon("Shield", "pi pi-shield"),
    icon("Trophy", "pi pi-trophy"),
    icon("Flag", "pi pi-flag"),
    icon("Image", "pi pi-image"),
    icon("File", "pi pi-file"),
    icon("Chart Line", "pi pi-chart-line"),
    icon("Shopping Cart", "pi pi-shopping-cart"),
    icon("Gift", "pi pi-gift"),
    icon("Sun", "pi pi-sun"),
    icon("Moon", "pi pi-moon"),
];

pub fn icon_by_class(class: &str) -> Option<&'static IconOption> {
    ICON_OPTIONS.iter().find(|i| i.class == class)
}

/// Icon used for cards whose stored class is unknown.
pub fn default_icon() -> &'static IconOption {
    &ICON_OPTIONS[0]
}
