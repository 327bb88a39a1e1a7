// DOM element ids the host page must provide
pub const CANVAS_ID: &str = "app-canvas";
pub const MENU_BUTTON_ID: &str = "menu-button";
pub const OVERLAY_ID: &str = "glass-overlay";
pub const CATALOG_LIST_ID: &str = "catalog-list";
pub const TITLE_ID: &str = "card-title";
pub const CURSOR_ID: &str = "cursor";
pub const CONFIG_SCRIPT_ID: &str = "card-config";

// CSS classes toggled on overlay elements
pub const OVERLAY_OPEN_CLASS: &str = "open";
pub const CURSOR_HOVER_CLASS: &str = "hovering";

// Attribute carrying the catalog id on each list entry
pub const CATALOG_ID_ATTR: &str = "data-content-id";

// Background behind the card
pub const CLEAR_COLOR: [f64; 4] = [0.0, 0.0, 0.0, 1.0];
