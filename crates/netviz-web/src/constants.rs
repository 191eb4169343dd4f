// Page wiring and presentation constants for the web front-end

pub const DATA_URL: &str = "/data/network_data.json";
pub const HTTP_ERROR_HINT: &str = "Make sure server is running from project root.";

pub const CANVAS_ID: &str = "app-canvas";

// Loading overlay
pub const LOADING_ID: &str = "loading";
pub const LOADING_TEXT_ID: &str = "loadingText";

// Control panel
pub const PANEL_ID: &str = "panel";
pub const PANEL_TOGGLE_ID: &str = "panelToggle";
pub const PANEL_OPEN_CLASS: &str = "open";
pub const PANEL_TOGGLE_OPEN: &str = "✕";
pub const PANEL_TOGGLE_CLOSED: &str = "⚙";
pub const RESET_BUTTON_ID: &str = "resetBtn";

// Stats: header and panel copies
pub const STAT_COMMUNITIES_IDS: [&str; 2] = ["communityCount", "pComm"];
pub const STAT_LOCATIONS_IDS: [&str; 2] = ["locationCount", "pLoc"];
pub const STAT_EDGES_IDS: [&str; 2] = ["edgeCount", "pEdge"];

pub const TOOLTIP_ID: &str = "tooltip";
pub const TOOLTIP_OFFSET_PX: f64 = 15.0;

// Backing store is CSS size times devicePixelRatio, capped
pub const MAX_PIXEL_RATIO: f64 = 2.0;

// Label sprites are rasterised on a small 2D canvas
pub const LABEL_CANVAS_WIDTH: u32 = 64;
pub const LABEL_CANVAS_HEIGHT: u32 = 32;
pub const LABEL_FONT: &str = "Bold 20px Arial";
pub const LABEL_BASELINE_Y: f64 = 22.0;

// Node gradient map
pub const GRADIENT_SIZE: u32 = 128;

// Post chain
pub const BLOOM_DOWNSCALE: u32 = 2;

// Longest step fed to camera damping and auto-rotate, e.g. after a hidden tab
pub const MAX_FRAME_DT_SEC: f32 = 0.1;
