use glam::Vec3;

// Shared scene, material and camera tuning constants.

// Categorical community palette (cyclic by id)
pub const PALETTE: [u32; 12] = [
    0x1f77b4, 0xff7f0e, 0x2ca02c, 0xd62728, 0x9467bd, 0x8c564b, 0xe377c2, 0x7f7f7f, 0xbcbd22,
    0x17becf, 0xaec7e8, 0xffbb78,
];

// Starfield
pub const STAR_COUNT: usize = 3000;
pub const STAR_RADIUS_MIN: f32 = 80.0;
pub const STAR_RADIUS_MAX: f32 = 260.0;
pub const STAR_BRIGHTNESS_MIN: f32 = 0.4;
pub const STAR_BRIGHTNESS_MAX: f32 = 0.9;
pub const STAR_POINT_SIZE: f32 = 0.4;

// Raw edges
pub const EDGE_COLOR: u32 = 0x5588aa;

// Location nodes
pub const NODE_SEGMENTS: u32 = 16;
pub const NODE_METALNESS: f32 = 0.2;
pub const NODE_ROUGHNESS: f32 = 0.7;
pub const NODE_OPACITY: f32 = 0.7;

// Community representatives
pub const CORE_SEGMENTS: u32 = 24;
pub const CORE_METALNESS: f32 = 0.1;
pub const CORE_ROUGHNESS: f32 = 0.3;
pub const GLOW_SEGMENTS: u32 = 20;
pub const GLOW_SCALE: f32 = 1.3; // glow shell radius relative to the core
pub const GLOW_OPACITY: f32 = 0.2;

// Labels
pub const LABEL_LIFT: f32 = 0.8; // gap between core top and label centre
pub const LABEL_WIDTH: f32 = 1.5;
pub const LABEL_HEIGHT: f32 = 0.75;
pub const LABEL_OPACITY: f32 = 0.85;

// Connection beams
pub const BEAM_RADIUS_PER_MEMBER: f32 = 0.0003;
pub const BEAM_RADIAL_SEGMENTS: u32 = 12;

// Emissive intensity compensation
pub const LUMINANCE_FLOOR: f32 = 0.12;
pub const INTENSITY_MAX: f32 = 6.0;
pub const NODE_EMISSIVE_BASE: f32 = 0.6;
pub const CORE_EMISSIVE_BASE: f32 = 1.2;

// Picking thresholds for lines and points (world units)
pub const LINE_PICK_THRESHOLD: f32 = 1.0;
pub const POINT_PICK_THRESHOLD: f32 = 1.0;

// Camera
pub const CAMERA_FOVY_DEGREES: f32 = 55.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_START: Vec3 = Vec3::new(35.0, 35.0, 35.0);
pub const CAMERA_DAMPING: f32 = 0.05;
pub const CAMERA_MIN_DISTANCE: f32 = 10.0;
pub const CAMERA_MAX_DISTANCE: f32 = 150.0;
pub const AUTO_ROTATE_SPEED: f32 = 0.4; // 2.0 is one orbit per 30 s
pub const ZOOM_STEP: f32 = 0.95;

// Lighting and atmosphere
pub const AMBIENT_COLOR: u32 = 0x505060;
pub const AMBIENT_INTENSITY: f32 = 0.6;
pub const KEY_LIGHT_COLOR: u32 = 0x4488ff;
pub const KEY_LIGHT_POSITION: Vec3 = Vec3::new(25.0, 25.0, 25.0);
pub const FILL_LIGHT_COLOR: u32 = 0x8844ff;
pub const FILL_LIGHT_POSITION: Vec3 = Vec3::new(-25.0, -25.0, -25.0);
pub const POINT_LIGHT_INTENSITY: f32 = 0.8;
pub const POINT_LIGHT_RANGE: f32 = 100.0;
pub const FOG_COLOR: u32 = 0x0a0a15;
pub const FOG_DENSITY: f32 = 0.002;

// Post-processing
pub const BLOOM_RADIUS: f32 = 0.4;
pub const BLOOM_THRESHOLD: f32 = 0.0;
pub const TONE_MAPPING_EXPOSURE: f32 = 0.7;
