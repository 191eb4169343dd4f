pub mod backend;
pub mod builder;
pub mod camera;
pub mod constants;
pub mod dataset;
pub mod geometry;
pub mod palette;
pub mod params;
pub mod pick;
pub mod registry;
pub mod restyle;
pub mod starfield;
pub mod viewer;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");

pub use backend::{PrimitiveDesc, PrimitiveHandle, RenderBackend, RenderError};
pub use builder::SceneBuilder;
pub use camera::OrbitCamera;
pub use dataset::{DataError, Dataset, DatasetStats, NetworkFile};
pub use params::{DisplayState, ParamChange, ParamField, ParamValue, RebuildScope, VisualParams};
pub use pick::{PickController, Picked, Ray, Tooltip};
pub use registry::{PrimitiveRegistry, PrimitiveTag};
pub use restyle::{restyle, RestyleReport};
pub use viewer::{ControlSurface, Viewer};
