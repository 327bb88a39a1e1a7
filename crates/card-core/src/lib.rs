pub mod animation;
pub mod camera;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod interaction;
pub mod pointer;
pub mod scene;
pub mod smoothing;
pub mod timeline;

pub use animation::*;
pub use camera::*;
pub use catalog::*;
pub use config::*;
pub use constants::*;
pub use error::*;
pub use interaction::*;
pub use pointer::*;
pub use scene::*;
pub use smoothing::*;
pub use timeline::*;

// Card material shader, shared with the renderer
pub static CARD_WGSL: &str = include_str!("../shaders/card.wgsl");
