mod camera;
mod component;
mod config;
mod edges;
mod error;
mod field;
mod frame_loop;
mod interaction;
mod markup;
mod render;
mod special;
mod state;
mod types;

pub use component::NetworkField;
pub use config::NetworkConfig;
pub use types::SpecialNodeConfig;
