pub mod animation;
pub mod camera;
pub mod path;
