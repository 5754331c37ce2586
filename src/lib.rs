pub mod assets;
pub mod camera;
pub mod cli;
pub mod clock;
pub mod font;
pub mod frame;
pub mod geometry;
pub mod material;
pub mod panel;
pub mod renderer;
pub mod scene;
pub mod state;
pub mod text;
pub mod tween;
