mod builder;
mod component;
mod config;
mod error;
mod legend;
mod loader;
mod popup;
mod render;
mod report;
mod state;
mod style;
mod types;

pub use component::SocialGraphCanvas;
