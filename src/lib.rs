pub mod api;
pub mod app;
pub mod breakpoint;
pub mod cache;
pub mod components;
pub mod config;
pub mod episode;
pub mod format;
pub mod media;
pub mod pages;
pub mod queue;
pub mod store;
