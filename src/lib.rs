pub mod app;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod event;
pub mod identity;
pub mod logging;
pub mod model;
pub mod orchestrator;
pub mod paths;
pub mod profile;
pub mod resolver;
pub mod view;
pub mod wrapper;
