//! Dashboard state, async services and text rendering for Skycast.

pub mod dashboard;
pub mod model;
pub mod render;
pub mod service;

pub use dashboard::Dashboard;
pub use model::DashboardModel;
pub use render::{render, DashboardView, RenderOptions};
pub use service::{request_fetch, request_locate, WeatherServiceMessage};
