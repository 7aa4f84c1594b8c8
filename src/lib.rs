#![forbid(unsafe_code)]
//! Activity-summary card compositor.
//!
//! A render loads a template, pastes a circular avatar and a route map onto it, samples a
//! plausible set of workout metrics from configured ranges and draws them as text at fixed
//! positions.

pub mod app;
pub mod assets;
pub mod compose;
pub mod config;
pub mod foundation;
pub mod metrics;

pub use app::App;
pub use assets::AssetLoader;
pub use compose::{Anchor, Compositor};
pub use config::{AppConfig, NumberRange, Sampled, StyleRole, TextStyle, TextStyles, TimeRange};
pub use foundation::error::{KeepError, KeepResult};
pub use metrics::{Clock, FixedClock, RenderData, SystemClock};
