use std::path::Path;

use image::RgbaImage;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::assets::AssetLoader;
use crate::compose::{Compositor, make_circular_avatar, resize_keep_alpha};
use crate::config::{AppConfig, StyleRole};
use crate::foundation::error::{KeepError, KeepResult};
use crate::metrics::{self, Clock, RenderData, SystemClock};

pub const AVATAR_SIZE: (u32, u32) = (103, 103);
pub const AVATAR_POS: (i32, i32) = (52, 323);
pub const MAP_SIZE: (u32, u32) = (1156, 945);
pub const MAP_POS: (i32, i32) = (50, 862);
/// Location shown in the summary line.
pub const LOCATION: &str = "北京市";

/// One string placed on the card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextLayer {
    pub text: String,
    pub at: (i32, i32),
    pub role: StyleRole,
}

impl TextLayer {
    fn new(text: impl Into<String>, at: (i32, i32), role: StyleRole) -> Self {
        Self {
            text: text.into(),
            at,
            role,
        }
    }
}

/// Every text layer of the card, in draw order.
pub fn text_layers(data: &RenderData) -> Vec<TextLayer> {
    vec![
        TextLayer::new(data.battery.to_string(), (1127, 52), StyleRole::Battery),
        TextLayer::new(data.clock(), (61, 45), StyleRole::Clock),
        TextLayer::new(data.username.as_str(), (182, 323), StyleRole::Username),
        TextLayer::new(data.summary_line(LOCATION), (182, 383), StyleRole::Regular),
        TextLayer::new(data.total_km_text(), (65, 595), StyleRole::BoldBig),
        TextLayer::new(data.sport_time.as_str(), (65, 2069), StyleRole::Semibold),
        TextLayer::new(data.pace.as_str(), (522, 2069), StyleRole::Semibold),
        TextLayer::new(data.cost.to_string(), (957, 2069), StyleRole::Semibold),
        TextLayer::new(data.total_time.as_str(), (65, 2270), StyleRole::Semibold),
        TextLayer::new(data.exercise_load.to_string(), (522, 2270), StyleRole::Semibold),
        TextLayer::new(data.cumulative_climb.to_string(), (957, 2270), StyleRole::Semibold),
        TextLayer::new(data.average_cadence.to_string(), (65, 2471), StyleRole::Semibold),
        TextLayer::new(data.average_power.to_string(), (522, 2471), StyleRole::Semibold),
        TextLayer::new(data.stride.as_str(), (957, 2471), StyleRole::Semibold),
    ]
}

/// Runs one render: template, avatar, map, sampled metrics and text, in that order.
pub struct App {
    cfg: AppConfig,
    loader: AssetLoader,
    compositor: Compositor,
    rng: StdRng,
    clock: Box<dyn Clock>,
    data: Option<RenderData>,
}

impl App {
    /// App seeded from OS entropy.
    pub fn new(cfg: AppConfig, loader: AssetLoader) -> Self {
        Self::from_parts(cfg, loader, StdRng::from_entropy())
    }

    /// App whose sampled metrics are reproducible from `seed`.
    pub fn with_rng(cfg: AppConfig, loader: AssetLoader, seed: u64) -> Self {
        Self::from_parts(cfg, loader, StdRng::seed_from_u64(seed))
    }

    fn from_parts(cfg: AppConfig, loader: AssetLoader, rng: StdRng) -> Self {
        Self {
            cfg,
            loader,
            compositor: Compositor::new(),
            rng,
            clock: Box::new(SystemClock),
            data: None,
        }
    }

    /// Replace the wall clock used for the `today`/`now` sentinels.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Configuration this app renders.
    pub fn config(&self) -> &AppConfig {
        &self.cfg
    }

    /// Metrics drawn by the last successful [`App::process`].
    pub fn render_data(&self) -> Option<&RenderData> {
        self.data.as_ref()
    }

    /// Render the card and return the canvas with the metrics drawn on it.
    #[tracing::instrument(skip(self), fields(template = %self.cfg.template))]
    pub fn process(&mut self) -> KeepResult<(&RgbaImage, &RenderData)> {
        self.data = None;

        let template = self.loader.load(&self.cfg.template)?;
        self.compositor.load_base(&template);

        if !self.cfg.avatar.is_empty() {
            let avatar = self.loader.load(&self.cfg.avatar)?;
            let avatar = make_circular_avatar(&avatar, AVATAR_SIZE);
            self.compositor.paste(&avatar, AVATAR_POS)?;
        }

        if !self.cfg.map.is_empty() {
            let map = self.loader.load(&self.cfg.map)?;
            let map = resize_keep_alpha(&map, MAP_SIZE);
            self.compositor.paste(&map, MAP_POS)?;
        }

        let data = metrics::generate(&self.cfg, &mut self.rng, self.clock.as_ref())?;
        for layer in text_layers(&data) {
            let style = self.cfg.styles.get(layer.role);
            self.compositor.draw_text(&layer.text, layer.at, style, None)?;
        }

        let data = self.data.insert(data);
        Ok((self.compositor.canvas()?, data))
    }

    /// Write the rendered card; the format follows the extension of `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> KeepResult<()> {
        if self.data.is_none() {
            return Err(KeepError::state("nothing rendered yet"));
        }
        self.compositor.save(path)
    }
}

#[cfg(test)]
#[path = "../tests/unit/app.rs"]
mod tests;
