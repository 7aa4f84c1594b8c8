use std::io;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use keepsultan::{App, AppConfig, AssetLoader};

#[derive(Parser, Debug)]
#[command(name = "keepsultan", version, about = "Render an activity-summary card")]
struct Cli {
    /// Config JSON; a missing file means all defaults.
    #[arg(short = 'c', long, default_value = "config.json")]
    config: PathBuf,

    /// Output image path. The format follows the extension.
    #[arg(short = 's', long, default_value = "output/save.png")]
    save: PathBuf,

    /// Template image path or URL.
    #[arg(long)]
    template: Option<String>,

    /// Route map image path or URL.
    #[arg(long)]
    map: Option<String>,

    /// Avatar image path or URL.
    #[arg(long)]
    avatar: Option<String>,

    #[arg(long)]
    username: Option<String>,

    /// Date text, e.g. 2024/03/09, or `today`.
    #[arg(long)]
    date: Option<String>,

    /// End time as HH:MM or HH:MM:SS, or `now`.
    #[arg(long)]
    end_time: Option<String>,

    /// Seed for reproducible metrics. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Directory for downloaded remote images.
    #[arg(long, default_value = keepsultan::assets::cache::DEFAULT_CACHE_DIR)]
    cache_dir: PathBuf,

    /// Also write the merged config (overrides applied) to this path.
    #[arg(long, value_name = "PATH")]
    write_config: Option<PathBuf>,
}

impl Cli {
    fn apply_overrides(&self, cfg: &mut AppConfig) {
        let overrides = [
            (&self.template, &mut cfg.template),
            (&self.map, &mut cfg.map),
            (&self.avatar, &mut cfg.avatar),
            (&self.username, &mut cfg.username),
            (&self.date, &mut cfg.date),
            (&self.end_time, &mut cfg.end_time),
        ];
        for (value, slot) in overrides {
            if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
                *slot = v.to_string();
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let mut cfg = AppConfig::from_path(&cli.config)
        .with_context(|| format!("load config '{}'", cli.config.display()))?;
    cli.apply_overrides(&mut cfg);

    if let Some(path) = &cli.write_config {
        cfg.write_json(path)
            .with_context(|| format!("write config '{}'", path.display()))?;
        tracing::info!(path = %path.display(), "wrote merged config");
    }

    let seed = cli.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, "seeding metrics");

    let loader = AssetLoader::new(&cli.cache_dir)
        .with_context(|| format!("create cache dir '{}'", cli.cache_dir.display()))?;
    let mut app = App::with_rng(cfg, loader, seed);
    app.process().context("render card")?;
    app.save(&cli.save)
        .with_context(|| format!("save '{}'", cli.save.display()))?;

    Ok(())
}
