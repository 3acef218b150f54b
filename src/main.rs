mod config;
mod ops;
mod player;
mod types;
mod ui;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use eframe::egui;
use log::LevelFilter;

use crate::config::Settings;
use crate::player::controller::PlaybackController;
use crate::player::gst_player::GstPlayer;
use crate::ui::app::ChapterPlayerApp;

#[derive(Parser)]
#[command(version, about = "Video player with a chapter timeline")]
struct Cli {
    /// Config file (default: <config dir>/chapterplay/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Play this URI instead of the configured one
    #[arg(short, long)]
    uri: Option<String>,

    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

fn init_logger(level: LevelFilter) -> anyhow::Result<()> {
    fern::Dispatch::new()
        .level(LevelFilter::Warn)
        .level_for(config::PROGNAME, level)
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message
            ))
        })
        .chain(std::io::stderr())
        .apply()
        .context("installing the logger")?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger(cli.log_level)?;

    let mut settings =
        Settings::load_or_default(cli.config.as_deref()).context("loading configuration")?;
    if let Some(uri) = cli.uri {
        settings.video_uri = uri;
    }

    // A player that fails to open leaves the widget up with every control inert
    let player = match GstPlayer::new(&settings.video_uri) {
        Ok(player) => Some(player),
        Err(e) => {
            log::error!("Could not open {}: {}", settings.video_uri, e);
            None
        }
    };
    let controller = PlaybackController::new(player, settings.chapters, settings.timeline_seek);
    let app = ChapterPlayerApp::new(controller, settings.tick_interval);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Chapter Player")
            .with_inner_size([settings.window.width, settings.window.height]),
        ..Default::default()
    };
    eframe::run_native(
        "Chapter Player",
        native_options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("running the player window: {e}"))?;
    Ok(())
}
