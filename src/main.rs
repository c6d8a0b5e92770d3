use anyhow::Context;
use clap::Parser;
use eframe::egui;

use life_exp_viewer::app::LifeExpApp;
use life_exp_viewer::config::Args;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = args.source_config();
    log::info!(
        "life expectancy source: {}, country codes source: {}",
        config.life_exp,
        config.country_codes
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Life Exp",
        options,
        Box::new(|_cc| Ok(Box::new(LifeExpApp::new(config)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
    .context("running the viewer window")
}
