use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;

use text_viewer::app::TextViewerApp;
use text_viewer::cli::{init_logging, Cli};
use text_viewer_core::{Application, ApplicationFlags, APPLICATION_ID, APPLICATION_NAME};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level());

    let application = Application::new(APPLICATION_ID, ApplicationFlags::default())
        .context("failed to create application")?;
    tracing::info!(id = application.id(), flags = ?application.flags(), "starting");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 600.0])
            .with_min_inner_size([360.0, 240.0])
            .with_title(APPLICATION_NAME)
            .with_app_id(APPLICATION_ID),
        ..Default::default()
    };

    let initial_file = cli.file;
    eframe::run_native(
        APPLICATION_NAME,
        options,
        Box::new(move |cc| Ok(Box::new(TextViewerApp::new(cc, application, initial_file)))),
    )
    .map_err(|e| anyhow::anyhow!("event loop failed: {e}"))
}
