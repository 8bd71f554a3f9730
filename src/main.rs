use anyhow::{anyhow, Context};
use eframe::egui;
use scribble_pad::draw::storage::FileSlotStorage;
use scribble_pad::draw::{DrawSession, PersistenceBridge, SessionOptions};
use scribble_pad::gui::ScribbleApp;
use scribble_pad::logging;
use scribble_pad::settings::{resolve_settings_path, Settings};

fn main() -> anyhow::Result<()> {
    let settings_path = resolve_settings_path()?;
    let settings = Settings::load(&settings_path.to_string_lossy())?;
    logging::init(settings.debug_logging, settings.log_file_path());
    tracing::info!(settings = %settings_path.display(), "starting scribble pad");

    let storage = FileSlotStorage::open(settings.storage_dir.as_deref())?;
    tracing::debug!(dir = %storage.dir().display(), "using drawing storage");
    let mut bridge = PersistenceBridge::new(storage);
    let store = bridge
        .load(settings.corrupt_slot_policy)
        .context("restore saved drawing")?;

    let mut session = DrawSession::new(
        store,
        SessionOptions {
            color: settings.default_color(),
            legacy_inert_actions: settings.legacy_inert_actions,
            ..SessionOptions::default()
        },
    );
    session.subscribe(Box::new(bridge));

    let (width, height) = settings.window_size.unwrap_or((1024.0, 768.0));
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Scribble Pad")
            .with_inner_size([width, height])
            .with_min_inner_size([320.0, 240.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Scribble Pad",
        native_options,
        Box::new(move |_cc| Box::new(ScribbleApp::new(session, settings))),
    )
    .map_err(|e| anyhow!("run drawing window: {e}"))
}
