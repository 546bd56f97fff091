use aqi_dashboard::app::AqiDashboardApp;
use aqi_dashboard::config::Config;
use eframe::egui;

fn main() -> eframe::Result {
    let (config, warnings) = Config::load();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();
    for warning in &warnings {
        log::warn!("config: {warning}");
    }
    log::debug!("starting with {config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "AQI Market Intelligence Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(AqiDashboardApp::new(config)))),
    )
}
