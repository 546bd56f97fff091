use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use eframe::egui::{self, Align, ColorImage, Rect, ScrollArea};

use crate::config::Config;
use crate::error::ExportError;
use crate::export::{self, pdf, table, ExportFormat};
use crate::state::{Action, DashboardState};
use crate::ui::panels::{self, Status};
use crate::ui::table::region_table;
use crate::ui::{detail, overview, plot};

/// Frames spent scrolling the metric cards into view before giving up.
const SCROLL_FRAMES: u32 = 3;
/// Frames to wait for the backend to deliver a requested screenshot.
const SCREENSHOT_TIMEOUT_FRAMES: u32 = 5;

// ---------------------------------------------------------------------------
// PDF export: scroll → screenshot → write
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
enum PdfStage {
    /// Scrolling the metric cards into view.
    Scrolling { frames: u32 },
    /// Screenshot requested; cropped to `region` when it arrives.
    AwaitingScreenshot { region: Rect, frames: u32 },
}

/// PDF export spanning several frames.
#[derive(Debug)]
struct PendingPdf {
    path: PathBuf,
    title: String,
    stage: PdfStage,
}

/// The part of the screen to rasterise. The cards must be fully visible
/// inside the scroll viewport, otherwise the PDF would be truncated.
fn crop_region(detail: Rect, viewport: Rect) -> Result<Rect, ExportError> {
    let visible = detail.intersect(viewport);
    let tolerance = 0.5;
    if !visible.is_positive()
        || visible.width() + tolerance < detail.width()
        || visible.height() + tolerance < detail.height()
    {
        return Err(ExportError::DetailClipped);
    }
    Ok(visible)
}

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct AqiDashboardApp {
    pub state: DashboardState,
    config: Config,
    status: Option<Status>,
    /// Where the metric cards were drawn last frame.
    detail_rect: Option<Rect>,
    /// Visible part of the central scroll area last frame.
    viewport: Option<Rect>,
    pending_pdf: Option<PendingPdf>,
}

impl AqiDashboardApp {
    pub fn new(config: Config) -> Self {
        Self {
            state: DashboardState::new(config.default_filters.clone()),
            config,
            status: None,
            detail_rect: None,
            viewport: None,
            pending_pdf: None,
        }
    }

    fn apply(&mut self, actions: Vec<Action>) {
        for action in actions {
            self.state = std::mem::take(&mut self.state).reduce(action);
        }
    }

    fn report(&mut self, result: anyhow::Result<String>) {
        self.status = Some(match result {
            Ok(msg) => {
                log::info!("{msg}");
                Status::Info(msg)
            }
            Err(e) => {
                log::error!("Export failed: {e:#}");
                Status::Error(format!("Export failed: {e:#}"))
            }
        });
    }

    fn report_pdf_error(&mut self, pending: &PendingPdf, error: ExportError) {
        let result = Err(error).with_context(|| format!("PDF export to {}", pending.path.display()));
        self.report(result);
    }

    fn start_export(&mut self, format: ExportFormat) {
        let Some(path) = export::save_dialog(format, self.config.export_dir.as_deref()) else {
            log::debug!("{} export cancelled", format.label());
            return;
        };

        let view = self.state.view();
        let written = match format {
            ExportFormat::Csv => export::write_file(&path, |w| table::export_csv(view, w)),
            ExportFormat::Json => export::write_file(&path, |w| table::export_json(view, w)),
            ExportFormat::Pdf => {
                self.request_pdf(path);
                return;
            }
        };
        let result = written
            .map(|n| format!("Exported {n} regions to {}", path.display()))
            .with_context(|| format!("{} export to {}", format.label(), path.display()));
        self.report(result);
    }

    /// Rasterisation happens over later frames: the cards are scrolled into
    /// view first, then a screenshot is requested.
    fn request_pdf(&mut self, path: PathBuf) {
        let Some(record) = self.state.selected_record() else {
            self.report(Err(anyhow::anyhow!("no region selected")));
            return;
        };
        log::debug!("PDF export of {} requested", record.id);
        self.pending_pdf = Some(PendingPdf {
            path,
            title: format!("Metrics for {}", record.name),
            stage: PdfStage::Scrolling { frames: 0 },
        });
    }

    /// Runs after the frame is laid out. Returns true when a screenshot
    /// should be requested from the backend.
    fn scroll_step(&mut self) -> bool {
        let Some(mut pending) = self.pending_pdf.take() else {
            return false;
        };
        let PdfStage::Scrolling { frames } = pending.stage else {
            self.pending_pdf = Some(pending);
            return false;
        };

        let region = match (self.detail_rect, self.viewport) {
            (Some(detail), Some(viewport)) => crop_region(detail, viewport),
            _ => Err(ExportError::DetailClipped),
        };
        match region {
            Ok(region) => {
                pending.stage = PdfStage::AwaitingScreenshot { region, frames: 0 };
                self.pending_pdf = Some(pending);
                true
            }
            Err(_) if frames < SCROLL_FRAMES => {
                pending.stage = PdfStage::Scrolling { frames: frames + 1 };
                self.pending_pdf = Some(pending);
                false
            }
            Err(e) => {
                self.report_pdf_error(&pending, e);
                false
            }
        }
    }

    /// Runs at the start of a frame with any screenshot the backend delivered.
    fn screenshot_step(&mut self, screenshot: Option<&ColorImage>, pixels_per_point: f32) {
        let Some(mut pending) = self.pending_pdf.take() else {
            return;
        };
        let PdfStage::AwaitingScreenshot { region, frames } = pending.stage else {
            self.pending_pdf = Some(pending);
            return;
        };

        match screenshot {
            Some(image) => self.finish_pdf(image, region, pixels_per_point, pending),
            None if frames < SCREENSHOT_TIMEOUT_FRAMES => {
                pending.stage = PdfStage::AwaitingScreenshot {
                    region,
                    frames: frames + 1,
                };
                self.pending_pdf = Some(pending);
            }
            None => {
                log::warn!("screenshot never arrived for {}", pending.path.display());
                self.report_pdf_error(
                    &pending,
                    ExportError::ScreenshotTimeout {
                        frames: SCREENSHOT_TIMEOUT_FRAMES,
                    },
                );
            }
        }
    }

    fn finish_pdf(
        &mut self,
        screenshot: &ColorImage,
        region: Rect,
        pixels_per_point: f32,
        pending: PendingPdf,
    ) {
        let snapshot = if region.is_positive() {
            pdf::to_rgb(&screenshot.region(&region, Some(pixels_per_point)))
        } else {
            Err(ExportError::EmptySnapshot)
        };
        let result = snapshot
            .and_then(|rgb| {
                export::write_file(&pending.path, |w| pdf::export_pdf(&rgb, &pending.title, w))
            })
            .map(|()| format!("Saved {} to {}", pending.title, pending.path.display()))
            .with_context(|| format!("PDF export to {}", pending.path.display()));
        self.report(result);
    }

    fn scrolling_to_detail(&self) -> bool {
        matches!(
            self.pending_pdf,
            Some(PendingPdf {
                stage: PdfStage::Scrolling { .. },
                ..
            })
        )
    }

    fn take_screenshot(ctx: &egui::Context) -> Option<Arc<ColorImage>> {
        ctx.input(|i| {
            i.raw.events.iter().find_map(|event| match event {
                egui::Event::Screenshot { image, .. } => Some(Arc::clone(image)),
                _ => None,
            })
        })
    }
}

impl eframe::App for AqiDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let screenshot = Self::take_screenshot(ctx);
        self.screenshot_step(screenshot.as_deref(), ctx.pixels_per_point());

        let mut actions = Vec::new();
        let mut export_request = None;

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            export_request = panels::top_bar(ui, &self.state, self.status.as_ref());
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &self.state, &mut actions);
            });

        // ---- Central panel: overview, table, metrics ----
        let scroll_to_detail = self.scrolling_to_detail();
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.heading("Market Intelligence Dashboard");
                    ui.separator();
                    overview::region_grid(ui, &self.state, &mut actions);
                    ui.separator();
                    plot::aqi_chart(ui, &self.state);
                    ui.separator();
                    region_table(ui, &self.state, &mut actions);
                    ui.separator();
                    self.detail_rect = detail::metrics(ui, &self.state);
                    self.viewport = Some(ui.clip_rect());
                    if let (true, Some(rect)) = (scroll_to_detail, self.detail_rect) {
                        ui.scroll_to_rect(rect, Some(Align::TOP));
                    }
                });
        });

        if self.scroll_step() {
            ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));
        }
        if self.pending_pdf.is_some() {
            ctx.request_repaint();
        }

        if !actions.is_empty() {
            self.apply(actions);
        }
        if let Some(format) = export_request {
            self.start_export(format);
        }
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::{pos2, Color32};

    use super::*;

    fn app() -> AqiDashboardApp {
        AqiDashboardApp::new(Config::default())
    }

    fn temp_pdf(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("aqi-dashboard-{}-{name}.pdf", std::process::id()))
    }

    fn awaiting(path: PathBuf, region: Rect) -> PendingPdf {
        PendingPdf {
            path,
            title: "Metrics for Delhi".to_string(),
            stage: PdfStage::AwaitingScreenshot { region, frames: 0 },
        }
    }

    fn rect(x0: f32, y0: f32, x1: f32, y1: f32) -> Rect {
        Rect::from_min_max(pos2(x0, y0), pos2(x1, y1))
    }

    #[test]
    fn failed_export_is_reported_and_app_stays_usable() {
        let mut app = app();
        app.report(Err(anyhow::anyhow!("disk full")));
        assert!(matches!(&app.status, Some(Status::Error(msg)) if msg.contains("disk full")));

        let before = app.state.view().len();
        app.apply(vec![Action::SetAqiMin(250)]);
        assert_ne!(app.state.view().len(), before);
        assert_eq!(app.state.view().len(), 1);
    }

    #[test]
    fn empty_region_pdf_reports_error() {
        let mut app = app();
        app.apply(vec![Action::Select("DL".to_string())]);
        let image = ColorImage::new([10, 10], Color32::WHITE);
        let pending = awaiting(temp_pdf("empty"), Rect::NOTHING);
        app.finish_pdf(&image, Rect::NOTHING, 1.0, pending);

        assert!(matches!(app.status, Some(Status::Error(_))));
        assert!(app.pending_pdf.is_none());
        app.apply(vec![Action::ClearSelection]);
        assert!(app.state.selected_record().is_none());
    }

    #[test]
    fn screenshot_writes_pdf() {
        let mut app = app();
        let path = temp_pdf("ok");
        let region = rect(2.0, 2.0, 8.0, 6.0);
        app.pending_pdf = Some(awaiting(path.clone(), region));

        let image = ColorImage::new([10, 10], Color32::LIGHT_BLUE);
        app.screenshot_step(Some(&image), 1.0);

        assert!(app.pending_pdf.is_none());
        assert!(matches!(app.status, Some(Status::Info(_))));
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_screenshot_times_out() {
        let mut app = app();
        app.pending_pdf = Some(awaiting(temp_pdf("timeout"), rect(0.0, 0.0, 5.0, 5.0)));

        for _ in 0..SCREENSHOT_TIMEOUT_FRAMES {
            app.screenshot_step(None, 1.0);
            assert!(app.pending_pdf.is_some());
            assert!(app.status.is_none());
        }
        app.screenshot_step(None, 1.0);
        assert!(app.pending_pdf.is_none());
        assert!(matches!(&app.status, Some(Status::Error(msg)) if msg.contains("screenshot")));
    }

    #[test]
    fn crop_requires_fully_visible_cards() {
        let viewport = rect(0.0, 30.0, 1000.0, 860.0);
        let inside = rect(10.0, 400.0, 900.0, 600.0);
        assert_eq!(crop_region(inside, viewport).unwrap(), inside);

        // Cards running off the bottom of the window.
        let cut_off = rect(10.0, 760.0, 900.0, 960.0);
        assert!(matches!(
            crop_region(cut_off, viewport),
            Err(ExportError::DetailClipped)
        ));

        // Scrolled partly under the top bar.
        let under_top_bar = rect(10.0, 0.0, 900.0, 200.0);
        assert!(crop_region(under_top_bar, viewport).is_err());
    }

    #[test]
    fn scrolling_hands_over_to_screenshot_once_visible() {
        let mut app = app();
        app.apply(vec![Action::Select("DL".to_string())]);
        app.request_pdf(temp_pdf("scroll"));
        app.viewport = Some(rect(0.0, 30.0, 1000.0, 860.0));

        app.detail_rect = Some(rect(10.0, 760.0, 900.0, 960.0));
        assert!(!app.scroll_step());
        assert!(app.scrolling_to_detail());

        app.detail_rect = Some(rect(10.0, 30.0, 900.0, 230.0));
        assert!(app.scroll_step());
        assert!(matches!(
            app.pending_pdf.as_ref().map(|p| p.stage),
            Some(PdfStage::AwaitingScreenshot { .. })
        ));
    }

    #[test]
    fn cards_that_never_fit_abort_the_export() {
        let mut app = app();
        app.apply(vec![Action::Select("DL".to_string())]);
        app.request_pdf(temp_pdf("never"));
        app.viewport = Some(rect(0.0, 30.0, 1000.0, 200.0));
        app.detail_rect = Some(rect(10.0, 30.0, 900.0, 400.0));

        for _ in 0..SCROLL_FRAMES {
            assert!(!app.scroll_step());
            assert!(app.pending_pdf.is_some());
        }
        assert!(!app.scroll_step());
        assert!(app.pending_pdf.is_none());
        assert!(matches!(&app.status, Some(Status::Error(msg)) if msg.contains("does not fit")));
    }

    #[test]
    fn pdf_without_selection_is_refused() {
        let mut app = app();
        app.request_pdf(temp_pdf("none"));
        assert!(app.pending_pdf.is_none());
        assert!(matches!(app.status, Some(Status::Error(_))));
    }
}
