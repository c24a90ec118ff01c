//! Desktop GUI: image selection, instruction entry, parameter controls,
//! and a preview of the edited result.
//!
//! The edit itself runs on a background tokio task so the UI stays
//! responsive; a busy flag keeps at most one request in flight and the
//! completion (success or typed failure) is delivered back to the UI
//! thread over a channel before a new request can start.

use std::path::PathBuf;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::sync::Arc;
use std::time::Duration;

use eframe::egui::{
    self, Button, Color32, ColorImage, RichText, Slider, TextEdit, TextureHandle, TextureOptions,
};

use crate::backend::parse_backend;
use crate::cli::Cli;
use crate::config::{self, Config};
use crate::context::ServiceContext;
use crate::error::EditError;
use crate::output;
use crate::params;
use crate::session::{self, EditOutcome, EditSession};

/// Side of the fixed square preview area, in points.
const PREVIEW_SIZE: f32 = 300.0;

/// Start the GUI and block until the window is closed.
///
/// # Errors
///
/// Returns an error if the configuration or pipeline context cannot be
/// built, or if the native window fails to start.
pub fn run(cli: &Cli) -> Result<(), EditError> {
    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path).map_err(EditError::Config)?;
    let backend = parse_backend(&cli.backend).map_err(EditError::InvalidArgument)?;

    let (service, recording_session) = ServiceContext::from_env(backend, &config)?;
    let service = Arc::new(service);

    let app = RetouchApp {
        session: cli.session(),
        service: Arc::clone(&service),
        output_path: output::resolve_output_path(cli.output.as_deref()),
        busy: false,
        status: None,
        source_texture: None,
        source_preview_pending: cli.image.is_some(),
        result_texture: None,
        result_rx: None,
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([800.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native("Retouch Image Editor", options, Box::new(move |_cc| Ok(Box::new(app))))
        .map_err(|e| EditError::Config(format!("Failed to start UI: {e}")))?;

    // The app (and its context handle) is gone once run_native returns.
    drop(service);
    if let Some(session) = recording_session {
        match session.finish() {
            Ok(path) => eprintln!("Cassette saved: {}", path.display()),
            Err(e) => eprintln!("Warning: failed to save cassette: {e}"),
        }
    }

    Ok(())
}

/// Status line severity, mirrored in the label color.
enum Status {
    Info(String),
    Warning(String),
    Error(String),
}

struct RetouchApp {
    session: EditSession,
    service: Arc<ServiceContext>,
    output_path: PathBuf,
    busy: bool,
    status: Option<Status>,
    source_texture: Option<TextureHandle>,
    /// Set when an image path exists but its preview has not been loaded yet
    /// (e.g., a path passed on the command line).
    source_preview_pending: bool,
    result_texture: Option<TextureHandle>,
    result_rx: Option<Receiver<Result<EditOutcome, EditError>>>,
}

impl eframe::App for RetouchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_result(ctx);
        if self.source_preview_pending {
            self.source_preview_pending = false;
            self.load_source_preview(ctx);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Select Image").clicked() {
                    self.select_image(ctx);
                }
                match self.session.image_path {
                    Some(ref path) => ui.monospace(path.display().to_string()),
                    None => ui.weak("No image selected"),
                };
            });
            ui.add_space(6.0);

            ui.horizontal(|ui| {
                ui.label("Edit instruction:");
                ui.add_sized(
                    [ui.available_width(), 20.0],
                    TextEdit::singleline(&mut self.session.instruction),
                );
            });
            ui.add_space(6.0);

            ui.group(|ui| {
                ui.label(RichText::new("Parameters").strong());
                egui::Grid::new("parameters").num_columns(3).show(ui, |ui| {
                    ui.label("Number of inference steps:");
                    ui.add(Slider::new(&mut self.session.steps, params::STEPS_RANGE));
                    ui.weak("Default: 10, Range: 1-100");
                    ui.end_row();

                    ui.label("Image guidance scale:");
                    ui.add(
                        Slider::new(&mut self.session.image_guidance, params::IMAGE_GUIDANCE_RANGE)
                            .step_by(0.1),
                    );
                    ui.weak("Default: 1.0, Range: 0.0-5.0");
                    ui.end_row();

                    ui.label("Guidance scale:");
                    ui.add(
                        Slider::new(&mut self.session.text_guidance, params::TEXT_GUIDANCE_RANGE)
                            .step_by(0.1),
                    );
                    ui.weak("Default: 7.5, Range: 0.0-20.0");
                    ui.end_row();
                });
                ui.weak("Higher steps may improve quality but increase processing time.");
                ui.weak("Higher image guidance keeps the result closer to the input image.");
                ui.weak("Higher guidance adheres more closely to the instruction.");
            });
            ui.add_space(6.0);

            ui.horizontal(|ui| {
                if ui.add_enabled(!self.busy, Button::new("Edit Image")).clicked() {
                    self.start_edit();
                }
                if self.busy {
                    ui.spinner();
                    ui.label("Processing... this may take a while.");
                }
            });

            if let Some(status) = &self.status {
                let (color, text) = match status {
                    Status::Info(t) => (Color32::LIGHT_GREEN, t),
                    Status::Warning(t) => (Color32::YELLOW, t),
                    Status::Error(t) => (Color32::LIGHT_RED, t),
                };
                ui.colored_label(color, text);
            }
            ui.add_space(6.0);

            ui.horizontal(|ui| {
                if let Some(texture) = &self.source_texture {
                    ui.add(
                        egui::Image::new(texture).max_size(egui::vec2(PREVIEW_SIZE, PREVIEW_SIZE)),
                    );
                }
                if let Some(texture) = &self.result_texture {
                    ui.add(
                        egui::Image::new(texture).max_size(egui::vec2(PREVIEW_SIZE, PREVIEW_SIZE)),
                    );
                }
            });
        });
    }
}

impl RetouchApp {
    /// Open the native file dialog and remember the selection.
    fn select_image(&mut self, ctx: &egui::Context) {
        let Some(path) = rfd::FileDialog::new()
            .set_title("Select Image")
            .add_filter("Image Files", &["png", "jpg", "bmp"])
            .pick_file()
        else {
            return;
        };
        self.session.image_path = Some(path);
        self.load_source_preview(ctx);
    }

    /// Decode the selected image into a preview texture, best effort.
    fn load_source_preview(&mut self, ctx: &egui::Context) {
        let Some(ref path) = self.session.image_path else { return };
        match image::open(path) {
            Ok(img) => {
                self.source_texture = Some(load_rgb_texture(ctx, "source-image", &img.to_rgb8()));
            }
            Err(e) => {
                // The edit itself will report the decode failure; the preview
                // just stays empty.
                log::warn!("could not preview {}: {e}", path.display());
                self.source_texture = None;
            }
        }
    }

    /// Dispatch the current session to a background task.
    fn start_edit(&mut self) {
        let (tx, rx) = std::sync::mpsc::channel();
        self.result_rx = Some(rx);
        self.busy = true;
        self.status = None;

        let service = Arc::clone(&self.service);
        let edit_session = self.session.clone();
        tokio::spawn(async move {
            let result = session::submit(service.editor.as_ref(), &edit_session).await;
            let _ = tx.send(result);
        });
    }

    /// Check for a completed edit and fold it into the UI state.
    fn poll_result(&mut self, ctx: &egui::Context) {
        let Some(rx) = &self.result_rx else { return };
        match rx.try_recv() {
            Ok(result) => {
                self.busy = false;
                self.result_rx = None;
                self.finish_edit(ctx, result);
            }
            Err(TryRecvError::Empty) => {
                ctx.request_repaint_after(Duration::from_millis(100));
            }
            Err(TryRecvError::Disconnected) => {
                self.busy = false;
                self.result_rx = None;
                self.status = Some(Status::Error("Edit task ended unexpectedly".into()));
            }
        }
    }

    fn finish_edit(&mut self, ctx: &egui::Context, result: Result<EditOutcome, EditError>) {
        match result {
            Ok(outcome) => {
                self.status = Some(match output::save_image(&outcome.image, &self.output_path) {
                    Ok(()) => Status::Info(format!(
                        "Image edited successfully and saved as '{}'",
                        self.output_path.display()
                    )),
                    Err(e) => Status::Error(e.to_string()),
                });
                self.result_texture = Some(load_rgb_texture(ctx, "edited-image", &outcome.image));
            }
            Err(e) if e.is_precondition() => {
                self.status = Some(Status::Warning(e.to_string()));
            }
            Err(e) => {
                self.status = Some(Status::Error(e.to_string()));
            }
        }
    }
}

/// Upload an RGB image as an egui texture.
fn load_rgb_texture(ctx: &egui::Context, name: &str, image: &image::RgbImage) -> TextureHandle {
    let size = [image.width() as usize, image.height() as usize];
    let color = ColorImage::from_rgb(size, image.as_raw());
    ctx.load_texture(name, color, TextureOptions::LINEAR)
}
