//! Service context that bundles all port trait objects.

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::adapters::live::huggingface::HuggingFaceEditor;
use crate::adapters::live::sdwebui::SdWebuiEditor;
use crate::adapters::recording::image_editor::RecordingImageEditor;
use crate::adapters::replaying::image_editor::ReplayingImageEditor;
use crate::backend::Backend;
use crate::cassette::config::load_cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::config::Config;
use crate::error::EditError;
use crate::ports::ImageEditor;

/// Bundles all port trait objects into a single context.
///
/// Constructed once per process and shared across requests, so the pipeline
/// backend is not re-initialized on every edit.
pub struct ServiceContext {
    /// Image editor port.
    pub editor: Box<dyn ImageEditor>,
}

/// Handle to a recording session that must be finished after use.
pub struct RecordingSession {
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSession {
    /// Finish the recording and write cassette files to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be written.
    pub fn finish(self) -> Result<std::path::PathBuf, String> {
        let recorder = Arc::try_unwrap(self.recorder)
            .map_err(|_| "Recording adapter still has references".to_string())?
            .into_inner()
            .map_err(|e| format!("Recorder lock poisoned: {e}"))?;
        recorder.finish().map_err(|e| format!("Failed to write cassette: {e}"))
    }
}

impl ServiceContext {
    /// Create a live context for the given backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the API token is not configured.
    pub fn live(backend: Backend, config: &Config) -> Result<Self, EditError> {
        let editor: Box<dyn ImageEditor> = match backend {
            Backend::HuggingFace => {
                let token = config.huggingface_token().ok_or(EditError::MissingApiKey {
                    provider: "Hugging Face".into(),
                    env_var: "HF_TOKEN".into(),
                })?;
                Box::new(HuggingFaceEditor::new(token))
            }
            Backend::SdWebui => Box::new(SdWebuiEditor::new(config.sdwebui_url())),
        };
        Ok(Self { editor })
    }

    /// Create a recording context that wraps a live adapter with a recorder.
    ///
    /// # Errors
    ///
    /// Returns an error if the recording session cannot be initialized.
    pub fn recording(
        backend: Backend,
        config: &Config,
    ) -> Result<(Self, RecordingSession), EditError> {
        let live_ctx = Self::live(backend, config)?;

        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let output_dir = std::path::PathBuf::from(".retouch/cassettes").join(&timestamp);

        let commit = get_commit_hash();
        let path = output_dir.join("image_editor.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            path,
            format!("{timestamp}-image_editor"),
            &commit,
        )));

        let recording_editor = RecordingImageEditor::new(live_ctx.editor, Arc::clone(&recorder));

        let ctx = Self { editor: Box::new(recording_editor) };
        let session = RecordingSession { recorder };

        Ok((ctx, session))
    }

    /// Create a context from the environment: `RETOUCH_REPLAY` selects a
    /// cassette to replay, `RETOUCH_REC` wraps the live adapter with a
    /// recorder, otherwise the context is live.
    ///
    /// # Errors
    ///
    /// Returns an error if the selected mode cannot be initialized.
    pub fn from_env(
        backend: Backend,
        config: &Config,
    ) -> Result<(Self, Option<RecordingSession>), EditError> {
        let replay_path = std::env::var("RETOUCH_REPLAY").ok();
        let is_recording = std::env::var("RETOUCH_REC").is_ok_and(|v| v == "true" || v == "1");

        if let Some(ref cassette_path) = replay_path {
            log::debug!("replaying from {cassette_path}");
            Ok((Self::replaying(Path::new(cassette_path))?, None))
        } else if is_recording {
            log::debug!("recording mode enabled");
            let (ctx, session) = Self::recording(backend, config)?;
            Ok((ctx, Some(session)))
        } else {
            Ok((Self::live(backend, config)?, None))
        }
    }

    /// Create a replaying context from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be loaded.
    pub fn replaying(path: &Path) -> Result<Self, EditError> {
        let replayer = load_cassette(path)
            .map_err(|e| EditError::Config(format!("Failed to load cassette: {e}")))?;
        let replayer = Arc::new(Mutex::new(replayer));
        let editor = Box::new(ReplayingImageEditor::new(replayer));
        Ok(Self { editor })
    }
}

/// Get the current git commit hash, or "unknown" if unavailable.
fn get_commit_hash() -> String {
    std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map_or_else(|| "unknown".to_string(), |s| s.trim().to_string())
}
