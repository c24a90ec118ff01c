//! CLI argument parsing with clap.

use std::path::PathBuf;

use clap::Parser;

use crate::params;
use crate::session::EditSession;

/// Instruction-driven image editing with a pretrained diffusion pipeline.
#[derive(Parser, Debug)]
#[command(name = "retouch", version, about)]
pub struct Cli {
    /// Edit instruction. When given, one edit runs headlessly; without it
    /// the GUI starts.
    pub instruction: Option<String>,

    /// Source image path (.png, .jpg, .bmp).
    #[arg(short, long)]
    pub image: Option<String>,

    /// Number of inference steps. Range: 1-100.
    #[arg(long, default_value_t = params::STEPS_DEFAULT)]
    pub steps: u32,

    /// Image guidance scale: higher values stay closer to the source image.
    /// Range: 0.0-5.0.
    #[arg(long, default_value_t = params::IMAGE_GUIDANCE_DEFAULT)]
    pub image_guidance: f64,

    /// Guidance scale: higher values adhere more closely to the instruction.
    /// Range: 0.0-20.0.
    #[arg(long, default_value_t = params::TEXT_GUIDANCE_DEFAULT)]
    pub text_guidance: f64,

    /// Pipeline backend: hf, sdwebui.
    #[arg(short, long, default_value = "hf")]
    pub backend: String,

    /// Output file path (default: edited_image.jpg, overwritten).
    #[arg(short, long)]
    pub output: Option<String>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Build an edit session from the parsed arguments.
    #[must_use]
    pub fn session(&self) -> EditSession {
        EditSession {
            image_path: self.image.as_ref().map(PathBuf::from),
            instruction: self.instruction.clone().unwrap_or_default(),
            steps: self.steps,
            image_guidance: self.image_guidance,
            text_guidance: self.text_guidance,
        }
    }
}
