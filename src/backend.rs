//! Backend selection for the editing pipeline.

/// Supported pipeline backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Hosted Hugging Face inference API.
    HuggingFace,
    /// Locally running Stable Diffusion WebUI with an instruct-pix2pix
    /// checkpoint loaded.
    SdWebui,
}

/// Parse a backend name from the CLI/config.
///
/// # Errors
///
/// Returns an error if the name is not recognized.
pub fn parse_backend(name: &str) -> Result<Backend, String> {
    match name {
        "hf" | "huggingface" => Ok(Backend::HuggingFace),
        "sdwebui" | "local" => Ok(Backend::SdWebui),
        _ => Err(format!("Unknown backend '{name}'. Valid: hf, sdwebui")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hf_aliases() {
        assert_eq!(parse_backend("hf").unwrap(), Backend::HuggingFace);
        assert_eq!(parse_backend("huggingface").unwrap(), Backend::HuggingFace);
    }

    #[test]
    fn parse_sdwebui_aliases() {
        assert_eq!(parse_backend("sdwebui").unwrap(), Backend::SdWebui);
        assert_eq!(parse_backend("local").unwrap(), Backend::SdWebui);
    }

    #[test]
    fn parse_unknown_backend() {
        assert!(parse_backend("replicate").is_err());
        assert!(parse_backend("").is_err());
    }
}
