//! Replaying adapter for the `ImageEditor` port.

use std::sync::{Arc, Mutex};

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::error::EditError;
use crate::ports::image_editor::{EditFuture, EditRequest, EditResponse, ImageEditor};

/// Serves recorded edit results from a cassette.
pub struct ReplayingImageEditor {
    replayer: Option<Arc<Mutex<CassetteReplayer>>>,
}

impl ReplayingImageEditor {
    /// Create a replaying editor backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer: Some(replayer) }
    }
}

impl ImageEditor for ReplayingImageEditor {
    fn edit(&self, _request: &EditRequest) -> EditFuture<'_> {
        let output = next_output(self.replayer.as_ref(), "image_editor", "edit");
        Box::pin(async move {
            replay_result::<EditResponse>(output).map_err(|e| EditError::Pipeline(e.to_string()))
        })
    }
}
