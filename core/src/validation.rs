//! Local checks applied to a file before it becomes the pending selection.

use crate::error::ValidationError;

/// Media type prefix every accepted file must carry.
pub const AUDIO_PREFIX: &str = "audio/";

/// Check a candidate file against the size ceiling and the audio media type.
///
/// The size check runs first, so an oversized file is reported as too large
/// whatever its type. `max_size = None` disables the size check.
pub fn validate_selection(
    size: u64,
    media_type: &str,
    max_size: Option<u64>,
) -> Result<(), ValidationError> {
    if let Some(limit) = max_size {
        if size > limit {
            return Err(ValidationError::TooLarge { size, limit });
        }
    }

    if !media_type.starts_with(AUDIO_PREFIX) {
        return Err(ValidationError::NotAudio {
            media_type: media_type.to_string(),
        });
    }

    Ok(())
}
