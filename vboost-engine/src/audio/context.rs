//! Processing context clock

/// Rendering clock of a processing context
///
/// Time only moves forward as frames are rendered, so the gain curve is
/// evaluated against the same clock the audio is produced on.
#[derive(Debug, Clone)]
pub struct AudioContext {
    sample_rate: u32,
    frames_rendered: u64,
}

impl AudioContext {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate: sample_rate.max(1),
            frames_rendered: 0,
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Context time in seconds
    pub fn current_time(&self) -> f64 {
        self.frames_rendered as f64 / self.sample_rate as f64
    }

    /// Time of the frame `offset` frames after the current one
    pub fn frame_time(&self, offset: usize) -> f64 {
        (self.frames_rendered + offset as u64) as f64 / self.sample_rate as f64
    }

    pub(crate) fn advance(&mut self, frames: usize) {
        self.frames_rendered += frames as u64;
    }
}
