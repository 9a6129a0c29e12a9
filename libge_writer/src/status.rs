/// Progress of a capture, sent by the orchestrator to the controlling thread
/// (typically the UI) through a channel.
#[derive(Debug, Clone, Default)]
pub struct CaptureStatus {
    pub progress: f32,
    pub frames_written: u64,
    pub frames_skipped: u64,
    pub bytes_written: u64,
}

impl CaptureStatus {
    pub fn new(progress: f32, frames_written: u64, frames_skipped: u64, bytes_written: u64) -> Self {
        Self {
            progress,
            frames_written,
            frames_skipped,
            bytes_written,
        }
    }
}
