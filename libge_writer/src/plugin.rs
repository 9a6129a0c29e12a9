use std::path::Path;

use super::error::GeFileError;
use super::frame::Frame;

/// Access intent requested by the host when opening an output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    Write,
    Read,
    Append,
}

/// Result of a write call that completed without error.
///
/// A write issued while no file is open is reported as success with no
/// effect; the outcome makes that case visible to callers that care.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The payload run was written; carries the number of bytes put on disk.
    Written(usize),
    /// No file was open, nothing was written.
    Skipped,
}

impl WriteOutcome {
    pub fn bytes_written(&self) -> usize {
        match self {
            WriteOutcome::Written(bytes) => *bytes,
            WriteOutcome::Skipped => 0,
        }
    }
}

/// The capability interface a file plugin exposes to its host.
///
/// The host owns frame delivery and drives this interface through a fixed
/// lifecycle: open once (lazily, before the first write), write once per
/// frame, close when the capture or stream ends.
pub trait FrameFileWriter {
    /// Open a new output file. The frame triggering the open is passed
    /// through so implementations may inspect it for format decisions.
    fn open(&mut self, path: &Path, mode: OpenMode, frame: &Frame) -> Result<(), GeFileError>;

    /// Write a single frame. Can be called multiple times to add frames to
    /// one file in stream or capture mode.
    fn write(&mut self, frame: &Frame) -> Result<WriteOutcome, GeFileError>;

    /// Flush and release the output file, if one is open.
    fn close(&mut self) -> Result<(), GeFileError>;

    /// Read a frame back from the output file.
    fn read(&mut self) -> Result<Frame, GeFileError>;
}
