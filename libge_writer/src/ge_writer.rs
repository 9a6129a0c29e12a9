use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use byteorder::{NativeEndian, WriteBytesExt};

use super::error::GeFileError;
use super::frame::Frame;
use super::plugin::{FrameFileWriter, OpenMode, WriteOutcome};

/// Attribute carrying the number of events to dump from each frame payload
pub const NUM_EVENTS_ATTRIBUTE: &str = "maia_num_events";
/// Attribute carrying the upstream frame number
pub const FNUM_ATTRIBUTE: &str = "maia_fnum";

/// Writes frame payloads to Ge files.
///
/// A Ge file is a headerless sequence of raw integer runs, one per accepted
/// frame, each `num_events` integers long in native endianness. There is no
/// inter-record framing, no trailer, and no checksum; an external reader must
/// know the record length sequence through a side channel.
///
/// The writer cycles `Closed -> Open -> Closed` once per output file and
/// holds at most one file handle at a time. The event count and frame number
/// are updated by [GeWriter::process_attributes] on every frame and are
/// sticky: a frame whose attribute list omits them writes with the values
/// most recently seen, even across files.
#[derive(Debug)]
pub struct GeWriter {
    file: Option<BufWriter<File>>,
    num_events: i32,
    fnum: i32,
    log_attributes: bool,
}

impl GeWriter {
    /// Create a writer in the Closed state. Both counters start at zero.
    pub fn new(log_attributes: bool) -> Self {
        GeWriter {
            file: None,
            num_events: 0,
            fnum: 0,
            log_attributes,
        }
    }

    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    /// The event count most recently extracted from a frame attribute list
    pub fn num_events(&self) -> i32 {
        self.num_events
    }

    /// The frame number most recently extracted from a frame attribute list
    pub fn fnum(&self) -> i32 {
        self.fnum
    }

    /// Scan a frame's attribute list and update the event count and frame
    /// number from the recognized attributes.
    ///
    /// The full list is traversed exactly once, in list order. Attributes
    /// under other names, and recognized names with non-integer values, are
    /// ignored without error. With diagnostics enabled every attribute name
    /// is logged along with the decoded values of the recognized pair.
    pub fn process_attributes(&mut self, frame: &Frame) {
        for attribute in frame.attributes.iter() {
            let (type_tag, byte_size) = attribute.value_info();
            if self.log_attributes {
                spdlog::info!(
                    "Attr: {} ({:?}, {} bytes)",
                    attribute.name,
                    type_tag,
                    byte_size
                );
            }

            if attribute.name == NUM_EVENTS_ATTRIBUTE {
                if let Some(value) = attribute.value.as_int() {
                    if self.log_attributes {
                        spdlog::info!("{NUM_EVENTS_ATTRIBUTE}= {value}");
                    }
                    self.num_events = value;
                }
            }

            if attribute.name == FNUM_ATTRIBUTE {
                if let Some(value) = attribute.value.as_int() {
                    if self.log_attributes {
                        spdlog::info!("{FNUM_ATTRIBUTE}= {value}");
                    }
                    self.fnum = value;
                }
            }
        }
    }
}

impl FrameFileWriter for GeWriter {
    /// Create a new Ge file, truncating any existing file at the path.
    ///
    /// Read and append modes are unsupported and fail before any file is
    /// created or truncated. No header is written; the format starts with
    /// the first payload run.
    fn open(&mut self, path: &Path, mode: OpenMode, _frame: &Frame) -> Result<(), GeFileError> {
        match mode {
            OpenMode::Read | OpenMode::Append => return Err(GeFileError::UnsupportedMode(mode)),
            OpenMode::Write => (),
        }

        // At most one handle may be live; flush out any leftover file first.
        if let Some(mut previous) = self.file.take() {
            previous.flush()?;
        }

        let file = File::create(path)?;
        self.file = Some(BufWriter::new(file));
        Ok(())
    }

    /// Write one payload run of `num_events` native-width integers taken
    /// from the start of the frame buffer.
    ///
    /// With no file open the call is a no-op reported as
    /// [WriteOutcome::Skipped]. The event count comes from the most recently
    /// extracted attribute value, not from the buffer length; a count that
    /// exceeds the buffer is a reported error and writes nothing.
    fn write(&mut self, frame: &Frame) -> Result<WriteOutcome, GeFileError> {
        let Some(writer) = self.file.as_mut() else {
            return Ok(WriteOutcome::Skipped);
        };

        let requested = usize::try_from(self.num_events)
            .map_err(|_| GeFileError::BadEventCount(self.num_events))?;
        let payload = frame.payload()?;
        if requested > payload.len() {
            return Err(GeFileError::PayloadTooShort {
                requested,
                available: payload.len(),
            });
        }

        for value in &payload[..requested] {
            writer.write_i32::<NativeEndian>(*value)?;
        }

        Ok(WriteOutcome::Written(
            requested * std::mem::size_of::<i32>(),
        ))
    }

    /// Flush and release the file handle. A no-op when already closed.
    fn close(&mut self) -> Result<(), GeFileError> {
        if let Some(mut writer) = self.file.take() {
            writer.flush()?;
            spdlog::info!("Ge file closed");
        }
        Ok(())
    }

    /// Reading Ge files is categorically unsupported.
    fn read(&mut self) -> Result<Frame, GeFileError> {
        Err(GeFileError::ReadUnsupported)
    }
}
