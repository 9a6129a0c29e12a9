use std::sync::mpsc::Sender;

use super::config::Config;
use super::error::ProcessorError;
use super::frame::Frame;
use super::ge_writer::GeWriter;
use super::plugin::{FrameFileWriter, OpenMode, WriteOutcome};
use super::status::CaptureStatus;

/// The main loop of the Ge writer.
///
/// Drives one capture through the fixed file-plugin lifecycle: for each
/// incoming frame the attribute list is scanned, the output file is opened
/// lazily before the first write, and the payload run is written; the file is
/// flushed and closed once the frame sequence ends. Progress is reported
/// through the status channel.
///
/// Any open or write failure propagates once, un-retried; the caller decides
/// whether the run is aborted.
pub fn process_capture(
    config: &Config,
    frames: impl IntoIterator<Item = Frame>,
    tx: &Sender<CaptureStatus>,
) -> Result<(), ProcessorError> {
    let ge_path = config.get_ge_file_name(config.capture_number)?;
    let mut writer = GeWriter::new(config.log_attributes);

    let total_frames = config.n_frames.max(1);
    let mut frames_seen: u64 = 0;
    let mut frames_written: u64 = 0;
    let mut frames_skipped: u64 = 0;
    let mut bytes_written: u64 = 0;

    tx.send(CaptureStatus::default())?;

    for frame in frames {
        writer.process_attributes(&frame);

        let payload_bytes = frame.data.len() * std::mem::size_of::<i32>();
        if payload_bytes > config.max_payload_bytes {
            spdlog::warn!(
                "Frame payload of {} exceeds the configured limit of {}",
                human_bytes::human_bytes(payload_bytes as f64),
                human_bytes::human_bytes(config.max_payload_bytes as f64)
            );
        }

        if !writer.is_open() {
            writer.open(&ge_path, OpenMode::Write, &frame)?;
            spdlog::info!("Opened Ge file {}", ge_path.to_string_lossy());
        }

        match writer.write(&frame)? {
            WriteOutcome::Written(bytes) => {
                frames_written += 1;
                bytes_written += bytes as u64;
            }
            WriteOutcome::Skipped => {
                frames_skipped += 1;
            }
        }
        frames_seen += 1;

        tx.send(CaptureStatus::new(
            frames_seen as f32 / total_frames as f32,
            frames_written,
            frames_skipped,
            bytes_written,
        ))?;
    }

    writer.close()?;
    spdlog::info!(
        "Capture {} complete: {} frames seen, {} written to {}",
        config.capture_number,
        frames_seen,
        human_bytes::human_bytes(bytes_written as f64),
        ge_path.to_string_lossy()
    );

    tx.send(CaptureStatus::new(
        1.0,
        frames_written,
        frames_skipped,
        bytes_written,
    ))?;
    Ok(())
}

/// The function to be called by a separate thread (typically the UI).
pub fn process(
    config: Config,
    frames: Vec<Frame>,
    tx: Sender<CaptureStatus>,
) -> Result<(), ProcessorError> {
    spdlog::info!("Processing capture {}...", config.capture_number);
    process_capture(&config, frames, &tx)?;
    spdlog::info!("Finished capture {}.", config.capture_number);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{Attribute, AttributeValue};
    use crate::ge_writer::{FNUM_ATTRIBUTE, NUM_EVENTS_ATTRIBUTE};
    use std::sync::mpsc::channel;
    use tempfile::TempDir;

    fn test_config(dir: &TempDir, n_frames: usize, events_per_frame: usize) -> Config {
        Config {
            output_path: dir.path().to_path_buf(),
            n_frames,
            events_per_frame,
            ..Default::default()
        }
    }

    fn ramp_frames(n_frames: usize, events_per_frame: usize) -> Vec<Frame> {
        (0..n_frames)
            .map(|fnum| {
                let data: Vec<i32> = (0..events_per_frame)
                    .map(|idx| (fnum * events_per_frame + idx) as i32)
                    .collect();
                Frame::from_flat(
                    data,
                    vec![
                        Attribute::new(
                            NUM_EVENTS_ATTRIBUTE,
                            "number of events",
                            AttributeValue::Int(events_per_frame as i32),
                        ),
                        Attribute::new(
                            FNUM_ATTRIBUTE,
                            "frame number",
                            AttributeValue::Int(fnum as i32),
                        ),
                    ],
                )
            })
            .collect()
    }

    #[test]
    fn test_capture_writes_concatenated_payloads() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir, 4, 8);
        let (tx, rx) = channel();

        process_capture(&config, ramp_frames(4, 8), &tx).unwrap();
        drop(tx);

        let ge_path = dir.path().join("GE1_0000.ge");
        let bytes = std::fs::read(&ge_path).unwrap();
        assert_eq!(bytes.len(), 4 * 8 * 4);
        let values: Vec<i32> = bytes
            .chunks_exact(4)
            .map(|chunk| i32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();
        let expected: Vec<i32> = (0..32).collect();
        assert_eq!(values, expected);

        let last = rx.iter().last().unwrap();
        assert_eq!(last.progress, 1.0);
        assert_eq!(last.frames_written, 4);
        assert_eq!(last.frames_skipped, 0);
        assert_eq!(last.bytes_written, 128);
    }

    #[test]
    fn test_capture_with_no_frames_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir, 0, 0);
        let (tx, rx) = channel();

        process_capture(&config, Vec::new(), &tx).unwrap();
        drop(tx);

        // The file is opened lazily, so no frames means no file at all
        assert!(!dir.path().join("GE1_0000.ge").exists());
        let last = rx.iter().last().unwrap();
        assert_eq!(last.frames_written, 0);
    }

    #[test]
    fn test_capture_fails_on_bad_output_directory() {
        let config = Config {
            output_path: std::path::PathBuf::from("/no/such/dir"),
            ..Default::default()
        };
        let (tx, _rx) = channel();
        let result = process_capture(&config, ramp_frames(1, 4), &tx);
        assert!(matches!(result, Err(ProcessorError::ConfigError(_))));
    }

    #[test]
    fn test_capture_propagates_short_payload() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir, 1, 4);
        let (tx, _rx) = channel();

        // A frame claiming more events than its payload holds
        let frame = Frame::from_flat(
            vec![1, 2],
            vec![Attribute::new(
                NUM_EVENTS_ATTRIBUTE,
                "",
                AttributeValue::Int(64),
            )],
        );
        let result = process_capture(&config, vec![frame], &tx);
        assert!(matches!(result, Err(ProcessorError::GeFileError(_))));
    }
}
