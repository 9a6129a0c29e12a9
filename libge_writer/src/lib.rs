//! # ge_writer
//!
//! ge_writer is a file-writer plugin for streamed detector data, written in
//! Rust. It receives multi-dimensional array frames from an upstream frame
//! source and serializes them to the custom Ge binary format, using a small
//! set of per-frame metadata attributes to control the record lengths.
//!
//! The plugin is designed to sit inside a host acquisition process that owns
//! frame delivery and threading. The host drives one writer instance through
//! the [plugin::FrameFileWriter] capability interface: open a file once
//! (lazily, before the first write), write one payload run per frame, close
//! when the capture or stream ends. The [process] module provides that
//! orchestration for standalone use.
//!
//! ## Attributes
//!
//! Two frame attributes are semantically interpreted; everything else in the
//! attribute list is ignored (or merely logged when diagnostics are enabled):
//!
//! - `maia_num_events` (integer): the number of events to dump from the start
//!   of the frame payload. Sticky — the most recently seen value is used for
//!   every subsequent write until a new value arrives, even across files.
//! - `maia_fnum` (integer): the upstream frame number, tracked for
//!   bookkeeping.
//!
//! ## Configuration
//!
//! Configuration is a YAML file handled by the [config] module:
//!
//! ```yml
//! port_name: GE1
//! output_path: /data/maia
//! max_payload_bytes: 1048576
//! queue_size: 20
//! blocking_callbacks: false
//! log_attributes: false
//! capture_number: 0
//! n_frames: 100
//! events_per_frame: 512
//! ```
//!
//! `port_name`, `queue_size`, `blocking_callbacks`, and `max_payload_bytes`
//! mirror the registration surface of the plugin inside its host;
//! `log_attributes` gates the per-attribute diagnostic trace; the remaining
//! fields drive the standalone capture harness.
//!
//! ## Output
//!
//! ### Ge Data Format
//!
//! A Ge file is a headerless sequence of raw integer runs, one per accepted
//! frame:
//!
//! ```text
//! GE1_0000.ge
//! |---- frame 0: num_events x i32, native endianness
//! |---- frame 1: num_events x i32
//! |---- ...
//! ```
//!
//! There is no magic number, no inter-record framing, no trailer, and no
//! checksum. Record lengths follow the `maia_num_events` attribute sequence,
//! so files are only interchangeable between systems sharing the same integer
//! representation, and a reader must learn the length sequence through a side
//! channel. Reading and appending are unsupported by design.

pub mod config;
pub mod error;
pub mod frame;
pub mod ge_writer;
pub mod plugin;
pub mod process;
pub mod status;
