use clap::{Arg, Command};
use indicatif::{MultiProgress, ProgressBar};
use indicatif_log_bridge::LogWrapper;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use libge_writer::config::Config;
use libge_writer::frame::{Attribute, AttributeValue, Frame};
use libge_writer::ge_writer::{FNUM_ATTRIBUTE, NUM_EVENTS_ATTRIBUTE};
use libge_writer::process::process;

fn make_template_config(path: &Path) {
    let config = Config::default();
    let yaml_str = serde_yaml::to_string(&config).unwrap();
    let mut file = File::create(path).expect("Could create template config file!");
    file.write_all(yaml_str.as_bytes())
        .expect("Failed to write yaml data to file!");
}

/// Build the ramp test-pattern frames used to exercise the writer.
/// Each frame carries the recognized attribute pair so the capture mirrors
/// what an upstream detector source would deliver.
fn make_test_frames(config: &Config) -> Vec<Frame> {
    (0..config.n_frames)
        .map(|fnum| {
            let data: Vec<i32> = (0..config.events_per_frame)
                .map(|idx| (fnum * config.events_per_frame + idx) as i32)
                .collect();
            Frame::from_flat(
                data,
                vec![
                    Attribute::new(
                        NUM_EVENTS_ATTRIBUTE,
                        "number of events in this frame",
                        AttributeValue::Int(config.events_per_frame as i32),
                    ),
                    Attribute::new(
                        FNUM_ATTRIBUTE,
                        "upstream frame number",
                        AttributeValue::Int(fnum as i32),
                    ),
                ],
            )
        })
        .collect()
}

fn main() {
    // Create a cli
    let matches = Command::new("ge_writer_cli")
        .arg_required_else_help(true)
        .subcommand(Command::new("new").about("Make a template configuration yaml file"))
        .arg(
            Arg::new("path")
                .short('p')
                .long("path")
                .help("Path to the file"),
        )
        .get_matches();

    // Initialize feedback
    let logger = simplelog::TermLogger::new(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );

    let pb_manager = MultiProgress::new();

    LogWrapper::new(pb_manager.clone(), logger)
        .try_init()
        .expect("Could not create logging/progress!");

    // Parse the cli
    let config_path = PathBuf::from(matches.get_one::<String>("path").expect("We require args"));

    if let Some(("new", _)) = matches.subcommand() {
        log::info!(
            "Making a template config at {}...",
            config_path.to_string_lossy()
        );

        make_template_config(&config_path);
        log::info!("Done.");
        return;
    }

    // Load our config
    log::info!("Loading config from {}...", config_path.to_string_lossy());
    let config = match Config::read_config_file(&config_path) {
        Ok(c) => c,
        Err(e) => {
            log::error!("{e}");
            return;
        }
    };
    log::info!("Config successfully loaded.");
    log::info!("Port Name: {}", config.port_name);
    log::info!("Output Path: {}", config.output_path.to_string_lossy());
    log::info!(
        "Frames: {} Events per Frame: {}",
        config.n_frames,
        config.events_per_frame
    );
    log::info!("Capture Number: {}", config.capture_number);
    log::info!("Attribute Logging: {}", config.log_attributes);

    if !config.is_n_frames_valid() {
        log::error!("Config must request at least one frame!");
        return;
    }

    // Setup the progress bar
    let pb = pb_manager.add(ProgressBar::new(100));
    let frames = make_test_frames(&config);
    let (tx, rx) = std::sync::mpsc::channel();
    // Spawn the task!
    let handle = std::thread::spawn(move || process(config, frames, tx));

    // The status channel closes when the capture thread finishes
    for status in rx {
        pb.set_position((status.progress * 100.0) as u64);
    }

    match handle.join() {
        Ok(result) => match result {
            Ok(_) => log::info!("Successfully wrote Ge file!"),
            Err(e) => log::error!("Capture failed with error: {e}"),
        },
        Err(_) => log::error!("Failed to join capture task!"),
    }

    pb.finish();

    log::info!("Done.");
}
