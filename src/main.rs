//! YAML Toolkit - Entry Point
//!
//! Small demonstration binary: loads a YAML file through the storage
//! service and prints the decoded document, or validates it in place with
//! `--check`.

use std::env;
use std::fs;
use std::process::ExitCode;

use log::info;

use yaml_toolkit::YamlStorage;
use yaml_toolkit::YamlValidator;
use yaml_toolkit::config::ToolkitConfig;

fn main() -> ExitCode {
    // env_logger picks up the RUST_LOG environment variable.
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let (check_only, path) = match args.as_slice() {
        [flag, path] if flag == "--check" => (true, path.clone()),
        [path] => (false, path.clone()),
        _ => {
            eprintln!("Usage: yaml-toolkit [--check] <file.yml>");
            return ExitCode::from(2);
        }
    };

    let settings = ToolkitConfig::load();

    if check_only {
        check_file(&path)
    } else {
        load_file(&path, &settings)
    }
}

/// Validate the file content without going through storage.
fn check_file(path: &str) -> ExitCode {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            eprintln!("Cannot read {path}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut validator = YamlValidator::new();
    if validator.check_yaml(content) {
        println!("{path}: valid YAML");
        ExitCode::SUCCESS
    } else {
        let result = validator.result();
        eprintln!("{path}: {}", result.error);
        if !result.error_description.is_empty() {
            eprintln!("{}", result.error_description);
        }
        ExitCode::FAILURE
    }
}

/// Load through the storage service and print the decoded document.
fn load_file(path: &str, settings: &ToolkitConfig) -> ExitCode {
    info!("Loading YAML file {path}");

    let mut storage = YamlStorage::default();
    match storage.load(path, &settings.logger_channel, settings.verbose) {
        Some(parsed) => match serde_yaml::to_string(&parsed) {
            Ok(dumped) => {
                print!("{dumped}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("Cannot dump the decoded document: {err}");
                ExitCode::FAILURE
            }
        },
        None => {
            let info = storage.info();
            eprintln!("Load failed ({}): {}", info.error_code, info.error_text);
            ExitCode::FAILURE
        }
    }
}
