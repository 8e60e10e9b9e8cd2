use std::{fs, path::Path, process, str::FromStr, time::Instant};

use clap::{crate_description, crate_name, crate_version, App, Arg};
use log::LevelFilter;
use puc::{check, evaluate, parse_source, render_error};

fn main() {
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .about(crate_description!())
        .arg(
            Arg::new("filename")
                .required(true)
                .help("Source file to check and run"),
        )
        .arg(
            Arg::new("check")
                .short('c')
                .long("check")
                .takes_value(false)
                .help("Only type check the program, do not evaluate it"),
        )
        .arg(
            Arg::new("loglevel")
                .short('l')
                .long("log-level")
                .takes_value(true)
                .possible_values(["off", "error", "warn", "info", "debug", "trace"])
                .default_value("warn"),
        )
        .get_matches();

    let file_path = matches.value_of("filename").unwrap();
    let check_only = matches.is_present("check");
    let loglevel = LevelFilter::from_str(matches.value_of("loglevel").unwrap()).unwrap();

    env_logger::Builder::new()
        .filter_level(loglevel)
        .parse_default_env()
        .init();

    let file_name = Path::new(file_path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_path.to_string());

    match fs::read_to_string(file_path) {
        Ok(source) => process::exit(run(&source, file_name, check_only)),
        Err(e) => {
            eprintln!("{}: {}", file_path, e);
            process::exit(1)
        }
    }
}

/// Runs every phase on `source` and returns the exit status.
fn run(source: &str, file_name: String, check_only: bool) -> i32 {
    let start = Instant::now();

    let program = match parse_source(source, Some(file_name)) {
        Ok(program) => program,
        Err(error) => {
            eprint!("{}", render_error(&error, source));
            return 1;
        }
    };

    log::info!("Parsed in {:?}", start.elapsed());

    let check_start = Instant::now();
    let (ty, errors) = check(&program);

    log::info!("Type checked in {:?}", check_start.elapsed());

    for error in errors.iter() {
        eprintln!("error[{}]: {}", error.get_error_name(), error);
    }

    let status = if errors.is_empty() { 0 } else { 1 };

    if check_only {
        if errors.is_empty() {
            println!("{}", ty);
        }
        return status;
    }

    let eval_start = Instant::now();
    let result = evaluate(&program);

    log::info!("Evaluated in {:?}", eval_start.elapsed());
    log::info!("Total time: {:?}", start.elapsed());

    match result {
        Ok(value) => {
            println!("{} : {}", value, ty);
            status
        }
        Err(error) => {
            eprintln!("runtime error[{}]: {}", error.get_error_name(), error);
            1
        }
    }
}
