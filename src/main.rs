use std::fs::File;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use matchup_engine::data_loader::load_roster;
use matchup_engine::matchup::{build_matchup, TimingMode};
use matchup_engine::report::{print_report, write_csv};

// Demo driver: load a roster JSON, build the matchup, print the comparison
// matrix. Usage: matchup_engine [roster.json] [course|lap|overall] [out.csv]

fn parse_mode(raw: &str) -> Option<TimingMode> {
    match raw {
        "course" => Some(TimingMode::CourseOnly),
        "lap" => Some(TimingMode::LapOnly),
        "overall" => Some(TimingMode::Overall),
        _ => None,
    }
}

fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();

    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .unwrap_or_else(|| "data/roster_sample.json".to_string());

    let timing_mode = match args.next() {
        None => TimingMode::Overall,
        Some(raw) => match parse_mode(&raw) {
            Some(mode) => mode,
            None => {
                eprintln!("unknown timing mode {raw:?}, expected course, lap or overall");
                return ExitCode::FAILURE;
            }
        },
    };

    let competitors = match load_roster(&path) {
        Ok(competitors) => competitors,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let result = match build_matchup(&competitors, timing_mode) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    print_report(&result, &competitors);

    if let Some(csv_path) = args.next() {
        let written = File::create(&csv_path)
            .map_err(csv::Error::from)
            .and_then(|file| write_csv(&result, &competitors, file));
        if let Err(err) = written {
            eprintln!("failed to write {csv_path}: {err}");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
