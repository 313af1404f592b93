// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use std::env;

use bmi_calculator::{logging, BmiError, Config, InputForm, Session, VERSION};

const USAGE: &str = "\
Usage:
  bmi-calculator                                   interactive calculator
  bmi-calculator calc <age> <feet> <inches> <kg> [--json]
  bmi-calculator help | version";

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        Some("calc") => run_calc(&args[1..]),
        Some("help") | Some("--help") | Some("-h") => {
            println!("{}", USAGE);
            Ok(())
        }
        Some("version") | Some("--version") | Some("-V") => {
            println!("bmi-calculator {}", VERSION);
            Ok(())
        }
        None | Some("ui") => run_ui_mode(),
        Some(other) => {
            eprintln!("Unknown command: {}", other);
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    }
}

/// Why a `calc` invocation failed, mapped to the process exit status
#[derive(Debug, thiserror::Error)]
enum CalcFailure {
    #[error("calc expects exactly 4 values: <age> <feet> <inches> <kg>")]
    Usage,

    #[error("{0}")]
    Rejected(#[from] BmiError),

    #[error("failed to encode result: {0}")]
    Encode(#[from] serde_json::Error),
}

impl CalcFailure {
    fn exit_code(&self) -> i32 {
        match self {
            CalcFailure::Usage => 2,
            CalcFailure::Rejected(_) | CalcFailure::Encode(_) => 1,
        }
    }
}

/// Run one calculation on a fresh session and return what goes to stdout
fn calc(args: &[String]) -> std::result::Result<String, CalcFailure> {
    let json = args.iter().any(|a| a == "--json");
    let values: Vec<&str> = args
        .iter()
        .filter(|a| a.as_str() != "--json")
        .map(String::as_str)
        .collect();

    let [age, feet, inches, weight] = values.as_slice() else {
        return Err(CalcFailure::Usage);
    };

    let mut session = Session::new();
    session.form = InputForm::new(age, feet, inches, weight);
    let entry = session.calculate()?;

    if json {
        Ok(serde_json::to_string_pretty(entry)?)
    } else {
        Ok(format!("BMI: {} ({})", entry.bmi, entry.category))
    }
}

fn run_calc(args: &[String]) -> Result<()> {
    logging::init_stderr_logging();

    match calc(args) {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(err.exit_code());
        }
    }
}

#[cfg(feature = "tui")]
fn run_ui_mode() -> Result<()> {
    let config = Config::load().context("loading configuration")?;
    logging::init_file_logging(&config.log);
    tracing::info!(version = VERSION, "starting interactive calculator");

    let mut app = ui::App::new(config.link_url);
    ui::run_ui(&mut app)?;

    tracing::info!(
        session = %app.session.id(),
        entries = app.session.history().len(),
        "session ended"
    );

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode() -> Result<()> {
    // config is still validated so a broken file is reported in either build
    Config::load().context("loading configuration")?;
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use one-shot mode: bmi-calculator calc <age> <feet> <inches> <kg>");
    std::process::exit(1);
}
