//! # Footing CLI Application
//!
//! Bearing capacity of a shallow footing from the terminal. Reads the input
//! from a JSON file (`--input`) or prompts for each value, prints a summary
//! table, and optionally writes HTML, SVG, PDF and a calculation sheet.
//!
//! Logging goes through `env_logger`; set `RUST_LOG=debug` to see every
//! factor as it is computed.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use structopt::StructOpt;

use footing_core::diagram::render_footing_svg;
use footing_core::file_io::{load_input, save_sheet, write_atomic};
use footing_core::pdf::render_bearing_pdf;
use footing_core::report::{render_html_table, render_text_table};
use footing_core::{compute, CalcError, CalcResult, CalculationSheet, FootingShape, FoundationInput};

/// Command line options
#[derive(StructOpt, Debug)]
#[structopt(
    name = "footing",
    about = "Ultimate and allowable bearing capacity of a shallow footing"
)]
struct Options {
    /// Input file (calculation sheet or bare input JSON); prompts when absent
    #[structopt(long, parse(from_os_str))]
    input: Option<PathBuf>,

    /// Write the results table as an HTML page
    #[structopt(long, parse(from_os_str))]
    html: Option<PathBuf>,

    /// Write the footing diagram as SVG
    #[structopt(long, parse(from_os_str))]
    svg: Option<PathBuf>,

    /// Write a PDF report
    #[structopt(long, parse(from_os_str))]
    pdf: Option<PathBuf>,

    /// Save the input as a calculation sheet
    #[structopt(long, parse(from_os_str))]
    save: Option<PathBuf>,

    /// Also print the result as JSON
    #[structopt(long)]
    json: bool,

    /// Engineer name for reports and sheets
    #[structopt(long, default_value = "")]
    engineer: String,

    /// Job ID for reports and sheets
    #[structopt(long = "job-id", default_value = "")]
    job_id: String,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let options = Options::from_args();

    if let Err(e) = run(&options) {
        eprintln!("Error: {}", e);
        if let Ok(json) = serde_json::to_string_pretty(&e) {
            eprintln!();
            eprintln!("Error JSON:");
            eprintln!("{}", json);
        }
        std::process::exit(1);
    }
}

fn run(options: &Options) -> CalcResult<()> {
    let input = match &options.input {
        Some(path) => load_input(path)?,
        None => prompt_input()?,
    };

    let result = compute(&input)?;

    println!();
    print!("{}", render_text_table(&input, &result));

    if options.json {
        println!();
        println!("JSON Output:");
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    if let Some(path) = &options.html {
        write_output(path, render_html_table(&result).as_bytes())?;
    }

    if let Some(path) = &options.svg {
        write_output(path, render_footing_svg(&input, &result).as_bytes())?;
    }

    if let Some(path) = &options.pdf {
        let bytes = render_bearing_pdf(&input, &result, &options.engineer, &options.job_id)?;
        write_output(path, &bytes)?;
    }

    if let Some(path) = &options.save {
        let sheet = CalculationSheet::new(options.engineer.as_str(), options.job_id.as_str(), input);
        save_sheet(&sheet, path)?;
        println!("Sheet saved to {}", path.display());
    }

    Ok(())
}

fn write_output(path: &Path, contents: &[u8]) -> CalcResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            CalcError::file_error("create directory", parent.display().to_string(), e.to_string())
        })?;
    }
    write_atomic(path, contents)?;
    println!("Wrote {}", path.display());
    Ok(())
}

/// Ask for every value, defaulting to the reference footing.
fn prompt_input() -> CalcResult<FoundationInput> {
    println!("Footing - Shallow Foundation Bearing Capacity");
    println!("=============================================");
    println!("Press Enter to accept the value in brackets.");
    println!();

    let width = prompt_f64("Footing width B (m) [2.0]: ", 2.0);
    let length = prompt_f64("Footing length L (m) [4.0]: ", 4.0);
    let depth = prompt_f64("Embedment depth Df (m) [1.0]: ", 1.0);
    let gamma_1 = prompt_f64("Unit weight above foundation level γ1 (t/m3) [1.93]: ", 1.93);
    let gamma_2 = prompt_f64("Unit weight below foundation level γ2 (t/m3) [1.93]: ", 1.93);
    let phi = prompt_f64("Friction angle φ (deg) [31.40]: ", 31.40);
    let cohesion = prompt_f64("Cohesion c (t/m2) [0.0]: ", 0.0);
    let safety_factor = prompt_f64("Factor of safety FS [3.0]: ", 3.0);
    let beta = prompt_f64("Load inclination β (deg) [0.0]: ", 0.0);
    let shape: FootingShape = prompt_string("Shape (rectangular/square/circular) [rectangular]: ", "rectangular").parse()?;

    FoundationInput::builder()
        .with_width(width)
        .with_length(length)
        .with_embedment_depth(depth)
        .with_unit_weights(gamma_1, gamma_2)
        .with_friction_angle(phi)
        .with_cohesion(cohesion)
        .with_safety_factor(safety_factor)
        .with_load_inclination(beta)
        .with_shape(shape)
        .build()
}

fn prompt_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    io::stdout().flush().ok()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).ok()?;

    let trimmed = line.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Ask until the answer is a number; an empty answer (or end of input) takes
/// the default.
fn prompt_f64(prompt: &str, default: f64) -> f64 {
    loop {
        let Some(text) = prompt_line(prompt) else {
            return default;
        };
        match parse_number(&text) {
            Some(value) => return value,
            None => {
                log::debug!("rejected answer '{}'", text);
                eprintln!("'{}' is not a number, try again.", text);
            }
        }
    }
}

/// Finite decimal number, as typed at a prompt
fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn prompt_string(prompt: &str, default: &str) -> String {
    prompt_line(prompt).unwrap_or_else(|| default.to_string())
}
