mod log;

use std::io::{self, Write};

use anyhow::bail;
use clap::{Parser, Subcommand, ValueEnum};
use ndarray::Array1;
use ndarray_stats::QuantileExt;
use serde::Serialize;

use farina_core::{SweepAnalysis, SweepParameters};

#[derive(Parser)]
#[clap(author, version, about = "Exponential sine sweep deconvolution")]
struct Cli {
    #[arg(long, default_value_t = 20.0, global = true)]
    start_frequency: f64,
    #[arg(long, default_value_t = 20_000.0, global = true)]
    end_frequency: f64,
    #[arg(long, default_value_t = 48_000.0, global = true)]
    sample_rate: f64,
    /// Number of samples of the sweep and of every transform
    #[arg(short, long, default_value_t = 1024, global = true)]
    length: usize,
    #[arg(long, value_enum, default_value_t = Format::Text, global = true)]
    format: Format,
    /// Raise the log level, repeat for more
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    subcommand: Option<Command>,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// Key figures of the deconvolution (default)
    Summary,
    /// Sweep and inverse filter samples
    Sweep,
    /// Magnitude spectra in dB
    Spectrum {
        #[arg(long, default_value_t = 20.0)]
        min_frequency: f64,
        /// Defaults to the Nyquist frequency
        #[arg(long)]
        max_frequency: Option<f64>,
    },
    /// Centered impulse response samples
    Impulse,
    /// Complete result bundle as JSON, regardless of `--format`
    Analysis,
}

#[derive(ValueEnum, Clone, Copy, PartialEq, Eq)]
enum Format {
    Text,
    Json,
}

#[derive(Serialize)]
struct Summary {
    parameters: SweepParameters,
    duration: f64,
    bin_frequency: f64,
    impulse_peak_index: usize,
    impulse_peak: f64,
    /// Absent when no bin falls inside the swept band
    #[serde(skip_serializing_if = "Option::is_none")]
    response_max_db: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_min_db: Option<f64>,
    elapsed_us: u128,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(err) = log::init(cli.verbose) {
        eprintln!("farina: failed to initialize logger: {err}");
    }

    let parameters = SweepParameters::new(
        cli.start_frequency,
        cli.end_frequency,
        cli.sample_rate,
        cli.length,
    )?;

    let analysis = SweepAnalysis::compute(&parameters)?;
    log::info!(
        elapsed = ?analysis.elapsed(),
        length = parameters.length(),
        "analysis computed"
    );

    let mut out = io::stdout().lock();

    match cli.subcommand.unwrap_or(Command::Summary) {
        Command::Summary => {
            let summary = summarize(&analysis);
            match cli.format {
                Format::Text => write_summary(&mut out, &summary)?,
                Format::Json => write_json(&mut out, &summary)?,
            }
        }
        Command::Sweep => match cli.format {
            Format::Text => write_sweep(&mut out, &analysis)?,
            Format::Json => {
                let value = serde_json::json!({
                    "sweep": analysis.sweep(),
                    "sweep_inverse": analysis.sweep_inverse(),
                });
                write_json(&mut out, &value)?
            }
        },
        Command::Spectrum {
            min_frequency,
            max_frequency,
        } => {
            let max_frequency = max_frequency.unwrap_or(parameters.nyquist());
            if min_frequency > max_frequency {
                bail!("minimum frequency {min_frequency} Hz exceeds maximum {max_frequency} Hz");
            }

            match cli.format {
                Format::Text => write_spectrum(&mut out, &analysis, min_frequency, max_frequency)?,
                Format::Json => {
                    let rows: Vec<_> = analysis
                        .spectrum_rows(min_frequency, max_frequency)
                        .collect();
                    write_json(&mut out, &rows)?
                }
            }
        }
        Command::Impulse => match cli.format {
            Format::Text => write_impulse(&mut out, &analysis)?,
            Format::Json => write_json(&mut out, analysis.impulse())?,
        },
        Command::Analysis => write_json(&mut out, &analysis)?,
    }

    Ok(())
}

fn write_json(out: &mut impl Write, value: &impl Serialize) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;

    Ok(())
}

fn summarize(analysis: &SweepAnalysis) -> Summary {
    let parameters = *analysis.parameters();
    let (impulse_peak_index, impulse_peak) = analysis.impulse_peak();

    // level of the deconvolved response inside the swept band
    let response: Array1<f64> = analysis
        .spectrum_rows(parameters.start_frequency(), parameters.end_frequency())
        .map(|row| row.response_db)
        .collect();

    let (response_min_db, response_max_db) = if response.is_empty() {
        (None, None)
    } else {
        (Some(*response.min_skipnan()), Some(*response.max_skipnan()))
    };

    Summary {
        parameters,
        duration: parameters.duration(),
        bin_frequency: parameters.bin_frequency(),
        impulse_peak_index,
        impulse_peak,
        response_max_db,
        response_min_db,
        elapsed_us: analysis.elapsed().as_micros(),
    }
}

fn write_summary(out: &mut impl Write, summary: &Summary) -> io::Result<()> {
    let parameters = &summary.parameters;

    writeln!(
        out,
        "sweep:          {} Hz to {} Hz at {} Hz",
        parameters.start_frequency(),
        parameters.end_frequency(),
        parameters.sample_rate()
    )?;
    writeln!(
        out,
        "length:         {} samples ({:.3} ms)",
        parameters.length(),
        summary.duration * 1000.0
    )?;
    writeln!(out, "bin spacing:    {} Hz", summary.bin_frequency)?;
    writeln!(
        out,
        "impulse peak:   {:.6} at sample {}",
        summary.impulse_peak, summary.impulse_peak_index
    )?;
    match (summary.response_min_db, summary.response_max_db) {
        (Some(min), Some(max)) => {
            writeln!(out, "response level: {min:.2} dB to {max:.2} dB in band")?
        }
        _ => writeln!(out, "response level: no bin inside the swept band")?,
    }
    writeln!(out, "computed in:    {} µs", summary.elapsed_us)
}

fn write_sweep(out: &mut impl Write, analysis: &SweepAnalysis) -> io::Result<()> {
    writeln!(out, "index\tsweep\tinverse")?;
    for (i, (s, inv)) in analysis
        .sweep()
        .iter()
        .zip(analysis.sweep_inverse().iter())
        .enumerate()
    {
        writeln!(out, "{i}\t{s:.9}\t{inv:.9}")?;
    }

    Ok(())
}

fn write_spectrum(
    out: &mut impl Write,
    analysis: &SweepAnalysis,
    min_frequency: f64,
    max_frequency: f64,
) -> io::Result<()> {
    writeln!(out, "frequency\tsweep_db\tinverse_db\tresponse_db")?;
    for row in analysis.spectrum_rows(min_frequency, max_frequency) {
        writeln!(
            out,
            "{:.3}\t{:.3}\t{:.3}\t{:.3}",
            row.frequency, row.sweep_db, row.inverse_db, row.response_db
        )?;
    }

    Ok(())
}

fn write_impulse(out: &mut impl Write, analysis: &SweepAnalysis) -> io::Result<()> {
    writeln!(out, "index\tamplitude")?;
    for (i, s) in analysis.impulse().iter().enumerate() {
        writeln!(out, "{i}\t{s:.9}")?;
    }

    Ok(())
}
