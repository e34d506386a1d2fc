// tonegen/src/main.rs

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};

use tonegen::plan::{self, PlanOptions, RenderJob};
use tonegen::{SampleArena, ToneError, audio, plot, spectrum, synth, wav};

#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
enum CliEnvelope {
    /// Attack ramp wins where attack and decay overlap
    AttackFirst,
    /// Minimum of both ramps everywhere
    Continuous,
    /// Logarithmic ramps between 0.01 and 1
    Logarithmic,
}

/// Renders 440 Hz sine tones with attack/decay envelopes to WAV and text files
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory receiving every output file (created if missing)
    #[arg(short = 'o', long = "output-dir", default_value = plan::DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Sample rate in samples/sec (use 1000 or more for audible results)
    #[arg(
        short = 'r',
        long = "sample-rate",
        default_value_t = synth::DEFAULT_SAMPLE_RATE,
        value_parser = clap::value_parser!(u32).range(1..=synth::MAX_SAMPLE_RATE as i64)
    )]
    sample_rate: u32,

    /// Shape of the attack and decay ramps and how they combine
    #[arg(short = 'e', long = "envelope", value_enum, default_value_t = CliEnvelope::AttackFirst)]
    envelope: CliEnvelope,

    /// Silence added before and after each tone, in seconds
    #[arg(long, default_value_t = 0.0)]
    padding: f32,

    /// Also render a spectrum plot (<name>_spectrum.png) for each tone
    #[arg(short = 's', long = "spectrum", default_value_t = false)]
    spectrum: bool,

    /// FFT size for the spectrum plot
    #[arg(short = 'f', long = "fft-size", default_value_t = 1024)]
    fft_size: usize,

    /// Spectrum image size in WxH format
    #[arg(short = 'i', long = "image-size", default_value = "1024x256")]
    image_size: String,

    /// Dynamic range of the spectrum plot in dB
    #[arg(long, default_value_t = 90.0)]
    dynamic_range: f32,
}

impl From<CliEnvelope> for synth::EnvelopePolicy {
    fn from(e: CliEnvelope) -> Self {
        match e {
            CliEnvelope::AttackFirst => synth::EnvelopePolicy::AttackFirst,
            CliEnvelope::Continuous => synth::EnvelopePolicy::Continuous,
            CliEnvelope::Logarithmic => synth::EnvelopePolicy::Logarithmic,
        }
    }
}

impl Args {
    fn plan_options(&self) -> PlanOptions {
        PlanOptions {
            sample_rate: self.sample_rate,
            envelope: self.envelope.into(),
            padding_s: self.padding,
        }
    }
}

/// Synthesizes one job and writes all of its outputs.
///
/// A failed output does not stop the others; every failure is returned.
fn render_job(job: &RenderJob, arena: &mut SampleArena, args: &Args) -> Vec<ToneError> {
    let mut failures = Vec::new();
    let wave = synth::generate_tone(arena, &job.tone);
    let view = arena.view(&wave);
    let dir = args.output_dir.as_path();

    let wav_path = job.wav_path(dir);
    match wav::write_wav_file(&wav_path, &view) {
        Ok(()) => match audio::probe_wav(&wav_path) {
            Ok(metadata) => info!("  {}: {}", job.name, metadata.to_pretty_string()),
            Err(e) => failures.push(e),
        },
        Err(e) => failures.push(e),
    }

    if job.text_dump {
        if let Err(e) = wav::write_text_dump(&job.text_path(dir), &view) {
            failures.push(e);
        }
    }

    if args.spectrum {
        let (width, height) = plan::parse_image_size(&args.image_size);
        let result = spectrum::compute_spectrum(&view, args.fft_size).and_then(|spectrum| {
            if let Some(peak) = spectrum.peak_hz() {
                debug!("  {}: spectrum peak at {:.1} Hz", job.name, peak);
            }
            plot::save_spectrum_image(
                &job.spectrum_path(dir),
                &spectrum,
                width,
                height,
                args.dynamic_range,
            )
        });
        if let Err(e) = result {
            failures.push(e);
        }
    }

    failures
}

/// Renders every job and returns the failures of the whole run.
fn run(args: &Args) -> Vec<ToneError> {
    if args.sample_rate < 1000 {
        warn!(
            "sample rate {} Hz is below audible fidelity, consider 44100",
            args.sample_rate
        );
    }

    if let Err(e) = std::fs::create_dir_all(&args.output_dir) {
        // Each write will report its own path below
        warn!("couldn't create {}: {}", args.output_dir.display(), e);
    }

    let jobs = plan::default_jobs(args.plan_options());
    let mut arena = SampleArena::new();
    let mut failures = Vec::new();

    let pb = ProgressBar::new(jobs.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    for job in &jobs {
        pb.set_message(job.name.clone());
        failures.extend(render_job(job, &mut arena, args));
        pb.inc(1);
    }
    pb.finish_and_clear();

    debug!("arena held {} samples", arena.len());
    failures
}

fn report(failures: &[ToneError], output_dir: &Path) {
    for failure in failures {
        match std::error::Error::source(failure) {
            Some(cause) => error!("{}: {}", failure, cause),
            None => error!("{}", failure),
        }
    }
    if failures.is_empty() {
        info!("all outputs written to {}", output_dir.display());
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    info!(
        "rendering to {} at {} Hz ({:?} envelope)",
        args.output_dir.display(),
        args.sample_rate,
        args.envelope
    );

    let start = Instant::now();
    let failures = run(&args);
    report(&failures, &args.output_dir);
    info!("done in {:.2?}", start.elapsed());

    if failures.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
