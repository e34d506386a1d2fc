use std::path::{Path, PathBuf};

use crate::synth::{EnvelopePolicy, ToneParams};

pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_IMAGE_WIDTH: u32 = 1024;
pub const DEFAULT_IMAGE_HEIGHT: u32 = 256;

/// One tone to synthesize and the outputs to produce from it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderJob {
    /// File stem shared by every output of this job
    pub name: String,
    pub tone: ToneParams,
    /// Also write a `<name>.txt` sample dump
    pub text_dump: bool,
}

impl RenderJob {
    pub fn wav_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.wav", self.name))
    }

    pub fn text_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.txt", self.name))
    }

    pub fn spectrum_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}_spectrum.png", self.name))
    }
}

/// Options shared by every job of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanOptions {
    pub sample_rate: u32,
    pub envelope: EnvelopePolicy,
    pub padding_s: f32,
}

/// The standard render set: a long and a short 440 Hz tone, plus a text dump
/// of the long one.
pub fn default_jobs(options: PlanOptions) -> Vec<RenderJob> {
    let tone = |duration_s: f32, attack_s: f32, decay_s: f32| {
        ToneParams::new(440.0, duration_s, attack_s, decay_s)
            .with_sample_rate(options.sample_rate)
            .with_envelope(options.envelope)
            .with_padding(options.padding_s, options.padding_s)
    };

    vec![
        RenderJob {
            name: "long_sine".to_string(),
            tone: tone(8.0, 2.0, 2.5),
            text_dump: true,
        },
        RenderJob {
            name: "short_sine".to_string(),
            tone: tone(0.25, 0.1, 0.11),
            text_dump: false,
        },
    ]
}

/// Parses `WxH`; anything malformed or zero falls back to the defaults.
pub fn parse_image_size(s: &str) -> (u32, u32) {
    let parsed = s
        .split_once('x')
        .and_then(|(w, h)| Some((w.trim().parse::<u32>().ok()?, h.trim().parse::<u32>().ok()?)));
    match parsed {
        Some((w, h)) if w > 0 && h > 0 => (w, h),
        _ => (DEFAULT_IMAGE_WIDTH, DEFAULT_IMAGE_HEIGHT),
    }
}
