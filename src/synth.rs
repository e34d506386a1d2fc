use std::f64::consts::TAU;

use log::debug;

use crate::arena::{SampleArena, Wave};

/// Samples per second used when a caller does not pick a rate.
///
/// Far below audible fidelity; real renders should pass 1000 or more.
pub const DEFAULT_SAMPLE_RATE: u32 = 200;

/// Highest sample rate accepted on the command line.
pub const MAX_SAMPLE_RATE: u32 = 768_000;

/// Full-scale amplitude. Kept symmetric so -32768 is never produced.
pub const FULL_SCALE: f64 = i16::MAX as f64;

/// Logarithmic ramps span `1.01 - 10^0` to `1.01 - 10^-2`, i.e. 0.01 to 1.0.
const LOG_RAMP_OFFSET: f64 = 1.01;

/// How the attack and decay ramps are shaped and combined.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum EnvelopePolicy {
    /// Linear ramps; the attack ramp is checked first and wins wherever both windows hold.
    #[default]
    AttackFirst,
    /// Linear ramps, `min(attack, decay, 1)`: both ramps always apply.
    Continuous,
    /// Logarithmic ramps between 0.01 and 1, windows measured in whole samples.
    Logarithmic,
}

/// Envelope geometry of one tone body, in seconds and in samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ramps {
    pub duration_s: f64,
    pub attack_s: f64,
    pub decay_s: f64,
    pub count: usize,
    pub attack_count: usize,
    pub decay_count: usize,
}

impl Ramps {
    pub fn new(duration_s: f32, attack_s: f32, decay_s: f32, sample_rate: u32) -> Self {
        Self {
            duration_s: duration_s as f64,
            attack_s: attack_s as f64,
            decay_s: decay_s as f64,
            count: sample_count(duration_s, sample_rate),
            attack_count: sample_count(attack_s, sample_rate),
            decay_count: sample_count(decay_s, sample_rate),
        }
    }
}

impl EnvelopePolicy {
    /// Gain applied at time `t` of a tone lasting `duration_s`.
    ///
    /// For [`EnvelopePolicy::Logarithmic`] this is the continuous-time form of
    /// the curve; rendering uses the per-sample form in [`EnvelopePolicy::gain`].
    pub fn factor(self, t: f64, duration_s: f64, attack_s: f64, decay_s: f64) -> f64 {
        let decay_start = duration_s - decay_s;
        match self {
            EnvelopePolicy::AttackFirst => {
                if t < attack_s {
                    t / attack_s
                } else if t > decay_start {
                    1.0 - (t - decay_start) / decay_s
                } else {
                    1.0
                }
            }
            EnvelopePolicy::Continuous => {
                let attack = if attack_s > 0.0 { t / attack_s } else { 1.0 };
                let decay = if decay_s > 0.0 { (duration_s - t) / decay_s } else { 1.0 };
                attack.min(decay).min(1.0).clamp(0.0, 1.0)
            }
            EnvelopePolicy::Logarithmic => {
                if t < attack_s {
                    log_rise(t / attack_s)
                } else if t >= decay_start && decay_s > 0.0 {
                    log_fall((t - decay_start) / decay_s)
                } else {
                    1.0
                }
            }
        }
    }

    /// Gain for sample `i` (at time `t`) of a tone body described by `ramps`.
    pub fn gain(self, i: usize, t: f64, ramps: &Ramps) -> f64 {
        match self {
            EnvelopePolicy::Logarithmic => {
                let decay_start = ramps.count.saturating_sub(ramps.decay_count);
                if i < ramps.attack_count {
                    log_rise(ramp_position(i, ramps.attack_count))
                } else if i >= decay_start && ramps.decay_count > 0 {
                    log_fall(ramp_position(i - decay_start, ramps.decay_count))
                } else {
                    1.0
                }
            }
            _ => self.factor(t, ramps.duration_s, ramps.attack_s, ramps.decay_s),
        }
    }
}

/// Position of sample `k` in a ramp of `n` samples, first at 0 and last at 1.
fn ramp_position(k: usize, n: usize) -> f64 {
    if n > 1 { k as f64 / (n - 1) as f64 } else { 1.0 }
}

/// 0.01 at `x = 0` rising to 1.0 at `x = 1`.
fn log_rise(x: f64) -> f64 {
    (LOG_RAMP_OFFSET - 10f64.powf(-2.0 * x)).clamp(0.0, 1.0)
}

/// 1.0 at `x = 0` falling to 0.01 at `x = 1`.
fn log_fall(x: f64) -> f64 {
    (LOG_RAMP_OFFSET - 10f64.powf(2.0 * x - 2.0)).clamp(0.0, 1.0)
}

/// Parameters for [`generate_tone`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneParams {
    pub tone_hz: f32,
    pub duration_s: f32,
    pub attack_s: f32,
    pub decay_s: f32,
    pub sample_rate: u32,
    /// Silence before the tone, in seconds.
    pub padding_left_s: f32,
    /// Silence after the tone, in seconds.
    pub padding_right_s: f32,
    pub envelope: EnvelopePolicy,
}

impl ToneParams {
    pub fn new(tone_hz: f32, duration_s: f32, attack_s: f32, decay_s: f32) -> Self {
        Self {
            tone_hz,
            duration_s,
            attack_s,
            decay_s,
            sample_rate: DEFAULT_SAMPLE_RATE,
            padding_left_s: 0.0,
            padding_right_s: 0.0,
            envelope: EnvelopePolicy::default(),
        }
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_padding(mut self, left_s: f32, right_s: f32) -> Self {
        self.padding_left_s = left_s;
        self.padding_right_s = right_s;
        self
    }

    pub fn with_envelope(mut self, envelope: EnvelopePolicy) -> Self {
        self.envelope = envelope;
        self
    }
}

/// Number of whole samples covering `seconds`; fractional samples are dropped.
///
/// The product is taken in `f32` so that 0.7 s at 1000 Hz is 700 samples,
/// not the 699 a widened `0.699999988` would give.
fn sample_count(seconds: f32, sample_rate: u32) -> usize {
    // `as` saturates negative and NaN values to 0
    (seconds * sample_rate as f32).floor() as usize
}

fn quantize(amplitude: f64) -> i16 {
    // `as` truncates toward zero
    (amplitude * FULL_SCALE) as i16
}

/// Writes `out.len()` sine samples, sample `i` scaled by `gain(i, t)`.
fn fill_sine<G>(out: &mut [i16], tone_hz: f64, sample_rate: u32, gain: G)
where
    G: Fn(usize, f64) -> f64,
{
    let dt = 1.0 / sample_rate as f64;
    for (i, sample) in out.iter_mut().enumerate() {
        let t = i as f64 * dt;
        let amplitude = (TAU * tone_hz * t).sin();
        *sample = quantize(amplitude * gain(i, t));
    }
}

/// Plain sine tone, no envelope.
///
/// Produces `floor(duration_ms / 1000 * sample_rate)` samples.
pub fn generate_sine_tone(
    arena: &mut SampleArena,
    tone_hz: f32,
    duration_ms: u32,
    sample_rate: u32,
) -> Wave {
    let count = (duration_ms as u64 * sample_rate as u64 / 1000) as usize;
    let span = arena.alloc(count);
    fill_sine(arena.slice_mut(span.clone()), tone_hz as f64, sample_rate, |_, _| 1.0);
    arena.wave(span, 1, sample_rate)
}

/// Sine tone shaped by linear attack and decay ramps.
///
/// Produces `floor(duration_s * sample_rate)` samples. Where the two ramps
/// overlap the attack ramp applies (see [`EnvelopePolicy::AttackFirst`]).
pub fn generate_sine_tone_with_ad(
    arena: &mut SampleArena,
    tone_hz: f32,
    duration_s: f32,
    attack_s: f32,
    decay_s: f32,
    sample_rate: u32,
) -> Wave {
    let params = ToneParams::new(tone_hz, duration_s, attack_s, decay_s).with_sample_rate(sample_rate);
    generate_tone(arena, &params)
}

/// General entry point: envelope policy choice plus optional silence padding.
///
/// Padding samples are zero and count toward the returned wave's `count`.
pub fn generate_tone(arena: &mut SampleArena, params: &ToneParams) -> Wave {
    let rate = params.sample_rate;
    let ramps = Ramps::new(params.duration_s, params.attack_s, params.decay_s, rate);

    let left = sample_count(params.padding_left_s, rate);
    let body = ramps.count;
    let right = sample_count(params.padding_right_s, rate);

    debug!(
        "synth: {} Hz, {}s (attack {}s, decay {}s, {:?}) at {} Hz -> {}+{}+{} samples",
        params.tone_hz,
        params.duration_s,
        params.attack_s,
        params.decay_s,
        params.envelope,
        rate,
        left,
        body,
        right
    );

    let span = arena.alloc(left + body + right);
    let samples = arena.slice_mut(span.clone());
    let envelope = params.envelope;
    fill_sine(&mut samples[left..left + body], params.tone_hz as f64, rate, |i, t| {
        envelope.gain(i, t, &ramps)
    });

    arena.wave(span, 1, rate)
}
