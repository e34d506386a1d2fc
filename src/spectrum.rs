use log::debug;
use rustfft::{FftPlanner, num_complex::Complex};

use crate::arena::WaveView;
use crate::error::{Result, ToneError};
use crate::synth::FULL_SCALE;

/// Floor applied before taking the logarithm, avoids log10(0)
const MIN_MAGNITUDE: f32 = 1.0e-9;

/// Magnitude spectrum of one FFT frame
pub struct Spectrum {
    /// Magnitudes in dB for bins `0..=n_fft / 2`
    pub bins_db: Vec<f32>,
    /// Sample rate of the analysed wave
    pub sample_rate: u32,
    /// FFT size, determines bin width
    pub n_fft: usize,
}

impl Spectrum {
    /// Centre frequency of bin `k` in Hz.
    pub fn bin_hz(&self, k: usize) -> f32 {
        k as f32 * self.sample_rate as f32 / self.n_fft as f32
    }

    pub fn bin_width_hz(&self) -> f32 {
        self.bin_hz(1)
    }

    /// Frequency of the strongest non-DC bin, `None` if there is no such bin.
    pub fn peak_hz(&self) -> Option<f32> {
        self.bins_db
            .iter()
            .enumerate()
            .skip(1)
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(k, _)| self.bin_hz(k))
    }

    pub fn max_db(&self) -> f32 {
        self.bins_db.iter().cloned().fold(f32::MIN, f32::max)
    }
}

/// FFT of the first `n_fft` samples of a mono wave (zero-padded if shorter).
pub fn compute_spectrum(wave: &WaveView, n_fft: usize) -> Result<Spectrum> {
    if n_fft < 2 {
        return Err(ToneError::InvalidFftSize(n_fft));
    }

    let mut planner = FftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(n_fft);

    let mut frame: Vec<Complex<f32>> = wave
        .samples
        .iter()
        .take(n_fft)
        .map(|&s| Complex::new((s as f64 / FULL_SCALE) as f32, 0.0))
        .collect();
    frame.resize(n_fft, Complex::new(0.0, 0.0));

    fft.process(&mut frame);

    // Only the first half of the spectrum is meaningful for real input
    let num_bins = n_fft / 2 + 1;
    let bins_db = frame[..num_bins]
        .iter()
        .map(|c| 20.0 * c.norm().max(MIN_MAGNITUDE).log10())
        .collect();

    debug!(
        "spectrum: {} samples, n_fft = {}, {} bins",
        wave.samples.len().min(n_fft),
        n_fft,
        num_bins
    );

    Ok(Spectrum {
        bins_db,
        sample_rate: wave.sample_rate,
        n_fft,
    })
}
