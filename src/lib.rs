//! Offline sine-tone synthesis with linear attack/decay envelopes.
//!
//! Tones are synthesized into a [`SampleArena`] owned by the caller and
//! written out as canonical 16-bit PCM mono WAV files or plain-text dumps.

pub mod arena;
pub mod audio;
pub mod error;
pub mod plan;
pub mod plot;
pub mod spectrum;
pub mod synth;
pub mod wav;

pub use arena::{SampleArena, Wave, WaveView};
pub use error::{Result, ToneError};
pub use synth::{
    DEFAULT_SAMPLE_RATE, EnvelopePolicy, ToneParams, generate_sine_tone, generate_sine_tone_with_ad,
    generate_tone,
};
pub use wav::{encode_wav, write_text_dump, write_wav_file};
