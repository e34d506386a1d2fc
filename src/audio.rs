use std::path::Path;

use crate::error::{Result, ToneError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleType {
    U8,
    I16,
    I24,
    I32,
    F32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AudioMetadata {
    pub codec: String,
    pub sample_rate: u32,
    pub channels: u16,
    pub total_samples: u64,
    pub sample_type: SampleType,
}

pub fn format_duration(duration: f64) -> String {
    if duration < 0.0 {
        return format!("-{}", format_duration(-duration));
    }

    if duration < 1.0 {
        let ms = (duration * 1000.0).round() as u32;
        return format!("{}ms", ms);
    }

    let zero_ms = ((duration * 1000.0).round() as u64) % 1000 == 0;
    if duration < 60.0 {
        return if zero_ms {
            format!("{:.0}s", duration)
        } else {
            format!("{:.3}s", duration)
        };
    }

    let minutes = (duration / 60.0).trunc() as u32;
    let seconds = duration % 60.0;
    if zero_ms {
        format!("{}:{:02.0}m", minutes, seconds)
    } else {
        format!("{}:{:06.3}m", minutes, seconds)
    }
}

impl AudioMetadata {
    pub fn duration_s(&self) -> f64 {
        self.total_samples as f64 / self.sample_rate as f64
    }

    pub fn to_pretty_string(&self) -> String {
        format!(
            "'{}', {} Hz, {}, {}, {}",
            self.codec,
            self.sample_rate,
            match self.channels {
                1 => "mono".to_string(),
                2 => "stereo".to_string(),
                n => format!("{} ch", n),
            },
            match self.sample_type {
                SampleType::U8 => "u8",
                SampleType::I16 => "i16",
                SampleType::I24 => "i24",
                SampleType::I32 => "i32",
                SampleType::F32 => "f32",
            },
            format_duration(self.duration_s())
        )
    }
}

/// Reads back the header of a WAV file written by this tool (or anyone else).
pub fn probe_wav(path: &Path) -> Result<AudioMetadata> {
    let reader = hound::WavReader::open(path)
        .map_err(|source| ToneError::Probe { path: path.to_path_buf(), source })?;
    let spec = reader.spec();

    Ok(AudioMetadata {
        codec: "wav".to_string(),
        sample_rate: spec.sample_rate,
        channels: spec.channels,
        total_samples: reader.duration() as u64,
        sample_type: match spec.sample_format {
            hound::SampleFormat::Int => match spec.bits_per_sample {
                8 => SampleType::U8,
                16 => SampleType::I16,
                24 => SampleType::I24,
                _ => SampleType::I32,
            },
            hound::SampleFormat::Float => SampleType::F32,
        },
    })
}
