use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::info;

use crate::arena::WaveView;
use crate::error::{Result, ToneError};

/// Size of everything before the sample bytes.
pub const HEADER_SIZE: u32 = 44;

const FMT_CHUNK_SIZE: u32 = 16;
const FORMAT_PCM: u16 = 1;
const BITS_PER_SAMPLE: u16 = 16;
const BYTES_PER_SAMPLE: u32 = (BITS_PER_SAMPLE / 8) as u32;

/// Derived header fields for a 16-bit PCM stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    pub channels: u16,
    pub sample_rate: u32,
    pub data_size: u32,
    riff_size: u32,
    byte_rate: u32,
    block_align: u16,
}

impl WavHeader {
    /// Fails with `InvalidInput` when a field does not fit its 16/32-bit slot.
    pub fn new(count: u32, channels: u16, sample_rate: u32) -> io::Result<Self> {
        let too_large = |field: &str| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "WAV {} overflows for {} samples, {} channels at {} Hz",
                    field, count, channels, sample_rate
                ),
            )
        };

        let data_size = count
            .checked_mul(channels as u32)
            .and_then(|n| n.checked_mul(BYTES_PER_SAMPLE))
            .ok_or_else(|| too_large("data size"))?;
        let riff_size = data_size
            .checked_add(HEADER_SIZE - 8)
            .ok_or_else(|| too_large("RIFF size"))?;
        let byte_rate = sample_rate
            .checked_mul(channels as u32)
            .and_then(|n| n.checked_mul(BYTES_PER_SAMPLE))
            .ok_or_else(|| too_large("byte rate"))?;
        let block_align = channels
            .checked_mul(BYTES_PER_SAMPLE as u16)
            .ok_or_else(|| too_large("block align"))?;

        Ok(Self {
            channels,
            sample_rate,
            data_size,
            riff_size,
            byte_rate,
            block_align,
        })
    }

    /// RIFF chunk size: total file size minus the 8-byte RIFF preamble.
    pub fn riff_size(&self) -> u32 {
        self.riff_size
    }

    pub fn byte_rate(&self) -> u32 {
        self.byte_rate
    }

    pub fn block_align(&self) -> u16 {
        self.block_align
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE as usize] {
        let mut buf = [0u8; HEADER_SIZE as usize];
        buf[0..4].copy_from_slice(b"RIFF");
        buf[4..8].copy_from_slice(&self.riff_size().to_le_bytes());
        buf[8..12].copy_from_slice(b"WAVE");

        // fmt chunk
        buf[12..16].copy_from_slice(b"fmt ");
        buf[16..20].copy_from_slice(&FMT_CHUNK_SIZE.to_le_bytes());
        buf[20..22].copy_from_slice(&FORMAT_PCM.to_le_bytes());
        buf[22..24].copy_from_slice(&self.channels.to_le_bytes());
        buf[24..28].copy_from_slice(&self.sample_rate.to_le_bytes());
        buf[28..32].copy_from_slice(&self.byte_rate().to_le_bytes());
        buf[32..34].copy_from_slice(&self.block_align().to_le_bytes());
        buf[34..36].copy_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

        // data chunk
        buf[36..40].copy_from_slice(b"data");
        buf[40..44].copy_from_slice(&self.data_size.to_le_bytes());
        buf
    }
}

/// Serializes a wave as canonical RIFF/WAVE: one `fmt ` chunk, one `data` chunk.
pub fn encode_wav<W: Write>(out: &mut W, wave: &WaveView) -> io::Result<()> {
    let count = u32::try_from(wave.samples.len() / wave.channels.max(1) as usize).map_err(|_| {
        io::Error::new(io::ErrorKind::InvalidInput, "too many samples for a WAV file")
    })?;
    let header = WavHeader::new(count, wave.channels, wave.sample_rate)?;
    out.write_all(&header.to_bytes())?;

    let frames = header.data_size as usize / BYTES_PER_SAMPLE as usize;
    for sample in &wave.samples[..frames] {
        out.write_all(&sample.to_le_bytes())?;
    }
    Ok(())
}

/// Creates (or truncates) `path` and writes the wave to it.
///
/// The handle is closed on every return path. A failed write may leave a
/// truncated file behind; removing it is up to the caller.
pub fn write_wav_file(path: &Path, wave: &WaveView) -> Result<()> {
    let mut out = create(path)?;
    encode_wav(&mut out, wave)
        .and_then(|_| out.flush())
        .map_err(|source| ToneError::Write { path: path.to_path_buf(), source })?;

    info!("wrote {} ({} samples, {} Hz)", path.display(), wave.count(), wave.sample_rate);
    Ok(())
}

/// Writes every sample as a decimal integer on its own line.
pub fn write_text_dump(path: &Path, wave: &WaveView) -> Result<()> {
    let mut out = create(path)?;
    wave.samples
        .iter()
        .try_for_each(|sample| writeln!(out, "{}", sample))
        .and_then(|_| out.flush())
        .map_err(|source| ToneError::Write { path: path.to_path_buf(), source })?;

    info!("wrote {} ({} lines)", path.display(), wave.samples.len());
    Ok(())
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| ToneError::Open { path: path.to_path_buf(), source })
}
