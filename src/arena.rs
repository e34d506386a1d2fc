use std::ops::Range;

/// A mono or interleaved 16-bit sample buffer living inside a [`SampleArena`].
///
/// The wave itself does not own its samples: it is an index span into the
/// arena that produced it, plus format metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wave {
    span: Range<usize>,
    pub count: u32,
    pub channels: u16,
    pub sample_rate: u32,
}

impl Wave {
    pub fn duration_s(&self) -> f64 {
        self.count as f64 / self.sample_rate as f64
    }
}

/// Borrowed samples plus the format needed to serialize or analyse them.
#[derive(Debug, Clone, Copy)]
pub struct WaveView<'a> {
    pub samples: &'a [i16],
    pub channels: u16,
    pub sample_rate: u32,
}

impl<'a> WaveView<'a> {
    pub fn new(samples: &'a [i16], channels: u16, sample_rate: u32) -> Self {
        Self { samples, channels, sample_rate }
    }

    pub fn count(&self) -> u32 {
        (self.samples.len() / self.channels.max(1) as usize) as u32
    }
}

/// Bulk storage for every sample generated during one run.
///
/// Allocations are never freed one by one; the whole arena is dropped (or
/// reset) at once when the run ends.
#[derive(Debug, Default)]
pub struct SampleArena {
    samples: Vec<i16>,
}

impl SampleArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { samples: Vec::with_capacity(capacity) }
    }

    /// Reserves `count` zeroed samples and returns their span.
    pub fn alloc(&mut self, count: usize) -> Range<usize> {
        let start = self.samples.len();
        self.samples.resize(start + count, 0);
        start..start + count
    }

    pub fn slice_mut(&mut self, span: Range<usize>) -> &mut [i16] {
        &mut self.samples[span]
    }

    /// Wraps a fully populated span into a wave record.
    pub fn wave(&self, span: Range<usize>, channels: u16, sample_rate: u32) -> Wave {
        let count = (span.len() / channels.max(1) as usize) as u32;
        Wave { span, count, channels, sample_rate }
    }

    pub fn samples(&self, wave: &Wave) -> &[i16] {
        &self.samples[wave.span.clone()]
    }

    pub fn view(&self, wave: &Wave) -> WaveView<'_> {
        WaveView::new(self.samples(wave), wave.channels, wave.sample_rate)
    }

    /// Total samples held across all waves.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Drops every allocation at once. Waves handed out earlier become invalid.
    pub fn reset(&mut self) {
        self.samples.clear();
    }
}
