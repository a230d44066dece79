// One period of the source waveform, still at its original length
#[derive(Clone, Debug, PartialEq)]
pub struct Cycle {
    pub samples: Vec<f32>,
}

impl Cycle {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Slice a mono buffer into consecutive cycles of `cycle_length` samples.
///
/// Trailing samples that don't fill a whole cycle are dropped. A zero length
/// yields nothing; callers skip such files before getting here.
pub fn split_cycles(samples: &[f32], cycle_length: usize) -> Vec<Cycle> {
    if cycle_length == 0 {
        return Vec::new();
    }
    let chunks = samples.chunks_exact(cycle_length);
    let remainder = chunks.remainder().len();
    if remainder > 0 {
        log::trace!("dropping {remainder} trailing samples after the last full cycle");
    }
    chunks
        .map(|c| Cycle { samples: c.to_vec() })
        .collect()
}
