use super::cycle::Cycle;
use crate::shared::WAVEFORM_LEN;
use crate::wavetable::Waveform;

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

// Linear resampler that maps `target_len` evenly spaced read positions onto
// [0, len - 1], so the first and last output samples land exactly on the
// first and last input samples.
pub fn resample(samples: &[f32], target_len: usize) -> Vec<f32> {
    let len = samples.len();
    if len == target_len {
        return samples.to_vec(); // nothing to interpolate
    }
    if len == 0 {
        return vec![0.0; target_len];
    }
    if len == 1 || target_len == 1 {
        return vec![samples[0]; target_len];
    }

    let last = len - 1;
    let span = (target_len - 1) as f64;
    (0..target_len)
        .map(|i| {
            // integer numerator keeps whole-number positions exact
            let src_pos = (i * last) as f64 / span; // ex. 3.7
            let idx = src_pos.floor() as usize; // ex. 3
            if idx >= last {
                return samples[last];
            }
            let frac = (src_pos - idx as f64) as f32; // ex. 0.7
            lerp(samples[idx], samples[idx + 1], frac)
        })
        .collect()
}

// Canonicalize a cycle to the fixed grid frame length
pub fn to_waveform(cycle: &Cycle) -> Waveform {
    let resampled = resample(&cycle.samples, WAVEFORM_LEN);
    let mut samples = [0.0f32; WAVEFORM_LEN];
    samples.copy_from_slice(&resampled);
    Waveform::new(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_length_is_an_exact_copy() {
        let input: Vec<f32> = (0..128).map(|i| ((i * 37) % 11) as f32 * 0.1 - 0.5).collect();
        assert_eq!(resample(&input, 128), input);

        let odd: Vec<f32> = vec![0.3, -0.7, 0.11];
        assert_eq!(resample(&odd, 3), odd);
    }

    #[test]
    fn endpoints_are_preserved() {
        let input: Vec<f32> = (0..2048).map(|i| (i as f32 * 0.01).sin()).collect();
        let out = resample(&input, 128);
        assert_eq!(out.len(), 128);
        assert_eq!(out[0], input[0]);
        assert_eq!(out[127], input[2047]);
    }

    #[test]
    fn upsampling_a_line_stays_on_the_line() {
        let out = resample(&[0.0, 1.0], 5);
        assert_eq!(out, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn degenerate_inputs() {
        assert_eq!(resample(&[], 4), vec![0.0; 4]);
        assert_eq!(resample(&[0.25], 3), vec![0.25; 3]);
        assert_eq!(resample(&[0.1, 0.2, 0.3], 1), vec![0.1]);
    }

    #[test]
    fn resampling_is_deterministic() {
        let input: Vec<f32> = (0..600).map(|i| (i as f32 * 0.37).cos()).collect();
        assert_eq!(resample(&input, 128), resample(&input, 128));
    }

    #[test]
    fn waveform_from_cycle_has_canonical_length() {
        let cycle = Cycle { samples: (0..64).map(|i| i as f32 / 63.0).collect() };
        let wave = to_waveform(&cycle);
        assert_eq!(wave.samples().len(), WAVEFORM_LEN);
        assert_eq!(wave.samples()[0], 0.0);
        assert_eq!(wave.samples()[WAVEFORM_LEN - 1], 1.0);
    }
}
