//! Linear resampling of sample snapshots onto a fixed texel count.
//!
//! The plot texture is one texel per surface pixel column, while the sample
//! source hands over whatever length it currently holds. Every frame the
//! snapshot is stretched or squeezed onto the texture width here.

/// Resample `input` onto `output.len()` points by linear interpolation.
///
/// Output index `i` maps to the fractional input position
/// `x = i * (N - 1) / (M - 1)`, so the first and last output points land
/// exactly on the first and last input samples. The lower bracketing index is
/// clamped to `N - 2`, which keeps the upper bracket in range even when `x`
/// lands exactly on the final sample.
///
/// Returns `false` without touching `output` when there is nothing to do
/// (empty input or empty output), so callers can hold the previous frame.
pub fn resample_into(input: &[f32], output: &mut [f32]) -> bool {
    let n = input.len();
    let m = output.len();
    if n == 0 || m == 0 {
        return false;
    }

    if n == 1 {
        output.fill(input[0]);
        return true;
    }

    if m == 1 {
        output[0] = input[0];
        return true;
    }

    let step = (n - 1) as f64 / (m - 1) as f64;
    let last_pair = n - 2;

    for (i, out) in output.iter_mut().enumerate() {
        let x = i as f64 * step;
        let lower = (x.floor() as usize).min(last_pair);
        let weight = (x - lower as f64) as f32;
        let a = input[lower];
        let b = input[lower + 1];
        *out = a + (b - a) * weight;
    }

    true
}

/// Resample `input` to a freshly allocated vector of `target_len` points.
///
/// An empty input or a zero target yields an empty vector.
pub fn resample(input: &[f32], target_len: usize) -> Vec<f32> {
    let mut output = vec![0.0; target_len];
    if !resample_into(input, &mut output) {
        output.clear();
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: &[f32], expected: &[f32]) {
        assert_eq!(actual.len(), expected.len());
        for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert!((a - e).abs() < 1e-3, "index {i}: expected {e}, got {a}");
        }
    }

    #[test]
    fn test_two_samples_onto_four_texels() {
        let out = resample(&[0.0, 1.0], 4);
        assert_close(&out, &[0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0]);
    }

    #[test]
    fn test_identity_when_lengths_match() {
        let input = [0.5, -0.25, 0.75, 0.0, -1.0];
        let out = resample(&input, input.len());
        assert_close(&out, &input);
    }

    #[test]
    fn test_downsample_keeps_endpoints() {
        let input: Vec<f32> = (0..1000).map(|i| i as f32).collect();
        let out = resample(&input, 7);
        assert_eq!(out.len(), 7);
        assert_eq!(out[0], 0.0);
        assert_eq!(out[6], 999.0);
        assert!(out.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_empty_input_leaves_output_untouched() {
        let mut out = [9.0; 3];
        assert!(!resample_into(&[], &mut out));
        assert_eq!(out, [9.0; 3]);
    }

    #[test]
    fn test_zero_target_is_noop() {
        let mut out: [f32; 0] = [];
        assert!(!resample_into(&[1.0, 2.0], &mut out));
        assert!(resample(&[1.0, 2.0], 0).is_empty());
    }

    #[test]
    fn test_single_sample_fills_output() {
        let out = resample(&[0.4], 5);
        assert_eq!(out, vec![0.4; 5]);
    }

    #[test]
    fn test_single_texel_takes_first_sample() {
        assert_eq!(resample(&[0.2, 0.8, 0.6], 1), vec![0.2]);
    }
}
