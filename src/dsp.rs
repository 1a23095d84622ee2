use realfft::num_complex::Complex;
use realfft::{RealFftPlanner, RealToComplex};
use std::sync::Arc;

/// Average the interleaved channels of `raw` into a fixed-length mono block.
///
/// Frame `i` of `out` is the mean of the `channels` samples at frame `i`;
/// frames not delivered this tick (`i >= got / channels`) are zeroed, so the
/// transform always runs over a full-length buffer. A wholly failed read
/// (`got == 0`) therefore produces silence, not an error.
pub fn downmix(raw: &[i16], got: usize, channels: usize, out: &mut [f64]) {
    let frames = got / channels;
    for (i, slot) in out.iter_mut().enumerate() {
        *slot = if i < frames {
            let mut sum = 0.0;
            for c in 0..channels {
                sum += raw[i * channels + c] as f64;
            }
            sum / channels as f64
        } else {
            0.0
        };
    }
}

/// Owner of the forward real transform and its buffer arena.
///
/// The plan is bound at startup to one fixed length and never re-planned;
/// only the buffer contents change between ticks. Note that `realfft` uses
/// the input buffer as working storage, so `input()` is only meaningful on
/// ticks that skip `execute()`.
pub struct SpectralEngine {
    plan: Arc<dyn RealToComplex<f64>>,
    input: Vec<f64>,
    spectrum: Vec<Complex<f64>>,
    scratch: Vec<Complex<f64>>,
}

impl SpectralEngine {
    pub fn new(len: usize) -> Self {
        let plan = RealFftPlanner::<f64>::new().plan_fft_forward(len);
        let input = plan.make_input_vec();
        let spectrum = plan.make_output_vec();
        let scratch = plan.make_scratch_vec();

        Self {
            plan,
            input,
            spectrum,
            scratch,
        }
    }

    /// Transform length (mono samples per tick).
    pub fn len(&self) -> usize {
        self.input.len()
    }

    pub fn input(&self) -> &[f64] {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut [f64] {
        &mut self.input
    }

    /// Frequency-domain output of the last `execute()`, length `len/2 + 1`.
    pub fn spectrum(&self) -> &[Complex<f64>] {
        &self.spectrum
    }

    /// Re-run the forward transform over the current input block.
    pub fn execute(&mut self) {
        // The plan only reports length mismatches and all three buffers
        // come from the plan itself.
        self.plan
            .process_with_scratch(&mut self.input, &mut self.spectrum, &mut self.scratch)
            .ok();
    }
}
