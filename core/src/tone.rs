use dasp_signal::Signal;

pub const BEEP_HZ: f64 = 880.0;
pub const BEEP_SECS: f64 = 0.1;

// envelope: exponential ramp up to the peak over 10ms, back down to the
// floor by 90ms, so the square wave starts and ends without a click
const ATTACK_SECS: f64 = 0.01;
const RELEASE_END_SECS: f64 = 0.09;
const PEAK_GAIN: f64 = 0.04;
const FLOOR_GAIN: f64 = 1e-4;

/// One short square-wave beep with a click-avoiding envelope. Yields
/// `BEEP_SECS` worth of samples, then reports itself exhausted.
pub struct BeepSignal {
    sample_rate: f64,
    position: u64,
    total: u64,
    phase: f64,
}

impl BeepSignal {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate: sample_rate as f64,
            position: 0,
            total: Self::sample_count(sample_rate),
            phase: 0.0,
        }
    }

    pub fn sample_count(sample_rate: u32) -> u64 {
        (sample_rate as f64 * BEEP_SECS) as u64
    }

    fn gain_at(&self, secs: f64) -> f64 {
        if secs < ATTACK_SECS {
            FLOOR_GAIN * (PEAK_GAIN / FLOOR_GAIN).powf(secs / ATTACK_SECS)
        } else if secs < RELEASE_END_SECS {
            let t = (secs - ATTACK_SECS) / (RELEASE_END_SECS - ATTACK_SECS);
            PEAK_GAIN * (FLOOR_GAIN / PEAK_GAIN).powf(t)
        } else {
            FLOOR_GAIN
        }
    }
}

impl Signal for BeepSignal {
    type Frame = f32;

    fn next(&mut self) -> Self::Frame {
        if self.is_exhausted() {
            return 0.0;
        }
        let secs = self.position as f64 / self.sample_rate;
        let square = if self.phase < 0.5 { 1.0 } else { -1.0 };
        self.phase = (self.phase + BEEP_HZ / self.sample_rate).fract();
        self.position += 1;
        (square * self.gain_at(secs)) as f32
    }

    fn is_exhausted(&self) -> bool {
        self.position >= self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: u32 = 48_000;

    fn drain(signal: &mut BeepSignal) -> Vec<f32> {
        let mut samples = Vec::new();
        while !signal.is_exhausted() {
            samples.push(signal.next());
        }
        samples
    }

    #[test]
    fn exhausts_after_one_hundred_ms() {
        let mut signal = BeepSignal::new(RATE);
        let samples = drain(&mut signal);
        assert_eq!(samples.len() as u64, BeepSignal::sample_count(RATE));
        assert_eq!(samples.len(), 4800);
    }

    #[test]
    fn silent_after_exhaustion() {
        let mut signal = BeepSignal::new(RATE);
        drain(&mut signal);
        assert_eq!(signal.next(), 0.0);
        assert!(signal.is_exhausted());
    }

    #[test]
    fn envelope_stays_under_peak_and_starts_and_ends_quiet() {
        let mut signal = BeepSignal::new(RATE);
        let samples = drain(&mut signal);

        let peak = samples.iter().fold(0.0f32, |max, s| max.max(s.abs()));
        assert!(peak <= 0.041, "peak {peak} above envelope ceiling");

        assert!(samples[0].abs() <= 0.001, "starts with a click");
        assert!(samples.last().unwrap().abs() <= 0.001, "ends with a click");
    }

    #[test]
    fn square_wave_swings_both_ways() {
        let mut signal = BeepSignal::new(RATE);
        let samples = drain(&mut signal);
        assert!(samples.iter().any(|s| *s > 0.01));
        assert!(samples.iter().any(|s| *s < -0.01));
    }

    #[test]
    fn alternates_near_the_carrier_frequency() {
        let mut signal = BeepSignal::new(RATE);
        let samples = drain(&mut signal);
        let crossings = samples
            .windows(2)
            .filter(|w| (w[0] > 0.0) != (w[1] > 0.0))
            .count();
        // 880Hz over 100ms is 88 cycles, two crossings per cycle
        assert!((150..=200).contains(&crossings), "crossings: {crossings}");
    }
}
