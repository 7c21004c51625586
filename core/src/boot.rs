pub trait TimeDaemon {
    fn get_now_ms(&self) -> f64;
}

#[derive(Copy, Clone, Debug)]
pub struct BootLine {
    pub text: &'static str,
    pub delay_ms: u64,
}

pub const BOOT_SCRIPT: &[BootLine] = &[
    BootLine { text: "ARYAN BIOS v0.8", delay_ms: 450 },
    BootLine { text: "Checking memory... OK", delay_ms: 350 },
    BootLine { text: "Detecting devices... OK", delay_ms: 350 },
    BootLine { text: "Mounting cartridge: PORTFOLIO.NES", delay_ms: 500 },
    BootLine { text: "Loading assets... OK", delay_ms: 400 },
    BootLine { text: "Initializing engine... OK", delay_ms: 450 },
    BootLine { text: "Boot complete.", delay_ms: 300 },
];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Booting,
    Ready,
}

/// Reveals a fixed script line by line against a wall clock. Each line is
/// due `delay_ms` after the previous one was handed out; the sequence is
/// finished once the last line's delay has elapsed too.
#[derive(Debug)]
pub struct BootSequencer {
    script: &'static [BootLine],
    next_line: usize,
    next_due_ms: f64,
    started: bool,
}

impl BootSequencer {
    pub fn new(script: &'static [BootLine]) -> Self {
        Self {
            script,
            next_line: 0,
            next_due_ms: 0.0,
            started: false,
        }
    }

    /// Arms the sequencer; the first line is due immediately. Calling this
    /// again while armed is a no-op.
    pub fn start(&mut self, now_ms: f64) {
        if self.started {
            return;
        }
        self.started = true;
        self.next_line = 0;
        self.next_due_ms = now_ms;
    }

    /// Hands out the next line if its deadline has passed. Lines always come
    /// out in script order; a late clock catches up one line per call.
    pub fn poll(&mut self, now_ms: f64) -> Option<&'static str> {
        if !self.started || self.next_line >= self.script.len() || now_ms < self.next_due_ms {
            return None;
        }
        let line = &self.script[self.next_line];
        self.next_line += 1;
        self.next_due_ms += line.delay_ms as f64;
        Some(line.text)
    }

    pub fn finished(&self, now_ms: f64) -> bool {
        self.started && self.next_line >= self.script.len() && now_ms >= self.next_due_ms
    }

    /// Re-arms the sequencer for another full run.
    pub fn reset(&mut self) {
        self.started = false;
        self.next_line = 0;
        self.next_due_ms = 0.0;
    }

    /// Marks the whole script as already played out.
    pub fn skip(&mut self) {
        self.started = true;
        self.next_line = self.script.len();
        self.next_due_ms = f64::MIN;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static SHORT_SCRIPT: &[BootLine] = &[
        BootLine { text: "one", delay_ms: 100 },
        BootLine { text: "two", delay_ms: 200 },
        BootLine { text: "three", delay_ms: 50 },
    ];

    #[test]
    fn lines_come_out_in_order_at_their_deadlines() {
        let mut seq = BootSequencer::new(SHORT_SCRIPT);
        seq.start(1000.0);

        assert_eq!(seq.poll(1000.0), Some("one"));
        assert_eq!(seq.poll(1000.0), None);
        assert_eq!(seq.poll(1099.0), None);
        assert_eq!(seq.poll(1100.0), Some("two"));
        assert_eq!(seq.poll(1300.0), Some("three"));
        assert_eq!(seq.poll(10_000.0), None);
    }

    #[test]
    fn finished_only_after_last_delay() {
        let mut seq = BootSequencer::new(SHORT_SCRIPT);
        seq.start(0.0);
        while seq.poll(1000.0).is_some() {}
        assert!(!seq.finished(340.0));
        assert!(seq.finished(350.0));
    }

    #[test]
    fn late_clock_catches_up_in_order() {
        let mut seq = BootSequencer::new(SHORT_SCRIPT);
        seq.start(0.0);
        let mut out = Vec::new();
        while let Some(text) = seq.poll(5000.0) {
            out.push(text);
        }
        assert_eq!(out, vec!["one", "two", "three"]);
    }

    #[test]
    fn start_is_idempotent_while_armed() {
        let mut seq = BootSequencer::new(SHORT_SCRIPT);
        seq.start(0.0);
        assert_eq!(seq.poll(0.0), Some("one"));
        // a re-trigger must not rewind the sequence
        seq.start(0.0);
        assert_eq!(seq.poll(100.0), Some("two"));
    }

    #[test]
    fn reset_rearms_from_the_first_line() {
        let mut seq = BootSequencer::new(SHORT_SCRIPT);
        seq.start(0.0);
        while seq.poll(1000.0).is_some() {}
        seq.reset();
        seq.start(2000.0);
        assert_eq!(seq.poll(2000.0), Some("one"));
    }

    #[test]
    fn skip_finishes_without_handing_out_lines() {
        let mut seq = BootSequencer::new(SHORT_SCRIPT);
        seq.skip();
        assert_eq!(seq.poll(0.0), None);
        assert!(seq.finished(0.0));
    }

    #[test]
    fn full_script_has_seven_lines() {
        assert_eq!(BOOT_SCRIPT.len(), 7);
        assert_eq!(BOOT_SCRIPT[0].text, "ARYAN BIOS v0.8");
        assert_eq!(BOOT_SCRIPT[6].text, "Boot complete.");
    }
}
