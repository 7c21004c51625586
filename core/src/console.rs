use log::{debug, info};

use crate::boot::{BootLine, BootSequencer, Phase, TimeDaemon, BOOT_SCRIPT};

/// The console's whole visible state: the boot phase, the transcript shown so
/// far, and the sequencer driving the reveal. Owned by the frontend and
/// advanced from the event loop; nothing in here blocks.
pub struct Console<Clock: TimeDaemon> {
    pub phase: Phase,
    pub transcript: Vec<&'static str>,
    sequencer: BootSequencer,
    pub clock: Clock,
}

impl<Clock: TimeDaemon> Console<Clock> {
    /// With `skip_boot` set the transcript is populated synchronously and the
    /// console starts out ready; otherwise the boot reveal runs from line one.
    pub fn new(clock: Clock, skip_boot: bool) -> Self {
        let mut sequencer = BootSequencer::new(BOOT_SCRIPT);
        if skip_boot {
            sequencer.skip();
            return Self {
                phase: Phase::Ready,
                transcript: BOOT_SCRIPT.iter().map(|line| line.text).collect(),
                sequencer,
                clock,
            };
        }
        Self {
            phase: Phase::Booting,
            transcript: Vec::new(),
            sequencer,
            clock,
        }
    }

    pub fn script(&self) -> &'static [BootLine] {
        BOOT_SCRIPT
    }

    /// Advances the boot reveal. Called once per frame while the console view
    /// is up; a no-op once the phase is ready.
    pub fn process_boot(&mut self) {
        if self.phase != Phase::Booting {
            return;
        }
        let now_ms = self.clock.get_now_ms();
        self.sequencer.start(now_ms);
        while let Some(text) = self.sequencer.poll(now_ms) {
            debug!("boot: {text}");
            self.transcript.push(text);
        }
        if self.sequencer.finished(now_ms) {
            info!("boot sequence complete, {} lines", self.transcript.len());
            self.phase = Phase::Ready;
        }
    }

    /// Replays the whole boot animation from the first line.
    pub fn replay(&mut self) {
        self.transcript.clear();
        self.sequencer.reset();
        self.phase = Phase::Booting;
    }
}
