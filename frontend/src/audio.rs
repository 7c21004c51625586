use std::thread;
use std::time::{Duration, Instant};

use dasp_graph::{Buffer, Input};
use dasp_signal::Signal;
use klingt::{AudioNode, CpalDevice, Klingt, ProcessContext};
use tracing::debug;

use folio_core::tone::BeepSignal;

/// One-shot voice feeding the sink until its signal is spent, silence after.
pub struct BeepVoice {
    signal: BeepSignal,
}

#[derive(Clone, Copy, Debug)]
pub enum BeepVoiceMessage {}

impl AudioNode for BeepVoice {
    type Message = BeepVoiceMessage;

    fn process(
        &mut self,
        _ctx: &ProcessContext,
        _messages: impl Iterator<Item = BeepVoiceMessage>,
        _inputs: &[Input],
        outputs: &mut [Buffer],
    ) {
        if let Some(output) = outputs.first_mut() {
            for sample in output.iter_mut() {
                *sample = if self.signal.is_exhausted() {
                    0.0
                } else {
                    self.signal.next()
                };
            }
        }
    }

    fn num_outputs(&self) -> usize {
        1
    }
}

const BLOCK_SAMPLES: u64 = 64;
// silent blocks pushed after the tone so the sink drains before teardown
const DRAIN_BLOCKS: u64 = 16;

/// Fire-and-forget beep. Every audio failure is discarded right here — the
/// console degrades to silence rather than surfacing an error.
pub fn play_beep(audio_on: bool) {
    if !audio_on {
        return;
    }

    let spawned = thread::Builder::new().name("beep".into()).spawn(|| {
        let device = match CpalDevice::default_output() {
            Some(device) => device,
            None => {
                debug!("no audio output, dropping beep");
                return;
            }
        };

        let sample_rate = device.sample_rate();
        let mut klingt = Klingt::new(sample_rate).with_output(device.create_sink());

        let voice = BeepVoice {
            signal: BeepSignal::new(sample_rate),
        };
        let handle = klingt.add(voice);
        klingt.output(&handle);

        let tone_blocks = BeepSignal::sample_count(sample_rate).div_ceil(BLOCK_SAMPLES);
        let total_blocks = tone_blocks + DRAIN_BLOCKS;

        // pace blocks against the wall clock, a few ahead of real time, so
        // the sink never underruns and never buffers the whole tone at once
        let start = Instant::now();
        let mut blocks_processed: u64 = 0;
        while blocks_processed < total_blocks {
            let elapsed = start.elapsed().as_secs_f64();
            let target = (elapsed * sample_rate as f64 / BLOCK_SAMPLES as f64) as u64 + 4;
            while blocks_processed < target.min(total_blocks) {
                klingt.process();
                blocks_processed += 1;
            }
            thread::sleep(Duration::from_millis(1));
        }
        // dropping the device releases the output stream
    });

    if let Err(err) = spawned {
        debug!("couldn't spawn beep thread: {err}");
    }
}
