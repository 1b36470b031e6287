//! Sound effects, played in response to game events

use fundsp::prelude::*;
use log::{info, warn};
use rodio::{OutputStream, OutputStreamBuilder, Sink, buffer::SamplesBuffer};

use crate::sim::GameEvent;

const SAMPLE_RATE: u32 = 44_100;

/// Run a mono generator for `seconds` and collect its output
fn render(mut unit: impl AudioUnit, seconds: f32) -> Vec<f32> {
    unit.set_sample_rate(SAMPLE_RATE as f64);
    let n = (seconds * SAMPLE_RATE as f32) as usize;
    (0..n).map(|_| unit.get_mono()).collect()
}

// ── Sounds ──────────────────────────────────────────────────────────────────

/// Short rising chirp
fn flap_sound() -> Vec<f32> {
    let freq = lfo(|t: f32| -> f32 { lerp(520.0, 900.0, (t / 0.08).min(1.0)) });
    let gain = lfo(|t: f32| -> f32 { lerp(0.12, 0.0, (t / 0.1).min(1.0)) });
    render((freq >> sine::<f32>()) * gain, 0.1)
}

/// Two-note blip
fn score_sound() -> Vec<f32> {
    let freq = lfo(|t: f32| -> f32 { if t < 0.07 { 880.0 } else { 1320.0 } });
    let gain = lfo(|t: f32| -> f32 { lerp(0.1, 0.0, (t / 0.18).min(1.0)) });
    render((freq >> square()) * gain, 0.18)
}

/// Falling sawtooth, 400Hz to 80Hz
fn death_sound() -> Vec<f32> {
    let freq = lfo(|t: f32| -> f32 { lerp(400.0, 80.0, (t / 0.4).min(1.0)) });
    let gain = lfo(|t: f32| -> f32 { lerp(0.15, 0.0, (t / 0.5).min(1.0)) });
    render((freq >> saw()) * gain, 0.5)
}

/// Plays sounds on the default output device, or nothing when muted or
/// when no device is available.
pub struct Audio {
    stream: Option<OutputStream>,
    flap: Vec<f32>,
    score: Vec<f32>,
    death: Vec<f32>,
}

impl Audio {
    pub fn new(enabled: bool) -> Self {
        let stream = if enabled {
            match OutputStreamBuilder::open_default_stream() {
                Ok(mut stream) => {
                    stream.log_on_drop(false);
                    Some(stream)
                }
                Err(e) => {
                    warn!("No audio output, continuing without sound: {e}");
                    None
                }
            }
        } else {
            info!("Sound muted");
            None
        };

        Self {
            stream,
            flap: flap_sound(),
            score: score_sound(),
            death: death_sound(),
        }
    }

    pub fn on_event(&self, event: &GameEvent) {
        let samples = match event {
            GameEvent::Flapped => &self.flap,
            GameEvent::Scored { .. } => &self.score,
            GameEvent::GameOver { .. } => &self.death,
            GameEvent::Started | GameEvent::Reset => return,
        };
        self.play(samples);
    }

    fn play(&self, samples: &[f32]) {
        let Some(stream) = &self.stream else {
            return;
        };
        let sink = Sink::connect_new(stream.mixer());
        sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples.to_vec()));
        sink.detach(); // Play in background
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sounds_have_expected_length_and_range() {
        for (samples, seconds) in [(flap_sound(), 0.1), (score_sound(), 0.18), (death_sound(), 0.5)] {
            assert_eq!(samples.len(), (seconds * SAMPLE_RATE as f32) as usize);
            assert!(samples.iter().all(|s| s.is_finite() && s.abs() <= 1.0));
            assert!(samples.iter().any(|s| *s != 0.0));
        }
    }

    #[test]
    fn test_muted_audio_ignores_events() {
        let audio = Audio::new(false);
        audio.on_event(&GameEvent::Flapped);
        audio.on_event(&GameEvent::GameOver {
            score: 3,
            cause: crate::sim::Collision::Ground,
        });
    }
}
