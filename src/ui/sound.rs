/// Sound engine: procedural 8-bit style sound effects via rodio.
///
/// All sounds are generated as in-memory WAV buffers at init time, one per
/// `Sfx`. Playback is fire-and-forget (non-blocking) via rodio's Sink.
///
/// Compile without the "sound" feature to disable audio entirely (the stub
/// SoundEngine does nothing). Which event makes which sound is decided by
/// `Sfx::for_event`, independent of the feature.

use crate::sim::event::GameEvent;

/// One sound effect.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Sfx {
    Jump,
    Land,
    Shot,
    Hit,
    Explosion,
    Pickup,
    Bonus,
    Hurt,
    Death,
    Door,
    Crumble,
    Teleport,
    Finish,
}

impl Sfx {
    pub const ALL: [Sfx; 13] = [
        Sfx::Jump, Sfx::Land, Sfx::Shot, Sfx::Hit, Sfx::Explosion, Sfx::Pickup, Sfx::Bonus,
        Sfx::Hurt, Sfx::Death, Sfx::Door, Sfx::Crumble, Sfx::Teleport, Sfx::Finish,
    ];

    pub fn for_event(event: &GameEvent) -> Option<Sfx> {
        let sfx = match event {
            GameEvent::HeroJumped => Sfx::Jump,
            GameEvent::HeroLanded | GameEvent::HeroBumpedHead => Sfx::Land,
            GameEvent::ShotFired => Sfx::Shot,
            GameEvent::ShotHit { .. } | GameEvent::ShotBlocked { .. } => Sfx::Hit,
            GameEvent::ActorDestroyed { .. } => Sfx::Explosion,
            GameEvent::ItemPicked { .. } => Sfx::Pickup,
            GameEvent::LetterBonus => Sfx::Bonus,
            GameEvent::HeroHurt => Sfx::Hurt,
            GameEvent::HeroKilled => Sfx::Death,
            GameEvent::DoorOpened => Sfx::Door,
            GameEvent::FloorCrumbled { .. } => Sfx::Crumble,
            GameEvent::Teleported => Sfx::Teleport,
            GameEvent::LevelFinished => Sfx::Finish,
            _ => return None,
        };
        Some(sfx)
    }
}

#[cfg(feature = "sound")]
mod inner {
    use std::io::Cursor;
    use std::sync::Arc;

    use rodio::{OutputStream, OutputStreamHandle, Sink};
    use tracing::warn;

    use super::Sfx;

    const SAMPLE_RATE: u32 = 22050;
    const TAU: f32 = std::f32::consts::TAU;

    pub struct SoundEngine {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        /// Indexed by `Sfx as usize`.
        buffers: Vec<Arc<Vec<u8>>>,
    }

    impl SoundEngine {
        pub fn new() -> Option<Self> {
            let (stream, handle) = match OutputStream::try_default() {
                Ok(pair) => pair,
                Err(e) => {
                    warn!(error = %e, "no audio output, sound disabled");
                    return None;
                }
            };
            let buffers = Sfx::ALL.iter().map(|&sfx| Arc::new(make_wav(&generate(sfx)))).collect();
            Some(SoundEngine { _stream: stream, handle, buffers })
        }

        pub fn play(&self, sfx: Sfx) {
            let Some(buf) = self.buffers.get(sfx as usize) else { return };
            if let Ok(sink) = Sink::try_new(&self.handle) {
                let cursor = Cursor::new(buf.as_ref().clone());
                if let Ok(src) = rodio::Decoder::new(cursor) {
                    sink.append(src);
                    sink.detach();
                }
            }
        }
    }

    // ════════════════════════════════════════════════════════════
    //  Waveform generators — all produce Vec<f32> mono samples
    // ════════════════════════════════════════════════════════════

    fn generate(sfx: Sfx) -> Vec<f32> {
        match sfx {
            Sfx::Jump => sweep(300.0, 700.0, 0.10, 0.22),
            Sfx::Land => noise(0.04, 0.15, 0.0),
            Sfx::Shot => sweep(1400.0, 500.0, 0.07, 0.2),
            Sfx::Hit => noise(0.05, 0.2, 0.5),
            Sfx::Explosion => noise(0.30, 0.35, 0.2),
            Sfx::Pickup => arpeggio(&[1047.0, 1319.0, 1568.0], 0.045, 0.25),
            Sfx::Bonus => arpeggio(&[784.0, 1047.0, 1319.0, 1568.0, 2093.0], 0.06, 0.28),
            Sfx::Hurt => sweep(500.0, 250.0, 0.12, 0.3),
            Sfx::Death => arpeggio(&[440.0, 370.0, 311.0, 261.0], 0.12, 0.3),
            Sfx::Door => sweep(150.0, 90.0, 0.25, 0.25),
            Sfx::Crumble => noise(0.20, 0.25, 0.0),
            Sfx::Teleport => sweep(200.0, 1600.0, 0.30, 0.2),
            Sfx::Finish => arpeggio(&[523.0, 659.0, 784.0, 1047.0, 1047.0], 0.1, 0.3),
        }
    }

    /// Sine glide from `from` to `to` Hz with a linear fade out.
    fn sweep(from: f32, to: f32, duration: f32, volume: f32) -> Vec<f32> {
        let n = (SAMPLE_RATE as f32 * duration) as usize;
        let mut phase = 0.0_f32;
        (0..n)
            .map(|i| {
                let t = i as f32 / n as f32;
                let freq = from + (to - from) * t;
                phase += freq / SAMPLE_RATE as f32;
                (phase * TAU).sin() * (1.0 - t) * volume
            })
            .collect()
    }

    /// LCG noise, optionally mixed with a low tone (`tone` 0..1).
    fn noise(duration: f32, volume: f32, tone: f32) -> Vec<f32> {
        let n = (SAMPLE_RATE as f32 * duration) as usize;
        let mut rng: u32 = 0x2545_F491;
        (0..n)
            .map(|i| {
                let t = i as f32 / n as f32;
                rng = rng.wrapping_mul(1103515245).wrapping_add(12345);
                let white = (rng as f32 / u32::MAX as f32) * 2.0 - 1.0;
                let low = (i as f32 / SAMPLE_RATE as f32 * 120.0 * TAU).sin();
                (white * (1.0 - tone) + low * tone) * (1.0 - t).powf(1.5) * volume
            })
            .collect()
    }

    /// Notes in sequence, square-ish (fundamental + 3rd harmonic).
    fn arpeggio(notes: &[f32], note_dur: f32, volume: f32) -> Vec<f32> {
        let n = (SAMPLE_RATE as f32 * note_dur) as usize;
        let mut samples = Vec::with_capacity(n * notes.len());
        for &freq in notes {
            for i in 0..n {
                let t = i as f32 / SAMPLE_RATE as f32;
                let env = 1.0 - (i as f32 / n as f32).powf(0.5);
                let wave = (t * freq * TAU).sin() * 0.7 + (t * freq * 3.0 * TAU).sin() * 0.3;
                samples.push(wave * env * volume);
            }
        }
        samples
    }

    // ════════════════════════════════════════════════════════════
    //  WAV encoder — wraps f32 samples into a 16-bit mono PCM buffer
    // ════════════════════════════════════════════════════════════

    fn make_wav(samples: &[f32]) -> Vec<u8> {
        let data_size = samples.len() as u32 * 2;
        let mut buf = Vec::with_capacity(44 + data_size as usize);

        buf.extend_from_slice(b"RIFF");
        buf.extend_from_slice(&(36 + data_size).to_le_bytes());
        buf.extend_from_slice(b"WAVE");

        buf.extend_from_slice(b"fmt ");
        buf.extend_from_slice(&16u32.to_le_bytes());
        buf.extend_from_slice(&1u16.to_le_bytes()); // PCM
        buf.extend_from_slice(&1u16.to_le_bytes()); // mono
        buf.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
        buf.extend_from_slice(&(SAMPLE_RATE * 2).to_le_bytes());
        buf.extend_from_slice(&2u16.to_le_bytes());
        buf.extend_from_slice(&16u16.to_le_bytes());

        buf.extend_from_slice(b"data");
        buf.extend_from_slice(&data_size.to_le_bytes());
        for &s in samples {
            let val = (s.clamp(-1.0, 1.0) * 32767.0) as i16;
            buf.extend_from_slice(&val.to_le_bytes());
        }
        buf
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn every_effect_renders_a_valid_wav() {
            for sfx in Sfx::ALL {
                let samples = generate(sfx);
                assert!(!samples.is_empty(), "{sfx:?}");
                assert!(samples.iter().all(|s| s.abs() <= 1.0), "{sfx:?}");
                let wav = make_wav(&samples);
                assert_eq!(&wav[0..4], b"RIFF");
                assert_eq!(wav.len(), 44 + samples.len() * 2);
            }
        }
    }
}

// ════════════════════════════════════════════════════════════
//  Public API — compiles to no-ops when sound feature is off
// ════════════════════════════════════════════════════════════

#[cfg(feature = "sound")]
pub use inner::SoundEngine;

#[cfg(not(feature = "sound"))]
pub struct SoundEngine;

#[cfg(not(feature = "sound"))]
impl SoundEngine {
    pub fn new() -> Option<Self> { Some(SoundEngine) }
    pub fn play(&self, _sfx: Sfx) {}
}

/// Play the effect for every event that has one.
pub fn play_events(sound: Option<&SoundEngine>, events: &[GameEvent]) {
    let Some(engine) = sound else { return };
    for sfx in events.iter().filter_map(Sfx::for_event) {
        engine.play(sfx);
    }
}
