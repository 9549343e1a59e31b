//! Procedural waveform builders.
//!
//! Each generator produces per-25ms sample sequences and folds every four
//! consecutive samples into one [`PulseWave`]. Durations are truncated to the
//! nearest lower multiple of 4, so a duration below 4 yields an empty list.

use crate::error::{ProtocolError, Result};
use crate::protocol::wave::{PulseWave, PulseWaveList};

/// Group equal-length sample sequences (length a multiple of 4) into waves.
pub fn pulse_wave(frequencies: &[i64], strengths: &[i64]) -> Result<PulseWaveList> {
    if frequencies.len() != strengths.len() {
        return Err(ProtocolError::BadGeneratorArg(
            "frequencies and strengths must be the same length".into(),
        ));
    }
    if frequencies.len() % 4 != 0 {
        return Err(ProtocolError::BadGeneratorArg(
            "sample count must be a multiple of 4".into(),
        ));
    }
    let mut list = PulseWaveList::new();
    for (f, s) in frequencies.chunks_exact(4).zip(strengths.chunks_exact(4)) {
        list.push(PulseWave::from_values(
            [f[0], f[1], f[2], f[3]],
            [s[0], s[1], s[2], s[3]],
        )?);
    }
    Ok(list)
}

/// Half-period sine sweep from `min_strength` up to `max_strength` and back.
///
/// The angle step divides by the original `duration - 1`, not the truncated
/// sample count, so truncated tails never quite return to `min_strength`.
/// Wire-compatible behavior, kept as-is.
pub fn sine(frequency: i64, min_strength: i64, max_strength: i64, duration: i64) -> Result<PulseWaveList> {
    let valid = valid_samples(duration)?;
    let amplitude = (max_strength - min_strength) as f64;
    let mut frequencies = Vec::with_capacity(valid);
    let mut strengths = Vec::with_capacity(valid);
    for i in 0..valid {
        let angle = i as f64 * std::f64::consts::PI / (duration - 1) as f64;
        let value = angle.sin() * amplitude + min_strength as f64;
        frequencies.push(frequency);
        strengths.push(value.round() as i64);
    }
    pulse_wave(&frequencies, &strengths)
}

/// Linear sweep from `start_strength` to `end_strength`.
pub fn gradient(
    frequency: i64,
    start_strength: i64,
    end_strength: i64,
    duration: i64,
) -> Result<PulseWaveList> {
    let valid = valid_samples(duration)?;
    let step = (end_strength - start_strength) as f64 / (valid as f64 - 1.0);
    let mut frequencies = Vec::with_capacity(valid);
    let mut strengths = Vec::with_capacity(valid);
    for i in 0..valid {
        frequencies.push(frequency);
        strengths.push((start_strength as f64 + step * i as f64).round() as i64);
    }
    pulse_wave(&frequencies, &strengths)
}

/// Constant frequency and strength.
pub fn smooth(frequency: i64, strength: i64, duration: i64) -> Result<PulseWaveList> {
    let valid = valid_samples(duration)?;
    pulse_wave(&vec![frequency; valid], &vec![strength; valid])
}

/// Build a list directly from 16-char hex entries.
pub fn from_hex_strings<S: AsRef<str>>(entries: &[S]) -> Result<PulseWaveList> {
    let mut list = PulseWaveList::new();
    for entry in entries {
        list.push(PulseWave::from_hex(entry.as_ref())?);
    }
    Ok(list)
}

fn valid_samples(duration: i64) -> Result<usize> {
    if duration <= 0 {
        return Err(ProtocolError::BadGeneratorArg(
            "duration must be greater than 0".into(),
        ));
    }
    Ok((duration - duration % 4) as usize)
}
