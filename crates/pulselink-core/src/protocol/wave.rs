//! Fixed-width pulse waveform codec.
//!
//! One `PulseWave` describes 100ms of output: four 25ms frequency bytes
//! followed by four 25ms strength bytes. The canonical text form is 16
//! uppercase hex characters, one byte per field in the order
//! `f1 f2 f3 f4 s1 s2 s3 s4`. On the wire a wave may also appear as a
//! structured `{"frequencies":[..4],"strengths":[..4]}` object; it always
//! re-serializes in the canonical hex form.

use std::fmt;

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};

use crate::error::{ProtocolError, Result};

/// Allowed frequency range per 25ms slot.
pub const FREQUENCY_RANGE: (u8, u8) = (10, 240);
/// Allowed strength range per 25ms slot.
pub const STRENGTH_RANGE: (u8, u8) = (0, 100);

fn check_frequency(value: i64) -> Result<u8> {
    let (min, max) = FREQUENCY_RANGE;
    if value < i64::from(min) || value > i64::from(max) {
        return Err(ProtocolError::OutOfRange {
            field: "frequency",
            min: i64::from(min),
            max: i64::from(max),
            actual: value,
        });
    }
    Ok(value as u8)
}

fn check_strength(value: i64) -> Result<u8> {
    let (min, max) = STRENGTH_RANGE;
    if value < i64::from(min) || value > i64::from(max) {
        return Err(ProtocolError::OutOfRange {
            field: "strength",
            min: i64::from(min),
            max: i64::from(max),
            actual: value,
        });
    }
    Ok(value as u8)
}

/// One 100ms waveform unit; immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseWave {
    frequencies: [u8; 4],
    strengths: [u8; 4],
}

impl PulseWave {
    /// Build from eight field values, range-checking every byte.
    #[allow(clippy::too_many_arguments)]
    pub fn new(f1: u8, f2: u8, f3: u8, f4: u8, s1: u8, s2: u8, s3: u8, s4: u8) -> Result<Self> {
        Self::from_arrays([f1, f2, f3, f4], [s1, s2, s3, s4])
    }

    /// Build from a frequency array and a strength array.
    pub fn from_arrays(frequencies: [u8; 4], strengths: [u8; 4]) -> Result<Self> {
        for f in frequencies {
            check_frequency(i64::from(f))?;
        }
        for s in strengths {
            check_strength(i64::from(s))?;
        }
        Ok(Self {
            frequencies,
            strengths,
        })
    }

    /// Build from wide integer samples, range-checking before narrowing.
    /// Generator output goes through here so out-of-range samples report
    /// `OutOfRange` instead of wrapping.
    pub fn from_values(frequencies: [i64; 4], strengths: [i64; 4]) -> Result<Self> {
        let mut f = [0u8; 4];
        let mut s = [0u8; 4];
        for i in 0..4 {
            f[i] = check_frequency(frequencies[i])?;
            s[i] = check_strength(strengths[i])?;
        }
        Ok(Self {
            frequencies: f,
            strengths: s,
        })
    }

    /// Decode the 16-character hex form (case-insensitive input).
    pub fn from_hex(text: &str) -> Result<Self> {
        if text.len() != 16 || !text.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ProtocolError::MalformedHex(text.to_string()));
        }
        let bytes =
            hex::decode(text).map_err(|_| ProtocolError::MalformedHex(text.to_string()))?;
        let mut frequencies = [0u8; 4];
        let mut strengths = [0u8; 4];
        for i in 0..4 {
            frequencies[i] = check_frequency(i64::from(bytes[i]))?;
            strengths[i] = check_strength(i64::from(bytes[i + 4]))?;
        }
        Ok(Self {
            frequencies,
            strengths,
        })
    }

    /// Canonical 16-character uppercase hex form.
    pub fn to_hex(&self) -> String {
        let mut bytes = [0u8; 8];
        bytes[..4].copy_from_slice(&self.frequencies);
        bytes[4..].copy_from_slice(&self.strengths);
        hex::encode_upper(bytes)
    }

    pub fn frequencies(&self) -> [u8; 4] {
        self.frequencies
    }

    pub fn strengths(&self) -> [u8; 4] {
        self.strengths
    }
}

impl fmt::Display for PulseWave {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for PulseWave {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

struct PulseWaveVisitor;

impl<'de> Visitor<'de> for PulseWaveVisitor {
    type Value = PulseWave;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a 16-char hex string or {frequencies, strengths} object")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<PulseWave, E> {
        PulseWave::from_hex(v).map_err(E::custom)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<PulseWave, A::Error> {
        let mut frequencies: Option<[i64; 4]> = None;
        let mut strengths: Option<[i64; 4]> = None;
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "frequencies" => frequencies = Some(map.next_value()?),
                "strengths" => strengths = Some(map.next_value()?),
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        let frequencies =
            frequencies.ok_or_else(|| de::Error::custom("missing required field: frequencies"))?;
        let strengths =
            strengths.ok_or_else(|| de::Error::custom("missing required field: strengths"))?;
        PulseWave::from_values(frequencies, strengths).map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for PulseWave {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(PulseWaveVisitor)
    }
}

/// Ordered sequence of waves with a display name. Append/clear only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PulseWaveList {
    name: String,
    waves: Vec<PulseWave>,
}

impl PulseWaveList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            waves: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn push(&mut self, wave: PulseWave) {
        self.waves.push(wave);
    }

    pub fn clear(&mut self) {
        self.waves.clear();
    }

    pub fn waves(&self) -> &[PulseWave] {
        &self.waves
    }

    pub fn len(&self) -> usize {
        self.waves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waves.is_empty()
    }

    /// Render the bracketed hex-string list used by the pulse command:
    /// `["0A1E14805A4A6432","..."]`.
    pub fn to_bracket_string(&self) -> String {
        let mut out = String::with_capacity(2 + self.waves.len() * 19);
        out.push('[');
        for (i, wave) in self.waves.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push('"');
            out.push_str(&wave.to_hex());
            out.push('"');
        }
        out.push(']');
        out
    }
}

impl Serialize for PulseWaveList {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut st = serializer.serialize_struct("PulseWaveList", 2)?;
        st.serialize_field("name", &self.name)?;
        st.serialize_field("list", &self.waves)?;
        st.end()
    }
}

struct PulseWaveListVisitor;

impl<'de> Visitor<'de> for PulseWaveListVisitor {
    type Value = PulseWaveList;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a {name, list} object")
    }

    fn visit_map<A: MapAccess<'de>>(
        self,
        mut map: A,
    ) -> std::result::Result<PulseWaveList, A::Error> {
        let mut name: Option<String> = None;
        let mut waves: Option<Vec<PulseWave>> = None;
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "name" => name = Some(map.next_value()?),
                "list" => waves = Some(map.next_value()?),
                // lenient decoding: unknown fields are skipped
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        let name = name.ok_or_else(|| de::Error::custom("missing required field: name"))?;
        let waves = waves.ok_or_else(|| de::Error::custom("missing required field: list"))?;
        Ok(PulseWaveList { name, waves })
    }
}

impl<'de> Deserialize<'de> for PulseWaveList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(PulseWaveListVisitor)
    }
}
