//! Audio format sniffing and recognition request construction

use std::path::Path;

use base64::Engine as _;
use serde::Serialize;
use strum::{AsRefStr, Display};

/// Language of the recordings sent by the PeruGo apps
pub const DEFAULT_LANGUAGE_CODE: &str = "es-PE";

/// Sample rate declared for formats that require one
pub const DEFAULT_SAMPLE_RATE_HERTZ: u32 = 16_000;

/// Number of leading bytes inspected for magic sequences
const HEADER_LEN: usize = 12;

const EBML_MAGIC: [u8; 4] = [0x1A, 0x45, 0xDF, 0xA3];
const MPEG_FRAME_SYNC: [u8; 2] = [0xFF, 0xFB];

/// Audio encodings understood by the speech recognizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, AsRefStr)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AudioEncoding {
    /// Uncompressed 16-bit PCM, usually inside a WAV container (iOS)
    #[serde(rename = "LINEAR16")]
    #[strum(serialize = "LINEAR16")]
    Linear16,
    Mp3,
    /// Adaptive multi-rate wideband (Android)
    AmrWb,
    /// Opus inside a `WebM` container (browsers)
    WebmOpus,
    /// Let the recognizer read the encoding from the container header
    #[serde(rename = "ENCODING_UNSPECIFIED")]
    #[strum(serialize = "ENCODING_UNSPECIFIED")]
    Unspecified,
}

impl AudioEncoding {
    /// Sample rate to declare for this encoding, if the recognizer needs one
    pub const fn required_sample_rate(self) -> Option<u32> {
        match self {
            Self::Linear16 | Self::AmrWb | Self::WebmOpus => Some(DEFAULT_SAMPLE_RATE_HERTZ),
            Self::Mp3 | Self::Unspecified => None,
        }
    }

    fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "wav" => Some(Self::Linear16),
            "mp3" => Some(Self::Mp3),
            // Not a codec match: AAC in MP4 has no recognizer encoding, AMR_WB is the closest that
            // the apps' recorders accept
            "m4a" | "aac" => Some(Self::AmrWb),
            "webm" => Some(Self::WebmOpus),
            _ => None,
        }
    }

    fn from_magic(bytes: &[u8]) -> Option<Self> {
        let header = &bytes[..bytes.len().min(HEADER_LEN)];

        if header.starts_with(b"RIFF") && header.get(8..12) == Some(b"WAVE".as_slice()) {
            Some(Self::Linear16)
        } else if header.starts_with(b"#!AMR-WB") {
            Some(Self::AmrWb)
        } else if header.starts_with(&EBML_MAGIC) {
            Some(Self::WebmOpus)
        } else if header.starts_with(&MPEG_FRAME_SYNC) || header.starts_with(b"ID3") {
            Some(Self::Mp3)
        } else {
            None
        }
    }
}

/// Provider-independent description of one recognition call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptionRequest {
    pub encoding: AudioEncoding,
    pub sample_rate_hertz: Option<u32>,
    pub language_code: String,
    pub enable_automatic_punctuation: bool,
    /// Standard base64 of the raw audio
    pub audio_content: String,
}

impl TranscriptionRequest {
    /// Same request without a declared sample rate
    #[must_use]
    pub fn without_sample_rate(mut self) -> Self {
        self.sample_rate_hertz = None;
        self
    }
}

/// Build a recognition request for an audio blob
///
/// The filename extension wins when it names a known format, then the
/// magic header is inspected. Unrecognized audio is sent as MP3.
pub fn resolve(bytes: &[u8], filename: Option<&str>) -> TranscriptionRequest {
    let encoding = detect_encoding(bytes, filename);

    tracing::debug!(%encoding, size = bytes.len(), "resolved audio encoding");

    TranscriptionRequest {
        encoding,
        sample_rate_hertz: encoding.required_sample_rate(),
        language_code: DEFAULT_LANGUAGE_CODE.to_owned(),
        enable_automatic_punctuation: true,
        audio_content: base64::engine::general_purpose::STANDARD.encode(bytes),
    }
}

fn detect_encoding(bytes: &[u8], filename: Option<&str>) -> AudioEncoding {
    let by_extension = filename
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .and_then(AudioEncoding::from_extension);

    by_extension
        .or_else(|| AudioEncoding::from_magic(bytes))
        .unwrap_or_else(|| {
            tracing::warn!(size = bytes.len(), "audio format not recognized, falling back to MP3");
            AudioEncoding::Mp3
        })
}
