#![forbid(unsafe_code)]

//! Speech-output collaborator seam.
//!
//! Playback belongs to the host (a browser speech API, a native TTS engine).
//! The engine hands over an [`Utterance`] and never waits for completion.

/// Rate and pitch for read-aloud.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "settings-io", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "settings-io", serde(default))]
pub struct SpeechConfig {
    /// Playback rate (1.0 = normal).
    pub rate: f32,
    /// Voice pitch (1.0 = normal).
    pub pitch: f32,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            rate: 0.9,
            pitch: 1.0,
        }
    }
}

/// Text plus voice parameters handed to the speech collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub rate: f32,
    pub pitch: f32,
}

impl Utterance {
    #[must_use]
    pub fn new(text: impl Into<String>, config: &SpeechConfig) -> Self {
        Self {
            text: text.into(),
            rate: config.rate,
            pitch: config.pitch,
        }
    }
}

/// Host text-to-speech output.
pub trait SpeechOutput {
    /// Whether the host can speak at all.
    fn is_available(&self) -> bool {
        true
    }

    /// Stop any utterance in progress.
    fn cancel(&self);

    /// Begin speaking. Fire-and-forget.
    fn speak(&self, utterance: Utterance);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utterance_takes_config_parameters() {
        let config = SpeechConfig::default();
        let u = Utterance::new("hello", &config);
        assert_eq!(u.text, "hello");
        assert!((u.rate - 0.9).abs() < f32::EPSILON);
        assert!((u.pitch - 1.0).abs() < f32::EPSILON);
    }
}
