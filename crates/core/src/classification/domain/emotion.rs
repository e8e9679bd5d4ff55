use std::fmt;

/// The closed emotion vocabulary, in the classifier's output order
/// (FER-2013 label indices).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Emotion {
    Angry,
    Disgust,
    Fear,
    Happy,
    Sad,
    Surprise,
    Neutral,
}

impl Emotion {
    /// All labels, ordered by classifier output index.
    pub const ALL: [Emotion; 7] = [
        Emotion::Angry,
        Emotion::Disgust,
        Emotion::Fear,
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Surprise,
        Emotion::Neutral,
    ];

    pub fn from_index(index: usize) -> Option<Emotion> {
        Emotion::ALL.get(index).copied()
    }

    /// Lowercase wire name, e.g. `"angry"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Angry => "angry",
            Emotion::Disgust => "disgust",
            Emotion::Fear => "fear",
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Surprise => "surprise",
            Emotion::Neutral => "neutral",
        }
    }

    /// Presentation glyph for UIs; not consumed by the pipeline.
    pub fn emoji(&self) -> &'static str {
        match self {
            Emotion::Angry => "😠",
            Emotion::Disgust => "🤢",
            Emotion::Fear => "😨",
            Emotion::Happy => "😄",
            Emotion::Sad => "😢",
            Emotion::Surprise => "😲",
            Emotion::Neutral => "😐",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
