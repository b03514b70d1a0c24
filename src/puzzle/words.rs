use thiserror::Error;

/// Offered when a request contains no usable words
pub const DEFAULT_WORDS: [&str; 5] = ["python", "english", "teacher", "student", "lesson"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WordListError {
    #[error("too many words: {count} given, at most {max} allowed")]
    TooManyWords { count: usize, max: usize },
    #[error("word '{word}' is longer than {max} characters")]
    WordTooLong { word: String, max: usize },
    #[error("word '{word}' may only contain the letters A-Z")]
    InvalidCharacters { word: String },
}

/// Words to place, in the order the caller gave them
#[derive(Debug, Clone)]
pub struct WordList {
    words: Vec<String>,
    used_default: bool,
}

impl WordList {
    /// Build a list from explicit words plus comma separated text.
    ///
    /// Entries are trimmed and blanks dropped. Falls back to
    /// [`DEFAULT_WORDS`] when nothing is left.
    pub fn from_input(words: Option<Vec<String>>, text: Option<&str>) -> Self {
        let mut collected: Vec<String> = words
            .unwrap_or_default()
            .iter()
            .map(|w| w.trim().to_string())
            .filter(|w| !w.is_empty())
            .collect();

        if let Some(text) = text {
            collected.extend(parse_comma_separated(text));
        }

        if collected.is_empty() {
            tracing::debug!("No words supplied, using the default word list");
            return Self::default_words();
        }

        Self {
            words: collected,
            used_default: false,
        }
    }

    pub fn default_words() -> Self {
        Self {
            words: DEFAULT_WORDS.iter().map(|w| w.to_string()).collect(),
            used_default: true,
        }
    }

    /// Enforce per-request limits and the A-Z alphabet
    pub fn validate(&self, max_words: usize, max_word_length: usize) -> Result<(), WordListError> {
        if self.words.len() > max_words {
            return Err(WordListError::TooManyWords {
                count: self.words.len(),
                max: max_words,
            });
        }

        if let Some(word) = self
            .words
            .iter()
            .find(|w| w.chars().count() > max_word_length)
        {
            return Err(WordListError::WordTooLong {
                word: word.clone(),
                max: max_word_length,
            });
        }

        if let Some(word) = self
            .words
            .iter()
            .find(|w| !w.to_uppercase().chars().all(|c| c.is_ascii_uppercase()))
        {
            return Err(WordListError::InvalidCharacters { word: word.clone() });
        }

        Ok(())
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn used_default(&self) -> bool {
        self.used_default
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }
}

/// Split "a, b ,c" into trimmed, non-empty words
pub fn parse_comma_separated(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(String::from)
        .collect()
}
