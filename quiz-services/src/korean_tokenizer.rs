use lindera::dictionary::load_dictionary;
use lindera::mode::Mode;
use lindera::segmenter::Segmenter;
use quiz_utils::{Collaborator, PartOfSpeech, QuizError, Result, Token, Tokenizer};
use std::borrow::Cow;

/// Morphological analysis with lindera and a ko-dic dictionary.
pub struct KoreanTokenizer {
    segmenter: Segmenter,
}

impl KoreanTokenizer {
    /// `dictionary_uri` is a filesystem path to a compiled ko-dic, or any URI
    /// lindera accepts (`embedded://ko-dic` when built with that feature).
    pub fn new(dictionary_uri: &str) -> Result<Self> {
        let dictionary = load_dictionary(dictionary_uri).map_err(|e| {
            QuizError::collaborator(
                Collaborator::Tokenizer,
                format!("failed to load dictionary {dictionary_uri}: {e}"),
            )
        })?;
        log::info!("Loaded ko-dic dictionary from {dictionary_uri}");

        Ok(Self {
            segmenter: Segmenter::new(Mode::Normal, dictionary, None),
        })
    }
}

impl Tokenizer for KoreanTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>> {
        let segments = self
            .segmenter
            .segment(Cow::Borrowed(text))
            .map_err(|e| QuizError::collaborator(Collaborator::Tokenizer, e))?;

        let mut cursor = CharCursor::new(text);
        let mut tokens = Vec::with_capacity(segments.len());
        for mut segment in segments {
            let (byte_start, byte_end) = (segment.byte_start, segment.byte_end);
            let (Some(start), Some(end), Some(form)) = (
                cursor.char_offset(byte_start),
                cursor.char_offset(byte_end),
                text.get(byte_start..byte_end),
            ) else {
                return Err(QuizError::collaborator(
                    Collaborator::Tokenizer,
                    format!("token at bytes {byte_start}..{byte_end} is not on a character boundary"),
                ));
            };
            let pos = PartOfSpeech::from_tag(segment.get_detail(0).unwrap_or_default());
            tokens.push(Token {
                form: form.to_string(),
                pos,
                start,
                len: end - start,
            });
        }
        Ok(tokens)
    }
}

/// Converts increasing byte offsets into `char` offsets without rescanning
/// the text from the start for every token.
struct CharCursor<'a> {
    text: &'a str,
    byte: usize,
    chars: usize,
}

impl<'a> CharCursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            byte: 0,
            chars: 0,
        }
    }

    fn char_offset(&mut self, byte: usize) -> Option<usize> {
        if byte < self.byte {
            self.byte = 0;
            self.chars = 0;
        }
        self.chars += self.text.get(self.byte..byte)?.chars().count();
        self.byte = byte;
        Some(self.chars)
    }
}
