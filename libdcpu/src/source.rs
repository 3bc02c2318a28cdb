use thiserror::Error;

use crate::Word;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SourceError {
    #[error("End of input")]
    EndOfInput,

    #[error("Word source cannot skip")]
    SkipUnsupported,
}

/// Sequential supplier of instruction words.
pub trait WordSource {
    fn next_word(&mut self) -> Result<Word, SourceError>;

    /// Advances past `count` words without returning them.
    fn skip_words(&mut self, count: Word) -> Result<(), SourceError>;
}

impl<S> WordSource for &mut S
where
    S: WordSource + ?Sized,
{
    fn next_word(&mut self) -> Result<Word, SourceError> {
        (**self).next_word()
    }

    fn skip_words(&mut self, count: Word) -> Result<(), SourceError> {
        (**self).skip_words(count)
    }
}

/// In-memory word buffer, mostly useful for tests and tooling that already has words at hand.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    words: &'a [Word],
    position: usize,
}

impl<'a> SliceSource<'a> {
    pub fn new(words: &'a [Word]) -> Self {
        Self { words, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_exhausted(&self) -> bool {
        self.position >= self.words.len()
    }
}

impl WordSource for SliceSource<'_> {
    fn next_word(&mut self) -> Result<Word, SourceError> {
        let word = *self
            .words
            .get(self.position)
            .ok_or(SourceError::EndOfInput)?;

        self.position += 1;
        Ok(word)
    }

    fn skip_words(&mut self, count: Word) -> Result<(), SourceError> {
        let position = self.position + count as usize;
        if position > self.words.len() {
            return Err(SourceError::EndOfInput);
        }

        self.position = position;
        Ok(())
    }
}
