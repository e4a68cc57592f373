//! Incremental character scanner over any [`Read`] impl.
//!
//! ADIF payload lengths are authoritative and count characters, so the
//! scanner hands out exactly one character at a time and never reads
//! ahead of what the caller asked for. That keeps tag alignment intact
//! and lets arbitrarily large files stream through without buffering.

use std::io::Read;

use crate::error::{AdifError, Result};

/// Character-at-a-time reader with a one-character pushback slot.
///
/// The pushback slot exists for exactly one caller: the file parser
/// reads the leading comment through the first `<` and then returns
/// that `<` so the header loop sees it again.
#[derive(Debug)]
pub struct CharSource<R> {
    inner: R,
    pushback: Option<char>,
}

impl<R: Read> CharSource<R> {
    /// Wraps a reader. Callers parsing from disk should hand in a
    /// buffered reader; the scanner itself reads one byte at a time.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            pushback: None,
        }
    }

    /// Returns a character to the front of the stream.
    ///
    /// Only one character of pushback is held; pushing twice without an
    /// intervening read drops the earlier character.
    pub fn push_back(&mut self, c: char) {
        self.pushback = Some(c);
    }

    /// Reads the next character, or `None` at end of input.
    pub fn next_char(&mut self) -> Result<Option<char>> {
        if let Some(c) = self.pushback.take() {
            return Ok(Some(c));
        }

        let Some(first) = self.next_byte()? else {
            return Ok(None);
        };

        let width = utf8_width(first).ok_or(AdifError::InvalidUtf8)?;
        if width == 1 {
            return Ok(Some(char::from(first)));
        }

        let mut buf = [first, 0, 0, 0];
        for slot in buf.iter_mut().take(width).skip(1) {
            *slot = self.next_byte()?.ok_or(AdifError::InvalidUtf8)?;
        }

        let decoded = std::str::from_utf8(&buf[..width]).map_err(|_| AdifError::InvalidUtf8)?;
        decoded.chars().next().ok_or(AdifError::InvalidUtf8)
            .map(Some)
    }

    /// Consumes and returns everything up to and including the first
    /// occurrence of `delim`. Fails with [`AdifError::UnexpectedEof`] if
    /// the input ends first.
    pub fn read_until(&mut self, delim: char) -> Result<String> {
        let mut buf = String::new();
        loop {
            match self.next_char()? {
                Some(c) => {
                    buf.push(c);
                    if c == delim {
                        return Ok(buf);
                    }
                }
                None => return Err(AdifError::UnexpectedEof(delim)),
            }
        }
    }

    /// Reads exactly `count` characters, the declared payload of a tag.
    /// Fails with [`AdifError::TruncatedField`] if the input ends short.
    pub fn read_exact(&mut self, count: usize) -> Result<String> {
        let mut buf = String::with_capacity(count);
        for taken in 0..count {
            match self.next_char()? {
                Some(c) => buf.push(c),
                None => {
                    return Err(AdifError::TruncatedField {
                        declared: count,
                        remaining: count - taken,
                    });
                }
            }
        }
        Ok(buf)
    }

    fn next_byte(&mut self) -> std::io::Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

impl<'a> CharSource<&'a [u8]> {
    /// Scanner over an in-memory string.
    pub fn from_text(contents: &'a str) -> Self {
        Self::new(contents.as_bytes())
    }
}

/// Total byte width of a UTF-8 sequence given its leading byte, or
/// `None` for a continuation or invalid byte.
fn utf8_width(byte: u8) -> Option<usize> {
    match byte {
        0x00..=0x7f => Some(1),
        0xc0..=0xdf => Some(2),
        0xe0..=0xef => Some(3),
        0xf0..=0xf7 => Some(4),
        _ => None,
    }
}
