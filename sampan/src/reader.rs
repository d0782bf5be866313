use std::io::{self, BufRead, BufReader, ErrorKind, Read};

/// Decoder of UTF-8 characters from a byte stream.
///
/// Malformed sequences are decoded as U+FFFD. An I/O error ends the current
/// read, keeping the characters decoded so far.
pub(crate) struct CharReader<R> {
    inner: BufReader<R>,
}

impl<R> CharReader<R>
where
    R: Read,
{
    pub(crate) fn new(rdr: R) -> Self {
        Self {
            inner: BufReader::new(rdr),
        }
    }

    /// Fills `buf` from the head, returning the number of characters written.
    pub(crate) fn read_chars(&mut self, buf: &mut [char]) -> usize {
        let mut count = 0;
        while count < buf.len() {
            match self.read_char() {
                Ok(Some(c)) => {
                    buf[count] = c;
                    count += 1;
                }
                Ok(None) => break,
                Err(e) => {
                    log::warn!("Reading the input stopped after {count} characters: {e}");
                    break;
                }
            }
        }
        count
    }

    fn peek_byte(&mut self) -> io::Result<Option<u8>> {
        loop {
            match self.inner.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    fn read_char(&mut self) -> io::Result<Option<char>> {
        let Some(first) = self.peek_byte()? else {
            return Ok(None);
        };
        self.inner.consume(1);
        let width = match first {
            0x00..=0x7F => return Ok(Some(char::from(first))),
            0xC2..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF4 => 4,
            _ => return Ok(Some(char::REPLACEMENT_CHARACTER)),
        };
        let mut bytes = [first, 0, 0, 0];
        for i in 1..width {
            // The range of the second byte excludes overlong forms and surrogates.
            let range = match (i, first) {
                (1, 0xE0) => 0xA0..=0xBF,
                (1, 0xED) => 0x80..=0x9F,
                (1, 0xF0) => 0x90..=0xBF,
                (1, 0xF4) => 0x80..=0x8F,
                _ => 0x80..=0xBF,
            };
            // A byte out of the range is left as the head of the next character.
            match self.peek_byte()? {
                Some(b) if range.contains(&b) => {
                    bytes[i] = b;
                    self.inner.consume(1);
                }
                _ => return Ok(Some(char::REPLACEMENT_CHARACTER)),
            }
        }
        let c = std::str::from_utf8(&bytes[..width])
            .ok()
            .and_then(|s| s.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        Ok(Some(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingReader {
        data: Vec<u8>,
        pos: usize,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.pos == self.data.len() {
                return Err(io::Error::new(ErrorKind::Other, "broken"));
            }
            let n = buf.len().min(self.data.len() - self.pos);
            buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    #[test]
    fn test_read_chars() {
        let mut rdr = CharReader::new("中文abc".as_bytes());
        let mut buf = ['\0'; 3];
        assert_eq!(rdr.read_chars(&mut buf), 3);
        assert_eq!(buf, ['中', '文', 'a']);
        assert_eq!(rdr.read_chars(&mut buf), 2);
        assert_eq!(&buf[..2], &['b', 'c']);
        assert_eq!(rdr.read_chars(&mut buf), 0);
    }

    #[test]
    fn test_read_malformed() {
        let data = [b'a', 0xFF, 0xE4, 0xB8, b'b'];
        let mut rdr = CharReader::new(&data[..]);
        let mut buf = ['\0'; 8];
        let n = rdr.read_chars(&mut buf);
        assert_eq!(&buf[..n], &['a', '\u{FFFD}', '\u{FFFD}', 'b']);

        // A broken sequence followed by a lead byte keeps the next character.
        let data = [0xE4, 0xB8, 0xE4, 0xB8, 0xAD, 0xED, 0xA0, 0x80, b'c'];
        let mut rdr = CharReader::new(&data[..]);
        let n = rdr.read_chars(&mut buf);
        assert_eq!(
            &buf[..n],
            &['\u{FFFD}', '中', '\u{FFFD}', '\u{FFFD}', '\u{FFFD}', 'c']
        );
    }

    #[test]
    fn test_read_truncated_at_end() {
        let data = [b'x', 0xF0, 0x9F, 0x98];
        let mut rdr = CharReader::new(&data[..]);
        let mut buf = ['\0'; 8];
        let n = rdr.read_chars(&mut buf);
        assert_eq!(&buf[..n], &['x', '\u{FFFD}']);
    }

    #[test]
    fn test_read_truncated_by_error() {
        let rdr = FailingReader {
            data: "自然".as_bytes().to_vec(),
            pos: 0,
        };
        let mut rdr = CharReader::new(rdr);
        let mut buf = ['\0'; 8];
        assert_eq!(rdr.read_chars(&mut buf), 2);
        assert_eq!(&buf[..2], &['自', '然']);
        assert_eq!(rdr.read_chars(&mut buf), 0);
    }
}
