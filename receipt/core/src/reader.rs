/*!
    Bounds-checked forward cursor over a borrowed byte buffer.

    Every read goes through [`Reader::read_bytes`], which validates the
    requested span against the bytes remaining before handing out a view.
    A `Reader` never sees past the end of its slice, so bounding a nested
    element is a matter of carving out a [`Reader::sub_reader`] for its
    content.
*/

use crate::error::{DecodeError, DecodeResult};

/**
    Forward-only cursor over `&'a [u8]`.

    `base` is the absolute offset of `data[0]` within the top-level payload
    and is only used to make error offsets meaningful to the caller.
*/
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
    base: usize,
}

impl<'a> Reader<'a> {
    pub const fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            base: 0,
        }
    }

    /**
        Absolute offset of the cursor within the top-level payload.
    */
    pub const fn offset(&self) -> usize {
        self.base + self.pos
    }

    pub const fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub const fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    pub fn peek_u8(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    pub fn read_u8(&mut self) -> DecodeResult<u8> {
        let byte = self.peek_u8().ok_or_else(|| self.truncated(1))?;
        self.pos += 1;
        Ok(byte)
    }

    /**
        Take the next `len` bytes as a zero-copy view, advancing past them.
    */
    pub fn read_bytes(&mut self, len: usize) -> DecodeResult<&'a [u8]> {
        let end = match self.pos.checked_add(len) {
            Some(end) if end <= self.data.len() => end,
            _ => return Err(self.truncated(len)),
        };
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    /**
        Take every remaining byte as a zero-copy view.
    */
    pub fn read_rest(&mut self) -> &'a [u8] {
        let bytes = &self.data[self.pos..];
        self.pos = self.data.len();
        bytes
    }

    /**
        Carve the next `len` bytes out into their own reader, advancing past
        them. The returned reader reports offsets relative to the same
        top-level payload.
    */
    pub fn sub_reader(&mut self, len: usize) -> DecodeResult<Reader<'a>> {
        let base = self.offset();
        let data = self.read_bytes(len)?;
        Ok(Reader { data, pos: 0, base })
    }

    /**
        Fail with `TrailingData` unless every byte has been consumed.
    */
    pub fn finish(&self) -> DecodeResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(DecodeError::TrailingData {
                offset: self.offset(),
                count: self.remaining(),
            }
            .traced())
        }
    }

    fn truncated(&self, needed: usize) -> DecodeError {
        DecodeError::Truncated {
            offset: self.offset(),
            needed,
            available: self.remaining(),
        }
        .traced()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_advances_cursor() {
        let mut r = Reader::new(&[1, 2, 3, 4]);
        assert_eq!(r.read_u8().unwrap(), 1);
        assert_eq!(r.read_bytes(2).unwrap(), &[2, 3]);
        assert_eq!(r.offset(), 3);
        assert_eq!(r.remaining(), 1);
        assert!(!r.is_empty());
        assert_eq!(r.peek_u8(), Some(4));
    }

    #[test]
    fn read_past_end_fails_without_advancing() {
        let mut r = Reader::new(&[1, 2]);
        let err = r.read_bytes(3).unwrap_err();
        assert_eq!(
            err,
            DecodeError::Truncated {
                offset: 0,
                needed: 3,
                available: 2
            }
        );
        assert_eq!(r.remaining(), 2);
    }

    #[test]
    fn huge_length_does_not_overflow() {
        let mut r = Reader::new(&[0; 4]);
        r.read_u8().unwrap();
        assert!(matches!(
            r.read_bytes(usize::MAX),
            Err(DecodeError::Truncated { .. })
        ));
    }

    #[test]
    fn empty_reader() {
        let mut r = Reader::new(&[]);
        assert!(r.is_empty());
        assert_eq!(r.peek_u8(), None);
        assert!(r.read_u8().is_err());
        r.finish().unwrap();
    }

    #[test]
    fn sub_reader_is_bounded_and_keeps_offsets() {
        let mut r = Reader::new(&[9, 9, 1, 2, 3, 7]);
        r.read_bytes(2).unwrap();
        let mut sub = r.sub_reader(3).unwrap();
        assert_eq!(sub.offset(), 2);
        assert_eq!(sub.read_bytes(3).unwrap(), &[1, 2, 3]);
        assert!(sub.read_u8().is_err());
        assert_eq!(r.read_u8().unwrap(), 7);
    }

    #[test]
    fn read_rest_consumes_everything() {
        let mut r = Reader::new(&[1, 2, 3]);
        r.read_u8().unwrap();
        assert_eq!(r.read_rest(), &[2, 3]);
        assert!(r.is_empty());
        assert_eq!(r.read_rest(), &[] as &[u8]);
    }

    #[test]
    fn finish_reports_leftover() {
        let mut r = Reader::new(&[1, 2, 3]);
        r.read_u8().unwrap();
        assert_eq!(
            r.finish().unwrap_err(),
            DecodeError::TrailingData {
                offset: 1,
                count: 2
            }
        );
    }
}
