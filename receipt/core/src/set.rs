/*!
    Attribute set enumeration.

    A receipt payload is `SET OF ReceiptAttribute`. Records are decoded one
    at a time, in byte order, until the declared SET content is used up.
    Bytes after the declared SET content are reported as `TrailingData`
    once every declared record has been delivered; a payload is only
    accepted when it is consumed completely.
*/

use core::iter::FusedIterator;

use crate::attribute::{ReceiptAttribute, decode_attribute};
use crate::der::{self, Tag};
use crate::error::{DecodeError, DecodeResult};
use crate::options::DecodeOptions;
use crate::reader::Reader;

/**
    Lazy, single-pass iterator over the attributes of one payload.

    Yields `Err` at most once, after which it is exhausted. Attributes
    yielded before the error were fully decoded and can be trusted.
*/
#[derive(Debug, Clone)]
pub struct Attributes<'a> {
    state: State<'a>,
}

#[derive(Debug, Clone)]
enum State<'a> {
    Header(Reader<'a>),
    Records {
        content: Reader<'a>,
        outer: Reader<'a>,
    },
    Done,
}

impl<'a> Attributes<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self {
            state: State::Header(Reader::new(payload)),
        }
    }
}

impl<'a> Iterator for Attributes<'a> {
    type Item = DecodeResult<ReceiptAttribute<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match core::mem::replace(&mut self.state, State::Done) {
                State::Header(mut outer) => match der::read_tlv(&mut outer, Tag::Set) {
                    Ok(content) => self.state = State::Records { content, outer },
                    Err(e) => return Some(Err(e)),
                },
                State::Records { mut content, outer } => {
                    if content.is_empty() {
                        return outer.finish().err().map(Err);
                    }
                    let item = decode_attribute(&mut content);
                    if item.is_ok() {
                        self.state = State::Records { content, outer };
                    }
                    return Some(item);
                }
                State::Done => return None,
            }
        }
    }
}

impl FusedIterator for Attributes<'_> {}

/**
    A receipt payload together with its nesting depth and decode limits.

    The top-level payload handed over after signature verification is a
    `Receipt` at depth 0. In-app purchase attributes carry their own
    complete attribute set, opened with [`Receipt::nested`].
*/
#[derive(Debug, Clone, Copy)]
pub struct Receipt<'a> {
    payload: &'a [u8],
    depth: usize,
    options: DecodeOptions,
}

impl<'a> Receipt<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self::with_options(payload, DecodeOptions::default())
    }

    pub fn with_options(payload: &'a [u8], options: DecodeOptions) -> Self {
        Self {
            payload,
            depth: 0,
            options,
        }
    }

    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn options(&self) -> DecodeOptions {
        self.options
    }

    pub fn attributes(&self) -> Attributes<'a> {
        Attributes::new(self.payload)
    }

    /**
        Decode every attribute, handing each to `visit` as soon as it is
        decoded.

        Decoding stops at the first error. Attributes already passed to
        `visit` stay delivered; an `Err` only says the payload was not
        consumed completely.
    */
    pub fn enumerate<F>(&self, mut visit: F) -> DecodeResult<()>
    where
        F: FnMut(ReceiptAttribute<'a>),
    {
        for attr in self.attributes() {
            visit(attr?);
        }
        Ok(())
    }

    /**
        Open an attribute value that is itself a complete attribute set,
        one level deeper than `self`.

        Fails with `NestingTooDeep` once the configured maximum depth would
        be exceeded.
    */
    pub fn nested<'b>(&self, payload: &'b [u8]) -> DecodeResult<Receipt<'b>> {
        let depth = self.depth + 1;
        if depth > self.options.max_depth {
            return Err(DecodeError::NestingTooDeep {
                max_depth: self.options.max_depth,
            }
            .traced());
        }
        Ok(Receipt {
            payload,
            depth,
            options: self.options,
        })
    }
}

/**
    Decode every attribute in `payload`, handing each to `visit`.

    Shorthand for `Receipt::new(payload).enumerate(visit)`.
*/
pub fn enumerate_attributes<'a, F>(payload: &'a [u8], visit: F) -> DecodeResult<()>
where
    F: FnMut(ReceiptAttribute<'a>),
{
    Receipt::new(payload).enumerate(visit)
}
