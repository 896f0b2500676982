/*!
    Typed views of an attribute's `value` bytes.

    Receipt values are themselves DER: a string field holds one or more
    UTF8String / IA5String elements, an integer field holds one INTEGER.
    Decoding a value as the wrong kind yields no value rather than a
    misread one.

    Text must be valid for its declared string type. Invalid UTF-8 in a
    UTF8String, or a byte above 0x7f in an IA5String, fails the whole
    decode; bytes are never dropped or replaced.
*/

use crate::der::{self, Tag};
use crate::error::{DecodeError, DecodeResult};
use crate::reader::Reader;

/**
    Decode a value made of consecutive UTF8String / IA5String elements,
    concatenated into one string. An empty value decodes to `""`.
*/
pub fn try_decode_string(value: &[u8]) -> DecodeResult<String> {
    let mut r = Reader::new(value);
    let mut text = String::new();

    while !r.is_empty() {
        let offset = r.offset();
        let tag = match r.read_u8()? {
            t if t == Tag::Utf8String.to_u8() => Tag::Utf8String,
            t if t == Tag::Ia5String.to_u8() => Tag::Ia5String,
            t => return Err(DecodeError::UnsupportedStringTag { offset, tag: t }.traced()),
        };
        let len = der::read_length(&mut r)?;
        let start = r.offset();
        let bytes = r.read_bytes(len)?;

        let valid = match tag {
            Tag::Ia5String => bytes.is_ascii(),
            _ => true,
        };
        match core::str::from_utf8(bytes) {
            Ok(s) if valid => text.push_str(s),
            _ => return Err(DecodeError::InvalidText { offset: start, tag }.traced()),
        }
    }

    Ok(text)
}

/**
    Like [`try_decode_string`], but discards the reason for failure.
*/
pub fn decode_string(value: &[u8]) -> Option<String> {
    try_decode_string(value).ok()
}

/**
    Decode a value holding a single INTEGER element as an unsigned 64-bit
    integer. Bytes after the INTEGER element are ignored.
*/
pub fn try_decode_integer(value: &[u8]) -> DecodeResult<u64> {
    der::read_integer(&mut Reader::new(value))
}

/**
    Like [`try_decode_integer`], but discards the reason for failure.
*/
pub fn decode_integer(value: &[u8]) -> Option<u64> {
    try_decode_integer(value).ok()
}
