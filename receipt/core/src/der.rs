/*!
    The slice of ASN.1 DER that App Store receipt payloads use.

    Only six universal tags are recognized:

    | Tag            | Byte   | Form        |
    |----------------|--------|-------------|
    | INTEGER        | `0x02` | primitive   |
    | OCTET STRING   | `0x04` | primitive   |
    | UTF8String     | `0x0c` | primitive   |
    | IA5String      | `0x16` | primitive   |
    | SEQUENCE       | `0x30` | constructed |
    | SET            | `0x31` | constructed |

    Lengths must be definite (short or long form). INTEGER contents are read
    as *unsigned* big-endian values: receipt integers are type codes,
    versions and counters, never negative, so the sign bit carries no
    meaning here.
*/

use core::fmt;

use crate::error::{DecodeError, DecodeResult};
use crate::reader::Reader;

/**
    Universal ASN.1 tags that appear in receipt payloads.
*/
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Integer = 0x02,
    OctetString = 0x04,
    Utf8String = 0x0c,
    Ia5String = 0x16,
    Sequence = 0x30,
    Set = 0x31,
}

impl Tag {
    pub const fn from_u8(u: u8) -> Option<Self> {
        match u {
            0x02 => Some(Self::Integer),
            0x04 => Some(Self::OctetString),
            0x0c => Some(Self::Utf8String),
            0x16 => Some(Self::Ia5String),
            0x30 => Some(Self::Sequence),
            0x31 => Some(Self::Set),
            _ => None,
        }
    }

    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    pub const fn to_name(self) -> &'static str {
        match self {
            Self::Integer => "INTEGER",
            Self::OctetString => "OCTET STRING",
            Self::Utf8String => "UTF8String",
            Self::Ia5String => "IA5String",
            Self::Sequence => "SEQUENCE",
            Self::Set => "SET",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_name())
    }
}

/**
    Decode a DER length field at the cursor.

    - `0xxxxxxx`: short form, the length is the low 7 bits.
    - `10000000`: indefinite form, rejected.
    - `1nnnnnnn`: long form, the length is the next `n` bytes big-endian.

    Long-form lengths with leading zero bytes are accepted and decode to the
    same value as their short-form equivalent.
*/
pub fn read_length(r: &mut Reader<'_>) -> DecodeResult<usize> {
    let offset = r.offset();
    let first = r.read_u8()?;

    if first & 0x80 == 0 {
        return Ok(usize::from(first));
    }

    let count = usize::from(first & 0x7f);
    if count == 0 {
        return Err(DecodeError::IndefiniteLength { offset }.traced());
    }

    let bytes = r.read_bytes(count)?;
    accumulate(bytes)
        .and_then(|v| usize::try_from(v).ok())
        .ok_or_else(|| DecodeError::LengthOverflow { offset }.traced())
}

/**
    Interpret `bytes` as an unsigned big-endian integer.

    `offset` is the absolute position of `bytes[0]`, used for errors.
    Leading zero bytes are ignored, so a 9-byte DER INTEGER holding
    `u64::MAX` (`00 ff ff ff ff ff ff ff ff`) decodes without overflow.
*/
pub fn be_uint(bytes: &[u8], offset: usize) -> DecodeResult<u64> {
    if bytes.is_empty() {
        return Err(DecodeError::EmptyInteger { offset }.traced());
    }
    accumulate(bytes).ok_or_else(|| DecodeError::IntegerOverflow { offset }.traced())
}

fn accumulate(bytes: &[u8]) -> Option<u64> {
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    let significant = &bytes[start..];
    if significant.len() > 8 {
        return None;
    }
    Some(
        significant
            .iter()
            .fold(0u64, |acc, &b| (acc << 8) | u64::from(b)),
    )
}

/**
    Consume one tag byte and fail unless it is `expected`.
*/
pub fn expect_tag(r: &mut Reader<'_>, expected: Tag) -> DecodeResult<()> {
    let offset = r.offset();
    let actual = r.read_u8()?;
    if actual == expected.to_u8() {
        Ok(())
    } else {
        Err(DecodeError::UnexpectedTag {
            offset,
            expected,
            actual,
        }
        .traced())
    }
}

/**
    Read a complete TLV with the given tag and return a reader bounded to
    its content. The parent reader ends up just past the element.
*/
pub fn read_tlv<'a>(r: &mut Reader<'a>, tag: Tag) -> DecodeResult<Reader<'a>> {
    expect_tag(r, tag)?;
    let len = read_length(r)?;
    r.sub_reader(len)
}

/**
    Read an INTEGER TLV as an unsigned 64-bit value.
*/
pub fn read_integer(r: &mut Reader<'_>) -> DecodeResult<u64> {
    let mut content = read_tlv(r, Tag::Integer)?;
    let offset = content.offset();
    be_uint(content.read_rest(), offset)
}
