//! DER builders for unit tests.

use crate::der::Tag;

/// Encode a length in the shortest DER form.
pub fn length(len: usize) -> Vec<u8> {
    if len < 0x80 {
        return vec![len as u8];
    }
    let bytes = len.to_be_bytes();
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len() - 1);
    let mut out = vec![0x80 | (bytes.len() - start) as u8];
    out.extend_from_slice(&bytes[start..]);
    out
}

pub fn tlv(tag: u8, content: &[u8]) -> Vec<u8> {
    let mut out = vec![tag];
    out.extend(length(content.len()));
    out.extend_from_slice(content);
    out
}

/// Minimal unsigned INTEGER encoding, with a leading zero when the high bit is set.
pub fn integer(value: u64) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len() - 1);
    let mut content = Vec::new();
    if bytes[start] & 0x80 != 0 {
        content.push(0);
    }
    content.extend_from_slice(&bytes[start..]);
    tlv(Tag::Integer.to_u8(), &content)
}

pub fn utf8(s: &str) -> Vec<u8> {
    tlv(Tag::Utf8String.to_u8(), s.as_bytes())
}

pub fn ia5(s: &str) -> Vec<u8> {
    tlv(Tag::Ia5String.to_u8(), s.as_bytes())
}

pub fn attribute(attr_type: u64, version: u64, value: &[u8]) -> Vec<u8> {
    let mut content = integer(attr_type);
    content.extend(integer(version));
    content.extend(tlv(Tag::OctetString.to_u8(), value));
    tlv(Tag::Sequence.to_u8(), &content)
}

pub fn set(records: &[Vec<u8>]) -> Vec<u8> {
    tlv(Tag::Set.to_u8(), &records.concat())
}
