use crate::der::{self, Tag};
use crate::error::DecodeResult;
use crate::reader::Reader;

/**
    One `(type, version, value)` triple from a receipt's attribute set.

    ```text
    ReceiptAttribute ::= SEQUENCE {
        type    INTEGER,
        version INTEGER,
        value   OCTET STRING
    }
    ```

    `value` borrows from the payload the attribute was decoded from. What it
    holds depends on `attr_type`: usually a DER-encoded string or integer
    (see [`crate::decode_string`], [`crate::decode_integer`]), sometimes a
    raw hash, and for in-app purchase records a complete nested attribute
    set (see [`crate::Receipt::nested`]).
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReceiptAttribute<'a> {
    pub attr_type: u64,
    pub version: u64,
    pub value: &'a [u8],
}

/**
    Decode exactly one attribute SEQUENCE at the cursor.

    The SEQUENCE must fit inside `r`, and its three fields must fill the
    SEQUENCE content exactly. On failure nothing is returned; the reader
    position is then unspecified and it should be discarded.
*/
pub(crate) fn decode_attribute<'a>(r: &mut Reader<'a>) -> DecodeResult<ReceiptAttribute<'a>> {
    let mut seq = der::read_tlv(r, Tag::Sequence)?;

    let attr_type = der::read_integer(&mut seq)?;
    let version = der::read_integer(&mut seq)?;
    let value = der::read_tlv(&mut seq, Tag::OctetString)?.read_rest();
    seq.finish()?;

    tracing::trace!(
        target: "receipt_core::der",
        attr_type,
        version,
        len = value.len(),
        "decoded receipt attribute"
    );

    Ok(ReceiptAttribute {
        attr_type,
        version,
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;
    use crate::test_support::{attribute, integer, tlv};
    use hex_literal::hex;

    fn decode(bytes: &[u8]) -> DecodeResult<ReceiptAttribute<'_>> {
        decode_attribute(&mut Reader::new(bytes))
    }

    #[test]
    fn decode_simple_attribute() {
        let raw = hex!("30 0a 02 01 02 02 01 01 04 02 ab cd");
        let attr = decode(&raw).unwrap();
        assert_eq!(attr.attr_type, 2);
        assert_eq!(attr.version, 1);
        assert_eq!(attr.value, &hex!("ab cd"));
    }

    #[test]
    fn value_is_a_view_into_the_payload() {
        let raw = attribute(17, 1, b"nested");
        let attr = decode(&raw).unwrap();
        let start = raw.len() - 6;
        assert!(core::ptr::eq(attr.value.as_ptr(), raw[start..].as_ptr()));
    }

    #[test]
    fn empty_value_allowed() {
        let raw = attribute(4, 0, b"");
        let attr = decode(&raw).unwrap();
        assert_eq!(attr.attr_type, 4);
        assert!(attr.value.is_empty());
    }

    #[test]
    fn large_type_and_long_form_value() {
        let value = vec![0x5a; 300];
        let raw = attribute(0x1_0000_0000, 7, &value);
        let attr = decode(&raw).unwrap();
        assert_eq!(attr.attr_type, 0x1_0000_0000);
        assert_eq!(attr.version, 7);
        assert_eq!(attr.value, value.as_slice());
    }

    #[test]
    fn reader_stops_after_sequence() {
        let mut raw = attribute(2, 1, b"x");
        raw.extend_from_slice(&hex!("ff ee"));
        let mut r = Reader::new(&raw);
        decode_attribute(&mut r).unwrap();
        assert_eq!(r.read_rest(), &hex!("ff ee"));
    }

    #[test]
    fn not_a_sequence() {
        let err = decode(&hex!("31 00")).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::UnexpectedTag {
                expected: Tag::Sequence,
                actual: 0x31,
                ..
            }
        ));
    }

    #[test]
    fn fields_out_of_order() {
        let mut content = tlv(0x04, b"v");
        content.extend(integer(2));
        content.extend(integer(1));
        let err = decode(&tlv(0x30, &content)).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::UnexpectedTag {
                expected: Tag::Integer,
                actual: 0x04,
                ..
            }
        ));
    }

    #[test]
    fn missing_value_field() {
        let mut content = integer(2);
        content.extend(integer(1));
        let err = decode(&tlv(0x30, &content)).unwrap_err();
        assert!(matches!(err, DecodeError::Truncated { .. }));
    }

    #[test]
    fn field_overruns_sequence() {
        // SEQUENCE claims 8 bytes but the OCTET STRING inside claims 4 more
        // than remain; the bytes exist in the buffer, just not in the SEQUENCE.
        let raw = hex!("30 08 02 01 02 02 01 01 04 05 aa bb cc dd ee");
        let err = decode(&raw).unwrap_err();
        assert!(matches!(err, DecodeError::Truncated { .. }));
    }

    #[test]
    fn sequence_overruns_buffer() {
        let raw = hex!("30 0b 02 01 02 02 01 01 04 02 ab cd");
        assert!(matches!(
            decode(&raw).unwrap_err(),
            DecodeError::Truncated { .. }
        ));
    }

    #[test]
    fn extra_bytes_inside_sequence() {
        let raw = hex!("30 0b 02 01 02 02 01 01 04 02 ab cd 00");
        assert_eq!(
            decode(&raw).unwrap_err(),
            DecodeError::TrailingData {
                offset: 12,
                count: 1
            }
        );
    }
}
