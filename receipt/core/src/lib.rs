/*!
    Decoder for the ASN.1 DER payload inside App Store receipts.

    The payload, once signature verification has stripped the PKCS#7
    envelope, is a `SET OF SEQUENCE { INTEGER, INTEGER, OCTET STRING }`.
    This crate walks that structure and offers typed views of individual
    values. It does not assign meaning to attribute type codes.

    ```no_run
    use receipt_core::{Receipt, decode_string};

    # fn run(payload: &[u8]) -> Result<(), receipt_core::DecodeError> {
    let receipt = Receipt::new(payload);
    receipt.enumerate(|attr| {
        if attr.attr_type == 2 {
            println!("bundle id: {:?}", decode_string(attr.value));
        }
    })?;
    # Ok(())
    # }
    ```
*/

mod attribute;
mod der;
mod error;
mod options;
mod reader;
mod set;
mod value;

#[cfg(test)]
mod test_support;

pub use self::attribute::ReceiptAttribute;
pub use self::der::Tag;
pub use self::error::{DecodeError, DecodeResult};
pub use self::options::DecodeOptions;
pub use self::set::{Attributes, Receipt, enumerate_attributes};
pub use self::value::{decode_integer, decode_string, try_decode_integer, try_decode_string};
