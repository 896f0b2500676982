use core::fmt;
use core::str::FromStr;

use thiserror::Error;

/**
    How a field's value bytes are encoded.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// One or more UTF8String / IA5String elements.
    String,
    /// A single INTEGER element.
    Integer,
    /// Raw bytes, shown as hex.
    Opaque,
    /// A complete nested attribute set.
    Nested,
}

/**
    Receipt attribute type codes, as published in Apple's receipt field
    reference. Codes 17xx only appear inside in-app purchase receipts.
*/
#[repr(u64)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReceiptField {
    BundleId = 2,
    AppVersion = 3,
    OpaqueValue = 4,
    Sha1Hash = 5,
    CreationDate = 12,
    InAppPurchase = 17,
    OriginalAppVersion = 19,
    ExpirationDate = 21,
    Quantity = 1701,
    ProductId = 1702,
    TransactionId = 1703,
    PurchaseDate = 1704,
    OriginalTransactionId = 1705,
    OriginalPurchaseDate = 1706,
    SubscriptionExpirationDate = 1708,
    WebOrderLineItemId = 1711,
    CancellationDate = 1712,
}

impl ReceiptField {
    pub const ALL: [Self; 17] = [
        Self::BundleId,
        Self::AppVersion,
        Self::OpaqueValue,
        Self::Sha1Hash,
        Self::CreationDate,
        Self::InAppPurchase,
        Self::OriginalAppVersion,
        Self::ExpirationDate,
        Self::Quantity,
        Self::ProductId,
        Self::TransactionId,
        Self::PurchaseDate,
        Self::OriginalTransactionId,
        Self::OriginalPurchaseDate,
        Self::SubscriptionExpirationDate,
        Self::WebOrderLineItemId,
        Self::CancellationDate,
    ];

    pub const fn from_code(code: u64) -> Option<Self> {
        match code {
            2 => Some(Self::BundleId),
            3 => Some(Self::AppVersion),
            4 => Some(Self::OpaqueValue),
            5 => Some(Self::Sha1Hash),
            12 => Some(Self::CreationDate),
            17 => Some(Self::InAppPurchase),
            19 => Some(Self::OriginalAppVersion),
            21 => Some(Self::ExpirationDate),
            1701 => Some(Self::Quantity),
            1702 => Some(Self::ProductId),
            1703 => Some(Self::TransactionId),
            1704 => Some(Self::PurchaseDate),
            1705 => Some(Self::OriginalTransactionId),
            1706 => Some(Self::OriginalPurchaseDate),
            1708 => Some(Self::SubscriptionExpirationDate),
            1711 => Some(Self::WebOrderLineItemId),
            1712 => Some(Self::CancellationDate),
            _ => None,
        }
    }

    pub const fn to_code(self) -> u64 {
        self as u64
    }

    pub const fn value_kind(self) -> ValueKind {
        match self {
            Self::OpaqueValue | Self::Sha1Hash => ValueKind::Opaque,
            Self::InAppPurchase => ValueKind::Nested,
            Self::Quantity | Self::WebOrderLineItemId => ValueKind::Integer,
            _ => ValueKind::String,
        }
    }

    pub const fn to_name(self) -> &'static str {
        match self {
            Self::BundleId => "Bundle ID",
            Self::AppVersion => "App Version",
            Self::OpaqueValue => "Opaque Value",
            Self::Sha1Hash => "SHA-1 Hash",
            Self::CreationDate => "Creation Date",
            Self::InAppPurchase => "In-App Purchase",
            Self::OriginalAppVersion => "Original App Version",
            Self::ExpirationDate => "Expiration Date",
            Self::Quantity => "Quantity",
            Self::ProductId => "Product ID",
            Self::TransactionId => "Transaction ID",
            Self::PurchaseDate => "Purchase Date",
            Self::OriginalTransactionId => "Original Transaction ID",
            Self::OriginalPurchaseDate => "Original Purchase Date",
            Self::SubscriptionExpirationDate => "Subscription Expiration Date",
            Self::WebOrderLineItemId => "Web Order Line Item ID",
            Self::CancellationDate => "Cancellation Date",
        }
    }

    /**
        Look a field up by display name, ignoring case and treating spaces,
        hyphens and underscores alike (`bundle_id`, `Bundle ID`).
    */
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = normalize(name);
        Self::ALL
            .into_iter()
            .find(|field| normalize(field.to_name()) == wanted)
    }
}

fn normalize(name: &str) -> String {
    name.trim()
        .chars()
        .filter(|&c| !matches!(c, ' ' | '-' | '_'))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl fmt::Display for ReceiptField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_name())
    }
}

/**
    Error returned when a field name is not recognized.
*/
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown receipt field '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for ReceiptField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownField(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_round_trip() {
        for field in ReceiptField::ALL {
            assert_eq!(ReceiptField::from_code(field.to_code()), Some(field));
        }
        assert_eq!(ReceiptField::from_code(0), None);
        assert_eq!(ReceiptField::from_code(1707), None);
    }

    #[test]
    fn value_kinds() {
        assert_eq!(ReceiptField::BundleId.value_kind(), ValueKind::String);
        assert_eq!(ReceiptField::CancellationDate.value_kind(), ValueKind::String);
        assert_eq!(ReceiptField::Quantity.value_kind(), ValueKind::Integer);
        assert_eq!(ReceiptField::Sha1Hash.value_kind(), ValueKind::Opaque);
        assert_eq!(ReceiptField::InAppPurchase.value_kind(), ValueKind::Nested);
    }

    #[test]
    fn parse_by_name() {
        assert_eq!("bundle_id".parse::<ReceiptField>(), Ok(ReceiptField::BundleId));
        assert_eq!("Product ID".parse::<ReceiptField>(), Ok(ReceiptField::ProductId));
        assert_eq!(
            "in-app-purchase".parse::<ReceiptField>(),
            Ok(ReceiptField::InAppPurchase)
        );
        assert_eq!(
            "nope".parse::<ReceiptField>(),
            Err(UnknownField("nope".into()))
        );
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(ReceiptField::Sha1Hash.to_string(), "SHA-1 Hash");
    }
}
