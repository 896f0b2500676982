use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use receipt_core::{DecodeOptions, Receipt, ReceiptAttribute, decode_integer, decode_string};

use crate::fields::{ReceiptField, ValueKind};
use crate::payload;

const NAME_WIDTH: usize = 32;

/**
    Inspect a decrypted App Store receipt payload.
*/
#[derive(Args)]
pub struct InspectCommand {
    /// Path to the decrypted payload file.
    pub path: PathBuf,
    /// The file holds base64 text instead of raw DER.
    #[arg(long)]
    pub base64: bool,
    /// Only show these fields (repeatable, e.g. --field bundle_id).
    #[arg(long = "field")]
    pub fields: Vec<ReceiptField>,
    /// Also show attributes with unknown type codes.
    #[arg(long)]
    pub all: bool,
    /// Deepest nested in-app purchase receipt to open.
    #[arg(long, default_value_t = DecodeOptions::DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
}

impl InspectCommand {
    pub fn run(self) -> Result<()> {
        let data = payload::load(&self.path, self.base64)?;
        let options = DecodeOptions::default().with_max_depth(self.max_depth);
        let receipt = Receipt::with_options(&data, options);

        let filter = Filter {
            fields: &self.fields,
            all: self.all,
        };
        let stdout = std::io::stdout();
        let result = write_receipt(&mut stdout.lock(), &receipt, &filter);
        if let Err(e) = &result {
            tracing::warn!(error = %e, "receipt payload was not fully decoded");
        }
        result
    }
}

struct Filter<'f> {
    fields: &'f [ReceiptField],
    all: bool,
}

impl Filter<'_> {
    fn shows(&self, field: Option<ReceiptField>) -> bool {
        match field {
            // Nested receipts are always opened so their fields can match.
            Some(ReceiptField::InAppPurchase) => true,
            Some(f) => self.fields.is_empty() || self.fields.contains(&f),
            None => self.all && self.fields.is_empty(),
        }
    }
}

fn write_receipt(out: &mut impl Write, receipt: &Receipt<'_>, filter: &Filter<'_>) -> Result<()> {
    let indent = "  ".repeat(receipt.depth());

    for (index, attr) in receipt.attributes().enumerate() {
        let attr = attr.with_context(|| {
            format!(
                "failed to decode attribute {index} at depth {}",
                receipt.depth()
            )
        })?;
        let field = ReceiptField::from_code(attr.attr_type);
        if !filter.shows(field) {
            continue;
        }

        let label = match field {
            Some(f) => format!("{f} ({}):", attr.attr_type),
            None => format!("Unknown ({}):", attr.attr_type),
        };

        if field == Some(ReceiptField::InAppPurchase) {
            writeln!(out, "{indent}{label}")?;
            let nested = receipt
                .nested(attr.value)
                .context("failed to open in-app purchase receipt")?;
            write_receipt(out, &nested, filter)?;
            continue;
        }

        let kind = field.map_or(ValueKind::Opaque, ReceiptField::value_kind);
        let width = NAME_WIDTH.saturating_sub(indent.len());
        writeln!(out, "{indent}{label:<width$}{}", format_value(kind, &attr))?;
    }

    Ok(())
}

/**
    Render a value as its field kind. Values that do not decode as the
    expected kind are shown as hex, never reinterpreted.
*/
fn format_value(kind: ValueKind, attr: &ReceiptAttribute<'_>) -> String {
    let decoded = match kind {
        ValueKind::String => decode_string(attr.value).map(|s| format!("{s:?}")),
        ValueKind::Integer => decode_integer(attr.value).map(|n| n.to_string()),
        ValueKind::Opaque | ValueKind::Nested => return hex::encode(attr.value),
    };
    decoded.unwrap_or_else(|| format!("{} (undecodable)", hex::encode(attr.value)))
}
