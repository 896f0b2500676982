use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use receipt_core::Receipt;

use crate::payload;

/**
    Print every attribute of a receipt payload without interpreting it.
*/
#[derive(Args)]
pub struct DumpCommand {
    /// Path to the decrypted payload file.
    pub path: PathBuf,
    /// The file holds base64 text instead of raw DER.
    #[arg(long)]
    pub base64: bool,
}

impl DumpCommand {
    pub fn run(self) -> Result<()> {
        let data = payload::load(&self.path, self.base64)?;
        let stdout = std::io::stdout();
        write_dump(&mut stdout.lock(), &Receipt::new(&data))
    }
}

fn write_dump(out: &mut impl Write, receipt: &Receipt<'_>) -> Result<()> {
    let mut count = 0usize;
    for attr in receipt.attributes() {
        let attr = attr.with_context(|| format!("failed to decode attribute {count}"))?;
        writeln!(
            out,
            "type={:<5} version={:<3} length={:<5} {}",
            attr.attr_type,
            attr.version,
            attr.value.len(),
            hex::encode(attr.value)
        )?;
        count += 1;
    }
    writeln!(out)?;
    writeln!(out, "{count} attribute(s)")?;
    Ok(())
}
