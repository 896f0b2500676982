use std::path::Path;

use anyhow::{Context, Result};

/**
    Read a decrypted receipt payload from disk.

    With `base64` set the file holds base64 text (line breaks and other
    whitespace are ignored); otherwise it holds the raw DER bytes.
*/
pub fn load(path: &Path, base64: bool) -> Result<Vec<u8>> {
    let data = std::fs::read(path)
        .with_context(|| format!("failed to read payload file {}", path.display()))?;

    let payload = if base64 {
        decode_base64(&data).context("payload file is not valid base64")?
    } else {
        data
    };

    tracing::info!(path = %path.display(), bytes = payload.len(), "loaded receipt payload");
    Ok(payload)
}

fn decode_base64(text: &[u8]) -> Result<Vec<u8>> {
    let compact: Vec<u8> = text
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    Ok(data_encoding::BASE64.decode(&compact)?)
}
