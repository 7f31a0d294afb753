/// Implementation of `mmkv validate`.
///
/// Decodes the file and reports either a series of success checkmarks
/// (`✓`) or a diagnostic failure line (`✗`). The decoder never rejects a
/// file with bad framing; it stops early instead. This command turns an
/// early stop into exit code 1 so scripts can tell a complete dump from a
/// truncated or corrupt one.
///
/// # Success output
///
/// ```text
/// ✓ Header: declares 58 bytes (58 available)
/// ✓ Entries: 4 entries decoded
/// ✓ Framing: scan reached end of payload at offset 62
/// ```
///
/// # Failure output
///
/// ```text
/// ✓ Header: declares 4096 bytes (58 available, clamped)
/// ✓ Entries: 2 entries decoded
/// ✗ Framing: scan stopped at offset 31: invalid key length 0 at offset 31
/// ```
use anyhow::{Context, Result, bail};
use mmkv_decoder::{DecoderConfig, MmkvDecoder, ScanOutcome};
use mmkv_wire::HEADER_SIZE;

use crate::ValidateArgs;

/// Run the `mmkv validate` command.
///
/// # Errors
///
/// Returns an error if the file cannot be decoded at all, or if the scan
/// stopped before the end of the declared payload.
pub fn run(args: &ValidateArgs) -> Result<()> {
    let dump = MmkvDecoder::decode_file_with_config(
        &args.file,
        args.crc.as_deref(),
        &DecoderConfig::default(),
    )
    .with_context(|| format!("failed to decode {}", args.file.display()))?;

    if let Some(header) = dump.header {
        let available = dump.payload_end.saturating_sub(HEADER_SIZE);
        let clamped = if usize::try_from(header.declared_len).is_ok_and(|d| d > available) {
            ", clamped"
        } else {
            ""
        };
        println!(
            "✓ Header: declares {} bytes ({available} available{clamped})",
            header.declared_len
        );
    }

    let count = dump.entries.len();
    println!(
        "✓ Entries: {count} entr{} decoded",
        if count == 1 { "y" } else { "ies" }
    );

    match dump.outcome {
        ScanOutcome::Complete { offset } => {
            println!("✓ Framing: scan reached end of payload at offset {offset}");
            Ok(())
        }
        ScanOutcome::Stopped { offset, reason } => {
            println!("✗ Framing: scan stopped at offset {offset}: {reason}");
            bail!("validation failed")
        }
    }
}
