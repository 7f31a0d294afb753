/// Implementation of `mmkv stats`.
///
/// Decodes a file and tabulates the detected types.
///
/// # Example output
///
/// ```text
/// File:    mmkv.default  (4096 bytes)
/// Entries: 6 total
///
/// Type      Count   Bytes
/// ─────────────────────────
/// String        3      41
/// Int32         1       4
/// Bool          1       1
/// Bytes         1    2048
/// ─────────────────────────
/// Total         6    2094
/// ```
///
/// Types with no entries are omitted. Bytes are raw value lengths; keys
/// and framing are not counted.
use std::collections::BTreeMap;
use std::fs;

use anyhow::{Context, Result};
use mmkv_decoder::{DecoderConfig, MmkvDecoder};
use mmkv_types::{Entry, TypeLabel};

use crate::StatsArgs;

/// Run the `mmkv stats` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded.
pub fn run(args: &StatsArgs) -> Result<()> {
    let input = &args.input;
    let file_len = fs::metadata(&input.file)
        .with_context(|| format!("cannot read {}", input.file.display()))?
        .len();
    let dump = MmkvDecoder::decode_file_with_config(
        &input.file,
        input.crc.as_deref(),
        &DecoderConfig::with_hint(input.type_hint),
    )
    .with_context(|| format!("failed to decode {}", input.file.display()))?;

    println!("File:    {}  ({file_len} bytes)", input.file.display());
    println!("Entries: {} total", dump.entries.len());
    if !dump.outcome.is_complete() {
        println!("         (scan stopped early at offset {})", dump.outcome.offset());
    }
    println!();

    let rows = tally(&dump.entries);
    let rule = "─".repeat(25);
    println!("{:<8} {:>6} {:>7}", "Type", "Count", "Bytes");
    println!("{rule}");
    for (label, (count, bytes)) in &rows {
        println!("{:<8} {count:>6} {bytes:>7}", label.as_str());
    }
    println!("{rule}");
    let total_bytes: usize = rows.values().map(|(_, bytes)| bytes).sum();
    println!("{:<8} {:>6} {total_bytes:>7}", "Total", dump.entries.len());

    Ok(())
}

/// Count and raw-byte total per label, in label declaration order.
fn tally(entries: &[Entry]) -> BTreeMap<TypeLabel, (usize, usize)> {
    let mut rows: BTreeMap<TypeLabel, (usize, usize)> = BTreeMap::new();
    for entry in entries {
        let row = rows.entry(entry.type_label).or_default();
        row.0 += 1;
        row.1 += entry.raw_length;
    }
    rows
}
