/// Implementation of `mmkv inspect`.
///
/// Decodes an MMKV data file and prints one line per entry, followed by a
/// line describing where the scan ended. When `--entry N` is given, only
/// the entry at index N is shown.
///
/// # Output format
///
/// ```text
/// File:    mmkv.default  (crc: mmkv.default.crc)
/// Header:  declared 58 bytes, 58 available, 4 entries (type: Auto)
/// [0] user_id = 1024  (Int32, 4 bytes)
/// [1] nickname = "alice"  (String, 6 bytes)
/// [2] dark_mode = True  (Bool, 1 byte)
/// [3] avatar = 89 50 4E 47...  (Bytes, 2048 bytes)
/// ---
/// Scan complete at offset 62
/// ```
use anyhow::{Context, Result};
use mmkv_decoder::{Classifier, DecodedDump, DecoderConfig, MmkvDecoder, ScanOutcome};
use mmkv_types::{Entry, TypeHint, TypeLabel};
use mmkv_wire::{FrameReader, HEADER_SIZE};

use crate::InspectArgs;

/// Run the `mmkv inspect` command.
///
/// # Errors
///
/// Returns an error if the data file is missing, unreadable, or shorter
/// than the 4-byte header.
pub fn run(args: &InspectArgs) -> Result<()> {
    let input = &args.input;
    let config = DecoderConfig::with_hint(input.type_hint);
    let dump = MmkvDecoder::decode_file_with_config(&input.file, input.crc.as_deref(), &config)
        .with_context(|| format!("failed to decode {}", input.file.display()))?;

    match &input.crc {
        Some(crc) => println!(
            "File:    {}  (crc: {})",
            input.file.display(),
            crc.display()
        ),
        None => println!("File:    {}", input.file.display()),
    }
    println!("{}", header_line(&dump, &config));

    // --show-rule needs the raw value bytes, which entries do not keep.
    // Under a forced hint no auto rule ran, so there is nothing to show.
    let wants_rules = args.show_rule && input.type_hint == TypeHint::Auto;
    let raw = if wants_rules {
        Some(std::fs::read(&input.file).with_context(|| {
            format!("cannot read {}", input.file.display())
        })?)
    } else {
        None
    };
    let slices = raw.as_deref().map(value_slices);

    for entry in &dump.entries {
        if let Some(target) = args.entry
            && entry.index != target
        {
            continue;
        }

        println!("{}", entry_line(entry));

        if let Some(slices) = &slices
            && let Some(rule) = slices
                .get(entry.index)
                .and_then(|value| rule_for(value, input.type_hint))
        {
            println!("      rule: {rule}");
        }
    }

    println!("---");
    println!("{}", outcome_line(&dump.outcome));

    Ok(())
}

// ── Formatting helpers ────────────────────────────────────────────────────────

fn header_line(dump: &DecodedDump, config: &DecoderConfig) -> String {
    let count = dump.entries.len();
    let plural = if count == 1 { "y" } else { "ies" };
    match dump.header {
        Some(header) => format!(
            "Header:  declared {} bytes, {} available, {count} entr{plural} (type: {})",
            header.declared_len,
            dump.payload_end.saturating_sub(HEADER_SIZE),
            config.type_hint
        ),
        None => format!("Header:  missing, {count} entr{plural}"),
    }
}

/// One-line rendering of an entry. Strings are quoted so that leading or
/// trailing whitespace stays visible.
pub fn entry_line(entry: &Entry) -> String {
    let value = match entry.type_label {
        TypeLabel::String => format!("{:?}", entry.rendered_value),
        _ => entry.rendered_value.clone(),
    };
    let unit = if entry.raw_length == 1 { "byte" } else { "bytes" };
    format!(
        "[{}] {} = {value}  ({}, {} {unit})",
        entry.index, entry.key, entry.type_label, entry.raw_length
    )
}

pub fn outcome_line(outcome: &ScanOutcome) -> String {
    match outcome {
        ScanOutcome::Complete { offset } => format!("Scan complete at offset {offset}"),
        ScanOutcome::Stopped { offset, reason } => {
            format!("Scan stopped at offset {offset}: {reason}")
        }
    }
}

/// The auto rule that produced a value's label, if auto detection ran.
fn rule_for(value: &[u8], hint: TypeHint) -> Option<&'static str> {
    (hint == TypeHint::Auto).then(|| Classifier::matching_rule(value))
}

/// Value slices of the well-formed frames, in order.
fn value_slices(buf: &[u8]) -> Vec<&[u8]> {
    let mut slices = Vec::new();
    if let Ok((mut reader, _)) = FrameReader::new(buf) {
        while reader.has_remaining() {
            match reader.next_frame() {
                Ok(frame) => slices.push(frame.value),
                Err(_) => break,
            }
        }
    }
    slices
}
