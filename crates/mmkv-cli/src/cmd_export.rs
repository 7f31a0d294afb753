/// Implementation of `mmkv export`.
///
/// Writes the decoded entries as a JSON document:
///
/// ```json
/// {
///   "file": "mmkv.default",
///   "type_hint": "Auto",
///   "complete": true,
///   "entries": [
///     { "index": 0, "key": "user_id", "rendered_value": "1024",
///       "type_label": "Int32", "raw_length": 4 }
///   ]
/// }
/// ```
///
/// `complete` is false when framing stopped the scan early, in which case
/// `entries` holds only what was decoded before the stop.
use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use mmkv_decoder::{DecoderConfig, MmkvDecoder};
use mmkv_types::Entry;
use serde::Serialize;
use tracing::debug;

use crate::ExportArgs;

#[derive(Serialize)]
struct ExportDocument<'a> {
    file: String,
    type_hint: String,
    complete: bool,
    entries: &'a [Entry],
}

/// Run the `mmkv export` command.
///
/// # Errors
///
/// Returns an error if the file cannot be decoded or the output cannot be
/// written.
pub fn run(args: &ExportArgs) -> Result<()> {
    let input = &args.input;
    let dump = MmkvDecoder::decode_file_with_config(
        &input.file,
        input.crc.as_deref(),
        &DecoderConfig::with_hint(input.type_hint),
    )
    .with_context(|| format!("failed to decode {}", input.file.display()))?;

    let document = ExportDocument {
        file: input.file.display().to_string(),
        type_hint: input.type_hint.to_string(),
        complete: dump.outcome.is_complete(),
        entries: &dump.entries,
    };

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create {}", path.display()))?;
            write_json(BufWriter::new(file), &document, args.pretty)
                .with_context(|| format!("cannot write {}", path.display()))?;
            debug!(path = %path.display(), entries = dump.entries.len(), "wrote export");
        }
        None => write_json(io::stdout().lock(), &document, args.pretty)?,
    }

    Ok(())
}

fn write_json(mut w: impl Write, document: &ExportDocument<'_>, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut w, document)?;
    } else {
        serde_json::to_writer(&mut w, document)?;
    }
    writeln!(w)?;
    w.flush()?;
    Ok(())
}
