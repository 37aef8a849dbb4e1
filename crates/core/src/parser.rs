//! Line-oriented section parser for guidance completions

use crate::clean::{clean, is_noise, strip_trailing_noise};
use crate::record::{GuidanceRecord, SectionKind};

/// Find the section a cleaned line opens, if any.
///
/// Markers match anywhere in the line, and the first marker in
/// `SectionKind::ALL` order wins when a line carries several.
pub fn detect_header(line: &str) -> Option<SectionKind> {
    SectionKind::ALL
        .into_iter()
        .find(|kind| line.contains(kind.marker()))
}

/// Parse a raw completion into a structured record.
///
/// Never fails: text without recognizable headers yields an empty record.
/// A repeated header routes later lines back into that section, after the
/// content it already holds.
pub fn parse(document: &str) -> GuidanceRecord {
    let mut record = GuidanceRecord::default();
    let mut current: Option<SectionKind> = None;

    for raw in document.split('\n') {
        let line = clean(raw);
        if line.is_empty() {
            continue;
        }

        if let Some(kind) = detect_header(&line) {
            current = Some(kind);
            continue;
        }

        if is_noise(&line) {
            continue;
        }

        match current {
            None => {}
            Some(SectionKind::Overview) => {
                if !record.overview.is_empty() {
                    record.overview.push('\n');
                }
                record.overview.push_str(&line);
            }
            Some(kind) => {
                let item = line.trim();
                if let Some(items) = record.items_mut(kind) {
                    if !item.is_empty() && !is_noise(item) {
                        items.push(item.to_string());
                    }
                }
            }
        }
    }

    finish(record)
}

fn finish(mut record: GuidanceRecord) -> GuidanceRecord {
    record.overview = record.overview.trim().to_string();

    for kind in SectionKind::ALL {
        let Some(items) = record.items_mut(kind) else {
            continue;
        };

        let tidy: Vec<String> = items
            .iter()
            .map(|item| item.trim())
            .filter(|item| !item.is_empty() && !is_noise(item))
            .map(str::to_string)
            .collect();
        *items = tidy;

        // Truncated completions leave their debris on the final item
        if let Some(last) = items.last_mut() {
            *last = strip_trailing_noise(last).to_string();
            if last.is_empty() {
                items.pop();
            }
        }
    }

    record
}
