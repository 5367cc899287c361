//! Windows-1252 encoding utilities for Latin thermal printers
//!
//! Receipts are written in Portuguese. Printers are switched to code page 16
//! (WPC1252), where every printable character is one byte wide, so widths
//! are counted in chars.
//!
//! - Measuring, truncating, padding and wrapping text to column widths
//! - Converting UTF-8 to Windows-1252 while preserving ESC/POS commands

use tracing::instrument;

/// ESC t 16 - select character code table WPC1252
const SELECT_CP1252: [u8; 3] = [0x1B, 0x74, 0x10];

/// Byte printed for characters the code page cannot represent
const REPLACEMENT: u8 = b'?';

/// Printed width of a string in columns
pub fn text_width(s: &str) -> usize {
    s.chars().count()
}

/// Truncate a string to at most `max_width` columns
pub fn truncate_text(s: &str, max_width: usize) -> String {
    s.chars().take(max_width).collect()
}

/// Pad a string to a specific width
///
/// If the string is longer than the width, it will be truncated.
pub fn pad_text(s: &str, width: usize, align_right: bool) -> String {
    let current = text_width(s);
    if current >= width {
        return truncate_text(s, width);
    }
    let spaces = " ".repeat(width - current);
    if align_right {
        format!("{spaces}{s}")
    } else {
        format!("{s}{spaces}")
    }
}

/// Word-wrap text into lines of at most `width` columns
///
/// Words longer than a full line are split hard.
pub fn wrap_text(s: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in s.split_whitespace() {
        let mut word = word.to_string();
        while text_width(&word) > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let head = truncate_text(&word, width);
            word = word.chars().skip(width).collect();
            lines.push(head);
        }
        if word.is_empty() {
            continue;
        }
        let needed = if current.is_empty() {
            text_width(&word)
        } else {
            text_width(&current) + 1 + text_width(&word)
        };
        if needed > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Convert mixed UTF-8 content (with ESC/POS commands) to Windows-1252
///
/// ASCII bytes (0x00-0x7F) pass through untouched so ESC/POS commands are
/// never corrupted. Runs of bytes >= 0x80 are decoded as UTF-8 and mapped
/// one char at a time; characters outside the code page become `?`.
///
/// The WPC1252 table is selected at the start and again after every printer
/// reset (ESC @), which restores the default table.
#[instrument(skip(bytes))]
pub fn convert_to_cp1252(bytes: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(bytes.len() + SELECT_CP1252.len());
    result.extend_from_slice(&SELECT_CP1252);

    let mut buffer = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];

        if b == 0x1B && i + 1 < bytes.len() && bytes[i + 1] == 0x40 {
            flush_buffer(&mut buffer, &mut result);
            result.extend_from_slice(&[0x1B, 0x40]);
            result.extend_from_slice(&SELECT_CP1252);
            i += 2;
            continue;
        }

        if b < 0x80 {
            flush_buffer(&mut buffer, &mut result);
            result.push(b);
        } else {
            buffer.push(b);
        }
        i += 1;
    }

    flush_buffer(&mut buffer, &mut result);
    result
}

/// Flush the non-ASCII buffer, converting UTF-8 to Windows-1252
fn flush_buffer(buffer: &mut Vec<u8>, result: &mut Vec<u8>) {
    if buffer.is_empty() {
        return;
    }
    let text = String::from_utf8_lossy(buffer);
    let mut scratch = [0u8; 4];
    for c in text.chars() {
        let (encoded, _, had_errors) =
            encoding_rs::WINDOWS_1252.encode(c.encode_utf8(&mut scratch));
        if had_errors || encoded.len() != 1 {
            result.push(REPLACEMENT);
        } else {
            result.push(encoded[0]);
        }
    }
    buffer.clear();
}
