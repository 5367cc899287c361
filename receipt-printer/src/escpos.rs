//! ESC/POS command builder
//!
//! Provides a fluent API for building ESC/POS print data.

use crate::encoding::{convert_to_cp1252, text_width, wrap_text};

/// ESC/POS command builder
///
/// Text is accumulated as UTF-8 and converted to Windows-1252 by
/// [`EscPosBuilder::build`].
pub struct EscPosBuilder {
    buf: Vec<u8>,
    width: usize,
}

impl EscPosBuilder {
    /// Create a new builder with the specified paper width in characters
    ///
    /// Common widths:
    /// - 58mm paper: 32 characters
    /// - 80mm paper: 48 characters
    pub fn new(width: usize) -> Self {
        let mut buf = Vec::with_capacity(2048);
        // Initialize printer (ESC @)
        buf.extend_from_slice(&[0x1B, 0x40]);
        Self { buf, width }
    }

    /// Get the configured paper width
    pub fn width(&self) -> usize {
        self.width
    }

    // === Text Output ===

    /// Write raw text
    pub fn text(&mut self, s: &str) -> &mut Self {
        self.buf.extend_from_slice(s.as_bytes());
        self
    }

    /// Write text followed by newline
    pub fn line(&mut self, s: &str) -> &mut Self {
        self.text(s);
        self.buf.push(b'\n');
        self
    }

    /// Write empty line
    pub fn newline(&mut self) -> &mut Self {
        self.buf.push(b'\n');
        self
    }

    /// Print and feed n lines (ESC d n)
    pub fn feed(&mut self, lines: u8) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x64, lines]);
        self
    }

    /// Word-wrap text to the paper width, prefixing every line with `indent`
    pub fn wrapped(&mut self, indent: &str, s: &str) -> &mut Self {
        let avail = self.width.saturating_sub(text_width(indent)).max(1);
        for part in wrap_text(s, avail) {
            self.text(indent);
            self.line(&part);
        }
        self
    }

    // === Alignment ===

    pub fn center(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x61, 0x01]);
        self
    }

    pub fn left(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x61, 0x00]);
        self
    }

    pub fn right(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x61, 0x02]);
        self
    }

    // === Text Style ===

    pub fn bold(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x45, 0x01]);
        self
    }

    pub fn bold_off(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x45, 0x00]);
        self
    }

    /// Double width and height
    pub fn double_size(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x21, 0x11]);
        self
    }

    /// Double height only
    pub fn double_height(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x21, 0x01]);
        self
    }

    /// Reset to normal size
    pub fn reset_size(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x21, 0x00]);
        self
    }

    // === Separators ===

    /// Print a line of '=' characters
    pub fn sep_double(&mut self) -> &mut Self {
        self.line(&"=".repeat(self.width))
    }

    /// Print a line of '-' characters
    pub fn sep_single(&mut self) -> &mut Self {
        self.line(&"-".repeat(self.width))
    }

    // === Layout Helpers ===

    /// Print left and right text on the same line
    ///
    /// Left text is left-aligned, right text is right-aligned,
    /// with spaces filling the gap.
    pub fn line_lr(&mut self, left: &str, right: &str) -> &mut Self {
        let lw = text_width(left);
        let rw = text_width(right);

        if lw + rw >= self.width {
            // Too long: left on its own line, right flushed on the next
            self.line(left);
            let pad = self.width.saturating_sub(rw);
            self.text(&" ".repeat(pad));
            self.line(right);
        } else {
            let spaces = self.width - lw - rw;
            self.text(left);
            self.text(&" ".repeat(spaces));
            self.line(right);
        }
        self
    }

    // === Paper Control ===

    /// Cut paper (full cut)
    pub fn cut(&mut self) -> &mut Self {
        // GS V 0
        self.buf.extend_from_slice(&[0x1D, 0x56, 0x00]);
        self
    }

    /// Feed n lines then full cut (GS V 66 n)
    pub fn cut_feed(&mut self, lines: u8) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x56, 0x42, lines]);
        self
    }

    // === Build ===

    /// Build the final byte buffer with Windows-1252 encoding
    pub fn build(self) -> Vec<u8> {
        convert_to_cp1252(&self.buf)
    }

    /// Build without conversion (UTF-8 text, for previews and tests)
    pub fn build_raw(self) -> Vec<u8> {
        self.buf
    }
}

impl Default for EscPosBuilder {
    fn default() -> Self {
        Self::new(48)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_starts_with_init() {
        let mut b = EscPosBuilder::new(32);
        b.center().double_size().line("PEDIDO #1").reset_size().left();

        let data = b.build_raw();
        assert_eq!(&data[..2], &[0x1B, 0x40]);
        assert!(String::from_utf8_lossy(&data).contains("PEDIDO #1"));
    }

    #[test]
    fn test_line_lr_fills_width() {
        let mut b = EscPosBuilder::new(20);
        b.line_lr("Feijão", "R$ 9,90");

        let data = b.build_raw();
        let s = String::from_utf8_lossy(&data[2..]);
        let line = s.trim_end_matches('\n');
        assert_eq!(text_width(line), 20);
        assert!(line.starts_with("Feijão"));
        assert!(line.ends_with("R$ 9,90"));
    }

    #[test]
    fn test_line_lr_overflow_breaks_line() {
        let mut b = EscPosBuilder::new(10);
        b.line_lr("Moqueca de peixe", "R$ 45,00");

        let data = b.build_raw();
        let s = String::from_utf8_lossy(&data[2..]).to_string();
        let lines: Vec<&str> = s.lines().collect();
        assert_eq!(lines[0], "Moqueca de peixe");
        assert_eq!(lines[1], "  R$ 45,00");
    }

    #[test]
    fn test_separators() {
        let mut b = EscPosBuilder::new(10);
        b.sep_double().sep_single();

        let s = String::from_utf8_lossy(&b.build_raw()).to_string();
        assert!(s.contains("=========="));
        assert!(s.contains("----------"));
    }

    #[test]
    fn test_wrapped_respects_indent() {
        let mut b = EscPosBuilder::new(12);
        b.wrapped("   ", "sem cebola por favor");

        let s = String::from_utf8_lossy(&b.build_raw()[2..]).to_string();
        for line in s.lines() {
            assert!(line.starts_with("   "));
            assert!(text_width(line) <= 12);
        }
    }

    #[test]
    fn test_build_encodes_accents() {
        let mut b = EscPosBuilder::new(48);
        b.line("Método");
        let data = b.build();
        // é = 0xE9 in Windows-1252
        assert!(data.contains(&0xE9));
        assert!(!data.windows(2).any(|w| w == [0xC3, 0xA9]));
    }
}
