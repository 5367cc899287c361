//! # receipt-printer
//!
//! ESC/POS thermal printer library - low-level printing capabilities only.
//!
//! ## Scope
//!
//! This crate handles HOW to print:
//! - ESC/POS command building
//! - Windows-1252 encoding for Portuguese text (ç, ã, é, ...)
//! - Network printing (TCP port 9100)
//!
//! WHAT to print (the order receipt layout) lives in the server.
//!
//! ## Example
//!
//! ```ignore
//! use receipt_printer::{EscPosBuilder, NetworkPrinter, Printer};
//!
//! let mut builder = EscPosBuilder::new(48);
//! builder.center();
//! builder.double_size();
//! builder.line("PEDIDO #12");
//! builder.reset_size();
//! builder.left();
//! builder.line_lr("1. Feijoada (x2)", "R$ 50,00");
//! builder.cut_feed(3);
//!
//! let printer = NetworkPrinter::from_addr("192.168.0.150:9100")?;
//! printer.print(&builder.build()).await?;
//! ```

mod encoding;
mod error;
mod escpos;
mod printer;

// Re-exports
pub use encoding::{convert_to_cp1252, pad_text, text_width, truncate_text, wrap_text};
pub use error::{PrintError, PrintResult};
pub use escpos::EscPosBuilder;
pub use printer::{NetworkPrinter, Printer};
