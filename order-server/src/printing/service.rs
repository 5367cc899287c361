//! Print service
//!
//! Printing is a pure reader: it loads today's order, renders it and pushes
//! the bytes to the network printer. Nothing is written back.

use receipt_printer::{NetworkPrinter, PrintError, Printer};
use shared::models::Order;

use super::ReceiptRenderer;
use crate::core::{PrinterConfig, ServerState};
use crate::orders;
use crate::utils::{AppError, AppResult, ErrorCode};

/// Unreachable printers are worth a retry (503); anything else is a failure
fn print_error(err: PrintError) -> AppError {
    if err.is_unreachable() {
        AppError::with_message(ErrorCode::PrinterNotAvailable, err.to_string())
    } else {
        AppError::with_message(ErrorCode::PrintFailed, err.to_string())
    }
}

/// Print one of today's orders by its daily number
pub async fn print_order(state: &ServerState, order_number: i64) -> AppResult<Order> {
    let business_date = state.clock.today_key();
    let order = orders::get_order(&state.pool, &business_date, order_number).await?;

    let renderer = ReceiptRenderer::new(state.config.printer.width, state.clock);
    let data = renderer.render(&order);
    send_to_printer(&state.config.printer, &data).await?;

    tracing::info!(
        order_number = order.order_number,
        printer = %state.config.printer.addr,
        "Receipt printed"
    );
    Ok(order)
}

/// Send raw ESC/POS bytes to the configured printer
pub async fn send_to_printer(config: &PrinterConfig, data: &[u8]) -> AppResult<()> {
    let printer = NetworkPrinter::from_addr(&config.addr)
        .map_err(print_error)?
        .with_timeout(config.timeout);
    printer.print(data).await.map_err(|e| {
        tracing::warn!(printer = %config.addr, error = %e, "Receipt print failed");
        print_error(e)
    })
}
