//! Customer receipt renderer
//!
//! Layout (48 columns on 80mm paper):
//!
//! ```text
//! ================================================
//!               TEMPERO DE MAINHA
//! ================================================
//! PEDIDO #3
//! Cliente: Maria
//! Contato: 71999990000
//! Entrega: Entrega - Rua A, 10
//! Data: 14/03/2025 12:05
//! ------------------------------------------------
//! 1. Feijoada (x1)                        R$ 10.00
//!    Acompanhamentos:
//!      - Farofa
//!    Obs: sem pimenta
//! ------------------------------------------------
//!                                  TOTAL: R$ 22.00
//! Método de Pagamento: Cartão
//! PAGO: NÃO
//! ================================================
//!           OBRIGADO PELA PREFERÊNCIA!
//! ```

use receipt_printer::EscPosBuilder;
use shared::models::{DeliveryMode, Order, OrderLineItem};

use crate::utils::money::format_amount;
use crate::utils::time::BusinessClock;

const SHOP_NAME: &str = "TEMPERO DE MAINHA";

/// Receipt renderer
pub struct ReceiptRenderer {
    width: usize,
    clock: BusinessClock,
}

impl ReceiptRenderer {
    pub fn new(width: usize, clock: BusinessClock) -> Self {
        Self { width, clock }
    }

    /// Render an order to Windows-1252 ESC/POS bytes
    pub fn render(&self, order: &Order) -> Vec<u8> {
        let mut b = EscPosBuilder::new(self.width);
        self.render_into(&mut b, order);
        b.build()
    }

    /// Render without code page conversion (UTF-8 text, for previews)
    pub fn render_preview(&self, order: &Order) -> Vec<u8> {
        let mut b = EscPosBuilder::new(self.width);
        self.render_into(&mut b, order);
        b.build_raw()
    }

    fn render_into(&self, b: &mut EscPosBuilder, order: &Order) {
        self.render_header(b, order);
        for (index, item) in order.items.iter().enumerate() {
            self.render_item(b, index + 1, item);
        }
        self.render_footer(b, order);
    }

    fn render_header(&self, b: &mut EscPosBuilder, order: &Order) {
        b.center();
        b.sep_double();
        b.bold().double_size();
        b.line(SHOP_NAME);
        b.reset_size().bold_off();
        b.sep_double();

        b.left();
        b.bold();
        b.line(&format!("PEDIDO #{}", order.order_number));
        b.bold_off();
        b.wrapped("", &format!("Cliente: {}", order.customer_name));
        b.line(&format!("Contato: {}", order.customer_contact));
        let delivery = match (&order.delivery, &order.address) {
            (DeliveryMode::Delivery, Some(address)) => {
                format!("Entrega: {} - {}", order.delivery.label(), address)
            }
            _ => format!("Entrega: {}", order.delivery.label()),
        };
        b.wrapped("", &delivery);
        b.line(&format!("Data: {}", self.clock.format_local(order.created_at)));
        b.sep_single();
    }

    fn render_item(&self, b: &mut EscPosBuilder, position: usize, item: &OrderLineItem) {
        b.line_lr(
            &format!("{}. {} (x{})", position, item.name, item.quantity),
            &format_amount(item.subtotal),
        );
        if !item.garnishes.is_empty() {
            b.line("   Acompanhamentos:");
            for garnish in &item.garnishes {
                b.wrapped("     - ", garnish);
            }
        }
        if let Some(notes) = &item.notes {
            b.wrapped("   Obs: ", notes);
        }
    }

    fn render_footer(&self, b: &mut EscPosBuilder, order: &Order) {
        b.sep_single();
        b.bold();
        b.line_lr("", &format!("TOTAL: {}", format_amount(order.total)));
        b.bold_off();
        b.line(&format!("Método de Pagamento: {}", order.payment_method.label()));
        b.line(&format!("PAGO: {}", if order.is_paid { "SIM" } else { "NÃO" }));
        b.sep_double();
        b.center();
        b.line("OBRIGADO PELA PREFERÊNCIA!");
        b.left();
        b.feed(3);
        b.cut();
    }
}
