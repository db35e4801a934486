use payseed_core::categories::{InvoiceStatus, OrderStatus, OrderType};
use payseed_core::{Clock, EntityKind, Invoice, Order, Table, Vendor};
use tracing::debug;

use crate::errors::GenerationError;
use crate::pipeline::GenerationContext;

const INVOICE_TERMS_DAYS: i64 = 30;

/// Create up to `count` orders, round-robin over vendors, each followed by
/// exactly one invoice for the same amount.
///
/// Indices with no vendor to bill are skipped: no order and no invoice.
pub fn generate_orders_and_invoices(
    ctx: &mut GenerationContext,
    count: u32,
    vendors: &Table<Vendor>,
) -> Result<(Table<Order>, Table<Invoice>), GenerationError> {
    let reference = ctx.clock.reference();
    let mut orders = Table::new();
    let mut invoices = Table::new();

    if vendors.is_empty() && count > 0 {
        debug!(skipped = count, "no vendors to bill");
    }

    for index in 1..=u64::from(count) {
        let Some(vendor) = vendors.round_robin(index - 1) else {
            continue;
        };

        let (_, order_id) = ctx.counters.next(EntityKind::Order);
        let amount = (500 + (index % 10) * 500) as f64;
        let ordered_at = vendor
            .created_at
            .plus_days(Clock::spread_days(index - 1, u64::from(count)));

        orders.insert(Order {
            order_id: order_id.clone(),
            vendor_id: vendor.vendor_id.clone(),
            order_type: OrderType::from_index(index),
            description: format!("Order {order_id} for {}", vendor.legal_name),
            amount,
            status: OrderStatus::from_index(index),
            created_at: ordered_at,
            updated_at: reference,
        })?;

        let (_, invoice_id) = ctx.counters.next(EntityKind::Invoice);
        let invoiced_at = ordered_at.plus_days((index % 30) as i64);

        invoices.insert(Invoice {
            invoice_id,
            vendor_id: vendor.vendor_id.clone(),
            order_id,
            amount,
            due_date: invoiced_at.plus_days(INVOICE_TERMS_DAYS).date(),
            status: InvoiceStatus::from_index(index),
            created_at: invoiced_at,
            updated_at: reference,
        })?;
    }

    Ok((orders, invoices))
}
