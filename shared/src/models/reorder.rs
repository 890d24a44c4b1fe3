//! Reorder planning for under-stocked products

use serde::{Deserialize, Serialize};

use super::aggregate::ProductAggregate;

/// Safety buffer added on top of the minimum stock, in percent
pub const SAFETY_BUFFER_PERCENT: i64 = 30;

/// A product that needs to be reordered
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReorderPlanItem {
    pub name: String,
    pub current_stock: i64,
    pub minimum_stock: i64,
    pub batch_count: u32,
    pub safety_buffer: i64,
    pub ideal_stock: i64,
    /// Always positive
    pub order_quantity: i64,
    /// Units missing to reach the minimum
    pub shortage: i64,
}

/// `ceil(numerator / denominator)` for a positive denominator
fn ceil_div(numerator: i64, denominator: i64) -> i64 {
    let quotient = numerator.div_euclid(denominator);
    if numerator.rem_euclid(denominator) == 0 {
        quotient
    } else {
        quotient + 1
    }
}

/// `ceil(minimum_stock * 0.3)`
pub fn safety_buffer(minimum_stock: i64) -> i64 {
    ceil_div(minimum_stock.saturating_mul(SAFETY_BUFFER_PERCENT), 100)
}

impl ReorderPlanItem {
    /// Plan for a single product, or `None` when it is not below minimum.
    pub fn for_product(aggregate: &ProductAggregate) -> Option<Self> {
        if !aggregate.needs_reorder() {
            return None;
        }

        let buffer = safety_buffer(aggregate.minimum_stock);
        let ideal_stock = aggregate.minimum_stock.saturating_add(buffer);
        let order_quantity = ideal_stock.saturating_sub(aggregate.current_stock).max(0);
        if order_quantity == 0 {
            return None;
        }

        Some(Self {
            name: aggregate.name.clone(),
            current_stock: aggregate.current_stock,
            minimum_stock: aggregate.minimum_stock,
            batch_count: aggregate.batch_count,
            safety_buffer: buffer,
            ideal_stock,
            order_quantity,
            shortage: aggregate.minimum_stock.saturating_sub(aggregate.current_stock),
        })
    }
}

/// Products below minimum stock, largest order first, ties by name.
pub fn plan_reorders(aggregates: &[ProductAggregate]) -> Vec<ReorderPlanItem> {
    let mut plan: Vec<ReorderPlanItem> = aggregates
        .iter()
        .filter_map(ReorderPlanItem::for_product)
        .collect();

    plan.sort_by(|a, b| {
        b.order_quantity
            .cmp(&a.order_quantity)
            .then_with(|| a.name.cmp(&b.name))
    });
    plan
}
