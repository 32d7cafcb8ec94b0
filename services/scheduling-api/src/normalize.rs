//! Flattens the joined calendar fetch into one deduplicated snapshot and
//! builds the identity indexes the view layer resolves through.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use shared::dto::{CalendarRow, DetailSummary, Order, OrderDetail, OrderStage, OrderStageAssignment};

/// Snapshot of one fetched date range: every assignment row, plus each
/// stage and order exactly once.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NormalizedCalendar {
    pub assignments: Vec<OrderStageAssignment>,
    pub stages: Vec<OrderStage>,
    pub orders: Vec<Order>,
}

/// Collapses joined rows into the snapshot. The first row mentioning a
/// stage or order wins; later duplicates are dropped. Orders are rebuilt
/// from the row summary, so fields the calendar fetch does not select
/// (work types, address, price) come back empty, and only the detail seen
/// on that first row is re-attached.
pub fn normalize(rows: Vec<CalendarRow>) -> NormalizedCalendar {
    let mut assignments = Vec::with_capacity(rows.len());
    let mut stages: Vec<OrderStage> = Vec::new();
    let mut orders: Vec<Order> = Vec::new();
    let mut seen_stages: HashSet<i32> = HashSet::new();
    let mut seen_orders: HashSet<i32> = HashSet::new();

    for row in rows {
        let CalendarRow {
            assignment,
            stage,
            detail,
            order,
        } = row;
        assignments.push(assignment);

        // Detail and order ride along inside the stage branch of the join,
        // so a row without a stage contributes nothing beyond its assignment.
        let Some(stage) = stage else { continue };
        if seen_stages.insert(stage.id) {
            stages.push(stage);
        }
        let Some(detail) = detail else { continue };
        let Some(order) = order else { continue };
        if seen_orders.insert(order.id) {
            orders.push(rebuild_order(order, detail));
        }
    }

    NormalizedCalendar {
        assignments,
        stages,
        orders,
    }
}

fn rebuild_order(summary: shared::dto::OrderSummary, detail: DetailSummary) -> Order {
    Order {
        id: summary.id,
        code: summary.code,
        customer_id: None,
        customer_name: summary.customer_name,
        address: String::new(),
        order_status: summary.order_status,
        order_price: 0.0,
        work_types: Vec::new(),
        created_by: None,
        company: None,
        sales_person: None,
        created_at: None,
        updated_at: None,
        order_details: vec![rebuild_detail(detail)],
    }
}

fn rebuild_detail(d: DetailSummary) -> OrderDetail {
    OrderDetail {
        detail_id: d.detail_id,
        order_id: d.order_id,
        assigned_to: d.assigned_to,
        updated_date: None,
        due_date: d.due_date,
        price: d.price,
        total_cost: d.total_cost,
        notes: d.notes,
        img_url: None,
        process_stage: d.process_stage,
        updated_at: None,
        stages: Vec::new(),
    }
}

/// Identity indexes over one snapshot. Lookups go through maps keyed by id
/// rather than scanning the vectors per assignment.
pub struct CalendarIndex<'a> {
    stages_by_id: HashMap<i32, &'a OrderStage>,
    orders_by_detail: HashMap<i32, &'a Order>,
}

impl<'a> CalendarIndex<'a> {
    pub fn new(data: &'a NormalizedCalendar) -> Self {
        let mut stages_by_id = HashMap::with_capacity(data.stages.len());
        for stage in &data.stages {
            stages_by_id.insert(stage.id, stage);
        }
        let mut orders_by_detail = HashMap::new();
        for order in &data.orders {
            for detail in &order.order_details {
                orders_by_detail.insert(detail.detail_id, order);
            }
        }
        CalendarIndex {
            stages_by_id,
            orders_by_detail,
        }
    }

    pub fn stage_for(&self, assignment: &OrderStageAssignment) -> Option<&'a OrderStage> {
        self.stages_by_id.get(&assignment.order_stage_id).copied()
    }

    /// Resolves the assignment's order via its stage's detail, falling back
    /// to the detail id stored on the assignment itself.
    pub fn order_for(&self, assignment: &OrderStageAssignment) -> Option<&'a Order> {
        let detail_id = self
            .stage_for(assignment)
            .and_then(|stage| stage.order_detail_id)
            .or(assignment.order_detail_id)?;
        self.orders_by_detail.get(&detail_id).copied()
    }
}
