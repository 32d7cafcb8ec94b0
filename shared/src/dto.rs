use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i32,
    pub code: String,
    pub customer_id: Option<i32>,
    pub customer_name: String,
    pub address: String,
    pub order_status: String,
    pub order_price: f64,
    #[serde(default)]
    pub work_types: Vec<String>,
    pub created_by: Option<String>,
    pub company: Option<String>,
    pub sales_person: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub order_details: Vec<OrderDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetail {
    pub detail_id: i32,
    pub order_id: i32,
    pub assigned_to: Option<String>,
    pub updated_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub price: f64,
    pub total_cost: f64,
    pub notes: Option<String>,
    pub img_url: Option<String>,
    /// Coarse production marker; flips to "scheduled" once the detail has
    /// calendar assignments.
    pub process_stage: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub stages: Vec<OrderStage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderStage {
    pub id: i32,
    pub order_detail_id: Option<i32>,
    pub stage_name: String,
    pub status: String,
    pub planned_start_date: Option<NaiveDate>,
    pub planned_finish_date: Option<NaiveDate>,
    pub actual_start_date: Option<NaiveDate>,
    pub actual_finish_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderStageAssignment {
    pub id: i32,
    pub order_stage_id: i32,
    /// Denormalized from the stage so a card can reach its detail even when
    /// the stage row is missing from a partial fetch.
    pub order_detail_id: Option<i32>,
    pub employee_name: String,
    pub work_date: NaiveDate,
    pub note: Option<String>,
    pub is_done: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub employee_rate: Option<f64>,
    /// Shared by every row created from one multi-day scheduling request.
    pub multi_day_group_id: Option<Uuid>,
}

/// Assignment without identity, as produced by expanding a scheduling
/// request and consumed by the batch insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAssignment {
    pub order_stage_id: i32,
    pub order_detail_id: Option<i32>,
    pub employee_name: String,
    pub work_date: NaiveDate,
    pub note: Option<String>,
    pub is_done: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub employee_rate: Option<f64>,
    pub multi_day_group_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i32,
    pub name: String,
    pub role: String,
}

/// Slice of an order carried along each calendar row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub id: i32,
    pub code: String,
    pub customer_name: String,
    pub order_status: String,
}

/// Slice of an order detail carried along each calendar row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailSummary {
    pub detail_id: i32,
    pub order_id: i32,
    pub assigned_to: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub price: f64,
    pub total_cost: f64,
    pub notes: Option<String>,
    pub process_stage: Option<String>,
}

/// One row of the joined calendar fetch: the assignment plus whatever part
/// of its stage/detail/order chain the join could resolve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarRow {
    pub assignment: OrderStageAssignment,
    pub stage: Option<OrderStage>,
    pub detail: Option<DetailSummary>,
    pub order: Option<OrderSummary>,
}
