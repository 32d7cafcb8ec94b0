//! SeaORM entity definitions for orders, details, stages, assignments and
//! the activity log.

use sea_orm::entity::prelude::*;

/* ---------- ORDERS ---------- */

pub mod order {
    use super::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "orders")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub code: String,
        pub customer_id: Option<i32>,
        pub customer_name: String,
        pub address: String,
        pub order_status: String,
        pub order_price: f64,
        /// JSON array of work type labels, e.g. `["Kitchen", "Wardrobe"]`.
        pub work_types: Json,
        pub created_by: Option<String>,
        pub company: Option<String>,
        pub sales_person: Option<String>,
        pub created_at: Option<DateTimeUtc>,
        pub updated_at: Option<DateTimeUtc>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/* ---------- ORDER DETAILS ---------- */

pub mod order_detail {
    use super::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "order_details")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub detail_id: i32,
        pub order_id: i32,
        pub assigned_to: Option<String>,
        pub updated_date: Option<Date>,
        pub due_date: Option<Date>,
        pub price: f64,
        pub total_cost: f64,
        pub notes: Option<String>,
        pub img_url: Option<String>,
        pub process_stage: Option<String>,
        pub updated_at: Option<DateTimeUtc>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/* ---------- ORDER STAGES ---------- */

pub mod order_stage {
    use super::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "order_stages")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub order_detail_id: Option<i32>,
        pub stage_name: String,
        pub status: String,
        pub planned_start_date: Option<Date>,
        pub planned_finish_date: Option<Date>,
        pub actual_start_date: Option<Date>,
        pub actual_finish_date: Option<Date>,
        pub notes: Option<String>,
        pub created_at: Option<DateTimeUtc>,
        pub updated_at: Option<DateTimeUtc>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/* ---------- STAGE ASSIGNMENTS ---------- */

pub mod order_stage_assignment {
    use super::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "order_stage_assignments")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub order_stage_id: i32,
        pub order_detail_id: Option<i32>,
        pub employee_name: String,
        pub work_date: Date,
        pub note: Option<String>,
        pub is_done: bool,
        pub created_at: Option<DateTimeUtc>,
        pub employee_rate: Option<f64>,
        /// One UUID per multi-day scheduling request; rows sharing it render
        /// as a connected run on the calendar.
        pub multi_day_group_id: Option<Uuid>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/* ---------- ACTIVITY LOG ---------- */

pub mod activity {
    use super::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "activity_log")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub action: String,
        pub detail: Option<Json>,
        pub logged_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/* ---------- Re-exports ---------- */

pub use activity::{
    ActiveModel as ActivityActiveModel, Entity as ActivityEntity, Model as ActivityModel,
};
pub use order::{ActiveModel as OrderActiveModel, Entity as OrderEntity, Model as OrderModel};
pub use order_detail::{
    ActiveModel as OrderDetailActiveModel, Entity as OrderDetailEntity, Model as OrderDetailModel,
};
pub use order_stage::{
    ActiveModel as OrderStageActiveModel, Entity as OrderStageEntity, Model as OrderStageModel,
};
pub use order_stage_assignment::{
    ActiveModel as AssignmentActiveModel, Entity as AssignmentEntity, Model as AssignmentModel,
};

/* ---------- DTO conversions ---------- */

use shared::dto;

impl From<order::Model> for dto::Order {
    fn from(m: order::Model) -> Self {
        dto::Order {
            id: m.id,
            code: m.code,
            customer_id: m.customer_id,
            customer_name: m.customer_name,
            address: m.address,
            order_status: m.order_status,
            order_price: m.order_price,
            work_types: serde_json::from_value(m.work_types).unwrap_or_default(),
            created_by: m.created_by,
            company: m.company,
            sales_person: m.sales_person,
            created_at: m.created_at,
            updated_at: m.updated_at,
            order_details: Vec::new(),
        }
    }
}

impl From<order_detail::Model> for dto::OrderDetail {
    fn from(m: order_detail::Model) -> Self {
        dto::OrderDetail {
            detail_id: m.detail_id,
            order_id: m.order_id,
            assigned_to: m.assigned_to,
            updated_date: m.updated_date,
            due_date: m.due_date,
            price: m.price,
            total_cost: m.total_cost,
            notes: m.notes,
            img_url: m.img_url,
            process_stage: m.process_stage,
            updated_at: m.updated_at,
            stages: Vec::new(),
        }
    }
}

impl From<order_stage::Model> for dto::OrderStage {
    fn from(m: order_stage::Model) -> Self {
        dto::OrderStage {
            id: m.id,
            order_detail_id: m.order_detail_id,
            stage_name: m.stage_name,
            status: m.status,
            planned_start_date: m.planned_start_date,
            planned_finish_date: m.planned_finish_date,
            actual_start_date: m.actual_start_date,
            actual_finish_date: m.actual_finish_date,
            notes: m.notes,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<order_stage_assignment::Model> for dto::OrderStageAssignment {
    fn from(m: order_stage_assignment::Model) -> Self {
        dto::OrderStageAssignment {
            id: m.id,
            order_stage_id: m.order_stage_id,
            order_detail_id: m.order_detail_id,
            employee_name: m.employee_name,
            work_date: m.work_date,
            note: m.note,
            is_done: m.is_done,
            created_at: m.created_at,
            employee_rate: m.employee_rate,
            multi_day_group_id: m.multi_day_group_id,
        }
    }
}
