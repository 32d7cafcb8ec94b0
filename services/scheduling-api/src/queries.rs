//! Database operations: the joined calendar fetch, assignment CRUD with its
//! detail side effect, and the order/stage lookups behind the form.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, DbErr,
    EntityTrait, FromQueryResult, QueryFilter, QueryOrder, Set, Statement, TransactionTrait,
};
use shared::dto::{
    CalendarRow, DetailSummary, NewAssignment, Order, OrderDetail, OrderStage,
    OrderStageAssignment, OrderSummary,
};
use shared::error::{AppError, Result};

use crate::form::AssignmentPatch;
use crate::model::{activity, order, order_detail, order_stage, order_stage_assignment};

fn db_err(e: impl std::fmt::Display) -> AppError {
    AppError::Database(e.to_string())
}

/* ---------------- Calendar fetch ---------------- */

const CALENDAR_SQL: &str = r#"
    SELECT a.id, a.order_stage_id, a.order_detail_id, a.employee_name, a.work_date,
           a.note, a.is_done, a.created_at, a.employee_rate, a.multi_day_group_id,
           s.id AS stage_id, s.order_detail_id AS stage_detail_id, s.stage_name,
           s.status AS stage_status, s.planned_start_date, s.planned_finish_date,
           s.actual_start_date, s.actual_finish_date, s.notes AS stage_notes,
           s.created_at AS stage_created_at, s.updated_at AS stage_updated_at,
           d.detail_id, d.order_id AS detail_order_id, d.assigned_to, d.due_date,
           d.price, d.total_cost, d.notes AS detail_notes, d.process_stage,
           o.id AS order_id, o.code AS order_code, o.customer_name, o.order_status
    FROM order_stage_assignments a
    LEFT JOIN order_stages s ON s.id = a.order_stage_id
    LEFT JOIN order_details d ON d.detail_id = s.order_detail_id
    LEFT JOIN orders o ON o.id = d.order_id
    WHERE a.work_date >= $1 AND a.work_date <= $2
    ORDER BY a.work_date, a.id
"#;

#[derive(Debug, FromQueryResult)]
struct FlatCalendarRow {
    id: i32,
    order_stage_id: i32,
    order_detail_id: Option<i32>,
    employee_name: String,
    work_date: NaiveDate,
    note: Option<String>,
    is_done: bool,
    created_at: Option<chrono::DateTime<Utc>>,
    employee_rate: Option<f64>,
    multi_day_group_id: Option<uuid::Uuid>,
    stage_id: Option<i32>,
    stage_detail_id: Option<i32>,
    stage_name: Option<String>,
    stage_status: Option<String>,
    planned_start_date: Option<NaiveDate>,
    planned_finish_date: Option<NaiveDate>,
    actual_start_date: Option<NaiveDate>,
    actual_finish_date: Option<NaiveDate>,
    stage_notes: Option<String>,
    stage_created_at: Option<chrono::DateTime<Utc>>,
    stage_updated_at: Option<chrono::DateTime<Utc>>,
    detail_id: Option<i32>,
    detail_order_id: Option<i32>,
    assigned_to: Option<String>,
    due_date: Option<NaiveDate>,
    price: Option<f64>,
    total_cost: Option<f64>,
    detail_notes: Option<String>,
    process_stage: Option<String>,
    order_id: Option<i32>,
    order_code: Option<String>,
    customer_name: Option<String>,
    order_status: Option<String>,
}

fn flat_to_row(flat: FlatCalendarRow) -> CalendarRow {
    let assignment = OrderStageAssignment {
        id: flat.id,
        order_stage_id: flat.order_stage_id,
        order_detail_id: flat.order_detail_id,
        employee_name: flat.employee_name,
        work_date: flat.work_date,
        note: flat.note,
        is_done: flat.is_done,
        created_at: flat.created_at,
        employee_rate: flat.employee_rate,
        multi_day_group_id: flat.multi_day_group_id,
    };
    let stage = flat.stage_id.map(|id| OrderStage {
        id,
        order_detail_id: flat.stage_detail_id,
        stage_name: flat.stage_name.unwrap_or_default(),
        status: flat.stage_status.unwrap_or_default(),
        planned_start_date: flat.planned_start_date,
        planned_finish_date: flat.planned_finish_date,
        actual_start_date: flat.actual_start_date,
        actual_finish_date: flat.actual_finish_date,
        notes: flat.stage_notes,
        created_at: flat.stage_created_at,
        updated_at: flat.stage_updated_at,
    });
    let detail = flat.detail_id.map(|detail_id| DetailSummary {
        detail_id,
        order_id: flat.detail_order_id.unwrap_or_default(),
        assigned_to: flat.assigned_to,
        due_date: flat.due_date,
        price: flat.price.unwrap_or_default(),
        total_cost: flat.total_cost.unwrap_or_default(),
        notes: flat.detail_notes,
        process_stage: flat.process_stage,
    });
    let order = flat.order_id.map(|id| OrderSummary {
        id,
        code: flat.order_code.unwrap_or_default(),
        customer_name: flat.customer_name.unwrap_or_default(),
        order_status: flat.order_status.unwrap_or_default(),
    });
    CalendarRow {
        assignment,
        stage,
        detail,
        order,
    }
}

/// Assignments in the date range (inclusive), each joined with as much of
/// its stage/detail/order chain as exists.
pub async fn calendar_rows(
    db: &DatabaseConnection,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<CalendarRow>> {
    let rows = FlatCalendarRow::find_by_statement(Statement::from_sql_and_values(
        DbBackend::Postgres,
        CALENDAR_SQL,
        [from.into(), to.into()],
    ))
    .all(db)
    .await
    .map_err(db_err)?;
    Ok(rows.into_iter().map(flat_to_row).collect())
}

/* ---------------- Assignment CRUD ---------------- */

/// Flags a detail as having calendar work booked against it. A dangling
/// detail id is skipped rather than failing the surrounding write.
async fn mark_detail_scheduled<C: ConnectionTrait>(
    db: &C,
    detail_id: i32,
) -> std::result::Result<(), DbErr> {
    let Some(detail) = order_detail::Entity::find_by_id(detail_id).one(db).await? else {
        return Ok(());
    };
    let mut active: order_detail::ActiveModel = detail.into();
    active.process_stage = Set(Some("scheduled".into()));
    active.updated_at = Set(Some(Utc::now()));
    active.update(db).await?;
    Ok(())
}

/// Inserts every draft or none of them. The whole batch runs inside one
/// transaction; each touched detail is flagged as scheduled before commit.
pub async fn create_assignments(
    db: &DatabaseConnection,
    drafts: Vec<NewAssignment>,
) -> Result<Vec<OrderStageAssignment>> {
    db.transaction::<_, Vec<OrderStageAssignment>, DbErr>(|txn| {
        Box::pin(async move {
            let mut created = Vec::with_capacity(drafts.len());
            let mut touched_details: Vec<i32> = Vec::new();
            for draft in drafts {
                let mut row: order_stage_assignment::ActiveModel = Default::default();
                row.order_stage_id = Set(draft.order_stage_id);
                row.order_detail_id = Set(draft.order_detail_id);
                row.employee_name = Set(draft.employee_name);
                row.work_date = Set(draft.work_date);
                row.note = Set(draft.note);
                row.is_done = Set(draft.is_done);
                row.created_at = Set(draft.created_at);
                row.employee_rate = Set(draft.employee_rate);
                row.multi_day_group_id = Set(draft.multi_day_group_id);
                let inserted = row.insert(txn).await?;
                if let Some(detail_id) = inserted.order_detail_id {
                    if !touched_details.contains(&detail_id) {
                        touched_details.push(detail_id);
                    }
                }
                created.push(inserted.into());
            }
            for detail_id in touched_details {
                mark_detail_scheduled(txn, detail_id).await?;
            }
            Ok(created)
        })
    })
    .await
    .map_err(db_err)
}

/// Applies a sparse patch. Untouched fields keep their stored values; an
/// empty patch just returns the current row. The detail linked to the
/// updated assignment is re-flagged as scheduled.
pub async fn update_assignment(
    db: &DatabaseConnection,
    id: i32,
    patch: AssignmentPatch,
) -> Result<OrderStageAssignment> {
    let Some(existing) = order_stage_assignment::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(db_err)?
    else {
        return Err(AppError::NotFound(format!("assignment {id}")));
    };
    if patch.is_empty() {
        return Ok(existing.into());
    }

    let mut active: order_stage_assignment::ActiveModel = existing.into();
    if let Some(v) = patch.order_stage_id {
        active.order_stage_id = Set(v);
    }
    if let Some(v) = patch.order_detail_id {
        active.order_detail_id = Set(Some(v));
    }
    if let Some(v) = patch.employee_name {
        active.employee_name = Set(v);
    }
    if let Some(v) = patch.work_date {
        active.work_date = Set(v);
    }
    if let Some(v) = patch.note {
        active.note = Set(v);
    }
    if let Some(v) = patch.is_done {
        active.is_done = Set(v);
    }
    if let Some(v) = patch.employee_rate {
        active.employee_rate = Set(v);
    }
    let updated = active.update(db).await.map_err(db_err)?;

    if let Some(detail_id) = updated.order_detail_id {
        mark_detail_scheduled(db, detail_id).await.map_err(db_err)?;
    }
    Ok(updated.into())
}

pub async fn delete_assignment(db: &DatabaseConnection, id: i32) -> Result<()> {
    let Some(existing) = order_stage_assignment::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(db_err)?
    else {
        return Err(AppError::NotFound(format!("assignment {id}")));
    };
    let active: order_stage_assignment::ActiveModel = existing.into();
    active.delete(db).await.map_err(db_err)?;
    Ok(())
}

/* ---------------- Orders and stages ---------------- */

fn stitch_orders(
    orders: Vec<order::Model>,
    details: Vec<order_detail::Model>,
    stages: Vec<order_stage::Model>,
) -> Vec<Order> {
    let mut stages_by_detail: HashMap<i32, Vec<OrderStage>> = HashMap::new();
    for stage in stages {
        if let Some(detail_id) = stage.order_detail_id {
            stages_by_detail
                .entry(detail_id)
                .or_default()
                .push(stage.into());
        }
    }
    let mut details_by_order: HashMap<i32, Vec<OrderDetail>> = HashMap::new();
    for detail in details {
        let mut dto: OrderDetail = detail.into();
        dto.stages = stages_by_detail.remove(&dto.detail_id).unwrap_or_default();
        details_by_order.entry(dto.order_id).or_default().push(dto);
    }
    orders
        .into_iter()
        .map(|order| {
            let mut dto: Order = order.into();
            dto.order_details = details_by_order.remove(&dto.id).unwrap_or_default();
            dto
        })
        .collect()
}

const WORKING_ORDERS_SQL: &str = r#"
    SELECT * FROM orders
    WHERE LOWER(order_status) = 'working'
    ORDER BY created_at DESC
"#;

/// Active orders (status "working", any casing), newest first, each with
/// its details and their stages nested in.
pub async fn orders_with_stages(db: &DatabaseConnection) -> Result<Vec<Order>> {
    let orders = order::Entity::find()
        .from_raw_sql(Statement::from_string(
            DbBackend::Postgres,
            WORKING_ORDERS_SQL.to_string(),
        ))
        .all(db)
        .await
        .map_err(db_err)?;
    if orders.is_empty() {
        return Ok(Vec::new());
    }
    let order_ids: Vec<i32> = orders.iter().map(|o| o.id).collect();
    let details = order_detail::Entity::find()
        .filter(order_detail::Column::OrderId.is_in(order_ids))
        .all(db)
        .await
        .map_err(db_err)?;
    let detail_ids: Vec<i32> = details.iter().map(|d| d.detail_id).collect();
    let stages = if detail_ids.is_empty() {
        Vec::new()
    } else {
        order_stage::Entity::find()
            .filter(order_stage::Column::OrderDetailId.is_in(detail_ids))
            .order_by_asc(order_stage::Column::CreatedAt)
            .all(db)
            .await
            .map_err(db_err)?
    };
    Ok(stitch_orders(orders, details, stages))
}

/// One order regardless of status, with details and stages nested in.
pub async fn order_with_stages(db: &DatabaseConnection, id: i32) -> Result<Order> {
    let Some(order) = order::Entity::find_by_id(id).one(db).await.map_err(db_err)? else {
        return Err(AppError::NotFound(format!("order {id}")));
    };
    let details = order_detail::Entity::find()
        .filter(order_detail::Column::OrderId.eq(id))
        .all(db)
        .await
        .map_err(db_err)?;
    let detail_ids: Vec<i32> = details.iter().map(|d| d.detail_id).collect();
    let stages = if detail_ids.is_empty() {
        Vec::new()
    } else {
        order_stage::Entity::find()
            .filter(order_stage::Column::OrderDetailId.is_in(detail_ids))
            .order_by_asc(order_stage::Column::CreatedAt)
            .all(db)
            .await
            .map_err(db_err)?
    };
    stitch_orders(vec![order], details, stages)
        .pop()
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))
}

pub async fn order_details(db: &DatabaseConnection, order_id: i32) -> Result<Vec<OrderDetail>> {
    let details = order_detail::Entity::find()
        .filter(order_detail::Column::OrderId.eq(order_id))
        .all(db)
        .await
        .map_err(db_err)?;
    Ok(details.into_iter().map(Into::into).collect())
}

/// Stages of one detail, oldest first, matching production order.
pub async fn stages_for_detail(db: &DatabaseConnection, detail_id: i32) -> Result<Vec<OrderStage>> {
    let stages = order_stage::Entity::find()
        .filter(order_stage::Column::OrderDetailId.eq(detail_id))
        .order_by_asc(order_stage::Column::CreatedAt)
        .all(db)
        .await
        .map_err(db_err)?;
    Ok(stages.into_iter().map(Into::into).collect())
}

pub async fn stage_by_id(db: &DatabaseConnection, id: i32) -> Result<Option<OrderStage>> {
    let stage = order_stage::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(db_err)?;
    Ok(stage.map(Into::into))
}

/* ---------------- Activity log ---------------- */

pub async fn log_activity(
    db: &DatabaseConnection,
    action: &str,
    detail: serde_json::Value,
) -> Result<()> {
    let mut entry: activity::ActiveModel = Default::default();
    entry.action = Set(action.to_string());
    entry.detail = Set(Some(detail));
    entry.logged_at = Set(Utc::now());
    entry.insert(db).await.map_err(db_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model;
    use sea_orm::{MockDatabase, MockExecResult};
    use uuid::Uuid;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn assignment_model(id: i32, employee: &str, day: u32) -> model::AssignmentModel {
        model::AssignmentModel {
            id,
            order_stage_id: 10,
            order_detail_id: Some(100),
            employee_name: employee.into(),
            work_date: date(day),
            note: None,
            is_done: false,
            created_at: None,
            employee_rate: None,
            multi_day_group_id: None,
        }
    }

    fn detail_model(detail_id: i32, process_stage: Option<&str>) -> model::OrderDetailModel {
        model::OrderDetailModel {
            detail_id,
            order_id: 1,
            assigned_to: None,
            updated_date: None,
            due_date: None,
            price: 0.0,
            total_cost: 0.0,
            notes: None,
            img_url: None,
            process_stage: process_stage.map(Into::into),
            updated_at: None,
        }
    }

    fn flat(id: i32) -> FlatCalendarRow {
        FlatCalendarRow {
            id,
            order_stage_id: 10,
            order_detail_id: None,
            employee_name: "Ahmed Mohamed".into(),
            work_date: date(6),
            note: None,
            is_done: false,
            created_at: None,
            employee_rate: None,
            multi_day_group_id: None,
            stage_id: None,
            stage_detail_id: None,
            stage_name: None,
            stage_status: None,
            planned_start_date: None,
            planned_finish_date: None,
            actual_start_date: None,
            actual_finish_date: None,
            stage_notes: None,
            stage_created_at: None,
            stage_updated_at: None,
            detail_id: None,
            detail_order_id: None,
            assigned_to: None,
            due_date: None,
            price: None,
            total_cost: None,
            detail_notes: None,
            process_stage: None,
            order_id: None,
            order_code: None,
            customer_name: None,
            order_status: None,
        }
    }

    #[test]
    fn fully_joined_flat_row_yields_all_four_parts() {
        let mut row = flat(1);
        row.stage_id = Some(10);
        row.stage_detail_id = Some(100);
        row.stage_name = Some("Cutting".into());
        row.stage_status = Some("pending".into());
        row.detail_id = Some(100);
        row.detail_order_id = Some(1);
        row.price = Some(2500.0);
        row.order_id = Some(1);
        row.order_code = Some("ALM-1001".into());
        row.customer_name = Some("Cairo Hospital".into());
        row.order_status = Some("working".into());

        let mapped = flat_to_row(row);
        assert_eq!(mapped.assignment.id, 1);
        assert_eq!(mapped.stage.as_ref().map(|s| s.id), Some(10));
        assert_eq!(mapped.detail.as_ref().map(|d| d.price), Some(2500.0));
        assert_eq!(
            mapped.order.as_ref().map(|o| o.code.as_str()),
            Some("ALM-1001")
        );
    }

    #[test]
    fn unmatched_joins_leave_the_optional_parts_empty() {
        let mapped = flat_to_row(flat(2));
        assert!(mapped.stage.is_none());
        assert!(mapped.detail.is_none());
        assert!(mapped.order.is_none());
        assert_eq!(mapped.assignment.order_stage_id, 10);
    }

    #[test]
    fn stitching_nests_stages_under_details_under_orders() {
        let orders = vec![
            model::OrderModel {
                id: 1,
                code: "ALM-1001".into(),
                customer_id: None,
                customer_name: "Cairo Hospital".into(),
                address: "Nasr City".into(),
                order_status: "working".into(),
                order_price: 120_000.0,
                work_types: serde_json::json!(["Beds"]),
                created_by: None,
                company: None,
                sales_person: None,
                created_at: None,
                updated_at: None,
            },
            model::OrderModel {
                id: 2,
                code: "ALM-1002".into(),
                customer_id: None,
                customer_name: "Alexandria Library".into(),
                address: String::new(),
                order_status: "working".into(),
                order_price: 0.0,
                work_types: serde_json::json!([]),
                created_by: None,
                company: None,
                sales_person: None,
                created_at: None,
                updated_at: None,
            },
        ];
        let details = vec![model::OrderDetailModel {
            detail_id: 100,
            order_id: 1,
            assigned_to: None,
            updated_date: None,
            due_date: None,
            price: 0.0,
            total_cost: 0.0,
            notes: None,
            img_url: None,
            process_stage: None,
            updated_at: None,
        }];
        let stages = vec![
            model::OrderStageModel {
                id: 10,
                order_detail_id: Some(100),
                stage_name: "Cutting".into(),
                status: "pending".into(),
                planned_start_date: None,
                planned_finish_date: None,
                actual_start_date: None,
                actual_finish_date: None,
                notes: None,
                created_at: None,
                updated_at: None,
            },
            model::OrderStageModel {
                id: 11,
                order_detail_id: None,
                stage_name: "Orphan".into(),
                status: "pending".into(),
                planned_start_date: None,
                planned_finish_date: None,
                actual_start_date: None,
                actual_finish_date: None,
                notes: None,
                created_at: None,
                updated_at: None,
            },
        ];

        let stitched = stitch_orders(orders, details, stages);
        assert_eq!(stitched.len(), 2);
        assert_eq!(stitched[0].work_types, vec!["Beds".to_string()]);
        assert_eq!(stitched[0].order_details.len(), 1);
        assert_eq!(stitched[0].order_details[0].stages.len(), 1);
        assert_eq!(stitched[0].order_details[0].stages[0].stage_name, "Cutting");
        assert!(stitched[1].order_details.is_empty());
    }

    #[tokio::test]
    async fn batch_create_inserts_every_draft_and_flags_the_detail_once() {
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_exec_results([
                MockExecResult { last_insert_id: 1, rows_affected: 1 },
                MockExecResult { last_insert_id: 2, rows_affected: 1 },
                MockExecResult { last_insert_id: 0, rows_affected: 1 },
            ])
            .append_query_results([[assignment_model(1, "Ahmed Mohamed", 6)]])
            .append_query_results([[assignment_model(2, "Sara Ibrahim", 6)]])
            .append_query_results([[detail_model(100, None)]])
            .append_query_results([[detail_model(100, Some("scheduled"))]])
            .into_connection();

        let drafts = vec![
            NewAssignment {
                order_stage_id: 10,
                order_detail_id: Some(100),
                employee_name: "Ahmed Mohamed".into(),
                work_date: date(6),
                note: None,
                is_done: false,
                created_at: None,
                employee_rate: None,
                multi_day_group_id: None,
            },
            NewAssignment {
                order_stage_id: 10,
                order_detail_id: Some(100),
                employee_name: "Sara Ibrahim".into(),
                work_date: date(6),
                note: None,
                is_done: false,
                created_at: None,
                employee_rate: None,
                multi_day_group_id: None,
            },
        ];
        let created = create_assignments(&db, drafts).await.unwrap();
        assert_eq!(created.len(), 2);
        assert_eq!(created[0].id, 1);
        assert_eq!(created[1].employee_name, "Sara Ibrahim");
    }

    #[tokio::test]
    async fn sparse_update_returns_the_stored_row_and_reflags_its_detail() {
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_query_results([[assignment_model(7, "Ahmed Mohamed", 6)]])
            .append_exec_results([MockExecResult { last_insert_id: 0, rows_affected: 1 }])
            .append_query_results([[assignment_model(7, "Nour Ali", 6)]])
            .append_query_results([[detail_model(100, None)]])
            .append_exec_results([MockExecResult { last_insert_id: 0, rows_affected: 1 }])
            .append_query_results([[detail_model(100, Some("scheduled"))]])
            .into_connection();

        let patch = AssignmentPatch {
            employee_name: Some("Nour Ali".into()),
            ..Default::default()
        };
        let updated = update_assignment(&db, 7, patch).await.unwrap();
        assert_eq!(updated.employee_name, "Nour Ali");
        assert_eq!(updated.work_date, date(6));
    }

    #[tokio::test]
    async fn empty_patch_fetches_without_writing() {
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_query_results([[assignment_model(7, "Ahmed Mohamed", 6)]])
            .into_connection();

        let updated = update_assignment(&db, 7, AssignmentPatch::default())
            .await
            .unwrap();
        assert_eq!(updated.id, 7);
        assert_eq!(updated.employee_name, "Ahmed Mohamed");
    }

    #[tokio::test]
    async fn updating_a_missing_assignment_is_not_found() {
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_query_results([Vec::<model::AssignmentModel>::new()])
            .into_connection();

        let err = update_assignment(&db, 404, AssignmentPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(err.to_string(), "assignment 404 not found");
    }

    #[tokio::test]
    async fn delete_removes_an_existing_assignment() {
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_query_results([[assignment_model(3, "Omar Khaled", 8)]])
            .append_exec_results([MockExecResult { last_insert_id: 0, rows_affected: 1 }])
            .into_connection();

        assert!(delete_assignment(&db, 3).await.is_ok());

        let empty = MockDatabase::new(DbBackend::Postgres)
            .append_query_results([Vec::<model::AssignmentModel>::new()])
            .into_connection();
        let err = delete_assignment(&empty, 3).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn no_working_orders_short_circuits_to_an_empty_list() {
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_query_results([Vec::<model::OrderModel>::new()])
            .into_connection();
        let orders = orders_with_stages(&db).await.unwrap();
        assert!(orders.is_empty());
    }

    #[tokio::test]
    async fn activity_entries_record_the_action() {
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_exec_results([MockExecResult { last_insert_id: 1, rows_affected: 1 }])
            .append_query_results([[model::ActivityModel {
                id: 1,
                action: "assignment.created".into(),
                detail: Some(serde_json::json!({"count": 2, "group": Uuid::nil()})),
                logged_at: Utc::now(),
            }]])
            .into_connection();

        log_activity(&db, "assignment.created", serde_json::json!({"count": 2}))
            .await
            .unwrap();
    }
}
