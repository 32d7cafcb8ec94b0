//! Assembles the weekly board: one column per day, cards grouped per stage
//! and date, connectors for multi-day runs, and the filter panel inputs.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use shared::dto::OrderStageAssignment;
use uuid::Uuid;

use crate::connector::{connector_segments, ConnectorSegment};
use crate::filter::{unique_statuses, AssignmentFilters};
use crate::normalize::{CalendarIndex, NormalizedCalendar};
use crate::week::{is_current_day, Week};

#[derive(Debug, Serialize)]
pub struct WeekView {
    pub range_label: String,
    pub days: Vec<DayColumn>,
    pub connectors: Vec<ConnectorSegment>,
    /// Distinct stage statuses across the whole snapshot, not just the
    /// filtered slice, so the dropdown keeps offering every choice.
    pub status_options: Vec<String>,
    pub filters_active: bool,
}

#[derive(Debug, Serialize)]
pub struct DayColumn {
    pub date: NaiveDate,
    pub weekday: String,
    pub day_of_month: u32,
    pub is_today: bool,
    pub cards: Vec<AssignmentCard>,
}

/// One card on the board. Assignments sharing a stage and a date collapse
/// into a single card listing every assigned employee.
#[derive(Debug, Serialize)]
pub struct AssignmentCard {
    pub assignment_ids: Vec<i32>,
    pub order_stage_id: i32,
    pub work_date: NaiveDate,
    pub employee_names: Vec<String>,
    pub order_code: Option<String>,
    pub customer_name: Option<String>,
    pub stage_name: Option<String>,
    pub status: Option<String>,
    pub color: String,
    pub note: Option<String>,
    pub is_done: bool,
    pub multi_day_group_id: Option<Uuid>,
}

/// Color token for a stage status. Matching ignores case; anything
/// unrecognized, including a missing stage, falls back to gray.
pub fn status_color(status: Option<&str>) -> &'static str {
    let lowered = status.map(str::to_lowercase);
    match lowered.as_deref() {
        Some("completed") => "blue",
        Some("in progress") | Some("in_progress") => "green",
        Some("pending") => "amber",
        Some("delayed") => "red",
        _ => "gray",
    }
}

/// Groups assignments by (stage, date) preserving first-seen order, so two
/// employees on the same stage and day share one card.
pub fn group_by_stage_and_date<'a>(
    assignments: &[&'a OrderStageAssignment],
) -> Vec<Vec<&'a OrderStageAssignment>> {
    let mut key_order: Vec<(i32, NaiveDate)> = Vec::new();
    let mut grouped: HashMap<(i32, NaiveDate), Vec<&'a OrderStageAssignment>> = HashMap::new();
    for assignment in assignments {
        let key = (assignment.order_stage_id, assignment.work_date);
        grouped
            .entry(key)
            .or_insert_with(|| {
                key_order.push(key);
                Vec::new()
            })
            .push(assignment);
    }
    key_order
        .into_iter()
        .filter_map(|key| grouped.remove(&key))
        .collect()
}

/// Builds the full board for one week from a normalized snapshot. Cards and
/// connectors both come from the filtered assignment set.
pub fn assemble(
    week: &Week,
    data: &NormalizedCalendar,
    filters: &AssignmentFilters,
    today: NaiveDate,
) -> WeekView {
    let index = CalendarIndex::new(data);
    let visible = filters.apply(
        &data.assignments,
        |a| index.order_for(a),
        |a| index.stage_for(a),
    );

    let days = week
        .days()
        .iter()
        .map(|&date| {
            let on_day: Vec<&OrderStageAssignment> = visible
                .iter()
                .copied()
                .filter(|a| a.work_date == date)
                .collect();
            let cards = group_by_stage_and_date(&on_day)
                .iter()
                .filter_map(|group| card_from_group(group, &index))
                .collect();
            DayColumn {
                date,
                weekday: date.format("%a").to_string(),
                day_of_month: date.day(),
                is_today: is_current_day(date, today),
                cards,
            }
        })
        .collect();

    WeekView {
        range_label: week.range_label(),
        days,
        connectors: connector_segments(&visible, &week.days()),
        status_options: unique_statuses(&data.stages),
        filters_active: filters.is_any_active(),
    }
}

fn card_from_group(
    group: &[&OrderStageAssignment],
    index: &CalendarIndex,
) -> Option<AssignmentCard> {
    let lead = *group.first()?;
    let stage = index.stage_for(lead);
    let order = index.order_for(lead);
    Some(AssignmentCard {
        assignment_ids: group.iter().map(|a| a.id).collect(),
        order_stage_id: lead.order_stage_id,
        work_date: lead.work_date,
        employee_names: group.iter().map(|a| a.employee_name.clone()).collect(),
        order_code: order.map(|o| o.code.clone()),
        customer_name: order.map(|o| o.customer_name.clone()),
        stage_name: stage.map(|s| s.stage_name.clone()),
        status: stage.map(|s| s.status.clone()),
        color: status_color(stage.map(|s| s.status.as_str())).to_string(),
        note: lead.note.clone(),
        is_done: lead.is_done,
        multi_day_group_id: lead.multi_day_group_id,
    })
}
