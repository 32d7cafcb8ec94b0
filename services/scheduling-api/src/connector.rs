//! Derives the connector segments drawn between days of one multi-day run.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;
use shared::dto::OrderStageAssignment;
use uuid::Uuid;

/// A run between two occupied day columns of the visible week, identified
/// by the multi-day group it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectorSegment {
    pub group_id: Uuid,
    pub order_stage_id: i32,
    pub from_day: usize,
    pub to_day: usize,
}

/// Collects assignments by multi-day group and links each consecutive pair
/// of occupied day indices. Days the group skips are bridged: Monday and
/// Wednesday with nothing on Tuesday give one 0 to 2 segment. Groups with
/// fewer than two occupied days in the visible week produce nothing, and
/// ungrouped assignments never do.
pub fn connector_segments(
    assignments: &[&OrderStageAssignment],
    week_days: &[NaiveDate],
) -> Vec<ConnectorSegment> {
    let mut group_order: Vec<Uuid> = Vec::new();
    let mut groups: HashMap<Uuid, Vec<&OrderStageAssignment>> = HashMap::new();
    for assignment in assignments {
        let Some(group_id) = assignment.multi_day_group_id else {
            continue;
        };
        groups
            .entry(group_id)
            .or_insert_with(|| {
                group_order.push(group_id);
                Vec::new()
            })
            .push(assignment);
    }

    let mut segments = Vec::new();
    for group_id in group_order {
        let members = &groups[&group_id];
        let Some(first) = members.iter().min_by_key(|a| a.work_date) else {
            continue;
        };
        let occupied: Vec<usize> = week_days
            .iter()
            .enumerate()
            .filter(|(_, day)| members.iter().any(|a| a.work_date == **day))
            .map(|(index, _)| index)
            .collect();
        for pair in occupied.windows(2) {
            segments.push(ConnectorSegment {
                group_id,
                order_stage_id: first.order_stage_id,
                from_day: pair[0],
                to_day: pair[1],
            });
        }
    }
    segments
}
