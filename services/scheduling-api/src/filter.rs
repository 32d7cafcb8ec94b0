//! Assignment filtering: AND across the three categories, OR within one.

use std::collections::HashSet;

use serde::Deserialize;
use shared::dto::{Order, OrderStage, OrderStageAssignment};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AssignmentFilters {
    pub order_id: Option<i32>,
    #[serde(default)]
    pub employee_names: Vec<String>,
    #[serde(default)]
    pub statuses: Vec<String>,
}

impl AssignmentFilters {
    pub fn is_any_active(&self) -> bool {
        self.order_id.is_some() || !self.employee_names.is_empty() || !self.statuses.is_empty()
    }

    pub fn reset(&mut self) {
        *self = AssignmentFilters::default();
    }

    /// Keeps the assignments that pass every active category. An assignment
    /// whose order or stage cannot be resolved fails the corresponding
    /// category rather than slipping through. Status values match exactly,
    /// including case.
    pub fn apply<'a, O, S>(
        &self,
        assignments: &'a [OrderStageAssignment],
        resolve_order: O,
        resolve_stage: S,
    ) -> Vec<&'a OrderStageAssignment>
    where
        O: Fn(&OrderStageAssignment) -> Option<&'a Order>,
        S: Fn(&OrderStageAssignment) -> Option<&'a OrderStage>,
    {
        let mut kept = Vec::new();
        for assignment in assignments {
            if let Some(order_id) = self.order_id {
                match resolve_order(assignment) {
                    Some(order) if order.id == order_id => {}
                    _ => continue,
                }
            }
            if !self.employee_names.is_empty()
                && !self.employee_names.contains(&assignment.employee_name)
            {
                continue;
            }
            if !self.statuses.is_empty() {
                match resolve_stage(assignment) {
                    Some(stage)
                        if !stage.status.is_empty() && self.statuses.contains(&stage.status) => {}
                    _ => continue,
                }
            }
            kept.push(assignment);
        }
        kept
    }
}

/// Distinct stage statuses in first-seen order, for the filter dropdown.
/// Empty statuses are skipped.
pub fn unique_statuses(stages: &[OrderStage]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for stage in stages {
        if stage.status.is_empty() {
            continue;
        }
        if seen.insert(stage.status.clone()) {
            out.push(stage.status.clone());
        }
    }
    out
}
