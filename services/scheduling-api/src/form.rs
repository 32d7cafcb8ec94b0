//! Scheduling request validation and expansion into assignment drafts.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::dto::NewAssignment;
use uuid::Uuid;

/// One scheduling form submission: which stage of which order, who works
/// it, and over which dates. `order_id` and `order_stage_id` use 0 for
/// "nothing selected", mirroring the empty form.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleRequest {
    #[serde(default)]
    pub order_id: i32,
    #[serde(default)]
    pub order_stage_id: i32,
    #[serde(default)]
    pub employee_names: Vec<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub multi_day: bool,
    pub note: Option<String>,
}

/// Field name to message, collected across the whole request so the form
/// can mark every invalid field at once.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(pub BTreeMap<String, String>);

impl FieldErrors {
    pub fn single(field: &str, message: &str) -> Self {
        let mut errors = FieldErrors::default();
        errors.set(field, message);
        errors
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn set(&mut self, field: &str, message: &str) {
        self.0.insert(field.into(), message.into());
    }
}

/// Sparse update derived from the first draft of an edit submission. `None`
/// leaves the column untouched; the nested options write NULL explicitly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentPatch {
    pub order_stage_id: Option<i32>,
    pub order_detail_id: Option<i32>,
    pub employee_name: Option<String>,
    pub work_date: Option<NaiveDate>,
    pub note: Option<Option<String>>,
    pub is_done: Option<bool>,
    pub employee_rate: Option<Option<f64>>,
}

impl AssignmentPatch {
    pub fn is_empty(&self) -> bool {
        *self == AssignmentPatch::default()
    }
}

impl ScheduleRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        if self.order_id == 0 {
            errors.set("order", "Please select an order");
        }
        if self.order_stage_id == 0 {
            errors.set("stage", "Please select a stage");
        }
        if self.employee_names.is_empty() {
            errors.set("employees", "Please select at least one employee");
        }
        if self.start_date.is_none() {
            errors.set("start_date", "Please select a start date");
        }
        if self.multi_day {
            match (self.start_date, self.end_date) {
                (_, None) => {
                    errors.set("end_date", "Please select an end date for multi-day assignment");
                }
                (Some(start), Some(end)) if end < start => {
                    errors.set("end_date", "End date must be on or after the start date");
                }
                _ => {}
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Expands the request into one draft per day per employee. A multi-day
    /// request stamps every draft with the same fresh group id; a single-day
    /// request covers exactly the start date and carries no group id. Every
    /// draft starts not-done.
    pub fn expand(&self, order_detail_id: Option<i32>, now: DateTime<Utc>) -> Vec<NewAssignment> {
        let Some(start) = self.start_date else {
            return Vec::new();
        };
        let end = if self.multi_day {
            self.end_date.unwrap_or(start).max(start)
        } else {
            start
        };
        let group_id = if self.multi_day {
            Some(Uuid::new_v4())
        } else {
            None
        };
        let note = self
            .note
            .as_deref()
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        let mut drafts = Vec::new();
        let mut day = start;
        while day <= end {
            for employee in &self.employee_names {
                drafts.push(NewAssignment {
                    order_stage_id: self.order_stage_id,
                    order_detail_id,
                    employee_name: employee.clone(),
                    work_date: day,
                    note: note.clone(),
                    is_done: false,
                    created_at: Some(now),
                    employee_rate: None,
                    multi_day_group_id: group_id,
                });
            }
            day += Duration::days(1);
        }
        drafts
    }
}

/// Collapses an edit submission back to a single sparse update, taken from
/// the first expanded draft. Edits are single-day, so the first draft is
/// the start date paired with the first selected employee.
pub fn update_patch(drafts: &[NewAssignment]) -> Option<AssignmentPatch> {
    let first = drafts.first()?;
    Some(AssignmentPatch {
        order_stage_id: Some(first.order_stage_id),
        order_detail_id: first.order_detail_id,
        employee_name: Some(first.employee_name.clone()),
        work_date: Some(first.work_date),
        note: Some(first.note.clone()),
        is_done: Some(first.is_done),
        employee_rate: Some(first.employee_rate),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn request() -> ScheduleRequest {
        ScheduleRequest {
            order_id: 1,
            order_stage_id: 10,
            employee_names: vec!["Ahmed Mohamed".into(), "Sara Ibrahim".into()],
            start_date: Some(date(6)),
            end_date: None,
            multi_day: false,
            note: None,
        }
    }

    #[test]
    fn empty_request_reports_every_missing_field_at_once() {
        let empty = ScheduleRequest {
            order_id: 0,
            order_stage_id: 0,
            employee_names: Vec::new(),
            start_date: None,
            end_date: None,
            multi_day: false,
            note: None,
        };
        let errors = empty.validate().unwrap_err();
        let fields: Vec<&str> = errors.0.keys().map(String::as_str).collect();
        assert_eq!(fields, vec!["employees", "order", "stage", "start_date"]);
        assert_eq!(errors.0["order"], "Please select an order");
    }

    #[test]
    fn multi_day_requires_an_end_date() {
        let mut req = request();
        req.multi_day = true;
        let errors = req.validate().unwrap_err();
        assert_eq!(
            errors.0["end_date"],
            "Please select an end date for multi-day assignment"
        );
    }

    #[test]
    fn end_date_before_start_date_is_rejected() {
        let mut req = request();
        req.multi_day = true;
        req.start_date = Some(date(8));
        req.end_date = Some(date(6));
        let errors = req.validate().unwrap_err();
        assert_eq!(
            errors.0["end_date"],
            "End date must be on or after the start date"
        );
    }

    #[test]
    fn end_date_equal_to_start_date_is_allowed() {
        let mut req = request();
        req.multi_day = true;
        req.end_date = req.start_date;
        assert!(req.validate().is_ok());
    }

    #[test]
    fn single_day_request_expands_to_one_draft_per_employee() {
        let drafts = request().expand(Some(100), Utc::now());
        assert_eq!(drafts.len(), 2);
        assert!(drafts.iter().all(|d| d.work_date == date(6)));
        assert!(drafts.iter().all(|d| d.multi_day_group_id.is_none()));
        assert!(drafts.iter().all(|d| !d.is_done));
        assert!(drafts.iter().all(|d| d.order_detail_id == Some(100)));
        assert_eq!(drafts[0].employee_name, "Ahmed Mohamed");
        assert_eq!(drafts[1].employee_name, "Sara Ibrahim");
    }

    #[test]
    fn three_days_and_two_employees_yield_six_grouped_drafts() {
        let mut req = request();
        req.multi_day = true;
        req.end_date = Some(date(8));
        let drafts = req.expand(Some(100), Utc::now());
        assert_eq!(drafts.len(), 6);

        let group_ids: HashSet<_> = drafts.iter().map(|d| d.multi_day_group_id).collect();
        assert_eq!(group_ids.len(), 1);
        assert!(drafts[0].multi_day_group_id.is_some());

        let days: HashSet<_> = drafts.iter().map(|d| d.work_date).collect();
        assert_eq!(days, HashSet::from([date(6), date(7), date(8)]));
        for day in [date(6), date(7), date(8)] {
            let on_day: Vec<_> = drafts.iter().filter(|d| d.work_date == day).collect();
            assert_eq!(on_day.len(), 2);
        }
    }

    #[test]
    fn each_submission_gets_its_own_group_id() {
        let mut req = request();
        req.multi_day = true;
        req.end_date = Some(date(7));
        let first = req.expand(None, Utc::now());
        let second = req.expand(None, Utc::now());
        assert_ne!(first[0].multi_day_group_id, second[0].multi_day_group_id);
    }

    #[test]
    fn empty_note_becomes_null() {
        let mut req = request();
        req.note = Some(String::new());
        let drafts = req.expand(None, Utc::now());
        assert!(drafts[0].note.is_none());

        req.note = Some("varnish first".into());
        let drafts = req.expand(None, Utc::now());
        assert_eq!(drafts[0].note.as_deref(), Some("varnish first"));
    }

    #[test]
    fn update_patch_takes_the_first_draft() {
        let mut req = request();
        req.note = Some("recut the panel".into());
        let drafts = req.expand(Some(100), Utc::now());
        let patch = update_patch(&drafts).unwrap();
        assert_eq!(patch.order_stage_id, Some(10));
        assert_eq!(patch.employee_name.as_deref(), Some("Ahmed Mohamed"));
        assert_eq!(patch.work_date, Some(date(6)));
        assert_eq!(patch.note, Some(Some("recut the panel".into())));
        assert_eq!(patch.is_done, Some(false));
        assert_eq!(patch.employee_rate, Some(None));
        assert_eq!(patch.order_detail_id, Some(100));
    }

    #[test]
    fn update_patch_of_no_drafts_is_none() {
        assert!(update_patch(&[]).is_none());
        assert!(AssignmentPatch::default().is_empty());
    }
}
