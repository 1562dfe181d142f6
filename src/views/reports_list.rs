//! Reports list view.

use crate::models::Report;

use super::tabular::{Cell, Column, Row, RowKind, TabularModel};

/// Builds the list of generated reports, one row per report in the given order.
pub fn build_reports_list(reports: &[Report]) -> TabularModel {
    let mut model = TabularModel::new("Reports");
    model.columns = ["Report ID", "Start date", "End date"]
        .into_iter()
        .map(Column::new)
        .collect();
    model.rows = reports
        .iter()
        .map(|report| {
            Row::new(
                RowKind::Data,
                vec![
                    Cell::text(report.id.to_string()),
                    Cell::Date(report.start_date),
                    Cell::Date(report.end_date),
                ],
            )
        })
        .collect();
    model
}
