//! Payroll register view.
//!
//! One row per employee with a column per benefit name, followed by a
//! summary row of column sums:
//!
//! | Leading (8) | Accruals… | Total accruals | Deductions… | Personal income tax | Pension fund | Total deductions | Net amount |

use rust_decimal::Decimal;

use crate::aggregation::{BenefitColumns, EmployeeTotals, aggregate_by_employee};
use crate::models::{AmountKind, Report, ReportEntry};

use super::tabular::{
    Cell, Column, Row, RowKind, TabularModel, cell_ref, sum_across, sum_down,
};

const LEADING_COLUMNS: [&str; 8] = [
    "Report ID",
    "Employee ID",
    "First name",
    "Last name",
    "Department",
    "Position",
    "Email",
    "Pensions payer",
];

/// Column positions for one register, derived from its benefit columns.
struct RegisterLayout {
    accrual_count: usize,
    deduction_count: usize,
}

impl RegisterLayout {
    fn first_accrual(&self) -> usize {
        LEADING_COLUMNS.len()
    }

    fn total_accruals(&self) -> usize {
        self.first_accrual() + self.accrual_count
    }

    fn first_deduction(&self) -> usize {
        self.total_accruals() + 1
    }

    fn income_tax(&self) -> usize {
        self.first_deduction() + self.deduction_count
    }

    fn pension_fund(&self) -> usize {
        self.income_tax() + 1
    }

    fn total_deductions(&self) -> usize {
        self.pension_fund() + 1
    }

    fn net_amount(&self) -> usize {
        self.total_deductions() + 1
    }
}

/// Builds the payroll register for one report's entries.
///
/// Benefit columns are taken from the full entry set, so every employee row
/// has the same shape. No entries yields a model with no rows.
pub fn build_payroll_register(report: &Report, entries: &[ReportEntry]) -> TabularModel {
    let benefit_columns = BenefitColumns::from_entries(entries);
    let layout = RegisterLayout {
        accrual_count: benefit_columns.accruals.len(),
        deduction_count: benefit_columns.deductions.len(),
    };

    let mut model = TabularModel::new(format!("Payroll register {}", report.period_label()));
    model.columns = register_columns(&benefit_columns);

    let totals = aggregate_by_employee(entries);
    if totals.is_empty() {
        return model;
    }

    for (index, employee_totals) in totals.values().enumerate() {
        let sheet_row = model.sheet_row(index);
        let cells = employee_cells(report, employee_totals, &benefit_columns, &layout, sheet_row);
        model.rows.push(Row::new(RowKind::Data, cells));
    }

    let summary = summary_cells(&model, &layout);
    model.rows.push(Row::new(RowKind::Summary, summary));
    model
}

fn register_columns(benefit_columns: &BenefitColumns) -> Vec<Column> {
    let mut columns: Vec<Column> = LEADING_COLUMNS.into_iter().map(Column::new).collect();
    columns.extend(benefit_columns.accruals.iter().map(Column::new));
    columns.push(Column::new("Total accruals"));
    columns.extend(benefit_columns.deductions.iter().map(Column::new));
    columns.push(Column::new(AmountKind::Tax.label()));
    columns.push(Column::new(AmountKind::PensionFund.label()));
    columns.push(Column::new("Total deductions"));
    columns.push(Column::new(AmountKind::Net.label()));
    columns
}

fn employee_cells(
    report: &Report,
    totals: &EmployeeTotals,
    benefit_columns: &BenefitColumns,
    layout: &RegisterLayout,
    sheet_row: usize,
) -> Vec<Cell> {
    let employee = &totals.employee;
    let mut cells = vec![
        Cell::text(report.id.to_string()),
        Cell::Integer(employee.id),
        Cell::text(&employee.first_name),
        Cell::text(&employee.last_name),
        Cell::text(&employee.department),
        Cell::text(&employee.position),
        Cell::text(&employee.email),
        Cell::text(if employee.is_pensions_payer { "Yes" } else { "No" }),
    ];

    cells.extend(
        benefit_columns
            .accruals
            .iter()
            .map(|name| Cell::Amount(totals.accrual_for(name))),
    );
    let total_accruals = if layout.accrual_count == 0 {
        "0".to_string()
    } else {
        sum_across(layout.first_accrual(), layout.total_accruals() - 1, sheet_row)
    };
    cells.push(Cell::formula(total_accruals, totals.total_accruals()));

    cells.extend(
        benefit_columns
            .deductions
            .iter()
            .map(|name| Cell::Amount(totals.deduction_for(name))),
    );
    cells.push(Cell::Amount(totals.tax));
    cells.push(Cell::Amount(totals.pension_fund));
    cells.push(Cell::formula(
        sum_across(layout.first_deduction(), layout.pension_fund(), sheet_row),
        totals.total_deductions(),
    ));
    cells.push(Cell::formula(
        format!(
            "{}-{}",
            cell_ref(layout.total_accruals(), sheet_row),
            cell_ref(layout.total_deductions(), sheet_row)
        ),
        totals.net_payable(),
    ));
    cells
}

fn summary_cells(model: &TabularModel, layout: &RegisterLayout) -> Vec<Cell> {
    let first_row = model.sheet_row(0);
    let last_row = model.sheet_row(model.rows.len() - 1);

    let mut cells = vec![Cell::text("Summary")];
    cells.resize(layout.first_accrual(), Cell::Empty);

    for column in layout.first_accrual()..=layout.net_amount() {
        let sum: Decimal = model
            .rows
            .iter()
            .filter_map(|row| row.cells.get(column).and_then(Cell::amount))
            .sum();
        cells.push(Cell::formula(sum_down(column, first_row, last_row), sum));
    }
    cells
}
