//! Pay slip view for a single employee.

use crate::aggregation::{EmployeeTotals, aggregate_by_employee};
use crate::models::{AmountKind, Report, ReportEntry};

use super::tabular::{
    Cell, Column, MetadataField, Row, RowKind, TabularModel, cell_ref, sum_down,
};

const ACCRUAL_COLUMN: usize = 2;
const DEDUCTION_COLUMN: usize = 3;

/// Builds the pay slip of `employee_id` within `report`.
///
/// Entries belonging to other employees are ignored. An employee with no
/// entries gets a model with metadata and headers but no rows.
pub fn build_pay_slip(report: &Report, employee_id: u64, entries: &[ReportEntry]) -> TabularModel {
    let own_entries: Vec<ReportEntry> = entries
        .iter()
        .filter(|entry| entry.employee.id == employee_id)
        .cloned()
        .collect();
    let totals = aggregate_by_employee(&own_entries).remove(&employee_id);

    let employee_label = match &totals {
        Some(totals) => {
            let employee = &totals.employee;
            format!(
                "{}, {}, {}",
                employee.full_name(),
                employee.position,
                employee.department
            )
        }
        None => employee_id.to_string(),
    };

    let mut model = TabularModel::new("Pay slip");
    model.metadata = vec![
        MetadataField::new("Employee", employee_label),
        MetadataField::new("Period", report.period_label()),
    ];
    model.columns = ["ID", "Benefit", "Accrual", "Deduction"]
        .into_iter()
        .map(Column::new)
        .collect();

    if let Some(totals) = totals {
        model.rows = pay_slip_rows(&model, &totals);
    }
    model
}

fn pay_slip_rows(model: &TabularModel, totals: &EmployeeTotals) -> Vec<Row> {
    let mut rows = Vec::new();

    for (name, benefit) in &totals.accruals {
        rows.push(Row::new(
            RowKind::Data,
            vec![
                Cell::Integer(benefit.id),
                Cell::text(name),
                Cell::Amount(totals.accrual_for(name)),
                Cell::Empty,
            ],
        ));
    }
    for (name, benefit) in &totals.deductions {
        rows.push(Row::new(
            RowKind::Data,
            vec![
                Cell::Integer(benefit.id),
                Cell::text(name),
                Cell::Empty,
                Cell::Amount(totals.deduction_for(name)),
            ],
        ));
    }
    rows.push(Row::new(
        RowKind::Data,
        vec![
            Cell::Empty,
            Cell::text(AmountKind::PensionFund.label()),
            Cell::Empty,
            Cell::Amount(totals.pension_fund),
        ],
    ));
    rows.push(Row::new(
        RowKind::Data,
        vec![
            Cell::Empty,
            Cell::text(AmountKind::Tax.label()),
            Cell::Empty,
            Cell::Amount(totals.tax),
        ],
    ));

    let first_row = model.sheet_row(0);
    let last_row = model.sheet_row(rows.len() - 1);
    let total_row = model.sheet_row(rows.len());

    rows.push(Row::new(
        RowKind::Total,
        vec![
            Cell::Empty,
            Cell::text("Total"),
            Cell::formula(
                sum_down(ACCRUAL_COLUMN, first_row, last_row),
                totals.total_accruals(),
            ),
            Cell::formula(
                sum_down(DEDUCTION_COLUMN, first_row, last_row),
                totals.total_deductions(),
            ),
        ],
    ));
    rows.push(Row::new(
        RowKind::Net,
        vec![
            Cell::Empty,
            Cell::text(AmountKind::Net.label()),
            Cell::formula(
                format!(
                    "{}-{}",
                    cell_ref(ACCRUAL_COLUMN, total_row),
                    cell_ref(DEDUCTION_COLUMN, total_row)
                ),
                totals.net_payable(),
            ),
            Cell::Empty,
        ],
    ));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Benefit, BenefitType, CalculatedAmounts, CalculationMethod, Document, Employee,
    };
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_report() -> Report {
        Report::new(
            NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2022, 12, 31).unwrap(),
        )
    }

    fn employee(id: u64) -> Employee {
        Employee {
            id,
            first_name: "Nika".to_string(),
            last_name: "Avalishvili".to_string(),
            department: "Business Development".to_string(),
            position: "Business Builder".to_string(),
            email: "nika@example.com".to_string(),
            is_active: true,
            is_pensions_payer: true,
        }
    }

    fn entry(
        report: &Report,
        employee_id: u64,
        benefit: Benefit,
        amounts: [&str; 4],
    ) -> ReportEntry {
        let date = NaiveDate::from_ymd_opt(2022, 4, 3).unwrap();
        ReportEntry::new(
            report.id,
            employee(employee_id),
            benefit.clone(),
            Document {
                id: 1,
                upload_date: date,
                effective_date: date,
                employee_id,
                benefit_id: benefit.id,
                amount: dec(amounts[3]).abs(),
            },
            CalculatedAmounts {
                net: dec(amounts[0]),
                pension_fund: dec(amounts[1]),
                tax: dec(amounts[2]),
                gross: dec(amounts[3]),
            },
        )
    }

    fn bonus() -> Benefit {
        Benefit {
            id: 1,
            name: "Annual Bonus".to_string(),
            benefit_type: BenefitType::Accrual,
            calculation_method: CalculationMethod::Gross,
        }
    }

    fn loan() -> Benefit {
        Benefit {
            id: 2,
            name: "Loan".to_string(),
            benefit_type: BenefitType::Deduction,
            calculation_method: CalculationMethod::Gross,
        }
    }

    #[test]
    fn test_first_benefit_lands_below_metadata_and_header() {
        let report = create_test_report();
        let entries = vec![entry(&report, 1, bonus(), ["392", "10", "98", "500"])];

        let model = build_pay_slip(&report, 1, &entries);

        assert_eq!(model.metadata.len(), 2);
        assert_eq!(
            model.metadata[0].value,
            "Nika Avalishvili, Business Builder, Business Development"
        );
        assert_eq!(model.metadata[1].value, "2022-01-01 – 2022-12-31");
        assert_eq!(model.sheet_row(0), 4);
        assert_eq!(model.cell(0, 0), Some(&Cell::Integer(1)));
        assert_eq!(model.cell(0, 2), Some(&Cell::Amount(dec("500"))));
    }

    #[test]
    fn test_rows_and_totals() {
        let report = create_test_report();
        let entries = vec![
            entry(&report, 1, bonus(), ["392", "10", "98", "500"]),
            entry(&report, 1, loan(), ["-160", "0", "-40", "-200"]),
        ];

        let model = build_pay_slip(&report, 1, &entries);

        let labels: Vec<&str> = model
            .rows
            .iter()
            .filter_map(|row| row.cells[1].as_text())
            .collect();
        assert_eq!(
            labels,
            vec![
                "Annual Bonus",
                "Loan",
                AmountKind::PensionFund.label(),
                AmountKind::Tax.label(),
                "Total",
                AmountKind::Net.label()
            ]
        );

        assert_eq!(model.cell(1, 3), Some(&Cell::Amount(dec("200"))));

        let total = &model.rows[4];
        assert_eq!(total.kind, RowKind::Total);
        assert_eq!(total.cells[2].expression(), Some("SUM(C4:C7)"));
        assert_eq!(total.cells[2].amount(), Some(dec("500")));
        assert_eq!(total.cells[3].expression(), Some("SUM(D4:D7)"));
        // 200 + 10 + 58
        assert_eq!(total.cells[3].amount(), Some(dec("268")));

        let net = &model.rows[5];
        assert_eq!(net.kind, RowKind::Net);
        assert_eq!(net.cells[2].expression(), Some("C8-D8"));
        assert_eq!(net.cells[2].amount(), Some(dec("232")));
    }

    #[test]
    fn test_other_employees_are_ignored() {
        let report = create_test_report();
        let entries = vec![
            entry(&report, 1, bonus(), ["392", "10", "98", "500"]),
            entry(&report, 2, bonus(), ["784", "20", "196", "1000"]),
        ];

        let model = build_pay_slip(&report, 2, &entries);
        assert_eq!(model.cell(0, 2), Some(&Cell::Amount(dec("1000"))));
    }

    #[test]
    fn test_no_entries_gives_no_rows() {
        let report = create_test_report();
        let model = build_pay_slip(&report, 1, &[]);

        assert!(model.rows.is_empty());
        assert_eq!(model.columns.len(), 4);
        assert_eq!(model.metadata.len(), 2);
    }
}
