//! Performance benchmarks for the Payroll Report Engine.
//!
//! This benchmark suite covers the hot paths of a report run:
//! - Single benefit calculation
//! - Report generation over 100 and 1000 documents
//! - Payroll register construction from generated entries
//! - Scaling with the number of employees
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::sync::Arc;

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use payroll_report_engine::aggregation::aggregate_by_employee;
use payroll_report_engine::calculation::BenefitCalculator;
use payroll_report_engine::config::ConfigLoader;
use payroll_report_engine::models::{
    Benefit, BenefitType, CalculationMethod, Document, Employee, Report, ReportEntry,
};
use payroll_report_engine::service::PayrollService;
use payroll_report_engine::store::InMemoryStore;
use payroll_report_engine::views::build_payroll_register;

const BENEFITS: [(&str, BenefitType, CalculationMethod); 4] = [
    ("Salary", BenefitType::Accrual, CalculationMethod::Gross),
    ("Annual Bonus", BenefitType::Accrual, CalculationMethod::Net),
    ("Loan", BenefitType::Deduction, CalculationMethod::Gross),
    ("Meal Allowance", BenefitType::Accrual, CalculationMethod::Gross),
];

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Creates a store holding `employee_count` employees with
/// `documents_per_employee` documents each, spread over 2022.
fn create_store(employee_count: u64, documents_per_employee: u64) -> InMemoryStore {
    let store = InMemoryStore::new();

    for (index, (name, benefit_type, calculation_method)) in BENEFITS.iter().enumerate() {
        store
            .upsert_benefit(Benefit {
                id: index as u64 + 1,
                name: name.to_string(),
                benefit_type: *benefit_type,
                calculation_method: *calculation_method,
            })
            .unwrap();
    }

    let mut document_id = 0;
    for employee_id in 1..=employee_count {
        store
            .upsert_employee(Employee {
                id: employee_id,
                first_name: format!("First{}", employee_id),
                last_name: format!("Last{}", employee_id),
                department: "Operations".to_string(),
                position: "Analyst".to_string(),
                email: format!("employee{}@example.com", employee_id),
                is_active: employee_id % 10 != 0,
                is_pensions_payer: employee_id % 3 != 0,
            })
            .unwrap();

        for n in 0..documents_per_employee {
            document_id += 1;
            let effective = date(2022, (n % 12) as u32 + 1, 15);
            store
                .upsert_document(Document {
                    id: document_id,
                    upload_date: effective,
                    effective_date: effective,
                    employee_id,
                    benefit_id: n % BENEFITS.len() as u64 + 1,
                    amount: Decimal::new(50_000 + (document_id as i64 % 997) * 100, 2),
                })
                .unwrap();
        }
    }

    store
}

/// Generates one report's entries over the whole of 2022.
fn generate_entries(employee_count: u64, documents_per_employee: u64) -> (Report, Vec<ReportEntry>) {
    let service = PayrollService::with_defaults(Arc::new(create_store(
        employee_count,
        documents_per_employee,
    )));
    let generated = service
        .generate_report(date(2022, 1, 1), date(2022, 12, 31))
        .unwrap();
    (generated.report, generated.entries)
}

/// Benchmark: Single benefit calculation.
fn bench_single_calculation(c: &mut Criterion) {
    let config = ConfigLoader::load("./config").expect("Failed to load config");
    let calculator = BenefitCalculator::new(config.config());
    let amount = Decimal::new(50_000, 2);

    c.bench_function("single_calculation", |b| {
        b.iter(|| {
            black_box(
                calculator
                    .calculate(
                        black_box(amount),
                        true,
                        true,
                        BenefitType::Accrual,
                        CalculationMethod::Net,
                    )
                    .unwrap(),
            )
        })
    });
}

/// Benchmark: Report generation, including persistence.
fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_report");

    for (employees, documents) in [(25u64, 4u64), (100, 10)] {
        let total = employees * documents;
        let service = PayrollService::with_defaults(Arc::new(create_store(employees, documents)));

        group.throughput(Throughput::Elements(total));
        if total >= 1000 {
            group.sample_size(10);
        }
        group.bench_with_input(BenchmarkId::new("documents", total), &total, |b, _| {
            b.iter(|| {
                black_box(
                    service
                        .generate_report_entries(date(2022, 1, 1), date(2022, 12, 31))
                        .unwrap(),
                )
            })
        });
    }

    group.finish();
}

/// Benchmark: Aggregation and payroll register construction.
fn bench_register(c: &mut Criterion) {
    let (report, entries) = generate_entries(100, 10);

    let mut group = c.benchmark_group("views");
    group.throughput(Throughput::Elements(entries.len() as u64));

    group.bench_function("aggregate_1000", |b| {
        b.iter(|| black_box(aggregate_by_employee(black_box(&entries))))
    });
    group.bench_function("payroll_register_1000", |b| {
        b.iter(|| black_box(build_payroll_register(&report, black_box(&entries))))
    });

    group.finish();
}

/// Benchmark: Register construction as the number of employees grows.
fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling");

    for employee_count in [1u64, 10, 50, 200].iter() {
        let (report, entries) = generate_entries(*employee_count, 4);

        group.throughput(Throughput::Elements(*employee_count));
        group.bench_with_input(
            BenchmarkId::new("employees", employee_count),
            employee_count,
            |b, _| b.iter(|| black_box(build_payroll_register(&report, &entries))),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_calculation,
    bench_generate,
    bench_register,
    bench_scaling,
);
criterion_main!(benches);
