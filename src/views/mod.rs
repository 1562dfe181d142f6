//! Report views.
//!
//! Each builder turns stored reports or entries into a [`TabularModel`];
//! rendering it to a spreadsheet, JSON or text is left to the caller.

mod pay_slip;
mod payroll_register;
mod reports_list;
mod tabular;

pub use pay_slip::build_pay_slip;
pub use payroll_register::build_payroll_register;
pub use reports_list::build_reports_list;
pub use tabular::{Cell, Column, MetadataField, Row, RowKind, TabularModel, column_letter};
