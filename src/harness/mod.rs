mod driver;
mod report;

pub use driver::{AlertHandle, AlertHook, TestDriver};
pub use report::{print_bug_number, print_status, report_compare, Outcome};
