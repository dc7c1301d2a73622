mod close_hook;

pub use close_hook::{close_hook_case, close_hook_case_in, BUG_NUMBER, CHURN_CELLS, SUMMARY};
