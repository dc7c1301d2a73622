use console_error_panic_hook::set_once;
use wasm_bindgen::prelude::wasm_bindgen;

use crate::{closehook::Closehook, host::Host};

/// Run the close-hook regression from a browser host and report the outcome as a string.
#[wasm_bindgen]
pub fn run_case() -> String {
    // Set the panic hook for better error messages in the browser console
    set_once();

    match Closehook::run_case(Host::Batch) {
        Ok(outcome) if outcome.passed() => format!("PASSED: {}", outcome.summary()),
        Ok(outcome) => format!("FAILED: {} ({})", outcome.summary(), outcome.actual()),
        Err(err) => format!("ERROR: {err}"),
    }
}
