use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use serde::Serialize;

use crate::query::QuerySpec;

/// Result code for FFI functions
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QbResult {
    Ok = 0,
    ParseError = 1,
    ValidationError = 2,
    InternalError = 3,
}

/// Read a C string argument as `&str`, reporting failures through `error_out`
unsafe fn read_input<'a>(input: *const c_char, error_out: *mut *mut c_char) -> Option<&'a str> {
    if input.is_null() {
        set_error(error_out, "Input string is null");
        return None;
    }
    match CStr::from_ptr(input).to_str() {
        Ok(s) => Some(s),
        Err(e) => {
            set_error(error_out, &format!("Invalid UTF-8: {}", e));
            None
        }
    }
}

/// Render a JSON-encoded query spec to SQL text
///
/// # Safety
/// - `spec_json` must be a valid null-terminated C string
/// - Caller must free the returned string with `qb_free_string`
/// - Returns NULL on error, check `error_out` for details
#[no_mangle]
pub unsafe extern "C" fn qb_render_spec(
    spec_json: *const c_char,
    error_out: *mut *mut c_char,
) -> *mut c_char {
    let input = match read_input(spec_json, error_out) {
        Some(s) => s,
        None => return ptr::null_mut(),
    };

    let spec: QuerySpec = match serde_json::from_str(input) {
        Ok(s) => s,
        Err(e) => {
            set_error(error_out, &format!("Spec deserialization error: {}", e));
            return ptr::null_mut();
        }
    };

    match CString::new(crate::sql::render(&spec)) {
        Ok(c_str) => c_str.into_raw(),
        Err(e) => {
            set_error(error_out, &format!("CString conversion error: {}", e));
            ptr::null_mut()
        }
    }
}

/// Structured validation issue for JSON output
#[derive(Serialize)]
struct ValidationIssueJson {
    kind: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    predicate: Option<usize>,
}

/// Structured validation result for JSON output
#[derive(Serialize)]
struct ValidationResultJson {
    valid: bool,
    errors: Vec<ValidationIssueJson>,
    /// Rows that render() will skip
    warnings: Vec<ValidationIssueJson>,
}

fn validate(spec: &QuerySpec) -> ValidationResultJson {
    let mut errors = Vec::new();
    if spec.source.is_empty() {
        errors.push(ValidationIssueJson {
            kind: "MissingSource",
            message: "No source selected".to_string(),
            predicate: None,
        });
    }

    let warnings = spec
        .predicates
        .iter()
        .enumerate()
        .filter(|(_, p)| !p.is_complete())
        .map(|(i, _)| ValidationIssueJson {
            kind: "IncompletePredicate",
            message: format!("Predicate {} needs a field and a value", i),
            predicate: Some(i),
        })
        .collect();

    ValidationResultJson {
        valid: errors.is_empty(),
        errors,
        warnings,
    }
}

/// Validate a JSON-encoded query spec.
/// On `Ok` or `ValidationError`, `result_out` receives the JSON report.
///
/// # Safety
/// - `spec_json` must be a valid null-terminated C string
/// - Strings written to `result_out` must be freed with `qb_free_string`
#[no_mangle]
pub unsafe extern "C" fn qb_validate_spec(
    spec_json: *const c_char,
    result_out: *mut *mut c_char,
) -> QbResult {
    let input = match read_input(spec_json, result_out) {
        Some(s) => s,
        None => return QbResult::InternalError,
    };

    let spec: QuerySpec = match serde_json::from_str(input) {
        Ok(s) => s,
        Err(e) => {
            set_error(result_out, &format!("Spec deserialization error: {}", e));
            return QbResult::ParseError;
        }
    };

    let report = validate(&spec);
    let valid = report.valid;
    let json = match serde_json::to_string(&report) {
        Ok(j) => j,
        Err(e) => {
            set_error(result_out, &format!("JSON serialization error: {}", e));
            return QbResult::InternalError;
        }
    };
    set_error(result_out, &json);

    if valid {
        QbResult::Ok
    } else {
        QbResult::ValidationError
    }
}

/// Free a string allocated by Rust
///
/// # Safety
/// `s` must come from this library, or be NULL
#[no_mangle]
pub unsafe extern "C" fn qb_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

/// Get the version of the library
#[no_mangle]
pub extern "C" fn qb_version() -> *const c_char {
    static VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "\0");
    VERSION.as_ptr() as *const c_char
}

// ============================================================
// HELPER FUNCTION
// ============================================================

unsafe fn set_error(error_out: *mut *mut c_char, message: &str) {
    if !error_out.is_null() {
        if let Ok(c_str) = CString::new(message) {
            *error_out = c_str.into_raw();
        }
    }
}
