//! FFI bindings for Call Audit
//!
//! This module provides C-compatible functions for calling the audit core from other languages.
//! All functions use C strings (null-terminated) and return allocated memory that
//! must be freed by the caller using `audit_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::config::AuditConfig;
use crate::error::ComputeError;
use crate::pipeline::{audit_call, AuditProcessor};

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Helper to convert C string to Rust string
unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Helper to convert Rust string to C string (caller must free)
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => {
            set_last_error("Result contained an interior NUL byte");
            ptr::null_mut()
        }
    }
}

/// Parse an optional configuration document; NULL means defaults
unsafe fn config_from_ptr(config_json: *const c_char) -> Result<AuditConfig, ComputeError> {
    if config_json.is_null() {
        return Ok(AuditConfig::default());
    }
    let json = cstr_to_string(config_json).ok_or_else(|| {
        ComputeError::InvalidInput("Config string is not valid UTF-8".to_string())
    })?;
    AuditConfig::from_json(&json)
}

fn finish(result: Result<String, ComputeError>) -> *mut c_char {
    match result {
        Ok(json) => string_to_cstr(&json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Stateless API
// ============================================================================

/// Audit one call bundle and return the audit record JSON.
///
/// # Safety
/// - `bundle_json` must be a valid null-terminated C string.
/// - `config_json` must be a valid null-terminated C string, or NULL for defaults.
/// - Returns a newly allocated string that must be freed with `audit_free_string`.
/// - Returns NULL on error; call `audit_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn audit_call_json(
    bundle_json: *const c_char,
    config_json: *const c_char,
) -> *mut c_char {
    clear_last_error();

    let bundle = match cstr_to_string(bundle_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid bundle string pointer");
            return ptr::null_mut();
        }
    };

    finish(config_from_ptr(config_json).and_then(|config| audit_call(&bundle, &config)))
}

// ============================================================================
// Processor API
// ============================================================================

/// Opaque handle to an AuditProcessor
pub struct AuditProcessorHandle {
    processor: AuditProcessor,
}

/// Create a processor from a configuration document.
///
/// # Safety
/// - `config_json` must be a valid null-terminated C string, or NULL for defaults.
/// - Returns a pointer that must be freed with `audit_processor_free`.
/// - Returns NULL when the configuration is invalid; call `audit_last_error`.
#[no_mangle]
pub unsafe extern "C" fn audit_processor_new(
    config_json: *const c_char,
) -> *mut AuditProcessorHandle {
    clear_last_error();

    match config_from_ptr(config_json).and_then(AuditProcessor::new) {
        Ok(processor) => Box::into_raw(Box::new(AuditProcessorHandle { processor })),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Free a processor.
///
/// # Safety
/// - `processor` must be a valid pointer returned by `audit_processor_new`, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn audit_processor_free(processor: *mut AuditProcessorHandle) {
    if !processor.is_null() {
        drop(Box::from_raw(processor));
    }
}

/// Audit one call bundle with a processor.
///
/// The processor is never mutated, so one handle may be shared across threads.
///
/// # Safety
/// - `processor` must be a valid pointer returned by `audit_processor_new`.
/// - `bundle_json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `audit_free_string`.
/// - Returns NULL on error; call `audit_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn audit_processor_process(
    processor: *const AuditProcessorHandle,
    bundle_json: *const c_char,
) -> *mut c_char {
    clear_last_error();

    if processor.is_null() {
        set_last_error("Null processor pointer");
        return ptr::null_mut();
    }

    let handle = &*processor;

    let bundle = match cstr_to_string(bundle_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid bundle string pointer");
            return ptr::null_mut();
        }
    };

    finish(handle.processor.process(&bundle))
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free a string returned by audit functions.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by an audit function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn audit_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Get the last error message.
///
/// # Safety
/// - Returns a pointer to a thread-local error string.
/// - The returned pointer is valid until the next audit function call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn audit_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

// ============================================================================
// Version Information
// ============================================================================

/// Get the library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn audit_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bundle() -> CString {
        CString::new(
            r#"{
                "call_id": "ffi-001",
                "violations": [{"severity": "medium", "category": "Disclosure"}],
                "utterances": [
                    {"speaker": "agent", "text": "I can help with that today.", "timestamp": 2},
                    {"speaker": "customer", "text": "Thanks, that's sorted.", "timestamp": 6}
                ],
                "agent_conduct": {"politeness": "good", "empathy": "medium", "professionalism": "good"}
            }"#,
        )
        .unwrap()
    }

    unsafe fn take_string(ptr: *mut c_char) -> String {
        assert!(!ptr.is_null());
        let s = CStr::from_ptr(ptr).to_str().unwrap().to_string();
        audit_free_string(ptr);
        s
    }

    #[test]
    fn test_ffi_audit_call_json() {
        let bundle = sample_bundle();
        unsafe {
            let json = take_string(audit_call_json(bundle.as_ptr(), ptr::null()));
            let value: serde_json::Value = serde_json::from_str(&json).unwrap();
            assert_eq!(value["call_id"], "ffi-001");
            assert_eq!(value["risk_assessment"]["total_score"], 10.0);
            assert!(audit_last_error().is_null());
        }
    }

    #[test]
    fn test_ffi_processor_lifecycle() {
        let config = CString::new(r#"{"critical_threshold": 60}"#).unwrap();
        let bundle = sample_bundle();
        unsafe {
            let processor = audit_processor_new(config.as_ptr());
            assert!(!processor.is_null());

            let first = take_string(audit_processor_process(processor, bundle.as_ptr()));
            let second = take_string(audit_processor_process(processor, bundle.as_ptr()));
            assert_eq!(first, second);

            let stateless = take_string(audit_call_json(bundle.as_ptr(), config.as_ptr()));
            assert_eq!(first, stateless);

            audit_processor_free(processor);
        }
    }

    #[test]
    fn test_ffi_invalid_config() {
        let config = CString::new(r#"{"critical_threshold": 250}"#).unwrap();
        unsafe {
            let processor = audit_processor_new(config.as_ptr());
            assert!(processor.is_null());

            let error = CStr::from_ptr(audit_last_error()).to_str().unwrap();
            assert!(error.contains("critical_threshold"));
        }
    }

    #[test]
    fn test_ffi_error_handling() {
        let invalid = CString::new("not json").unwrap();
        unsafe {
            let result = audit_call_json(invalid.as_ptr(), ptr::null());
            assert!(result.is_null());

            let error = audit_last_error();
            assert!(!error.is_null());
            assert!(!CStr::from_ptr(error).to_str().unwrap().is_empty());

            let result = audit_processor_process(ptr::null(), invalid.as_ptr());
            assert!(result.is_null());
            let error = CStr::from_ptr(audit_last_error()).to_str().unwrap();
            assert_eq!(error, "Null processor pointer");

            // A successful call clears the previous error.
            let bundle = sample_bundle();
            let ok = audit_call_json(bundle.as_ptr(), ptr::null());
            assert!(audit_last_error().is_null());
            audit_free_string(ok);
        }
    }

    #[test]
    fn test_ffi_version() {
        unsafe {
            let version = audit_version();
            assert!(!version.is_null());

            let version_str = CStr::from_ptr(version).to_str().unwrap();
            assert_eq!(version_str, crate::AUDIT_VERSION);
        }
    }
}
