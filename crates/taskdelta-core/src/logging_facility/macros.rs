//! Canonical logging macros
//!
//! These macros provide a structured, consistent way to log operations.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use taskdelta_core::log_op_start;
/// log_op_start!("detect_changes");
/// log_op_start!("detect_changes", property = "Input");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use taskdelta_core::log_op_end;
/// log_op_end!("append_to_cache_key", duration_ms = 0);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// The error is converted into [`ExError`](crate::errors::ExError) so the
/// stable kind and code are always recorded.
///
/// # Example
///
/// ```
/// # use taskdelta_core::{log_op_error, errors::TaskDeltaError};
/// let err = TaskDeltaError::UnknownStrategy { name: "sorted".to_string() };
/// log_op_error!("load_compare_config", err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        use $crate::errors::ExError;
        let ex_err: ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        use $crate::errors::ExError;
        let ex_err: ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            $($field)*
        );
    }};
}
