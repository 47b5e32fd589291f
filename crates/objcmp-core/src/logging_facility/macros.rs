//! Canonical operation logging macros
//!
//! Both macros emit an `info` event carrying `component`, `op` and `event`
//! under the keys defined in `objcmp_core_types::schema`. Extra fields are
//! passed through to `tracing` unchanged.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use objcmp_core::log_op_start;
/// log_op_start!("compare");
/// log_op_start!("compare", lhs_type = "Order");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        ::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        ::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the end of an operation
///
/// # Example
///
/// ```
/// # use objcmp_core::log_op_end;
/// log_op_end!("compare", duration_ms = 3_u64);
/// log_op_end!("compare", duration_ms = 3_u64, equal = true);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        ::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        ::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}
