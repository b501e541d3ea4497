//! Log macros with the standard marketplace fields.
//!
//! Every line carries `component`; asset and invocation events add the
//! identifiers a log query filters on:
//! - `asset_id`: ledger key of the record touched
//! - `function`: dispatched operation name
//! - `tx_id`: platform transaction id

/// Log an event with the component field.
#[macro_export]
macro_rules! log_event {
    ($level:ident, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = $component,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log an asset-related event with standard fields.
#[macro_export]
macro_rules! log_asset_event {
    ($level:ident, $component:expr, $msg:expr, $asset_id:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = $component,
            asset_id = %$asset_id,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log an invocation outcome with standard fields.
#[macro_export]
macro_rules! log_invocation {
    ($level:ident, $component:expr, $msg:expr, $function:expr, $tx_id:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = $component,
            function = %$function,
            tx_id = %$tx_id,
            $($($field)*,)?
            $msg
        )
    };
}
