//! Leveled logging macros.
//!
//! The level is checked before the message or the context expression is
//! evaluated, so a disabled call site costs one table load.
//!
//! ```ignore
//! logroute::info!(log, "listening");
//! logroute::warn!(log, "slow request", { "ms": elapsed, "path": path });
//! logroute::emit!(log, Level::Log, "raw");
//! ```

/// Emit at an explicit level with an optional `json!`-style context.
#[macro_export]
macro_rules! emit {
    ($logger:expr, $level:expr, $msg:expr $(,)?) => {{
        let __logger = &$logger;
        let __level = $level;
        if __logger.enabled(__level) {
            __logger.emit(__level, $msg, ::core::option::Option::None);
        }
    }};
    ($logger:expr, $level:expr, $msg:expr, $($ctx:tt)+) => {{
        let __logger = &$logger;
        let __level = $level;
        if __logger.enabled(__level) {
            let __ctx = $crate::__private::json!($($ctx)+);
            __logger.emit(__level, $msg, ::core::option::Option::Some(&__ctx));
        }
    }};
}

#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($rest:tt)+) => { $crate::emit!($logger, $crate::Level::Fatal, $($rest)+) };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $($rest:tt)+) => { $crate::emit!($logger, $crate::Level::Error, $($rest)+) };
}

#[macro_export]
macro_rules! warn {
    ($logger:expr, $($rest:tt)+) => { $crate::emit!($logger, $crate::Level::Warn, $($rest)+) };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $($rest:tt)+) => { $crate::emit!($logger, $crate::Level::Info, $($rest)+) };
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($rest:tt)+) => { $crate::emit!($logger, $crate::Level::Debug, $($rest)+) };
}

#[macro_export]
macro_rules! log {
    ($logger:expr, $($rest:tt)+) => { $crate::emit!($logger, $crate::Level::Log, $($rest)+) };
}

#[macro_export]
macro_rules! trace {
    ($logger:expr, $($rest:tt)+) => { $crate::emit!($logger, $crate::Level::Trace, $($rest)+) };
}
