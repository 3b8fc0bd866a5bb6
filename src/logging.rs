/// Conditional console logging for development builds
///
/// The `log!` macro writes informational messages to the browser console in
/// debug builds (or when the `console_logging` feature is enabled) and
/// compiles to nothing in release builds. Warnings and errors should use
/// `web_sys::console::warn_1`/`error_1` directly so they survive in
/// production.
#[macro_export]
macro_rules! log {
    ($($arg:expr),+ $(,)?) => {
        #[cfg(any(debug_assertions, feature = "console_logging"))]
        {
            web_sys::console::log_1(&format!($($arg),+).into());
        }
    };
}

pub use log;
