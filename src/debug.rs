//! Macros for last-resort debugging.
//!
//! Error values returned by the codec are deliberately small. To find out
//! where exactly an error was produced, wrap the expression that creates it
//! in `xerr!()`. The macro emits a `tracing` event at trace level with the
//! source location under the target `kder::error` and then resolves into
//! whatever the enclosed expression resolves to:
//!
//! ```rust,ignore
//! if foo {
//!     xerr!(return Err(Error::invalid("bad foo")));
//! }
//! ```
//!
//! With the `extra-debug` feature enabled, the event also carries a
//! captured backtrace.

#[cfg(feature = "extra-debug")]
macro_rules! xerr {
    ($test:expr) => {{
        tracing::trace!(
            target: "kder::error",
            file = file!(), line = line!(),
            backtrace = %std::backtrace::Backtrace::force_capture(),
            "error raised"
        );
        $test
    }}
}

#[cfg(not(feature = "extra-debug"))]
macro_rules! xerr {
    ($test:expr) => {{
        tracing::trace!(
            target: "kder::error",
            file = file!(), line = line!(),
            "error raised"
        );
        $test
    }}
}
