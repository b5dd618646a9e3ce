//! Logging macros for reinhardt-address
//!
//! The same macros work on WASM and native targets.
//!
//! | Macro | WASM | Non-WASM |
//! |-------|------|----------|
//! | `debug_log!` | `console.debug` (`debug-hooks` + `debug_assertions`) | `tracing::debug!` |
//! | `info_log!` | `console.info` (`debug_assertions`) | `tracing::info!` |
//! | `warn_log!` | `console.warn` (`debug_assertions`) | `tracing::warn!` |
//! | `error_log!` | `console.error` (`debug_assertions`) | `tracing::error!` |
//!
//! On native targets filtering is left to the installed `tracing` subscriber.
//!
//! ## Example
//!
//! ```ignore
//! use reinhardt_address::{debug_log, warn_log};
//!
//! debug_log!("binding address field '{}'", name);
//! warn_log!("provider rejected '{}': {}", name, err);
//! ```

/// Logs a debug message (requires `debug-hooks` feature + `debug_assertions`)
#[macro_export]
#[cfg(all(debug_assertions, feature = "debug-hooks", target_arch = "wasm32"))]
macro_rules! debug_log {
	($($arg:tt)*) => {{
		$crate::__private::web_sys::console::debug_1(&format!($($arg)*).into());
	}};
}

/// No-op debug_log on WASM when conditions are not met
#[macro_export]
#[cfg(all(
	target_arch = "wasm32",
	not(all(debug_assertions, feature = "debug-hooks"))
))]
macro_rules! debug_log {
	($($arg:tt)*) => {{}};
}

/// Logs a debug message through `tracing`
#[macro_export]
#[cfg(not(target_arch = "wasm32"))]
macro_rules! debug_log {
	($($arg:tt)*) => {{
		$crate::__private::tracing::debug!($($arg)*);
	}};
}

/// Logs an info message (requires `debug_assertions`)
#[macro_export]
#[cfg(all(debug_assertions, target_arch = "wasm32"))]
macro_rules! info_log {
	($($arg:tt)*) => {{
		$crate::__private::web_sys::console::info_1(&format!($($arg)*).into());
	}};
}

/// No-op info_log in WASM release builds
#[macro_export]
#[cfg(all(not(debug_assertions), target_arch = "wasm32"))]
macro_rules! info_log {
	($($arg:tt)*) => {{}};
}

/// Logs an info message through `tracing`
#[macro_export]
#[cfg(not(target_arch = "wasm32"))]
macro_rules! info_log {
	($($arg:tt)*) => {{
		$crate::__private::tracing::info!($($arg)*);
	}};
}

/// Logs a warning message (requires `debug_assertions`)
///
/// # Example
///
/// ```ignore
/// warn_log!("companion container '#{}' not found", id);
/// ```
#[macro_export]
#[cfg(all(debug_assertions, target_arch = "wasm32"))]
macro_rules! warn_log {
	($($arg:tt)*) => {{
		$crate::__private::web_sys::console::warn_1(&format!($($arg)*).into());
	}};
}

/// No-op warn_log in WASM release builds
#[macro_export]
#[cfg(all(not(debug_assertions), target_arch = "wasm32"))]
macro_rules! warn_log {
	($($arg:tt)*) => {{}};
}

/// Logs a warning message through `tracing`
#[macro_export]
#[cfg(not(target_arch = "wasm32"))]
macro_rules! warn_log {
	($($arg:tt)*) => {{
		$crate::__private::tracing::warn!($($arg)*);
	}};
}

/// Logs an error message (requires `debug_assertions`)
#[macro_export]
#[cfg(all(debug_assertions, target_arch = "wasm32"))]
macro_rules! error_log {
	($($arg:tt)*) => {{
		$crate::__private::web_sys::console::error_1(&format!($($arg)*).into());
	}};
}

/// No-op error_log in WASM release builds
#[macro_export]
#[cfg(all(not(debug_assertions), target_arch = "wasm32"))]
macro_rules! error_log {
	($($arg:tt)*) => {{}};
}

/// Logs an error message through `tracing`
#[macro_export]
#[cfg(not(target_arch = "wasm32"))]
macro_rules! error_log {
	($($arg:tt)*) => {{
		$crate::__private::tracing::error!($($arg)*);
	}};
}

#[cfg(test)]
mod tests {
	use crate::{debug_log, error_log, info_log, warn_log};
	use rstest::rstest;

	#[rstest]
	fn test_logging_macros_compile() {
		debug_log!("binding '{}'", "addr1");
		info_log!("bound {} fields", 2);
		warn_log!("missing fields: {:?}", vec!["addr1_route"]);
		error_log!("provider failed: {}", "jQuery is not defined");
	}

	#[rstest]
	fn test_logging_macros_no_args() {
		debug_log!("debug");
		info_log!("info");
		warn_log!("warning");
		error_log!("error");
	}
}
