//! Logging macros
//!
//! Unified logging that works across targets:
//! - Firmware builds (`defmt` feature): forwards to defmt
//! - Host tests: prints to stdout/stderr
//! - Anything else: no-op, arguments are still borrowed so nothing goes unused
//!
//! Format strings must stay within the subset understood by both defmt and
//! `core::fmt` (`{}` and `{:?}`).

#![allow(unused_macros)]

macro_rules! log_info {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::info!($fmt $(, $arg)*);

        #[cfg(all(test, not(feature = "defmt")))]
        ::std::println!(concat!("[INFO] ", $fmt) $(, $arg)*);

        #[cfg(not(any(test, feature = "defmt")))]
        {
            $( let _ = &$arg; )*
        }
    }};
}

macro_rules! log_warn {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::warn!($fmt $(, $arg)*);

        #[cfg(all(test, not(feature = "defmt")))]
        ::std::println!(concat!("[WARN] ", $fmt) $(, $arg)*);

        #[cfg(not(any(test, feature = "defmt")))]
        {
            $( let _ = &$arg; )*
        }
    }};
}

macro_rules! log_error {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::error!($fmt $(, $arg)*);

        #[cfg(all(test, not(feature = "defmt")))]
        ::std::eprintln!(concat!("[ERROR] ", $fmt) $(, $arg)*);

        #[cfg(not(any(test, feature = "defmt")))]
        {
            $( let _ = &$arg; )*
        }
    }};
}

macro_rules! log_debug {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::debug!($fmt $(, $arg)*);

        #[cfg(all(test, not(feature = "defmt")))]
        ::std::println!(concat!("[DEBUG] ", $fmt) $(, $arg)*);

        #[cfg(not(any(test, feature = "defmt")))]
        {
            $( let _ = &$arg; )*
        }
    }};
}
