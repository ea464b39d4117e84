//! Status macros shared by every crate of the workspace.
//!
//! They are thin wrappers over `tracing`, so the binary's subscriber decides how
//! they are rendered. [`PRINT_TARGET`] carries report lines that must be written
//! verbatim, [`SUCCESS_TARGET`] marks the completion of a step.

/// Target of report lines, always enabled and printed without decoration.
pub const PRINT_TARGET: &str = "surveyor::print";

/// Target of success notices.
pub const SUCCESS_TARGET: &str = "surveyor::success";

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: $crate::log::SUCCESS_TARGET, $($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::tracing::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::tracing::info!($($arg)*)
    };
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    #[test]
    fn status_macros_accept_format_args_and_fields() {
        let host = "1.1.1.1";
        crate::info!("Excluded {host} from the list");
        crate::info!(host, "Excluded from the list");
        crate::warn!("Error while pinging {host}: timeout");
        crate::success!("Survey complete in {:.2}s", 1.5);
    }
}
