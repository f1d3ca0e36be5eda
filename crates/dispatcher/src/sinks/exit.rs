//! ProcessTerminator - ends the process for FATAL log calls

use contracts::ProcessExit;
use tracing::info;

/// Exits the current process
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessTerminator;

impl ProcessExit for ProcessTerminator {
    fn terminate(&self, code: i32) {
        info!(code, "Terminating after fatal log call");
        std::process::exit(code);
    }
}
