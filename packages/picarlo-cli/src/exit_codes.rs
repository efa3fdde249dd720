use picarlo_core::PiError;

pub const SUCCESS: i32 = 0;
pub const INPUT_ERROR: i32 = 2;
pub const TRANSPORT_ERROR: i32 = 3;
pub const EXECUTION_ERROR: i32 = 4;

/// Map a core error onto a process exit code.
///
/// Cancellation is a neutral outcome, never a failure.
pub fn for_error(error: &PiError) -> i32 {
    match error {
        PiError::InvalidInput(_) => INPUT_ERROR,
        PiError::Transport(_) | PiError::HttpStatus(_) => TRANSPORT_ERROR,
        PiError::Cancelled => SUCCESS,
        PiError::MalformedStream(_) | PiError::AlreadyRunning => EXECUTION_ERROR,
    }
}
