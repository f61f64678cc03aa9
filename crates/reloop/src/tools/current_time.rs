use std::time::{SystemTime, UNIX_EPOCH};

use reloop_core::Tool;

/// A tool that reports the current Unix time in seconds.
///
/// It takes no parameters, so it is a plain [`Tool`] and ignores whatever
/// arguments the model sends.
#[derive(Clone, Copy, Debug, Default)]
pub struct CurrentTimeTool;

impl Tool for CurrentTimeTool {
    fn name(&self) -> &str {
        "current_time"
    }

    fn description(&self) -> &str {
        "Returns the current Unix timestamp in seconds."
    }

    fn invoke(&self, _arguments: &str) -> String {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(elapsed) => elapsed.as_secs().to_string(),
            Err(err) => format!("clock error: {err}"),
        }
    }
}
