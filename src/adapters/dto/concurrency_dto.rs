use std::time::Duration;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct TimingResponse {
    pub mode: String,
    pub tasks: usize,
    #[serde(rename = "elapsedMs")]
    pub elapsed_ms: u64,
    pub elapsed: String,
}

impl TimingResponse {
    pub fn new(mode: &str, tasks: usize, elapsed: Duration) -> Self {
        Self {
            mode: mode.to_string(),
            tasks,
            elapsed_ms: elapsed.as_millis() as u64,
            elapsed: format!("{:.2}s", elapsed.as_secs_f64()),
        }
    }
}
