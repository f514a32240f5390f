use std::time::Duration;

#[derive(Debug)]
pub struct SubtitleBlock {
    pub(crate) index: u64,
    pub(crate) start: Duration,
    pub(crate) end: Duration,
    pub(crate) lines: Vec<String>,
}

impl SubtitleBlock {
    pub fn flattened_text(&self) -> String {
        self.lines.join(" ")
    }

    pub fn elapsed_seconds(&self) -> i64 {
        reduce_duration(self.start, self.end)
    }
}

/// Whole seconds between two timestamps. Each endpoint is truncated to its
/// seconds component before subtracting, so the sub-second parts never
/// influence the result: 1,900 to 3,100 counts as 2 seconds even though only
/// 1.2 seconds elapse. Negative when `end` precedes `start`.
pub fn reduce_duration(start: Duration, end: Duration) -> i64 {
    end.as_secs() as i64 - start.as_secs() as i64
}
