// ============================================================
// Layer 6 — Console Progress
// ============================================================
// Renders batch progress as a single self-overwriting line on
// stderr, keeping stdout free for the report:
//
//   \tProgress 42.0%
//
// `finish` ends the line, so log output after a cancelled or
// aborted batch starts on a fresh line.

use std::io::Write;

use crate::domain::traits::ProgressReporter;

pub struct ConsoleProgress;

impl ConsoleProgress {
    pub fn format_line(completed: usize, total: usize) -> String {
        let fraction = if total == 0 { 1.0 } else { completed as f64 / total as f64 };
        format!("\r\tProgress {:.1}%", fraction * 100.0)
    }
}

impl ProgressReporter for ConsoleProgress {
    fn report(&self, completed: usize, total: usize) {
        let mut err = std::io::stderr().lock();
        // Progress is best effort; a closed stderr must not stop scoring.
        let _ = write!(err, "{}", Self::format_line(completed, total));
        let _ = err.flush();
    }

    fn finish(&self) {
        let _ = writeln!(std::io::stderr());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line() {
        assert_eq!(ConsoleProgress::format_line(1, 8), "\r\tProgress 12.5%");
        assert_eq!(ConsoleProgress::format_line(3, 3), "\r\tProgress 100.0%");
        assert_eq!(ConsoleProgress::format_line(0, 0), "\r\tProgress 100.0%");
    }
}
