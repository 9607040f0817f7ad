//! Microphone capture through `arecord`

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{ExpenseError, ExpenseResult};

/// Length of a dictation clip
pub const CLIP_SECONDS: u32 = 5;

/// Records a fixed-length CD-quality WAV clip
#[derive(Debug, Clone)]
pub struct Recorder {
    program: String,
    seconds: u32,
    output: PathBuf,
}

impl Recorder {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            program: "arecord".to_string(),
            seconds: CLIP_SECONDS,
            output: output.into(),
        }
    }

    /// Use a different capture program taking `arecord`-style arguments
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Arguments passed to the capture program
    pub fn args(&self) -> Vec<String> {
        vec![
            "-f".into(),
            "cd".into(),
            "-t".into(),
            "wav".into(),
            "-d".into(),
            self.seconds.to_string(),
            self.output.display().to_string(),
        ]
    }

    /// Record a clip, blocking until the program exits
    pub fn record(&self) -> ExpenseResult<PathBuf> {
        log::info!("Recording {}s clip to {}", self.seconds, self.output.display());
        let status = Command::new(&self.program)
            .args(self.args())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| {
                ExpenseError::Voice(format!("Could not access microphone ({}): {}", self.program, e))
            })?;

        if !status.success() {
            return Err(ExpenseError::Voice(format!(
                "Could not access microphone: {} exited with {}",
                self.program, status
            )));
        }
        if !self.output.exists() {
            return Err(ExpenseError::Voice("No audio was recorded.".into()));
        }
        Ok(self.output.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arecord_arguments() {
        let recorder = Recorder::new("/tmp/expense_voice.wav");
        assert_eq!(
            recorder.args(),
            vec!["-f", "cd", "-t", "wav", "-d", "5", "/tmp/expense_voice.wav"]
        );
    }

    #[test]
    fn test_missing_program_is_voice_error() {
        let recorder =
            Recorder::new("/tmp/never.wav").with_program("definitely-not-a-recorder-binary");
        assert!(matches!(recorder.record(), Err(ExpenseError::Voice(_))));
    }
}
