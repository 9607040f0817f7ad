//! Background tasks
//!
//! Recording, transcription, the assistant request and the email backup
//! block for seconds, so each runs on its own thread. The result comes back
//! as an [`Event::Task`] and is applied on the UI thread. Errors are
//! flattened to their display text since that is all the UI shows.

use std::sync::mpsc::Sender;
use std::thread;

use crate::assistant::AssistantRequest;
use crate::backup::EmailBackup;
use crate::error::{ExpenseError, ExpenseResult};
use crate::voice::{self, Recorder, Transcriber};

use super::event::Event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// Price text extracted from a dictated clip
    Dictation(Result<String, String>),
    /// Markdown reply from the assistant
    Assistant(Result<String, String>),
    EmailBackup(Result<(), String>),
}

/// Run `job` on a named thread and post its outcome to `sender`
///
/// Fails when the thread cannot be started; no outcome is posted then.
fn spawn<F>(sender: Sender<Event>, name: &str, job: F) -> ExpenseResult<()>
where
    F: FnOnce() -> TaskOutcome + Send + 'static,
{
    let spawned = thread::Builder::new()
        .name(name.to_string())
        .spawn(move || {
            let outcome = job();
            // The UI may already have quit
            let _ = sender.send(Event::Task(outcome));
        });

    spawned
        .map(|_| ())
        .map_err(|e| ExpenseError::Tui(format!("Failed to start {} task: {}", name, e)))
}

pub fn spawn_dictation<T>(
    sender: Sender<Event>,
    recorder: Recorder,
    transcriber: T,
) -> ExpenseResult<()>
where
    T: Transcriber + 'static,
{
    spawn(sender, "dictation", move || {
        let result = voice::dictate_price(&recorder, &transcriber).map_err(|e| {
            log::warn!("Dictation failed: {}", e);
            e.to_string()
        });
        TaskOutcome::Dictation(result)
    })
}

pub fn spawn_assistant(sender: Sender<Event>, request: AssistantRequest) -> ExpenseResult<()> {
    spawn(sender, "assistant", move || {
        let result = request.send().map_err(|e| {
            log::warn!("Assistant request failed: {}", e);
            e.to_string()
        });
        TaskOutcome::Assistant(result)
    })
}

pub fn spawn_email_backup(sender: Sender<Event>, backup: EmailBackup) -> ExpenseResult<()> {
    spawn(sender, "email-backup", move || {
        let result = backup.send().map_err(|e| {
            log::warn!("Email backup failed: {}", e);
            e.to_string()
        });
        TaskOutcome::EmailBackup(result)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::mpsc;
    use std::time::Duration;

    struct Fixed(&'static str);

    impl Transcriber for Fixed {
        fn transcribe(&self, _clip: &Path) -> ExpenseResult<String> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn test_failed_recording_is_reported_as_event() {
        let (tx, rx) = mpsc::channel();
        let recorder = Recorder::new("/nonexistent/clip.wav").with_program("definitely-not-a-recorder");
        spawn_dictation(tx, recorder, Fixed("twelve dollars")).unwrap();

        match rx.recv_timeout(Duration::from_secs(10)).unwrap() {
            Event::Task(TaskOutcome::Dictation(Err(message))) => assert!(!message.is_empty()),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_assistant_without_key_is_reported_as_event() {
        let (tx, rx) = mpsc::channel();
        let request = AssistantRequest {
            api_key: String::new(),
            model: "gemini-flash-latest".into(),
            prompt: "hello".into(),
        };
        spawn_assistant(tx, request).unwrap();

        match rx.recv_timeout(Duration::from_secs(10)).unwrap() {
            Event::Task(TaskOutcome::Assistant(Err(message))) => {
                assert!(message.contains("API key"))
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
