//! Voice dictation of the amount field
//!
//! Record a short clip, transcribe it, and pull the first number out of the
//! transcript. Runs on a worker thread; the caller owns the "is recording"
//! flag.

pub mod price;
pub mod recorder;
pub mod transcriber;

pub use price::{extract_price, no_price_message};
pub use recorder::Recorder;
pub use transcriber::{GeminiTranscriber, Transcriber};

use crate::error::{ExpenseError, ExpenseResult};

/// Record, transcribe, and extract a price
///
/// A transcript without a number is a validation error carrying the
/// transcript.
pub fn dictate_price(recorder: &Recorder, transcriber: &dyn Transcriber) -> ExpenseResult<String> {
    let clip = recorder.record()?;
    let text = transcriber.transcribe(&clip);
    if let Err(e) = std::fs::remove_file(&clip) {
        log::debug!("Could not remove voice clip {}: {}", clip.display(), e);
    }
    price_from_transcript(&text?)
}

/// Price from an existing transcript
pub fn price_from_transcript(text: &str) -> ExpenseResult<String> {
    extract_price(text).ok_or_else(|| ExpenseError::Validation(no_price_message(text)))
}
