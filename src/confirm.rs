//! Delete Confirmation
//!
//! The delete path asks a `Confirm` before touching the server, so it can be
//! driven by the browser prompt, skipped entirely, or scripted in tests.

pub const DELETE_PROMPT: &str = "Do you want to delete this todo?";

pub trait Confirm {
    /// Blocking yes/no question
    fn confirm(&self, message: &str) -> bool;
}

/// Modal `window.confirm` prompt. Anything but an explicit "OK" cancels.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserConfirm;

impl Confirm for BrowserConfirm {
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|window| window.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&self, _message: &str) -> bool {
        true
    }
}

#[cfg(test)]
pub use scripted::ScriptedConfirm;
