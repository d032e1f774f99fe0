//! Blocking user interaction: confirmations and alerts.

/// How a view asks the user something or tells them about a failure.
///
/// The browser shell maps this onto `window.confirm`/`window.alert`; the
/// terminal shell asks on stdin.
pub trait Prompt {
    fn confirm(&self, message: &str) -> bool;

    fn alert(&self, message: &str);
}

impl<P: Prompt + ?Sized> Prompt for &P {
    fn confirm(&self, message: &str) -> bool {
        (**self).confirm(message)
    }

    fn alert(&self, message: &str) {
        (**self).alert(message)
    }
}

/// Answers every confirmation with yes; alerts pass through.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes<P>(pub P);

impl<P: Prompt> Prompt for AssumeYes<P> {
    fn confirm(&self, message: &str) -> bool {
        tracing::debug!(message, "confirmation assumed");
        true
    }

    fn alert(&self, message: &str) {
        self.0.alert(message)
    }
}
