//! The seam between the catalog and whatever hosts its forms.
//!
//! Both calls block the caller until the user has seen the message or
//! answered the question.

/// User-facing notifications and confirmations.
pub trait Interaction: Send + Sync {
    /// Show a message the user has to acknowledge.
    fn notify(&self, message: &str);

    /// Ask a yes/no question. `false` cancels the pending operation.
    fn confirm(&self, message: &str) -> bool;
}

impl<T: Interaction + ?Sized> Interaction for &T {
    fn notify(&self, message: &str) {
        (**self).notify(message);
    }

    fn confirm(&self, message: &str) -> bool {
        (**self).confirm(message)
    }
}
