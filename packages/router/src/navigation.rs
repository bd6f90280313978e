//! Types relating to navigation.

/// The outcome of a navigation that a page may refuse.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigation<T> {
    /// The new page was loaded. Holds whatever its [`on_load`](crate::page::Page::on_load)
    /// returned.
    Loaded(Option<T>),
    /// The current page's [`can_unload`](crate::page::Page::can_unload) returned [`false`].
    /// Nothing happened.
    Aborted,
}

impl<T> Navigation<T> {
    /// Returns `true` if the navigation is [`Aborted`].
    ///
    /// [`Aborted`]: Navigation::Aborted
    #[must_use]
    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted)
    }

    /// The value returned by the loaded page, if there is one.
    pub fn into_output(self) -> Option<T> {
        match self {
            Self::Loaded(output) => output,
            Self::Aborted => None,
        }
    }
}
