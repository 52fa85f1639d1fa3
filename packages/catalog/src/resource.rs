//! Tagged state for one asynchronous resource.

/// Lifecycle of a value fetched from the service.
///
/// One of these per remote collection replaces separate `loading` / `error`
/// flags, so "loading and failed at once" cannot be represented.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Resource<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    Error(String),
}

impl<T> Resource<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(reason) => Some(reason),
            _ => None,
        }
    }
}

impl<T> Resource<Vec<T>> {
    /// Items when ready, otherwise an empty slice.
    pub fn items(&self) -> &[T] {
        self.ready().map(Vec::as_slice).unwrap_or(&[])
    }
}
