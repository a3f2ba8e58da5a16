#[cfg(test)]
#[path = "access_test.rs"]
mod access_test;

/// Gate consulted by the protected layout before rendering its outlet.
///
/// The decision itself is made by whoever provides this context; the layout
/// only reads it. Defaults to closed when no host has opened it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AccessState {
    pub open: bool,
}

impl AccessState {
    #[must_use]
    pub fn open() -> Self {
        Self { open: true }
    }

    #[must_use]
    pub fn closed() -> Self {
        Self { open: false }
    }
}
