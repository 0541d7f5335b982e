use std::time::Duration;

// Port for retrieving the current wall-clock time.
pub trait Clock: Send + Sync {
    /// Time elapsed since an arbitrary fixed origin.
    fn now(&self) -> Duration;
}
