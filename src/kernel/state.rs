use std::fmt;

/// Lifecycle state of a [`Kernel`](super::Kernel).
///
/// States only move forward: idle, booted, running, terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KernelState {
    /// Configuration is still mutable.
    Idle,
    /// Descriptors are loaded and configuration is frozen.
    Booted,
    /// A main command is executing or has executed.
    Running,
    /// Terminal. Nothing else can run.
    Terminated,
}

impl fmt::Display for KernelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Booted => "booted",
            Self::Running => "running",
            Self::Terminated => "terminated",
        };
        f.write_str(name)
    }
}
