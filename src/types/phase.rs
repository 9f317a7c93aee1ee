use std::fmt;

/// Stage shown by the loading indicator while a submission is in flight.
///
/// The stages advance on fixed timers, not on signals from the proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Before the request is sent.
    Thinking,
    /// While the request is outstanding.
    Querying,
    /// After the response arrived, before it is shown.
    Generating,
}

impl Phase {
    /// Returns the label displayed next to the loading bar.
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Thinking => "Thinking...",
            Phase::Querying => "Querying...",
            Phase::Generating => "Generating...",
        }
    }

    /// Returns how full the loading bar is, in `0.0..=1.0`.
    pub fn progress(&self) -> f32 {
        match self {
            Phase::Thinking => 1.0 / 3.0,
            Phase::Querying => 2.0 / 3.0,
            Phase::Generating => 1.0,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
