//! Terminal pipeline outcomes.

/// Benign terminal result of one relay invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Object forwarded to the target API and archived.
    Completed,
    /// Nothing to do for this notification.
    Skipped(SkipReason),
    /// Oversized object handed to the transform service; the shrunk
    /// version's own notification completes the relay later.
    Deferred,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Connectivity-test envelope.
    TestEvent,
    /// Key outside the image prefix or extension allow-list.
    NotAnImage { key: String },
    /// Source object gone but its archive counterpart exists; a duplicate
    /// delivery already completed the relay.
    AlreadyArchived { key: String },
}
