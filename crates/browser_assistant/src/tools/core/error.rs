use thiserror::Error;

/// The closed set of failures a tool call can produce. Every variant is
/// converted into a normal error envelope at the connection boundary;
/// none of them terminates the session.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool \"{0}\" not found")]
    NotFound(String),

    /// The modal-state gate rejected the call. The message already carries
    /// the rendered list of current modal states.
    #[error("{0}")]
    ModalState(String),

    #[error("Invalid arguments for tool \"{tool}\": {message}")]
    InvalidArguments { tool: String, message: String },

    /// The handler or its deferred action failed. Reported with the
    /// stringified cause; the target's state is not rolled back.
    #[error("{0}")]
    Action(anyhow::Error),

    /// A second call arrived while one was still executing. The session
    /// supports a single in-flight execution; callers must not pipeline.
    #[error("Another tool call is still in progress")]
    Busy,
}
