use serde::Serialize;

/// Observable lifecycle of a strategy request.
///
/// `content` exists only on `Complete` and `message` only on `Failed`; the
/// enum shape makes any other combination unrepresentable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RequestState {
    #[default]
    Idle,
    Generating,
    Complete {
        content: String,
    },
    Failed {
        message: String,
    },
}

impl RequestState {
    pub fn status(&self) -> &'static str {
        match self {
            RequestState::Idle => "idle",
            RequestState::Generating => "generating",
            RequestState::Complete { .. } => "complete",
            RequestState::Failed { .. } => "failed",
        }
    }

    pub fn content(&self) -> Option<&str> {
        match self {
            RequestState::Complete { content } => Some(content),
            _ => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            RequestState::Failed { message } => Some(message),
            _ => None,
        }
    }

    pub fn is_generating(&self) -> bool {
        matches!(self, RequestState::Generating)
    }
}
