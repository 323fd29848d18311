//! HTTP boundary
//!
//! | Method | Path                                   | Handler          |
//! |--------|----------------------------------------|------------------|
//! | POST   | `/api/backend/start-session`           | `start_session`  |
//! | POST   | `/api/backend/send-command`            | `send_command`   |
//! | GET    | `/api/backend/transcript/{session_id}` | `transcript`     |
//! | POST   | `/api/backend/end-session/{session_id}`| `end_session`    |
//! | POST   | `/api/backend/ask-ai`                  | `ask_ai`         |
//! | GET    | `/api/backend/sessions`                | `list_sessions`  |
//! | GET    | `/api/backend/sessions/{session_id}`   | `get_session`    |
//! | DELETE | `/api/backend/sessions/{session_id}`   | `delete_session` |
//! | GET    | `/health`                              | `health`         |
//!
//! Every API path also accepts a trailing slash.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
