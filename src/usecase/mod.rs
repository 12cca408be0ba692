//! UseCase layer.
//!
//! Business logic invoked by the UI layer; each usecase holds its domain
//! collaborators behind `Arc<dyn Trait>` and knows nothing about the
//! transport.

pub mod authenticate_connection;
pub mod error;
pub mod join_room;
pub mod leave_room;
pub mod send_location;
pub mod send_message;

pub use authenticate_connection::{AuthenticateConnectionUseCase, issue_token};
pub use error::{JoinError, SendError};
pub use join_room::{HISTORY_REPLAY_LIMIT, JoinOutcome, JoinRoomUseCase};
pub use leave_room::{LeaveOutcome, LeaveRoomUseCase};
pub use send_location::{OutboundLocation, SendLocationUseCase};
pub use send_message::{OutboundChat, SendMessageUseCase};
