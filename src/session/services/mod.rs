//! Application services for session handshakes.

mod handshake;

pub use handshake::{
    Handshake, HandshakeRequest, SessionService, SessionServiceError, SessionServiceResult,
};
