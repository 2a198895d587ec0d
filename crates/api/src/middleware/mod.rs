//! Request middleware.
//!
//! - [`request_log::log_request`] -- times each handler call, attaches the
//!   request's cancellation context, and emits one structured log event.

pub mod request_log;
