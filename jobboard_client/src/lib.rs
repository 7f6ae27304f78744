//! Client side of the job board: the http api client, the state machines
//! behind the job listing and the submission form, and the toast queue that
//! both report to.

pub mod api;
pub mod form;
pub mod format;
pub mod http;
pub mod listing;
pub mod toast;
