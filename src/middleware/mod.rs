pub mod cors;
pub mod logging;
pub mod request_id;
