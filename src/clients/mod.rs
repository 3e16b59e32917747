pub mod graylog;

pub use graylog::{GraylogClient, NO_BODY};
