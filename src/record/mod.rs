pub mod matcher;
pub mod record_model;
