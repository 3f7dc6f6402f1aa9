pub mod box_model;
pub mod table;
