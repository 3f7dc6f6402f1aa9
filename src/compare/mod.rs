pub mod box_compare;
