pub mod detection_row;
pub mod toast_stack;
