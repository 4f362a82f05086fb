pub mod pvdisplay;
pub mod sample;
pub mod source;
