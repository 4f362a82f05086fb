pub mod allocation_view;
pub mod footer;
pub mod help;
pub mod theme;
