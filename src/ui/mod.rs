pub mod freq_panel;
pub mod panels;
pub mod table_view;
