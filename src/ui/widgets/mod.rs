// src/ui/widgets/mod.rs

pub mod alert_popup;
pub mod footer;
pub mod header;
pub mod results_view;
pub mod scanning_view;
pub mod submission_view;
