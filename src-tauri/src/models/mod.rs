pub mod detect_types;
pub mod view_types;
