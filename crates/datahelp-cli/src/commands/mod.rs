pub mod build;
pub mod countries;
pub mod history;
pub mod language;
