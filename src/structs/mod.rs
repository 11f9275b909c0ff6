pub mod drink_entry;
pub mod profile;
