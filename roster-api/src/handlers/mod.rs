pub mod contacts;
pub mod duplicates;
