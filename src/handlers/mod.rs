pub mod rest;

pub use rest::{roll_die_handler, roll_table_handler};
