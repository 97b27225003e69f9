//! Terminal output helpers shared by the command modules

use std::fmt::Display;

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};

pub fn success(msg: impl Display) {
    println!("{}", msg.to_string().green());
}

pub fn warning(msg: impl Display) {
    println!("{}", msg.to_string().yellow());
}

pub fn info(msg: impl Display) {
    println!("{}", msg.to_string().cyan());
}

pub fn error(msg: impl Display) {
    eprintln!("{}", msg.to_string().red());
}

/// Condensed table with the given header row
pub fn table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.to_vec());
    table
}
