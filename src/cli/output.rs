//! Console output of the export command
//!
//! Data (JSON, TOML) goes to stdout uncolored so it can be piped; status
//! lines are colored and honor NO_COLOR.

use std::path::Path;

use colored::Colorize;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Echo a rendered document (taxonomy JSON, effective config) verbatim.
pub fn document(text: &str) {
    println!("{}", text);
}

/// Confirm the JSON file was written.
pub fn saved(path: &Path) {
    println!("{} {}", "✓".green(), saved_message(path));
}

fn saved_message(path: &Path) -> String {
    format!("JSON data has been saved to {}", path.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_output_path_when_saved_then_message_names_file() {
        let msg = saved_message(Path::new("data/taxonomyJson/taxonomy_hierarchy.json"));
        assert_eq!(
            msg,
            "JSON data has been saved to data/taxonomyJson/taxonomy_hierarchy.json"
        );
    }
}
