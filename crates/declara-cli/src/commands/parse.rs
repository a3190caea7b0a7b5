use std::path::PathBuf;

use super::load_order;
use crate::output;

pub fn run(
    input_file: PathBuf,
    output_format: &str,
    output_file: Option<PathBuf>,
) -> Result<(), declara_core::error::DeclaraError> {
    let record = load_order(&input_file)?;

    match output_file {
        Some(path) => {
            // Always write JSON when saving to file
            output::json::write(&record, &path)?;
            eprintln!(
                "Parsed order with {} item(s), written to {}",
                record.items.len(),
                path.display()
            );
            if record.recipient.name.is_empty() {
                eprintln!("  warning: no recipient name found");
            }
        }
        None => match output_format {
            "json" => output::json::print(&record)?,
            _ => output::table::print(&record),
        },
    }

    Ok(())
}
