use declara_core::error::DeclaraError;
use declara_core::render::layout::Layout;
use std::path::PathBuf;

use crate::output;

pub fn run(overrides: Option<PathBuf>) -> Result<(), DeclaraError> {
    let layout = match overrides {
        Some(path) => Layout::from_overrides_file(&path)?,
        None => Layout::default(),
    };
    output::json::print(&layout)
}
