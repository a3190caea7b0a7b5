use declara_core::error::DeclaraError;
use declara_core::render::layout::Layout;
use declara_core::render::{AddressStyle, DeclarationRenderer, MAX_ITEMS};
use std::path::PathBuf;

use super::load_order;

pub struct GenerateArgs {
    pub input_file: PathBuf,
    pub template: PathBuf,
    pub layout: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub truncate_addresses: bool,
}

pub fn run(args: GenerateArgs) -> Result<(), DeclaraError> {
    let layout = match &args.layout {
        Some(path) => Layout::from_overrides_file(path)?,
        None => Layout::default(),
    };
    let style = if args.truncate_addresses {
        AddressStyle::Truncate
    } else {
        AddressStyle::Wrap
    };
    let renderer = DeclarationRenderer::new(layout).with_address_style(style);

    let record = load_order(&args.input_file)?;

    let Some(pdf) = renderer.render_file(&record, &args.template) else {
        return Err(DeclaraError::TemplateMissing(args.template));
    };

    let out = args.out.unwrap_or_else(|| {
        let original = args
            .input_file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        PathBuf::from(declara_core::suggested_filename(&original, &record))
    });
    std::fs::write(&out, pdf)?;

    eprintln!("Sender:    {}", record.sender.name);
    eprintln!("Recipient: {}", record.recipient.name);
    eprintln!("Items:     {}", record.items.len());
    if record.items.len() > MAX_ITEMS {
        eprintln!(
            "  warning: only the first {MAX_ITEMS} of {} items fit on the form",
            record.items.len()
        );
    }
    eprintln!("Declaration written to {}", out.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::record;

    #[test]
    fn test_missing_template_is_single_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("pedido.json");
        std::fs::write(&input, serde_json::to_string(&record()).unwrap()).unwrap();
        let out = dir.path().join("out.pdf");

        let err = run(GenerateArgs {
            input_file: input,
            template: dir.path().join("missing.pdf"),
            layout: None,
            out: Some(out.clone()),
            truncate_addresses: false,
        })
        .unwrap_err();

        assert!(matches!(err, DeclaraError::TemplateMissing(_)));
        assert!(err
            .to_string()
            .starts_with("declaration template not found or unusable: "));
        assert!(!out.exists());
    }
}
