//! Extract command implementation.

use anyhow::Context;
use anyhow::Result;
use zipwright_core::CancellationToken;
use zipwright_core::ExtractRequest;
use zipwright_core::extract_archive;

use crate::cli::ExtractArgs;

pub fn execute(args: &ExtractArgs, json: bool) -> Result<()> {
    let mut request = ExtractRequest::new(args.archive.clone(), args.output_dir.clone())
        .with_create_destination_dir(args.create_dest_dir)
        .with_on_existing(args.on_existing.into());
    if let Some(password) = &args.password {
        request = request.with_password(password.clone());
    }

    let output = extract_archive(&request, &CancellationToken::new())
        .with_context(|| format!("failed to extract '{}'", args.archive.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!(
            "Extracted {} files to {}",
            output.extracted_files.len(),
            args.output_dir.display()
        );
        for path in &output.extracted_files {
            println!("  {}", path.display());
        }
    }
    Ok(())
}
