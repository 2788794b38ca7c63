//! Create command implementation.

use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use zipwright_core::BuildOptions;
use zipwright_core::BuildRequest;
use zipwright_core::CancellationToken;
use zipwright_core::Destination;
use zipwright_core::SourceKind;
use zipwright_core::build_archive;

use crate::cli::CreateArgs;

pub fn execute(args: &CreateArgs, json: bool) -> Result<()> {
    let Some(file_name) = args.output.file_name().map(|n| n.to_string_lossy().to_string())
    else {
        bail!("output path '{}' has no file name", args.output.display());
    };
    let directory = match args.output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::path::PathBuf::from("."),
    };

    let mut options = BuildOptions::new()
        .with_flatten_folders(args.flatten)
        .with_rename_duplicates(args.rename_duplicates)
        .with_zip64(args.zip64.into())
        .with_on_existing(args.on_existing.into())
        .with_create_destination_dir(args.create_dest_dir)
        .with_remove_sources(args.remove_sources)
        .with_error_if_no_files(!args.allow_empty);
    if let Some(password) = &args.password {
        options = options.with_password(password.clone());
    }
    if let Some(level) = args.compression_level {
        options = options.with_compression_level(level);
    }

    let request = BuildRequest::new(
        SourceKind::Directory {
            root: args.source.clone(),
            file_mask: args.mask.clone(),
            include_subfolders: args.recursive,
        },
        Destination {
            directory,
            file_name,
        },
    )
    .with_options(options);

    let output = build_archive(&request, &CancellationToken::new())
        .with_context(|| format!("failed to create '{}'", args.output.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if output.file_count == 0 {
        println!("No files matched; no archive written");
    } else {
        println!(
            "Created {} with {} entries",
            output.file_path.display(),
            output.file_count
        );
        for name in &output.archived_files {
            println!("  {name}");
        }
    }
    Ok(())
}
