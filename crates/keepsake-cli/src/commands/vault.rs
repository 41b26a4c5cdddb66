//! Vault commands: encrypted put/get and listing.

use std::path::Path;

use keepsake_core::{KeepsakeError, Vault};

use crate::app::AppContext;
use crate::cli::{FilesArgs, GetArgs, PutArgs};
use crate::commands::match_object;
use crate::output::{format_bytes, print_objects};
use crate::ui::{print_success, prompt::resolve_passphrase, Spinner, UiContext};

pub fn handle_put(ctx: &AppContext, ui: &UiContext, args: &PutArgs) -> anyhow::Result<()> {
    let path = Path::new(&args.path);
    let bytes = std::fs::read(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;

    let name = match args.name.clone() {
        Some(name) => name,
        None => path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| anyhow::anyhow!("Cannot derive a name from {}", path.display()))?,
    };

    let content_type = args.content_type.clone().unwrap_or_else(|| {
        mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string()
    });

    // Prompted with confirmation: a typo here would lock the file forever.
    let passphrase = resolve_passphrase(true)?;

    let store = ctx.store()?;
    let vault_folder = ctx.config()?.store.vault_folder.clone();

    let spinner = Spinner::new(ui, &format!("Encrypting and uploading '{}'", name));
    let id = ctx.block_on(async {
        let vault = Vault::open(&store, &vault_folder).await?;
        vault.put(&name, &content_type, &bytes, &passphrase).await
    })?;
    spinner.finish();

    print_success(
        ui,
        &format!(
            "Uploaded '{}' ({}, {}) as id {}",
            name,
            content_type,
            format_bytes(bytes.len() as u64),
            id
        ),
    );
    Ok(())
}

pub fn handle_get(ctx: &AppContext, ui: &UiContext, args: &GetArgs) -> anyhow::Result<()> {
    let store = ctx.store()?;
    let vault_folder = ctx.config()?.store.vault_folder.clone();

    // Resolve the stored object before asking for a passphrase, so a
    // typoed name fails fast.
    let (vault, target) = ctx.block_on(async {
        let vault = Vault::open(&store, &vault_folder).await?;
        let stored = vault.list().await?;
        let target = match_object(&stored, &args.file).cloned().ok_or_else(|| {
            KeepsakeError::NotFound(format!("No stored file named '{}'", args.file))
        })?;
        Ok::<_, KeepsakeError>((vault, target))
    })?;

    let passphrase = resolve_passphrase(false)?;

    let spinner = Spinner::new(ui, &format!("Downloading and decrypting '{}'", target.name));
    let file = ctx.block_on(vault.get(&target, &passphrase))?;
    spinner.finish();

    let out = args.out.clone().unwrap_or_else(|| file.name.clone());
    std::fs::write(&out, &file.bytes)
        .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", out, e))?;

    print_success(
        ui,
        &format!(
            "Decrypted '{}' ({}, {}) -> {}",
            file.name,
            file.content_type,
            format_bytes(file.bytes.len() as u64),
            out
        ),
    );
    Ok(())
}

pub fn handle_files(ctx: &AppContext, ui: &UiContext, args: &FilesArgs) -> anyhow::Result<()> {
    let store = ctx.store()?;
    let vault_folder = ctx.config()?.store.vault_folder.clone();

    let spinner = Spinner::new(ui, "Listing vault files");
    let stored = ctx.block_on(async {
        let vault = Vault::open(&store, &vault_folder).await?;
        vault.list().await
    })?;
    spinner.finish();

    print_objects(&stored, args.json, ctx.quiet())
}
