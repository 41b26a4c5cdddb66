//! Gallery commands: browse folders, list and fetch images, delete,
//! favorite.

use keepsake_core::{
    DriveStore, Gallery, KeepsakeError, MediaCache, ObjectId, ObjectStore, RemoteObject,
};

use crate::app::AppContext;
use crate::cli::{DeleteArgs, FavoriteArgs, FetchArgs, FoldersArgs, ImagesArgs};
use crate::commands::match_index;
use crate::output::{format_bytes, print_objects};
use crate::ui::{print_cancelled, print_success, prompt::prompt_confirm, Spinner, UiContext};

fn gallery_for<'a>(
    ctx: &AppContext,
    store: &'a DriveStore,
) -> anyhow::Result<Gallery<'a, DriveStore>> {
    let config = ctx.config()?;
    Ok(Gallery::new(
        store,
        MediaCache::new(ctx.cache_policy()?),
        config.store.favorites_folder.clone(),
    ))
}

async fn resolve_folder<S: ObjectStore + ?Sized>(
    gallery: &Gallery<'_, S>,
    needle: &str,
) -> anyhow::Result<RemoteObject> {
    let folders = gallery.folders().await?;
    match_index(&folders, needle)
        .map(|i| folders[i].clone())
        .ok_or_else(|| {
            anyhow::Error::new(KeepsakeError::NotFound(format!(
                "No folder named '{}'",
                needle
            )))
        })
}

async fn resolve_image<S: ObjectStore + ?Sized>(
    gallery: &Gallery<'_, S>,
    folder: &RemoteObject,
    needle: &str,
) -> anyhow::Result<(Vec<RemoteObject>, usize)> {
    let images = gallery.images(&folder.id).await?;
    let index = match_index(&images, needle).ok_or_else(|| {
        anyhow::Error::new(KeepsakeError::NotFound(format!(
            "No image named '{}' in folder '{}'",
            needle, folder.name
        )))
    })?;
    Ok((images, index))
}

pub fn handle_folders(ctx: &AppContext, ui: &UiContext, args: &FoldersArgs) -> anyhow::Result<()> {
    let store = ctx.store()?;
    let gallery = gallery_for(ctx, &store)?;

    let spinner = Spinner::new(ui, "Listing folders");
    let folders = ctx.block_on(gallery.folders())?;
    spinner.finish();

    print_objects(&folders, args.json, ctx.quiet())
}

pub fn handle_images(ctx: &AppContext, ui: &UiContext, args: &ImagesArgs) -> anyhow::Result<()> {
    let store = ctx.store()?;
    let gallery = gallery_for(ctx, &store)?;

    let spinner = Spinner::new(ui, "Listing images");
    let images = ctx.block_on(async {
        let folder = resolve_folder(&gallery, &args.folder).await?;
        gallery.images(&folder.id).await.map_err(anyhow::Error::new)
    })?;
    spinner.finish();

    print_objects(&images, args.json, ctx.quiet())
}

pub fn handle_fetch(ctx: &AppContext, ui: &UiContext, args: &FetchArgs) -> anyhow::Result<()> {
    let store = ctx.store()?;
    let mut gallery = gallery_for(ctx, &store)?;

    let spinner = Spinner::new(ui, &format!("Fetching '{}'", args.image));
    let (target, bytes) = ctx.block_on(async {
        let folder = resolve_folder(&gallery, &args.folder).await?;
        let (images, index) = resolve_image(&gallery, &folder, &args.image).await?;
        let target = images[index].clone();

        let bytes = gallery.image(&target.id).await?;

        // Warm the cache for the lightbox neighbors on request.
        if args.prefetch {
            let mut neighbors: Vec<ObjectId> = Vec::new();
            if index > 0 {
                neighbors.push(images[index - 1].id.clone());
            }
            if index + 1 < images.len() {
                neighbors.push(images[index + 1].id.clone());
            }
            gallery.prefetch(&neighbors).await;
        }

        Ok::<_, anyhow::Error>((target, bytes))
    })?;
    spinner.finish();

    let out = args.out.clone().unwrap_or_else(|| target.name.clone());
    std::fs::write(&out, &bytes)
        .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", out, e))?;

    print_success(
        ui,
        &format!("Saved {} ({})", out, format_bytes(bytes.len() as u64)),
    );
    Ok(())
}

pub fn handle_delete(ctx: &AppContext, ui: &UiContext, args: &DeleteArgs) -> anyhow::Result<()> {
    let store = ctx.store()?;
    let gallery = gallery_for(ctx, &store)?;

    let (folder, target) = ctx.block_on(async {
        let folder = resolve_folder(&gallery, &args.folder).await?;
        let (images, index) = resolve_image(&gallery, &folder, &args.image).await?;
        Ok::<_, anyhow::Error>((folder, images[index].clone()))
    })?;

    if !args.yes {
        let proceed = prompt_confirm(
            &format!("Delete '{}' from '{}'?", target.name, folder.name),
            false,
        )?;
        if !proceed {
            print_cancelled(ui, "Delete");
            return Ok(());
        }
    }

    let spinner = Spinner::new(ui, &format!("Deleting '{}'", target.name));
    ctx.block_on(gallery.delete(&target.id))?;
    spinner.finish();

    print_success(ui, &format!("Deleted '{}'", target.name));
    Ok(())
}

pub fn handle_favorite(
    ctx: &AppContext,
    ui: &UiContext,
    args: &FavoriteArgs,
) -> anyhow::Result<()> {
    let store = ctx.store()?;
    let gallery = gallery_for(ctx, &store)?;
    let favorites_folder = ctx.config()?.store.favorites_folder.clone();

    let spinner = Spinner::new(ui, &format!("Favoriting '{}'", args.image));
    let (target, copy_id) = ctx.block_on(async {
        let folder = resolve_folder(&gallery, &args.folder).await?;
        let (images, index) = resolve_image(&gallery, &folder, &args.image).await?;
        let target = images[index].clone();
        let copy_id = gallery.favorite(&target.id).await?;
        Ok::<_, anyhow::Error>((target, copy_id))
    })?;
    spinner.finish();

    print_success(
        ui,
        &format!(
            "Copied '{}' into '{}' (id {})",
            target.name, favorites_folder, copy_id
        ),
    );
    Ok(())
}
