//! Folder and image browsing over the remote store.
//!
//! The gallery is a thin facade: folder and image listings go straight
//! to the store, image bytes are served through the bounded `MediaCache`
//! the gallery owns, and favoriting is a server-side copy into a
//! find-or-create favorites folder.

use tracing::debug;

use crate::cache::MediaCache;
use crate::error::Result;
use crate::store::{ListFilter, ObjectId, ObjectStore, RemoteObject};

/// Folder images are copied into when favorited.
pub const DEFAULT_FAVORITES_FOLDER: &str = "Favorites";

/// Browsing facade over an object store and a media cache.
pub struct Gallery<'a, S: ObjectStore + ?Sized> {
    store: &'a S,
    cache: MediaCache,
    favorites_folder: String,
}

impl<'a, S: ObjectStore + ?Sized> Gallery<'a, S> {
    pub fn new(store: &'a S, cache: MediaCache, favorites_folder: impl Into<String>) -> Self {
        Self {
            store,
            cache,
            favorites_folder: favorites_folder.into(),
        }
    }

    /// Every folder the credential can see, name-ordered.
    pub async fn folders(&self) -> Result<Vec<RemoteObject>> {
        self.store.list_folders().await
    }

    /// Images inside a folder, name-ordered.
    pub async fn images(&self, folder: &ObjectId) -> Result<Vec<RemoteObject>> {
        self.store
            .list_children(folder, ListFilter::ImagesOnly)
            .await
    }

    /// Image bytes, served from cache when possible.
    pub async fn image(&mut self, id: &ObjectId) -> Result<Vec<u8>> {
        if let Some(bytes) = self.cache.get(id) {
            return Ok(bytes.to_vec());
        }

        let bytes = self.store.download(id).await?;
        self.cache.insert(id.clone(), bytes.clone());
        Ok(bytes)
    }

    /// Warm the cache for upcoming images (e.g. lightbox neighbors).
    ///
    /// Best-effort: a failed download only costs the prefetch, never the
    /// browsing operation that requested it.
    pub async fn prefetch(&mut self, ids: &[ObjectId]) {
        for id in ids {
            if self.cache.contains(id) {
                continue;
            }
            match self.store.download(id).await {
                Ok(bytes) => self.cache.insert(id.clone(), bytes),
                Err(e) => debug!(id = %id, error = %e, "prefetch skipped"),
            }
        }
    }

    /// Copy an image into the favorites folder, creating the folder on
    /// first use.
    pub async fn favorite(&self, id: &ObjectId) -> Result<ObjectId> {
        let favorites = self
            .store
            .find_or_create_folder(&self.favorites_folder)
            .await?;
        self.store.copy(id, &favorites).await
    }

    /// Delete an object from the store. Cached bytes for it are dropped
    /// lazily by TTL; a deleted image is simply never requested again.
    pub async fn delete(&self, id: &ObjectId) -> Result<()> {
        self.store.delete(id).await
    }

    pub fn cache(&self) -> &MediaCache {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CachePolicy;
    use crate::store::MemoryStore;

    async fn seeded_store() -> (MemoryStore, ObjectId, Vec<ObjectId>) {
        let store = MemoryStore::new();
        let folder = store.find_or_create_folder("Trip").await.unwrap();
        let mut ids = Vec::new();
        for name in ["a.jpg", "b.jpg", "c.jpg"] {
            let id = store
                .upload(&folder, name, name.as_bytes(), "image/jpeg")
                .await
                .unwrap();
            ids.push(id);
        }
        (store, folder, ids)
    }

    #[tokio::test]
    async fn test_images_lists_only_images() {
        let (store, folder, _) = seeded_store().await;
        store
            .upload(&folder, "notes.txt", b"text", "text/plain")
            .await
            .unwrap();

        let gallery = Gallery::new(&store, MediaCache::new(CachePolicy::default()), "Favorites");
        let images = gallery.images(&folder).await.unwrap();
        assert_eq!(images.len(), 3);
        assert!(images.iter().all(|i| i.is_image()));
    }

    #[tokio::test]
    async fn test_image_caches_downloads() {
        let (store, _, ids) = seeded_store().await;
        let mut gallery =
            Gallery::new(&store, MediaCache::new(CachePolicy::default()), "Favorites");

        let bytes = gallery.image(&ids[0]).await.unwrap();
        assert_eq!(bytes, b"a.jpg");
        assert!(gallery.cache().contains(&ids[0]));

        // Served from cache even after the object disappears remotely.
        store.delete(&ids[0]).await.unwrap();
        let bytes = gallery.image(&ids[0]).await.unwrap();
        assert_eq!(bytes, b"a.jpg");
    }

    #[tokio::test]
    async fn test_prefetch_is_best_effort() {
        let (store, _, ids) = seeded_store().await;
        let mut gallery =
            Gallery::new(&store, MediaCache::new(CachePolicy::default()), "Favorites");

        let missing = ObjectId::new("gone");
        gallery
            .prefetch(&[ids[1].clone(), missing, ids[2].clone()])
            .await;

        assert!(gallery.cache().contains(&ids[1]));
        assert!(gallery.cache().contains(&ids[2]));
        assert_eq!(gallery.cache().len(), 2);
    }

    #[tokio::test]
    async fn test_favorite_copies_into_folder() {
        let (store, _, ids) = seeded_store().await;
        let gallery = Gallery::new(&store, MediaCache::new(CachePolicy::default()), "Favorites");

        let copy_id = gallery.favorite(&ids[0]).await.unwrap();
        assert_ne!(copy_id, ids[0]);

        let favorites = store.find_or_create_folder("Favorites").await.unwrap();
        let children = store
            .list_children(&favorites, ListFilter::ImagesOnly)
            .await
            .unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].name, "a.jpg");
    }

    #[tokio::test]
    async fn test_delete_removes_remote_object() {
        let (store, folder, ids) = seeded_store().await;
        let gallery = Gallery::new(&store, MediaCache::new(CachePolicy::default()), "Favorites");

        gallery.delete(&ids[0]).await.unwrap();
        let images = store
            .list_children(&folder, ListFilter::ImagesOnly)
            .await
            .unwrap();
        assert_eq!(images.len(), 2);
    }
}
