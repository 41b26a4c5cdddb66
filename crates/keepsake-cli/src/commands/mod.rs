//! Command handlers.

pub mod gallery;
pub mod misc;
pub mod vault;

use keepsake_core::RemoteObject;

/// Find a listing entry by exact name, falling back to id match.
pub(crate) fn match_index(objects: &[RemoteObject], needle: &str) -> Option<usize> {
    objects
        .iter()
        .position(|o| o.name == needle)
        .or_else(|| objects.iter().position(|o| o.id.as_str() == needle))
}

pub(crate) fn match_object<'a>(
    objects: &'a [RemoteObject],
    needle: &str,
) -> Option<&'a RemoteObject> {
    match_index(objects, needle).map(|i| &objects[i])
}

#[cfg(test)]
mod tests {
    use super::*;
    use keepsake_core::ObjectId;

    fn object(id: &str, name: &str) -> RemoteObject {
        RemoteObject {
            id: ObjectId::new(id),
            name: name.to_string(),
            mime_type: "image/jpeg".to_string(),
            size: None,
            modified: None,
        }
    }

    #[test]
    fn test_match_by_name_wins_over_id() {
        // An object whose name collides with another's id: names win.
        let objects = vec![object("cat.jpg", "first"), object("id-2", "cat.jpg")];
        let found = match_object(&objects, "cat.jpg").expect("match");
        assert_eq!(found.id.as_str(), "id-2");
    }

    #[test]
    fn test_match_by_id() {
        let objects = vec![object("id-1", "a.jpg"), object("id-2", "b.jpg")];
        let found = match_object(&objects, "id-2").expect("match");
        assert_eq!(found.name, "b.jpg");
    }

    #[test]
    fn test_no_match() {
        let objects = vec![object("id-1", "a.jpg")];
        assert!(match_object(&objects, "missing").is_none());
        assert_eq!(match_index(&objects, "missing"), None);
    }
}
