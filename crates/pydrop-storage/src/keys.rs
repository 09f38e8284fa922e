//! Shared key generation for storage backends.
//!
//! Key format: `{owner_id}/{file_id}_{file_name}`. The random file id makes
//! keys globally unique; the owner id namespaces them; the original name
//! keeps blobs inspectable.

use uuid::Uuid;

/// Generate a storage key for the given owner, file id, and display name.
///
/// All backends must use this format for consistency. `file_name` is
/// expected to be sanitized by the caller before key generation.
pub fn generate_storage_key(owner_id: &str, file_id: Uuid, file_name: &str) -> String {
    format!("{}/{}_{}", owner_id, file_id, file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_embeds_owner_id_and_name() {
        let file_id = Uuid::new_v4();
        let key = generate_storage_key("user-123", file_id, "main.py");
        assert!(key.starts_with("user-123/"));
        assert!(key.ends_with("_main.py"));
        assert!(key.contains(&file_id.to_string()));
    }

    #[test]
    fn keys_for_same_name_differ_by_file_id() {
        let a = generate_storage_key("user-123", Uuid::new_v4(), "main.py");
        let b = generate_storage_key("user-123", Uuid::new_v4(), "main.py");
        assert_ne!(a, b);
    }
}
