/// JSON file store tests
/// Tests whole-document reads and rewrites against a real file
use apparel_core::{
    ApparelSize, DataStore, Dataset, InventoryRecord, RecordId, Role, UserAccount, UserId,
};
use apparel_storage::{JsonFileStore, StorageError};
use tempfile::TempDir;

fn sample_dataset() -> Dataset {
    Dataset {
        users: vec![UserAccount {
            id: UserId::new("admin-1"),
            name: "Admin".to_string(),
            email: "admin@example.com".to_string(),
            password_hash: "$2b$10$abcdefghijklmnopqrstuv".to_string(),
            role: Role::Admin,
        }],
        inventory: vec![
            InventoryRecord {
                id: RecordId::new("r1"),
                title: "Linen shirt".to_string(),
                description: Some("Breathable".to_string()),
                code: "P1".to_string(),
                size: ApparelSize::M,
                quantity: 10,
                price: 99.99,
                vendor_id: UserId::new("vendor-1"),
                edited_by: None,
            },
            InventoryRecord {
                id: RecordId::new("r2"),
                title: "Linen shirt".to_string(),
                description: None,
                code: "P1".to_string(),
                size: ApparelSize::XXL,
                quantity: 0,
                price: 104.5,
                vendor_id: UserId::new("vendor-1"),
                edited_by: Some(UserId::new("vendor-1")),
            },
        ],
    }
}

/// Test a missing data file reads as an empty dataset
#[tokio::test]
async fn test_missing_file_is_empty() {
    let temp_dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(temp_dir.path().join("data.json"));

    let data = store.load().await.unwrap();
    assert_eq!(data, Dataset::default());
}

/// Test save then load returns identical records
#[tokio::test]
async fn test_round_trip_preserves_records() {
    let temp_dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(temp_dir.path().join("data.json"));

    let data = sample_dataset();
    store.save_all(&data).await.unwrap();

    let loaded = store.load().await.unwrap();
    assert_eq!(loaded, data);
}

/// Test the on-disk document layout
#[tokio::test]
async fn test_document_layout() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data.json");
    let store = JsonFileStore::new(&path);

    store.save_all(&sample_dataset()).await.unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert!(raw["users"].is_array());
    assert_eq!(raw["users"][0]["password"], "$2b$10$abcdefghijklmnopqrstuv");
    assert_eq!(raw["inventory"][0]["vendorId"], "vendor-1");
    assert_eq!(raw["inventory"][1]["editedBy"], "vendor-1");
}

/// Test every save replaces the whole document
#[tokio::test]
async fn test_save_replaces_document() {
    let temp_dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(temp_dir.path().join("data.json"));

    store.save_all(&sample_dataset()).await.unwrap();

    let mut smaller = sample_dataset();
    smaller.inventory.truncate(1);
    store.save_all(&smaller).await.unwrap();

    let loaded = store.load().await.unwrap();
    assert_eq!(loaded.inventory.len(), 1);
}

/// Test parent directories are created on first save
#[tokio::test]
async fn test_save_creates_parent_directories() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("dir").join("data.json");
    let store = JsonFileStore::new(&path);

    store.save_all(&Dataset::default()).await.unwrap();
    assert!(path.exists());
}

/// Test a document missing one of the arrays still loads
#[tokio::test]
async fn test_partial_document_defaults_missing_arrays() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data.json");
    std::fs::write(&path, r#"{ "users": [] }"#).unwrap();

    let store = JsonFileStore::new(&path);
    let data = store.load().await.unwrap();
    assert!(data.inventory.is_empty());
}

/// Test malformed JSON is reported, not silently replaced
#[tokio::test]
async fn test_malformed_document_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store = JsonFileStore::new(&path);
    let result = store.read().await;
    assert!(matches!(result, Err(StorageError::Malformed { .. })));

    let through_trait = store.load().await;
    assert!(through_trait.unwrap_err().is_internal());
}
