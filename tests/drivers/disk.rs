use blob_quickstart::{drivers::disk::Config, StoreConfig};

use super::flow;

#[tokio::test]
async fn disk() {
    let location = tree_fs::from_yaml_str(
        r"
        files:
        ",
    )
    .unwrap();
    let config = Config {
        location: location.clone(),
    };
    let disk_store = StoreConfig::Disk(config).build().await.unwrap();

    flow::test_driver(&disk_store).await;

    // containers map onto directories under the location
    assert!(location.join("foo").join("foo-1.txt").is_file());
    assert!(!location.join("lifecycle").exists());
}
