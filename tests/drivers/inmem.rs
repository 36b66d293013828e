use blob_quickstart::StoreConfig;

use super::flow;

#[tokio::test]
async fn inmem() {
    let inmem_store = StoreConfig::InMem().build().await.unwrap();

    flow::test_driver(&inmem_store).await;
}
