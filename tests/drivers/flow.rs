use blob_quickstart::{errors::DriverError, store::Store};

/// Exercises the blob service operations every `Driver` must support.
///
/// The flow creates containers, uploads, lists, downloads and deletes, and
/// checks the error each driver returns for missing or duplicate resources.
///
/// # Parameters
///
/// - `store`: A `Store` wrapping the driver under test. It must start without
///   any containers.
pub async fn test_driver(store: &Store) {
    assert_unknown_resources(store).await;

    assert_container_lifecycle(store).await;

    assert_upload_and_download(store).await;

    assert_overwrite(store).await;

    assert_delete_removes_blobs(store).await;
}

/// Asserts the errors returned for containers and blobs that were never
/// created.
async fn assert_unknown_resources(store: &Store) {
    let container = store.container("unknown");
    let blob = container.blob("file.txt");

    assert!(
        !container.exists().await.unwrap(),
        "container should not exist"
    );

    assert!(!blob.exists().await.unwrap(), "blob should not exist");

    assert!(matches!(
        container.delete().await,
        Err(DriverError::ResourceNotFound)
    ));

    assert!(matches!(
        container.list_blobs().await,
        Err(DriverError::ResourceNotFound)
    ));

    assert!(matches!(
        blob.download::<Vec<u8>>().await,
        Err(DriverError::ResourceNotFound)
    ));

    // uploading into a missing container
    assert!(matches!(
        blob.upload(b"content").await,
        Err(DriverError::ResourceNotFound)
    ));

    // names that are not valid containers never resolve to anything
    for name in ["..", ".", "/"] {
        let container = store.container(name);
        assert!(!container.exists().await.unwrap());
        assert!(matches!(
            container.delete().await,
            Err(DriverError::ResourceNotFound)
        ));
        assert!(matches!(
            container.list_blobs().await,
            Err(DriverError::ResourceNotFound)
        ));
        assert!(matches!(
            container.blob("file.txt").upload(b"content").await,
            Err(DriverError::ResourceNotFound)
        ));
    }
}

/// Asserts a container can be created once, seen, and deleted.
async fn assert_container_lifecycle(store: &Store) {
    let container = store.create_container("lifecycle").await.unwrap();

    assert!(container.exists().await.unwrap(), "container should exist");
    assert!(
        container.list_blobs().await.unwrap().is_empty(),
        "new container should be empty"
    );

    assert!(matches!(
        store.create_container("lifecycle").await,
        Err(DriverError::AlreadyExists)
    ));

    assert!(container.delete().await.is_ok(), "container should be deleted");
    assert!(
        !container.exists().await.unwrap(),
        "container should not exist after deletion"
    );
}

/// Asserts an uploaded blob is listed and downloads byte for byte.
async fn assert_upload_and_download(store: &Store) {
    let container = store.create_container("transfer").await.unwrap();
    let blob = container.blob("wtfile-1.txt");

    assert!(
        blob.upload("Hello, World!").await.is_ok(),
        "blob should be uploaded"
    );

    assert!(blob.exists().await.unwrap(), "blob should be found");

    assert_eq!(
        container.list_blobs().await.unwrap(),
        vec!["wtfile-1.txt".to_string()],
        "listing should return exactly the uploaded blob"
    );

    assert_eq!(
        blob.download::<String>().await.unwrap(),
        "Hello, World!".to_string(),
        "invalid blob content"
    );

    assert!(!blob.url().unwrap().is_empty());

    container.delete().await.unwrap();
}

/// Asserts a second upload under the same name replaces the content.
async fn assert_overwrite(store: &Store) {
    let container = store.create_container("overwrite").await.unwrap();
    let blob = container.blob("file.txt");

    blob.upload(b"first").await.unwrap();
    blob.upload(b"second").await.unwrap();

    assert_eq!(blob.download::<Vec<u8>>().await.unwrap(), b"second".to_vec());
    assert_eq!(container.list_blobs().await.unwrap().len(), 1);

    container.delete().await.unwrap();
}

/// Asserts deleting a container removes its blobs while other containers
/// stay untouched.
async fn assert_delete_removes_blobs(store: &Store) {
    let foo = store.create_container("foo").await.unwrap();
    let bar = store.create_container("bar").await.unwrap();

    foo.blob("foo-1.txt").upload(b"content").await.unwrap();
    bar.blob("bar-1.txt").upload(b"content").await.unwrap();
    bar.blob("bar-2.txt").upload(b"content").await.unwrap();

    assert!(bar.delete().await.is_ok(), "expected bar to be deleted");

    assert!(
        foo.blob("foo-1.txt").exists().await.unwrap(),
        "foo blob should exist after bar deletion"
    );

    assert!(
        !bar.blob("bar-1.txt").exists().await.unwrap(),
        "bar blob should be gone after bar deletion"
    );

    // a fresh container with the same name starts empty
    let bar = store.create_container("bar").await.unwrap();
    assert!(bar.list_blobs().await.unwrap().is_empty());
}
