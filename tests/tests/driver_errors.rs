//! Repository failures reach the caller unchanged.

use tests::{fixtures::*, *};

use pretty_assertions::assert_eq;

async fn seeded() -> Test {
    let test = Test::new(models!(post(), video(), comment())).await;
    let opts = SaveOptions::default();

    let post = test.repo("Post").save(new_post("hello"), &opts).await.unwrap();
    test.repo("Comment")
        .save(comment_on(&post, "hi"), &opts)
        .await
        .unwrap();

    test
}

#[tokio::test]
async fn target_fetch_failure_fails_the_read() {
    let test = seeded().await;
    test.fail("Post");

    let err = assert_err!(test.repo("Comment").find(&Filter::all()).await);

    assert!(err.is_driver_operation_failed());
    assert_eq!(err.to_string(), "injected failure for `Post`");
}

#[tokio::test]
async fn owner_query_failure_skips_hydration() {
    let mut test = seeded().await;
    test.fail("Comment");
    test.log.clear();

    let err = assert_err!(test.repo("Comment").find_one(&Filter::all()).await);

    assert!(err.is_driver_operation_failed());
    assert_eq!(test.log.fetches("Post"), 0);
}

#[tokio::test]
async fn children_fetch_failure_fails_the_read() {
    let test = seeded().await;
    test.fail("Comment");

    let err = assert_err!(test.db.first("Post", &Filter::eq("id", 1_i64)).await);
    assert!(err.is_driver_operation_failed());
}

#[tokio::test]
async fn cleanup_failure_aborts_the_save() {
    let gallery = Model::new("Gallery")
        .auto(Auto::Increment)
        .column("name")
        .relation(
            Relation::children("images", ["Image"])
                .has_many()
                .delete_before_update(),
        );
    let image = Model::new("Image")
        .auto(Auto::Increment)
        .column("entityType")
        .column("entityId");

    let mut test = Test::new(models!(gallery, image)).await;
    let opts = SaveOptions::default();

    let repo = test.repo("Gallery");
    let saved = repo
        .save(Record::new("Gallery").with("name", "before"), &opts)
        .await
        .unwrap();

    test.fail("Image");
    test.log.clear();

    let err = assert_err!(repo.save(saved.with("name", "after"), &opts).await);
    assert!(err.is_driver_operation_failed());

    assert!(test.log.operations("Gallery").is_empty());

    let stored = repo
        .inner()
        .find_one(&Filter::eq("id", 1_i64))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.value("name"), &Value::from("before"));
}
