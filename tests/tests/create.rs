use tests::{fixtures::*, *};

use pretty_assertions::assert_eq;

#[tokio::test]
async fn declared_associations_survive_create() {
    let test = Test::new(models!(post(), video(), comment())).await;
    let opts = SaveOptions::default();

    let post = test.repo("Post").save(new_post("hello"), &opts).await.unwrap();

    let partial = Record::new("Comment")
        .with("body", "hi")
        .with("bogus", 1_i64)
        .with_association("commentable", post.clone())
        .with_association("author", Record::new("User"));

    let created = test.repo("Comment").create(partial);

    assert_eq!(created.model(), "Comment");
    assert_eq!(created.value("body"), &Value::from("hi"));
    assert_none!(created.get("bogus"));
    assert_none!(created.association("author"));
    assert_eq!(
        created.association("commentable").and_then(Association::as_one),
        Some(&post)
    );

    // Creating does not touch storage.
    assert!(test.log.operations("Comment").is_empty());

    let saved = test.repo("Comment").save(created, &opts).await.unwrap();

    assert_eq!(saved.value("entityType"), &Value::from("Post"));
    assert_eq!(saved.value("entityId"), post.value("id"));
}

#[tokio::test]
async fn children_association_survives_create() {
    let test = Test::new(models!(post(), video(), comment())).await;

    let comments = vec![Record::new("Comment").with("body", "a")];

    let created = test.repo("Post").create(
        Record::new("Post")
            .with("title", "hello")
            .with_association("comments", comments.clone()),
    );

    assert_eq!(
        created.association("comments"),
        Some(&Association::Many(comments))
    );
}

#[tokio::test]
async fn plain_model_create_keeps_columns_only() {
    let tag = Model::new("Tag").auto(Auto::Increment).column("label");
    let test = Test::new(models!(tag)).await;

    let created = test.repo("Tag").create(
        Record::new("Tag")
            .with("label", "rust")
            .with_association("owner", Record::new("User")),
    );

    assert_eq!(created, Record::new("Tag").with("label", "rust"));
}
