//! Children relations: rows of one or more candidate models point back at
//! the owner.

use tests::{fixtures::*, *};

use pretty_assertions::assert_eq;

fn article() -> Model {
    Model::new("Article")
        .auto(Auto::Increment)
        .column("title")
        .relation(Relation::children("feedback", ["Note", "Review"]).has_many())
        .relation(Relation::children("cover", ["Image"]))
}

/// Same relations, declared in the other order.
fn article_reversed() -> Model {
    Model::new("Article")
        .auto(Auto::Increment)
        .column("title")
        .relation(Relation::children("cover", ["Image"]))
        .relation(Relation::children("feedback", ["Note", "Review"]).has_many())
}

fn pointer(name: &str, body: &str) -> Model {
    Model::new(name)
        .auto(Auto::Increment)
        .column(body)
        .column("entityType")
        .column("entityId")
}

fn pointing_at(model: &str, body: &str, text: &str, article: i64) -> Record {
    Record::new(model)
        .with(body, text)
        .with("entityType", "Article")
        .with("entityId", article)
}

async fn seed(test: &Test) {
    let opts = SaveOptions::default();

    for title in ["one", "two"] {
        test.repo("Article")
            .save(Record::new("Article").with("title", title), &opts)
            .await
            .unwrap();
    }

    let notes = test.repo("Note");
    notes.save(pointing_at("Note", "text", "a", 1), &opts).await.unwrap();
    notes.save(pointing_at("Note", "text", "b", 1), &opts).await.unwrap();

    let reviews = test.repo("Review");
    reviews.save(pointing_at("Review", "stars", "5", 1), &opts).await.unwrap();
    reviews.save(pointing_at("Review", "stars", "2", 2), &opts).await.unwrap();

    test.repo("Image")
        .save(pointing_at("Image", "url", "cover.png", 2), &opts)
        .await
        .unwrap();
}

fn models(article: Model) -> polymorph::db::Builder {
    models!(
        article,
        pointer("Note", "text"),
        pointer("Review", "stars"),
        pointer("Image", "url"),
    )
}

#[tokio::test]
async fn collects_children_across_candidate_types() {
    let test = Test::new(models(article())).await;
    seed(&test).await;

    let one = test
        .repo("Article")
        .find_one(&Filter::eq("id", 1_i64))
        .await
        .unwrap()
        .unwrap();

    let feedback = one.association("feedback").unwrap();
    assert!(feedback.is_many());
    assert_ids_unordered!(feedback.as_many(), ["Note:1", "Note:2", "Review:1"]);

    assert_eq!(one.association("cover"), Some(&Association::none()));

    let two = test
        .repo("Article")
        .find_one(&Filter::eq("id", 2_i64))
        .await
        .unwrap()
        .unwrap();

    assert_ids_unordered!(two.association("feedback").unwrap().as_many(), ["Review:2"]);
    assert_eq!(
        two.association("cover")
            .and_then(Association::as_one)
            .map(|image| image.value("url").clone()),
        Some(Value::from("cover.png"))
    );
}

#[tokio::test]
async fn batches_by_owner_keys_and_owner_type() {
    let mut test = Test::new(models(article())).await;
    seed(&test).await;

    test.log.clear();

    let articles = test.repo("Article").find(&Filter::all()).await.unwrap();
    assert_eq!(articles.len(), 2);

    let expected = Filter::any_of("entityId", [1_i64, 2]).and_eq("entityType", "Article");

    assert_eq!(test.log.operations("Note"), [Operation::Find(expected.clone())]);
    assert_eq!(test.log.operations("Review"), [Operation::Find(expected.clone())]);
    assert_eq!(test.log.operations("Image"), [Operation::Find(expected)]);
}

#[tokio::test]
async fn single_owner_single_child_uses_find_one() {
    let mut test = Test::new(models(article())).await;
    seed(&test).await;

    test.log.clear();

    test.repo("Article")
        .find_one(&Filter::eq("id", 2_i64))
        .await
        .unwrap();

    assert_eq!(
        test.log.operations("Image"),
        [Operation::FindOne(
            Filter::eq("entityId", 2_i64).and_eq("entityType", "Article")
        )]
    );
    // `feedback` is a collection, so it stays a `find` even for one owner.
    assert_eq!(
        test.log.operations("Note"),
        [Operation::Find(
            Filter::any_of("entityId", [2_i64]).and_eq("entityType", "Article")
        )]
    );
}

#[tokio::test]
async fn ignores_children_of_other_owner_types() {
    let test = Test::new(models!(post(), video(), comment())).await;
    let opts = SaveOptions::default();

    // Both get id 1 in their own tables.
    let post = test.repo("Post").save(new_post("hello"), &opts).await.unwrap();
    let video = test.repo("Video").save(new_video("v.mp4"), &opts).await.unwrap();

    let comments = test.repo("Comment");
    comments.save(comment_on(&post, "on post"), &opts).await.unwrap();
    comments.save(comment_on(&video, "on video"), &opts).await.unwrap();

    let post = test
        .repo("Post")
        .find_one(&Filter::eq("id", 1_i64))
        .await
        .unwrap()
        .unwrap();

    let bodies: Vec<_> = post
        .association("comments")
        .unwrap()
        .as_many()
        .iter()
        .map(|comment| comment.value("body").clone())
        .collect();

    assert_eq!(bodies, [Value::from("on post")]);
}

#[tokio::test]
async fn owner_without_children_gets_empty_collection() {
    let test = Test::new(models!(post(), video(), comment())).await;

    test.repo("Post")
        .save(new_post("lonely"), &SaveOptions::default())
        .await
        .unwrap();

    let posts = test.repo("Post").find(&Filter::all()).await.unwrap();

    assert_eq!(posts[0].association("comments"), Some(&Association::Many(vec![])));
}

#[tokio::test]
async fn hydration_is_idempotent() {
    let test = Test::new(models(article())).await;
    seed(&test).await;

    let repo = test.repo("Article");
    let once = repo.find(&Filter::all()).await.unwrap();
    let twice = repo.hydrate(once.clone()).await.unwrap();

    assert_eq!(once, twice);
}

#[tokio::test]
async fn relation_order_does_not_matter() {
    let forward = Test::new(models(article())).await;
    let reversed = Test::new(models(article_reversed())).await;

    seed(&forward).await;
    seed(&reversed).await;

    let forward = forward.repo("Article").find(&Filter::all()).await.unwrap();
    let reversed = reversed.repo("Article").find(&Filter::all()).await.unwrap();

    assert_eq!(forward, reversed);
}

#[tokio::test]
async fn single_cardinality_keeps_first_match() {
    let test = Test::new(models(article())).await;
    seed(&test).await;

    test.repo("Image")
        .save(
            pointing_at("Image", "url", "alt.png", 2),
            &SaveOptions::default(),
        )
        .await
        .unwrap();

    let cover_of = |article: &Record| {
        article
            .association("cover")
            .and_then(Association::as_one)
            .map(|image| image.value("url").clone())
    };

    // Single owner: one `find_one` for the cover.
    let two = test
        .repo("Article")
        .find_one(&Filter::eq("id", 2_i64))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cover_of(&two), Some(Value::from("cover.png")));

    // Several owners: a batched `find` returns both images for article 2.
    let articles = test.repo("Article").find(&Filter::all()).await.unwrap();
    let covers: Vec<_> = articles.iter().map(cover_of).collect();
    assert_eq!(covers, [None, Some(Value::from("cover.png"))]);
}
