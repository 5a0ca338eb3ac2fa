mod common;

use chrono::Utc;
use common::test_services;
use minipress::domain::error::DomainError;
use minipress::domain::post::publication_date;
use minipress::domain::user::User;
use minipress::presentation::dto::PostForm;

fn post_form(title: &str) -> PostForm {
    PostForm {
        title: title.to_string(),
        subtitle: "A subtitle".to_string(),
        body: "Some body text".to_string(),
        img_url: "https://example.com/cover.jpg".to_string(),
        author: String::new(),
    }
}

async fn admin(auth: &minipress::application::auth_service::AuthService) -> User {
    auth.register("admin@x.com", "pw", "Admin").await.unwrap().0
}

#[tokio::test]
async fn create_post_stamps_author_and_date() {
    let (auth, content) = test_services();
    let admin = admin(&auth).await;

    let post = content.create_post(&admin, post_form("Hello")).await.unwrap();

    assert_eq!(post.author, "Admin");
    assert_eq!(post.author_id, admin.id);
    assert_eq!(post.published_on, publication_date(Utc::now()));
}

#[tokio::test]
async fn duplicate_title_persists_no_new_row() {
    let (auth, content) = test_services();
    let admin = admin(&auth).await;

    content.create_post(&admin, post_form("Hello")).await.unwrap();
    let err = content
        .create_post(&admin, post_form("Hello"))
        .await
        .unwrap_err();

    let DomainError::Validation(fields) = err else {
        panic!("expected validation error");
    };
    assert_eq!(fields[0].field, "title");
    assert_eq!(content.list_posts().await.unwrap().len(), 1);
}

#[tokio::test]
async fn blank_post_fields_are_reported_per_field() {
    let (auth, content) = test_services();
    let admin = admin(&auth).await;

    let form = PostForm {
        title: String::new(),
        subtitle: String::new(),
        body: "text".to_string(),
        img_url: String::new(),
        author: String::new(),
    };
    let err = content.create_post(&admin, form).await.unwrap_err();

    let DomainError::Validation(fields) = err else {
        panic!("expected validation error");
    };
    let names: Vec<_> = fields.iter().map(|f| f.field).collect();
    assert_eq!(names, vec!["title", "subtitle", "img_url"]);
}

#[tokio::test]
async fn edit_overwrites_fields_but_not_date_or_id() {
    let (auth, content) = test_services();
    let admin = admin(&auth).await;

    let created = content.create_post(&admin, post_form("Hello")).await.unwrap();

    let mut form = post_form("Hello again");
    form.author = "Ghostwriter".to_string();
    let edited = content.edit_post(created.id, form).await.unwrap();

    assert_eq!(edited.id, created.id);
    assert_eq!(edited.title, "Hello again");
    assert_eq!(edited.author, "Ghostwriter");
    assert_eq!(edited.published_on, created.published_on);
}

#[tokio::test]
async fn edit_of_missing_post_is_not_found() {
    let (auth, content) = test_services();
    let _ = admin(&auth).await;

    let mut form = post_form("Hello");
    form.author = "Admin".to_string();
    let err = content.edit_post(99, form).await.unwrap_err();
    assert!(matches!(err, DomainError::PostNotFound(99)));
}

#[tokio::test]
async fn delete_removes_post_and_cascades_comments() {
    let (auth, content) = test_services();
    let admin_user = admin(&auth).await;
    let (reader, _) = auth.register("reader@x.com", "pw", "Reader").await.unwrap();

    let post = content
        .create_post(&admin_user, post_form("Hello"))
        .await
        .unwrap();
    content
        .add_comment(&reader, post.id, "nice post")
        .await
        .unwrap();

    content.delete_post(post.id).await.unwrap();

    assert!(content.list_posts().await.unwrap().is_empty());
    assert!(matches!(
        content.get_post(post.id).await.unwrap_err(),
        DomainError::PostNotFound(_)
    ));
    assert!(content.comments_for(post.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_of_missing_post_is_not_found() {
    let (_, content) = test_services();
    assert!(matches!(
        content.delete_post(7).await.unwrap_err(),
        DomainError::PostNotFound(7)
    ));
}

#[tokio::test]
async fn comment_on_missing_post_is_not_found() {
    let (auth, content) = test_services();
    let admin_user = admin(&auth).await;

    let err = content
        .add_comment(&admin_user, 42, "hello?")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::PostNotFound(42)));
    assert!(content.comments_for(42).await.unwrap().is_empty());
}

#[tokio::test]
async fn empty_comment_is_rejected() {
    let (auth, content) = test_services();
    let admin_user = admin(&auth).await;
    let post = content
        .create_post(&admin_user, post_form("Hello"))
        .await
        .unwrap();

    let err = content
        .add_comment(&admin_user, post.id, "   ")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
    assert!(content.comments_for(post.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn comments_carry_the_commenter_display_name() {
    let (auth, content) = test_services();
    let admin_user = admin(&auth).await;
    let (reader, _) = auth.register("reader@x.com", "pw", "Reader").await.unwrap();

    let post = content
        .create_post(&admin_user, post_form("Hello"))
        .await
        .unwrap();
    content
        .add_comment(&reader, post.id, "first!")
        .await
        .unwrap();

    let comments = content.comments_for(post.id).await.unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].author_name, "Reader");
    assert_eq!(comments[0].body, "first!");
}

#[tokio::test]
async fn list_posts_preserves_storage_order() {
    let (auth, content) = test_services();
    let admin_user = admin(&auth).await;

    content
        .create_post(&admin_user, post_form("First"))
        .await
        .unwrap();
    content
        .create_post(&admin_user, post_form("Second"))
        .await
        .unwrap();

    let titles: Vec<_> = content
        .list_posts()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.title)
        .collect();
    assert_eq!(titles, vec!["First", "Second"]);
}
