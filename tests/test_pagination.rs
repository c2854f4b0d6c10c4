mod common;

use common::{make_article, setup_with, MockInventoryApi};
use medstock::domain::error::DomainError;
use std::sync::atomic::Ordering;
use std::sync::Arc;

fn api_with_articles(n: usize) -> Arc<MockInventoryApi> {
    let api = Arc::new(MockInventoryApi::new());
    let mut articles = api.articles.lock().unwrap();
    for i in 0..n {
        articles.push(make_article(
            &format!("art-{i}"),
            &format!("SKU-{i:04}"),
            &format!("Article {i}"),
            10,
            None,
        ));
    }
    drop(articles);
    api
}

#[tokio::test]
async fn fetches_every_page_sequentially() {
    let api = api_with_articles(250);
    let ms = setup_with(api.clone());

    let all = ms.fetch_all_articles(5).await.unwrap();
    assert_eq!(all.len(), 250);
    // 250 articles at 100 per page is exactly three requests.
    assert_eq!(api.list_calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn single_page_needs_one_request() {
    let api = api_with_articles(20);
    let ms = setup_with(api.clone());

    let all = ms.fetch_all_articles(5).await.unwrap();
    assert_eq!(all.len(), 20);
    assert_eq!(api.list_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn hitting_the_cap_fails_loudly() {
    let api = api_with_articles(250);
    let ms = setup_with(api);

    match ms.fetch_all_articles(2).await {
        Err(DomainError::PageCapExceeded {
            fetched,
            total_pages,
            cap,
        }) => {
            assert_eq!(fetched, 2);
            assert_eq!(total_pages, 3);
            assert_eq!(cap, 2);
        }
        other => panic!("expected page-cap error, got {other:?}"),
    }
}

#[tokio::test]
async fn zero_cap_is_invalid() {
    let api = api_with_articles(10);
    let ms = setup_with(api);
    assert!(matches!(
        ms.fetch_all_articles(0).await,
        Err(DomainError::Validation(_))
    ));
}
