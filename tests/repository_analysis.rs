mod common;

use marketwise::domain::entities::{
    DataTreatment, Segment, SegmentationInsights, SegmentationRequest,
};
use marketwise::domain::repositories::AnalysisRepository;
use marketwise::infrastructure::persistence::SqliteAnalysisRepository;
use sqlx::SqlitePool;
use std::sync::Arc;

fn segment(name: &str, size: i64) -> Segment {
    Segment {
        name: name.to_string(),
        size,
        avg_purchase_value: 99.5,
        purchase_frequency: 2.0,
        description: format!("{name} customers"),
    }
}

fn request(csv: &str, clusters: i64) -> SegmentationRequest {
    SegmentationRequest {
        cluster_data: csv.to_string(),
        data_treatment: DataTreatment {
            normalize: false,
            exclude_nulls: true,
            group_categories: true,
        },
        number_of_clusters: clusters,
    }
}

fn insights(names: &[&str]) -> SegmentationInsights {
    SegmentationInsights {
        textual_insights: format!("{} segments", names.len()),
        segments: names.iter().map(|n| segment(n, 10)).collect(),
    }
}

async fn setup() -> (SqlitePool, SqliteAnalysisRepository) {
    let pool = common::test_pool().await;
    let repo = SqliteAnalysisRepository::new(Arc::new(pool.clone()));
    (pool, repo)
}

#[tokio::test]
async fn test_save_and_load_keeps_segment_order() {
    let (_pool, repo) = setup().await;

    let id = repo
        .save(
            &request("a,b\n1,2", 3),
            &insights(&["Zeta", "Alpha", "Mid"]),
        )
        .await
        .unwrap();

    let loaded = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(loaded, insights(&["Zeta", "Alpha", "Mid"]));
}

#[tokio::test]
async fn test_save_stores_treatment_flags() {
    let (pool, repo) = setup().await;

    let id = repo
        .save(&request("a,b\n1,2", 1), &insights(&["Only"]))
        .await
        .unwrap();

    let (normalize, exclude_nulls, group_categories): (bool, bool, bool) = sqlx::query_as(
        "SELECT data_treatment_normalize, data_treatment_exclude_nulls, data_treatment_group_categories FROM analyses WHERE id = ?",
    )
    .bind(id)
    .fetch_one(&pool)
    .await
    .unwrap();

    assert!(!normalize);
    assert!(exclude_nulls);
    assert!(group_categories);
}

#[tokio::test]
async fn test_list_newest_first_with_snippet() {
    let (_pool, repo) = setup().await;

    let long_header = "x".repeat(80);
    let first = repo
        .save(&request("id,spend\n1,2", 2), &insights(&["A", "B"]))
        .await
        .unwrap();
    let second = repo
        .save(
            &request(&format!("{long_header}\n1"), 1),
            &insights(&["C"]),
        )
        .await
        .unwrap();

    let analyses = repo.list().await.unwrap();

    assert_eq!(analyses.len(), 2);
    assert_eq!(analyses[0].id, second);
    assert_eq!(analyses[1].id, first);
    assert_eq!(analyses[1].original_data_snippet, "id,spend...");
    assert_eq!(analyses[1].number_of_clusters, 2);
    assert_eq!(
        analyses[0].original_data_snippet,
        format!("{}...", "x".repeat(50))
    );
}

#[tokio::test]
async fn test_find_missing_and_count() {
    let (_pool, repo) = setup().await;

    assert!(repo.find_by_id(1).await.unwrap().is_none());
    assert_eq!(repo.count().await.unwrap(), 0);

    repo.save(&request("a\n1", 1), &insights(&["One"]))
        .await
        .unwrap();
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_deleting_analysis_cascades_to_segments() {
    let (pool, repo) = setup().await;

    let id = repo
        .save(&request("a\n1", 2), &insights(&["One", "Two"]))
        .await
        .unwrap();

    sqlx::query("DELETE FROM analyses WHERE id = ?")
        .bind(id)
        .execute(&pool)
        .await
        .unwrap();

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM segments")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}
