//! Integration tests for the SurrealDB store
//!
//! Every test opens its own in-memory database, so they can run in parallel.

use lifeally::pipeline::Profile;
use lifeally::storage::{
    BaseStore, Pagination, PredictionResult, ProfileMemoryStore, QueryFilter, QueryStore,
    StorageError, UserProfile, UserQuery, UserRole, UserStore,
    surreal_storage::{EmbeddedStorage, SurrealStorage},
};

async fn create_test_storage() -> Result<EmbeddedStorage, Box<dyn std::error::Error>> {
    let client = surrealdb::Surreal::new::<surrealdb::engine::local::Mem>(()).await?;
    let storage = SurrealStorage::new(client, "test", "lifeally_test").await?;
    Ok(storage)
}

fn user(name: &str, email: &str) -> UserProfile {
    UserProfile::new(name, email, "$2b$12$hash", UserRole::User)
}

#[tokio::test]
async fn test_health_and_metadata() {
    let storage = create_test_storage()
        .await
        .expect("Failed to create test storage");

    assert!(storage.health_check().await.expect("Health check failed"));

    storage
        .create_user(user("Ada", "ada@example.com"))
        .await
        .expect("Failed to create user");

    let metadata = storage
        .get_metadata()
        .await
        .expect("Failed to get metadata");
    assert_eq!(metadata["type"], "surrealdb");
    assert_eq!(metadata["records"]["user"], 1);
    assert_eq!(metadata["records"]["user_query"], 0);

    storage.clear().await.expect("Failed to clear storage");
    let metadata = storage.get_metadata().await.unwrap();
    assert_eq!(metadata["records"]["user"], 0);
}

#[tokio::test]
async fn test_user_crud() {
    let storage = create_test_storage().await.unwrap();

    let created = storage
        .create_user(UserProfile::new(
            "Grace",
            "grace@example.com",
            "hash",
            UserRole::Admin,
        ))
        .await
        .expect("Failed to create user");
    assert!(created.is_admin());
    assert!(created.is_active);

    let fetched = storage
        .get_user(&created.id)
        .await
        .unwrap()
        .expect("User should exist");
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.name, "Grace");
    assert_eq!(fetched.role, UserRole::Admin);

    let by_email = storage
        .get_user_by_email("grace@example.com")
        .await
        .unwrap()
        .expect("Lookup by email should succeed");
    assert_eq!(by_email.id, created.id);
    assert!(
        storage
            .get_user_by_email("nobody@example.com")
            .await
            .unwrap()
            .is_none()
    );

    let mut changed = fetched.clone();
    changed.name = "Grace H.".to_string();
    changed.is_active = false;
    let updated = storage.update_user(changed).await.unwrap();
    assert_eq!(updated.name, "Grace H.");
    assert!(!updated.is_active);
    assert_eq!(updated.email, "grace@example.com");

    assert!(storage.get_user("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let storage = create_test_storage().await.unwrap();

    storage
        .create_user(user("First", "dup@example.com"))
        .await
        .unwrap();
    let err = storage
        .create_user(user("Second", "dup@example.com"))
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::AlreadyExists(_)));
}

#[tokio::test]
async fn test_user_pagination() {
    let storage = create_test_storage().await.unwrap();

    for i in 0..5 {
        storage
            .create_user(user(&format!("User {}", i), &format!("user{}@example.com", i)))
            .await
            .unwrap();
    }

    let first = storage.list_users(Pagination::new(1, 2)).await.unwrap();
    assert_eq!(first.total, 5);
    assert_eq!(first.items.len(), 2);
    assert_eq!(first.page, 1);
    assert_eq!(first.per_page, 2);

    let last = storage.list_users(Pagination::new(3, 2)).await.unwrap();
    assert_eq!(last.items.len(), 1);

    let beyond = storage.list_users(Pagination::new(4, 2)).await.unwrap();
    assert!(beyond.items.is_empty());
    assert_eq!(beyond.total, 5);
}

#[tokio::test]
async fn test_queries_and_results() {
    let storage = create_test_storage().await.unwrap();
    let owner = storage
        .create_user(user("Owner", "owner@example.com"))
        .await
        .unwrap();

    let anonymous = storage
        .create_query(UserQuery::new(None, "career", "Should I do a PhD?"))
        .await
        .unwrap();
    assert!(anonymous.user_id.is_none());

    let owned = storage
        .create_query(UserQuery::new(
            Some(owner.id.clone()),
            "finance",
            "Can I afford a car?",
        ))
        .await
        .unwrap();
    assert_eq!(owned.user_id.as_deref(), Some(owner.id.as_str()));

    let fetched = storage.get_query(&owned.id).await.unwrap().unwrap();
    assert_eq!(fetched.query_text, "Can I afford a car?");

    let all = storage
        .list_queries(QueryFilter::default(), Pagination::default())
        .await
        .unwrap();
    assert_eq!(all.total, 2);

    let finance = storage
        .list_queries(
            QueryFilter {
                domain: Some("finance".to_string()),
                ..Default::default()
            },
            Pagination::default(),
        )
        .await
        .unwrap();
    assert_eq!(finance.total, 1);
    assert_eq!(finance.items[0].id, owned.id);

    let by_owner = storage
        .list_queries(
            QueryFilter {
                user_id: Some(owner.id.clone()),
                domain: Some("career".to_string()),
            },
            Pagination::default(),
        )
        .await
        .unwrap();
    assert_eq!(by_owner.total, 0);

    assert!(storage.latest_result(&owned.id).await.unwrap().is_none());

    storage
        .create_result(PredictionResult::new(owned.id.as_str(), "first advice"))
        .await
        .unwrap();
    let second = storage
        .create_result(PredictionResult::new(owned.id.as_str(), "second advice"))
        .await
        .unwrap();

    let results = storage.list_results(&owned.id).await.unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].result_text, "first advice");

    let latest = storage.latest_result(&owned.id).await.unwrap().unwrap();
    assert_eq!(latest.id, second.id);
}

#[tokio::test]
async fn test_profile_memory_upsert() {
    let storage = create_test_storage().await.unwrap();
    let owner = storage
        .create_user(user("Owner", "owner@example.com"))
        .await
        .unwrap();

    assert!(
        storage
            .get_profile_memory(&owner.id, "health")
            .await
            .unwrap()
            .is_none()
    );

    let profile: Profile = [("age", "40"), ("cholesterol", "210")].into_iter().collect();
    let stored = storage
        .upsert_profile_memory(&owner.id, "health", &profile)
        .await
        .unwrap();
    assert_eq!(stored.profile, profile);

    let replacement: Profile = [("age", "41")].into_iter().collect();
    storage
        .upsert_profile_memory(&owner.id, "health", &replacement)
        .await
        .unwrap();

    let memory = storage
        .get_profile_memory(&owner.id, "health")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(memory.profile, replacement);
    assert_eq!(memory.user_id, owner.id);
    assert_eq!(memory.domain, "health");

    assert!(
        storage
            .get_profile_memory(&owner.id, "finance")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_delete_user_cascades() {
    let storage = create_test_storage().await.unwrap();
    let doomed = storage
        .create_user(user("Doomed", "doomed@example.com"))
        .await
        .unwrap();
    let survivor = storage
        .create_user(user("Survivor", "survivor@example.com"))
        .await
        .unwrap();

    let doomed_query = storage
        .create_query(UserQuery::new(Some(doomed.id.clone()), "health", "Am I ok?"))
        .await
        .unwrap();
    storage
        .create_result(PredictionResult::new(doomed_query.id.as_str(), "advice"))
        .await
        .unwrap();
    let kept_query = storage
        .create_query(UserQuery::new(Some(survivor.id.clone()), "health", "And me?"))
        .await
        .unwrap();
    storage
        .create_result(PredictionResult::new(kept_query.id.as_str(), "advice"))
        .await
        .unwrap();

    let profile: Profile = [("age", "50")].into_iter().collect();
    storage
        .upsert_profile_memory(&doomed.id, "health", &profile)
        .await
        .unwrap();

    assert!(storage.delete_user(&doomed.id).await.unwrap());
    assert!(!storage.delete_user(&doomed.id).await.unwrap());

    assert!(storage.get_user(&doomed.id).await.unwrap().is_none());
    assert!(storage.get_query(&doomed_query.id).await.unwrap().is_none());
    assert!(storage.list_results(&doomed_query.id).await.unwrap().is_empty());
    assert!(
        storage
            .get_profile_memory(&doomed.id, "health")
            .await
            .unwrap()
            .is_none()
    );

    assert!(storage.get_user(&survivor.id).await.unwrap().is_some());
    assert_eq!(storage.list_results(&kept_query.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_combined_filters_count_matching_queries() {
    let storage = create_test_storage().await.unwrap();
    let owner = storage
        .create_user(user("Owner", "owner@example.com"))
        .await
        .unwrap();
    let other = storage
        .create_user(user("Other", "other@example.com"))
        .await
        .unwrap();

    for text in ["Should I switch jobs?", "Is a master's worth it?", "Am I due a raise?"] {
        storage
            .create_query(UserQuery::new(Some(owner.id.clone()), "career", text))
            .await
            .unwrap();
    }
    storage
        .create_query(UserQuery::new(Some(owner.id.clone()), "health", "Am I sleeping enough?"))
        .await
        .unwrap();
    storage
        .create_query(UserQuery::new(Some(other.id.clone()), "career", "Should I quit?"))
        .await
        .unwrap();

    let filter = QueryFilter {
        domain: Some("career".to_string()),
        user_id: Some(owner.id.clone()),
    };

    let first = storage
        .list_queries(filter.clone(), Pagination::new(1, 2))
        .await
        .unwrap();
    assert_eq!(first.total, 3);
    assert_eq!(first.items.len(), 2);

    let second = storage
        .list_queries(filter.clone(), Pagination::new(2, 2))
        .await
        .unwrap();
    assert_eq!(second.total, 3);
    assert_eq!(second.items.len(), 1);
    assert!(
        second
            .items
            .iter()
            .all(|q| q.domain == "career" && q.user_id.as_deref() == Some(owner.id.as_str()))
    );

    let beyond = storage
        .list_queries(filter, Pagination::new(usize::MAX, 2))
        .await
        .unwrap();
    assert_eq!(beyond.total, 3);
    assert!(beyond.items.is_empty());
}
