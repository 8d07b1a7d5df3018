//! A service for interacting with items.

use super::item_repository::{Item, NewItem};
use crate::infra::{
    error::{ApiResult, ClientError},
    repository::{Record, Repository},
};
use tracing::instrument;

/// Lists all items.
#[instrument(skip(repository))]
pub async fn list_items<R>(repository: &R) -> ApiResult<Vec<Item>>
where
    R: Repository<Item> + ?Sized,
{
    repository.find_all().await
}

/// Creates a new item.
#[instrument(skip(repository))]
pub async fn create_item<R>(repository: &R, new_item: NewItem) -> ApiResult<Item>
where
    R: Repository<Item> + ?Sized,
{
    repository.create(new_item).await
}

/// Replaces the name, price and category of an item.
///
/// The item is looked up before the changes are inspected, so an unknown id is
/// reported even when the changes failed to decode.
#[instrument(skip(repository))]
pub async fn update_item<R>(
    repository: &R,
    id: i32,
    changes: Result<NewItem, ClientError>,
) -> ApiResult<Item>
where
    R: Repository<Item> + ?Sized,
{
    let mut item = repository
        .find_by_id(id)
        .await?
        .ok_or(ClientError::NotFound(Item::KIND))?;
    item.apply(changes?);
    repository.save(&item).await
}

/// Deletes an item.
#[instrument(skip(repository))]
pub async fn delete_item<R>(repository: &R, id: i32) -> ApiResult<()>
where
    R: Repository<Item> + ?Sized,
{
    let item = repository
        .find_by_id(id)
        .await?
        .ok_or(ClientError::NotFound(Item::KIND))?;
    repository.soft_delete(&item).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{error::ApiError, memory::MemoryRepository, repository::MockRepository};
    use chrono::{TimeZone, Utc};
    use mockall::predicate::eq;

    fn paracetamol() -> NewItem {
        NewItem {
            name: "Paracetamol".to_string(),
            unit_price: 2.5,
            item_category: "Analgesic".to_string(),
        }
    }

    fn stored_item() -> Item {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        Item::from_new(7, created, paracetamol())
    }

    fn is_not_found<T>(result: &ApiResult<T>) -> bool {
        matches!(
            result,
            Err(ApiError::ClientError(ClientError::NotFound("Item")))
        )
    }

    #[tokio::test]
    async fn create_item_delegates_to_repository() {
        let mut repo = MockRepository::<Item>::new();
        let expected = stored_item();
        let returned = expected.clone();
        repo.expect_create()
            .with(eq(paracetamol()))
            .return_once(move |_| Ok(returned));

        let item = create_item(&repo, paracetamol()).await.unwrap();

        assert_eq!(expected, item);
    }

    #[tokio::test]
    async fn update_of_unknown_item_is_not_found_and_saves_nothing() {
        let mut repo = MockRepository::<Item>::new();
        repo.expect_find_by_id()
            .with(eq(999))
            .return_once(|_| Ok(None));
        repo.expect_save().never();

        let result = update_item(&repo, 999, Ok(paracetamol())).await;

        assert!(is_not_found(&result));
    }

    #[tokio::test]
    async fn lookup_happens_before_the_changes_are_checked() {
        let mut repo = MockRepository::<Item>::new();
        repo.expect_find_by_id().return_once(|_| Ok(None));

        let changes = Err(ClientError::BadRequest("bad body".to_string()));
        let result = update_item(&repo, 999, changes).await;

        assert!(is_not_found(&result));
    }

    #[tokio::test]
    async fn undecodable_changes_to_a_known_item_are_a_bad_request() {
        let mut repo = MockRepository::<Item>::new();
        repo.expect_find_by_id()
            .return_once(|_| Ok(Some(stored_item())));
        repo.expect_save().never();

        let changes = Err(ClientError::BadRequest("bad body".to_string()));
        let result = update_item(&repo, 7, changes).await;

        assert!(matches!(
            result,
            Err(ApiError::ClientError(ClientError::BadRequest(_)))
        ));
    }

    #[tokio::test]
    async fn update_overwrites_exactly_the_editable_fields() {
        let original = stored_item();
        let mut repo = MockRepository::<Item>::new();
        let found = original.clone();
        repo.expect_find_by_id()
            .with(eq(7))
            .return_once(move |_| Ok(Some(found)));
        let expected_created_at = original.created_at;
        repo.expect_save()
            .withf(move |item: &Item| {
                item.id == 7
                    && item.created_at == expected_created_at
                    && item.name == "Ibuprofen"
                    && item.unit_price == 4.0
                    && item.item_category == "NSAID"
            })
            .return_once(|item| Ok(item.clone()));

        let changes = NewItem {
            name: "Ibuprofen".to_string(),
            unit_price: 4.0,
            item_category: "NSAID".to_string(),
        };
        let item = update_item(&repo, 7, Ok(changes)).await.unwrap();

        assert_eq!(original.id, item.id);
        assert_eq!(original.created_at, item.created_at);
    }

    #[tokio::test]
    async fn delete_of_unknown_item_is_not_found() {
        let mut repo = MockRepository::<Item>::new();
        repo.expect_find_by_id().return_once(|_| Ok(None));
        repo.expect_soft_delete().never();

        let result = delete_item(&repo, 999).await;

        assert!(is_not_found(&result));
    }

    #[tokio::test]
    async fn created_item_is_listed_once_with_a_fresh_id() {
        let repo = MemoryRepository::<Item>::new();
        let first = create_item(&repo, paracetamol()).await.unwrap();
        let second = create_item(&repo, paracetamol()).await.unwrap();

        let items = list_items(&repo).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(1, items.iter().filter(|item| item.id == second.id).count());
        let listed = items.iter().find(|item| item.id == second.id).unwrap();
        assert_eq!(
            ("Paracetamol", 2.5, "Analgesic"),
            (
                listed.name.as_str(),
                listed.unit_price,
                listed.item_category.as_str()
            )
        );
    }

    #[tokio::test]
    async fn deleted_item_is_gone_for_good() {
        let repo = MemoryRepository::<Item>::new();
        let item = create_item(&repo, paracetamol()).await.unwrap();

        delete_item(&repo, item.id).await.unwrap();

        assert!(list_items(&repo).await.unwrap().is_empty());
        assert!(is_not_found(
            &update_item(&repo, item.id, Ok(paracetamol())).await
        ));
        assert!(is_not_found(&delete_item(&repo, item.id).await));
    }
}
