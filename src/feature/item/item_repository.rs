//! Types and queries for storing and loading items.

use crate::infra::{
    database::PgRepository,
    error::{ApiResult, ClientError},
    repository::{Record, Repository},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{instrument, Instrument};
use utoipa::ToSchema;

/// A new item, or the replacement fields of an existing one.
///
/// Missing fields decode to their defaults; only a field of the wrong type is an error.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct NewItem {
    /// The item's name.
    #[schema(example = "Paracetamol")]
    pub name: String,
    /// The price of one unit.
    #[schema(example = 2.5)]
    pub unit_price: f64,
    /// The item's category.
    #[schema(example = "Analgesic")]
    pub item_category: String,
}

/// An existing item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Item {
    /// The item's id.
    #[schema(example = 1)]
    pub id: i32,
    /// The item's name.
    #[schema(example = "Paracetamol")]
    pub name: String,
    /// The price of one unit.
    #[schema(example = 2.5)]
    pub unit_price: f64,
    /// The item's category.
    #[schema(example = "Analgesic")]
    pub item_category: String,
    /// When the item was created.
    pub created_at: DateTime<Utc>,
    /// When the item was last changed.
    pub updated_at: DateTime<Utc>,
    /// When the item was deleted. Never set on an item the API returns.
    #[serde(skip)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Item {
    /// Replaces the client-editable fields, leaving id and timestamps alone.
    pub fn apply(&mut self, changes: NewItem) {
        self.name = changes.name;
        self.unit_price = changes.unit_price;
        self.item_category = changes.item_category;
    }
}

impl Record for Item {
    type New = NewItem;
    const KIND: &'static str = "Item";

    fn id(&self) -> i32 {
        self.id
    }

    fn from_new(id: i32, now: DateTime<Utc>, new: NewItem) -> Self {
        Item {
            id,
            name: new.name,
            unit_price: new.unit_price,
            item_category: new.item_category,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    fn assign(&mut self, from: &Self) {
        self.name = from.name.clone();
        self.unit_price = from.unit_price;
        self.item_category = from.item_category.clone();
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    fn mark_deleted(&mut self, now: DateTime<Utc>) {
        self.deleted_at = Some(now);
    }
}

#[async_trait]
impl Repository<Item> for PgRepository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> ApiResult<Vec<Item>> {
        tracing::info!("Listing items");
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT * FROM items
            WHERE deleted_at IS NULL
            ORDER BY id
            "#,
        )
        .fetch_all(self.db())
        .instrument(tracing::info_span!("fetch_all"))
        .await?;
        tracing::info!("Listed {} items", items.len());
        Ok(items)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i32) -> ApiResult<Option<Item>> {
        tracing::info!("Reading item");
        let item = sqlx::query_as::<_, Item>(
            r#"
            SELECT * FROM items
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(self.db())
        .instrument(tracing::info_span!("fetch_optional"))
        .await?;
        tracing::info!("Found item: {:?}", item);
        Ok(item)
    }

    #[instrument(skip(self))]
    async fn create(&self, new_item: NewItem) -> ApiResult<Item> {
        tracing::info!("Creating item {:?}", new_item);
        let item = sqlx::query_as::<_, Item>(
            r#"
            INSERT INTO items (name, unit_price, item_category)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(new_item.name)
        .bind(new_item.unit_price)
        .bind(new_item.item_category)
        .fetch_one(self.db())
        .await?;
        tracing::info!("Created item {:?}", item);
        Ok(item)
    }

    #[instrument(skip(self))]
    async fn save(&self, item: &Item) -> ApiResult<Item> {
        tracing::info!("Saving item");
        let item = sqlx::query_as::<_, Item>(
            r#"
            UPDATE items
            SET name = $2, unit_price = $3, item_category = $4, updated_at = now()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(item.id)
        .bind(&item.name)
        .bind(item.unit_price)
        .bind(&item.item_category)
        .fetch_optional(self.db())
        .await?
        .ok_or(ClientError::NotFound(Item::KIND))?;
        tracing::info!("Saved item {:?}", item);
        Ok(item)
    }

    #[instrument(skip(self))]
    async fn soft_delete(&self, item: &Item) -> ApiResult<()> {
        tracing::info!("Deleting item");
        let rows = sqlx::query(
            r#"
            UPDATE items
            SET deleted_at = now(), updated_at = now()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(item.id)
        .execute(self.db())
        .await?;

        if rows.rows_affected() == 0 {
            tracing::warn!("Item not found");
            return Err(ClientError::NotFound(Item::KIND))?;
        }

        tracing::info!("Deleted item");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{database::DbPool, error::ApiError};

    fn paracetamol() -> NewItem {
        NewItem {
            name: "Paracetamol".to_string(),
            unit_price: 2.5,
            item_category: "Analgesic".to_string(),
        }
    }

    #[test]
    fn partial_payload_decodes_with_defaults() {
        let item: NewItem = serde_json::from_str(r#"{"name": "Foo", "colour": "red"}"#).unwrap();
        assert_eq!(
            NewItem {
                name: "Foo".to_string(),
                ..NewItem::default()
            },
            item
        );
    }

    #[test]
    fn deletion_marker_is_not_serialized() {
        let now = Utc::now();
        let mut item = Item::from_new(1, now, paracetamol());
        item.mark_deleted(now);
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("deleted_at").is_none());
        assert_eq!(1, json["id"]);
        assert_eq!(2.5, json["unit_price"]);
    }

    #[test]
    fn assign_copies_only_editable_fields() {
        let now = Utc::now();
        let mut stored = Item::from_new(1, now, paracetamol());
        let mut changed = stored.clone();
        changed.apply(NewItem {
            name: "Ibuprofen".to_string(),
            unit_price: 3.0,
            item_category: "NSAID".to_string(),
        });
        changed.id = 7;
        changed.created_at = DateTime::<Utc>::default();
        changed.mark_deleted(now);

        stored.assign(&changed);
        assert_eq!("Ibuprofen", stored.name);
        assert_eq!(3.0, stored.unit_price);
        assert_eq!("NSAID", stored.item_category);
        assert_eq!((1, now, None), (stored.id, stored.created_at, stored.deleted_at));
    }

    #[sqlx::test]
    async fn create_then_list_returns_item(db: DbPool) {
        let pg = PgRepository::new(db);
        let repo: &dyn Repository<Item> = &pg;
        let item = repo.create(paracetamol()).await.unwrap();

        assert_eq!("Paracetamol", item.name);
        assert_eq!(None, item.deleted_at);

        let items = repo.find_all().await.unwrap();
        assert_eq!(vec![item], items);
    }

    #[sqlx::test]
    async fn soft_deleted_item_is_kept_but_hidden(db: DbPool) {
        let pg = PgRepository::new(db.clone());
        let repo: &dyn Repository<Item> = &pg;
        let item = repo.create(paracetamol()).await.unwrap();
        repo.soft_delete(&item).await.unwrap();

        assert_eq!(None, repo.find_by_id(item.id).await.unwrap());
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM items WHERE deleted_at IS NOT NULL")
                .fetch_one(&db)
                .await
                .unwrap();
        assert_eq!(1, count);

        let saved = repo.save(&item).await;
        assert!(matches!(
            saved,
            Err(ApiError::ClientError(ClientError::NotFound("Item")))
        ));
    }

    #[sqlx::test]
    async fn save_keeps_id_and_creation_time(db: DbPool) {
        let pg = PgRepository::new(db);
        let repo: &dyn Repository<Item> = &pg;
        let mut item = repo.create(paracetamol()).await.unwrap();
        item.apply(NewItem {
            name: "Ibuprofen".to_string(),
            unit_price: 3.0,
            item_category: "NSAID".to_string(),
        });

        let saved = repo.save(&item).await.unwrap();
        assert_eq!(item.id, saved.id);
        assert_eq!(item.created_at, saved.created_at);
        assert_eq!("Ibuprofen", saved.name);
    }
}
