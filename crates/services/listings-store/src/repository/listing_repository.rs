//! Listing repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, QuerySelect, Set,
};

use super::entities::listing::{self, Entity as ListingEntity};
use common::{AppError, AppResult, PageParams};
use domain::{now_micros, Listing, NewListing};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Listing repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// List listings, newest first, honoring limit/offset pagination.
    async fn list(&self, page: PageParams) -> AppResult<Vec<Listing>>;

    /// Find a listing by id.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Listing>>;

    /// Insert a new listing; the store assigns id and timestamps.
    async fn create(&self, new: NewListing) -> AppResult<Listing>;
}

/// Concrete implementation of ListingRepository on SeaORM.
pub struct ListingStore {
    db: DatabaseConnection,
}

impl ListingStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ListingRepository for ListingStore {
    async fn list(&self, page: PageParams) -> AppResult<Vec<Listing>> {
        let models = ListingEntity::find()
            .order_by_desc(listing::Column::CreatedAt)
            .limit(page.limit())
            .offset(page.offset())
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        models.into_iter().map(model_to_listing).collect()
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Listing>> {
        let model = ListingEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        model.map(model_to_listing).transpose()
    }

    async fn create(&self, new: NewListing) -> AppResult<Listing> {
        let now = now_micros();
        let model = listing::ActiveModel {
            user_id: Set(new.user_id),
            listing_type: Set(new.listing_type.to_string()),
            price: Set(new.price),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(AppError::from)?;

        model_to_listing(model)
    }
}

/// Convert database model to domain entity.
fn model_to_listing(model: listing::Model) -> AppResult<Listing> {
    let listing_type = model.listing_type.parse().map_err(|_| {
        AppError::internal(format!(
            "unexpected listing_type in row {}: {}",
            model.id, model.listing_type
        ))
    })?;

    Ok(Listing {
        id: model.id,
        user_id: model.user_id,
        listing_type,
        price: model.price,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}
