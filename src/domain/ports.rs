use crate::domain::model::{Menu, MenuId, Payment, PaymentId, Restaurant, RestaurantId};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Option<Vec<u8>>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Persistence for restaurants. Constraint checks (non-null and unique name,
/// persisted payments) happen here, not on the record.
#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    /// Inserts when the id is unset or unknown, updates otherwise. Menus are saved
    /// with the restaurant, menus no longer listed are deleted and the payment join
    /// rows are replaced by the current payment set.
    async fn save(&self, restaurant: Restaurant) -> Result<Restaurant>;
    async fn find_by_id(&self, id: RestaurantId) -> Result<Option<Restaurant>>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Restaurant>>;
    async fn find_by_name_containing(&self, fragment: &str) -> Result<Vec<Restaurant>>;
    async fn find_all(&self) -> Result<Vec<Restaurant>>;
    /// Deletes the restaurant, its menus and its join rows. Returns false when no
    /// such restaurant exists.
    async fn delete_by_id(&self, id: RestaurantId) -> Result<bool>;
    async fn delete_all(&self) -> Result<()>;
}

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn save(&self, payment: Payment) -> Result<Payment>;
    async fn find_by_id(&self, id: PaymentId) -> Result<Option<Payment>>;
    async fn find_all(&self) -> Result<Vec<Payment>>;
    /// Rejected while any restaurant still uses the payment.
    async fn delete_by_id(&self, id: PaymentId) -> Result<bool>;
}

#[async_trait]
pub trait MenuRepository: Send + Sync {
    async fn find_by_id(&self, id: MenuId) -> Result<Option<Menu>>;
    async fn find_all(&self) -> Result<Vec<Menu>>;
}
