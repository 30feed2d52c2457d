use crate::adapters::memory::{
    InMemoryStore, MenuRow, PaymentRow, RestaurantPaymentRow, RestaurantRow, Tables,
};
use crate::domain::ports::Storage;
use crate::utils::error::{CrudError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Every table of an [`InMemoryStore`] as one JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub saved_at: DateTime<Utc>,
    pub next_id: i64,
    pub restaurants: Vec<RestaurantRow>,
    pub menus: Vec<MenuRow>,
    pub payments: Vec<PaymentRow>,
    pub restaurantpayments: Vec<RestaurantPaymentRow>,
}

impl InMemoryStore {
    pub async fn snapshot(&self) -> Snapshot {
        let tables = self.tables().read().await;
        Snapshot {
            saved_at: Utc::now(),
            next_id: tables.next_id,
            restaurants: tables.restaurants.values().cloned().collect(),
            menus: tables.menus.values().cloned().collect(),
            payments: tables.payments.values().cloned().collect(),
            restaurantpayments: tables.restaurant_payments.iter().copied().collect(),
        }
    }

    /// Rebuilds a store from a snapshot. Menus and join rows pointing at rows that
    /// are not in the snapshot are dropped; duplicate restaurant names or payment
    /// types reject the whole snapshot.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self> {
        unique("restaurants", "name", snapshot.restaurants.iter().map(|r| r.name.as_str()))?;
        unique("payments", "type", snapshot.payments.iter().map(|p| p.payment_type.as_str()))?;

        let mut tables = Tables {
            next_id: snapshot.next_id,
            ..Tables::default()
        };

        for row in snapshot.restaurants {
            tables.next_id = tables.next_id.max(row.restaurantid);
            tables.restaurants.insert(row.restaurantid, row);
        }
        for row in snapshot.payments {
            tables.next_id = tables.next_id.max(row.paymentid);
            tables.payments.insert(row.paymentid, row);
        }
        for row in snapshot.menus {
            if !tables.restaurants.contains_key(&row.restaurantid) {
                tracing::warn!(menu = row.menuid, "Dropping menu without restaurant");
                continue;
            }
            tables.next_id = tables.next_id.max(row.menuid);
            tables.menus.insert(row.menuid, row);
        }
        for join in snapshot.restaurantpayments {
            if tables.restaurants.contains_key(&join.restaurantid)
                && tables.payments.contains_key(&join.paymentid)
            {
                tables.restaurant_payments.insert(join);
            } else {
                tracing::warn!(?join, "Dropping dangling restaurant payment");
            }
        }

        Ok(Self::from_tables(tables))
    }
}

fn unique<'a>(table: &str, column: &str, values: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = BTreeSet::new();
    for value in values {
        if !seen.insert(value) {
            tracing::warn!(table, column, value, "Snapshot holds duplicate values");
            return Err(CrudError::UniqueViolation {
                table: table.to_string(),
                column: column.to_string(),
                value: value.to_string(),
            });
        }
    }
    Ok(())
}

/// Saves and restores an [`InMemoryStore`] through a [`Storage`] backend.
pub struct SnapshotStore<S: Storage> {
    storage: S,
    file_name: String,
}

impl<S: Storage> SnapshotStore<S> {
    pub fn new(storage: S, file_name: impl Into<String>) -> Self {
        Self {
            storage,
            file_name: file_name.into(),
        }
    }

    pub async fn save(&self, store: &InMemoryStore) -> Result<()> {
        let snapshot = store.snapshot().await;
        let data = serde_json::to_vec_pretty(&snapshot)?;
        self.storage.write_file(&self.file_name, &data).await?;
        tracing::info!(
            file = %self.file_name,
            restaurants = snapshot.restaurants.len(),
            "Snapshot saved"
        );
        Ok(())
    }

    /// `None` when no snapshot has been written yet.
    pub async fn load(&self) -> Result<Option<InMemoryStore>> {
        let Some(data) = self.storage.read_file(&self.file_name).await? else {
            tracing::debug!(file = %self.file_name, "No snapshot found");
            return Ok(None);
        };
        let snapshot: Snapshot = serde_json::from_slice(&data)?;
        tracing::info!(
            file = %self.file_name,
            saved_at = %snapshot.saved_at,
            "Snapshot loaded"
        );
        InMemoryStore::from_snapshot(snapshot).map(Some)
    }
}
