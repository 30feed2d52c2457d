//! In-memory relational store backing the repositories.
//!
//! Four tables live behind one lock: `restaurants`, `menus`, `payments` and the
//! `restaurantpayments` join table. Every write validates first and mutates second,
//! so a rejected write leaves all tables as they were.

use crate::domain::model::{Menu, MenuId, Payment, PaymentId, Restaurant, RestaurantId};
use crate::domain::ports::{MenuRepository, PaymentRepository, RestaurantRepository};
use crate::utils::error::{CrudError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tokio::sync::RwLock;

const RESTAURANTS: &str = "restaurants";
const MENUS: &str = "menus";
const PAYMENTS: &str = "payments";
const RESTAURANT_PAYMENTS: &str = "restaurantpayments";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantRow {
    pub restaurantid: RestaurantId,
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub telephone: Option<String>,
    pub seatcapacity: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuRow {
    pub menuid: MenuId,
    pub dish: String,
    pub price: f64,
    pub restaurantid: RestaurantId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRow {
    pub paymentid: PaymentId,
    #[serde(rename = "type")]
    pub payment_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RestaurantPaymentRow {
    pub restaurantid: RestaurantId,
    pub paymentid: PaymentId,
}

#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub(crate) next_id: i64,
    pub(crate) restaurants: BTreeMap<RestaurantId, RestaurantRow>,
    pub(crate) menus: BTreeMap<MenuId, MenuRow>,
    pub(crate) payments: BTreeMap<PaymentId, PaymentRow>,
    pub(crate) restaurant_payments: BTreeSet<RestaurantPaymentRow>,
}

impl Tables {
    fn restaurant(&self, row: &RestaurantRow) -> Restaurant {
        let mut restaurant = Restaurant::from_storage(
            row.restaurantid,
            row.name.clone(),
            row.address.clone(),
            row.city.clone(),
            row.state.clone(),
            row.telephone.clone(),
            row.seatcapacity,
        );

        let payments = self
            .restaurant_payments
            .iter()
            .filter(|join| join.restaurantid == row.restaurantid)
            .filter_map(|join| self.payments.get(&join.paymentid))
            .map(|payment| self.payment(payment))
            .collect();
        restaurant.set_payments(payments);

        let menus = self
            .menus
            .values()
            .filter(|menu| menu.restaurantid == row.restaurantid)
            .map(menu)
            .collect();
        restaurant.set_menus(menus);

        restaurant
    }

    fn payment(&self, row: &PaymentRow) -> Payment {
        let mut payment = Payment::new(row.payment_type.clone());
        payment.set_id(row.paymentid);
        payment.set_restaurants(
            self.restaurant_payments
                .iter()
                .filter(|join| join.paymentid == row.paymentid)
                .map(|join| join.restaurantid)
                .collect(),
        );
        payment
    }

    fn save_restaurant(&mut self, restaurant: &Restaurant) -> Result<RestaurantId> {
        let name = restaurant.name().ok_or_else(|| not_null(RESTAURANTS, "name"))?;

        if self
            .restaurants
            .values()
            .any(|row| row.name == name && Some(row.restaurantid) != restaurant.id())
        {
            return Err(CrudError::UniqueViolation {
                table: RESTAURANTS.to_string(),
                column: "name".to_string(),
                value: name.to_string(),
            });
        }

        let mut payment_ids = BTreeSet::new();
        for payment in restaurant.payments() {
            let payment_id = payment.id().ok_or_else(|| CrudError::UnsavedReference {
                entity: "Payment".to_string(),
            })?;
            if !self.payments.contains_key(&payment_id) {
                return Err(CrudError::not_found("Payment", payment_id));
            }
            payment_ids.insert(payment_id);
        }

        for menu in restaurant.menus() {
            let Some(menu_id) = menu.id() else { continue };
            if let Some(row) = self.menus.get(&menu_id) {
                if Some(row.restaurantid) != restaurant.id() {
                    return Err(CrudError::ForeignKeyViolation {
                        table: MENUS.to_string(),
                        id: menu_id,
                        referenced_by: format!("{} {}", RESTAURANTS, row.restaurantid),
                    });
                }
            }
        }

        // Ids are worked out on a copy of the sequence so running out leaves it untouched.
        let mut sequence = Sequence::new(self.next_id);
        restaurant
            .id()
            .into_iter()
            .chain(restaurant.menus().iter().filter_map(Menu::id))
            .for_each(|id| sequence.reserve(id));
        let id = match restaurant.id() {
            Some(id) => id,
            None => sequence.allocate(RESTAURANTS)?,
        };
        let menu_ids = restaurant
            .menus()
            .iter()
            .map(|menu| match menu.id() {
                Some(menu_id) => Ok(menu_id),
                None => sequence.allocate(MENUS),
            })
            .collect::<Result<Vec<MenuId>>>()?;

        // Validation is done; nothing below can fail.
        self.next_id = sequence.last;
        let existed = self
            .restaurants
            .insert(
                id,
                RestaurantRow {
                    restaurantid: id,
                    name: name.to_string(),
                    address: restaurant.address().map(str::to_string),
                    city: restaurant.city().map(str::to_string),
                    state: restaurant.state().map(str::to_string),
                    telephone: restaurant.telephone().map(str::to_string),
                    seatcapacity: restaurant.seat_capacity(),
                },
            )
            .is_some();

        self.restaurant_payments.retain(|join| join.restaurantid != id);
        self.restaurant_payments
            .extend(payment_ids.into_iter().map(|paymentid| RestaurantPaymentRow {
                restaurantid: id,
                paymentid,
            }));

        let kept: BTreeSet<MenuId> = restaurant.menus().iter().filter_map(Menu::id).collect();
        let orphans: Vec<MenuId> = self
            .menus
            .values()
            .filter(|menu| menu.restaurantid == id && !kept.contains(&menu.menuid))
            .map(|menu| menu.menuid)
            .collect();
        for menu_id in &orphans {
            self.menus.remove(menu_id);
        }
        if !orphans.is_empty() {
            tracing::debug!(restaurant = id, removed = ?orphans, "Removed orphaned menus");
        }

        for (menu, menu_id) in restaurant.menus().iter().zip(menu_ids) {
            self.menus.insert(
                menu_id,
                MenuRow {
                    menuid: menu_id,
                    dish: menu.dish().to_string(),
                    price: menu.price(),
                    restaurantid: id,
                },
            );
        }

        if existed {
            tracing::debug!(restaurant = id, name, "Updated restaurant");
        } else {
            tracing::debug!(restaurant = id, name, "Inserted restaurant");
        }
        Ok(id)
    }

    fn delete_restaurant(&mut self, id: RestaurantId) -> bool {
        if self.restaurants.remove(&id).is_none() {
            return false;
        }

        let before = self.menus.len();
        self.menus.retain(|_, menu| menu.restaurantid != id);
        let menus_removed = before - self.menus.len();
        self.restaurant_payments.retain(|join| join.restaurantid != id);

        tracing::info!(restaurant = id, menus_removed, "Deleted restaurant");
        true
    }

    fn save_payment(&mut self, payment: &Payment) -> Result<PaymentId> {
        let payment_type = payment
            .payment_type()
            .ok_or_else(|| not_null(PAYMENTS, "type"))?;

        if self
            .payments
            .values()
            .any(|row| row.payment_type == payment_type && Some(row.paymentid) != payment.id())
        {
            return Err(CrudError::UniqueViolation {
                table: PAYMENTS.to_string(),
                column: "type".to_string(),
                value: payment_type.to_string(),
            });
        }

        let mut sequence = Sequence::new(self.next_id);
        let id = match payment.id() {
            Some(id) => {
                sequence.reserve(id);
                id
            }
            None => sequence.allocate(PAYMENTS)?,
        };
        self.next_id = sequence.last;
        self.payments.insert(
            id,
            PaymentRow {
                paymentid: id,
                payment_type: payment_type.to_string(),
            },
        );
        tracing::debug!(payment = id, payment_type, "Saved payment");
        Ok(id)
    }

    fn delete_payment(&mut self, id: PaymentId) -> Result<bool> {
        if !self.payments.contains_key(&id) {
            return Ok(false);
        }
        if self.restaurant_payments.iter().any(|join| join.paymentid == id) {
            return Err(CrudError::ForeignKeyViolation {
                table: PAYMENTS.to_string(),
                id,
                referenced_by: RESTAURANT_PAYMENTS.to_string(),
            });
        }
        self.payments.remove(&id);
        tracing::info!(payment = id, "Deleted payment");
        Ok(true)
    }
}

/// The id sequence shared by every table. `last` is the highest id handed out or
/// seen as an explicit id.
struct Sequence {
    last: i64,
}

impl Sequence {
    fn new(last: i64) -> Self {
        Self { last }
    }

    fn reserve(&mut self, id: i64) {
        self.last = self.last.max(id);
    }

    fn allocate(&mut self, table: &str) -> Result<i64> {
        self.last = self
            .last
            .checked_add(1)
            .ok_or_else(|| CrudError::SequenceExhausted {
                table: table.to_string(),
            })?;
        Ok(self.last)
    }
}

fn menu(row: &MenuRow) -> Menu {
    let mut menu = Menu::new(row.dish.clone(), row.price);
    menu.set_id(row.menuid);
    menu.set_restaurant(Some(row.restaurantid));
    menu
}

fn not_null(table: &str, column: &str) -> CrudError {
    CrudError::NotNullViolation {
        table: table.to_string(),
        column: column.to_string(),
    }
}

fn logged<T>(result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        tracing::warn!("Write rejected: {}", e);
    }
    result
}

/// Shared handle to the tables. Cloning is cheap and every clone sees the same data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_tables(tables: Tables) -> Self {
        Self {
            tables: Arc::new(RwLock::new(tables)),
        }
    }

    pub(crate) fn tables(&self) -> &RwLock<Tables> {
        &self.tables
    }

    pub fn restaurants(&self) -> InMemoryRestaurantRepository {
        InMemoryRestaurantRepository {
            store: self.clone(),
        }
    }

    pub fn payments(&self) -> InMemoryPaymentRepository {
        InMemoryPaymentRepository {
            store: self.clone(),
        }
    }

    pub fn menus(&self) -> InMemoryMenuRepository {
        InMemoryMenuRepository {
            store: self.clone(),
        }
    }

    /// Rows of the join table, ordered by restaurant then payment.
    pub async fn restaurant_payment_rows(&self) -> Vec<RestaurantPaymentRow> {
        self.tables.read().await.restaurant_payments.iter().copied().collect()
    }

    pub async fn is_empty(&self) -> bool {
        let tables = self.tables.read().await;
        tables.restaurants.is_empty() && tables.payments.is_empty() && tables.menus.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct InMemoryRestaurantRepository {
    store: InMemoryStore,
}

#[async_trait]
impl RestaurantRepository for InMemoryRestaurantRepository {
    async fn save(&self, restaurant: Restaurant) -> Result<Restaurant> {
        let mut tables = self.store.tables.write().await;
        let id = logged(tables.save_restaurant(&restaurant))?;
        let row = &tables.restaurants[&id];
        Ok(tables.restaurant(row))
    }

    async fn find_by_id(&self, id: RestaurantId) -> Result<Option<Restaurant>> {
        let tables = self.store.tables.read().await;
        Ok(tables.restaurants.get(&id).map(|row| tables.restaurant(row)))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Restaurant>> {
        let tables = self.store.tables.read().await;
        Ok(tables
            .restaurants
            .values()
            .find(|row| row.name == name)
            .map(|row| tables.restaurant(row)))
    }

    async fn find_by_name_containing(&self, fragment: &str) -> Result<Vec<Restaurant>> {
        let needle = fragment.to_lowercase();
        let tables = self.store.tables.read().await;
        Ok(tables
            .restaurants
            .values()
            .filter(|row| row.name.to_lowercase().contains(&needle))
            .map(|row| tables.restaurant(row))
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<Restaurant>> {
        let tables = self.store.tables.read().await;
        Ok(tables
            .restaurants
            .values()
            .map(|row| tables.restaurant(row))
            .collect())
    }

    async fn delete_by_id(&self, id: RestaurantId) -> Result<bool> {
        Ok(self.store.tables.write().await.delete_restaurant(id))
    }

    async fn delete_all(&self) -> Result<()> {
        let mut tables = self.store.tables.write().await;
        let ids: Vec<RestaurantId> = tables.restaurants.keys().copied().collect();
        for id in ids {
            tables.delete_restaurant(id);
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct InMemoryPaymentRepository {
    store: InMemoryStore,
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn save(&self, payment: Payment) -> Result<Payment> {
        let mut tables = self.store.tables.write().await;
        let id = logged(tables.save_payment(&payment))?;
        let row = &tables.payments[&id];
        Ok(tables.payment(row))
    }

    async fn find_by_id(&self, id: PaymentId) -> Result<Option<Payment>> {
        let tables = self.store.tables.read().await;
        Ok(tables.payments.get(&id).map(|row| tables.payment(row)))
    }

    async fn find_all(&self) -> Result<Vec<Payment>> {
        let tables = self.store.tables.read().await;
        Ok(tables.payments.values().map(|row| tables.payment(row)).collect())
    }

    async fn delete_by_id(&self, id: PaymentId) -> Result<bool> {
        let mut tables = self.store.tables.write().await;
        logged(tables.delete_payment(id))
    }
}

#[derive(Debug, Clone)]
pub struct InMemoryMenuRepository {
    store: InMemoryStore,
}

#[async_trait]
impl MenuRepository for InMemoryMenuRepository {
    async fn find_by_id(&self, id: MenuId) -> Result<Option<Menu>> {
        Ok(self.store.tables.read().await.menus.get(&id).map(menu))
    }

    async fn find_all(&self) -> Result<Vec<Menu>> {
        Ok(self.store.tables.read().await.menus.values().map(menu).collect())
    }
}
