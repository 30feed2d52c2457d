//! JSON shapes exchanged with clients.
//!
//! Every record has a detail view and a flat summary used when it appears nested
//! inside another record, so the restaurant/payment and restaurant/menu cycles never
//! expand. The in-memory seat capacity flag has no field here.

use crate::domain::model::{Menu, MenuId, Payment, PaymentId, Restaurant, RestaurantId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantView {
    pub restaurantid: Option<RestaurantId>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub telephone: Option<String>,
    pub seatcapacity: i32,
    pub payments: Vec<PaymentSummary>,
    pub menus: Vec<MenuSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantSummary {
    pub restaurantid: Option<RestaurantId>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub telephone: Option<String>,
    pub seatcapacity: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentSummary {
    pub paymentid: Option<PaymentId>,
    #[serde(rename = "type")]
    pub payment_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuSummary {
    pub menuid: Option<MenuId>,
    pub dish: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentView {
    pub paymentid: Option<PaymentId>,
    #[serde(rename = "type")]
    pub payment_type: Option<String>,
    pub restaurants: Vec<RestaurantSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuView {
    pub menuid: Option<MenuId>,
    pub dish: String,
    pub price: f64,
    pub restaurant: Option<RestaurantSummary>,
}

impl From<&Restaurant> for RestaurantView {
    fn from(restaurant: &Restaurant) -> Self {
        Self {
            restaurantid: restaurant.id(),
            name: restaurant.name().map(str::to_string),
            address: restaurant.address().map(str::to_string),
            city: restaurant.city().map(str::to_string),
            state: restaurant.state().map(str::to_string),
            telephone: restaurant.telephone().map(str::to_string),
            seatcapacity: restaurant.seat_capacity(),
            payments: restaurant.payments().iter().map(PaymentSummary::from).collect(),
            menus: restaurant.menus().iter().map(MenuSummary::from).collect(),
        }
    }
}

impl From<&Restaurant> for RestaurantSummary {
    fn from(restaurant: &Restaurant) -> Self {
        Self {
            restaurantid: restaurant.id(),
            name: restaurant.name().map(str::to_string),
            address: restaurant.address().map(str::to_string),
            city: restaurant.city().map(str::to_string),
            state: restaurant.state().map(str::to_string),
            telephone: restaurant.telephone().map(str::to_string),
            seatcapacity: restaurant.seat_capacity(),
        }
    }
}

impl From<&Payment> for PaymentSummary {
    fn from(payment: &Payment) -> Self {
        Self {
            paymentid: payment.id(),
            payment_type: payment.payment_type().map(str::to_string),
        }
    }
}

impl From<&Menu> for MenuSummary {
    fn from(menu: &Menu) -> Self {
        Self {
            menuid: menu.id(),
            dish: menu.dish().to_string(),
            price: menu.price(),
        }
    }
}

impl PaymentView {
    /// `restaurants` should be the restaurants named by `payment.restaurants()`.
    pub fn new(payment: &Payment, restaurants: &[Restaurant]) -> Self {
        Self {
            paymentid: payment.id(),
            payment_type: payment.payment_type().map(str::to_string),
            restaurants: restaurants.iter().map(RestaurantSummary::from).collect(),
        }
    }
}

impl MenuView {
    pub fn new(menu: &Menu, restaurant: Option<&Restaurant>) -> Self {
        Self {
            menuid: menu.id(),
            dish: menu.dish().to_string(),
            price: menu.price(),
            restaurant: restaurant.map(RestaurantSummary::from),
        }
    }
}

/// Restaurant body as sent by a client, for both creates and partial updates.
/// Absent fields stay `None`; `seatcapacity` being present is what marks the
/// capacity as explicitly set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestaurantInput {
    pub restaurantid: Option<RestaurantId>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub telephone: Option<String>,
    pub seatcapacity: Option<i32>,
    pub payments: Vec<PaymentRef>,
    pub menus: Vec<MenuInput>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRef {
    pub paymentid: PaymentId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuInput {
    pub dish: String,
    pub price: f64,
}
