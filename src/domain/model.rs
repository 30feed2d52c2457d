//! Restaurant records and the two record types they relate to.

pub type RestaurantId = i64;
pub type MenuId = i64;
pub type PaymentId = i64;

/// One row of the `restaurants` table together with its relations.
///
/// `seat_capacity` is a plain integer, so `has_seat_capacity_value` records whether
/// it was explicitly set through [`Restaurant::set_seat_capacity`]. The flag lives
/// only in memory: it is never stored and is false on every freshly built or
/// freshly loaded value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Restaurant {
    id: Option<RestaurantId>,
    name: Option<String>,
    address: Option<String>,
    city: Option<String>,
    state: Option<String>,
    telephone: Option<String>,
    seat_capacity: i32,
    has_seat_capacity_value: bool,
    payments: Vec<Payment>,
    menus: Vec<Menu>,
}

impl Restaurant {
    /// Builds an unsaved restaurant. The id is assigned by the store on insert and
    /// menus/payments are attached afterwards.
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        telephone: impl Into<String>,
        seat_capacity: i32,
    ) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
            address: Some(address.into()),
            city: Some(city.into()),
            state: Some(state.into()),
            telephone: Some(telephone.into()),
            seat_capacity,
            has_seat_capacity_value: false,
            payments: Vec::new(),
            menus: Vec::new(),
        }
    }

    // Load construction: fields are assigned directly so the flag stays false.
    pub(crate) fn from_storage(
        id: RestaurantId,
        name: String,
        address: Option<String>,
        city: Option<String>,
        state: Option<String>,
        telephone: Option<String>,
        seat_capacity: i32,
    ) -> Self {
        Self {
            id: Some(id),
            name: Some(name),
            address,
            city,
            state,
            telephone,
            seat_capacity,
            ..Self::default()
        }
    }

    pub fn id(&self) -> Option<RestaurantId> {
        self.id
    }

    /// Used when seeding data or when the store assigns an id on insert.
    pub fn set_id(&mut self, id: RestaurantId) {
        self.id = Some(id);
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// `None` is accepted here; the store rejects it on save.
    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn set_address(&mut self, address: Option<String>) {
        self.address = address;
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn set_city(&mut self, city: Option<String>) {
        self.city = city;
    }

    /// Conventionally a two letter code; not enforced.
    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    pub fn set_state(&mut self, state: Option<String>) {
        self.state = state;
    }

    pub fn telephone(&self) -> Option<&str> {
        self.telephone.as_deref()
    }

    pub fn set_telephone(&mut self, telephone: Option<String>) {
        self.telephone = telephone;
    }

    /// Returns the stored value whether or not it was ever set.
    pub fn seat_capacity(&self) -> i32 {
        self.seat_capacity
    }

    /// The only way to flip `has_seat_capacity_value` to true.
    pub fn set_seat_capacity(&mut self, seat_capacity: i32) {
        self.seat_capacity = seat_capacity;
        self.has_seat_capacity_value = true;
    }

    pub fn has_seat_capacity_value(&self) -> bool {
        self.has_seat_capacity_value
    }

    /// The capacity as an optional value: `Some` only after an explicit set in
    /// this process.
    pub fn seat_capacity_if_set(&self) -> Option<i32> {
        self.has_seat_capacity_value.then_some(self.seat_capacity)
    }

    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    /// Replaces the whole payment set. Duplicates by identity are dropped.
    pub fn set_payments(&mut self, payments: Vec<Payment>) {
        self.payments.clear();
        for payment in payments {
            self.add_payment(payment);
        }
    }

    /// Adds a payment unless one with the same identity is already present.
    /// Returns whether the set changed.
    pub fn add_payment(&mut self, payment: Payment) -> bool {
        if self.payments.iter().any(|p| p.same_identity(&payment)) {
            return false;
        }
        self.payments.push(payment);
        true
    }

    /// Drops the payment from the set. Only the join row goes away on save; the
    /// payment itself stays in storage.
    pub fn remove_payment(&mut self, payment_id: PaymentId) -> Option<Payment> {
        let index = self
            .payments
            .iter()
            .position(|p| p.id() == Some(payment_id))?;
        Some(self.payments.remove(index))
    }

    pub fn menus(&self) -> &[Menu] {
        &self.menus
    }

    /// Replaces the whole menu list. Menus previously owned but absent from the new
    /// list are deleted on the next save.
    pub fn set_menus(&mut self, menus: Vec<Menu>) {
        self.menus = menus;
    }

    pub fn add_menu(&mut self, mut menu: Menu) {
        menu.restaurant = self.id;
        self.menus.push(menu);
    }

    /// Detaches a menu; the next save deletes it from storage.
    pub fn remove_menu(&mut self, menu_id: MenuId) -> Option<Menu> {
        let index = self.menus.iter().position(|m| m.id() == Some(menu_id))?;
        Some(self.menus.remove(index))
    }
}

/// A dish offered by one restaurant. `restaurant` points back at the owner.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Menu {
    id: Option<MenuId>,
    dish: String,
    price: f64,
    restaurant: Option<RestaurantId>,
}

impl Menu {
    pub fn new(dish: impl Into<String>, price: f64) -> Self {
        Self {
            id: None,
            dish: dish.into(),
            price,
            restaurant: None,
        }
    }

    pub fn id(&self) -> Option<MenuId> {
        self.id
    }

    pub fn set_id(&mut self, id: MenuId) {
        self.id = Some(id);
    }

    pub fn dish(&self) -> &str {
        &self.dish
    }

    pub fn set_dish(&mut self, dish: impl Into<String>) {
        self.dish = dish.into();
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn set_price(&mut self, price: f64) {
        self.price = price;
    }

    pub fn restaurant(&self) -> Option<RestaurantId> {
        self.restaurant
    }

    pub fn set_restaurant(&mut self, restaurant: Option<RestaurantId>) {
        self.restaurant = restaurant;
    }
}

/// A way of paying. `restaurants` is the inverse side of the many-to-many relation;
/// the store fills it on load and ignores it on save.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payment {
    id: Option<PaymentId>,
    payment_type: Option<String>,
    restaurants: Vec<RestaurantId>,
}

impl Payment {
    pub fn new(payment_type: impl Into<String>) -> Self {
        Self {
            id: None,
            payment_type: Some(payment_type.into()),
            restaurants: Vec::new(),
        }
    }

    pub fn id(&self) -> Option<PaymentId> {
        self.id
    }

    pub fn set_id(&mut self, id: PaymentId) {
        self.id = Some(id);
    }

    pub fn payment_type(&self) -> Option<&str> {
        self.payment_type.as_deref()
    }

    pub fn set_payment_type(&mut self, payment_type: impl Into<String>) {
        self.payment_type = Some(payment_type.into());
    }

    pub fn restaurants(&self) -> &[RestaurantId] {
        &self.restaurants
    }

    pub fn set_restaurants(&mut self, restaurants: Vec<RestaurantId>) {
        self.restaurants = restaurants;
    }

    // persisted payments compare by id, unsaved ones by type
    fn same_identity(&self, other: &Payment) -> bool {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            (None, None) => self.payment_type == other.payment_type,
            _ => false,
        }
    }
}
