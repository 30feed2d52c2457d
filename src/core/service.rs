use crate::adapters::memory::{
    InMemoryMenuRepository, InMemoryPaymentRepository, InMemoryRestaurantRepository,
    InMemoryStore,
};
use crate::domain::model::{Menu, MenuId, Payment, Restaurant, RestaurantId};
use crate::domain::ports::{MenuRepository, PaymentRepository, RestaurantRepository};
use crate::domain::views::{MenuInput, MenuView, PaymentRef, PaymentView, RestaurantInput};
use crate::utils::error::{CrudError, Result};

/// CRUD operations over restaurants and the records they own or reference.
///
/// Storage errors are returned unchanged; the only error raised here is
/// `NotFound` for ids that do not exist.
pub struct RestaurantService<R, P, M> {
    restaurants: R,
    payments: P,
    menus: M,
}

impl RestaurantService<InMemoryRestaurantRepository, InMemoryPaymentRepository, InMemoryMenuRepository> {
    pub fn in_memory(store: &InMemoryStore) -> Self {
        Self::new(store.restaurants(), store.payments(), store.menus())
    }
}

impl<R, P, M> RestaurantService<R, P, M>
where
    R: RestaurantRepository,
    P: PaymentRepository,
    M: MenuRepository,
{
    pub fn new(restaurants: R, payments: P, menus: M) -> Self {
        Self {
            restaurants,
            payments,
            menus,
        }
    }

    pub async fn find_all(&self) -> Result<Vec<Restaurant>> {
        self.restaurants.find_all().await
    }

    pub async fn find_by_id(&self, id: RestaurantId) -> Result<Restaurant> {
        self.restaurants
            .find_by_id(id)
            .await?
            .ok_or_else(|| CrudError::not_found("Restaurant", id))
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Restaurant> {
        self.restaurants
            .find_by_name(name)
            .await?
            .ok_or_else(|| CrudError::not_found("Restaurant", name))
    }

    /// Case-insensitive substring match on the name.
    pub async fn find_by_name_like(&self, fragment: &str) -> Result<Vec<Restaurant>> {
        self.restaurants.find_by_name_containing(fragment).await
    }

    /// Creates a restaurant, or fully replaces one when `restaurantid` is given.
    /// Payments must already exist; menus are always created fresh.
    pub async fn save(&self, input: RestaurantInput) -> Result<Restaurant> {
        let mut restaurant = Restaurant::default();

        if let Some(id) = input.restaurantid {
            self.find_by_id(id).await?;
            restaurant.set_id(id);
        }

        restaurant.set_name(input.name);
        restaurant.set_address(input.address);
        restaurant.set_city(input.city);
        restaurant.set_state(input.state);
        restaurant.set_telephone(input.telephone);
        if let Some(seat_capacity) = input.seatcapacity {
            restaurant.set_seat_capacity(seat_capacity);
        }

        restaurant.set_payments(self.resolve_payments(&input.payments).await?);
        restaurant.set_menus(new_menus(input.menus, restaurant.id()));

        let saved = self.restaurants.save(restaurant).await?;
        tracing::info!(restaurant = ?saved.id(), name = ?saved.name(), "Saved restaurant");
        Ok(saved)
    }

    /// Partial update: only fields present in `input` replace stored values.
    /// A non-empty payment or menu list replaces the whole collection.
    pub async fn update(&self, input: RestaurantInput, id: RestaurantId) -> Result<Restaurant> {
        let mut current = self.find_by_id(id).await?;

        if input.name.is_some() {
            current.set_name(input.name);
        }
        if input.address.is_some() {
            current.set_address(input.address);
        }
        if input.city.is_some() {
            current.set_city(input.city);
        }
        if input.state.is_some() {
            current.set_state(input.state);
        }
        if input.telephone.is_some() {
            current.set_telephone(input.telephone);
        }
        if let Some(seat_capacity) = input.seatcapacity {
            current.set_seat_capacity(seat_capacity);
        }

        if !input.payments.is_empty() {
            current.set_payments(self.resolve_payments(&input.payments).await?);
        }
        if !input.menus.is_empty() {
            current.set_menus(new_menus(input.menus, Some(id)));
        }

        let saved = self.restaurants.save(current).await?;
        tracing::info!(restaurant = id, "Updated restaurant");
        Ok(saved)
    }

    pub async fn delete(&self, id: RestaurantId) -> Result<()> {
        if self.restaurants.delete_by_id(id).await? {
            Ok(())
        } else {
            Err(CrudError::not_found("Restaurant", id))
        }
    }

    pub async fn delete_all(&self) -> Result<()> {
        self.restaurants.delete_all().await?;
        tracing::info!("Deleted all restaurants");
        Ok(())
    }

    pub async fn save_payment(&self, payment: Payment) -> Result<Payment> {
        self.payments.save(payment).await
    }

    pub async fn find_all_payments(&self) -> Result<Vec<PaymentView>> {
        let mut views = Vec::new();
        for payment in self.payments.find_all().await? {
            let mut restaurants = Vec::with_capacity(payment.restaurants().len());
            for id in payment.restaurants() {
                if let Some(restaurant) = self.restaurants.find_by_id(*id).await? {
                    restaurants.push(restaurant);
                }
            }
            views.push(PaymentView::new(&payment, &restaurants));
        }
        Ok(views)
    }

    pub async fn find_all_menus(&self) -> Result<Vec<MenuView>> {
        let mut views = Vec::new();
        for menu in self.menus.find_all().await? {
            views.push(self.menu_view(&menu).await?);
        }
        Ok(views)
    }

    pub async fn find_menu_by_id(&self, id: MenuId) -> Result<MenuView> {
        let menu = self
            .menus
            .find_by_id(id)
            .await?
            .ok_or_else(|| CrudError::not_found("Menu", id))?;
        self.menu_view(&menu).await
    }

    async fn menu_view(&self, menu: &Menu) -> Result<MenuView> {
        let restaurant = match menu.restaurant() {
            Some(id) => self.restaurants.find_by_id(id).await?,
            None => None,
        };
        Ok(MenuView::new(menu, restaurant.as_ref()))
    }

    async fn resolve_payments(&self, refs: &[PaymentRef]) -> Result<Vec<Payment>> {
        let mut payments = Vec::with_capacity(refs.len());
        for payment_ref in refs {
            let payment = self
                .payments
                .find_by_id(payment_ref.paymentid)
                .await?
                .ok_or_else(|| CrudError::not_found("Payment", payment_ref.paymentid))?;
            payments.push(payment);
        }
        Ok(payments)
    }
}

fn new_menus(inputs: Vec<MenuInput>, restaurant: Option<RestaurantId>) -> Vec<Menu> {
    inputs
        .into_iter()
        .map(|input| {
            let mut menu = Menu::new(input.dish, input.price);
            menu.set_restaurant(restaurant);
            menu
        })
        .collect()
}
