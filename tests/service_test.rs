use crudyrestaurants::core::seed::seed;
use crudyrestaurants::domain::views::{MenuInput, PaymentRef};
use crudyrestaurants::{CrudError, InMemoryStore, Payment, RestaurantInput, RestaurantService};

fn input(name: &str) -> RestaurantInput {
    RestaurantInput {
        name: Some(name.to_string()),
        address: Some("565 Side Avenue".to_string()),
        city: Some("Village".to_string()),
        state: Some("ST".to_string()),
        telephone: Some("555-123-1555".to_string()),
        seatcapacity: Some(15),
        ..RestaurantInput::default()
    }
}

fn menu(dish: &str, price: f64) -> MenuInput {
    MenuInput {
        dish: dish.to_string(),
        price,
    }
}

#[tokio::test]
async fn test_save_resolves_payments_and_creates_menus() {
    let store = InMemoryStore::new();
    let service = RestaurantService::in_memory(&store);
    let cash = service.save_payment(Payment::new("Cash")).await.unwrap();

    let mut body = input("Number 1 Chinese");
    body.payments = vec![PaymentRef {
        paymentid: cash.id().unwrap(),
    }];
    body.menus = vec![menu("Egg Roll", 1.75), menu("Fried Rice", 5.50)];

    let saved = service.save(body).await.unwrap();
    assert_eq!(saved.payments().len(), 1);
    assert_eq!(saved.menus().len(), 2);
    assert!(saved.menus().iter().all(|m| m.restaurant() == saved.id()));
    assert_eq!(saved.seat_capacity(), 15);
}

#[tokio::test]
async fn test_save_with_unknown_payment_is_not_found() {
    let store = InMemoryStore::new();
    let service = RestaurantService::in_memory(&store);
    let mut body = input("Apple");
    body.payments = vec![PaymentRef { paymentid: 42 }];

    let err = service.save(body).await.unwrap_err();
    assert_eq!(err.to_string(), "Payment 42 Not Found");
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_save_without_name_is_rejected_by_storage() {
    let store = InMemoryStore::new();
    let service = RestaurantService::in_memory(&store);
    let body = RestaurantInput {
        city: Some("Town".to_string()),
        ..RestaurantInput::default()
    };

    let err = service.save(body).await.unwrap_err();
    assert!(matches!(err, CrudError::NotNullViolation { .. }));
}

#[tokio::test]
async fn test_update_changes_only_given_fields() {
    let store = InMemoryStore::new();
    let service = RestaurantService::in_memory(&store);
    let mut body = input("Apple");
    body.menus = vec![menu("Lasagna", 8.50)];
    let saved = service.save(body).await.unwrap();
    let id = saved.id().unwrap();

    let patch = RestaurantInput {
        telephone: Some("555-000-0000".to_string()),
        seatcapacity: Some(0),
        ..RestaurantInput::default()
    };
    let updated = service.update(patch, id).await.unwrap();

    assert_eq!(updated.name(), Some("Apple"));
    assert_eq!(updated.city(), Some("Village"));
    assert_eq!(updated.telephone(), Some("555-000-0000"));
    assert_eq!(updated.seat_capacity(), 0);
    assert_eq!(updated.menus().len(), 1);
}

#[tokio::test]
async fn test_update_without_seat_capacity_keeps_stored_value() {
    let store = InMemoryStore::new();
    let service = RestaurantService::in_memory(&store);
    let id = service.save(input("Apple")).await.unwrap().id().unwrap();

    let patch = RestaurantInput {
        city: Some("Town".to_string()),
        ..RestaurantInput::default()
    };
    let updated = service.update(patch, id).await.unwrap();
    assert_eq!(updated.seat_capacity(), 15);
}

#[tokio::test]
async fn test_update_with_menus_replaces_old_menus() {
    let store = InMemoryStore::new();
    let service = RestaurantService::in_memory(&store);
    let mut body = input("Apple");
    body.menus = vec![menu("Lasagna", 8.50), menu("Meatloaf", 7.77)];
    let id = service.save(body).await.unwrap().id().unwrap();

    let patch = RestaurantInput {
        menus: vec![menu("Tacos", 10.49)],
        ..RestaurantInput::default()
    };
    service.update(patch, id).await.unwrap();

    let menus = service.find_all_menus().await.unwrap();
    assert_eq!(menus.len(), 1);
    assert_eq!(menus[0].dish, "Tacos");
    assert_eq!(
        menus[0].restaurant.as_ref().and_then(|r| r.name.as_deref()),
        Some("Apple")
    );
}

#[tokio::test]
async fn test_full_replace_requires_existing_id() {
    let store = InMemoryStore::new();
    let service = RestaurantService::in_memory(&store);
    let mut body = input("Apple");
    body.restaurantid = Some(77);

    let err = service.save(body).await.unwrap_err();
    assert!(matches!(err, CrudError::NotFound { .. }));
}

#[tokio::test]
async fn test_delete_and_lookup_errors() {
    let store = InMemoryStore::new();
    let service = RestaurantService::in_memory(&store);
    let id = service.save(input("Apple")).await.unwrap().id().unwrap();

    service.delete(id).await.unwrap();
    assert!(matches!(service.find_by_id(id).await, Err(CrudError::NotFound { .. })));
    assert!(matches!(service.delete(id).await, Err(CrudError::NotFound { .. })));
    assert!(matches!(
        service.find_by_name("Apple").await,
        Err(CrudError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_seed_then_reseed_after_delete_all() {
    let store = InMemoryStore::new();
    let service = RestaurantService::in_memory(&store);

    let seeded = seed(&store.restaurants(), &store.payments()).await.unwrap();
    assert_eq!(seeded.len(), 3);
    assert_eq!(service.find_by_name_like("a").await.unwrap().len(), 2);

    let payments = service.find_all_payments().await.unwrap();
    let cash = payments
        .iter()
        .find(|p| p.payment_type.as_deref() == Some("Cash"))
        .unwrap();
    assert_eq!(cash.restaurants.len(), 3);

    service.delete_all().await.unwrap();
    assert!(service.find_all().await.unwrap().is_empty());
    assert!(service.find_all_menus().await.unwrap().is_empty());

    let reseeded = seed(&store.restaurants(), &store.payments()).await.unwrap();
    assert_eq!(reseeded.len(), 3);
    assert_eq!(service.find_all_payments().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_full_replace_drops_old_payments_and_menus() {
    let store = InMemoryStore::new();
    let service = RestaurantService::in_memory(&store);
    let cash = service.save_payment(Payment::new("Cash")).await.unwrap();

    let mut body = input("Apple");
    body.payments = vec![PaymentRef {
        paymentid: cash.id().unwrap(),
    }];
    body.menus = vec![menu("Lasagna", 8.50), menu("Meatloaf", 7.77)];
    let id = service.save(body).await.unwrap().id().unwrap();

    let mut replacement = input("Apple Bistro");
    replacement.restaurantid = Some(id);
    replacement.seatcapacity = None;
    let replaced = service.save(replacement).await.unwrap();

    assert_eq!(replaced.id(), Some(id));
    assert_eq!(replaced.name(), Some("Apple Bistro"));
    assert_eq!(replaced.seat_capacity(), 0);
    assert!(replaced.payments().is_empty());
    assert!(replaced.menus().is_empty());
    assert!(service.find_all_menus().await.unwrap().is_empty());

    let payments = service.find_all_payments().await.unwrap();
    assert_eq!(payments.len(), 1);
    assert!(payments[0].restaurants.is_empty());
    assert_eq!(service.find_all().await.unwrap().len(), 1);
}
