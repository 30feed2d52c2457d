use crudyrestaurants::core::{MenuRepository, PaymentRepository, RestaurantRepository};
use crudyrestaurants::{CrudError, InMemoryStore, Menu, Payment, Restaurant};

fn apple() -> Restaurant {
    Restaurant::new("Apple", "123 Main Street", "City", "ST", "555-555-1234", 3)
}

async fn apple_with_menus(store: &InMemoryStore, dishes: &[&str]) -> Restaurant {
    let mut restaurant = apple();
    for dish in dishes {
        restaurant.add_menu(Menu::new(*dish, 5.00));
    }
    store.restaurants().save(restaurant).await.unwrap()
}

#[tokio::test]
async fn test_duplicate_name_is_rejected() {
    let store = InMemoryStore::new();
    store.restaurants().save(apple()).await.unwrap();

    let err = store.restaurants().save(apple()).await.unwrap_err();
    assert!(matches!(
        err,
        CrudError::UniqueViolation { ref table, ref column, .. } if table == "restaurants" && column == "name"
    ));
    assert_eq!(store.restaurants().find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_resaving_same_restaurant_is_not_a_duplicate() {
    let store = InMemoryStore::new();
    let mut saved = store.restaurants().save(apple()).await.unwrap();
    saved.set_city(Some("Town".to_string()));

    let updated = store.restaurants().save(saved).await.unwrap();
    assert_eq!(updated.city(), Some("Town"));
    assert_eq!(store.restaurants().find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_missing_name_is_rejected() {
    let store = InMemoryStore::new();
    let mut nameless = Restaurant::default();
    nameless.set_city(Some("Village".to_string()));

    let err = store.restaurants().save(nameless).await.unwrap_err();
    assert!(matches!(err, CrudError::NotNullViolation { ref column, .. } if column == "name"));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_delete_cascades_to_menus() {
    let store = InMemoryStore::new();
    let apple = apple_with_menus(&store, &["Lasagna", "Meatloaf", "Meatball Sub"]).await;
    let mut eagle = Restaurant::new("Eagle Cafe", "321 Uptown Drive", "Town", "ST", "555-555-5555", 27);
    eagle.add_menu(Menu::new("Tacos", 10.49));
    store.restaurants().save(eagle).await.unwrap();
    assert_eq!(store.menus().find_all().await.unwrap().len(), 4);

    assert!(store.restaurants().delete_by_id(apple.id().unwrap()).await.unwrap());

    let remaining = store.menus().find_all().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].dish(), "Tacos");
    for menu in apple.menus() {
        assert!(store.menus().find_by_id(menu.id().unwrap()).await.unwrap().is_none());
    }
}

#[tokio::test]
async fn test_delete_unknown_restaurant_returns_false() {
    let store = InMemoryStore::new();
    assert!(!store.restaurants().delete_by_id(99).await.unwrap());
}

#[tokio::test]
async fn test_detached_menu_is_removed_on_save() {
    let store = InMemoryStore::new();
    let mut apple = apple_with_menus(&store, &["Lasagna", "Meatloaf", "Meatball Sub"]).await;
    let meatloaf_id = apple.menus()[1].id().unwrap();

    let removed = apple.remove_menu(meatloaf_id).unwrap();
    assert_eq!(removed.dish(), "Meatloaf");
    let saved = store.restaurants().save(apple).await.unwrap();

    assert!(store.menus().find_by_id(meatloaf_id).await.unwrap().is_none());
    let dishes: Vec<&str> = saved.menus().iter().map(Menu::dish).collect();
    assert_eq!(dishes, vec!["Lasagna", "Meatball Sub"]);
    assert_eq!(store.menus().find_all().await.unwrap().len(), 2);
    assert!(store
        .restaurants()
        .find_by_id(saved.id().unwrap())
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_removed_payment_keeps_payment_row() {
    let store = InMemoryStore::new();
    let cash = store.payments().save(Payment::new("Cash")).await.unwrap();
    let card = store.payments().save(Payment::new("Credit Card")).await.unwrap();

    let mut apple = apple();
    apple.add_payment(cash.clone());
    apple.add_payment(card.clone());
    let mut apple = store.restaurants().save(apple).await.unwrap();
    assert_eq!(store.restaurant_payment_rows().await.len(), 2);

    apple.remove_payment(cash.id().unwrap()).unwrap();
    let apple = store.restaurants().save(apple).await.unwrap();

    let rows = store.restaurant_payment_rows().await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].paymentid, card.id().unwrap());
    assert_eq!(apple.payments().len(), 1);

    let cash = store.payments().find_by_id(cash.id().unwrap()).await.unwrap().unwrap();
    assert_eq!(cash.payment_type(), Some("Cash"));
    assert!(cash.restaurants().is_empty());
}

#[tokio::test]
async fn test_deleting_restaurant_keeps_payments() {
    let store = InMemoryStore::new();
    let cash = store.payments().save(Payment::new("Cash")).await.unwrap();
    let mut apple = apple();
    apple.add_payment(cash.clone());
    let apple = store.restaurants().save(apple).await.unwrap();

    store.restaurants().delete_by_id(apple.id().unwrap()).await.unwrap();

    assert!(store.restaurant_payment_rows().await.is_empty());
    assert_eq!(store.payments().find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_payment_in_use_cannot_be_deleted() {
    let store = InMemoryStore::new();
    let cash = store.payments().save(Payment::new("Cash")).await.unwrap();
    let mut apple = apple();
    apple.add_payment(cash.clone());
    store.restaurants().save(apple).await.unwrap();

    let err = store.payments().delete_by_id(cash.id().unwrap()).await.unwrap_err();
    assert!(matches!(err, CrudError::ForeignKeyViolation { .. }));
    assert!(store.payments().find_by_id(cash.id().unwrap()).await.unwrap().is_some());
}

#[tokio::test]
async fn test_payment_back_reference_lists_restaurants() {
    let store = InMemoryStore::new();
    let cash = store.payments().save(Payment::new("Cash")).await.unwrap();

    let mut apple = apple();
    apple.add_payment(cash.clone());
    let apple = store.restaurants().save(apple).await.unwrap();
    let mut eagle = Restaurant::new("Eagle Cafe", "", "", "", "", 27);
    eagle.add_payment(cash.clone());
    let eagle = store.restaurants().save(eagle).await.unwrap();

    let cash = store.payments().find_by_id(cash.id().unwrap()).await.unwrap().unwrap();
    assert_eq!(
        cash.restaurants(),
        &[apple.id().unwrap(), eagle.id().unwrap()]
    );
}

#[tokio::test]
async fn test_payment_type_is_unique() {
    let store = InMemoryStore::new();
    store.payments().save(Payment::new("Cash")).await.unwrap();
    let err = store.payments().save(Payment::new("Cash")).await.unwrap_err();
    assert!(matches!(err, CrudError::UniqueViolation { .. }));
}

#[tokio::test]
async fn test_find_by_name_is_exact_and_containing_ignores_case() {
    let store = InMemoryStore::new();
    store.restaurants().save(apple()).await.unwrap();
    store
        .restaurants()
        .save(Restaurant::new("Eagle Cafe", "", "", "", "", 0))
        .await
        .unwrap();

    assert!(store.restaurants().find_by_name("apple").await.unwrap().is_none());
    assert!(store.restaurants().find_by_name("Apple").await.unwrap().is_some());

    let found = store.restaurants().find_by_name_containing("CAFE").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name(), Some("Eagle Cafe"));
}

#[tokio::test]
async fn test_menu_owned_by_another_restaurant_is_rejected() {
    let store = InMemoryStore::new();
    let mut eagle = Restaurant::new("Eagle Cafe", "321 Uptown Drive", "Town", "ST", "555-555-5555", 27);
    eagle.add_menu(Menu::new("Tacos", 10.49));
    let eagle = store.restaurants().save(eagle).await.unwrap();
    let tacos = eagle.menus()[0].clone();

    let mut apple = store.restaurants().save(apple()).await.unwrap();
    apple.set_menus(vec![tacos.clone()]);
    let err = store.restaurants().save(apple).await.unwrap_err();
    assert!(matches!(
        err,
        CrudError::ForeignKeyViolation { ref table, id, .. } if table == "menus" && id == tacos.id().unwrap()
    ));

    // an unsaved restaurant cannot take the menu either
    let mut deli = Restaurant::new("Corner Deli", "", "", "", "", 8);
    deli.set_menus(vec![tacos.clone()]);
    assert!(store.restaurants().save(deli).await.is_err());

    let eagle = store.restaurants().find_by_id(eagle.id().unwrap()).await.unwrap().unwrap();
    assert_eq!(eagle.menus().len(), 1);
    let stored = store.menus().find_by_id(tacos.id().unwrap()).await.unwrap().unwrap();
    assert_eq!(stored.restaurant(), eagle.id());
}

#[tokio::test]
async fn test_clearing_name_of_saved_restaurant_is_rejected() {
    let store = InMemoryStore::new();
    let mut saved = store.restaurants().save(apple()).await.unwrap();
    saved.set_name(None);

    let err = store.restaurants().save(saved).await.unwrap_err();
    assert!(matches!(err, CrudError::NotNullViolation { ref column, .. } if column == "name"));
    assert!(store.restaurants().find_by_name("Apple").await.unwrap().is_some());
}
