use crate::domain::model::{Menu, Payment, Restaurant};
use crate::domain::ports::{PaymentRepository, RestaurantRepository};
use crate::utils::error::Result;

/// Demo data: three payment types and three restaurants with their menus.
pub async fn seed<R, P>(restaurants: &R, payments: &P) -> Result<Vec<Restaurant>>
where
    R: RestaurantRepository,
    P: PaymentRepository,
{
    let existing = payments.find_all().await?;
    let credit_card = payment(payments, &existing, "Credit Card").await?;
    let cash = payment(payments, &existing, "Cash").await?;
    let mobile_pay = payment(payments, &existing, "Mobile Pay").await?;

    let mut apple = Restaurant::new("Apple", "123 Main Street", "City", "ST", "555-555-1234", 3);
    apple.add_payment(credit_card.clone());
    apple.add_payment(cash.clone());
    apple.add_payment(mobile_pay.clone());
    apple.add_menu(Menu::new("Mac and Cheese", 6.95));
    apple.add_menu(Menu::new("Lasagna", 8.50));
    apple.add_menu(Menu::new("Meatloaf", 7.77));
    apple.add_menu(Menu::new("Meatball Sub", 5.75));
    apple.add_menu(Menu::new("Chicken Fried Steak", 11.99));

    let mut eagle_cafe =
        Restaurant::new("Eagle Cafe", "321 Uptown Drive", "Town", "ST", "555-555-5555", 27);
    eagle_cafe.add_payment(cash.clone());
    eagle_cafe.add_payment(mobile_pay);
    eagle_cafe.add_menu(Menu::new("Tacos", 10.49));
    eagle_cafe.add_menu(Menu::new("Barbacoa", 12.75));
    eagle_cafe.add_menu(Menu::new("Enchiladas", 9.99));
    eagle_cafe.add_menu(Menu::new("Chimichanga", 11.25));

    let mut number_one_chinese = Restaurant::new(
        "Number 1 Chinese",
        "565 Side Avenue",
        "Village",
        "ST",
        "555-123-1555",
        15,
    );
    number_one_chinese.add_payment(cash);
    number_one_chinese.add_menu(Menu::new("Egg Roll", 1.75));
    number_one_chinese.add_menu(Menu::new("Kung Pao Chicken", 8.50));
    number_one_chinese.add_menu(Menu::new("Fried Rice", 5.50));
    number_one_chinese.add_menu(Menu::new("Cashew Chicken", 9.25));

    let mut saved = Vec::with_capacity(3);
    for restaurant in [apple, eagle_cafe, number_one_chinese] {
        saved.push(restaurants.save(restaurant).await?);
    }

    tracing::info!(restaurants = saved.len(), "Seeded demo data");
    Ok(saved)
}

// payments survive `delete_all`, so a reseed reuses them by type
async fn payment<P: PaymentRepository>(
    payments: &P,
    existing: &[Payment],
    payment_type: &str,
) -> Result<Payment> {
    match existing
        .iter()
        .find(|p| p.payment_type() == Some(payment_type))
    {
        Some(found) => Ok(found.clone()),
        None => payments.save(Payment::new(payment_type)).await,
    }
}
