//! Built-in card range.

use crate::catalog::{Category, Product};
use crate::ids::ProductId;
use crate::money::{Currency, Money};

fn unsplash(photo: &str) -> String {
    format!("https://images.unsplash.com/{photo}?w=400&h=400&fit=crop")
}

fn card(
    id: u32,
    name: &str,
    description: &str,
    price_cents: i64,
    photos: &[&str],
    category: Category,
    currency: Currency,
) -> Product {
    let images: Vec<String> = photos.iter().map(|p| unsplash(p)).collect();
    let image = images.first().cloned().unwrap_or_default();
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        description: description.to_string(),
        price: Money::new(price_cents, currency),
        image,
        images,
        category,
        in_stock: true,
    }
}

pub(crate) fn products(currency: Currency) -> Vec<Product> {
    vec![
        card(
            1,
            "Elegant Wedding Invitation",
            "Beautifully designed wedding invitation card with elegant typography and premium finish. Perfect for your special day.",
            2499,
            &["photo-1511895426328-dc8714191300", "photo-1519741497674-611481863552", "photo-1519162808019-7de1683fa2ad"],
            Category::Wedding,
            currency,
        ),
        card(
            2,
            "Birthday Celebration Card",
            "Colorful and fun birthday card with modern design. Great for celebrating special birthdays.",
            1299,
            &["photo-1513475382585-d06e58bcb0e0", "photo-1511988617509-a57c8a288659", "photo-1530103862676-de8c9debad1d"],
            Category::Birthday,
            currency,
        ),
        card(
            3,
            "Business Card Premium",
            "Professional business card with matte finish. Make a lasting impression with premium quality.",
            1999,
            &["photo-1561070791-2526d30994b5", "photo-1553062407-98eeb64c6a62", "photo-1586953208448-b95a79798f07"],
            Category::Business,
            currency,
        ),
        card(
            4,
            "Thank You Card Set",
            "Set of 10 beautifully designed thank you cards. Perfect for expressing gratitude.",
            1899,
            &["photo-1606923829579-0cb981a83e2e", "photo-1513475382585-d06e58bcb0e0", "photo-1511988617509-a57c8a288659"],
            Category::ThankYou,
            currency,
        ),
        card(
            5,
            "Holiday Greeting Card",
            "Festive holiday card with warm colors and seasonal designs. Spread joy this holiday season.",
            1599,
            &["photo-1482517967863-00e15c9b44be", "photo-1513475382585-d06e58bcb0e0", "photo-1511988617509-a57c8a288659"],
            Category::Holiday,
            currency,
        ),
        card(
            6,
            "Anniversary Card Deluxe",
            "Romantic anniversary card with elegant design. Celebrate your love story beautifully.",
            2299,
            &["photo-1518199266791-5375a83190b7", "photo-1511895426328-dc8714191300", "photo-1519162808019-7de1683fa2ad"],
            Category::Anniversary,
            currency,
        ),
        card(
            7,
            "Graduation Card",
            "Celebrate achievements with this stylish graduation card. Perfect for congratulating graduates.",
            1499,
            &["photo-1523050854058-8df90110c9f1", "photo-1513475382585-d06e58bcb0e0", "photo-1511988617509-a57c8a288659"],
            Category::Graduation,
            currency,
        ),
        card(
            8,
            "Baby Shower Invitation",
            "Adorable baby shower invitation with cute designs. Welcome the new arrival in style.",
            2199,
            &["photo-1503454537195-1dcabb73ffb9", "photo-1513475382585-d06e58bcb0e0", "photo-1511988617509-a57c8a288659"],
            Category::BabyShower,
            currency,
        ),
    ]
}
