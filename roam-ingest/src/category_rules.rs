//! Deterministic category rules mapping free-text activity categories from
//! the various sources onto the six canonical buckets.
//!
//! Priority: exact canonical label > keyword rules (in bucket order) > Other.

use roam_core::Category;

const TRANSPORTATION: &[&str] = &[
    "transport", "transportation", "transit", "flight", "flights", "airfare", "train", "rail",
    "bus", "taxi", "cab", "ferry", "cruise", "transfer", "metro", "subway", "car", "rental",
];

const ACCOMMODATION: &[&str] = &[
    "accommodation", "accommodations", "lodging", "hotel", "hotels", "hostel", "stay", "airbnb",
    "resort", "camping", "guesthouse",
];

const FOOD: &[&str] = &[
    "food", "dining", "restaurant", "restaurants", "cafe", "meal", "meals", "breakfast", "lunch",
    "dinner", "drinks", "culinary", "cuisine",
];

const SHOPPING: &[&str] = &["shopping", "souvenir", "souvenirs", "mall", "boutique", "market", "markets"];

const ACTIVITIES: &[&str] = &[
    "activity", "activities", "sightseeing", "adventure", "tour", "tours", "museum", "museums",
    "hiking", "trek", "excursion", "culture", "cultural", "entertainment", "nightlife", "outdoor",
    "sports", "beach", "wellness", "spa", "nature", "wildlife", "history", "historical", "art",
];

/// Map a raw category string to a bucket. Never fails; unknown text is `Other`.
pub fn categorize(raw: &str) -> Category {
    if let Some(category) = Category::from_label(raw) {
        return category;
    }

    let lower = raw.to_lowercase();
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    let has_any = |keywords: &[&str]| words.iter().any(|w| keywords.contains(w));

    if has_any(TRANSPORTATION) {
        Category::Transportation
    } else if has_any(ACCOMMODATION) {
        Category::Accommodation
    } else if has_any(FOOD) {
        Category::FoodAndDining
    } else if has_any(SHOPPING) {
        Category::Shopping
    } else if has_any(ACTIVITIES) {
        Category::Activities
    } else {
        Category::Other
    }
}
