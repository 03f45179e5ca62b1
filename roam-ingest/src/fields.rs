//! Field-resolution tables.
//!
//! Each logical field lists its candidate source keys in priority order; the
//! first non-null, non-empty candidate wins. Dotted entries address nested
//! objects. The canonical key always comes first so canonical records
//! resolve to themselves.

pub const TRIP_ID: &[&str] = &["id", "_id", "trip_id", "tripId", "uuid"];
pub const TRIP_TITLE: &[&str] = &["title", "name", "package_name", "packageName"];
pub const TRIP_START: &[&str] = &["startDate", "start_date", "start", "departure_date"];
pub const TRIP_END: &[&str] = &["endDate", "end_date", "end", "return_date"];
pub const TRIP_COVER: &[&str] = &[
    "coverImageUrl",
    "coverImage",
    "cover_image",
    "imageUrl",
    "image_url",
    "image",
];
pub const TRIP_DESTINATION: &[&str] =
    &["destination.name", "destination", "location", "city.name", "city"];
pub const TRIP_BUDGET: &[&str] = &[
    "plannedBudget",
    "planned_budget",
    "budget",
    "total_budget",
    "totalBudget",
    "currentPrice",
    "current_price",
    "price",
];
pub const TRIP_STOPS: &[&str] = &["stops", "itinerary", "destinations_list"];
/// Activities listed directly on a trip that has no stops
pub const TRIP_FLAT_ACTIVITIES: &[&str] = &["activities"];

pub const STOP_ID: &[&str] = &["id", "_id", "stop_id", "stopId"];
pub const STOP_TRIP_ID: &[&str] = &["tripId", "trip_id", "trip"];
pub const STOP_LOCATION: &[&str] = &[
    "location",
    "city.name",
    "city",
    "cityName",
    "city_name",
    "name",
    "destination",
];
pub const STOP_START: &[&str] = &["startDate", "start_date", "arrival_date", "date"];
pub const STOP_END: &[&str] = &["endDate", "end_date", "departure_date", "date"];
pub const STOP_ACCOMMODATION: &[&str] = &[
    "accommodationCost",
    "accommodation_cost",
    "costs.accommodation",
    "accommodation.cost",
    "hotel_cost",
];
pub const STOP_TRANSPORT: &[&str] = &[
    "transportCost",
    "transport_cost",
    "transportationCost",
    "costs.transport",
    "transport.cost",
];
pub const STOP_ACTIVITIES: &[&str] = &["activities", "items"];

pub const ACTIVITY_ID: &[&str] = &["id", "_id", "activity_id", "activityId"];
pub const ACTIVITY_NAME: &[&str] = &["name", "title", "activity_name"];
pub const ACTIVITY_CATEGORY: &[&str] = &["category", "type", "activity_type"];
pub const ACTIVITY_COST: &[&str] = &["cost", "estimated_cost", "estimatedCost", "price", "current_price"];
pub const ACTIVITY_DURATION: &[&str] = &["durationLabel", "duration", "stay"];
/// Numeric minutes, used only when no duration label resolves
pub const ACTIVITY_DURATION_MINUTES: &[&str] = &["estimated_duration", "durationMinutes"];
pub const ACTIVITY_DATE: &[&str] = &["dateLabel", "date", "scheduled_date", "start_date", "startDate"];

pub const DEFAULT_TRIP_TITLE: &str = "Untitled Trip";
pub const DEFAULT_LOCATION: &str = "Unknown location";
pub const DEFAULT_ACTIVITY_NAME: &str = "Untitled Activity";
