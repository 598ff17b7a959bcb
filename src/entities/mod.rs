//! Entity module - SeaORM definitions for both stores.
//!
//! Relational store: users, restaurants, orders, order lines.
//! Document store: menu items, restaurant locations, rating/reviews, event logs.

pub mod event_log;
pub mod menu_item;
pub mod order;
pub mod order_line;
pub mod rating_review;
pub mod restaurant;
pub mod restaurant_location;
pub mod user;

// Re-export specific types to avoid conflicts
pub use event_log::{Entity as EventLog, Model as EventLogModel};
pub use menu_item::{Column as MenuItemColumn, Entity as MenuItem, Model as MenuItemModel};
pub use order::{Column as OrderColumn, Entity as Order, Model as OrderModel};
pub use order_line::{Column as OrderLineColumn, Entity as OrderLine, Model as OrderLineModel};
pub use rating_review::{
    Column as RatingReviewColumn, Entity as RatingReview, Model as RatingReviewModel,
};
pub use restaurant::{Entity as Restaurant, Model as RestaurantModel};
pub use restaurant_location::{
    Column as RestaurantLocationColumn, Entity as RestaurantLocation,
    Model as RestaurantLocationModel,
};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
