//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation; `diesel print-schema` can regenerate them from a live
//! database when the migrations change.

diesel::table! {
    /// Registered users.
    ///
    /// `email` carries a unique index; it is the domain-unique key.
    users (id) {
        /// Primary key, generated sequence value.
        id -> Int8,
        /// Display name (max 50 characters).
        name -> Varchar,
        /// Email address, unique among users.
        email -> Varchar,
        /// Phone number: `0` followed by ten digits.
        phone_number -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp (maintained by trigger).
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Restaurant listings.
    ///
    /// `phone_number` carries a unique index; it is the domain-unique key.
    restaurants (id) {
        id -> Int8,
        name -> Varchar,
        post_code -> Varchar,
        phone_number -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Reviews posted by users about restaurants.
    ///
    /// (`user_id`, `restaurant_id`) carries a unique index — one review per
    /// user per restaurant. `user_id` cascades on user deletion.
    reviews (id) {
        id -> Int8,
        user_id -> Int8,
        restaurant_id -> Int8,
        review -> Varchar,
        rating -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(reviews -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(users, restaurants, reviews);
