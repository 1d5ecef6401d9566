diesel::table! {
    users (user_id) {
        user_id -> Int4,
        name -> Varchar,
        email -> Varchar,
        created_at -> Nullable<Timestamp>,
    }
}

diesel::table! {
    events (event_id) {
        event_id -> Int4,
        user_id -> Int4,
        title -> Varchar,
        description -> Nullable<Text>,
        event_date -> Date,
        created_at -> Nullable<Timestamp>,
    }
}

diesel::table! {
    notifications (notification_id) {
        notification_id -> Int4,
        user_id -> Int4,
        event_id -> Int4,
        subscribed_at -> Nullable<Timestamp>,
    }
}

diesel::joinable!(events -> users (user_id));
diesel::joinable!(notifications -> events (event_id));
diesel::joinable!(notifications -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(events, notifications, users);
