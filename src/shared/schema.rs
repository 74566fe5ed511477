diesel::table! {
    canvases (id) {
        id -> Int4,
        name -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    cards (id) {
        id -> Int4,
        title -> Varchar,
        content -> Text,
        created_at -> Timestamptz,
        position_x -> Float8,
        position_y -> Float8,
        width -> Float8,
        height -> Float8,
        canvas_id -> Int4,
    }
}

diesel::joinable!(cards -> canvases (canvas_id));

diesel::allow_tables_to_appear_in_same_query!(canvases, cards);
