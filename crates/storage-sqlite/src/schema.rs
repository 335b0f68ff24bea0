diesel::table! {
    shows (id) {
        id -> Integer,
        license_key -> Text,
        name -> Text,
        club -> Text,
        start_date -> Date,
        end_date -> Date,
        location -> Nullable<Text>,
        contact -> Nullable<Text>,
        notes -> Nullable<Text>,
    }
}

diesel::table! {
    trials (id) {
        id -> Integer,
        show_id -> Integer,
        name -> Text,
        trial_date -> Date,
        trial_number -> Integer,
        trial_type -> Text,
    }
}

diesel::table! {
    classes (id) {
        id -> Integer,
        trial_id -> Integer,
        element -> Text,
        level -> Text,
        section -> Nullable<Text>,
        judge -> Nullable<Text>,
        sort_order -> Integer,
        time_limit -> Nullable<Text>,
        time_limit2 -> Nullable<Text>,
        time_limit3 -> Nullable<Text>,
        area_count -> Nullable<Integer>,
    }
}

diesel::table! {
    entries (id) {
        id -> Integer,
        class_id -> Integer,
        armband -> Integer,
        call_name -> Text,
        breed -> Nullable<Text>,
        handler -> Text,
        sort_order -> Integer,
        qualified -> Bool,
        not_qualified -> Bool,
        excused -> Bool,
        absent -> Bool,
        withdrawn -> Bool,
        reason -> Nullable<Text>,
        search_time -> Nullable<Text>,
        area_time1 -> Nullable<Text>,
        area_time2 -> Nullable<Text>,
        area_time3 -> Nullable<Text>,
        area_time1_ms -> Integer,
        area_time2_ms -> Integer,
        area_time3_ms -> Integer,
        total_faults -> Integer,
        correct_count -> Integer,
        incorrect_count -> Integer,
        placement -> Nullable<Integer>,
        total_score -> Nullable<Double>,
    }
}

diesel::table! {
    licenses (show_id) {
        show_id -> Integer,
        license_key -> Text,
        cached_status -> Text,
        checked_at -> Nullable<Text>,
    }
}

diesel::joinable!(trials -> shows (show_id));
diesel::joinable!(classes -> trials (trial_id));
diesel::joinable!(entries -> classes (class_id));
diesel::joinable!(licenses -> shows (show_id));

diesel::allow_tables_to_appear_in_same_query!(shows, trials, classes, entries, licenses);
