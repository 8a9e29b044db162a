//! Diesel table definitions. Must match `backend/migrations` exactly.

diesel::table! {
    /// Registered accounts, unique on the normalised email.
    accounts (id) {
        id -> Int8,
        email -> Text,
        /// Argon2id PHC string.
        credential -> Text,
        /// `candidate` or `company`.
        kind -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// One row per candidate account, unique on `account_id`.
    candidate_profiles (id) {
        id -> Int8,
        account_id -> Int8,
        display_name -> Text,
        first_name -> Nullable<Text>,
        last_name -> Nullable<Text>,
        job_title -> Nullable<Text>,
        years_experience -> Nullable<Int4>,
        salary_range -> Nullable<Text>,
        native_language -> Nullable<Text>,
        other_languages -> Array<Text>,
        job_titles -> Array<Text>,
        education_level -> Nullable<Text>,
        education_areas -> Array<Text>,
        sectors -> Array<Text>,
        tools -> Array<Text>,
        birth_day -> Nullable<Int2>,
        birth_month -> Nullable<Int2>,
        birth_year -> Nullable<Int2>,
        avatar -> Nullable<Text>,
        location -> Nullable<Text>,
        phone -> Nullable<Text>,
        summary -> Nullable<Text>,
        availability -> Nullable<Text>,
        remote_work -> Nullable<Text>,
        relocation -> Nullable<Text>,
        cv -> Nullable<Text>,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// One row per company account, unique on `account_id`.
    company_profiles (id) {
        id -> Int8,
        account_id -> Int8,
        company_name -> Text,
        sector -> Nullable<Text>,
        employee_count -> Nullable<Int8>,
        headquarters -> Nullable<Text>,
        logo -> Nullable<Text>,
        vat_number -> Nullable<Text>,
        description -> Nullable<Text>,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(candidate_profiles -> accounts (account_id));
diesel::joinable!(company_profiles -> accounts (account_id));

diesel::allow_tables_to_appear_in_same_query!(accounts, candidate_profiles, company_profiles);
