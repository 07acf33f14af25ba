pub mod request {
    use crate::modules::user::repository::Role;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    #[serde(rename_all = "camelCase")]
    pub struct Body {
        #[validate(email(code = "INVALID_EMAIL", message = "Invalid email address"))]
        pub email: String,
        #[validate(length(min = 1, code = "INVALID_FULL_NAME", message = "Full name is required"))]
        pub full_name: String,
        #[validate(length(
            min = 6,
            code = "INVALID_PASSWORD",
            message = "Password must be at least 6 characters long"
        ))]
        pub password: String,
        pub role: Option<Role>,
        pub provider_category_code: Option<String>,
        pub cv_url: Option<String>,
        pub photo_url: Option<String>,
    }

    pub struct Payload {
        pub body: Body,
    }
}

pub mod response {
    use crate::utils::validation;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        Registered { user_id: String },
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Registered { user_id } => (
                    StatusCode::CREATED,
                    Json(json!({
                        "message": "Account created, check your email for a verification code",
                        "userId": user_id,
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        AdminRegistrationForbidden,
        FailedToFetchUser,
        EmailAlreadyInUse,
        SignupFailed,
        FailedToCreateProviderProfile,
        UnexpectedError,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => validation::into_response(errors),
                Self::AdminRegistrationForbidden => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Admin accounts cannot be self-registered" })),
                )
                    .into_response(),
                Self::FailedToFetchUser => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch user" })),
                )
                    .into_response(),
                Self::EmailAlreadyInUse => (
                    StatusCode::CONFLICT,
                    Json(json!({ "error": "Email already in use" })),
                )
                    .into_response(),
                Self::SignupFailed => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Sign up failed!" })),
                )
                    .into_response(),
                Self::FailedToCreateProviderProfile => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to create provider profile" })),
                )
                    .into_response(),
                Self::UnexpectedError => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Sorry an error occurred" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
