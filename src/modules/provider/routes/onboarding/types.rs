pub mod request {
    use crate::modules::auth::middleware::OnboardingAuth;
    use axum_typed_multipart::{FieldData, TryFromMultipart};
    use tempfile::NamedTempFile;

    #[derive(TryFromMultipart)]
    pub struct Body {
        pub bio: String,
        #[form_data(field_name = "interviewDate")]
        pub interview_date: Option<String>,
        #[form_data(limit = "10MiB")]
        pub cv: Option<FieldData<NamedTempFile>>,
        #[form_data(limit = "10MiB")]
        pub photo: Option<FieldData<NamedTempFile>>,
        pub services: String,
    }

    pub struct Payload {
        pub body: Body,
        pub auth: OnboardingAuth,
    }
}

pub mod response {
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        OnboardingCompleted,
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::OnboardingCompleted => (
                    StatusCode::OK,
                    Json(json!({
                        "message": "Onboarding completed, your account is awaiting validation"
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        InvalidServices,
        FailedToUploadFile,
        FailedToCompleteOnboarding,
        UnexpectedError,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::InvalidServices => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Invalid service selection" })),
                )
                    .into_response(),
                Self::FailedToUploadFile => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to upload file" })),
                )
                    .into_response(),
                Self::FailedToCompleteOnboarding => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to complete onboarding" })),
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
