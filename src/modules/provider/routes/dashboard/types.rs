pub mod request {
    use crate::modules::auth::middleware::ProviderAuth;

    pub struct Payload {
        pub auth: ProviderAuth,
    }
}

pub mod response {
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use bigdecimal::BigDecimal;
    use serde::Serialize;
    use serde_json::json;

    /// Field names are the ones the mobile dashboard reads.
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Dashboard {
        pub provider_name: String,
        pub is_available: bool,
        pub rayon_km: i32,
        #[serde(rename = "caMoisCourant")]
        pub ca_mois_courant: BigDecimal,
        pub completed_jobs_month: i64,
        pub rating: BigDecimal,
        pub acceptance_rate: i64,
        #[serde(rename = "objectifMensuelCA")]
        pub objectif_mensuel_ca: BigDecimal,
    }

    pub enum Success {
        Dashboard(Dashboard),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Dashboard(dashboard) => (StatusCode::OK, Json(dashboard)).into_response(),
            }
        }
    }

    pub enum Error {
        FailedToFetchDashboard,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToFetchDashboard => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch provider dashboard" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
