pub mod response {
    use crate::modules::admin::repository::Totals;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use bigdecimal::BigDecimal;
    use serde_json::json;

    pub enum Success {
        Overview {
            totals: Totals,
            platform_revenue: BigDecimal,
        },
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Overview {
                    totals,
                    platform_revenue,
                } => (
                    StatusCode::OK,
                    Json(json!({
                        "totalUsers": totals.users,
                        "totalProviders": totals.providers,
                        "pendingProviders": totals.pending_providers,
                        "totalJobs": totals.jobs,
                        "totalRevenue": totals.revenue,
                        "platformRevenue": platform_revenue,
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        UnexpectedError,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
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
