//! User statistics report.
//!
//! The page carries the raw counts plus a pie-chart description; drawing
//! the chart is left to the front end.

use actix_web::{HttpResponse, get, web};
use serde::Serialize;
use utoipa::ToSchema;

use super::guard::AuthenticatedUser;
use super::pages::render;
use super::schemas::PageSchema;
use super::session::SessionContext;
use super::state::HttpState;
use crate::domain::UserStatistics;
use crate::inbound::http::ApiResult;

/// Active and total account counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserStatisticsView {
    pub active_count: u64,
    pub total_count: u64,
}

/// Chart description handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieChart {
    pub kind: &'static str,
    pub title: &'static str,
    pub labels: [&'static str; 2],
    pub values: [u64; 2],
}

/// Content of the reports page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportContent {
    pub stats: UserStatisticsView,
    pub chart: PieChart,
}

impl From<UserStatistics> for ReportContent {
    fn from(stats: UserStatistics) -> Self {
        Self {
            stats: UserStatisticsView {
                active_count: stats.active_count,
                total_count: stats.total_count,
            },
            chart: PieChart {
                kind: "pie",
                title: "User Statistics",
                labels: ["Active Users", "Total Users"],
                values: [stats.active_count, stats.total_count],
            },
        }
    }
}

/// Active versus total users, recomputed on every request.
#[utoipa::path(
    get,
    path = "/reports",
    responses(
        (status = 200, description = "Reports page; content is a ReportContent", body = PageSchema),
        (status = 303, description = "Login required")
    ),
    tags = ["reports"],
    operation_id = "reports"
)]
#[get("/reports")]
pub async fn reports(
    state: web::Data<HttpState>,
    session: SessionContext,
    user: AuthenticatedUser,
) -> ApiResult<HttpResponse> {
    let stats = state.reporting.user_statistics().await?;
    render(
        &session,
        "Reports",
        Some(&user.0),
        ReportContent::from(stats),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn chart_mirrors_the_counts() {
        let content = ReportContent::from(UserStatistics {
            active_count: 2,
            total_count: 3,
        });

        let value = serde_json::to_value(content).expect("serialise report");
        assert_eq!(
            value,
            json!({
                "stats": {"activeCount": 2, "totalCount": 3},
                "chart": {
                    "kind": "pie",
                    "title": "User Statistics",
                    "labels": ["Active Users", "Total Users"],
                    "values": [2, 3],
                }
            })
        );
    }
}
