//! Handler for the dashboard hub screen.

use axum::Json;
use serde::Serialize;

use civicreport_remote::identity::AuthUser;

use crate::error::AppResult;
use crate::middleware::auth::CurrentUser;
use crate::response::DataResponse;

/// One navigation card on the dashboard.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct NavCard {
    pub title: &'static str,
    pub description: &'static str,
    /// UI route the card navigates to.
    pub path: &'static str,
}

/// The dashboard's cards, in display order.
const NAV_CARDS: [NavCard; 3] = [
    NavCard {
        title: "Report Issue",
        description: "Submit a new civic issue in your area",
        path: "/report",
    },
    NavCard {
        title: "View Reports",
        description: "Browse all submitted issue reports",
        path: "/reports",
    },
    NavCard {
        title: "Progress",
        description: "Track resolution status of issues",
        path: "/progress",
    },
];

/// View model for the dashboard screen.
#[derive(Debug, Serialize)]
pub struct DashboardView {
    /// Signed-in identity shown in the header.
    pub user: AuthUser,
    pub cards: Vec<NavCard>,
}

/// GET /api/v1/dashboard
///
/// The navigation hub. Static apart from the signed-in identity; no
/// backend call is made.
pub async fn dashboard(user: CurrentUser) -> AppResult<Json<DataResponse<DashboardView>>> {
    Ok(Json(DataResponse {
        data: DashboardView {
            user: user.user,
            cards: NAV_CARDS.to_vec(),
        },
    }))
}
