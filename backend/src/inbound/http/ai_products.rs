//! AI product management handlers.
//!
//! Products are provisioned outside the panel; admins can only review and
//! edit them.
//!
//! ```text
//! GET  /ai-management
//! GET  /edit_ai/{id}
//! POST /edit_ai/{id}    name=Writer&status=Inactive
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use super::flash::{AI_PRODUCT_UPDATED, Flash};
use super::guard::AuthenticatedUser;
use super::pages::{render, see_other};
use super::schemas::{ErrorSchema, PageSchema};
use super::session::SessionContext;
use super::state::HttpState;
use super::validation::{ai_product_error, optional_status, path_id};
use crate::domain::{AiProduct, AiProductChanges, ProductName};
use crate::inbound::http::ApiResult;

const AI_MANAGEMENT_PAGE: &str = "/ai-management";

/// Product as shown on list and edit pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AiProductView {
    pub id: String,
    pub name: String,
    pub status: String,
}

impl From<&AiProduct> for AiProductView {
    fn from(product: &AiProduct) -> Self {
        Self {
            id: product.id().to_string(),
            name: product.name().as_ref().to_owned(),
            status: product.status().to_string(),
        }
    }
}

/// Edit form; omitted fields are left as they are.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct EditAiProductForm {
    pub name: Option<String>,
    pub status: Option<String>,
}

impl EditAiProductForm {
    fn into_changes(self) -> ApiResult<AiProductChanges> {
        Ok(AiProductChanges {
            name: self
                .name
                .map(ProductName::new)
                .transpose()
                .map_err(ai_product_error)?,
            status: optional_status(self.status.as_deref())?,
        })
    }
}

/// List every AI product.
#[utoipa::path(
    get,
    path = "/ai-management",
    responses(
        (status = 200, description = "Products page; content.aiProducts lists AiProductView", body = PageSchema),
        (status = 303, description = "Login required")
    ),
    tags = ["ai-products"],
    operation_id = "listAiProducts"
)]
#[get("/ai-management")]
pub async fn list_ai_products(
    state: web::Data<HttpState>,
    session: SessionContext,
    user: AuthenticatedUser,
) -> ApiResult<HttpResponse> {
    let products: Vec<AiProductView> = state
        .ai_products
        .list()
        .await?
        .iter()
        .map(AiProductView::from)
        .collect();
    render(
        &session,
        "AI Management",
        Some(&user.0),
        json!({ "aiProducts": products }),
    )
}

/// Edit page for one product.
#[utoipa::path(
    get,
    path = "/edit_ai/{id}",
    params(("id" = String, Path, description = "AI product id (UUID)")),
    responses(
        (status = 200, description = "Edit page; content.aiProduct is an AiProductView", body = PageSchema),
        (status = 303, description = "Login required"),
        (status = 404, description = "Unknown product", body = ErrorSchema)
    ),
    tags = ["ai-products"],
    operation_id = "editAiProductPage"
)]
#[get("/edit_ai/{id}")]
pub async fn edit_ai_product_page(
    state: web::Data<HttpState>,
    session: SessionContext,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = path_id::<AiProduct>(&path)?;
    let product = state.ai_products.get(&id).await?;
    render(
        &session,
        "Edit AI Product",
        Some(&user.0),
        json!({ "aiProduct": AiProductView::from(&product) }),
    )
}

/// Overwrite the submitted fields of one product.
#[utoipa::path(
    post,
    path = "/edit_ai/{id}",
    params(("id" = String, Path, description = "AI product id (UUID)")),
    request_body(content = EditAiProductForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Updated; redirect to /ai-management"),
        (status = 400, description = "Invalid form", body = ErrorSchema),
        (status = 404, description = "Unknown product", body = ErrorSchema)
    ),
    tags = ["ai-products"],
    operation_id = "editAiProduct"
)]
#[post("/edit_ai/{id}")]
pub async fn edit_ai_product(
    state: web::Data<HttpState>,
    session: SessionContext,
    _user: AuthenticatedUser,
    path: web::Path<String>,
    form: web::Form<EditAiProductForm>,
) -> ApiResult<HttpResponse> {
    let id = path_id::<AiProduct>(&path)?;
    let changes = form.into_inner().into_changes()?;
    state.ai_products.update(&id, &changes).await?;
    session.push_flash(Flash::success(AI_PRODUCT_UPDATED))?;
    Ok(see_other(AI_MANAGEMENT_PAGE))
}
