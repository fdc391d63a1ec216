//! User management handlers.
//!
//! ```text
//! GET  /users
//! GET  /edit_user/{id}
//! POST /edit_user/{id}    name=Ann&email=ann@x.com&status=Inactive
//! POST /delete_user/{id}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use super::flash::{Flash, USER_DELETED, USER_UPDATED};
use super::guard::AuthenticatedUser;
use super::pages::{render, see_other};
use super::schemas::{ErrorSchema, PageSchema};
use super::session::SessionContext;
use super::state::HttpState;
use super::validation::{optional_status, path_id, user_error};
use crate::domain::{EmailAddress, User, UserChanges, UserName};
use crate::inbound::http::ApiResult;

const USERS_PAGE: &str = "/users";

/// User as shown on list and edit pages. The password hash never leaves
/// the domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub status: String,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            status: user.status().to_string(),
        }
    }
}

/// Edit form; omitted fields are left as they are.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct EditUserForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub status: Option<String>,
}

impl EditUserForm {
    fn into_changes(self) -> ApiResult<UserChanges> {
        Ok(UserChanges {
            name: self.name.map(UserName::new).transpose().map_err(user_error)?,
            email: self
                .email
                .map(EmailAddress::new)
                .transpose()
                .map_err(user_error)?,
            status: optional_status(self.status.as_deref())?,
        })
    }
}

/// List every account.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Users page; content.users lists UserView", body = PageSchema),
        (status = 303, description = "Login required"),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    session: SessionContext,
    user: AuthenticatedUser,
) -> ApiResult<HttpResponse> {
    let users: Vec<UserView> = state
        .accounts
        .list()
        .await?
        .iter()
        .map(UserView::from)
        .collect();
    render(&session, "Users", Some(&user.0), json!({ "users": users }))
}

/// Edit page for one account.
#[utoipa::path(
    get,
    path = "/edit_user/{id}",
    params(("id" = String, Path, description = "User id (UUID)")),
    responses(
        (status = 200, description = "Edit page; content.user is a UserView", body = PageSchema),
        (status = 303, description = "Login required"),
        (status = 404, description = "Unknown user", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "editUserPage"
)]
#[get("/edit_user/{id}")]
pub async fn edit_user_page(
    state: web::Data<HttpState>,
    session: SessionContext,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = path_id::<User>(&path)?;
    let target = state.accounts.get(&id).await?;
    render(
        &session,
        "Edit User",
        Some(&user.0),
        json!({ "user": UserView::from(&target) }),
    )
}

/// Overwrite the submitted fields of one account.
#[utoipa::path(
    post,
    path = "/edit_user/{id}",
    params(("id" = String, Path, description = "User id (UUID)")),
    request_body(content = EditUserForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Updated; redirect to /users"),
        (status = 400, description = "Invalid form", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema),
        (status = 409, description = "Email already used by another account", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "editUser"
)]
#[post("/edit_user/{id}")]
pub async fn edit_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    _user: AuthenticatedUser,
    path: web::Path<String>,
    form: web::Form<EditUserForm>,
) -> ApiResult<HttpResponse> {
    let id = path_id::<User>(&path)?;
    let changes = form.into_inner().into_changes()?;
    state.accounts.update(&id, &changes).await?;
    session.push_flash(Flash::success(USER_UPDATED))?;
    Ok(see_other(USERS_PAGE))
}

/// Remove one account.
///
/// Sessions held by the removed account resolve as anonymous from then on.
#[utoipa::path(
    post,
    path = "/delete_user/{id}",
    params(("id" = String, Path, description = "User id (UUID)")),
    responses(
        (status = 303, description = "Deleted; redirect to /users"),
        (status = 404, description = "Unknown user", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[post("/delete_user/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    _user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = path_id::<User>(&path)?;
    state.accounts.delete(&id).await?;
    session.push_flash(Flash::success(USER_DELETED))?;
    Ok(see_other(USERS_PAGE))
}

#[cfg(test)]
mod tests;
