use actix_web::{web, HttpResponse};
use validator::Validate;

use kb_core::repositories::UserRepository;
use kb_core::services::notifier::Notifier;
use kb_shared::types::Envelope;

use crate::app::AppState;
use crate::dto::admin_dto::{ListUsersQuery, SearchUsersQuery};
use crate::handlers::{handle_domain_error, validation_failure};

/// Handler for GET /admin/user
///
/// Paged listing, newest first, optionally filtered by a search term
/// and a created-at date range.
pub async fn list_users<R, N>(
    state: web::Data<AppState<R, N>>,
    query: web::Query<ListUsersQuery>,
) -> HttpResponse
where
    R: UserRepository + 'static,
    N: Notifier + 'static,
{
    if let Err(errors) = query.validate() {
        return validation_failure(&errors);
    }

    match state
        .admin_service
        .list(query.filter(), query.page_query())
        .await
    {
        Ok((users, meta)) => HttpResponse::Ok().json(
            Envelope::success(users, "Users", "Users retrieved successfully")
                .with_pagination(meta),
        ),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for GET /admin/user/search
///
/// One-shot lookup across name, phone, email, bvn and customer id.
pub async fn search_users<R, N>(
    state: web::Data<AppState<R, N>>,
    query: web::Query<SearchUsersQuery>,
) -> HttpResponse
where
    R: UserRepository + 'static,
    N: Notifier + 'static,
{
    if let Err(errors) = query.validate() {
        return validation_failure(&errors);
    }

    match state
        .admin_service
        .search(&query.query, query.per_page())
        .await
    {
        Ok((users, meta)) => HttpResponse::Ok().json(
            Envelope::success(users, "Users", "Search results retrieved successfully")
                .with_pagination(meta),
        ),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for GET /admin/user/metrics
///
/// Count of accounts matching the same filter as the listing.
pub async fn user_metrics<R, N>(
    state: web::Data<AppState<R, N>>,
    query: web::Query<ListUsersQuery>,
) -> HttpResponse
where
    R: UserRepository + 'static,
    N: Notifier + 'static,
{
    if let Err(errors) = query.validate() {
        return validation_failure(&errors);
    }

    match state.admin_service.metrics(query.filter()).await {
        Ok(total) => HttpResponse::Ok().json(Envelope::success(
            serde_json::json!({ "total": total }),
            "Metrics",
            "User metrics retrieved successfully",
        )),
        Err(error) => handle_domain_error(error),
    }
}
