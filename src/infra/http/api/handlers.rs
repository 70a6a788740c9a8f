use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;

use crate::application::catalog::CatalogFilter;
use crate::application::items::{
    AdminItemError, CreateItemCommand, ItemListQuery, UpdateItemCommand,
};
use crate::application::pagination::{PageRequest, PageSize, parse_page};
use crate::application::repos::RepoError;
use crate::domain::error::DomainError;

use super::error::{ApiError, codes};
use super::models::*;
use super::state::ApiState;

/// Raw list parameters; every field is parsed by hand so malformed values
/// produce the API error body instead of an extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct ItemListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub refresh: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RefreshParams {
    pub refresh: Option<String>,
}

/// -------- Items --------
pub async fn list_items(
    State(state): State<ApiState>,
    Query(params): Query<ItemListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let query = parse_list_params(&params, state.default_page_size)?;
    let view = state.items.list(&query).await.map_err(item_to_api)?;
    Ok(Json(view))
}

pub async fn get_item(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_item_id(&id)?;
    let item = state
        .items
        .find(id)
        .await
        .map_err(item_to_api)?
        .ok_or_else(|| ApiError::not_found("item not found"))?;
    Ok(Json(item))
}

pub async fn create_item(
    State(state): State<ApiState>,
    Json(payload): Json<ItemCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let command = CreateItemCommand {
        id: payload.id,
        name: payload.name,
        item_type: payload.item_type,
        description: payload.description,
        icon_id: payload.icon_id,
        part: payload.part,
        gender: payload.gender,
        power_require: payload.power_require,
        is_up_to_up: payload.is_up_to_up,
    };

    let record = state
        .items
        .create_item(command)
        .await
        .map_err(item_to_api)?;

    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update_item(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(payload): Json<ItemUpdateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let command = UpdateItemCommand {
        id: parse_item_id(&id)?,
        name: payload.name,
        item_type: payload.item_type,
        description: payload.description,
        icon_id: payload.icon_id,
        part: payload.part,
        gender: payload.gender,
        power_require: payload.power_require,
        is_up_to_up: payload.is_up_to_up,
    };

    let record = state
        .items
        .update_item(command)
        .await
        .map_err(item_to_api)?;

    Ok(Json(record))
}

pub async fn delete_item(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_item_id(&id)?;
    state.items.delete_item(id).await.map_err(item_to_api)?;
    Ok(StatusCode::NO_CONTENT)
}

/// -------- Item types --------
pub async fn list_item_types(
    State(state): State<ApiState>,
    Query(params): Query<RefreshParams>,
) -> Result<impl IntoResponse, ApiError> {
    let refresh = parse_refresh(params.refresh.as_deref())?;
    let types = state
        .items
        .item_types(refresh)
        .await
        .map_err(item_to_api)?;
    Ok(Json(types))
}

/// -------- Parameter parsing --------
pub fn parse_list_params(
    params: &ItemListParams,
    default_size: PageSize,
) -> Result<ItemListQuery, ApiError> {
    let page = match non_blank(params.page.as_deref()) {
        Some(raw) => parse_page(raw)
            .map_err(|err| ApiError::bad_request("invalid page", Some(err.to_string())))?,
        None => PageRequest::default().page,
    };

    let size = match non_blank(params.limit.as_deref()) {
        Some(raw) => raw
            .parse::<PageSize>()
            .map_err(|err| ApiError::bad_request("invalid limit", Some(err.to_string())))?,
        None => default_size,
    };

    let type_id = non_blank(params.item_type.as_deref())
        .map(|raw| {
            raw.trim().parse::<i16>().map_err(|_| {
                ApiError::bad_request(
                    "invalid type",
                    Some(format!("type must be an integer item type id, got `{raw}`")),
                )
            })
        })
        .transpose()?;

    Ok(ItemListQuery {
        filter: CatalogFilter::new(params.search.as_deref(), type_id.map(i64::from)),
        page: PageRequest::new(page, size),
        refresh: parse_refresh(params.refresh.as_deref())?,
    })
}

/// Accepts the usual boolean spellings; absent or empty means `false`.
pub fn parse_refresh(raw: Option<&str>) -> Result<bool, ApiError> {
    let Some(raw) = non_blank(raw) else {
        return Ok(false);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ApiError::bad_request(
            "invalid refresh flag",
            Some(format!("refresh must be a boolean, got `{raw}`")),
        )),
    }
}

fn parse_item_id(raw: &str) -> Result<i32, ApiError> {
    match raw.trim().parse::<i32>() {
        Ok(id) if id >= 0 => Ok(id),
        _ => Err(ApiError::bad_request(
            "invalid item id",
            Some(format!("item id must be a non-negative integer, got `{raw}`")),
        )),
    }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.filter(|value| !value.trim().is_empty())
}

/// -------- Helper conversions --------
fn repo_to_api(err: RepoError) -> ApiError {
    match err {
        RepoError::Duplicate { constraint } => ApiError::new(
            StatusCode::CONFLICT,
            codes::DUPLICATE,
            "Duplicate record",
            Some(constraint),
        ),
        RepoError::NotFound => ApiError::not_found("resource not found"),
        RepoError::InvalidInput { message } => ApiError::new(
            StatusCode::BAD_REQUEST,
            codes::INVALID_INPUT,
            "Invalid input",
            Some(message),
        ),
        RepoError::Integrity { message } => ApiError::new(
            StatusCode::CONFLICT,
            codes::INTEGRITY,
            "Integrity constraint violated",
            Some(message),
        ),
        RepoError::Timeout => ApiError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            codes::DB_TIMEOUT,
            "Database timeout",
            None,
        ),
        RepoError::Persistence(msg) => ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            codes::REPO,
            "Persistence error",
            Some(msg),
        ),
    }
}

fn item_to_api(err: AdminItemError) -> ApiError {
    match err {
        AdminItemError::Invalid(domain) => domain_to_api(domain),
        AdminItemError::NotFound => ApiError::not_found("item not found"),
        AdminItemError::Repo(repo) => repo_to_api(repo),
    }
}

fn domain_to_api(err: DomainError) -> ApiError {
    ApiError::new(
        StatusCode::BAD_REQUEST,
        codes::INVALID_INPUT,
        "Invalid item",
        Some(err.to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> ItemListParams {
        let mut params = ItemListParams::default();
        for (key, value) in pairs {
            let value = Some(value.to_string());
            match *key {
                "page" => params.page = value,
                "limit" => params.limit = value,
                "search" => params.search = value,
                "type" => params.item_type = value,
                "refresh" => params.refresh = value,
                other => panic!("unexpected key {other}"),
            }
        }
        params
    }

    #[test]
    fn missing_parameters_fall_back_to_defaults() {
        let query = parse_list_params(&ItemListParams::default(), PageSize::default()).unwrap();
        assert_eq!(query.page, PageRequest::default());
        assert!(!query.refresh);
        assert_eq!(query.filter, CatalogFilter::default());
    }

    #[test]
    fn configured_default_size_applies_without_limit() {
        let size = PageSize::limited(50).unwrap();
        let query = parse_list_params(&params(&[("page", "2")]), size).unwrap();
        assert_eq!(query.page.size, size);
        assert_eq!(query.page.page.get(), 2);
    }

    #[test]
    fn all_limit_and_type_filter_parse() {
        let query = parse_list_params(
            &params(&[("limit", "all"), ("type", "7"), ("search", " bow ")]),
            PageSize::default(),
        )
        .unwrap();
        assert_eq!(query.page.size, PageSize::Unlimited);
        assert_eq!(query.filter.type_id(), Some(7));
        assert_eq!(query.filter.search(), Some("bow"));
    }

    #[test]
    fn malformed_parameters_are_bad_requests() {
        for pairs in [
            [("page", "0")],
            [("page", "abc")],
            [("limit", "-1")],
            [("type", "sword")],
            [("type", "40000")],
            [("refresh", "maybe")],
        ] {
            let err = parse_list_params(&params(&pairs), PageSize::default())
                .expect_err("rejected");
            assert_eq!(err.status(), StatusCode::BAD_REQUEST, "{pairs:?}");
            assert_eq!(err.code(), codes::BAD_REQUEST);
        }
    }

    #[test]
    fn refresh_accepts_boolean_spellings() {
        assert!(parse_refresh(Some("true")).unwrap());
        assert!(parse_refresh(Some("1")).unwrap());
        assert!(parse_refresh(Some("YES")).unwrap());
        assert!(!parse_refresh(Some("off")).unwrap());
        assert!(!parse_refresh(None).unwrap());
        assert!(!parse_refresh(Some("")).unwrap());
    }

    #[test]
    fn negative_ids_are_rejected() {
        assert_eq!(parse_item_id("12").unwrap(), 12);
        assert!(parse_item_id("-1").is_err());
        assert!(parse_item_id("x").is_err());
    }

    #[test]
    fn repo_errors_map_to_statuses() {
        let cases = [
            (
                RepoError::Duplicate {
                    constraint: "item_templates_pkey".into(),
                },
                StatusCode::CONFLICT,
            ),
            (RepoError::NotFound, StatusCode::NOT_FOUND),
            (
                RepoError::InvalidInput {
                    message: "bad".into(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (RepoError::Timeout, StatusCode::SERVICE_UNAVAILABLE),
            (
                RepoError::Persistence("down".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(repo_to_api(err).status(), status);
        }
    }
}
