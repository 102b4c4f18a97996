//! Endpoint handlers.
//!
//! Each handler validates the resource first, then its own parameters, and
//! only then hands a [`Lookup`] to [`forward`]. Nothing reaches the upstream
//! unless every value has parsed.

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, RawQuery, State,
    },
    http::{Method, Uri},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::catalog::{InvalidPage, PageNumber, Resource, ResourceId, SearchQuery};
use crate::http::error::GatewayError;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::upstream::Lookup;

#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
}

/// `GET /api/{resource}/search?name=...`
pub async fn search_by_name(
    State(state): State<AppState>,
    uri: Uri,
    path: Result<Path<String>, PathRejection>,
    RawQuery(query): RawQuery,
) -> Result<Json<Value>, GatewayError> {
    let resource = match path {
        Ok(Path(resource)) => resource.parse()?,
        Err(rejection) => resource_from_raw_path(&uri, 2, rejection)?,
    };
    let name = name_param(query.as_deref());

    forward(&state, resource, Lookup::Search(SearchQuery::new(name))).await
}

/// `GET /api/pagination/{resource}?page=N`
pub async fn list_page(
    State(state): State<AppState>,
    uri: Uri,
    path: Result<Path<String>, PathRejection>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<Value>, GatewayError> {
    let resource = match path {
        Ok(Path(resource)) => resource.parse()?,
        Err(rejection) => resource_from_raw_path(&uri, 3, rejection)?,
    };
    let params = match params {
        Ok(Query(params)) => params,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unparseable pagination query");
            return Err(InvalidPage(rejection.body_text()).into());
        }
    };
    let page = PageNumber::from_query(params.page.as_deref())?;

    forward(&state, resource, Lookup::Page(page)).await
}

/// `GET /api/{resource}/{id}`
pub async fn get_by_id(
    State(state): State<AppState>,
    uri: Uri,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<Value>, GatewayError> {
    let (resource, id) = match path {
        Ok(Path(segments)) => segments,
        Err(rejection) => {
            let resource = resource_from_raw_path(&uri, 2, rejection)?;
            return Err(GatewayError::InvalidId(resource));
        }
    };
    let resource: Resource = resource.parse()?;
    let id = ResourceId::parse(Some(id.as_str())).ok_or(GatewayError::InvalidId(resource))?;

    forward(&state, resource, Lookup::ById(id)).await
}

/// `GET /api/{resource}` and `GET /api/{resource}/`: the id was omitted.
pub async fn missing_id(uri: Uri, path: Result<Path<String>, PathRejection>) -> GatewayError {
    let resource = match path {
        Ok(Path(resource)) => resource.parse::<Resource>(),
        Err(rejection) => match resource_from_raw_path(&uri, 2, rejection) {
            Ok(resource) => Ok(resource),
            Err(err) => return err,
        },
    };
    match resource {
        Ok(resource) => GatewayError::InvalidId(resource),
        Err(unknown) => unknown.into(),
    }
}

/// Method fallback on known paths: only GET is served.
pub async fn route_not_found(method: Method, uri: Uri) -> GatewayError {
    tracing::debug!(method = %method, uri = %uri, "No route matched");
    GatewayError::RouteNotFound
}

/// Router fallback for paths no route matches. These bypass the per-route
/// request counter, so they are counted here.
pub async fn unmatched_path(method: Method, uri: Uri) -> GatewayError {
    let err = route_not_found(method, uri).await;
    metrics::record_request("unmatched", err.status().as_u16());
    err
}

/// Every `name` value in the query string. Repeated values are joined with
/// commas; none at all means the parameter was absent.
fn name_param(query: Option<&str>) -> Option<String> {
    let values: Vec<String> = url::form_urlencoded::parse(query.unwrap_or_default().as_bytes())
        .filter(|(key, _)| key == "name")
        .map(|(_, value)| value.into_owned())
        .collect();

    if values.is_empty() {
        None
    } else {
        Some(values.join(","))
    }
}

/// Recover the resource from segment `index` of the raw path after a capture
/// failed to decode, so the allow-list still answers first.
fn resource_from_raw_path(
    uri: &Uri,
    index: usize,
    rejection: PathRejection,
) -> Result<Resource, GatewayError> {
    tracing::debug!(uri = %uri, error = %rejection, "Undecodable path segment");
    let segment = uri.path().split('/').nth(index).unwrap_or_default();
    let decoded = urlencoding::decode_binary(segment.as_bytes());
    Ok(String::from_utf8_lossy(&decoded).parse()?)
}

/// Issue the single upstream call for `lookup` and translate its outcome.
async fn forward(
    state: &AppState,
    resource: Resource,
    lookup: Lookup,
) -> Result<Json<Value>, GatewayError> {
    let endpoint = lookup.endpoint();

    match state.client.fetch(resource, &lookup).await {
        Ok(body) => Ok(Json(body)),
        Err(e) if endpoint.translates_not_found() && e.is_not_found() => {
            tracing::warn!(resource = %resource, endpoint = %endpoint, error = %e, "Upstream reported not found");
            Err(GatewayError::NotFound(resource))
        }
        Err(e) => {
            tracing::error!(resource = %resource, endpoint = %endpoint, error = %e, "Upstream request failed");
            Err(GatewayError::upstream(resource, endpoint, e))
        }
    }
}
