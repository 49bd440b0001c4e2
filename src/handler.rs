use std::sync::Arc;

use async_graphql::{
    http::{parse_query_string, GraphiQLSource},
    parser::{parse_query, types::OperationType},
    ErrorExtensions, Pos, ServerError,
};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::{RawQuery, State},
    http::{header::ACCEPT, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    Extension,
};

use crate::{model::Session, AppState};

const HOME_PAGE: &str = include_str!("../templates/home.html");

// Handler for the static landing page
pub async fn home() -> impl IntoResponse {
    Html(HOME_PAGE)
}

// Handler executing GraphQL documents sent as a POST body
pub async fn graphql_handler(
    State(state): State<Arc<AppState>>,
    session: Option<Extension<Session>>,
    request: GraphQLRequest,
) -> GraphQLResponse {
    execute(&state, session, request.into_inner()).await.into()
}

// Handler for GET /graphql: the GraphiQL explorer for browsers, otherwise the
// `?query=` document is executed. Mutations are only accepted over POST.
pub async fn graphql_get(
    State(state): State<Arc<AppState>>,
    session: Option<Extension<Session>>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    let wants_html = headers
        .get(ACCEPT)
        .and_then(|value| value.to_str().ok())
        .map_or(false, |accept| accept.contains("text/html"));

    let query = match query {
        Some(query) if !wants_html => query,
        _ => return graphiql().into_response(),
    };

    let request = match parse_query_string(&query) {
        Ok(request) => request,
        Err(err) => {
            let error = ServerError::new(err.to_string(), None);
            return (
                StatusCode::BAD_REQUEST,
                GraphQLResponse::from(async_graphql::Response::from_errors(vec![error])),
            )
                .into_response();
        }
    };

    if selects_mutation(&request) {
        let error = ServerError::new("mutations are only accepted over POST", None);
        return (
            StatusCode::METHOD_NOT_ALLOWED,
            GraphQLResponse::from(async_graphql::Response::from_errors(vec![error])),
        )
            .into_response();
    }

    GraphQLResponse::from(execute(&state, session, request).await).into_response()
}

fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

// Whether the operation the request would run is a mutation
fn selects_mutation(request: &async_graphql::Request) -> bool {
    let Ok(document) = parse_query(&request.query) else {
        return false;
    };
    let wanted = request.operation_name.as_deref();
    document.operations.iter().any(|(name, operation)| {
        operation.node.ty == OperationType::Mutation
            && (wanted.is_none() || name.map(|name| name.as_str()) == wanted)
    })
}

async fn execute(
    state: &AppState,
    session: Option<Extension<Session>>,
    request: async_graphql::Request,
) -> async_graphql::Response {
    let session = session.map(|Extension(session)| session).unwrap_or_default();

    // A token that fails verification rejects the whole document
    if let Session::Invalid(err) = session {
        let mut error = err.extend().into_server_error(Pos::default());
        error.locations.clear();
        return async_graphql::Response::from_errors(vec![error]);
    }

    state.schema.execute(request.data(session)).await
}
