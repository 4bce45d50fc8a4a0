use axum::{
    body::BoxBody,
    http::{header, HeaderValue, Response},
    Router,
};
use tower::util::MapResponseLayer;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

pub(crate) trait ApiRouterExt {
    fn with_cors_headers(self) -> Self;
}

impl<S> ApiRouterExt for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_cors_headers(self) -> Self {
        self.layer(MapResponseLayer::new(
            append_cors_headers as fn(Response<BoxBody>) -> Response<BoxBody>,
        ))
    }
}

fn append_cors_headers<ResponseBody>(mut record: Response<ResponseBody>) -> Response<ResponseBody>
where
    ResponseBody: http_body::Body,
{
    record.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(ALLOW_ORIGIN),
    );
    record.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    record
}
