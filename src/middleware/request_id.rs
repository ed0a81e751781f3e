use axum::Router;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

pub trait RequestIdExt<S> {
    fn with_request_id(self) -> Router<S>;
}

impl<S> RequestIdExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Tag each request with an `x-request-id` (kept if the client sent one) and echo it back.
    /// Must be the outermost layer so the logging layer sees the id.
    fn with_request_id(self) -> Router<S> {
        self.layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }
}
