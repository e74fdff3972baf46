use actix_web::dev::Server;
use actix_web::{middleware, web, App, HttpRequest, HttpResponse, HttpServer};
use std::net::TcpListener;
use crate::core::errors::ApiError;
use crate::state::AppState;

mod adapter {
    use actix_web::HttpRequest;

    pub fn actix_to_http_request(
        req: &HttpRequest,
        body: actix_web::web::Bytes,
    ) -> anyhow::Result<crate::Request> {
        let method = http::Method::from_bytes(req.method().as_str().as_bytes())?;

        let mut builder = http::Request::builder()
            .method(method)
            .uri(req.uri().to_string());

        // Copy headers
        for (name, value) in req.headers() {
            builder = builder.header(name.as_str(), value.as_bytes());
        }

        Ok(builder.body(body.to_vec())?)
    }

    pub fn http_to_actix_response(resp: crate::Response) -> actix_web::HttpResponse {
        let (parts, body) = resp.into_parts();

        let mut response = actix_web::HttpResponse::build(
            actix_web::http::StatusCode::from_u16(parts.status.as_u16())
                .unwrap_or(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR),
        );

        for (name, value) in parts.headers.iter() {
            if let Ok(val_str) = value.to_str() {
                response.append_header((name.as_str(), val_str));
            }
        }

        response.body(body)
    }
}

/// Serve `state` on an already-bound listener.
pub fn listen(listener: TcpListener, state: web::Data<AppState>) -> std::io::Result<Server> {
    let server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .default_service(web::route().to(handle_all))
    })
    .listen(listener)?
    .run();

    Ok(server)
}

async fn handle_all(req: HttpRequest, body: web::Bytes, state: web::Data<AppState>) -> HttpResponse {
    let request = match adapter::actix_to_http_request(&req, body) {
        Ok(r) => r,
        Err(err) => {
            log::warn!("could not convert request for {}: {}", req.uri(), err);
            return adapter::http_to_actix_response(
                ApiError::BadRequest("Invalid request".to_string()).into(),
            );
        }
    };

    match crate::handle(request, &state) {
        Ok(response) => adapter::http_to_actix_response(response),
        Err(err) => {
            log::error!("{} {} failed: {:#}", req.method(), req.uri(), err);
            adapter::http_to_actix_response(
                ApiError::InternalError("Internal server error".to_string()).into(),
            )
        }
    }
}
