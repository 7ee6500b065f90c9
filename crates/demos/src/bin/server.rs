//! A minimal server wiring example: one GET route and one POST echo route,
//! dispatched purely by method since this crate has no path router.

use http::{Method, StatusCode};
use micro_http::handler::{HandlerTable, make_handler};
use micro_http::server::{Request, Response, Server, ServerConfig};
use std::convert::Infallible;

async fn hello(_req: Request, mut resp: Response) -> Result<Response, Infallible> {
    resp.set_status(StatusCode::OK).set_header(http::header::CONTENT_TYPE, http::HeaderValue::from_static("text/plain")).write_body("hello from micro-http\n");
    Ok(resp)
}

async fn echo(req: Request, mut resp: Response) -> Result<Response, Infallible> {
    resp.set_status(StatusCode::OK).write_body(req.body().clone());
    Ok(resp)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let mut handlers = HandlerTable::new();
    handlers.register(Method::GET, make_handler(hello));
    handlers.register(Method::POST, make_handler(echo));

    let addr = "127.0.0.1:3000".parse()?;
    let server = Server::new(ServerConfig::new(addr), handlers);
    server.run().await?;
    Ok(())
}
