//! Serves one file from disk on every GET, demonstrating the "read in
//! fixed-size slices" pattern from the original implementation's static send
//! buffer without ever holding more than one slice of the file in memory at
//! a time on the read side.
//!
//! Usage: `static_file <path>`, then `curl http://127.0.0.1:3000/`.

use http::{Method, StatusCode};
use micro_http::handler::{HandlerTable, make_handler};
use micro_http::server::{Request, Response, Server, ServerConfig};
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;

/// Stack-buffered read loop: pulls `reader` through a fixed-size slice at a
/// time and appends each slice to `resp`, so the file is never fully
/// resident in memory before the response buffer takes it over.
const SLICE_SIZE: usize = 128 * 1024;

fn write_file_in_slices(resp: &mut Response, mut reader: impl Read) -> io::Result<()> {
    let mut slice = [0u8; SLICE_SIZE];
    loop {
        let n = reader.read(&mut slice)?;
        if n == 0 {
            return Ok(());
        }
        resp.write_body(&slice[..n]);
    }
}

async fn serve_file(path: Arc<PathBuf>, _req: Request, mut resp: Response) -> io::Result<Response> {
    resp.set_status(StatusCode::OK);
    resp = tokio::task::spawn_blocking(move || {
        let file = File::open(path.as_path())?;
        write_file_in_slices(&mut resp, file)?;
        io::Result::Ok(resp)
    })
    .await
    .map_err(io::Error::other)??;
    Ok(resp)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let path = Arc::new(PathBuf::from(std::env::args().nth(1).ok_or("usage: static_file <path>")?));

    let mut handlers = HandlerTable::new();
    handlers.register(Method::GET, make_handler(move |req, resp| serve_file(path.clone(), req, resp)));

    let addr = "127.0.0.1:3000".parse()?;
    let server = Server::new(ServerConfig::new(addr), handlers);
    server.run().await?;
    Ok(())
}
