use api::App;
use content::Catalogue;
use core::{convert::Infallible, time::Duration};
use hyper::{server::conn::http1, service::service_fn};
use hyper_util::rt::TokioIo;
use std::{
    env,
    net::{Ipv4Addr, SocketAddr},
    sync::Arc,
};
use tokio::{net::TcpListener, runtime::Runtime, signal};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Parse environment variables
    let port: u16 = env::var("PORT")?.parse()?;
    let dir = env::var("CONTENT_DIR").unwrap_or_else(|_| String::from("content"));
    let ttl = match env::var("SESSION_TTL") {
        Ok(secs) => Duration::from_secs(secs.parse()?),
        _ => Duration::from_secs(3600),
    };

    // Every page must validate before we accept any connection
    let catalogue = Catalogue::load_dir(&dir)?;
    let app = Arc::new(App::new(catalogue, ttl));

    let runtime = Runtime::new()?;
    runtime.block_on(async {
        let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
        let tcp = TcpListener::bind(addr).await?;
        log::info!("listening on {addr}");

        loop {
            let (stream, peer) = tokio::select! {
                biased;
                _ = signal::ctrl_c() => break,
                pair = tcp.accept() => pair?,
            };

            let app = Arc::clone(&app);
            let service = service_fn(move |req| {
                let app = Arc::clone(&app);
                async move { Ok::<_, Infallible>(app.respond(req).await) }
            });

            tokio::spawn(async move {
                let io = TokioIo::new(stream);
                if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                    log::error!("connection from {peer} failed: {err}");
                }
            });
        }

        log::info!("shutting down");
        anyhow::Ok(())
    })
}
