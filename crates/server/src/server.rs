//! Server lifecycle: bind, accept, one task per connection, stop on signal.

use crate::handler::RequestHandler;
use crate::handlers::{EchoHandler, FileHandler, NotFoundHandler, RootHandler, UserAgentHandler};
use crate::router::{self, Router, exact, prefix};
use crate::{HandlerError, RequestContext, ServerBuildError, ServerConfig, ServerError};

use async_trait::async_trait;
use bytes::Bytes;
use http::{Request, Response};
use mini_http::connection::HttpConnection;
use mini_http::handler::Handler;
use mini_http::protocol::RequestHeader;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{debug, error, info, warn};

pub struct ServerBuilder {
    router: Option<Router>,
    default_handler: Option<Box<dyn RequestHandler>>,
    address: Option<String>,
}

impl ServerBuilder {
    fn new() -> Self {
        Self { router: None, default_handler: None, address: None }
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn router(mut self, router: Router) -> Self {
        self.router = Some(router);
        self
    }

    pub fn default_handler(mut self, request_handler: impl RequestHandler + 'static) -> Self {
        self.default_handler = Some(Box::new(request_handler));
        self
    }

    pub fn build(self) -> Result<Server, ServerBuildError> {
        let router = self.router.ok_or(ServerBuildError::MissingRouter)?;
        let default_handler = self.default_handler.ok_or(ServerBuildError::MissingDefaultHandler)?;
        let address = self.address.ok_or(ServerBuildError::MissingAddress)?;
        Ok(Server { router, default_handler, address })
    }
}

/// Routes each request through its [`Router`], falling back to the default
/// handler when no route accepts it.
pub struct Server {
    router: Router,
    default_handler: Box<dyn RequestHandler>,
    address: String,
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::new()
    }

    /// Builds the fixed route table, serving files from `config.directory`.
    pub fn from_config(config: &ServerConfig) -> Result<Self, ServerBuildError> {
        let files = FileHandler::new(&config.directory);

        let router = Router::builder()
            .route(exact("/"), router::get(RootHandler))
            .route(prefix("/echo/"), router::get(EchoHandler))
            .route(exact("/user-agent"), router::get(UserAgentHandler))
            .route(prefix("/files/"), router::get(files.clone()))
            .route(prefix("/files/"), router::post(files))
            .build();

        Server::builder().router(router).default_handler(NotFoundHandler).address(&config.address).build()
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Binds the configured address and serves until `shutdown` resolves.
    pub async fn start(self, shutdown: impl Future<Output = ()>) -> Result<(), ServerError> {
        let listener = match TcpListener::bind(self.address.as_str()).await {
            Ok(listener) => listener,
            Err(e) => {
                error!(address = %self.address, cause = %e, "bind server error");
                return Err(ServerError::Bind { address: self.address, source: e });
            }
        };

        match listener.local_addr() {
            Ok(local_addr) => info!(address = %local_addr, "start listening"),
            Err(_) => info!(address = %self.address, "start listening"),
        }

        self.serve(listener, shutdown).await;
        Ok(())
    }

    /// Accepts connections from `listener` until `shutdown` resolves, then drops
    /// the listener. Connections already accepted keep running on their own tasks.
    pub async fn serve(self, listener: TcpListener, shutdown: impl Future<Output = ()>) {
        let handler = Arc::new(self);
        tokio::pin!(shutdown);

        loop {
            let (tcp_stream, remote_addr) = tokio::select! {
                biased;
                () = &mut shutdown => {
                    info!("shutdown signal received, stop accepting");
                    break;
                }
                accepted = listener.accept() => match accepted {
                    Ok(stream_and_addr) => stream_and_addr,
                    Err(e) => {
                        warn!(cause = %e, "failed to accept");
                        continue;
                    }
                },
            };

            let handler = Arc::clone(&handler);

            tokio::spawn(async move {
                let (reader, writer) = tcp_stream.into_split();
                let connection = HttpConnection::new(reader, writer);
                match connection.process(handler).await {
                    Ok(()) => {
                        debug!(%remote_addr, "finished process, connection shutdown");
                    }
                    Err(e) => {
                        error!(%remote_addr, cause = %e, "service has error, connection shutdown");
                    }
                }
            });
        }

        drop(listener);
        info!("server stopped");
    }
}

#[async_trait]
impl Handler for Server {
    type Error = HandlerError;

    async fn call(&self, req: Request<Bytes>) -> Result<Response<Bytes>, Self::Error> {
        let (parts, body) = req.into_parts();
        let header = RequestHeader::from(parts);

        info!(method = %header.method(), path = %header.uri().path(), "request");

        match self.router.at(&header) {
            Some(route) => {
                let request_context = RequestContext::new(&header, route.path_param());
                route.handler().invoke(&request_context, body).await
            }
            None => {
                let request_context = RequestContext::new(&header, "");
                self.default_handler.invoke(&request_context, body).await
            }
        }
    }
}

/// Resolves on ctrl-c, or on SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(cause = %e, "failed to install ctrl-c handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(e) => {
                error!(cause = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
