//! Helpers shared by the tests that run against a live mock server.

use clientes_cli::transport::UreqTransport;
use clientes_core::{CustomerClient, CustomerSession};

/// Start the mock server on a random port in its own runtime thread.
pub fn start_server() -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

/// An address nothing listens on.
pub fn dead_addr() -> std::net::SocketAddr {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
}

pub fn session(addr: std::net::SocketAddr) -> CustomerSession<UreqTransport> {
    CustomerSession::new(CustomerClient::new(&format!("http://{addr}")), UreqTransport::new())
}
