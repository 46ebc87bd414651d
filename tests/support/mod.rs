// One shared server instance for every integration test in this binary.

use std::net::TcpStream;
use std::sync::OnceLock;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

static BASE_URL: OnceLock<String> = OnceLock::new();

/// Starts the server once on an ephemeral port and returns its base URL.
/// Later callers get the same instance.
pub fn ensure_server() -> &'static str {
    BASE_URL
        .get_or_init(|| {
            let (addr_tx, addr_rx) = mpsc::channel();

            // The server gets its own OS thread and runtime so it outlives
            // the per-test tokio runtimes.
            thread::spawn(move || {
                let runtime = tokio::runtime::Runtime::new().expect("test runtime");
                runtime.block_on(async move {
                    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                        .await
                        .expect("bind ephemeral port");
                    let addr = listener.local_addr().expect("local addr");
                    addr_tx.send(addr).expect("report server address");
                    scene_server::run(listener).await.expect("server failed");
                });
            });

            let addr = addr_rx
                .recv_timeout(Duration::from_secs(5))
                .expect("server thread should report its address");

            // The listener is bound before the address is sent, but poll the
            // socket anyway so a slow accept loop cannot race the first test.
            for _ in 0..100 {
                if TcpStream::connect(addr).is_ok() {
                    return format!("http://{addr}");
                }
                thread::sleep(Duration::from_millis(20));
            }
            panic!("server did not become ready in time")
        })
        .as_str()
}
