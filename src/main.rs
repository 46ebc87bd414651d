#[tokio::main]
async fn main() {
    if let Err(e) = scene_server::frameworks::server::run_with_config().await {
        eprintln!("scene server exited with error: {e}");
        std::process::exit(1);
    }
}
