#[tokio::main]
async fn main() {
    medibuddy::run().await;
}
