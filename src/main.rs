#[tokio::main]
async fn main() {
    admission_backend::run().await;
}
