use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let key = std::env::var("CB_KEY").unwrap_or_else(|_| "dev-key".to_string());
    let secret = std::env::var("CB_SECRET").unwrap_or_else(|_| "dev-secret".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    println!("listening on {addr}");
    mock_server::run(listener, &key, &secret).await
}
