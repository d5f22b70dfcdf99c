pub mod echo;

#[async_trait::async_trait]
pub trait Source {
    type Error: std::error::Error;

    async fn public_ip(&self) -> Result<String, Self::Error>;
}
