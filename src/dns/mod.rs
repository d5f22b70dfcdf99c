pub mod porkbun;

#[async_trait::async_trait]
pub trait Provider: Send {
    type Error: std::error::Error + Send;

    /// Content of the managed record as currently published by the provider.
    async fn current_content(&self) -> Result<String, Self::Error>;
    async fn update_record(&self, content: &str) -> Result<(), Self::Error>;
}
