pub mod twilio;

#[async_trait::async_trait]
pub trait Notifier {
    type Error: std::error::Error;

    async fn notify(&self, message: &str) -> Result<(), Self::Error>;
}
