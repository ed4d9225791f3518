use crate::utils::error::Result;
use async_trait::async_trait;

/// The external service that turns a prompt into a single text response.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn respond_to_prompt(&self, prompt: &str) -> Result<String>;
}

#[async_trait]
impl<T: TextGenerator + ?Sized> TextGenerator for &T {
    async fn respond_to_prompt(&self, prompt: &str) -> Result<String> {
        (**self).respond_to_prompt(prompt).await
    }
}

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Human-readable location of `path` inside this storage.
    fn location(&self, path: &str) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn endpoint(&self) -> &str;
    fn model(&self) -> &str;
    fn api_key(&self) -> Option<&str>;
    fn temperature(&self) -> Option<f32>;
    fn max_tokens(&self) -> Option<u32>;
    fn output_path(&self) -> Option<&str>;
}
