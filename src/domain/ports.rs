use crate::domain::model::{CompilationLevel, MinifyResult, SourceDocument};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn input_file(&self) -> &str;
    fn output_file(&self) -> &str;
    fn compilation_level(&self) -> CompilationLevel;
    fn timeout_seconds(&self) -> u64;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<SourceDocument>;
    async fn transform(&self, source: SourceDocument) -> Result<MinifyResult>;
    async fn load(&self, result: MinifyResult) -> Result<String>;
}
