use crate::core::{ConfigProvider, MinifyResult, Pipeline, SourceDocument, Storage};
use crate::utils::error::{MinifyError, Result};
use reqwest::Client;
use std::time::Duration;

pub struct MinifyPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> MinifyPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            client: Client::new(),
        }
    }

    fn map_transport_error(&self, e: reqwest::Error) -> MinifyError {
        if e.is_timeout() {
            MinifyError::TimeoutError {
                seconds: self.config.timeout_seconds(),
            }
        } else {
            MinifyError::ApiError(e)
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for MinifyPipeline<S, C> {
    async fn extract(&self) -> Result<SourceDocument> {
        let path = self.config.input_file();
        tracing::debug!("Reading source file: {}", path);

        let raw = self.storage.read_file(path).await?;
        let content = String::from_utf8(raw)?;

        tracing::debug!("Loaded {} bytes from {}", content.len(), path);
        Ok(SourceDocument {
            path: path.to_string(),
            content,
        })
    }

    async fn transform(&self, source: SourceDocument) -> Result<MinifyResult> {
        let level = self.config.compilation_level();
        let params = [
            ("js_code", source.content.as_str()),
            ("compilation_level", level.as_str()),
            ("output_format", "text"),
            ("output_info", "compiled_code"),
        ];

        tracing::debug!(
            "Submitting {} bytes to {} ({})",
            source.byte_len(),
            self.config.api_endpoint(),
            level
        );

        let response = self
            .client
            .post(self.config.api_endpoint())
            .form(&params)
            .timeout(Duration::from_secs(self.config.timeout_seconds()))
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        tracing::debug!("API response status: {}", response.status());

        if !response.status().is_success() {
            return Err(MinifyError::HttpStatusError {
                status: response.status(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if body.is_empty() {
            return Err(MinifyError::EmptyResponseError);
        }

        let code = String::from_utf8(body.to_vec())?;

        Ok(MinifyResult {
            code,
            original_len: source.byte_len(),
            compilation_level: level,
        })
    }

    async fn load(&self, result: MinifyResult) -> Result<String> {
        let output_path = self.config.output_file();
        tracing::debug!("Writing {} bytes to {}", result.minified_len(), output_path);

        self.storage
            .write_file(output_path, result.code.as_bytes())
            .await?;

        Ok(output_path.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::CompilationLevel;
    use httpmock::prelude::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn put_file(&self, path: &str, data: &[u8]) {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                MinifyError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        api_endpoint: String,
        input_file: String,
        output_file: String,
        compilation_level: CompilationLevel,
        timeout_seconds: u64,
    }

    impl MockConfig {
        fn new(api_endpoint: String) -> Self {
            Self {
                api_endpoint,
                input_file: "input.js".to_string(),
                output_file: "output.min.js".to_string(),
                compilation_level: CompilationLevel::Simple,
                timeout_seconds: 5,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn api_endpoint(&self) -> &str {
            &self.api_endpoint
        }

        fn input_file(&self) -> &str {
            &self.input_file
        }

        fn output_file(&self) -> &str {
            &self.output_file
        }

        fn compilation_level(&self) -> CompilationLevel {
            self.compilation_level
        }

        fn timeout_seconds(&self) -> u64 {
            self.timeout_seconds
        }
    }

    #[tokio::test]
    async fn test_extract_reads_source_file() {
        let storage = MockStorage::new();
        storage.put_file("input.js", b"var a = 1;\n").await;

        let config = MockConfig::new("http://unused.test".to_string());
        let pipeline = MinifyPipeline::new(storage, config);

        let doc = pipeline.extract().await.unwrap();

        assert_eq!(doc.path, "input.js");
        assert_eq!(doc.content, "var a = 1;\n");
        assert_eq!(doc.byte_len(), 11);
    }

    #[tokio::test]
    async fn test_extract_missing_file_fails() {
        let storage = MockStorage::new();
        let config = MockConfig::new("http://unused.test".to_string());
        let pipeline = MinifyPipeline::new(storage, config);

        let err = pipeline.extract().await.unwrap_err();
        assert!(matches!(err, MinifyError::IoError(_)));
    }

    #[tokio::test]
    async fn test_extract_rejects_invalid_utf8() {
        let storage = MockStorage::new();
        storage.put_file("input.js", &[0xff, 0xfe, 0x00]).await;

        let config = MockConfig::new("http://unused.test".to_string());
        let pipeline = MinifyPipeline::new(storage, config);

        let err = pipeline.extract().await.unwrap_err();
        assert!(matches!(err, MinifyError::EncodingError(_)));
    }

    #[tokio::test]
    async fn test_transform_posts_required_form_fields() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/compile")
                .header("content-type", "application/x-www-form-urlencoded")
                .x_www_form_urlencoded_tuple("js_code", "function f(a,b){return a+b;}\n")
                .x_www_form_urlencoded_tuple("compilation_level", "SIMPLE_OPTIMIZATIONS")
                .x_www_form_urlencoded_tuple("output_format", "text")
                .x_www_form_urlencoded_tuple("output_info", "compiled_code");
            then.status(200).body("function f(a,b){return a+b}\n");
        });

        let storage = MockStorage::new();
        let config = MockConfig::new(server.url("/compile"));
        let pipeline = MinifyPipeline::new(storage, config);

        let source = SourceDocument {
            path: "input.js".to_string(),
            content: "function f(a,b){return a+b;}\n".to_string(),
        };
        let result = pipeline.transform(source).await.unwrap();

        api_mock.assert();
        assert_eq!(result.code, "function f(a,b){return a+b}\n");
        assert_eq!(result.original_len, 29);
        assert_eq!(result.minified_len(), 28);
        assert_eq!(result.compilation_level, CompilationLevel::Simple);
    }

    #[tokio::test]
    async fn test_transform_identity_when_service_echoes() {
        let source_text = "var answer = 42;\n";

        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/compile");
            then.status(200).body(source_text);
        });

        let storage = MockStorage::new();
        let config = MockConfig::new(server.url("/compile"));
        let pipeline = MinifyPipeline::new(storage, config);

        let source = SourceDocument {
            path: "input.js".to_string(),
            content: source_text.to_string(),
        };
        let result = pipeline.transform(source).await.unwrap();

        assert_eq!(result.code, source_text);
        assert_eq!(result.original_len, result.minified_len());
    }

    #[tokio::test]
    async fn test_transform_non_success_status_fails() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/compile");
            then.status(500);
        });

        let storage = MockStorage::new();
        let config = MockConfig::new(server.url("/compile"));
        let pipeline = MinifyPipeline::new(storage, config);

        let source = SourceDocument {
            path: "input.js".to_string(),
            content: "var a = 1;".to_string(),
        };
        let err = pipeline.transform(source).await.unwrap_err();

        api_mock.assert();
        assert!(matches!(
            err,
            MinifyError::HttpStatusError { status } if status.as_u16() == 500
        ));
    }

    #[tokio::test]
    async fn test_transform_empty_body_fails() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/compile");
            then.status(200).body("");
        });

        let storage = MockStorage::new();
        let config = MockConfig::new(server.url("/compile"));
        let pipeline = MinifyPipeline::new(storage, config);

        let source = SourceDocument {
            path: "input.js".to_string(),
            content: "var a = 1;".to_string(),
        };
        let err = pipeline.transform(source).await.unwrap_err();

        assert!(matches!(err, MinifyError::EmptyResponseError));
    }

    #[tokio::test]
    async fn test_transform_uses_configured_level() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/compile")
                .x_www_form_urlencoded_tuple("compilation_level", "ADVANCED_OPTIMIZATIONS");
            then.status(200).body("var a=1;");
        });

        let storage = MockStorage::new();
        let mut config = MockConfig::new(server.url("/compile"));
        config.compilation_level = CompilationLevel::Advanced;
        let pipeline = MinifyPipeline::new(storage, config);

        let source = SourceDocument {
            path: "input.js".to_string(),
            content: "var a = 1;".to_string(),
        };
        let result = pipeline.transform(source).await.unwrap();

        api_mock.assert();
        assert_eq!(result.compilation_level, CompilationLevel::Advanced);
    }

    #[tokio::test]
    async fn test_transform_slow_response_times_out() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/compile");
            then.status(200)
                .body("var a=1;")
                .delay(std::time::Duration::from_millis(2500));
        });

        let storage = MockStorage::new();
        let mut config = MockConfig::new(server.url("/compile"));
        config.timeout_seconds = 1;
        let pipeline = MinifyPipeline::new(storage, config);

        let source = SourceDocument {
            path: "input.js".to_string(),
            content: "var a = 1;".to_string(),
        };
        let err = pipeline.transform(source).await.unwrap_err();

        assert!(matches!(err, MinifyError::TimeoutError { seconds: 1 }));
    }

    #[tokio::test]
    async fn test_load_writes_response_verbatim() {
        let storage = MockStorage::new();
        let config = MockConfig::new("http://unused.test".to_string());
        let pipeline = MinifyPipeline::new(storage.clone(), config);

        let result = MinifyResult {
            code: "function f(a,b){return a+b}\n".to_string(),
            original_len: 29,
            compilation_level: CompilationLevel::Simple,
        };
        let output_path = pipeline.load(result).await.unwrap();

        assert_eq!(output_path, "output.min.js");
        let written = storage.get_file("output.min.js").await.unwrap();
        assert_eq!(written, b"function f(a,b){return a+b}\n");
    }
}
