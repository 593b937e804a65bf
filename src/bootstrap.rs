//! Wiring from configuration to a ready render pipeline.

use secrecy::ExposeSecret;
use std::sync::Arc;

use crate::adapters::{
    InMemoryContentStore, MathmlTypesetter, PostgresContentStore, PostgrestConfig,
    PostgrestContentStore, SyntectHighlighter,
};
use crate::application::{ContentFetcher, RenderPipeline};
use crate::config::{AppConfig, RenderConfig, StoreBackend, StoreConfig};
use crate::domain::document::DocumentCompiler;
use crate::ports::{ContentStore, StoreError};

/// Creates the content store adapter selected by `config.backend`.
pub fn build_store(config: &StoreConfig) -> Result<Arc<dyn ContentStore>, StoreError> {
    let store: Arc<dyn ContentStore> = match config.backend {
        StoreBackend::Postgrest => {
            let mut postgrest = PostgrestConfig::new(config.url.as_str(), config.api_key())
                .with_timeout(config.timeout());
            if let Some(key) = &config.service_role_key {
                postgrest = postgrest.with_service_role_key(key.expose_secret().as_str());
            }
            Arc::new(PostgrestContentStore::new(postgrest)?)
        }
        StoreBackend::Postgres => Arc::new(PostgresContentStore::connect_lazy(
            &config.url,
            config.max_connections,
            config.timeout(),
        )?),
        StoreBackend::Memory => match &config.fixtures_path {
            Some(path) => Arc::new(InMemoryContentStore::from_json_file(&config.table, path)?),
            None => Arc::new(InMemoryContentStore::new()),
        },
    };
    Ok(store)
}

/// Creates a compiler with the passes enabled in `config`.
pub fn build_compiler(config: &RenderConfig) -> DocumentCompiler {
    let mut compiler = DocumentCompiler::structural_only();
    if config.highlight {
        compiler = compiler.with_highlighter(Arc::new(SyntectHighlighter::new()));
    }
    if config.math {
        compiler = compiler.with_typesetter(Arc::new(MathmlTypesetter::new()));
    }
    compiler
}

/// Creates the render pipeline for a loaded configuration.
pub fn build_pipeline(config: &AppConfig) -> Result<RenderPipeline, StoreError> {
    let store = build_store(&config.store)?;
    let fetcher = ContentFetcher::new(store).with_table(config.store.table.as_str());
    Ok(RenderPipeline::new(fetcher, build_compiler(&config.render))
        .with_freshness(config.render.freshness))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{FreshnessPolicy, RenderOutcome};
    use crate::domain::document::RenderNode;
    use std::io::Write;

    #[test]
    fn builds_each_backend() {
        let postgrest = StoreConfig {
            url: "https://project.supabase.co".to_string(),
            api_key: Some(secrecy::Secret::new("anon".to_string())),
            service_role_key: Some(secrecy::Secret::new("service".to_string())),
            ..Default::default()
        };
        assert_eq!(build_store(&postgrest).unwrap().name(), "postgrest");

        let memory = StoreConfig {
            backend: StoreBackend::Memory,
            ..Default::default()
        };
        assert_eq!(build_store(&memory).unwrap().name(), "memory");
    }

    #[tokio::test]
    async fn postgres_backend_connects_lazily() {
        let postgres = StoreConfig {
            backend: StoreBackend::Postgres,
            url: "postgres://user@127.0.0.1:1/blog".to_string(),
            ..Default::default()
        };
        assert_eq!(build_store(&postgres).unwrap().name(), "postgres");
    }

    #[tokio::test]
    async fn pipeline_from_fixture_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"slug": "hello", "title": "Hello", "date": "2023-01-01", "content": "```rust\nfn main() {{}}\n```\n\n$$x^2$$"}}]"#
        )
        .unwrap();

        let mut config = AppConfig::default();
        config.store.backend = StoreBackend::Memory;
        config.store.fixtures_path = Some(file.path().to_path_buf());
        config.render.freshness = FreshnessPolicy::MaxAge(30);

        let pipeline = build_pipeline(&config).unwrap();
        assert_eq!(pipeline.freshness(), FreshnessPolicy::MaxAge(30));

        let RenderOutcome::Rendered(article) = pipeline.render_article("hello").await else {
            panic!("expected rendered article");
        };
        assert!(!article.is_degraded());
        assert!(matches!(
            &article.document.nodes[0],
            RenderNode::CodeBlock(block) if block.highlighted.is_some()
        ));
        assert!(article
            .document
            .nodes
            .iter()
            .any(|n| matches!(n, RenderNode::Paragraph { children }
                if matches!(&children[0], RenderNode::MathBlock(m) if m.typeset.is_some()))));
    }

    #[test]
    fn compiler_honours_render_flags() {
        let config = RenderConfig {
            highlight: false,
            math: false,
            ..Default::default()
        };
        let compilation = build_compiler(&config).compile(Some("$x$"));
        let RenderNode::Paragraph { children } = &compilation.document.nodes[0] else {
            panic!("expected paragraph");
        };
        assert!(matches!(&children[0], RenderNode::MathInline(m) if m.typeset.is_none()));
    }
}
